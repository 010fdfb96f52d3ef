use std::sync::Arc;

use rwh_assess::api::create_router;
use rwh_assess::{Assessor, RegressionEstimator, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    let tables = settings.tables()?;
    let estimator = RegressionEstimator::train(settings.estimator.samples, settings.estimator.seed)?;
    tracing::info!(
        samples = settings.estimator.samples,
        seed = settings.estimator.seed,
        "groundwater model ready"
    );

    let app = create_router(Arc::new(Assessor::new(tables, estimator)));

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("RTRWH assessment API listening on http://{}", settings.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
