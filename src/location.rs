use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AssessError;

// Environmental data for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationProfile {
    pub avg_annual_rainfall_mm: f64, // [mm/year]
    pub principal_aquifer: String,   // e.g. "Alluvium", "Basalt"
    pub soil_type: String,           // e.g. "Loamy Sand"
    pub soil_permeability: String,   // "low", "moderate" or "high"
}

// Latitude band mapped to a named profile (bounds exclusive)
#[derive(Debug, Clone, Deserialize)]
pub struct LatitudeBucket {
    pub profile: String,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl LatitudeBucket {
    fn contains(&self, lat: f64) -> bool {
        lat > self.lat_min && lat < self.lat_max
    }
}

/// Coarse coordinate-to-profile table. Buckets are tried in order and
/// anything unmatched resolves to the default profile, so a lookup always
/// yields a complete profile.
#[derive(Debug, Clone)]
pub struct LocationTable {
    buckets: Vec<LatitudeBucket>,
    profiles: HashMap<String, LocationProfile>,
    default: String,
}

impl LocationTable {
    pub fn new(
        buckets: Vec<LatitudeBucket>,
        profiles: HashMap<String, LocationProfile>,
        default: String,
    ) -> Result<Self, AssessError> {
        if !profiles.contains_key(&default) {
            return Err(AssessError::Config(format!(
                "default location profile '{default}' is not defined"
            )));
        }
        if let Some(bucket) = buckets.iter().find(|b| !profiles.contains_key(&b.profile)) {
            return Err(AssessError::Config(format!(
                "latitude bucket refers to unknown profile '{}'",
                bucket.profile
            )));
        }
        for (name, profile) in &profiles {
            let rain = profile.avg_annual_rainfall_mm;
            if !rain.is_finite() || rain <= 0.0 {
                return Err(AssessError::Config(format!(
                    "profile '{name}' must have positive rainfall"
                )));
            }
        }
        Ok(LocationTable {
            buckets,
            profiles,
            default,
        })
    }

    /// Name of the profile a coordinate resolves to.
    pub fn profile_name(&self, lat: f64, _lon: f64) -> &str {
        self.buckets
            .iter()
            .find(|b| b.contains(lat))
            .map(|b| b.profile.as_str())
            .unwrap_or(self.default.as_str())
    }

    pub fn lookup(&self, lat: f64, lon: f64) -> &LocationProfile {
        // Every name was checked in `new`
        &self.profiles[self.profile_name(lat, lon)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(rain: f64, perm: &str) -> LocationProfile {
        LocationProfile {
            avg_annual_rainfall_mm: rain,
            principal_aquifer: "Alluvium".to_string(),
            soil_type: "Loam".to_string(),
            soil_permeability: perm.to_string(),
        }
    }

    fn table() -> LocationTable {
        LocationTable::new(
            vec![LatitudeBucket {
                profile: "wet".to_string(),
                lat_min: 18.0,
                lat_max: 20.0,
            }],
            HashMap::from([
                ("dry".to_string(), profile(600.0, "high")),
                ("wet".to_string(), profile(2400.0, "low")),
            ]),
            "dry".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn bucket_match() {
        assert_eq!(table().lookup(19.07, 72.87).soil_permeability, "low");
    }

    #[test]
    fn bucket_bounds_are_exclusive() {
        assert_eq!(table().profile_name(18.0, 0.0), "dry");
        assert_eq!(table().profile_name(20.0, 0.0), "dry");
    }

    #[test]
    fn unmatched_falls_back_to_default() {
        let t = table();
        let p = t.lookup(-33.9, 151.2);
        assert_eq!(p.avg_annual_rainfall_mm, 600.0);
    }

    #[test]
    fn missing_default_is_rejected() {
        let err = LocationTable::new(vec![], HashMap::new(), "nowhere".to_string()).unwrap_err();
        assert!(matches!(err, AssessError::Config(_)));
    }

    #[test]
    fn dangling_bucket_is_rejected() {
        let err = LocationTable::new(
            vec![LatitudeBucket {
                profile: "ghost".to_string(),
                lat_min: 0.0,
                lat_max: 1.0,
            }],
            HashMap::from([("dry".to_string(), profile(600.0, "high"))]),
            "dry".to_string(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn zero_rainfall_profile_is_rejected() {
        let err = LocationTable::new(
            vec![],
            HashMap::from([("dry".to_string(), profile(0.0, "high"))]),
            "dry".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, AssessError::Config(_)));
    }
}
