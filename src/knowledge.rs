use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeEntry {
    pub keyword: String,
    pub answer: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub source: String,
}

/// Keyword-matched FAQ. Entries are tried in table order and the first
/// keyword contained in the query answers it.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    fallback_answer: String,
    fallback_source: String,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>, fallback_answer: String, fallback_source: String) -> Self {
        KnowledgeBase {
            entries,
            fallback_answer,
            fallback_source,
        }
    }

    pub fn ask(&self, query: &str) -> ChatAnswer {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .find(|e| query.contains(&e.keyword.to_lowercase()))
            .map(|e| ChatAnswer {
                answer: e.answer.clone(),
                source: e.source.clone(),
            })
            .unwrap_or_else(|| ChatAnswer {
                answer: self.fallback_answer.clone(),
                source: self.fallback_source.clone(),
            })
    }
}
