// Opt-in reading of delimiter-separated triples. The extraction path itself never calls this.

use super::KG_TRIPLE_DELIMITER;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static TRIPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\(\s*([^,]+?)\s*,\s*([^,]+?)\s*,\s*(.+?)\s*\)$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeTriple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl KnowledgeTriple {
    pub fn new(subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
        }
    }
}

impl fmt::Display for KnowledgeTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// Splits raw model output on [`KG_TRIPLE_DELIMITER`] and keeps every chunk
/// shaped like `(subject, predicate, object)`.
///
/// Subject and predicate may not contain commas; anything after the second
/// comma is the object. `NONE` and unrecognised chunks yield nothing.
pub fn parse_triples(raw: &str) -> Vec<KnowledgeTriple> {
    raw.split(KG_TRIPLE_DELIMITER)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty() && *chunk != "NONE")
        .filter_map(|chunk| {
            TRIPLE_RE.captures(chunk).map(|cap| KnowledgeTriple::new(&cap[1], &cap[2], &cap[3]))
        })
        .collect()
}
