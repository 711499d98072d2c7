//! TerritoryGraph: known vs. unknown concepts for one session topic.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use feynman_core::errors::ValidationError;
use feynman_core::models::{Persona, PromptRequest, TerritorySnapshot};

use crate::prompt;

/// Two disjoint keyword sets. `known ∩ unknown = ∅` after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "TerritoryRecord")]
pub struct TerritoryGraph {
    known: BTreeSet<String>,
    unknown: BTreeSet<String>,
}

/// Serialized form, checked before it becomes a graph.
#[derive(Deserialize)]
struct TerritoryRecord {
    #[serde(default)]
    known: BTreeSet<String>,
    #[serde(default)]
    unknown: BTreeSet<String>,
}

impl TryFrom<TerritoryRecord> for TerritoryGraph {
    type Error = ValidationError;

    fn try_from(record: TerritoryRecord) -> Result<Self, Self::Error> {
        if let Some(keyword) = record.known.intersection(&record.unknown).next() {
            return Err(ValidationError::InvalidState {
                reason: format!("keyword {keyword:?} is both known and unknown"),
            });
        }
        Ok(Self {
            known: record.known,
            unknown: record.unknown,
        })
    }
}

impl TerritoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph seeded with concepts still to explore.
    pub fn with_unknown<I, S>(unknown: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: BTreeSet::new(),
            unknown: unknown.into_iter().map(Into::into).collect(),
        }
    }

    pub fn known(&self) -> &BTreeSet<String> {
        &self.known
    }

    pub fn unknown(&self) -> &BTreeSet<String> {
        &self.unknown
    }

    /// Union `known` in, add `unknown` entries not already known, then
    /// promote: anything known leaves `unknown`. Input may list a keyword
    /// in both sets; known wins.
    pub fn merge<K, U>(&mut self, known: K, unknown: U)
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        U: IntoIterator,
        U::Item: AsRef<str>,
    {
        self.known
            .extend(known.into_iter().filter_map(|k| normalize(k.as_ref())));
        for keyword in unknown.into_iter().filter_map(|u| normalize(u.as_ref())) {
            if !self.known.contains(&keyword) {
                self.unknown.insert(keyword);
            }
        }
        let known = &self.known;
        self.unknown.retain(|u| !known.contains(u));
    }

    /// Every surfaced concept is known. An empty graph is unstarted, not
    /// conquered.
    pub fn is_conquered(&self) -> bool {
        self.unknown.is_empty() && !self.known.is_empty()
    }

    /// Follow-up request for an unknown keyword. Does not mutate the graph;
    /// the answer comes back through `merge`.
    pub fn explore(
        &self,
        topic: &str,
        persona: Persona,
        keyword: &str,
    ) -> Result<PromptRequest, ValidationError> {
        let keyword = keyword.trim();
        if !self.unknown.contains(keyword) {
            return Err(ValidationError::UnknownKeyword {
                keyword: keyword.to_string(),
            });
        }
        Ok(prompt::explore_request(topic, persona, keyword, &self.known))
    }

    pub fn clear(&mut self) {
        self.known.clear();
        self.unknown.clear();
    }

    pub fn snapshot(&self) -> TerritorySnapshot {
        TerritorySnapshot {
            known: self.known.iter().cloned().collect(),
            unknown: self.unknown.iter().cloned().collect(),
            conquered: self.is_conquered(),
        }
    }
}

fn normalize(keyword: &str) -> Option<String> {
    let trimmed = keyword.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
