use crate::osv_conversion::domain::{RelevanceClass, SbomDocument};
use std::collections::HashMap;

/// Relationship index used for relevance traversal.
///
/// Both maps are keyed by the element a traversal arrives at:
/// * `forward[A]` holds every B of `A <forward> B`
/// * `reverse[B]` holds every A of `A <reverse> B`
///
/// Non-relevant relationships are left out of both.
#[derive(Debug, Default)]
pub struct RelevanceGraph {
    forward: HashMap<String, Vec<String>>,
    reverse: HashMap<String, Vec<String>>,
}

impl RelevanceGraph {
    /// Indexes every relationship of the document by relevance class.
    pub fn build(document: &SbomDocument) -> Self {
        let mut graph = Self::default();

        for relationship in document.relationships() {
            let Some(related) = relationship.related.as_ref() else {
                continue;
            };
            match relationship.relationship_type.relevance_class() {
                RelevanceClass::Forward => graph
                    .forward
                    .entry(relationship.element_id.clone())
                    .or_default()
                    .push(related.clone()),
                RelevanceClass::Reverse => graph
                    .reverse
                    .entry(related.clone())
                    .or_default()
                    .push(relationship.element_id.clone()),
                RelevanceClass::NonRelevant => {}
            }
        }

        graph
    }

    /// Elements `id` points at through forward-relevant relationships.
    pub fn forward_targets(&self, id: &str) -> &[String] {
        self.forward.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Elements pointing at `id` through reverse-relevant relationships.
    pub fn reverse_sources(&self, id: &str) -> &[String] {
        self.reverse.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every element reachable in one step from `id`.
    pub fn neighbours<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a String> + 'a {
        self.forward_targets(id)
            .iter()
            .chain(self.reverse_sources(id).iter())
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(Vec::len).sum::<usize>()
            + self.reverse.values().map(Vec::len).sum::<usize>()
    }
}
