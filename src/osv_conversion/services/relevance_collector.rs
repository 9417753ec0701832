use super::relevance_graph::RelevanceGraph;
use crate::osv_conversion::domain::{ElementKind, SbomDocument, SbomPackage};
use crate::shared::error::SpdxToOsvError;
use crate::shared::Result;
use std::collections::HashSet;

/// Which packages of a document take part in the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelevanceMode {
    /// Packages reachable from the document roots over relevant relationships.
    #[default]
    Reachable,
    /// Every package of the document.
    AllPackages,
}

/// RelevanceCollector service deciding which packages are security-relevant.
///
/// Pure logic over the document model; no I/O.
pub struct RelevanceCollector;

impl RelevanceCollector {
    /// Returns the relevant packages in document order.
    ///
    /// # Errors
    /// In `Reachable` mode, a document without roots or with a root that is
    /// neither a package nor a file cannot be traversed.
    pub fn collect(document: &SbomDocument, mode: RelevanceMode) -> Result<Vec<&SbomPackage>> {
        match mode {
            RelevanceMode::AllPackages => Ok(document.packages().iter().collect()),
            RelevanceMode::Reachable => {
                let graph = RelevanceGraph::build(document);
                let relevant = Self::reachable_packages(document, &graph)?;
                Ok(document
                    .packages()
                    .iter()
                    .filter(|p| relevant.contains(p.id.as_str()))
                    .collect())
            }
        }
    }

    /// Walks the graph from every root and gathers the package ids met.
    ///
    /// Files are walked through but not collected. Each element is visited
    /// once, so cycles terminate.
    pub fn reachable_packages<'d>(
        document: &'d SbomDocument,
        graph: &'d RelevanceGraph,
    ) -> Result<HashSet<&'d str>> {
        if document.roots().is_empty() {
            return Err(SpdxToOsvError::MissingDocumentRoot {
                details: format!(
                    "Document '{}' declares no described element",
                    document.document_id()
                ),
            }
            .into());
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut relevant: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&str> = Vec::new();

        for root in document.roots() {
            if document.element_kind(root).is_none() {
                return Err(SpdxToOsvError::UnknownRootElement { id: root.clone() }.into());
            }
            pending.push(root.as_str());
        }

        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            if document.element_kind(id) == Some(ElementKind::Package) {
                relevant.insert(id);
            }
            pending.extend(
                graph
                    .neighbours(id)
                    .map(String::as_str)
                    .filter(|next| !visited.contains(next)),
            );
        }

        tracing::debug!(
            visited = visited.len(),
            relevant = relevant.len(),
            "relevance traversal finished"
        );
        Ok(relevant)
    }
}
