pub mod relevance_collector;
pub mod relevance_graph;
pub mod request_collector;

pub use relevance_collector::{RelevanceCollector, RelevanceMode};
pub use relevance_graph::RelevanceGraph;
pub use request_collector::RequestCollector;
