/// Network adapters for external API calls
mod caching_swh_client;
mod osv_client;
mod swh_client;

pub use caching_swh_client::CachingSwhReleaseLookup;
pub use osv_client::OsvClient;
pub use swh_client::SwhClient;
