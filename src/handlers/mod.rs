pub mod collector;
pub mod metrics_handler;
pub mod middleware;
pub mod receiver;
pub mod sender;

use crate::config::Config;
use crate::emitter::LogEmitter;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Shared state for the chained processing services.
#[derive(Clone)]
pub struct ChainState {
    pub config: Arc<ArcSwap<Config>>,
    pub http_client: reqwest::Client,
    pub emitter: LogEmitter,
}
