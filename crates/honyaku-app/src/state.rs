use std::sync::Arc;

use honyaku_config::Config;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Token of the running auto-recognize loop, if any. Starting a new
    /// loop replaces and cancels it, so a stale loop can never keep firing
    /// alongside a fresh one.
    pub auto_loop: Mutex<Option<CancellationToken>>,
    /// Token of the recognition currently in flight, if any. A new trigger
    /// cancels it so a stale result never reaches the display.
    pub inflight: Mutex<Option<CancellationToken>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            auto_loop: Mutex::new(None),
            inflight: Mutex::new(None),
        }
    }
}
