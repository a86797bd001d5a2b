//! Background expiry of idle dialogue sessions.

use crate::bot::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Every `every`, drop sessions idle for longer than `ttl`.
pub(super) async fn session_sweeper(
    sessions: Arc<dyn SessionStore>,
    ttl: chrono::Duration,
    every: Duration,
) {
    info!("session sweeper started (ttl {}m)", ttl.num_minutes());
    loop {
        tokio::time::sleep(every).await;
        let removed = sessions.sweep_expired(ttl);
        if removed > 0 {
            info!("expired {removed} idle session(s)");
        } else {
            debug!("session sweep: nothing to expire");
        }
    }
}
