use std::{sync::Arc, time::Duration};

use moka::future::Cache;
use tracing::debug;

use super::session::BoardSession;
use crate::store::{TenantScope, remote::Remote};

/// One live board per signed-in supervisor. Idle boards are evicted and
/// come back empty, to be reloaded by the next view.
pub struct BoardRegistry {
    boards: Cache<u64, Arc<BoardSession>>,
    remote: Remote,
}

impl BoardRegistry {
    pub fn new(remote: Remote, capacity: u64, idle: Duration) -> Self {
        Self {
            boards: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(idle)
                .build(),
            remote,
        }
    }

    pub async fn board_for(&self, supervisor_id: u64, tenant: TenantScope) -> Arc<BoardSession> {
        let remote = self.remote.clone();
        self.boards
            .get_with(supervisor_id, async move {
                debug!(supervisor_id, "Opening board");
                Arc::new(BoardSession::new(remote, tenant))
            })
            .await
    }

    /// Drops the supervisor's board; the next request opens a fresh one.
    pub async fn forget(&self, supervisor_id: u64) {
        self.boards.invalidate(&supervisor_id).await;
    }
}
