//! Board event broadcaster. Presentation layers subscribe instead of polling
//! controller state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Something the presentation layer should re-render for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// The filtered result set changed.
    ResultsChanged { total: usize },
    PageChanged { page: usize, total_pages: usize },
    SessionChanged { signed_in: bool, is_admin: bool },
    SavedJobsChanged { count: usize },
    /// A bookmark was attempted while signed out.
    LoginRequired,
    CompaniesChanged { active: usize },
}

/// Broadcasts [`BoardEvent`]s to any number of subscribers.
#[derive(Clone)]
pub struct BoardEventBroadcaster {
    sender: Arc<broadcast::Sender<BoardEvent>>,
}

impl BoardEventBroadcaster {
    /// Creates a new broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Sends an event to all subscribers.
    pub fn send(&self, event: BoardEvent) {
        // No active receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BoardEventBroadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}

impl std::fmt::Debug for BoardEventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardEventBroadcaster")
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}
