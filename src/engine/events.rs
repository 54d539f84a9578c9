use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event emitted when a mutual match is created.
///
/// Fire-and-forget: the surrounding application listens for these to show
/// match UI or send notifications, and a delivery failure never rolls back
/// the committed MatchRecord.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCreated {
    #[serde(rename = "matchId")]
    pub match_id: String,
    #[serde(rename = "userAId")]
    pub user_a_id: String,
    #[serde(rename = "userBId")]
    pub user_b_id: String,
}

/// Broadcast fan-out for match events
#[derive(Debug, Clone)]
pub struct MatchNotifier {
    tx: broadcast::Sender<MatchCreated>,
}

impl MatchNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MatchCreated> {
        self.tx.subscribe()
    }

    /// Emit a match event. A send error only means nobody is listening.
    pub fn notify(&self, event: MatchCreated) {
        match self.tx.send(event) {
            Ok(subscribers) => {
                tracing::debug!("Match event delivered to {} subscribers", subscribers)
            }
            Err(_) => tracing::debug!("No subscribers for match event"),
        }
    }
}

impl Default for MatchNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}
