use domain::LifecycleState;
use futures_util::{future, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use uuid::Uuid;

/// Change notifications for views that depend on wallet, membership or
/// lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TournamentEvent {
    WalletChanged {
        user_id: Uuid,
        balance: i64,
    },
    ParticipantCountChanged {
        tournament_id: Uuid,
        current_players: i64,
    },
    LifecycleChanged {
        tournament_id: Uuid,
        state: LifecycleState,
        previous: Option<LifecycleState>,
    },
}

impl TournamentEvent {
    pub fn tournament_id(&self) -> Option<Uuid> {
        match self {
            TournamentEvent::WalletChanged { .. } => None,
            TournamentEvent::ParticipantCountChanged { tournament_id, .. }
            | TournamentEvent::LifecycleChanged { tournament_id, .. } => Some(*tournament_id),
        }
    }
}

/// Broadcast fan-out owned by the application state.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<TournamentEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            sender: broadcast::channel(capacity).0,
        }
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: TournamentEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TournamentEvent> {
        self.sender.subscribe()
    }

    /// Every event, skipping over anything this subscriber lagged behind on.
    pub fn stream(&self) -> impl Stream<Item = TournamentEvent> + Send + Unpin + 'static {
        BroadcastStream::new(self.sender.subscribe()).filter_map(|item| future::ready(received(item)))
    }

    pub fn tournament_stream(
        &self,
        tournament_id: Uuid,
    ) -> impl Stream<Item = TournamentEvent> + Send + Unpin + 'static {
        self.stream()
            .filter(move |event| future::ready(event.tournament_id() == Some(tournament_id)))
    }
}

fn received(item: Result<TournamentEvent, BroadcastStreamRecvError>) -> Option<TournamentEvent> {
    match item {
        Ok(event) => Some(event),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Event subscriber lagged behind");
            None
        }
    }
}
