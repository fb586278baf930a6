use std::sync::Arc;

use serenity::async_trait;
use songbird::{Event, EventContext, EventHandler};
use tokio::sync::Notify;
use tracing::{debug, warn};

/// Wakes the dispatch loop when a track ends or errors, so advancement does
/// not wait for the fallback timer.
pub struct TrackEndNotifier {
    pub finished: Arc<Notify>,
}

#[async_trait]
impl EventHandler for TrackEndNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(tracks) = ctx {
            for (state, handle) in tracks.iter() {
                match &state.playing {
                    songbird::tracks::PlayMode::Errored(err) => {
                        warn!("Track {} failed: {:?}", handle.uuid(), err)
                    }
                    mode => debug!("Track {} ended ({:?})", handle.uuid(), mode),
                }
            }
            self.finished.notify_one();
        }
        None
    }
}
