//! Shared helpers for integration tests.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Records the level of every event it sees.
#[derive(Clone, Default)]
pub struct CapturedEvents {
    levels: Arc<Mutex<Vec<Level>>>,
}

impl CapturedEvents {
    pub fn count(&self, level: Level) -> usize {
        self.levels.lock().iter().filter(|l| **l == level).count()
    }

    pub fn total(&self) -> usize {
        self.levels.lock().len()
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.levels.lock().push(*event.metadata().level());
    }
}

/// Runs `f` with a thread-local subscriber and returns what it logged.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, CapturedEvents) {
    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, events)
}
