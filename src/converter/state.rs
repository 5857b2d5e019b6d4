//! The `State` module owns the screen and applies incoming events to it in arrival order.
use tokio::sync::mpsc;
use tracing::{debug, error, trace};

use crate::converter::{
    ConversionError, EventRecord, FieldChange, RateTable, Snapshot, SyncOutcome, Synchronizer,
    UiEvent,
};

/// Represents the state of the converter screen, including every state it went through.
pub struct State {
    /// The synchronized fields and selectors.
    synchronizer: Synchronizer,
    /// A channel receiver for incoming user events.
    receiver: mpsc::Receiver<EventRecord>,
    /// The screen state after initialization and after every handled event.
    snapshots: Vec<Snapshot>,
}

impl State {
    /// Opens the screen with the given rates.
    pub fn new(
        rates: RateTable,
        receiver: mpsc::Receiver<EventRecord>,
    ) -> Result<Self, ConversionError> {
        let mut synchronizer = Synchronizer::initialize(rates)?;
        synchronizer.subscribe(Box::new(|change: &FieldChange| {
            trace!(
                side = %change.side,
                origin = ?change.origin,
                text = %change.text,
                "field changed"
            )
        }));
        let snapshots = vec![synchronizer.snapshot()];
        Ok(State {
            synchronizer,
            receiver,
            snapshots,
        })
    }

    /// Gets every recorded screen state, oldest first.
    pub fn get_snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Gets the current screen state.
    pub fn get_current(&self) -> Snapshot {
        self.synchronizer.snapshot()
    }

    /// Applies one event to the screen and records the resulting state.
    fn process_event(&mut self, record: EventRecord) -> Result<SyncOutcome, ConversionError> {
        let event = UiEvent::try_from(record)?;
        let outcome = self.synchronizer.handle(event)?;
        self.snapshots.push(self.synchronizer.snapshot());
        Ok(outcome)
    }

    /// Runs the event loop, handling events from the receiver until it closes.
    pub async fn run(&mut self) {
        while let Some(record) = self.receiver.recv().await {
            let kind = record.get_kind();
            let value = record.get_value().to_string();
            match self.process_event(record) {
                Ok(outcome) => debug!(?kind, ?outcome, "event handled"),
                Err(e) => error!(?kind, %value, "Error processing event: {e}"),
            }
        }
    }
}
