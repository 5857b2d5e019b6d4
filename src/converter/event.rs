//! User interface events, as recorded in an event script.
use serde::Deserialize;

use crate::converter::{ConversionError, Currency};

/// Enum representing the kind of a recorded event.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    EditFrom,
    EditTo,
    SelectFrom,
    SelectTo,
}

/// One row of an event script.
#[derive(Deserialize, Debug, Clone)]
pub struct EventRecord {
    /// What the user did.
    #[serde(rename = "event")]
    kind: EventKind,

    /// The new field text, or the code of the selected currency.
    #[serde(default)]
    value: String,
}

impl EventRecord {
    /// Gets the kind of the event.
    pub fn get_kind(&self) -> EventKind {
        self.kind
    }

    /// Gets the raw value of the event.
    pub fn get_value(&self) -> &str {
        &self.value
    }

    #[cfg(test)]
    pub fn new(kind: EventKind, value: impl Into<String>) -> Self {
        EventRecord {
            kind,
            value: value.into(),
        }
    }
}

/// A single user action on the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The user replaced the text of the source field.
    EditFrom(String),
    /// The user replaced the text of the target field.
    EditTo(String),
    /// The user picked a source currency.
    SelectFrom(Currency),
    /// The user picked a target currency.
    SelectTo(Currency),
}

impl TryFrom<EventRecord> for UiEvent {
    type Error = ConversionError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        Ok(match record.kind {
            EventKind::EditFrom => UiEvent::EditFrom(record.value),
            EventKind::EditTo => UiEvent::EditTo(record.value),
            EventKind::SelectFrom => UiEvent::SelectFrom(record.value.parse()?),
            EventKind::SelectTo => UiEvent::SelectTo(record.value.parse()?),
        })
    }
}
