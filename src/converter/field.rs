//! Editable amount fields and their change notifications.
use std::fmt;

/// Identifies one of the two amount fields on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The source amount field.
    From,
    /// The target amount field.
    To,
}

impl Side {
    /// Gets the field on the other side of the screen.
    pub fn opposite(self) -> Side {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("from"),
            Side::To => f.write_str("to"),
        }
    }
}

/// Who caused a field to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// The user typed into the field.
    User,
    /// The synchronizer rewrote the field from the other one.
    Sync,
}

/// Notification fired after a field's text was replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub side: Side,
    pub text: String,
    pub origin: ChangeOrigin,
}

/// Callback invoked synchronously for every field change.
pub type ChangeListener = Box<dyn FnMut(&FieldChange) + Send>;

/// A text field holding the textual form of an amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountField {
    text: String,
    /// Caret position, counted in characters.
    caret: usize,
}

impl AmountField {
    /// Gets the displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Gets the caret position in characters.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Replaces the text and moves the caret to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.text.chars().count();
    }
}
