//! Keeps the two amount fields consistent with each other and with the selected currencies.
use serde::Serialize;
use tracing::{debug, trace};

use crate::converter::{
    AmountField, ChangeListener, ChangeOrigin, ConversionError, Currency, FieldChange, RateTable,
    Side, UiEvent, format_amount, parse_amount,
};

/// Text seeded into the source field when the screen opens.
pub const INITIAL_AMOUNT: &str = "1";

/// What handling a single event did to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The given field was rewritten from the other one.
    Wrote(Side),
    /// The derived value already matched the displayed text, nothing was written.
    Unchanged,
    /// The change came from a programmatic write in flight and was ignored.
    Suppressed,
}

/// The visible state of the screen at one instant.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub from_currency: Currency,
    pub from_amount: String,
    pub to_currency: Currency,
    pub to_amount: String,
}

/// Binds two amount fields and two currency selectors together.
///
/// Every write to a field fires its change notification synchronously, including
/// the writes the synchronizer makes itself. Those are absorbed by a per-field
/// suppression flag, so a user edit propagates exactly one step and never bounces
/// back to the field it came from.
pub struct Synchronizer {
    /// The rates used for every conversion.
    rates: RateTable,

    from_field: AmountField,
    to_field: AmountField,
    from_currency: Currency,
    to_currency: Currency,

    /// Set while a programmatic write to the source field is in flight.
    updating_from: bool,
    /// Set while a programmatic write to the target field is in flight.
    updating_to: bool,

    /// Observers notified of every field change.
    listeners: Vec<ChangeListener>,
}

impl Synchronizer {
    /// Opens the screen: seeds the source field with `1`, selects the first two
    /// currencies and derives the target field.
    pub fn initialize(rates: RateTable) -> Result<Self, ConversionError> {
        let mut from_field = AmountField::default();
        from_field.set_text(INITIAL_AMOUNT);
        let mut synchronizer = Synchronizer {
            rates,
            from_field,
            to_field: AmountField::default(),
            from_currency: Currency::ALL[0],
            to_currency: Currency::ALL[1],
            updating_from: false,
            updating_to: false,
            listeners: Vec::new(),
        };
        synchronizer.sync_into(Side::To)?;
        Ok(synchronizer)
    }

    /// Registers an observer for every subsequent field change.
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    /// Gets the field on the given side.
    pub fn field(&self, side: Side) -> &AmountField {
        match side {
            Side::From => &self.from_field,
            Side::To => &self.to_field,
        }
    }

    /// Gets the currency selected on the given side.
    pub fn currency(&self, side: Side) -> Currency {
        match side {
            Side::From => self.from_currency,
            Side::To => self.to_currency,
        }
    }

    /// Captures the visible state of the screen.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            from_currency: self.from_currency,
            from_amount: self.from_field.text().to_string(),
            to_currency: self.to_currency,
            to_amount: self.to_field.text().to_string(),
        }
    }

    /// Handles one user event to completion, including any synchronization write.
    pub fn handle(&mut self, event: UiEvent) -> Result<SyncOutcome, ConversionError> {
        match event {
            UiEvent::EditFrom(text) => self.write(Side::From, text, ChangeOrigin::User),
            UiEvent::EditTo(text) => self.write(Side::To, text, ChangeOrigin::User),
            UiEvent::SelectFrom(currency) => self.select(Side::From, currency),
            UiEvent::SelectTo(currency) => self.select(Side::To, currency),
        }
    }

    /// Selects a currency. Either selector recomputes the target field from the
    /// source field; re-selecting the current currency is not a change.
    fn select(&mut self, side: Side, currency: Currency) -> Result<SyncOutcome, ConversionError> {
        self.rates.rate(currency)?;
        let selected = match side {
            Side::From => &mut self.from_currency,
            Side::To => &mut self.to_currency,
        };
        if *selected == currency {
            return Ok(SyncOutcome::Unchanged);
        }
        *selected = currency;
        debug!(%side, %currency, "currency selected");
        self.sync_into(Side::To)
    }

    fn is_suppressed(&self, side: Side) -> bool {
        match side {
            Side::From => self.updating_from,
            Side::To => self.updating_to,
        }
    }

    fn set_suppressed(&mut self, side: Side, suppressed: bool) {
        match side {
            Side::From => self.updating_from = suppressed,
            Side::To => self.updating_to = suppressed,
        }
        debug_assert!(
            !(self.updating_from && self.updating_to),
            "both suppression flags set"
        );
    }

    /// Replaces a field's text and fires its change notification.
    fn write(
        &mut self,
        side: Side,
        text: String,
        origin: ChangeOrigin,
    ) -> Result<SyncOutcome, ConversionError> {
        let field = match side {
            Side::From => &mut self.from_field,
            Side::To => &mut self.to_field,
        };
        field.set_text(text);
        let change = FieldChange {
            side,
            text: field.text().to_string(),
            origin,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
        self.on_text_changed(side)
    }

    /// The synchronizer's own change handler for both fields.
    fn on_text_changed(&mut self, side: Side) -> Result<SyncOutcome, ConversionError> {
        if self.is_suppressed(side) {
            trace!(%side, "ignoring programmatic change");
            return Ok(SyncOutcome::Suppressed);
        }
        self.sync_into(side.opposite())
    }

    /// Recomputes `target` from the field on the other side, writing it only if the
    /// formatted value differs from what is displayed.
    fn sync_into(&mut self, target: Side) -> Result<SyncOutcome, ConversionError> {
        let source = target.opposite();
        let amount = parse_amount(self.field(source).text());
        let converted = self
            .rates
            .convert(amount, self.currency(source), self.currency(target))?;
        let formatted = format_amount(converted);
        if self.field(target).text() == formatted {
            return Ok(SyncOutcome::Unchanged);
        }

        self.set_suppressed(target, true);
        let echo = self.write(target, formatted, ChangeOrigin::Sync);
        self.set_suppressed(target, false);
        debug_assert!(matches!(echo, Ok(SyncOutcome::Suppressed)));
        echo?;

        let field = self.field(target);
        debug!(%target, text = field.text(), caret = field.caret(), "synchronized field");
        Ok(SyncOutcome::Wrote(target))
    }
}
