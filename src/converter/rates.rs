//! Static exchange rates and conversion between supported currencies.
use std::collections::HashMap;

use thiserror::Error;

use crate::converter::{Amount, BASE_CURRENCY, Currency};

/// Units of each currency equal to one unit of the base currency.
const BUILTIN_RATES: [(Currency, Amount); 6] = [
    (Currency::Usd, 1.0),
    (Currency::Eur, 0.92),
    (Currency::Vnd, 25350.0),
    (Currency::Jpy, 150.0),
    (Currency::Cny, 7.18),
    (Currency::Krw, 1345.0),
];

/// Maps every supported currency to its rate against the base currency.
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: HashMap<Currency, Amount>,
}

impl RateTable {
    /// Creates the table from the embedded rates.
    pub fn builtin() -> Result<Self, RateTableError> {
        RateTable::new(BUILTIN_RATES)
    }

    /// Creates a table from the given entries.
    /// Every currency must appear exactly once with a finite, strictly positive rate.
    pub fn new(
        entries: impl IntoIterator<Item = (Currency, Amount)>,
    ) -> Result<Self, RateTableError> {
        let mut rates = HashMap::new();
        for (currency, rate) in entries {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(RateTableError::InvalidRate { currency, rate });
            }
            if rates.insert(currency, rate).is_some() {
                return Err(RateTableError::DuplicateRate(currency));
            }
        }
        if let Some(missing) = Currency::ALL.into_iter().find(|c| !rates.contains_key(c)) {
            return Err(RateTableError::MissingRate(missing));
        }
        if rates[&BASE_CURRENCY] != 1.0 {
            tracing::warn!(
                base = %BASE_CURRENCY,
                rate = rates[&BASE_CURRENCY],
                "base currency rate is not 1"
            );
        }
        Ok(RateTable { rates })
    }

    /// Gets the rate of a currency against the base currency.
    pub fn rate(&self, currency: Currency) -> Result<Amount, ConversionError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| ConversionError::UnknownCurrency(currency.to_string()))
    }

    /// Converts `amount` of `from` into `to`, routing through the base currency.
    /// Converting a currency into itself returns `amount` untouched.
    /// A zero source rate yields zero instead of dividing by it.
    pub fn convert(
        &self,
        amount: Amount,
        from: Currency,
        to: Currency,
    ) -> Result<Amount, ConversionError> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        if from == to {
            return Ok(amount);
        }
        if from_rate == 0.0 {
            return Ok(0.0);
        }
        Ok(amount / from_rate * to_rate)
    }

    #[cfg(test)]
    pub fn from_raw(entries: impl IntoIterator<Item = (Currency, Amount)>) -> Self {
        RateTable {
            rates: entries.into_iter().collect(),
        }
    }
}

/// Errors that can occur during a conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Errors that can occur while building a rate table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateTableError {
    #[error("Missing rate for {0}")]
    MissingRate(Currency),
    #[error("Duplicate rate for {0}")]
    DuplicateRate(Currency),
    #[error("Invalid rate {rate} for {currency}, rates must be positive")]
    InvalidRate { currency: Currency, rate: Amount },
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{BUILTIN_RATES, ConversionError, RateTable, RateTableError};
    use crate::converter::Currency;

    fn currency_strategy() -> impl Strategy<Value = Currency> {
        prop::sample::select(Currency::ALL.to_vec())
    }

    #[test]
    fn test_usd_to_eur() {
        let rates = RateTable::builtin().unwrap();
        let eur = rates.convert(1.0, Currency::Usd, Currency::Eur).unwrap();
        assert!((eur - 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_cross_rate_through_base() {
        let rates = RateTable::builtin().unwrap();
        let krw = rates.convert(150.0, Currency::Jpy, Currency::Krw).unwrap();
        assert!((krw - 1345.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_source_rate() {
        let rates = RateTable::from_raw([(Currency::Usd, 0.0), (Currency::Eur, 0.92)]);
        assert_eq!(
            rates.convert(10.0, Currency::Usd, Currency::Eur).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_unknown_currency() {
        let rates = RateTable::from_raw([(Currency::Usd, 1.0)]);
        assert_eq!(
            rates.convert(1.0, Currency::Usd, Currency::Vnd),
            Err(ConversionError::UnknownCurrency("VND".to_string()))
        );
        assert_eq!(
            rates.convert(1.0, Currency::Cny, Currency::Usd),
            Err(ConversionError::UnknownCurrency("CNY".to_string()))
        );
    }

    #[test]
    fn test_builtin_rates_are_valid() {
        let rates = RateTable::builtin().unwrap();
        for currency in Currency::ALL {
            assert!(rates.rate(currency).unwrap() > 0.0);
        }
        assert_eq!(rates.rate(Currency::Vnd).unwrap(), 25350.0);
    }

    #[test]
    fn test_new_missing_rate() {
        assert_eq!(
            RateTable::new(BUILTIN_RATES.into_iter().take(5)).unwrap_err(),
            RateTableError::MissingRate(Currency::Krw)
        );
    }

    #[test]
    fn test_new_duplicate_rate() {
        let entries = BUILTIN_RATES.into_iter().chain([(Currency::Eur, 0.9)]);
        assert_eq!(
            RateTable::new(entries).unwrap_err(),
            RateTableError::DuplicateRate(Currency::Eur)
        );
    }

    #[test]
    fn test_new_rejects_non_positive_rate() {
        let mut entries = BUILTIN_RATES;
        entries[2].1 = 0.0;
        assert!(matches!(
            RateTable::new(entries),
            Err(RateTableError::InvalidRate {
                currency: Currency::Vnd,
                ..
            })
        ));
        entries[2].1 = f64::NAN;
        assert!(RateTable::new(entries).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_round_trip(
            amount in 0.0f64..1e12,
            from in currency_strategy(),
            to in currency_strategy(),
        ) {
            let rates = RateTable::builtin().unwrap();
            let there = rates.convert(amount, from, to).unwrap();
            let back = rates.convert(there, to, from).unwrap();
            prop_assert!((back - amount).abs() <= amount * 1e-12 + 1e-12);
        }

        #[test]
        fn prop_identity(amount in 0.0f64..1e12, currency in currency_strategy()) {
            let rates = RateTable::builtin().unwrap();
            prop_assert_eq!(rates.convert(amount, currency, currency).unwrap(), amount);
        }
    }
}
