//! Types used throughout the converter.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de};

use crate::converter::ConversionError;

/// Amount type, representing a real-valued quantity of some currency.
pub type Amount = f64;

/// The reference currency every rate is expressed against.
pub const BASE_CURRENCY: Currency = Currency::Usd;

/// The fixed set of supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Vietnamese Dong
    Vnd,
    /// Japanese Yen
    Jpy,
    /// Chinese Yuan
    Cny,
    /// South Korean Won
    Krw,
}

impl Currency {
    /// Every supported currency, in selector order.
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Vnd,
        Currency::Jpy,
        Currency::Cny,
        Currency::Krw,
    ];

    /// Gets the three letter code of the currency.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Vnd => "VND",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Krw => "KRW",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{
        Deserialize,
        de::{IntoDeserializer, value::StrDeserializer},
    };

    use super::Currency;
    use crate::converter::ConversionError;

    fn deserialize(code: &str) -> Result<Currency, serde::de::value::Error> {
        let deserializer: StrDeserializer<'_, serde::de::value::Error> = code.into_deserializer();
        Currency::deserialize(deserializer)
    }

    #[test]
    fn test_deserialize_code() {
        assert_eq!(deserialize("VND").unwrap(), Currency::Vnd);
        assert_eq!(deserialize("eur").unwrap(), Currency::Eur);
        let err = deserialize("GBP").unwrap_err();
        assert!(err.to_string().contains("Unknown currency: GBP"));
    }

    #[test]
    fn test_serialize_code() {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.serialize((Currency::Krw, Currency::Cny)).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(output, "KRW,CNY\n");
    }

    #[test]
    fn test_parse_code() {
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" krw ".parse::<Currency>().unwrap(), Currency::Krw);
        assert_eq!("jpy".parse::<Currency>().unwrap(), Currency::Jpy);
    }

    #[test]
    fn test_parse_unknown_code() {
        assert!(matches!(
            "GBP".parse::<Currency>(),
            Err(ConversionError::UnknownCurrency(code)) if code == "GBP"
        ));
    }

    #[test]
    fn test_selector_order() {
        let codes: Vec<_> = Currency::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, ["USD", "EUR", "VND", "JPY", "CNY", "KRW"]);
    }
}
