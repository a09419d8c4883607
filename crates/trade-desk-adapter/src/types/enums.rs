/*
[INPUT]:  Exchange order vocabulary (kinds, sides, stops, time-in-force)
[OUTPUT]: Closed value sets with string forms and parsing
[POS]:    Data layer - enums shared by requests and responses
[UPDATE]: When the exchange adds order kinds or execution options
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::requests::OrderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
        }
    }
}

impl FromStr for OrderType {
    type Err = OrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "limit" => Ok(OrderType::Limit),
            "market" => Ok(OrderType::Market),
            other => Err(OrderError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl FromStr for Side {
    type Err = OrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(OrderError::UnknownSide(other.to_string())),
        }
    }
}

/// Stop trigger attached to an order.
///
/// `None` is never sent; an empty `stop` field on the wire reads back as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    #[default]
    #[serde(alias = "")]
    None,
    Loss,
    Entry,
}

impl StopKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StopKind::None => "none",
            StopKind::Loss => "loss",
            StopKind::Entry => "entry",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, StopKind::None)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till canceled
    #[default]
    Gtc,
    /// Good till time, paired with a cancel-after window
    Gtt,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

impl TimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Gtt => "GTT",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }

    /// True for the variants that never rest on the book.
    pub fn is_immediate(self) -> bool {
        matches!(self, TimeInForce::Ioc | TimeInForce::Fok)
    }
}

impl FromStr for TimeInForce {
    type Err = OrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "GTC" => Ok(TimeInForce::Gtc),
            "GTT" => Ok(TimeInForce::Gtt),
            "IOC" => Ok(TimeInForce::Ioc),
            "FOK" => Ok(TimeInForce::Fok),
            other => Err(OrderError::UnknownTimeInForce(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelAfter {
    Min,
    Hour,
    Day,
}

impl CancelAfter {
    pub fn as_str(self) -> &'static str {
        match self {
            CancelAfter::Min => "min",
            CancelAfter::Hour => "hour",
            CancelAfter::Day => "day",
        }
    }
}

impl FromStr for CancelAfter {
    type Err = OrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "min" => Ok(CancelAfter::Min),
            "hour" => Ok(CancelAfter::Hour),
            "day" => Ok(CancelAfter::Day),
            other => Err(OrderError::UnknownCancelAfter(other.to_string())),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_as_str!(OrderType, Side, StopKind, TimeInForce, CancelAfter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_unknown_values_with_offending_text() {
        assert_eq!(
            "stop".parse::<OrderType>().unwrap_err(),
            OrderError::UnknownType("stop".to_string())
        );
        assert_eq!(
            "BUY".parse::<Side>().unwrap_err(),
            OrderError::UnknownSide("BUY".to_string())
        );
        assert_eq!(
            "gtc".parse::<TimeInForce>().unwrap_err(),
            OrderError::UnknownTimeInForce("gtc".to_string())
        );
        assert_eq!(
            "week".parse::<CancelAfter>().unwrap_err(),
            OrderError::UnknownCancelAfter("week".to_string())
        );
    }

    #[test]
    fn test_display_matches_wire_form() {
        assert_eq!(OrderType::Market.to_string(), "market");
        assert_eq!(Side::Sell.to_string(), "sell");
        assert_eq!(TimeInForce::Fok.to_string(), "FOK");
        assert_eq!(CancelAfter::Hour.to_string(), "hour");
        assert_eq!(StopKind::Entry.to_string(), "entry");
    }

    #[test]
    fn test_stop_kind_reads_empty_string_as_none() {
        let stop: StopKind = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(stop, StopKind::None);

        let stop: StopKind = serde_json::from_str(r#""loss""#).unwrap();
        assert_eq!(stop, StopKind::Loss);
    }

    #[test]
    fn test_time_in_force_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TimeInForce::Gtt).unwrap(), r#""GTT""#);
        assert!(TimeInForce::Ioc.is_immediate());
        assert!(!TimeInForce::Gtc.is_immediate());
    }
}
