/*
[INPUT]:  JSON payloads returned by the exchange
[OUTPUT]: Typed ticker, order and error bodies
[POS]:    Data layer - response type definitions
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderType, Side};

/// Quantities stay as the exchange's strings; the `*_decimal` accessors
/// parse them without going through floating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub trade_id: i64,
    pub price: String,
    pub size: String,
    pub bid: String,
    pub ask: String,
    pub volume: String,
    pub time: DateTime<Utc>,
}

impl Ticker {
    pub fn price_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.price)
    }

    pub fn bid_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.bid)
    }

    pub fn ask_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.ask)
    }

    /// Ask minus bid, when both sides parse.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.ask_decimal()? - self.bid_decimal()?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub size: String,
    pub product_id: String,
    pub side: Side,
    #[serde(default)]
    pub stp: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub time_in_force: String,
    #[serde(default)]
    pub post_only: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub fill_fees: String,
    #[serde(default)]
    pub filled_size: String,
    #[serde(default)]
    pub executed_value: String,
    pub status: String,
    #[serde(default)]
    pub settled: bool,
}

impl Order {
    pub fn filled_size_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.filled_size)
    }

    pub fn executed_value_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.executed_value)
    }

    pub fn fill_fees_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.fill_fees)
    }
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    value.parse().ok()
}
