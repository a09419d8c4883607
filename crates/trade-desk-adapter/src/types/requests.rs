/*
[INPUT]:  Caller-built order instructions
[OUTPUT]: Validated, normalized order bodies ready for submission
[POS]:    Data layer - order request types and normalization rules
[UPDATE]: When order fields or exchange acceptance rules change
*/

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;
use uuid::Uuid;

use super::enums::{CancelAfter, OrderType, Side, StopKind, TimeInForce};

/// Reasons an order request is rejected before it is sent.
///
/// Checks run in a fixed order and stop at the first failure, so a given
/// request always reports the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("order type '{0}' invalid or unknown")]
    UnknownType(String),

    #[error("order side '{0}' invalid or unknown")]
    UnknownSide(String),

    #[error("order requires ProductID")]
    MissingProductId,

    #[error("order stop {0} requires StopPrice")]
    MissingStopPrice(StopKind),

    #[error("LimitOrder requires Price")]
    MissingPrice,

    #[error("LimitOrder requires Size")]
    MissingSize,

    #[error("TimeInForce '{0}' invalid or unknown")]
    UnknownTimeInForce(String),

    #[error("PostOnly flag cannot be used with TimeInForce {0}")]
    PostOnlyWithImmediate(TimeInForce),

    #[error("CancelAfter '{0}' invalid or unknown")]
    UnknownCancelAfter(String),

    #[error("MarketOrder requires Size or Funds")]
    MissingSizeOrFunds,
}

/// Fields shared by every order kind.
///
/// `order_type` and `side` stay strings until validation so that a bad value
/// is reported verbatim instead of failing somewhere in deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
    #[serde(rename = "type")]
    pub order_type: String,
    pub side: String,
    pub product_id: String,
    /// Self-trade prevention mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stp: Option<String>,
    #[serde(default, skip_serializing_if = "StopKind::is_none")]
    pub stop: StopKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stop_price: String,
}

impl CommonOrderRequest {
    pub fn new(order_type: OrderType, side: Side, product_id: impl Into<String>) -> Self {
        Self {
            order_type: order_type.to_string(),
            side: side.to_string(),
            product_id: product_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_client_oid(mut self, client_oid: impl Into<String>) -> Self {
        self.client_oid = Some(client_oid.into());
        self
    }

    /// Attach a random v4 UUID as the idempotency token.
    #[must_use]
    pub fn with_generated_client_oid(self) -> Self {
        self.with_client_oid(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn with_stp(mut self, stp: impl Into<String>) -> Self {
        self.stp = Some(stp.into());
        self
    }

    #[must_use]
    pub fn with_stop(mut self, stop: StopKind, stop_price: impl Into<String>) -> Self {
        self.stop = stop;
        self.stop_price = stop_price.into();
        self
    }

    /// Check the shared fields.
    ///
    /// A request without a stop loses any `stop_price` it carried, even when
    /// the rest of validation succeeds.
    pub fn validate(&mut self) -> Result<(), OrderError> {
        self.order_type.parse::<OrderType>()?;
        self.side.parse::<Side>()?;

        if self.product_id.is_empty() {
            return Err(OrderError::MissingProductId);
        }

        if self.stop.is_none() {
            self.stop_price.clear();
        } else if self.stop_price.is_empty() {
            return Err(OrderError::MissingStopPrice(self.stop));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderRequest {
    #[serde(flatten)]
    pub common: CommonOrderRequest,
    pub price: String,
    pub size: String,
    #[serde(default)]
    pub time_in_force: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cancel_after: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub post_only: bool,
}

impl LimitOrderRequest {
    pub fn new(
        side: Side,
        product_id: impl Into<String>,
        price: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            common: CommonOrderRequest::new(OrderType::Limit, side, product_id),
            price: price.into(),
            size: size.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force.to_string();
        self
    }

    #[must_use]
    pub fn with_cancel_after(mut self, cancel_after: CancelAfter) -> Self {
        self.cancel_after = cancel_after.to_string();
        self
    }

    #[must_use]
    pub fn with_post_only(mut self, post_only: bool) -> Self {
        self.post_only = post_only;
        self
    }

    /// Force the type to `limit`, check the shared fields, then the limit rules.
    ///
    /// An empty time-in-force becomes `GTC`.
    pub fn validate(&mut self) -> Result<(), OrderError> {
        self.common.order_type = OrderType::Limit.to_string();
        self.common.validate()?;

        if self.price.is_empty() {
            return Err(OrderError::MissingPrice);
        }
        if self.size.is_empty() {
            return Err(OrderError::MissingSize);
        }

        if self.time_in_force.is_empty() {
            self.time_in_force = TimeInForce::Gtc.to_string();
        }
        let time_in_force: TimeInForce = self.time_in_force.parse()?;
        if time_in_force.is_immediate() && self.post_only {
            return Err(OrderError::PostOnlyWithImmediate(time_in_force));
        }

        if !self.cancel_after.is_empty() {
            self.cancel_after.parse::<CancelAfter>()?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderRequest {
    #[serde(flatten)]
    pub common: CommonOrderRequest,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub funds: String,
}

impl MarketOrderRequest {
    /// Market order sized in base currency.
    pub fn with_size(side: Side, product_id: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            common: CommonOrderRequest::new(OrderType::Market, side, product_id),
            size: size.into(),
            ..Default::default()
        }
    }

    /// Market order sized in quote currency.
    pub fn with_funds(side: Side, product_id: impl Into<String>, funds: impl Into<String>) -> Self {
        Self {
            common: CommonOrderRequest::new(OrderType::Market, side, product_id),
            funds: funds.into(),
            ..Default::default()
        }
    }

    pub fn validate(&mut self) -> Result<(), OrderError> {
        self.common.order_type = OrderType::Market.to_string();
        self.common.validate()?;

        if self.size.is_empty() && self.funds.is_empty() {
            return Err(OrderError::MissingSizeOrFunds);
        }

        Ok(())
    }
}

/// Any order the exchange accepts on `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OrderRequest {
    Limit(LimitOrderRequest),
    Market(MarketOrderRequest),
}

impl OrderRequest {
    /// Normalize in place, delegating to the concrete kind.
    pub fn validate(&mut self) -> Result<(), OrderError> {
        match self {
            OrderRequest::Limit(order) => order.validate()?,
            OrderRequest::Market(order) => order.validate()?,
        }

        let common = self.common();
        trace!(
            order_type = %common.order_type,
            side = %common.side,
            product_id = %common.product_id,
            "order request normalized"
        );
        Ok(())
    }

    pub fn common(&self) -> &CommonOrderRequest {
        match self {
            OrderRequest::Limit(order) => &order.common,
            OrderRequest::Market(order) => &order.common,
        }
    }

    pub fn kind(&self) -> OrderType {
        match self {
            OrderRequest::Limit(_) => OrderType::Limit,
            OrderRequest::Market(_) => OrderType::Market,
        }
    }
}

impl From<LimitOrderRequest> for OrderRequest {
    fn from(order: LimitOrderRequest) -> Self {
        OrderRequest::Limit(order)
    }
}

impl From<MarketOrderRequest> for OrderRequest {
    fn from(order: MarketOrderRequest) -> Self {
        OrderRequest::Market(order)
    }
}
