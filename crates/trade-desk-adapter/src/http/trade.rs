/*
[INPUT]:  Order requests (limit or market)
[OUTPUT]: Accepted orders as reported by the exchange
[POS]:    HTTP layer - trading endpoints (require signed body)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::{Result, TradeDeskClient, TradeDeskError};
use crate::types::{Order, OrderRequest};
use reqwest::Method;

const ORDERS_ENDPOINT: &str = "/orders";

impl TradeDeskClient {
    /// Place a new order
    ///
    /// POST /orders
    /// The request is normalized first; a request that fails validation is
    /// returned as `InvalidOrder` without touching the network.
    pub async fn place_order(&self, order: impl Into<OrderRequest>) -> Result<Order> {
        let mut order = order.into();
        order.validate()?;

        let body = serde_json::to_vec(&order).map_err(TradeDeskError::Encode)?;
        self.send_signed(Method::POST, ORDERS_ENDPOINT, Some(body)).await
    }
}
