/*
[INPUT]:  Product identifiers
[OUTPUT]: Market data (ticker snapshots)
[POS]:    HTTP layer - market data endpoints
[UPDATE]: When adding new market data endpoints or changing response format
*/

use crate::http::{Result, TradeDeskClient};
use crate::types::Ticker;
use reqwest::Method;

impl TradeDeskClient {
    /// Latest trade and best bid/ask for a product
    ///
    /// GET /products/{product_id}/ticker
    pub async fn ticker(&self, product_id: &str) -> Result<Ticker> {
        let endpoint = format!("/products/{}/ticker", product_id);
        self.send_signed(Method::GET, &endpoint, None).await
    }
}
