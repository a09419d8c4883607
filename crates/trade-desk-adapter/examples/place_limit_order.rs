/*
[INPUT]:  Credentials from the environment and order parameters
[OUTPUT]: Ticker snapshot and order placement result
[POS]:    Examples - signed trading operations
[UPDATE]: When trading API changes
*/

use std::time::Duration;

use trade_desk_adapter::*;

/// Example: fetch a ticker, then post a limit order just under the bid.
///
/// Reads TRADE_DESK_URL, TRADE_DESK_KEY, TRADE_DESK_SECRET and
/// TRADE_DESK_PASSPHRASE from the environment.
#[tokio::main]
async fn main() -> Result<()> {
    let var = |name: &str| std::env::var(name).unwrap_or_default();
    let config = ClientConfig::new(
        var("TRADE_DESK_URL"),
        var("TRADE_DESK_KEY"),
        var("TRADE_DESK_SECRET"),
        var("TRADE_DESK_PASSPHRASE"),
    )
    .with_timeout(Duration::from_secs(2));

    let client = TradeDeskClient::new(config)?;

    let ticker = client.ticker("BTC-USD").await?;
    println!("BTC-USD bid {} ask {}", ticker.bid, ticker.ask);

    let order = LimitOrderRequest::new(Side::Buy, "BTC-USD", ticker.bid.clone(), "0.001")
        .with_time_in_force(TimeInForce::Gtt)
        .with_cancel_after(CancelAfter::Hour)
        .with_post_only(true);

    match client.place_order(order).await {
        Ok(placed) => println!("placed {} ({})", placed.id, placed.status),
        Err(TradeDeskError::Api(err)) => println!("rejected: {err}"),
        Err(err) => return Err(err),
    }
    Ok(())
}
