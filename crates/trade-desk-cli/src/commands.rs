/*
[INPUT]:  Parsed CLI subcommands and desk configuration
[OUTPUT]: JSON text for tickers, placed orders or dry-run order bodies
[POS]:    Command layer - maps CLI arguments onto adapter calls
[UPDATE]: When adding subcommands or order options
*/

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use tracing::info;
use trade_desk_adapter::{
    CommonOrderRequest, LimitOrderRequest, MarketOrderRequest, OrderRequest, StopKind,
    TradeDeskClient,
};

use crate::config::DeskConfig;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the latest ticker for a product
    Ticker {
        #[arg(value_name = "PRODUCT_ID")]
        product_id: String,
    },
    /// Place a limit order
    Limit(LimitArgs),
    /// Place a market order
    Market(MarketArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopArg {
    Loss,
    Entry,
}

impl From<StopArg> for StopKind {
    fn from(stop: StopArg) -> Self {
        match stop {
            StopArg::Loss => StopKind::Loss,
            StopArg::Entry => StopKind::Entry,
        }
    }
}

/// Options shared by every order kind.
///
/// Side, time-in-force and cancel-after stay raw strings so the adapter's
/// validation reports bad input verbatim.
#[derive(Args, Debug, Clone, Default)]
pub struct OrderArgs {
    /// buy or sell
    #[arg(long)]
    pub side: String,
    #[arg(long = "product", value_name = "PRODUCT_ID")]
    pub product_id: String,
    #[arg(long)]
    pub client_oid: Option<String>,
    /// Self-trade prevention mode
    #[arg(long)]
    pub stp: Option<String>,
    #[arg(long, value_enum)]
    pub stop: Option<StopArg>,
    #[arg(long)]
    pub stop_price: Option<String>,
    /// Validate and print the order body without sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl OrderArgs {
    fn to_common(&self) -> CommonOrderRequest {
        CommonOrderRequest {
            client_oid: self.client_oid.clone(),
            order_type: String::new(),
            side: self.side.clone(),
            product_id: self.product_id.clone(),
            stp: self.stp.clone(),
            stop: self.stop.map(StopKind::from).unwrap_or_default(),
            stop_price: self.stop_price.clone().unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct LimitArgs {
    #[command(flatten)]
    pub order: OrderArgs,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub size: Option<String>,
    /// GTC, GTT, IOC or FOK (default GTC)
    #[arg(long)]
    pub time_in_force: Option<String>,
    /// min, hour or day
    #[arg(long)]
    pub cancel_after: Option<String>,
    #[arg(long)]
    pub post_only: bool,
}

impl LimitArgs {
    pub fn to_request(&self) -> LimitOrderRequest {
        LimitOrderRequest {
            common: self.order.to_common(),
            price: self.price.clone().unwrap_or_default(),
            size: self.size.clone().unwrap_or_default(),
            time_in_force: self.time_in_force.clone().unwrap_or_default(),
            cancel_after: self.cancel_after.clone().unwrap_or_default(),
            post_only: self.post_only,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct MarketArgs {
    #[command(flatten)]
    pub order: OrderArgs,
    /// Amount in base currency
    #[arg(long)]
    pub size: Option<String>,
    /// Amount in quote currency
    #[arg(long)]
    pub funds: Option<String>,
}

impl MarketArgs {
    pub fn to_request(&self) -> MarketOrderRequest {
        MarketOrderRequest {
            common: self.order.to_common(),
            size: self.size.clone().unwrap_or_default(),
            funds: self.funds.clone().unwrap_or_default(),
        }
    }
}

/// Execute a command and return what should be printed.
pub async fn run(command: Command, config: &DeskConfig) -> Result<String> {
    match command {
        Command::Ticker { product_id } => {
            let client = connect(config)?;
            let ticker = client
                .ticker(&product_id)
                .await
                .with_context(|| format!("fetch ticker for {product_id}"))?;
            Ok(serde_json::to_string_pretty(&ticker)?)
        }
        Command::Limit(args) => {
            let dry_run = args.order.dry_run;
            submit(args.to_request().into(), dry_run, config).await
        }
        Command::Market(args) => {
            let dry_run = args.order.dry_run;
            submit(args.to_request().into(), dry_run, config).await
        }
    }
}

async fn submit(mut order: OrderRequest, dry_run: bool, config: &DeskConfig) -> Result<String> {
    if dry_run {
        order.validate().context("validate order")?;
        info!(kind = %order.kind(), "dry-run requested; order not sent");
        return Ok(serde_json::to_string_pretty(&order)?);
    }

    let client = connect(config)?;
    let placed = client.place_order(order).await.context("place order")?;
    info!(order_id = %placed.id, status = %placed.status, "order placed");
    Ok(serde_json::to_string_pretty(&placed)?)
}

fn connect(config: &DeskConfig) -> Result<TradeDeskClient> {
    TradeDeskClient::new(config.client_config()).context("create trade desk client")
}
