//! Place and cancel a futures order.
//!
//! Requires `COINW_API_KEY` and `COINW_SECRET_KEY` in the environment or a
//! `.env` file. Run with `cargo run --example perp_order`.

use coinw::exchanges::perp::types::{Direction, OrderRequest, PositionModel};
use coinw::{ExchangeConfig, PerpBuilder};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ExchangeConfig::from_env_file()?;
    let client = PerpBuilder::new().with_config(config).build()?;

    let assets = client.account.user_assets().await?;
    println!(
        "available margin: {}, available USDT: {}",
        assets.available_margin, assets.available_usdt
    );

    // Limit long: 10 USDT at 50000, 5x leverage, isolated margin.
    let order = OrderRequest::limit(
        "BTC",
        Direction::Long,
        Decimal::from(10),
        Decimal::from(50000),
        5,
    )
    .with_position_model(PositionModel::Isolated);

    let placed = client.trading.place_order(&order).await?;
    println!("placed: {}", placed);

    if let Some(order_id) = placed["data"]["orderId"].as_str() {
        let cancelled = client.trading.cancel_order(order_id).await?;
        println!("cancelled: {}", cancelled);
    }

    Ok(())
}
