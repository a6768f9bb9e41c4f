//! Fetch spot market data: ticker, order book and recent candles.
//!
//! Run with `cargo run --example spot_market`.

use coinw::SpotBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = SpotBuilder::new().build()?;

    let ticker = client.market.ticker(Some("BTC_USDT")).await?;
    println!("BTC_USDT ticker: {}", ticker);

    let order_book = client.market.order_book("BTC_USDT", 5).await?;
    println!("order book: {}", order_book);

    // 15-minute candles.
    let klines = client.market.klines("BTC_USDT", 900, None, None).await?;
    println!("klines: {}", klines);

    let server_time = client.market.server_time().await?;
    println!("server time: {}", server_time);

    Ok(())
}
