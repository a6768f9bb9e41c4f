//! Stream futures market data and account updates.
//!
//! Public channels work without credentials; set `COINW_API_KEY` and
//! `COINW_SECRET_KEY` to also receive private order updates. Run with
//! `cargo run --example perp_websocket`.

use coinw::core::kernel::{WsConfig, WsEvent};
use coinw::exchanges::perp::websocket::{self, channels};
use coinw::ExchangeConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ExchangeConfig::from_env_file().unwrap_or_else(|_| ExchangeConfig::read_only());
    let has_credentials = config.has_credentials();

    let (client, mut events) = websocket::connect(&config, WsConfig::default()).await?;

    client.subscribe(channels::ticker("BTC")).await?;
    client.subscribe(channels::depth("BTC")).await?;

    if has_credentials {
        client.subscribe_private(channels::orders()).await?;
        client.subscribe_private(channels::positions()).await?;
    }

    while let Some(event) = events.recv().await {
        match event {
            WsEvent::Open => println!("connected"),
            WsEvent::Message(payload) => println!("{}", payload),
            WsEvent::Login { success, message } => {
                println!("login: success={} {}", success, message);
            }
            WsEvent::Closed { reason } => println!("disconnected: {:?}", reason),
            WsEvent::ReconnectFailed { attempts } => {
                println!("gave up after {} reconnect attempts", attempts);
                break;
            }
        }
    }

    Ok(())
}
