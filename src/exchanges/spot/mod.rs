//! Spot API family: `command`-discriminated endpoints with MD5 signing.

pub mod builder;
pub mod client;
pub mod codec;
pub mod rest;
pub mod signer;
pub mod types;
pub mod websocket;

pub use builder::SpotBuilder;
pub use client::{SpotAccount, SpotClient, SpotMarket, SpotTrading};
pub use codec::SpotCodec;
pub use signer::SpotSigner;
pub use types::{
    AccountType, InnerToType, OrderSide, SpotOrderHistoryFilter, SpotOrderRequest, SpotOrderType,
    TransferDirection, TransferRequest, WithdrawRequest, WithdrawType,
};
