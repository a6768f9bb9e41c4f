//! Futures API family: verb-specific `/v1/perpum` endpoints with
//! HMAC-SHA256 signing.

pub mod builder;
pub mod client;
pub mod codec;
pub mod rest;
pub mod signer;
pub mod types;
pub mod websocket;

pub use builder::PerpBuilder;
pub use client::{PerpAccount, PerpClient, PerpMarket, PerpPositions, PerpTrading};
pub use codec::PerpCodec;
pub use signer::PerpSigner;
pub use types::{
    AccountFees, AdjustMarginRequest, BalanceSource, BatchTpslRequest, ClosePositionRequest,
    ConvertType, ConvertUnitsRequest, Direction, GoldStatus, Instrument, KlineGranularity,
    MaxOrderSize, OrderFilterType, OrderRequest, PerpOrderHistoryFilter, PerpTicker,
    Position, PositionLayout, PositionModel, PositionType, PriceType, QuantityUnit, StopFrom,
    StopType, TpslRequest, TradeDetailsFilter, TrailingStopRequest, TriggerType, UserAssets,
};
