//! Transport kernel shared by the spot and futures API families.
//!
//! The kernel contains only transport logic and generic interfaces:
//!
//! - [`RestClient`] / [`ReqwestRest`]: pooled HTTP session with a transparent
//!   retry policy for transient statuses and a uniform error taxonomy,
//!   including business failures embedded in 200 responses.
//! - [`Signer`]: pluggable request authentication. The spot family signs
//!   with MD5 into form fields, the futures family with HMAC-SHA256 into
//!   headers; both implementations live next to their family modules.
//! - [`WsCodec`] / [`WsClient`]: family-specific frame encoding on top of a
//!   single connection actor that owns the socket, the subscription
//!   registry, the login handshake and reconnect-with-resubscribe.
//!
//! Everything family-specific (paths, commands, frame grammar) stays out of
//! this module.

pub mod codec;
pub mod rest;
pub mod signer;
pub mod ws;

// Re-export key types for convenience
pub use codec::{WsCodec, WsFrame};
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
pub use ws::{
    ConnectionState, SubscriptionEntry, WsClient, WsConfig, WsCredentials, WsEvent,
};
