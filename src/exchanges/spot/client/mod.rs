use crate::core::kernel::{ReqwestRest, RestClient};

pub mod account;
pub mod market;
pub mod trading;

pub use account::SpotAccount;
pub use market::SpotMarket;
pub use trading::SpotTrading;

/// Unified spot client composing the endpoint wrapper groups.
#[derive(Debug, Clone)]
pub struct SpotClient<R: RestClient = ReqwestRest> {
    pub market: SpotMarket<R>,
    pub trading: SpotTrading<R>,
    pub account: SpotAccount<R>,
}

impl<R: RestClient + Clone> SpotClient<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: SpotMarket::new(&rest),
            trading: SpotTrading::new(&rest),
            account: SpotAccount::new(&rest),
        }
    }
}
