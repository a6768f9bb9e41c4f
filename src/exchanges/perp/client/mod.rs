use crate::core::kernel::{ReqwestRest, RestClient};

pub mod account;
pub mod market;
pub mod positions;
pub mod trading;

pub use account::PerpAccount;
pub use market::PerpMarket;
pub use positions::PerpPositions;
pub use trading::PerpTrading;

/// Unified futures client composing the endpoint wrapper groups.
#[derive(Debug, Clone)]
pub struct PerpClient<R: RestClient = ReqwestRest> {
    pub market: PerpMarket<R>,
    pub trading: PerpTrading<R>,
    pub account: PerpAccount<R>,
    pub positions: PerpPositions<R>,
}

impl<R: RestClient + Clone> PerpClient<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: PerpMarket::new(&rest),
            trading: PerpTrading::new(&rest),
            account: PerpAccount::new(&rest),
            positions: PerpPositions::new(&rest),
        }
    }
}
