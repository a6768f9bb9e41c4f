use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::perp::rest::PerpRest;
use crate::exchanges::perp::types::{
    AccountFees, ConvertUnitsRequest, GoldStatus, PositionLayout, PositionModel,
    TradeDetailsFilter, UserAssets,
};
use serde_json::{json, Value};

/// Futures account endpoints (private, HMAC-signed).
#[derive(Debug, Clone)]
pub struct PerpAccount<R: RestClient> {
    rest: PerpRest<R>,
}

impl<R: RestClient + Clone> PerpAccount<R> {
    pub(crate) fn new(rest: &R) -> Self {
        Self {
            rest: PerpRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> PerpAccount<R> {
    /// Maximum balance transferable out of the contract account.
    pub async fn max_transferable_balance(&self) -> Result<Value, ExchangeError> {
        self.rest
            .get("/v1/perpum/account/available", &[], true)
            .await
    }

    /// Trade details over the past three days.
    pub async fn trade_details(
        &self,
        instrument: &str,
        filter: &TradeDetailsFilter,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![("instrument".to_string(), instrument.to_string())];
        params.extend(filter.to_params());
        self.rest.get("/v1/perpum/orders/deals", &params, true).await
    }

    /// Trade details over the past three months.
    pub async fn trade_details_history(
        &self,
        instrument: &str,
        filter: &TradeDetailsFilter,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![("instrument".to_string(), instrument.to_string())];
        params.extend(filter.to_params());
        self.rest
            .get("/v1/perpum/orders/deals/history", &params, true)
            .await
    }

    /// Contract account assets: available margin, USDT balance, frozen
    /// amounts and almighty gold.
    pub async fn user_assets(&self) -> Result<UserAssets, ExchangeError> {
        self.rest
            .get_data("/v1/perpum/account/getUserAssets", &[], true)
            .await
    }

    /// Maker/taker fee rates of the contract account.
    pub async fn account_fees(&self) -> Result<AccountFees, ExchangeError> {
        self.rest.get_data("/v1/perpum/account/fees", &[], true).await
    }

    /// Almighty gold vouchers filtered by status and validity window.
    pub async fn almighty_gold_info(
        &self,
        status: GoldStatus,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![("type".to_string(), (status as u8).to_string())];
        if let Some(start_time) = start_time {
            params.push(("startTime".to_string(), start_time.to_string()));
        }
        if let Some(end_time) = end_time {
            params.push(("endTime".to_string(), end_time.to_string()));
        }
        self.rest
            .get("/v1/perpum/account/almightyGoldInfo", &params, true)
            .await
    }

    /// Convert between contract units and coin amounts.
    pub async fn convert_units(
        &self,
        request: &ConvertUnitsRequest,
    ) -> Result<Value, ExchangeError> {
        let body = request.to_body()?;
        self.rest.post("/v1/perpum/pieceConvert", &body, true).await
    }

    /// Position margin mode (isolated or cross) and layout.
    pub async fn margin_mode(&self) -> Result<Value, ExchangeError> {
        self.rest
            .get("/v1/perpum/positions/type", &[], true)
            .await
    }

    /// Configure the margin mode and position layout.
    ///
    /// Both changes require that no orders are currently unfilled.
    pub async fn set_margin_mode(
        &self,
        position_model: PositionModel,
        layout: PositionLayout,
    ) -> Result<Value, ExchangeError> {
        let body = json!({
            "positionModel": position_model as u8,
            "layout": layout as u8,
        });
        self.rest.post("/v1/perpum/positions/type", &body, true).await
    }

    /// Enable or disable using almighty gold as contract margin.
    pub async fn toggle_almighty_gold(&self, enabled: bool) -> Result<Value, ExchangeError> {
        let body = json!({ "status": if enabled { "1" } else { "0" } });
        self.rest
            .post("/v1/perpum/account/almightyGoldInfo", &body, true)
            .await
    }

    /// Maximum closable contract size for the account on one instrument.
    pub async fn user_max_order_size(&self, instrument: &str) -> Result<Value, ExchangeError> {
        let params = vec![("instrument".to_string(), instrument.to_string())];
        self.rest
            .get("/v1/perpum/orders/availSize", &params, true)
            .await
    }
}
