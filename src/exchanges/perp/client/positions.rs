use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::perp::rest::PerpRest;
use crate::exchanges::perp::types::{MaxOrderSize, PositionModel, Position};
use rust_decimal::Decimal;
use serde_json::Value;

/// Futures position endpoints (private, HMAC-signed).
#[derive(Debug, Clone)]
pub struct PerpPositions<R: RestClient> {
    rest: PerpRest<R>,
}

impl<R: RestClient + Clone> PerpPositions<R> {
    pub(crate) fn new(rest: &R) -> Self {
        Self {
            rest: PerpRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> PerpPositions<R> {
    /// Open positions for an instrument, optionally narrowed to specific
    /// position IDs (comma-separated, at most 20).
    pub async fn positions(
        &self,
        instrument: &str,
        open_ids: Option<&str>,
    ) -> Result<Vec<Position>, ExchangeError> {
        let mut params = vec![("instrument".to_string(), instrument.to_string())];
        if let Some(open_ids) = open_ids {
            params.push(("openIds".to_string(), open_ids.to_string()));
        }
        self.rest.get_data("/v1/perpum/positions", &params, true).await
    }

    /// Historical (closed) positions.
    pub async fn positions_history(
        &self,
        instrument: Option<&str>,
        position_model: Option<PositionModel>,
    ) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(instrument) = instrument {
            params.push(("instrument".to_string(), instrument.to_string()));
        }
        if let Some(position_model) = position_model {
            params.push((
                "positionModel".to_string(),
                (position_model as u8).to_string(),
            ));
        }
        self.rest
            .get("/v1/perpum/positions/history", &params, true)
            .await
    }

    /// Margin rate applied to a position.
    ///
    /// `position_id` is required for isolated positions and must be omitted
    /// for cross-margin positions.
    pub async fn position_margin_rate(
        &self,
        position_id: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        if let Some(position_id) = position_id {
            params.push(("positionId".to_string(), position_id.to_string()));
        }
        self.rest
            .get("/v1/perpum/positions/marginRate", &params, true)
            .await
    }

    /// Maximum available contract size for both directions at the given
    /// leverage and margin mode.
    pub async fn max_order_size(
        &self,
        leverage: u32,
        instrument: &str,
        position_model: PositionModel,
        order_price: Option<Decimal>,
    ) -> Result<MaxOrderSize, ExchangeError> {
        let mut params = vec![
            ("leverage".to_string(), leverage.to_string()),
            ("instrument".to_string(), instrument.to_string()),
            (
                "positionModel".to_string(),
                (position_model as u8).to_string(),
            ),
        ];
        if let Some(order_price) = order_price {
            params.push(("orderPrice".to_string(), order_price.to_string()));
        }
        self.rest
            .get_data("/v1/perpum/orders/maxSize", &params, true)
            .await
    }

    /// Every currently open position.
    pub async fn all_positions(&self) -> Result<Vec<Position>, ExchangeError> {
        self.rest.get_data("/v1/perpum/positions/all", &[], true).await
    }

    /// Leverage of one filled position or one unfilled order.
    ///
    /// Exactly one of `position_id` (filled) and `order_id` (unfilled) must
    /// be given.
    pub async fn leverage_info(
        &self,
        position_id: Option<i64>,
        order_id: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let mut params = Vec::new();
        match (position_id, order_id) {
            (None, None) => {
                return Err(ExchangeError::InvalidParameter(
                    "either position_id or order_id is required".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(ExchangeError::InvalidParameter(
                    "position_id and order_id are mutually exclusive".to_string(),
                ))
            }
            (Some(position_id), None) => {
                params.push(("positionId".to_string(), position_id.to_string()));
            }
            (None, Some(order_id)) => {
                params.push(("orderId".to_string(), order_id.to_string()));
            }
        }
        self.rest
            .get("/v1/perpum/positions/leverage", &params, true)
            .await
    }

    /// One position by ID.
    pub async fn position_by_id(
        &self,
        instrument: &str,
        position_id: &str,
    ) -> Result<Vec<Position>, ExchangeError> {
        self.positions(instrument, Some(position_id)).await
    }

    pub async fn cross_margin_positions_history(&self) -> Result<Value, ExchangeError> {
        self.positions_history(None, Some(PositionModel::Cross)).await
    }

    pub async fn isolated_margin_positions_history(&self) -> Result<Value, ExchangeError> {
        self.positions_history(None, Some(PositionModel::Isolated))
            .await
    }

    pub async fn cross_margin_rate(&self) -> Result<Value, ExchangeError> {
        self.position_margin_rate(None).await
    }

    pub async fn isolated_margin_rate(&self, position_id: i64) -> Result<Value, ExchangeError> {
        self.position_margin_rate(Some(position_id)).await
    }

    pub async fn position_leverage(&self, position_id: i64) -> Result<Value, ExchangeError> {
        self.leverage_info(Some(position_id), None).await
    }

    pub async fn order_leverage(&self, order_id: i64) -> Result<Value, ExchangeError> {
        self.leverage_info(None, Some(order_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::{RestClientBuilder, RestClientConfig};

    #[tokio::test]
    async fn test_leverage_info_requires_exactly_one_id() {
        let rest = RestClientBuilder::new(RestClientConfig::new(
            "https://api.coinw.com".to_string(),
            "perp".to_string(),
        ))
        .build()
        .unwrap();
        let positions = PerpPositions::new(&rest);

        assert!(matches!(
            positions.leverage_info(None, None).await.unwrap_err(),
            ExchangeError::InvalidParameter(_)
        ));
        assert!(matches!(
            positions.leverage_info(Some(1), Some(2)).await.unwrap_err(),
            ExchangeError::InvalidParameter(_)
        ));
    }
}
