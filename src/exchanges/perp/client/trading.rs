use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::perp::rest::PerpRest;
use crate::exchanges::perp::types::{
    AdjustMarginRequest, BatchTpslRequest, ClosePositionRequest, Direction, OrderFilterType,
    OrderRequest, PerpOrderHistoryFilter, StopFrom, TpslRequest, TrailingStopRequest,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};

/// Futures trading endpoints (private, HMAC-signed).
#[derive(Debug, Clone)]
pub struct PerpTrading<R: RestClient> {
    rest: PerpRest<R>,
}

impl<R: RestClient + Clone> PerpTrading<R> {
    pub(crate) fn new(rest: &R) -> Self {
        Self {
            rest: PerpRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> PerpTrading<R> {
    /// Place an order. Field combinations are validated before any network
    /// call.
    pub async fn place_order(&self, order: &OrderRequest) -> Result<Value, ExchangeError> {
        let body = order.to_body()?;
        self.rest.post("/v1/perpum/order", &body, true).await
    }

    /// Replace an existing order; returns the original and new order IDs.
    pub async fn modify_order(
        &self,
        order_id: &str,
        order: &OrderRequest,
    ) -> Result<Value, ExchangeError> {
        let mut body = order.to_body()?;
        body["id"] = Value::String(order_id.to_string());
        self.rest.put("/v1/perpum/order", &body, true).await
    }

    /// Submit up to a batch of orders in one request. The exchange's
    /// per-item result array is returned unmodified.
    pub async fn place_batch_orders(
        &self,
        orders: &[OrderRequest],
    ) -> Result<Value, ExchangeError> {
        let bodies = orders
            .iter()
            .map(OrderRequest::to_body)
            .collect::<Result<Vec<_>, _>>()?;
        self.rest
            .post("/v1/perpum/batchOrders", &Value::Array(bodies), true)
            .await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        let body = json!({ "id": order_id });
        self.rest.delete("/v1/perpum/order", &body, true).await
    }

    /// Cancel a batch of orders by ID (at most 20 per call).
    pub async fn cancel_batch_orders(
        &self,
        order_ids: &[&str],
        pos_type: Option<OrderFilterType>,
    ) -> Result<Value, ExchangeError> {
        let mut body = json!({ "sourceIds": order_ids });
        if let Some(pos_type) = pos_type {
            body["posType"] = Value::String(pos_type.as_str().to_string());
        }
        self.rest.delete("/v1/perpum/batchOrders", &body, true).await
    }

    /// Unfilled order details, optionally narrowed to specific order IDs
    /// (comma-separated, at most 20).
    pub async fn order(
        &self,
        position_type: OrderFilterType,
        source_ids: Option<&str>,
        instrument: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![(
            "positionType".to_string(),
            position_type.as_str().to_string(),
        )];
        if let Some(source_ids) = source_ids {
            params.push(("sourceIds".to_string(), source_ids.to_string()));
        }
        if let Some(instrument) = instrument {
            params.push(("instrument".to_string(), instrument.to_string()));
        }
        self.rest.get("/v1/perpum/order", &params, true).await
    }

    pub async fn open_orders(
        &self,
        instrument: &str,
        position_type: OrderFilterType,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![
            ("instrument".to_string(), instrument.to_string()),
            (
                "positionType".to_string(),
                position_type.as_str().to_string(),
            ),
        ];
        if let Some(page) = page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = page_size {
            params.push(("pageSize".to_string(), page_size.to_string()));
        }
        self.rest.get("/v1/perpum/orders/open", &params, true).await
    }

    /// Total count of unfilled orders.
    pub async fn pending_order_count(&self) -> Result<Value, ExchangeError> {
        self.rest
            .get("/v1/perpum/orders/openQuantity", &[], true)
            .await
    }

    /// Order history over the past seven days.
    pub async fn order_history(
        &self,
        filter: &PerpOrderHistoryFilter,
    ) -> Result<Value, ExchangeError> {
        self.rest
            .get("/v1/perpum/orders/history", &filter.to_params(), true)
            .await
    }

    /// Order history over the past three months.
    pub async fn order_archive(
        &self,
        filter: &PerpOrderHistoryFilter,
    ) -> Result<Value, ExchangeError> {
        self.rest
            .get("/v1/perpum/orders/archive", &filter.to_params(), true)
            .await
    }

    /// Close part or all of one position.
    pub async fn close_position(
        &self,
        request: &ClosePositionRequest,
    ) -> Result<Value, ExchangeError> {
        let body = request.to_body()?;
        self.rest.delete("/v1/perpum/positions", &body, true).await
    }

    /// Close every position on an instrument at market.
    pub async fn close_all_positions(&self, instrument: &str) -> Result<Value, ExchangeError> {
        let body = json!({ "instrument": instrument });
        self.rest.delete("/v1/perpum/allpositions", &body, true).await
    }

    /// Close a batch of positions by caller-assigned order IDs.
    pub async fn close_batch_positions(
        &self,
        third_order_ids: &[&str],
    ) -> Result<Value, ExchangeError> {
        let body = Value::Array(
            third_order_ids
                .iter()
                .map(|id| json!({ "thirdOrderId": id }))
                .collect(),
        );
        self.rest.delete("/v1/perpum/batchClose", &body, true).await
    }

    /// Close the position and reopen it with the same size in the opposite
    /// direction.
    pub async fn reverse_position(&self, position_id: &str) -> Result<Value, ExchangeError> {
        let body = json!({ "id": position_id });
        self.rest
            .post("/v1/perpum/positions/reverse", &body, true)
            .await
    }

    pub async fn adjust_margin(
        &self,
        request: &AdjustMarginRequest,
    ) -> Result<Value, ExchangeError> {
        let body = request.to_body()?;
        self.rest
            .post("/v1/perpum/positions/margin", &body, true)
            .await
    }

    /// Set stop-loss / take-profit on a filled or unfilled order.
    pub async fn set_stop_loss_take_profit(
        &self,
        request: &TpslRequest,
    ) -> Result<Value, ExchangeError> {
        let body = request.to_body()?;
        self.rest.post("/v1/perpum/TPSL", &body, true).await
    }

    /// Configure a trailing stop on a filled position.
    pub async fn set_trailing_stop(
        &self,
        request: &TrailingStopRequest,
    ) -> Result<Value, ExchangeError> {
        let body = request.to_body()?;
        self.rest.post("/v1/perpum/moveTPSL", &body, true).await
    }

    pub async fn trailing_stop_info(&self) -> Result<Value, ExchangeError> {
        self.rest.get("/v1/perpum/moveTPSL", &[], true).await
    }

    pub async fn batch_set_tpsl(&self, request: &BatchTpslRequest) -> Result<Value, ExchangeError> {
        let body = request.to_body()?;
        self.rest.post("/v1/perpum/addTpsl", &body, true).await
    }

    pub async fn batch_modify_tpsl(
        &self,
        request: &BatchTpslRequest,
    ) -> Result<Value, ExchangeError> {
        let body = request.to_body()?;
        self.rest.post("/v1/perpum/updateTpsl", &body, true).await
    }

    /// Stop-loss / take-profit details for filled and unfilled orders.
    pub async fn tpsl_info(
        &self,
        stop_from: StopFrom,
        instrument: Option<&str>,
        order_id: Option<&str>,
        position_id: Option<&str>,
        plan_order_id: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let mut params = vec![("stopFrom".to_string(), (stop_from as u8).to_string())];
        if let Some(instrument) = instrument {
            params.push(("instrument".to_string(), instrument.to_string()));
        }
        if let Some(order_id) = order_id {
            params.push(("orderId".to_string(), order_id.to_string()));
        }
        if let Some(position_id) = position_id {
            params.push(("openId".to_string(), position_id.to_string()));
        }
        if let Some(plan_order_id) = plan_order_id {
            params.push(("planOrderId".to_string(), plan_order_id.to_string()));
        }
        self.rest.get("/v1/perpum/TPSL", &params, true).await
    }

    /// Market long, sized in quote currency.
    pub async fn buy_market(
        &self,
        instrument: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<Value, ExchangeError> {
        self.place_order(&OrderRequest::market(
            instrument,
            Direction::Long,
            quantity,
            leverage,
        ))
        .await
    }

    /// Market short, sized in quote currency.
    pub async fn sell_market(
        &self,
        instrument: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<Value, ExchangeError> {
        self.place_order(&OrderRequest::market(
            instrument,
            Direction::Short,
            quantity,
            leverage,
        ))
        .await
    }

    pub async fn buy_limit(
        &self,
        instrument: &str,
        quantity: Decimal,
        price: Decimal,
        leverage: u32,
    ) -> Result<Value, ExchangeError> {
        self.place_order(&OrderRequest::limit(
            instrument,
            Direction::Long,
            quantity,
            price,
            leverage,
        ))
        .await
    }

    pub async fn sell_limit(
        &self,
        instrument: &str,
        quantity: Decimal,
        price: Decimal,
        leverage: u32,
    ) -> Result<Value, ExchangeError> {
        self.place_order(&OrderRequest::limit(
            instrument,
            Direction::Short,
            quantity,
            price,
            leverage,
        ))
        .await
    }

    /// Limit long with attached stop-loss / take-profit prices.
    pub async fn buy_with_sl_tp(
        &self,
        instrument: &str,
        quantity: Decimal,
        price: Decimal,
        leverage: u32,
        stop_loss_price: Option<Decimal>,
        stop_profit_price: Option<Decimal>,
    ) -> Result<Value, ExchangeError> {
        let mut order =
            OrderRequest::limit(instrument, Direction::Long, quantity, price, leverage);
        order.stop_loss_price = stop_loss_price;
        order.stop_profit_price = stop_profit_price;
        self.place_order(&order).await
    }

    /// Limit short with attached stop-loss / take-profit prices.
    pub async fn sell_with_sl_tp(
        &self,
        instrument: &str,
        quantity: Decimal,
        price: Decimal,
        leverage: u32,
        stop_loss_price: Option<Decimal>,
        stop_profit_price: Option<Decimal>,
    ) -> Result<Value, ExchangeError> {
        let mut order =
            OrderRequest::limit(instrument, Direction::Short, quantity, price, leverage);
        order.stop_loss_price = stop_loss_price;
        order.stop_profit_price = stop_profit_price;
        self.place_order(&order).await
    }
}
