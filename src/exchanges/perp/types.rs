use crate::core::errors::ExchangeError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl FromStr for Direction {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            other => Err(ExchangeError::InvalidParameter(format!(
                "direction must be 'long' or 'short', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}

/// Unit the order quantity is denominated in; `0` on the wire means quote
/// currency, `1` contracts, `2` base currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum QuantityUnit {
    Quote = 0,
    Contracts = 1,
    Base = 2,
}

impl Serialize for QuantityUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Position margin mode; `0` isolated, `1` cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PositionModel {
    Isolated = 0,
    Cross = 1,
}

impl Serialize for PositionModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Order type: market (`execute`), plan (limit-style) or plan-trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionType {
    Execute,
    Plan,
    PlanTrigger,
}

impl PositionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Execute => "execute",
            Self::Plan => "plan",
            Self::PlanTrigger => "planTrigger",
        }
    }
}

/// Order type placed when a trigger price is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TriggerType {
    Limit = 0,
    Market = 1,
}

impl Serialize for TriggerType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// A futures order for `POST /v1/perpum/order`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub instrument: String,
    pub direction: Direction,
    pub leverage: u32,
    pub quantity_unit: QuantityUnit,
    pub quantity: Decimal,
    pub position_model: PositionModel,
    pub position_type: PositionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_profit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_almighty_gold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold_id: Option<i64>,
}

impl OrderRequest {
    /// Market order denominated in quote currency, cross margin.
    pub fn market(
        instrument: impl Into<String>,
        direction: Direction,
        quantity: Decimal,
        leverage: u32,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            direction,
            leverage,
            quantity_unit: QuantityUnit::Quote,
            quantity,
            position_model: PositionModel::Cross,
            position_type: PositionType::Execute,
            open_price: None,
            stop_loss_price: None,
            stop_profit_price: None,
            trigger_price: None,
            trigger_type: None,
            third_order_id: None,
            use_almighty_gold: None,
            gold_id: None,
        }
    }

    /// Plan (limit) order at `price`, cross margin.
    pub fn limit(
        instrument: impl Into<String>,
        direction: Direction,
        quantity: Decimal,
        price: Decimal,
        leverage: u32,
    ) -> Self {
        let mut order = Self::market(instrument, direction, quantity, leverage);
        order.position_type = PositionType::Plan;
        order.open_price = Some(price);
        order
    }

    pub fn with_quantity_unit(mut self, quantity_unit: QuantityUnit) -> Self {
        self.quantity_unit = quantity_unit;
        self
    }

    pub fn with_position_model(mut self, position_model: PositionModel) -> Self {
        self.position_model = position_model;
        self
    }

    pub fn with_stop_loss(mut self, price: Decimal) -> Self {
        self.stop_loss_price = Some(price);
        self
    }

    pub fn with_stop_profit(mut self, price: Decimal) -> Self {
        self.stop_profit_price = Some(price);
        self
    }

    pub fn with_trigger(mut self, price: Decimal, trigger_type: TriggerType) -> Self {
        self.position_type = PositionType::PlanTrigger;
        self.trigger_price = Some(price);
        self.trigger_type = Some(trigger_type);
        self
    }

    pub fn with_third_order_id(mut self, third_order_id: impl Into<String>) -> Self {
        self.third_order_id = Some(third_order_id.into());
        self
    }

    /// Reject invalid field combinations before any network call.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.leverage == 0 {
            return Err(ExchangeError::InvalidParameter(
                "leverage must be at least 1".to_string(),
            ));
        }
        if self.position_type == PositionType::Plan && self.open_price.is_none() {
            return Err(ExchangeError::InvalidParameter(
                "plan orders require open_price".to_string(),
            ));
        }
        if self.position_type == PositionType::PlanTrigger && self.trigger_price.is_none() {
            return Err(ExchangeError::InvalidParameter(
                "planTrigger orders require trigger_price".to_string(),
            ));
        }
        Ok(())
    }

    /// Wire-format request body.
    pub fn to_body(&self) -> Result<Value, ExchangeError> {
        self.validate()?;
        serde_json::to_value(self)
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }
}

/// Close an open position via `DELETE /v1/perpum/positions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionRequest {
    #[serde(rename = "id")]
    pub position_id: String,
    pub position_type: PositionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_num: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_price: Option<Decimal>,
}

impl ClosePositionRequest {
    /// Close a fraction of the position at market; `rate` is in 0..=1.
    pub fn by_rate(position_id: impl Into<String>, rate: Decimal) -> Self {
        Self {
            position_id: position_id.into(),
            position_type: PositionType::Execute,
            close_rate: Some(rate),
            close_num: None,
            order_price: None,
        }
    }

    /// Close a fixed number of contracts at market.
    pub fn by_contracts(position_id: impl Into<String>, contracts: Decimal) -> Self {
        Self {
            position_id: position_id.into(),
            position_type: PositionType::Execute,
            close_rate: None,
            close_num: Some(contracts),
            order_price: None,
        }
    }

    /// Close at a specified price; switches the order type to plan.
    pub fn with_limit_price(mut self, price: Decimal) -> Self {
        self.position_type = PositionType::Plan;
        self.order_price = Some(price);
        self
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        match (self.close_rate, self.close_num) {
            (None, None) => {
                return Err(ExchangeError::InvalidParameter(
                    "either close_rate or close_num is required".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(ExchangeError::InvalidParameter(
                    "close_rate and close_num are mutually exclusive".to_string(),
                ))
            }
            _ => {}
        }
        if self.order_price.is_some() && self.position_type != PositionType::Plan {
            return Err(ExchangeError::InvalidParameter(
                "order_price requires position_type plan".to_string(),
            ));
        }
        Ok(())
    }

    /// Wire-format request body.
    pub fn to_body(&self) -> Result<Value, ExchangeError> {
        self.validate()?;
        serde_json::to_value(self)
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }
}

/// Which balance pool to use when adjusting position margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BalanceSource {
    All,
    AlmightyGold,
    Balance,
}

/// Adjust the margin of an isolated position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustMarginRequest {
    #[serde(rename = "id")]
    pub position_id: String,
    #[serde(rename = "type")]
    pub balance_source: BalanceSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_margin: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_margin: Option<Decimal>,
}

impl AdjustMarginRequest {
    pub fn add(position_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            position_id: position_id.into(),
            balance_source: BalanceSource::All,
            add_margin: Some(amount),
            reduce_margin: None,
        }
    }

    pub fn reduce(position_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            position_id: position_id.into(),
            balance_source: BalanceSource::All,
            add_margin: None,
            reduce_margin: Some(amount),
        }
    }

    pub fn with_balance_source(mut self, balance_source: BalanceSource) -> Self {
        self.balance_source = balance_source;
        self
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        match (self.add_margin, self.reduce_margin) {
            (None, None) => Err(ExchangeError::InvalidParameter(
                "either add_margin or reduce_margin is required".to_string(),
            )),
            (Some(_), Some(_)) => Err(ExchangeError::InvalidParameter(
                "add_margin and reduce_margin are mutually exclusive".to_string(),
            )),
            (Some(amount), None) | (None, Some(amount)) => {
                if amount <= Decimal::ZERO {
                    Err(ExchangeError::InvalidParameter(
                        "margin adjustment must be greater than 0".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Wire-format request body.
    pub fn to_body(&self) -> Result<Value, ExchangeError> {
        self.validate()?;
        serde_json::to_value(self)
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }
}

/// Stop-loss / take-profit settings for an order or position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TpslRequest {
    /// Order ID for unfilled orders, position ID for filled ones.
    #[serde(rename = "id")]
    pub order_or_position_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_profit_order_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_profit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_profit_rate: Option<Decimal>,
}

impl TpslRequest {
    pub fn new(order_or_position_id: impl Into<String>) -> Self {
        Self {
            order_or_position_id: order_or_position_id.into(),
            instrument: None,
            stop_loss_order_price: None,
            stop_profit_order_price: None,
            stop_loss_price: None,
            stop_profit_price: None,
            stop_loss_rate: None,
            stop_profit_rate: None,
        }
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = Some(instrument.into());
        self
    }

    pub fn with_stop_loss_price(mut self, price: Decimal) -> Self {
        self.stop_loss_price = Some(price);
        self
    }

    pub fn with_stop_profit_price(mut self, price: Decimal) -> Self {
        self.stop_profit_price = Some(price);
        self
    }

    /// Wire-format request body.
    pub fn to_body(&self) -> Result<Value, ExchangeError> {
        serde_json::to_value(self)
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }
}

/// Trailing stop configuration; only valid for filled positions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingStopRequest {
    #[serde(rename = "openId")]
    pub position_id: String,
    /// Callback rate in 0..=1 (0.5 means 50%).
    pub callback_rate: Decimal,
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<Decimal>,
    pub quantity_unit: QuantityUnit,
}

impl TrailingStopRequest {
    pub fn new(position_id: impl Into<String>, callback_rate: Decimal, quantity: Decimal) -> Self {
        Self {
            position_id: position_id.into(),
            callback_rate,
            quantity,
            trigger_price: None,
            quantity_unit: QuantityUnit::Contracts,
        }
    }

    pub fn with_trigger_price(mut self, trigger_price: Decimal) -> Self {
        self.trigger_price = Some(trigger_price);
        self
    }

    pub fn with_quantity_unit(mut self, quantity_unit: QuantityUnit) -> Self {
        self.quantity_unit = quantity_unit;
        self
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.callback_rate < Decimal::ZERO || self.callback_rate > Decimal::ONE {
            return Err(ExchangeError::InvalidParameter(
                "callback_rate must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Wire-format request body.
    pub fn to_body(&self) -> Result<Value, ExchangeError> {
        self.validate()?;
        serde_json::to_value(self)
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }
}

/// Order kind a batch stop applies to; drives which ID the `id` field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StopFrom {
    /// Limit order; `id` is an order ID.
    LimitOrder = 1,
    /// Market order; `id` is a position ID.
    MarketOrder = 2,
    /// Conditional order; `id` is a plan ID.
    ConditionalOrder = 3,
}

impl Serialize for StopFrom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Trigger price reference for stop orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PriceType {
    Index = 1,
    Latest = 2,
    Mark = 3,
}

impl Serialize for PriceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Whether the stop covers a batch of orders or the whole position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StopType {
    Batch = 1,
    WholePosition = 2,
}

impl Serialize for StopType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Batch stop-loss / take-profit for `addTpsl` and `updateTpsl`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTpslRequest {
    #[serde(rename = "id")]
    pub order_position_or_plan_id: String,
    pub stop_from: StopFrom,
    pub price_type: PriceType,
    pub stop_type: StopType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_profit_order_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_profit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_profit_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_piece: Option<Decimal>,
}

impl BatchTpslRequest {
    pub fn new(order_position_or_plan_id: impl Into<String>, stop_from: StopFrom) -> Self {
        Self {
            order_position_or_plan_id: order_position_or_plan_id.into(),
            stop_from,
            price_type: PriceType::Mark,
            stop_type: StopType::WholePosition,
            instrument: None,
            stop_loss_order_price: None,
            stop_profit_order_price: None,
            stop_loss_price: None,
            stop_profit_price: None,
            stop_loss_rate: None,
            stop_profit_rate: None,
            close_piece: None,
        }
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.stop_type == StopType::Batch && self.close_piece.is_none() {
            return Err(ExchangeError::InvalidParameter(
                "batch stops require close_piece".to_string(),
            ));
        }
        Ok(())
    }

    /// Wire-format request body.
    pub fn to_body(&self) -> Result<Value, ExchangeError> {
        self.validate()?;
        serde_json::to_value(self)
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }
}

/// Order category used by order queries and batch cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFilterType {
    Execute,
    Plan,
    PlanTrigger,
    MoveStop,
    StopProfitLoss,
    MoveStopProfitLoss,
}

impl OrderFilterType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Execute => "execute",
            Self::Plan => "plan",
            Self::PlanTrigger => "planTrigger",
            Self::MoveStop => "moveStop",
            Self::StopProfitLoss => "stopProfitLoss",
            Self::MoveStopProfitLoss => "moveStopProfitLoss",
        }
    }
}

/// Filter for order history queries.
#[derive(Debug, Clone, Default)]
pub struct PerpOrderHistoryFilter {
    pub instrument: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub origin_type: Option<OrderFilterType>,
}

impl PerpOrderHistoryFilter {
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(instrument) = &self.instrument {
            params.push(("instrument".to_string(), instrument.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("pageSize".to_string(), page_size.to_string()));
        }
        if let Some(origin_type) = self.origin_type {
            params.push(("originType".to_string(), origin_type.as_str().to_string()));
        }
        params
    }
}

/// Filter for trade-details queries.
#[derive(Debug, Clone, Default)]
pub struct TradeDetailsFilter {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub origin_type: Option<OrderFilterType>,
    pub position_model: Option<PositionModel>,
}

impl TradeDetailsFilter {
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("pageSize".to_string(), page_size.to_string()));
        }
        if let Some(origin_type) = self.origin_type {
            params.push(("originType".to_string(), origin_type.as_str().to_string()));
        }
        if let Some(position_model) = self.position_model {
            params.push((
                "positionModel".to_string(),
                (position_model as u8).to_string(),
            ));
        }
        params
    }
}

/// Position layout: whether same-direction positions are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PositionLayout {
    Merged = 0,
    Separate = 1,
}

/// Almighty gold voucher status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GoldStatus {
    Pending = 0,
    Unused = 1,
    Used = 2,
    Expired = 3,
    Failed = 4,
}

/// Conversion between contract units and coin amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConvertType {
    ContractsToCoin = 1,
    CoinToContracts = 2,
}

#[derive(Debug, Clone)]
pub struct ConvertUnitsRequest {
    pub convert_type: ConvertType,
    /// Minimum value per lot.
    pub face_value: Decimal,
    /// Contract count; required when converting contracts to coin.
    pub deal_piece: Option<Decimal>,
    /// Coin amount; required when converting coin to contracts.
    pub base_size: Option<Decimal>,
}

impl ConvertUnitsRequest {
    pub fn contracts_to_coin(face_value: Decimal, deal_piece: Decimal) -> Self {
        Self {
            convert_type: ConvertType::ContractsToCoin,
            face_value,
            deal_piece: Some(deal_piece),
            base_size: None,
        }
    }

    pub fn coin_to_contracts(face_value: Decimal, base_size: Decimal) -> Self {
        Self {
            convert_type: ConvertType::CoinToContracts,
            face_value,
            deal_piece: None,
            base_size: Some(base_size),
        }
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        match self.convert_type {
            ConvertType::ContractsToCoin if self.deal_piece.is_none() => {
                Err(ExchangeError::InvalidParameter(
                    "deal_piece is required when converting contracts to coin".to_string(),
                ))
            }
            ConvertType::CoinToContracts if self.base_size.is_none() => {
                Err(ExchangeError::InvalidParameter(
                    "base_size is required when converting coin to contracts".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Wire-format request body.
    pub fn to_body(&self) -> Result<Value, ExchangeError> {
        self.validate()?;
        let mut body = serde_json::json!({
            "convertType": self.convert_type as u8,
            "faceValue": self.face_value,
        });
        if let Some(deal_piece) = self.deal_piece {
            body["dealPiece"] = serde_json::to_value(deal_piece)
                .map_err(|e| ExchangeError::SerializationError(e.to_string()))?;
        }
        if let Some(base_size) = self.base_size {
            body["baseSize"] = serde_json::to_value(base_size)
                .map_err(|e| ExchangeError::SerializationError(e.to_string()))?;
        }
        Ok(body)
    }
}

/// Candle width codes for the futures kline endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KlineGranularity {
    Min1,
    Min3,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Day1,
    Week1,
    Month1,
}

impl KlineGranularity {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Min1 => "0",
            Self::Min5 => "1",
            Self::Min15 => "2",
            Self::Hour1 => "3",
            Self::Hour4 => "4",
            Self::Day1 => "5",
            Self::Week1 => "6",
            Self::Min3 => "7",
            Self::Min30 => "8",
            Self::Month1 => "9",
        }
    }
}

/// Latest trading summary for one contract.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PerpTicker {
    pub contract_id: i64,
    pub name: String,
    pub base_coin: String,
    pub quote_coin: String,
    pub price_coin: String,
    pub max_leverage: i64,
    pub contract_size: f64,
    pub last_price: f64,
    pub high: f64,
    pub low: f64,
    pub rise_fall_rate: f64,
    pub total_volume: f64,
    pub fair_price: f64,
}

/// Contract listing entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Instrument {
    pub base: String,
    pub quote: String,
    pub name: String,
    pub index_id: i64,
    pub default_leverage: i64,
    pub max_leverage: i64,
    pub min_leverage: i64,
    pub leverage: Vec<i64>,
    pub maker_fee: f64,
    pub taker_fee: f64,
    pub min_size: f64,
    pub max_position: f64,
    pub one_lot_margin: f64,
    pub one_max_position: f64,
    pub price_precision: i64,
    pub default_stop_loss_rate: f64,
    pub default_stop_profit_rate: f64,
    pub status: String,
}

/// An open or historical position.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    pub id: Option<Value>,
    pub instrument: String,
    pub base: String,
    pub direction: String,
    pub leverage: i64,
    pub margin: f64,
    pub position_margin: f64,
    pub open_price: f64,
    pub index_price: f64,
    pub position_model: i64,
    pub quantity: Option<Value>,
    pub quantity_unit: i64,
    pub status: String,
    pub total_piece: f64,
    pub current_piece: f64,
    pub closed_piece: f64,
    pub profit_unreal: f64,
    pub fee: f64,
    pub funding_settle: f64,
    pub created_date: Option<i64>,
}

/// Contract account assets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserAssets {
    pub user_id: Option<i64>,
    pub available_margin: f64,
    pub available_usdt: f64,
    pub almighty_gold: f64,
    pub al_margin: f64,
    pub al_freeze: f64,
    pub time: Option<i64>,
}

/// Contract account fee rates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountFees {
    pub user_id: Option<i64>,
    pub maker_fee: f64,
    pub taker_fee: f64,
}

/// Maximum available contract size for both directions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaxOrderSize {
    pub max_buy: f64,
    pub max_sell: f64,
}
