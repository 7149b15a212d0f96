//! Quote context
//!
//! The client-facing handle. Wires one store, one dispatcher and one
//! subscription coordinator onto a transport, and exposes subscription
//! control, push callbacks, cached reads and pull queries.
//!
//! ```text
//!   transport push ──► PushDispatcher ──► MarketDataStore ◄── realtime_*()
//!                             │
//!                             └──► on_quote / on_depth / ...
//!
//!   subscribe() ──► SubscriptionCoordinator ──► transport.request()
//!   reconnect   ──► SubscriptionCoordinator::resubscribe()
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use types::calendar::{Market, MarketTradingDay, MarketTradingSession};
use types::depth::{PushBrokers, PushDepth, SecurityBrokers, SecurityDepth};
use types::derivative::{IssuerInfo, OptionQuote, StrikePriceInfo, WarrantQuote};
use types::errors::QuoteError;
use types::ids::Symbol;
use types::quote::{PushQuote, Quote, SecurityQuote};
use types::reference::{AdjustType, Candlestick, IntradayLine, ParticipantInfo, Period, StaticInfo};
use types::topic::{Topic, TopicSet};
use types::trade::{PushTrade, Trade};

use crate::config::QuoteConfig;
use crate::dispatch::PushDispatcher;
use crate::metrics::{MetricsSnapshot, QuoteMetrics};
use crate::store::MarketDataStore;
use crate::subscription::{ResubscribeReport, SubscriptionCoordinator};
use crate::transport::{call, Command, QuoteTransport};
use crate::wire::query::{
    EmptyRequest, HistoryCandlestickRequest, IssuerInfoResponse, MarketTradeDayRequest,
    MarketTradeDayResponse, MarketTradePeriodResponse, MultiSecurityRequest,
    OptionChainDateListResponse, OptionChainDateStrikeInfoRequest,
    OptionChainDateStrikeInfoResponse, OptionQuoteResponse, ParticipantsResponse,
    SecurityBrokersResponse, SecurityCandlestickRequest, SecurityCandlestickResponse,
    SecurityDepthResponse, SecurityIntradayResponse, SecurityQuoteResponse, SecurityRequest,
    SecurityTradeRequest, SecurityTradeResponse, StaticInfoResponse, WarrantQuoteResponse,
};
use crate::wire::{decode, encode};

fn to_symbols<I>(symbols: I) -> Vec<Symbol>
where
    I: IntoIterator,
    I::Item: Into<Symbol>,
{
    symbols.into_iter().map(Into::into).collect()
}

pub struct QuoteContext {
    transport: Arc<dyn QuoteTransport>,
    config: QuoteConfig,
    metrics: Arc<QuoteMetrics>,
    store: Arc<MarketDataStore>,
    dispatcher: Arc<PushDispatcher>,
    coordinator: Arc<SubscriptionCoordinator>,
}

impl QuoteContext {
    /// Validate `config`, then attach a fresh store, dispatcher and
    /// coordinator to `transport`.
    pub fn new(transport: Arc<dyn QuoteTransport>, config: QuoteConfig) -> Result<Self, QuoteError> {
        config.validate()?;

        let metrics = Arc::new(QuoteMetrics::new());
        let store = Arc::new(MarketDataStore::new(Arc::clone(&metrics)));
        let dispatcher = Arc::new(PushDispatcher::new(Arc::clone(&store), Arc::clone(&metrics)));
        let coordinator = Arc::new(SubscriptionCoordinator::new(
            Arc::clone(&transport),
            config.request_timeout,
            Arc::clone(&metrics),
        ));

        dispatcher.attach(transport.as_ref());
        coordinator.attach();

        info!(
            quote_url = %config.quote_url,
            request_timeout_ms = config.request_timeout.as_millis() as u64,
            "Quote context ready"
        );

        Ok(Self {
            transport,
            config,
            metrics,
            store,
            dispatcher,
            coordinator,
        })
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    // -- Callbacks ----------------------------------------------------------

    /// Set the quote push callback, replacing any previous one.
    ///
    /// Callbacks run on the transport's delivery context; a slow callback
    /// delays every later push.
    pub fn on_quote<F>(&self, f: F)
    where
        F: Fn(&PushQuote) + Send + Sync + 'static,
    {
        self.dispatcher.set_quote_handler(Arc::new(f));
    }

    pub fn on_depth<F>(&self, f: F)
    where
        F: Fn(&PushDepth) + Send + Sync + 'static,
    {
        self.dispatcher.set_depth_handler(Arc::new(f));
    }

    pub fn on_brokers<F>(&self, f: F)
    where
        F: Fn(&PushBrokers) + Send + Sync + 'static,
    {
        self.dispatcher.set_brokers_handler(Arc::new(f));
    }

    pub fn on_trades<F>(&self, f: F)
    where
        F: Fn(&PushTrade) + Send + Sync + 'static,
    {
        self.dispatcher.set_trade_handler(Arc::new(f));
    }

    // -- Subscriptions ------------------------------------------------------

    pub async fn subscribe<I>(
        &self,
        symbols: I,
        topics: &[Topic],
        is_first_push: bool,
    ) -> Result<(), QuoteError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        self.coordinator
            .subscribe(&to_symbols(symbols), topics, is_first_push)
            .await
    }

    pub async fn subscribe_with_timeout<I>(
        &self,
        symbols: I,
        topics: &[Topic],
        is_first_push: bool,
        timeout: Duration,
    ) -> Result<(), QuoteError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        self.coordinator
            .subscribe_with_timeout(&to_symbols(symbols), topics, is_first_push, timeout)
            .await
    }

    pub async fn unsubscribe<I>(
        &self,
        symbols: I,
        topics: &[Topic],
        unsubscribe_all: bool,
    ) -> Result<(), QuoteError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        self.coordinator
            .unsubscribe(&to_symbols(symbols), topics, unsubscribe_all)
            .await
    }

    pub async fn unsubscribe_with_timeout<I>(
        &self,
        symbols: I,
        topics: &[Topic],
        unsubscribe_all: bool,
        timeout: Duration,
    ) -> Result<(), QuoteError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        self.coordinator
            .unsubscribe_with_timeout(&to_symbols(symbols), topics, unsubscribe_all, timeout)
            .await
    }

    /// Server-side subscription state.
    pub async fn subscriptions(&self) -> Result<BTreeMap<Symbol, Vec<Topic>>, QuoteError> {
        self.coordinator.subscriptions().await
    }

    /// Locally recorded subscriptions, as replayed on reconnect.
    pub fn local_subscriptions(&self) -> BTreeMap<Symbol, TopicSet> {
        self.coordinator.local_subscriptions()
    }

    /// Replay the recorded subscriptions now. The transport does this on
    /// its own after every reconnect.
    pub async fn resubscribe(&self) -> ResubscribeReport {
        self.coordinator.resubscribe().await
    }

    // -- Cached reads -------------------------------------------------------

    /// Latest merged quote per symbol. Symbols without a quote are skipped.
    pub fn realtime_quote<I>(&self, symbols: I) -> Vec<Quote>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        symbols
            .into_iter()
            .filter_map(|symbol| self.store.get_quote(symbol.as_ref()))
            .collect()
    }

    pub fn realtime_depth(&self, symbol: impl AsRef<str>) -> SecurityDepth {
        let symbol = symbol.as_ref();
        let (ask, bid) = self.store.get_depth(symbol);
        SecurityDepth {
            symbol: Symbol::new(symbol),
            ask,
            bid,
        }
    }

    /// The last `count` cached trades, oldest first; `0` returns all of them.
    pub fn realtime_trades(&self, symbol: impl AsRef<str>, count: usize) -> Vec<Trade> {
        self.store.get_recent_trades(symbol.as_ref(), count)
    }

    pub fn realtime_brokers(&self, symbol: impl AsRef<str>) -> SecurityBrokers {
        let symbol = symbol.as_ref();
        let (ask_brokers, bid_brokers) = self.store.get_brokers(symbol);
        SecurityBrokers {
            symbol: Symbol::new(symbol),
            ask_brokers,
            bid_brokers,
        }
    }

    // -- Pull queries -------------------------------------------------------

    async fn query<Req, Resp>(&self, command: Command, request: &Req) -> Result<Resp, QuoteError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let body = encode(command.label(), request)?;
        let reply = call(
            self.transport.as_ref(),
            command,
            body,
            self.config.request_timeout,
        )
        .await?;
        Ok(decode(command.label(), &reply)?)
    }

    pub async fn static_info<I>(&self, symbols: I) -> Result<Vec<StaticInfo>, QuoteError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let request = MultiSecurityRequest::new(&to_symbols(symbols));
        let response: StaticInfoResponse = self.query(Command::QueryStaticInfo, &request).await?;
        Ok(response.into_domain()?)
    }

    pub async fn quote<I>(&self, symbols: I) -> Result<Vec<SecurityQuote>, QuoteError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let request = MultiSecurityRequest::new(&to_symbols(symbols));
        let response: SecurityQuoteResponse = self.query(Command::QueryQuote, &request).await?;
        Ok(response.into_domain()?)
    }

    pub async fn option_quote<I>(&self, symbols: I) -> Result<Vec<OptionQuote>, QuoteError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let request = MultiSecurityRequest::new(&to_symbols(symbols));
        let response: OptionQuoteResponse = self.query(Command::QueryOptionQuote, &request).await?;
        Ok(response.into_domain()?)
    }

    /// HK warrant quotes with their contract details.
    pub async fn warrant_quote<I>(&self, symbols: I) -> Result<Vec<WarrantQuote>, QuoteError>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let request = MultiSecurityRequest::new(&to_symbols(symbols));
        let response: WarrantQuoteResponse =
            self.query(Command::QueryWarrantQuote, &request).await?;
        Ok(response.into_domain()?)
    }

    pub async fn depth(&self, symbol: impl Into<Symbol>) -> Result<SecurityDepth, QuoteError> {
        let request = SecurityRequest::new(&symbol.into());
        let response: SecurityDepthResponse = self.query(Command::QueryDepth, &request).await?;
        Ok(response.into_domain()?)
    }

    pub async fn brokers(&self, symbol: impl Into<Symbol>) -> Result<SecurityBrokers, QuoteError> {
        let request = SecurityRequest::new(&symbol.into());
        let response: SecurityBrokersResponse = self.query(Command::QueryBrokers, &request).await?;
        Ok(response.into())
    }

    pub async fn participants(&self) -> Result<Vec<ParticipantInfo>, QuoteError> {
        let response: ParticipantsResponse = self
            .query(Command::QueryParticipants, &EmptyRequest::default())
            .await?;
        Ok(response.into())
    }

    pub async fn trades(
        &self,
        symbol: impl Into<Symbol>,
        count: u32,
    ) -> Result<Vec<Trade>, QuoteError> {
        let request = SecurityTradeRequest::new(&symbol.into(), count);
        let response: SecurityTradeResponse = self.query(Command::QueryTrade, &request).await?;
        Ok(response.into_domain()?)
    }

    pub async fn intraday(&self, symbol: impl Into<Symbol>) -> Result<Vec<IntradayLine>, QuoteError> {
        let request = SecurityRequest::new(&symbol.into());
        let response: SecurityIntradayResponse = self.query(Command::QueryIntraday, &request).await?;
        Ok(response.into_domain()?)
    }

    pub async fn candlesticks(
        &self,
        symbol: impl Into<Symbol>,
        period: Period,
        count: u32,
        adjust: AdjustType,
    ) -> Result<Vec<Candlestick>, QuoteError> {
        let request = SecurityCandlestickRequest::new(&symbol.into(), period, count, adjust);
        let response: SecurityCandlestickResponse =
            self.query(Command::QueryCandlestick, &request).await?;
        Ok(response.into_domain()?)
    }

    /// Up to `count` candlesticks after (`forward`) or before `at`. With no
    /// `at` the server counts back from the latest candlestick.
    pub async fn history_candlesticks_by_offset(
        &self,
        symbol: impl Into<Symbol>,
        period: Period,
        adjust: AdjustType,
        forward: bool,
        at: Option<NaiveDateTime>,
        count: u32,
    ) -> Result<Vec<Candlestick>, QuoteError> {
        let request =
            HistoryCandlestickRequest::by_offset(&symbol.into(), period, adjust, forward, at, count);
        let response: SecurityCandlestickResponse =
            self.query(Command::QueryHistoryCandlestick, &request).await?;
        Ok(response.into_domain()?)
    }

    /// Candlesticks between `start` and `end` inclusive; either bound may be open.
    pub async fn history_candlesticks_by_date(
        &self,
        symbol: impl Into<Symbol>,
        period: Period,
        adjust: AdjustType,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Candlestick>, QuoteError> {
        let request = HistoryCandlestickRequest::by_date(&symbol.into(), period, adjust, start, end);
        let response: SecurityCandlestickResponse =
            self.query(Command::QueryHistoryCandlestick, &request).await?;
        Ok(response.into_domain()?)
    }

    pub async fn option_chain_expiry_dates(
        &self,
        symbol: impl Into<Symbol>,
    ) -> Result<Vec<NaiveDate>, QuoteError> {
        let request = SecurityRequest::new(&symbol.into());
        let response: OptionChainDateListResponse =
            self.query(Command::QueryOptionChainDate, &request).await?;
        Ok(response.into_domain()?)
    }

    /// Strikes of the option chain expiring on `expiry_date`.
    pub async fn option_chain_info_by_date(
        &self,
        symbol: impl Into<Symbol>,
        expiry_date: NaiveDate,
    ) -> Result<Vec<StrikePriceInfo>, QuoteError> {
        let request = OptionChainDateStrikeInfoRequest::new(&symbol.into(), expiry_date);
        let response: OptionChainDateStrikeInfoResponse = self
            .query(Command::QueryOptionChainDateStrikeInfo, &request)
            .await?;
        Ok(response.into_domain()?)
    }

    pub async fn warrant_issuers(&self) -> Result<Vec<IssuerInfo>, QuoteError> {
        let response: IssuerInfoResponse = self
            .query(Command::QueryWarrantIssuerInfo, &EmptyRequest::default())
            .await?;
        Ok(response.into())
    }

    /// Daily trading windows of every market.
    pub async fn trading_session(&self) -> Result<Vec<MarketTradingSession>, QuoteError> {
        let response: MarketTradePeriodResponse = self
            .query(Command::QueryMarketTradePeriod, &EmptyRequest::default())
            .await?;
        Ok(response.into())
    }

    pub async fn trading_days(
        &self,
        market: Market,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<MarketTradingDay, QuoteError> {
        let request = MarketTradeDayRequest::new(market, begin, end);
        let response: MarketTradeDayResponse =
            self.query(Command::QueryMarketTradeDay, &request).await?;
        Ok(response.into_domain()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;
    use types::errors::{ConfigError, TransportError};
    use types::quote::TradeSession;

    fn context() -> (Arc<MockTransport>, QuoteContext) {
        let transport = Arc::new(MockTransport::new());
        let ctx = QuoteContext::new(
            Arc::clone(&transport) as Arc<dyn QuoteTransport>,
            QuoteConfig::default(),
        )
        .unwrap();
        (transport, ctx)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let transport: Arc<dyn QuoteTransport> = Arc::new(MockTransport::new());
        let config = QuoteConfig::default().with_request_timeout(Duration::ZERO);
        let err = QuoteContext::new(transport, config).err().unwrap();
        assert!(matches!(err, QuoteError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_realtime_quote_skips_missing() {
        let (transport, ctx) = context();
        transport.push_json(
            Command::PushQuote,
            &json!({"symbol": "700.HK", "sequence": 1, "lastDone": "380"}),
        );

        let quotes = ctx.realtime_quote(["700.HK", "AAPL.US"]);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol.as_str(), "700.HK");
    }

    #[test]
    fn test_realtime_depth_and_brokers() {
        let (transport, ctx) = context();
        transport.push_json(
            Command::PushDepth,
            &json!({"symbol": "700.HK", "sequence": 1,
                    "ask": [{"position": 1, "price": "380.2", "volume": 10}],
                    "bid": [{"position": 1, "price": "380.0", "volume": 20}]}),
        );
        transport.push_json(
            Command::PushBrokers,
            &json!({"symbol": "700.HK", "sequence": 1, "bid": [{"position": 1, "brokerIds": [5]}]}),
        );

        let depth = ctx.realtime_depth("700.HK");
        assert_eq!(depth.ask.len(), 1);
        assert_eq!(depth.bid[0].volume, 20);

        let brokers = ctx.realtime_brokers("700.HK");
        assert!(brokers.ask_brokers.is_empty());
        assert_eq!(brokers.bid_brokers[0].broker_ids, vec![5]);

        assert_eq!(depth.symbol.as_str(), "700.HK");
        assert_eq!(brokers.symbol.as_str(), "700.HK");
        assert_eq!(ctx.realtime_depth("AAPL.US"), SecurityDepth::empty("AAPL.US"));
    }

    #[tokio::test]
    async fn test_pull_depth_query() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryDepth,
            &json!({"symbol": "700.HK", "ask": [{"position": 1, "price": "380.2", "volume": 5, "orderNum": 2}]}),
        );

        let depth = ctx.depth("700.HK").await.unwrap();
        assert_eq!(depth.symbol.as_str(), "700.HK");
        assert_eq!(depth.ask[0].order_num, 2);
        assert!(depth.bid.is_empty());

        let sent: SecurityRequest = transport.requests_for(Command::QueryDepth)[0].json().unwrap();
        assert_eq!(sent.symbol, "700.HK");
        // Pull results are not cached
        assert_eq!(ctx.realtime_depth("700.HK"), SecurityDepth::empty("700.HK"));
    }

    #[tokio::test]
    async fn test_pull_trades_query() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryTrade,
            &json!({"symbol": "AAPL.US", "trades": [{"price": "189.5", "volume": 3, "timestamp": 1700000000}]}),
        );

        let trades = ctx.trades("AAPL.US", 10).await.unwrap();
        assert_eq!(trades.len(), 1);
        let sent: SecurityTradeRequest = transport.requests_for(Command::QueryTrade)[0].json().unwrap();
        assert_eq!(sent.count, 10);
    }

    #[tokio::test]
    async fn test_pull_candlesticks_query() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryCandlestick,
            &json!({"symbol": "700.HK", "candlesticks": [
                {"open": "1", "close": "2", "high": "3", "low": "0.5", "volume": 10, "timestamp": 1},
                {"open": "2", "close": "2.5", "high": "3", "low": "1.5", "volume": 12, "timestamp": 2}
            ]}),
        );

        let sticks = ctx
            .candlesticks("700.HK", Period::Week, 2, AdjustType::NoAdjust)
            .await
            .unwrap();
        assert_eq!(sticks.len(), 2);
        assert_eq!(sticks[1].volume, 12);

        let sent: SecurityCandlestickRequest =
            transport.requests_for(Command::QueryCandlestick)[0].json().unwrap();
        assert_eq!(sent.period, 2000);
        assert_eq!(sent.adjust_type, 0);
    }

    #[tokio::test]
    async fn test_pull_static_info_and_participants() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryStaticInfo,
            &json!({"secuStaticInfo": [{"symbol": "700.HK", "nameEn": "Tencent", "lotSize": 100, "eps": "20.1"}]}),
        );
        transport.enqueue_json(
            Command::QueryParticipants,
            &json!({"participantBrokerNumbers": [{"brokerIds": [1], "participantNameEn": "Alpha"}]}),
        );

        let infos = ctx.static_info(["700.HK"]).await.unwrap();
        assert_eq!(infos[0].name_en, "Tencent");
        assert_eq!(infos[0].lot_size, 100);

        let participants = ctx.participants().await.unwrap();
        assert_eq!(participants[0].name_en, "Alpha");
    }

    #[tokio::test]
    async fn test_pull_intraday_and_quote() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryIntraday,
            &json!({"symbol": "700.HK", "lines": [{"price": "380", "timestamp": 1, "volume": 2, "avgPrice": "379.5"}]}),
        );
        transport.enqueue_json(
            Command::QueryQuote,
            &json!({"secuQuote": [{"symbol": "700.HK", "lastDone": "380", "tradeStatus": 0}]}),
        );

        let lines = ctx.intraday("700.HK").await.unwrap();
        assert_eq!(lines.len(), 1);
        let quotes = ctx.quote(["700.HK"]).await.unwrap();
        assert_eq!(quotes[0].symbol.as_str(), "700.HK");
    }

    #[tokio::test]
    async fn test_pull_brokers_query() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryBrokers,
            &json!({"symbol": "700.HK", "bidBrokers": [{"position": 2, "brokerIds": [9]}]}),
        );
        let brokers = ctx.brokers("700.HK").await.unwrap();
        assert_eq!(brokers.bid_brokers[0].position, 2);
    }

    #[tokio::test]
    async fn test_pull_option_and_warrant_quotes() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryOptionQuote,
            &json!({"secuQuote": [{"symbol": "AAPL240621C190000.US", "lastDone": "3.2",
                "optionExtend": {"expiryDate": "20240621", "strikePrice": "190", "direction": "C"}}]}),
        );
        transport.enqueue_json(
            Command::QueryWarrantQuote,
            &json!({"secuQuote": [{"symbol": "13402.HK", "lastDone": "0.12",
                "warrantExtend": {"lastTradeDate": "20241227", "callPrice": "98.5", "underlyingSymbol": "9988.HK"}}]}),
        );

        let options = ctx.option_quote(["AAPL240621C190000.US"]).await.unwrap();
        let extend = options[0].option_extend.as_ref().unwrap();
        assert_eq!(extend.direction, "C");
        assert_eq!(extend.expiry_date, NaiveDate::from_ymd_opt(2024, 6, 21));

        let warrants = ctx.warrant_quote(["13402.HK"]).await.unwrap();
        let extend = warrants[0].warrant_extend.as_ref().unwrap();
        assert_eq!(extend.underlying_symbol.as_str(), "9988.HK");
        assert_eq!(extend.last_trade_date, NaiveDate::from_ymd_opt(2024, 12, 27));

        // Each kind goes out on its own command
        assert_eq!(transport.requests_for(Command::QueryOptionQuote).len(), 1);
        let sent: MultiSecurityRequest =
            transport.requests_for(Command::QueryWarrantQuote)[0].json().unwrap();
        assert_eq!(sent.symbols, vec!["13402.HK"]);
        assert!(transport.requests_for(Command::QueryQuote).is_empty());
    }

    #[tokio::test]
    async fn test_pull_option_chain_queries() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryOptionChainDate,
            &json!({"expiryDate": ["20240614", "20240621"]}),
        );
        transport.enqueue_json(
            Command::QueryOptionChainDateStrikeInfo,
            &json!({"strikePriceInfo": [
                {"price": "190", "callSymbol": "AAPL240621C190000.US", "putSymbol": "AAPL240621P190000.US", "standard": true}
            ]}),
        );

        let dates = ctx.option_chain_expiry_dates("AAPL.US").await.unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            ]
        );

        let strikes = ctx.option_chain_info_by_date("AAPL.US", dates[1]).await.unwrap();
        assert_eq!(strikes.len(), 1);
        assert!(strikes[0].standard);
        assert_eq!(strikes[0].put_symbol.as_str(), "AAPL240621P190000.US");

        let sent: OptionChainDateStrikeInfoRequest = transport
            .requests_for(Command::QueryOptionChainDateStrikeInfo)[0]
            .json()
            .unwrap();
        assert_eq!(sent.expiry_date, "20240621");
    }

    #[tokio::test]
    async fn test_pull_warrant_issuers() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryWarrantIssuerInfo,
            &json!({"issuerInfo": [{"id": 1, "nameEn": "SG Issuer"}, {"id": 2, "nameEn": "BOCI"}]}),
        );
        let issuers = ctx.warrant_issuers().await.unwrap();
        assert_eq!(issuers.len(), 2);
        assert_eq!(issuers[1].id, 2);
        assert_eq!(issuers[0].name_en, "SG Issuer");
    }

    #[tokio::test]
    async fn test_pull_trading_session_and_days() {
        let (transport, ctx) = context();
        transport.enqueue_json(
            Command::QueryMarketTradePeriod,
            &json!({"marketTradeSession": [
                {"market": "HK", "tradeSession": [
                    {"begTime": 930, "endTime": 1200},
                    {"begTime": 1300, "endTime": 1600}
                ]},
                {"market": "US", "tradeSession": [{"begTime": 400, "endTime": 930, "tradeSession": 1}]}
            ]}),
        );
        transport.enqueue_json(
            Command::QueryMarketTradeDay,
            &json!({"tradeDay": ["20240502", "20240503"], "halfTradeDay": ["20240524"]}),
        );

        let sessions = ctx.trading_session().await.unwrap();
        assert_eq!(sessions[0].market, Market::HK);
        assert_eq!(sessions[0].trade_sessions.len(), 2);
        assert_eq!(sessions[1].trade_sessions[0].trade_session, TradeSession::PreMarket);

        let begin = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let days = ctx.trading_days(Market::HK, begin, end).await.unwrap();
        assert_eq!(days.trade_days.len(), 2);
        assert_eq!(days.half_trade_days, vec![NaiveDate::from_ymd_opt(2024, 5, 24).unwrap()]);

        let sent: MarketTradeDayRequest =
            transport.requests_for(Command::QueryMarketTradeDay)[0].json().unwrap();
        assert_eq!(sent.market, "HK");
        assert_eq!(sent.beg_day, "20240501");
        assert_eq!(sent.end_day, "20240601");
    }

    #[tokio::test]
    async fn test_pull_history_candlesticks() {
        let (transport, ctx) = context();
        let sticks = json!({"symbol": "AAPL.US", "candlesticks": [
            {"open": "1", "close": "2", "high": "3", "low": "0.5", "volume": 10, "timestamp": 1}
        ]});
        transport.enqueue_json(Command::QueryHistoryCandlestick, &sticks);
        transport.enqueue_json(Command::QueryHistoryCandlestick, &sticks);

        let at = NaiveDate::from_ymd_opt(2022, 5, 10)
            .unwrap()
            .and_hms_opt(11, 10, 0)
            .unwrap();
        let by_offset = ctx
            .history_candlesticks_by_offset("AAPL.US", Period::Day, AdjustType::NoAdjust, false, Some(at), 100)
            .await
            .unwrap();
        assert_eq!(by_offset.len(), 1);

        let by_date = ctx
            .history_candlesticks_by_date(
                "AAPL.US",
                Period::Day,
                AdjustType::Forward,
                NaiveDate::from_ymd_opt(2022, 5, 10),
                NaiveDate::from_ymd_opt(2022, 6, 10),
            )
            .await
            .unwrap();
        assert_eq!(by_date[0].volume, 10);

        let sent: Vec<HistoryCandlestickRequest> = transport
            .requests_for(Command::QueryHistoryCandlestick)
            .iter()
            .map(|r| r.json().unwrap())
            .collect();
        let offset = sent[0].offset_request.as_ref().unwrap();
        assert_eq!(offset.direction, 0);
        assert_eq!(offset.date, "20220510");
        assert_eq!(offset.minute, "1110");
        assert_eq!(offset.count, 100);
        let dates = sent[1].date_request.as_ref().unwrap();
        assert_eq!(dates.start_date, "20220510");
        assert_eq!(dates.end_date, "20220610");
        assert_eq!(sent[1].adjust_type, 1);
    }

    #[tokio::test]
    async fn test_pull_query_malformed_reply_is_decode_error() {
        let (transport, ctx) = context();
        transport.enqueue_reply(Command::QueryQuote, Ok(b"oops".to_vec()));
        let err = ctx.quote(["700.HK"]).await.unwrap_err();
        assert!(matches!(err, QuoteError::Decode(_)));
    }

    #[tokio::test]
    async fn test_pull_query_transport_error_is_protocol_error() {
        let (transport, ctx) = context();
        transport.enqueue_reply(Command::QueryIntraday, Err(TransportError::Closed));
        let err = ctx.intraday("700.HK").await.unwrap_err();
        assert_eq!(err, QuoteError::protocol("query_intraday", TransportError::Closed));
    }

    #[tokio::test]
    async fn test_local_subscriptions_follow_subscribe() {
        let (_, ctx) = context();
        ctx.subscribe(["700.HK"], &[Topic::Quote], true).await.unwrap();
        assert!(ctx.local_subscriptions().contains_key("700.HK"));
    }
}
