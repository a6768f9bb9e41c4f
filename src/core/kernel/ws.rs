use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::{WsCodec, WsFrame};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// WebSocket connection configuration
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Max reconnection attempts before the client gives up
    pub max_reconnect_attempts: u32,
    /// Base reconnection delay in milliseconds; attempt k waits k times this
    pub reconnect_delay_ms: u64,
    /// Capacity of the outbound event channel
    pub event_buffer: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            max_reconnect_attempts: 5,
            reconnect_delay_ms: 2_000,
            event_buffer: 1024,
        }
    }
}

/// Connection lifecycle states, observable through [`WsClient::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Authenticated,
}

/// Credentials for the private-channel login handshake.
#[derive(Debug, Clone)]
pub struct WsCredentials {
    pub api_key: String,
    pub passphrase: String,
}

/// Typed events delivered to the caller instead of callbacks.
#[derive(Debug, Clone)]
pub enum WsEvent {
    /// The socket (re)connected and registered subscriptions were replayed.
    Open,
    /// A decoded data frame.
    Message(Value),
    /// Outcome of the private-channel login handshake.
    Login { success: bool, message: String },
    /// The connection dropped; reconnection follows unless the ceiling was hit.
    Closed { reason: Option<String> },
    /// The reconnect ceiling was reached; the client stays disconnected.
    ReconnectFailed { attempts: u32 },
}

/// A registered subscription, retained for replay across reconnects.
#[derive(Debug, Clone)]
pub struct SubscriptionEntry {
    pub key: String,
    pub params: Value,
    pub private: bool,
}

enum Command {
    Subscribe { params: Value, private: bool },
    Unsubscribe { params: Value },
    Close,
}

enum PumpExit {
    Closed(Option<String>),
    Shutdown,
}

enum Flow {
    Continue,
    Stop,
}

/// Handle to a managed WebSocket connection.
///
/// The socket and the subscription registry are owned by a single actor
/// task; `subscribe`, `unsubscribe` and `close` are commands on a channel,
/// so they may be called from any task without racing the receive loop or a
/// reconnect in flight.
pub struct WsClient {
    cmd_tx: mpsc::Sender<Command>,
    state_rx: watch::Receiver<ConnectionState>,
    task: JoinHandle<()>,
}

impl WsClient {
    /// Open the connection and spawn the receive loop.
    ///
    /// Blocks the caller until the connection is established, bounded by
    /// `config.connect_timeout_ms`. Returns the handle plus the receiver of
    /// decoded [`WsEvent`]s.
    pub async fn connect<C: WsCodec>(
        url: impl Into<String>,
        api_family: impl Into<String>,
        codec: C,
        credentials: Option<WsCredentials>,
        config: WsConfig,
    ) -> Result<(Self, mpsc::Receiver<WsEvent>), ExchangeError> {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);

        let connect_timeout = Duration::from_millis(config.connect_timeout_ms);

        let connection = Connection {
            url: url.into(),
            api_family: api_family.into(),
            codec,
            credentials,
            config,
            registry: BTreeMap::new(),
            authenticated: false,
            login_sent: false,
        };
        let task = tokio::spawn(connection.run(cmd_rx, event_tx, state_tx));

        let mut state = state_rx.clone();
        let wait_connected = async {
            loop {
                if matches!(
                    *state.borrow(),
                    ConnectionState::Connected | ConnectionState::Authenticated
                ) {
                    return Ok(());
                }
                if state.changed().await.is_err() {
                    return Err(ExchangeError::NetworkError(
                        "WebSocket connection failed".to_string(),
                    ));
                }
            }
        };

        match tokio::time::timeout(connect_timeout, wait_connected).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                task.abort();
                return Err(ExchangeError::NetworkError(
                    "WebSocket connection timeout".to_string(),
                ));
            }
        }

        Ok((
            Self {
                cmd_tx,
                state_rx,
                task,
            },
            event_rx,
        ))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    pub fn is_connected(&self) -> bool {
        matches!(
            self.state(),
            ConnectionState::Connected | ConnectionState::Authenticated
        )
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == ConnectionState::Authenticated
    }

    /// Register and send a public channel subscription.
    ///
    /// The entry is retained and replayed after every reconnect until
    /// [`unsubscribe`](Self::unsubscribe) removes it. When invoked while
    /// disconnected, the frame is sent on the next successful open.
    pub async fn subscribe(&self, params: Value) -> Result<(), ExchangeError> {
        self.send_command(Command::Subscribe {
            params,
            private: false,
        })
        .await
    }

    /// Register a private channel subscription.
    ///
    /// The subscribe frame is deferred until the login handshake completes.
    pub async fn subscribe_private(&self, params: Value) -> Result<(), ExchangeError> {
        self.send_command(Command::Subscribe {
            params,
            private: true,
        })
        .await
    }

    /// Send an unsubscribe frame and drop the registry entry.
    pub async fn unsubscribe(&self, params: Value) -> Result<(), ExchangeError> {
        self.send_command(Command::Unsubscribe { params }).await
    }

    /// Stop the receive loop and close the socket. Joins the actor task.
    pub async fn close(self) -> Result<(), ExchangeError> {
        // The actor may already have stopped after exhausting reconnects.
        let _ = self.cmd_tx.send(Command::Close).await;
        let _ = self.task.await;
        Ok(())
    }

    async fn send_command(&self, command: Command) -> Result<(), ExchangeError> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| ExchangeError::NetworkError("WebSocket client is closed".to_string()))
    }
}

struct Connection<C: WsCodec> {
    url: String,
    api_family: String,
    codec: C,
    credentials: Option<WsCredentials>,
    config: WsConfig,
    registry: BTreeMap<String, SubscriptionEntry>,
    authenticated: bool,
    login_sent: bool,
}

impl<C: WsCodec> Connection<C> {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<WsEvent>,
        state_tx: watch::Sender<ConnectionState>,
    ) {
        let mut attempts: u32 = 0;
        let mut ever_connected = false;

        loop {
            let _ = state_tx.send(ConnectionState::Connecting);

            match self.open_socket().await {
                Ok(ws_stream) => {
                    ever_connected = true;
                    attempts = 0;
                    self.authenticated = false;
                    self.login_sent = false;

                    let (mut sink, mut source) = ws_stream.split();
                    let _ = state_tx.send(ConnectionState::Connected);
                    info!(api_family = %self.api_family, "WebSocket connection established");
                    if event_tx.send(WsEvent::Open).await.is_err() {
                        return;
                    }

                    if let Err(e) = self.replay_subscriptions(&mut sink).await {
                        warn!(api_family = %self.api_family, "failed to replay subscriptions: {}", e);
                    }

                    let exit = self
                        .pump(&mut sink, &mut source, &mut cmd_rx, &event_tx, &state_tx)
                        .await;
                    let _ = state_tx.send(ConnectionState::Disconnected);

                    match exit {
                        PumpExit::Shutdown => {
                            let _ = sink.send(Message::Close(None)).await;
                            info!(api_family = %self.api_family, "WebSocket connection closed");
                            return;
                        }
                        PumpExit::Closed(reason) => {
                            info!(api_family = %self.api_family, ?reason, "WebSocket connection lost");
                            let _ = event_tx.send(WsEvent::Closed { reason }).await;
                        }
                    }
                }
                Err(e) => {
                    error!(api_family = %self.api_family, "WebSocket connection failed: {}", e);
                    let _ = state_tx.send(ConnectionState::Disconnected);
                    if !ever_connected {
                        // Initial connect failure surfaces through connect().
                        return;
                    }
                }
            }

            attempts += 1;
            if attempts > self.config.max_reconnect_attempts {
                let _ = event_tx
                    .send(WsEvent::ReconnectFailed {
                        attempts: self.config.max_reconnect_attempts,
                    })
                    .await;
                return;
            }

            info!(api_family = %self.api_family, attempt = attempts, "reconnecting");
            if matches!(self.backoff(attempts, &mut cmd_rx).await, Flow::Stop) {
                return;
            }
        }
    }

    async fn open_socket(
        &self,
    ) -> Result<WebSocketStream<MaybeTlsStream<TcpStream>>, ExchangeError> {
        let connect_timeout = Duration::from_millis(self.config.connect_timeout_ms);

        let (ws_stream, _) = tokio::time::timeout(connect_timeout, connect_async(&self.url))
            .await
            .map_err(|_| {
                ExchangeError::NetworkError("WebSocket connection timeout".to_string())
            })?
            .map_err(|e| {
                ExchangeError::NetworkError(format!("WebSocket connection failed: {}", e))
            })?;

        Ok(ws_stream)
    }

    /// Linear backoff: attempt k waits k times the base delay. Registry
    /// mutations arriving while disconnected are applied for the next open.
    async fn backoff(&mut self, attempts: u32, cmd_rx: &mut mpsc::Receiver<Command>) -> Flow {
        let delay = Duration::from_millis(self.config.reconnect_delay_ms * u64::from(attempts));
        let deadline = Instant::now() + delay;

        loop {
            tokio::select! {
                _ = sleep_until(deadline) => return Flow::Continue,
                cmd = cmd_rx.recv() => match cmd {
                    None | Some(Command::Close) => return Flow::Stop,
                    Some(Command::Subscribe { params, private }) => {
                        self.insert_entry(params, private);
                    }
                    Some(Command::Unsubscribe { params }) => {
                        let key = self.codec.channel_key(&params);
                        self.registry.remove(&key);
                    }
                },
            }
        }
    }

    fn insert_entry(&mut self, params: Value, private: bool) -> SubscriptionEntry {
        let key = self.codec.channel_key(&params);
        let entry = SubscriptionEntry {
            key: key.clone(),
            params,
            private,
        };
        self.registry.insert(key, entry.clone());
        entry
    }

    /// Resend every registered public channel; private channels wait for the
    /// login ack before their frames go out.
    async fn replay_subscriptions(&mut self, sink: &mut WsSink) -> Result<(), ExchangeError> {
        let entries: Vec<SubscriptionEntry> = self.registry.values().cloned().collect();
        for entry in &entries {
            if !entry.private {
                self.send_subscribe(sink, entry).await?;
            }
        }

        if entries.iter().any(|e| e.private) {
            self.send_login(sink).await?;
        }

        Ok(())
    }

    async fn send_subscribe(
        &self,
        sink: &mut WsSink,
        entry: &SubscriptionEntry,
    ) -> Result<(), ExchangeError> {
        let message = self.codec.encode_subscribe(&entry.params)?;
        debug!(api_family = %self.api_family, key = %entry.key, "sending subscribe frame");
        sink.send(message)
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("WebSocket send failed: {}", e)))
    }

    async fn send_login(&mut self, sink: &mut WsSink) -> Result<(), ExchangeError> {
        match &self.credentials {
            Some(credentials) => {
                let message = self
                    .codec
                    .encode_login(&credentials.api_key, &credentials.passphrase)?;
                sink.send(message).await.map_err(|e| {
                    ExchangeError::NetworkError(format!("WebSocket send failed: {}", e))
                })?;
                self.login_sent = true;
                debug!(api_family = %self.api_family, "sent authentication request");
                Ok(())
            }
            None => {
                warn!(api_family = %self.api_family, "private subscription requires credentials; login skipped");
                Ok(())
            }
        }
    }

    /// Send every deferred private subscription after a successful login.
    async fn flush_private(&self, sink: &mut WsSink) -> Result<(), ExchangeError> {
        let entries: Vec<SubscriptionEntry> = self
            .registry
            .values()
            .filter(|e| e.private)
            .cloned()
            .collect();
        for entry in &entries {
            self.send_subscribe(sink, entry).await?;
        }
        Ok(())
    }

    async fn pump(
        &mut self,
        sink: &mut WsSink,
        source: &mut WsSource,
        cmd_rx: &mut mpsc::Receiver<Command>,
        event_tx: &mpsc::Sender<WsEvent>,
        state_tx: &watch::Sender<ConnectionState>,
    ) -> PumpExit {
        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    None | Some(Command::Close) => return PumpExit::Shutdown,
                    Some(Command::Subscribe { params, private }) => {
                        let entry = self.insert_entry(params, private);
                        let result = if private && !self.authenticated {
                            // Deferred until the login ack arrives.
                            if self.login_sent {
                                Ok(())
                            } else {
                                self.send_login(sink).await
                            }
                        } else {
                            self.send_subscribe(sink, &entry).await
                        };
                        if let Err(e) = result {
                            return PumpExit::Closed(Some(e.to_string()));
                        }
                    }
                    Some(Command::Unsubscribe { params }) => {
                        let key = self.codec.channel_key(&params);
                        self.registry.remove(&key);
                        match self.codec.encode_unsubscribe(&params) {
                            Ok(message) => {
                                debug!(api_family = %self.api_family, key = %key, "sending unsubscribe frame");
                                if let Err(e) = sink.send(message).await {
                                    return PumpExit::Closed(Some(e.to_string()));
                                }
                            }
                            Err(e) => warn!(api_family = %self.api_family, "failed to encode unsubscribe frame: {}", e),
                        }
                    }
                },
                inbound = source.next() => match inbound {
                    None => return PumpExit::Closed(None),
                    Some(Err(e)) => return PumpExit::Closed(Some(e.to_string())),
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = sink.send(Message::Pong(data)).await {
                            return PumpExit::Closed(Some(e.to_string()));
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(frame))) => {
                        return PumpExit::Closed(frame.map(|f| f.reason.to_string()));
                    }
                    Some(Ok(message)) => match self.codec.decode(message) {
                        Ok(Some(WsFrame::LoginAck { success, message })) => {
                            if success {
                                self.authenticated = true;
                                let _ = state_tx.send(ConnectionState::Authenticated);
                                info!(api_family = %self.api_family, "private channel authentication succeeded");
                                if let Err(e) = self.flush_private(sink).await {
                                    return PumpExit::Closed(Some(e.to_string()));
                                }
                            } else {
                                error!(api_family = %self.api_family, "private channel authentication failed: {}", message);
                            }
                            if event_tx.send(WsEvent::Login { success, message }).await.is_err() {
                                return PumpExit::Shutdown;
                            }
                        }
                        Ok(Some(WsFrame::Data(value))) => {
                            if event_tx.send(WsEvent::Message(value)).await.is_err() {
                                return PumpExit::Shutdown;
                            }
                        }
                        Ok(None) => {}
                        // Malformed frames are logged and dropped; they do
                        // not terminate the connection.
                        Err(e) => warn!(api_family = %self.api_family, "dropping malformed frame: {}", e),
                    },
                },
            }
        }
    }
}
