use coinw::core::kernel::{WsClient, WsConfig, WsEvent};
use coinw::exchanges::perp::codec::PerpCodec;
use coinw::exchanges::perp::websocket::channels;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

type FrameLog = Arc<Mutex<Vec<Vec<String>>>>;

/// Local WebSocket server that records every text frame per connection.
///
/// The first connection is closed by the server after `drop_first_after`
/// frames; when `single_connection` is set the listener stops accepting
/// afterwards, so every reconnect attempt is refused.
async fn start_server(
    frames: FrameLog,
    drop_first_after: usize,
    single_connection: bool,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut conn_index = 0usize;
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                continue;
            };

            frames.lock().await.push(Vec::new());
            let index = conn_index;
            conn_index += 1;

            let frames = frames.clone();
            let handle = tokio::spawn(async move {
                let mut count = 0usize;
                while let Some(Ok(message)) = ws.next().await {
                    match message {
                        Message::Text(text) => {
                            frames.lock().await[index].push(text);
                            count += 1;
                            if index == 0 && count >= drop_first_after {
                                let _ = ws.close(None).await;
                                break;
                            }
                        }
                        Message::Ping(data) => {
                            let _ = ws.send(Message::Pong(data)).await;
                        }
                        Message::Close(_) => break,
                        _ => {}
                    }
                }
            });

            if single_connection {
                let _ = handle.await;
                break;
            }
        }
    });

    format!("ws://{}", addr)
}

async fn next_event(events: &mut mpsc::Receiver<WsEvent>) -> WsEvent {
    timeout(Duration::from_secs(10), events.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

async fn wait_for_frames(frames: &FrameLog, connection: usize, count: usize) -> Vec<String> {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        {
            let log = frames.lock().await;
            if log.len() > connection && log[connection].len() >= count {
                return log[connection].clone();
            }
        }
        assert!(Instant::now() < deadline, "timed out waiting for frames");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

fn test_config() -> WsConfig {
    WsConfig {
        connect_timeout_ms: 5_000,
        max_reconnect_attempts: 5,
        reconnect_delay_ms: 50,
        event_buffer: 64,
    }
}

#[tokio::test]
async fn test_reconnect_replays_active_subscriptions_only() {
    let frames: FrameLog = Arc::new(Mutex::new(Vec::new()));
    // Server drops the first connection after the three frames below.
    let url = start_server(frames.clone(), 3, false).await;

    let (client, mut events) = WsClient::connect(url, "perp", PerpCodec, None, test_config())
        .await
        .unwrap();
    assert!(matches!(next_event(&mut events).await, WsEvent::Open));

    client.subscribe(channels::ticker("BTC")).await.unwrap();
    client.subscribe(channels::depth("BTC")).await.unwrap();
    client.unsubscribe(channels::depth("BTC")).await.unwrap();

    let first_conn = wait_for_frames(&frames, 0, 3).await;
    assert_eq!(first_conn.len(), 3);
    assert!(first_conn[0].contains("ticker_swap"));
    assert!(first_conn[1].contains("depth"));
    assert!(first_conn[2].contains("unsub"));

    // Server closes; the client reconnects and replays the registry.
    assert!(matches!(next_event(&mut events).await, WsEvent::Closed { .. }));
    assert!(matches!(next_event(&mut events).await, WsEvent::Open));

    let second_conn = wait_for_frames(&frames, 1, 1).await;
    // Exactly the one still-registered subscription, with an identical payload.
    assert_eq!(second_conn, vec![first_conn[0].clone()]);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_reconnect_replays_every_active_subscription() {
    let frames: FrameLog = Arc::new(Mutex::new(Vec::new()));
    let url = start_server(frames.clone(), 3, false).await;

    let (client, mut events) = WsClient::connect(url, "perp", PerpCodec, None, test_config())
        .await
        .unwrap();
    assert!(matches!(next_event(&mut events).await, WsEvent::Open));

    client.subscribe(channels::ticker("BTC")).await.unwrap();
    client.subscribe(channels::ticker("ETH")).await.unwrap();
    client.subscribe(channels::fills("BTC")).await.unwrap();

    let first_conn = wait_for_frames(&frames, 0, 3).await;

    assert!(matches!(next_event(&mut events).await, WsEvent::Closed { .. }));
    assert!(matches!(next_event(&mut events).await, WsEvent::Open));

    let mut second_conn = wait_for_frames(&frames, 1, 3).await;
    let mut expected = first_conn.clone();
    expected.sort();
    second_conn.sort();
    assert_eq!(second_conn, expected);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_data_frames_are_delivered_as_events() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        ws.send(Message::Text(
            r#"{"biz":"futures","type":"ticker_swap","data":{"last_price":60000}}"#.to_string(),
        ))
        .await
        .unwrap();
        // Malformed frame: logged and dropped, must not kill the connection.
        ws.send(Message::Text("{not json".to_string())).await.unwrap();
        ws.send(Message::Text(
            r#"{"biz":"futures","type":"ticker_swap","data":{"last_price":60001}}"#.to_string(),
        ))
        .await
        .unwrap();
        // Keep the socket open until the client closes it.
        while let Some(Ok(message)) = ws.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    let url = format!("ws://{}", addr);
    let (client, mut events) = WsClient::connect(url, "perp", PerpCodec, None, test_config())
        .await
        .unwrap();

    assert!(matches!(next_event(&mut events).await, WsEvent::Open));

    let WsEvent::Message(first) = next_event(&mut events).await else {
        panic!("expected a data event");
    };
    assert_eq!(first["data"]["last_price"], 60000);

    // The malformed frame was dropped; the next event is the second ticker.
    let WsEvent::Message(second) = next_event(&mut events).await else {
        panic!("expected a data event");
    };
    assert_eq!(second["data"]["last_price"], 60001);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_gives_up_after_reconnect_ceiling_with_linear_backoff() {
    let frames: FrameLog = Arc::new(Mutex::new(Vec::new()));
    // One connection only; it is dropped after the first frame and every
    // reconnect attempt is refused.
    let url = start_server(frames.clone(), 1, true).await;

    let config = WsConfig {
        connect_timeout_ms: 2_000,
        max_reconnect_attempts: 2,
        reconnect_delay_ms: 40,
        event_buffer: 64,
    };

    let (client, mut events) = WsClient::connect(url, "perp", PerpCodec, None, config)
        .await
        .unwrap();
    assert!(matches!(next_event(&mut events).await, WsEvent::Open));

    client.subscribe(channels::ticker("BTC")).await.unwrap();

    assert!(matches!(next_event(&mut events).await, WsEvent::Closed { .. }));
    let closed_at = Instant::now();

    match next_event(&mut events).await {
        WsEvent::ReconnectFailed { attempts } => assert_eq!(attempts, 2),
        other => panic!("unexpected event: {:?}", other),
    }

    // Linear backoff: attempt 1 waits 40ms, attempt 2 waits 80ms.
    assert!(closed_at.elapsed() >= Duration::from_millis(120));

    // The actor has exited; the handle reports the channel as closed.
    assert!(client.subscribe(channels::ticker("ETH")).await.is_err());
}
