//! End-to-end tests against a scripted mock node over a real WebSocket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::header::{
    HeaderName, HeaderValue, ORIGIN, SEC_WEBSOCKET_PROTOCOL,
};

use lit_client::{ClientError, ClientSettings, ConnectionState, ListeningStatus, LitClient};
use lit_core::logging::capture_logs;
use tracing::Level;

const TIMEOUT: Duration = Duration::from_secs(5);

// ── Mock node ──

/// What the mock node sends back for one request.
enum Frame {
    Json(Value),
    Raw(String),
    Close,
}

#[derive(Clone, Debug, Default)]
struct Handshake {
    path: String,
    protocol: Option<String>,
    origin: Option<String>,
}

type Responder = Box<dyn FnMut(&Value) -> Vec<Frame> + Send>;

struct MockNode {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
    handshakes: Arc<Mutex<Vec<Handshake>>>,
    _task: JoinHandle<()>,
}

impl MockNode {
    async fn start(responder: impl FnMut(&Value) -> Vec<Frame> + Send + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handshakes = Arc::new(Mutex::new(Vec::new()));
        let responder: Arc<Mutex<Responder>> = Arc::new(Mutex::new(Box::new(responder)));

        let task = {
            let requests = Arc::clone(&requests);
            let handshakes = Arc::clone(&handshakes);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let requests = Arc::clone(&requests);
                    let handshakes = Arc::clone(&handshakes);
                    let responder = Arc::clone(&responder);
                    let _ = tokio::spawn(async move {
                        let record = Arc::clone(&handshakes);
                        let callback = move |req: &Request, mut resp: Response| -> Result<Response, ErrorResponse> {
                            let header = |name: HeaderName| {
                                req.headers()
                                    .get(name)
                                    .and_then(|v: &HeaderValue| v.to_str().ok())
                                    .map(str::to_owned)
                            };
                            record.lock().push(Handshake {
                                path: req.uri().path().to_owned(),
                                protocol: header(SEC_WEBSOCKET_PROTOCOL),
                                origin: header(ORIGIN),
                            });
                            let _ = resp
                                .headers_mut()
                                .insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static("echo-protocol"));
                            Ok(resp)
                        };
                        let Ok(mut ws) = accept_hdr_async(stream, callback).await else {
                            return;
                        };

                        while let Some(Ok(message)) = ws.next().await {
                            let Message::Text(text) = message else {
                                continue;
                            };
                            let Ok(request) = serde_json::from_str::<Value>(&text) else {
                                continue;
                            };
                            requests.lock().push(request.clone());
                            let frames = {
                                let mut respond = responder.lock();
                                (*respond)(&request)
                            };
                            for frame in frames {
                                let sent = match frame {
                                    Frame::Json(value) => ws.send(Message::Text(value.to_string().into())).await,
                                    Frame::Raw(raw) => ws.send(Message::Text(raw.into())).await,
                                    Frame::Close => ws.close(None).await,
                                };
                                if sent.is_err() {
                                    break;
                                }
                            }
                        }
                    });
                }
            })
        };

        Self {
            addr,
            requests,
            handshakes,
            _task: task,
        }
    }

    fn settings(&self) -> ClientSettings {
        ClientSettings::for_endpoint("127.0.0.1", self.addr.port())
    }

    fn client(&self) -> LitClient {
        LitClient::with_settings(self.settings())
    }

    fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }

    fn handshakes(&self) -> Vec<Handshake> {
        self.handshakes.lock().clone()
    }
}

fn reply(request: &Value, result: Value) -> Frame {
    Frame::Json(json!({"id": request["id"], "error": null, "result": result}))
}

fn error(request: &Value, error: Value) -> Frame {
    Frame::Json(json!({"id": request["id"], "error": error, "result": null}))
}

/// Echo the first params entry back as the result.
fn echo(request: &Value) -> Vec<Frame> {
    vec![reply(request, request["params"][0].clone())]
}

async fn open(node: &MockNode) -> LitClient {
    let client = node.client();
    timeout(TIMEOUT, client.open()).await.unwrap().unwrap();
    client
}

// ── Connection lifecycle ──

#[tokio::test]
async fn handshake_sends_protocol_origin_and_path() {
    let node = MockNode::start(echo).await;
    let client = open(&node).await;

    assert_eq!(client.state(), ConnectionState::Open);
    let handshakes = node.handshakes();
    assert_eq!(handshakes.len(), 1);
    assert_eq!(handshakes[0].path, "/ws");
    assert_eq!(handshakes[0].protocol.as_deref(), Some("echo-protocol"));
    assert_eq!(handshakes[0].origin.as_deref(), Some("http://localhost/"));
}

#[tokio::test]
async fn close_moves_to_closed_and_blocks_further_calls() {
    let node = MockNode::start(echo).await;
    let client = open(&node).await;

    timeout(TIMEOUT, client.close()).await.unwrap().unwrap();
    assert_eq!(client.state(), ConnectionState::Closed);

    let err = client.call("LitRPC.Balance", json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::NotOpen));
    assert!(matches!(client.close().await, Err(ClientError::NotOpen)));
}

#[tokio::test]
async fn pending_call_rejects_when_node_disconnects() {
    let node = MockNode::start(|_| vec![Frame::Close]).await;
    let client = open(&node).await;

    let err = timeout(TIMEOUT, client.call("LitRPC.Stop", json!({})))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, ClientError::ConnectionClosed), "got: {err:?}");
    assert_eq!(client.state(), ConnectionState::Closed);

    let err = client.call("LitRPC.Balance", json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::NotOpen));
}

#[tokio::test]
async fn reopen_after_close_continues_request_ids() {
    let node = MockNode::start(echo).await;
    let client = open(&node).await;
    let _ = client.call("LitRPC.Balance", json!({})).await.unwrap();
    timeout(TIMEOUT, client.close()).await.unwrap().unwrap();

    timeout(TIMEOUT, client.open()).await.unwrap().unwrap();
    let _ = client.call("LitRPC.Balance", json!({})).await.unwrap();

    let ids: Vec<u64> = node.requests().iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(node.handshakes().len(), 2);
    assert_eq!(client.transport().next_request_id(), 2);
}

#[tokio::test]
async fn open_while_open_replaces_connection() {
    let node = MockNode::start(echo).await;
    let client = open(&node).await;

    timeout(TIMEOUT, client.open()).await.unwrap().unwrap();
    assert_eq!(client.state(), ConnectionState::Open);

    let result = timeout(TIMEOUT, client.call("LitRPC.Echo", json!({"A": 1})))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result, json!({"A": 1}));
    assert_eq!(node.handshakes().len(), 2);
}

#[tokio::test]
async fn reopen_after_remote_close_is_quiet() {
    let node = MockNode::start(|_| vec![Frame::Close]).await;
    let client = open(&node).await;
    let err = timeout(TIMEOUT, client.call("LitRPC.Stop", json!({})))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, ClientError::ConnectionClosed));
    tokio::task::yield_now().await;

    let (logs, _guard) = capture_logs();
    timeout(TIMEOUT, client.open()).await.unwrap().unwrap();

    assert_eq!(client.state(), ConnectionState::Open);
    assert!(!logs.has_event(Level::WARN, "live connection"));
    assert_eq!(node.handshakes().len(), 2);
}

#[tokio::test]
async fn zero_command_queue_fails_before_handshake() {
    let node = MockNode::start(echo).await;
    let client = LitClient::with_settings(ClientSettings {
        command_queue: 0,
        ..node.settings()
    });

    let err = timeout(TIMEOUT, client.open()).await.unwrap().unwrap_err();
    assert!(matches!(err, ClientError::InvalidSettings(_)), "got: {err:?}");
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert!(node.handshakes().is_empty());
}

// ── Correlation ──

#[tokio::test]
async fn request_envelope_wire_shape() {
    let node = MockNode::start(|req| vec![reply(req, json!({"Status": "OK closed"}))]).await;
    let client = open(&node).await;

    client.close_channel(3).await.unwrap();
    assert_eq!(
        node.requests(),
        vec![json!({"method": "LitRPC.CloseChannel", "params": [{"ChanIdx": 3}], "id": 0})]
    );
}

#[tokio::test]
async fn out_of_order_responses_reach_their_callers() {
    let mut held = Vec::new();
    let node = MockNode::start(move |req| {
        held.push(req.clone());
        if held.len() < 3 {
            return Vec::new();
        }
        held.drain(..).rev().flat_map(|r| echo(&r)).collect()
    })
    .await;
    let client = open(&node).await;

    let (a, b, c) = timeout(
        TIMEOUT,
        async {
            tokio::join!(
                client.call("LitRPC.A", json!({"Who": "a"})),
                client.call("LitRPC.B", json!({"Who": "b"})),
                client.call("LitRPC.C", json!({"Who": "c"})),
            )
        },
    )
    .await
    .unwrap();

    assert_eq!(a.unwrap(), json!({"Who": "a"}));
    assert_eq!(b.unwrap(), json!({"Who": "b"}));
    assert_eq!(c.unwrap(), json!({"Who": "c"}));
}

#[tokio::test]
async fn concurrent_calls_get_distinct_increasing_ids() {
    let node = MockNode::start(echo).await;
    let client = open(&node).await;

    let calls = (0..20).map(|n| client.call("LitRPC.Echo", json!({"N": n})));
    let results = timeout(TIMEOUT, join_all(calls)).await.unwrap();

    for (n, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap(), json!({"N": n}));
    }
    let ids: Vec<u64> = node.requests().iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, (0..20).collect::<Vec<u64>>());
}

#[tokio::test]
async fn remote_error_passes_through_unchanged() {
    let node = MockNode::start(|req| vec![error(req, json!("channel 9 not found"))]).await;
    let client = open(&node).await;

    let err = client.call("LitRPC.Push", json!({"ChanIdx": 9})).await.unwrap_err();
    match err {
        ClientError::Remote(value) => assert_eq!(value, json!("channel 9 not found")),
        other => panic!("expected remote error, got: {other:?}"),
    }
}

#[tokio::test]
async fn unmatched_and_duplicate_responses_are_ignored() {
    let node = MockNode::start(|req| {
        if req["id"] == 0 {
            vec![
                Frame::Json(json!({"id": 1000, "error": null, "result": "stray"})),
                reply(req, json!("first")),
                reply(req, json!("duplicate")),
            ]
        } else {
            vec![reply(req, json!("second"))]
        }
    })
    .await;
    let client = open(&node).await;

    assert_eq!(client.call("LitRPC.A", json!({})).await.unwrap(), json!("first"));
    assert_eq!(client.call("LitRPC.B", json!({})).await.unwrap(), json!("second"));
    assert_eq!(client.state(), ConnectionState::Open);
}

#[tokio::test]
async fn undecodable_frame_is_skipped() {
    let node = MockNode::start(|req| {
        vec![Frame::Raw("this is not json".into()), reply(req, json!({"ok": true}))]
    })
    .await;
    let client = open(&node).await;

    let result = timeout(TIMEOUT, client.call("LitRPC.A", json!({})))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result, json!({"ok": true}));
}

#[tokio::test]
async fn request_timeout_rejects_and_connection_stays_usable() {
    let node = MockNode::start(|req| {
        if req["method"] == "LitRPC.Slow" {
            Vec::new()
        } else {
            echo(req)
        }
    })
    .await;
    let settings = ClientSettings {
        request_timeout_ms: Some(200),
        ..node.settings()
    };
    let client = LitClient::with_settings(settings);
    timeout(TIMEOUT, client.open()).await.unwrap().unwrap();

    let err = client.call("LitRPC.Slow", json!({})).await.unwrap_err();
    match err {
        ClientError::Timeout { method, timeout_ms } => {
            assert_eq!(method, "LitRPC.Slow");
            assert_eq!(timeout_ms, 200);
        }
        other => panic!("expected timeout, got: {other:?}"),
    }

    let result = client.call("LitRPC.Fast", json!({"B": 2})).await.unwrap();
    assert_eq!(result, json!({"B": 2}));
}

// ── Listening status ──

#[tokio::test]
async fn listen_then_is_listening_uses_one_round_trip() {
    let node = MockNode::start(|req| vec![reply(req, json!({"LisIpPorts": [":2448"], "Adr": "ln1me"}))]).await;
    let client = open(&node).await;

    client.listen(2448).await.unwrap();
    assert!(client.is_listening().await.unwrap());

    let requests = node.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["method"], "LitRPC.Listen");
    assert_eq!(requests[0]["params"], json!([{"Port": ":2448"}]));
}

#[tokio::test]
async fn listen_address_in_use_counts_as_listening() {
    let node = MockNode::start(|req| {
        vec![error(req, json!("listen tcp :2448: bind: address already in use"))]
    })
    .await;
    let client = open(&node).await;

    client.listen(2448).await.unwrap();
    assert_eq!(client.listening_status(), ListeningStatus::Listening);
    assert!(client.is_listening().await.unwrap());
    assert_eq!(node.requests().len(), 1);
}

#[tokio::test]
async fn null_ports_cached_as_not_listening() {
    let node = MockNode::start(|req| vec![reply(req, json!({"LisIpPorts": null, "Adr": "ln1me"}))]).await;
    let client = open(&node).await;

    assert!(!client.is_listening().await.unwrap());
    assert!(!client.is_listening().await.unwrap());
    assert_eq!(client.listening_status(), ListeningStatus::NotListening);
    assert_eq!(node.requests().len(), 1);
}

// ── Commands over the wire ──

#[tokio::test]
async fn balances_and_push_round_trip() {
    let node = MockNode::start(|req| match req["method"].as_str() {
        Some("LitRPC.Balance") => vec![reply(
            req,
            json!({"Balances": [{"CoinType": 257, "SyncHeight": 10, "ChanTotal": 0, "TxoTotal": 42, "MatureWitty": 42, "FeeRate": 80}]}),
        )],
        Some("LitRPC.Push") => vec![reply(req, json!({"StateIndex": 7}))],
        _ => vec![error(req, json!("unknown method"))],
    })
    .await;
    let client = open(&node).await;

    let balances = client.list_balances().await.unwrap();
    assert_eq!(balances[0].coin_type, 257);
    assert_eq!(balances[0].txo_total, 42);

    assert_eq!(client.push(1, 500, b"invoice-17").await.unwrap(), 7);
    let push = &node.requests()[1];
    let data = push["params"][0]["Data"].as_array().unwrap();
    assert_eq!(data.len(), 32);

    let err = client.stop().await.unwrap_err();
    assert_eq!(err.remote_message().as_deref(), Some("unknown method"));
}
