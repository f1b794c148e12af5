//! Shared utilities for integration testing: a mock Google upstream and a
//! relay bound to an ephemeral port.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    response::Response,
    Router,
};
use drive_relay::config::{RelayConfig, UpstreamConfig};
use drive_relay::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// One request as the mock upstream saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
}

/// What the mock upstream answers with, for every request.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json; charset=UTF-8",
            body: body.as_bytes().to_vec(),
        }
    }
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// In-process stand-in for googleapis.com.
pub struct MockGoogle {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockGoogle {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(handle).with_state(state);

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, requests }
    }

    /// Upstream settings pointing the relay at this mock.
    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            drive_api_base: format!("http://{}/drive/v3", self.addr),
            userinfo_url: format!("http://{}/oauth2/v3/userinfo", self.addr),
            use_system_proxy: false,
            ..UpstreamConfig::default()
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(State(state): State<MockState>, request: Request<Body>) -> Response {
    let query = request
        .uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests.lock().unwrap().push(Recorded {
        path: request.uri().path().to_string(),
        query,
        authorization,
    });

    Response::builder()
        .status(state.reply.status)
        .header(header::CONTENT_TYPE, state.reply.content_type)
        .body(Body::from(state.reply.body.clone()))
        .unwrap()
}

/// Start the relay against `upstream` on an ephemeral loopback port.
pub async fn start_relay(upstream: UpstreamConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = RelayConfig::default();
    config.listener.bind_address = addr.to_string();
    config.upstream = upstream;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
