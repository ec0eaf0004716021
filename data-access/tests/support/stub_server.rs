//! Minimal HTTP/1.1 stub serving one canned response per connection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use url::Url;

/// Response replayed for every request.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub reason: &'static str,
    pub body: String,
}

impl CannedResponse {
    pub fn ok_json(body: &str) -> Self {
        Self {
            status: 200,
            reason: "OK",
            body: body.to_owned(),
        }
    }

    pub fn server_error() -> Self {
        Self {
            status: 500,
            reason: "Internal Server Error",
            body: r#"{"message":"internal error"}"#.to_owned(),
        }
    }

    fn render(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status,
            self.reason,
            self.body.len(),
            self.body
        )
    }
}

/// Stub server bound to an ephemeral localhost port.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
    gate: Option<Arc<Semaphore>>,
    accept_loop: JoinHandle<()>,
}

impl StubServer {
    /// Answer every request immediately.
    pub async fn start(response: CannedResponse) -> Self {
        Self::bind(response, None).await
    }

    /// Hold every response until [`StubServer::release`] grants it.
    pub async fn gated(response: CannedResponse) -> Self {
        Self::bind(response, Some(Arc::new(Semaphore::new(0)))).await
    }

    async fn bind(response: CannedResponse, gate: Option<Arc<Semaphore>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let requests = Arc::new(AtomicUsize::new(0));

        let loop_requests = Arc::clone(&requests);
        let loop_gate = gate.clone();
        let accept_loop = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let response = response.clone();
                let requests = Arc::clone(&loop_requests);
                let gate = loop_gate.clone();
                tokio::spawn(async move {
                    serve_connection(socket, &response, &requests, gate.as_deref()).await;
                });
            }
        });

        Self {
            addr,
            requests,
            gate,
            accept_loop,
        }
    }

    /// URL of `path` on this server.
    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).expect("stub url")
    }

    /// Let `count` held responses through.
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    /// Number of complete requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.accept_loop.abort();
    }
}

async fn serve_connection(
    mut socket: TcpStream,
    response: &CannedResponse,
    requests: &AtomicUsize,
    gate: Option<&Semaphore>,
) {
    let mut received = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !received.windows(4).any(|window| window == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(read) => received.extend_from_slice(&chunk[..read]),
        }
    }
    requests.fetch_add(1, Ordering::SeqCst);

    if let Some(gate) = gate {
        match gate.acquire().await {
            Ok(permit) => permit.forget(),
            Err(_) => return,
        }
    }

    if socket.write_all(response.render().as_bytes()).await.is_ok() {
        let _ = socket.shutdown().await;
    }
}
