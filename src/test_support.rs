//! In-process HTTP endpoints and comparison helpers for engine tests.
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use std::thread;
use std::time::Duration;

/// Float equality within a fixed tolerance, for derived metrics.
#[expect(
    clippy::float_arithmetic,
    reason = "derived metrics are compared with a tolerance"
)]
pub(crate) fn approx_eq(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

/// How the mock endpoint answers each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockBehavior {
    /// `200 OK` with a two-byte body.
    AlwaysOk,
    /// Alternates `200 OK` and `500 Internal Server Error`, starting with 200.
    Alternate,
    /// Reads the request and never answers.
    Hang,
}

pub(crate) struct MockServer {
    pub(crate) url: String,
    requests: Arc<AtomicU64>,
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl MockServer {
    /// Requests fully received so far.
    pub(crate) fn requests(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a keep-alive HTTP/1.1 mock server on an ephemeral port.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub(crate) fn spawn_mock_server(behavior: MockBehavior) -> Result<MockServer, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let requests = Arc::new(AtomicU64::new(0));
    let shutdown = Arc::new(AtomicBool::new(false));
    let thread = {
        let requests = Arc::clone(&requests);
        let shutdown = Arc::clone(&shutdown);
        thread::spawn(move || accept_loop(&listener, behavior, &requests, &shutdown))
    };

    Ok(MockServer {
        url: format!("http://{}/", addr),
        requests,
        shutdown,
        thread: Some(thread),
    })
}

/// An address nothing listens on, for connection-refused scenarios.
///
/// # Errors
///
/// Returns an error if a probe listener cannot be bound.
pub(crate) fn closed_port_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe failed: {}", err))?;
    let addr: SocketAddr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

fn accept_loop(
    listener: &TcpListener,
    behavior: MockBehavior,
    requests: &Arc<AtomicU64>,
    shutdown: &Arc<AtomicBool>,
) {
    let mut connections = Vec::new();
    while !shutdown.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, _)) => {
                let requests = Arc::clone(requests);
                let shutdown = Arc::clone(shutdown);
                connections.push(thread::spawn(move || {
                    handle_connection(stream, behavior, &requests, &shutdown);
                }));
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(5));
            }
            Err(_) => break,
        }
    }
    for connection in connections {
        drop(connection.join());
    }
}

fn handle_connection(
    mut stream: TcpStream,
    behavior: MockBehavior,
    requests: &AtomicU64,
    shutdown: &AtomicBool,
) {
    if stream.set_nonblocking(false).is_err()
        || stream
            .set_read_timeout(Some(Duration::from_millis(50)))
            .is_err()
    {
        return;
    }

    let mut pending: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];
    while !shutdown.load(Ordering::SeqCst) {
        if let Some(consumed) = complete_request_len(&pending) {
            pending.drain(..consumed);
            let seq = requests.fetch_add(1, Ordering::SeqCst);
            let response: &[u8] = match behavior {
                MockBehavior::Hang => continue,
                MockBehavior::AlwaysOk => OK_RESPONSE,
                MockBehavior::Alternate if seq % 2 == 0 => OK_RESPONSE,
                MockBehavior::Alternate => ERROR_RESPONSE,
            };
            if stream.write_all(response).is_err() || stream.flush().is_err() {
                return;
            }
            continue;
        }

        match stream.read(&mut chunk) {
            Ok(0) => return,
            Ok(read) => pending.extend_from_slice(chunk.get(..read).unwrap_or_default()),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {}
            Err(_) => return,
        }
    }
}

const OK_RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: keep-alive\r\n\r\nOK";
const ERROR_RESPONSE: &[u8] =
    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: keep-alive\r\n\r\nFAIL";

/// Length of the first complete request (head plus `Content-Length` body)
/// in `buffer`, if one has fully arrived.
fn complete_request_len(buffer: &[u8]) -> Option<usize> {
    let head_end = buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")?
        .checked_add(4)?;
    let head = String::from_utf8_lossy(buffer.get(..head_end)?);
    let body_len = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let total = head_end.checked_add(body_len)?;
    (buffer.len() >= total).then_some(total)
}
