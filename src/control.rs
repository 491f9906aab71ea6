//! Out-of-process control surface.
//!
//! Clients connect to a Unix socket, write one JSON request per line and
//! read one JSON reply per line:
//!
//! ```text
//! → {"seat":"seat0","action":"toggle"}
//! ← {"status":"ok"}
//! ← {"status":"no_such_seat","seat":"seat0"}
//! ← {"status":"invalid_parameter","parameter":"action"}
//! ```

use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::host::Host;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRequest {
    pub seat: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ControlReply {
    Ok,
    NoSuchSeat { seat: String },
    InvalidParameter { parameter: String },
    Malformed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error("no such seat: {0}")]
    NoSuchSeat(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("malformed request: {0}")]
    Malformed(String),
}

impl From<Result<(), ControlError>> for ControlReply {
    fn from(result: Result<(), ControlError>) -> Self {
        match result {
            Ok(()) => ControlReply::Ok,
            Err(ControlError::NoSuchSeat(seat)) => ControlReply::NoSuchSeat { seat },
            Err(ControlError::UnknownAction(_)) => ControlReply::InvalidParameter {
                parameter: "action".to_string(),
            },
            Err(ControlError::Malformed(message)) => ControlReply::Malformed { message },
        }
    }
}

/// Decode one request line, run it against `host` and build the reply.
pub fn handle_request_line(host: &mut Host, line: &str) -> ControlReply {
    let result = serde_json::from_str::<ControlRequest>(line.trim())
        .map_err(|e| ControlError::Malformed(e.to_string()))
        .and_then(|req| host.perform_action(&req.seat, &req.action));
    if let Err(e) = &result {
        debug!(error = %e, "control request failed");
    }
    result.into()
}

/// `$XDG_RUNTIME_DIR/tsuzuri.$WAYLAND_DISPLAY`; the display defaults to
/// `wayland-0`.
pub fn socket_path_from(runtime_dir: Option<OsString>, display: Option<OsString>) -> Option<PathBuf> {
    let runtime_dir = runtime_dir.filter(|d| !d.is_empty())?;
    let display = display
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| OsString::from("wayland-0"));
    let mut name = OsString::from("tsuzuri.");
    name.push(display);
    Some(PathBuf::from(runtime_dir).join(name))
}

pub fn socket_path() -> Option<PathBuf> {
    socket_path_from(
        std::env::var_os("XDG_RUNTIME_DIR"),
        std::env::var_os("WAYLAND_DISPLAY"),
    )
}

/// Non-blocking listener polled from the host's event loop.
///
/// Connections are never waited on: bytes are read as they arrive and a
/// request is answered once its line is complete.
#[derive(Debug)]
pub struct ControlServer {
    listener: UnixListener,
    path: PathBuf,
    clients: Vec<Client>,
}

#[derive(Debug)]
struct Client {
    stream: UnixStream,
    pending: Vec<u8>,
}

enum ClientState {
    Waiting,
    Done,
}

impl ControlServer {
    /// Bind at `path`, replacing a socket left behind by an earlier run.
    pub fn bind(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        match std::fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "removed stale control socket"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        let listener = UnixListener::bind(&path)?;
        listener.set_nonblocking(true)?;
        debug!(path = %path.display(), "control socket listening");
        Ok(Self {
            listener,
            path,
            clients: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Connections still waiting for a complete request line.
    pub fn pending_clients(&self) -> usize {
        self.clients.len()
    }

    /// Accept new connections and answer every request whose line has
    /// fully arrived. Returns how many requests were answered.
    pub fn poll(&mut self, host: &mut Host) -> io::Result<usize> {
        loop {
            match self.listener.accept() {
                Ok((stream, _)) => {
                    stream.set_nonblocking(true)?;
                    self.clients.push(Client {
                        stream,
                        pending: Vec::new(),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => return Err(e),
            }
        }

        let mut served = 0;
        let mut i = 0;
        while i < self.clients.len() {
            match self.clients[i].advance(host) {
                Ok(ClientState::Waiting) => i += 1,
                Ok(ClientState::Done) => {
                    served += 1;
                    self.clients.swap_remove(i);
                }
                Err(e) => {
                    warn!(error = %e, "control client dropped");
                    self.clients.swap_remove(i);
                }
            }
        }
        Ok(served)
    }
}

impl Client {
    /// Read what is available; answer once a full line is buffered.
    fn advance(&mut self, host: &mut Host) -> io::Result<ClientState> {
        let mut chunk = [0u8; 512];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "closed before a full request",
                    ))
                }
                Ok(n) => {
                    self.pending.extend_from_slice(&chunk[..n]);
                    if self.pending.contains(&b'\n') {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(ClientState::Waiting),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        let end = self
            .pending
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(self.pending.len());
        let line = String::from_utf8_lossy(&self.pending[..end]);
        let reply = handle_request_line(host, &line);
        let mut out = serde_json::to_vec(&reply).map_err(io::Error::from)?;
        out.push(b'\n');
        self.stream.write_all(&out)?;
        Ok(ClientState::Done)
    }
}

impl Drop for ControlServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Client side: send one request and wait for the reply.
pub fn send_request(path: &Path, request: &ControlRequest) -> io::Result<ControlReply> {
    let mut stream = UnixStream::connect(path)?;
    serde_json::to_writer(&mut stream, request).map_err(io::Error::from)?;
    stream.write_all(b"\n")?;
    let mut line = String::new();
    BufReader::new(&stream).read_line(&mut line)?;
    serde_json::from_str(&line).map_err(io::Error::from)
}
