//! Client side of the window manager's control protocol.
//!
//! Two connections are used: one for blocking query/command round trips
//! and one carrying the event subscription. Handlers never proceed until a
//! command's reply has been read, which keeps event processing strictly
//! serial.

mod protocol;

#[cfg(test)]
pub mod mock_conn;

pub use protocol::{
    CommandOutcome, ConfigReply, Event, Node, NodeType, TickEvent, TickReply, WindowEvent,
    WorkspaceEvent, WorkspaceInfo,
};
#[cfg(test)]
pub use self::mock_conn::MockConn;

use std::env;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::process::Command;

use protocol::{
    MessageType, EVENT_FLAG, EVENT_SHUTDOWN, EVENT_TICK, EVENT_WINDOW, EVENT_WORKSPACE,
    HEADER_LEN, MAGIC,
};

use crate::errors::{LaymanError, Result};

/// Blocking round trips against the window manager.
///
/// The rest of the crate only sees this trait, so tests can substitute a
/// scripted connection and assert on the exact commands issued.
pub trait Conn {
    fn run_command(&mut self, payload: &str) -> Result<Vec<CommandOutcome>>;
    fn send_tick(&mut self, payload: &str) -> Result<()>;
    fn get_tree(&mut self) -> Result<Node>;
    fn get_workspaces(&mut self) -> Result<Vec<WorkspaceInfo>>;
    fn get_config(&mut self) -> Result<String>;
}

/// Locate the IPC socket: `$I3SOCK` if set, else ask the i3 binary.
pub fn socket_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("I3SOCK") {
        return Ok(PathBuf::from(path));
    }
    let output = Command::new("i3").arg("--get-socketpath").output()?;
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        return Err(LaymanError::NoSocketPath);
    }
    Ok(PathBuf::from(path))
}

fn write_message(stream: &mut UnixStream, message_type: u32, payload: &str) -> Result<()> {
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(MAGIC);
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&message_type.to_le_bytes());
    frame.extend_from_slice(payload.as_bytes());
    stream.write_all(&frame)?;
    Ok(())
}

fn read_message(stream: &mut UnixStream) -> Result<(u32, Vec<u8>)> {
    let mut header = [0u8; HEADER_LEN];
    stream.read_exact(&mut header)?;
    if &header[..6] != MAGIC {
        return Err(LaymanError::BadMagic);
    }
    let length = u32::from_le_bytes([header[6], header[7], header[8], header[9]]) as usize;
    let message_type = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);
    let mut payload = vec![0u8; length];
    stream.read_exact(&mut payload)?;
    Ok((message_type, payload))
}

/// The command connection.
pub struct I3Conn {
    stream: UnixStream,
}

impl I3Conn {
    pub fn connect() -> Result<Self> {
        let stream = UnixStream::connect(socket_path()?)?;
        Ok(Self { stream })
    }

    fn round_trip(&mut self, message_type: MessageType, payload: &str) -> Result<Vec<u8>> {
        write_message(&mut self.stream, message_type as u32, payload)?;
        loop {
            let (reply_type, body) = read_message(&mut self.stream)?;
            // Events never arrive here (no subscription on this socket),
            // but skip them defensively rather than mis-typing a reply.
            if reply_type & EVENT_FLAG != 0 {
                continue;
            }
            if reply_type != message_type as u32 {
                return Err(LaymanError::UnexpectedReply {
                    expected: message_type as u32,
                    got: reply_type,
                });
            }
            return Ok(body);
        }
    }
}

impl Conn for I3Conn {
    fn run_command(&mut self, payload: &str) -> Result<Vec<CommandOutcome>> {
        let body = self.round_trip(MessageType::RunCommand, payload)?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn send_tick(&mut self, payload: &str) -> Result<()> {
        let body = self.round_trip(MessageType::SendTick, payload)?;
        let reply: TickReply = serde_json::from_slice(&body)?;
        if !reply.success {
            tracing::warn!("tick broadcast was not acknowledged: {payload}");
        }
        Ok(())
    }

    fn get_tree(&mut self) -> Result<Node> {
        let body = self.round_trip(MessageType::GetTree, "")?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn get_workspaces(&mut self) -> Result<Vec<WorkspaceInfo>> {
        let body = self.round_trip(MessageType::GetWorkspaces, "")?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn get_config(&mut self) -> Result<String> {
        let body = self.round_trip(MessageType::GetConfig, "")?;
        let reply: ConfigReply = serde_json::from_slice(&body)?;
        Ok(reply.config)
    }
}

/// The subscription connection. Only event frames flow here once the
/// subscription is acknowledged.
pub struct I3Events {
    stream: UnixStream,
}

impl I3Events {
    pub fn connect() -> Result<Self> {
        let stream = UnixStream::connect(socket_path()?)?;
        Ok(Self { stream })
    }

    pub fn subscribe(&mut self, events: &[&str]) -> Result<()> {
        let payload = serde_json::to_string(events)?;
        write_message(&mut self.stream, MessageType::Subscribe as u32, &payload)?;
        let (reply_type, _body) = read_message(&mut self.stream)?;
        if reply_type != MessageType::Subscribe as u32 {
            return Err(LaymanError::UnexpectedReply {
                expected: MessageType::Subscribe as u32,
                got: reply_type,
            });
        }
        Ok(())
    }

    /// Block until the next subscribed event arrives.
    pub fn next_event(&mut self) -> Result<Event> {
        loop {
            let (frame_type, body) = read_message(&mut self.stream)?;
            if frame_type & EVENT_FLAG == 0 {
                tracing::warn!("unexpected reply frame on the event stream, skipping");
                continue;
            }
            match frame_type & !EVENT_FLAG {
                EVENT_WORKSPACE => return Ok(Event::Workspace(serde_json::from_slice(&body)?)),
                EVENT_WINDOW => return Ok(Event::Window(serde_json::from_slice(&body)?)),
                EVENT_TICK => return Ok(Event::Tick(serde_json::from_slice(&body)?)),
                EVENT_SHUTDOWN => return Ok(Event::Shutdown),
                other => {
                    tracing::debug!("ignoring unsubscribed event type {other}");
                }
            }
        }
    }
}
