//! A single PTY-backed session (spec.md §3 "PTY session", §4.5 "Session
//! operations").

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use gw_core::PtySessionId;
use parking_lot::Mutex;
use portable_pty::{ChildKiller, MasterPty, PtySize};
use tokio::sync::broadcast;

use crate::error::PtyError;

/// Bounded scrollback size (spec.md §3 invariant iv, §5 "Resource limits").
pub const MAX_SCROLLBACK: usize = 100_000;

#[derive(Debug, Clone)]
pub enum PtyEvent {
    Data(String),
    Exit(Option<i32>),
}

/// A live (or just-exited, within the grace window) PTY session.
pub struct PtySessionHandle {
    pub id: PtySessionId,
    pub agent_id: String,
    cols: AtomicU16,
    rows: AtomicU16,
    alive: AtomicBool,
    scrollback: Mutex<String>,
    writer: Mutex<Box<dyn Write + Send>>,
    master: Mutex<Box<dyn MasterPty + Send>>,
    killer: Mutex<Box<dyn ChildKiller + Send + Sync>>,
    pub(crate) events: broadcast::Sender<PtyEvent>,
}

impl PtySessionHandle {
    pub(crate) fn new(
        id: PtySessionId,
        agent_id: String,
        cols: u16,
        rows: u16,
        writer: Box<dyn Write + Send>,
        master: Box<dyn MasterPty + Send>,
        killer: Box<dyn ChildKiller + Send + Sync>,
        events: broadcast::Sender<PtyEvent>,
    ) -> Self {
        Self {
            id,
            agent_id,
            cols: AtomicU16::new(cols),
            rows: AtomicU16::new(rows),
            alive: AtomicBool::new(true),
            scrollback: Mutex::new(String::new()),
            writer: Mutex::new(writer),
            master: Mutex::new(master),
            killer: Mutex::new(killer),
            events,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn cols(&self) -> u16 {
        self.cols.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> u16 {
        self.rows.load(Ordering::SeqCst)
    }

    pub fn scrollback(&self) -> String {
        self.scrollback.lock().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PtyEvent> {
        self.events.subscribe()
    }

    /// Appends to scrollback, trimming from the head when it exceeds
    /// [`MAX_SCROLLBACK`] characters.
    pub(crate) fn append_scrollback(&self, chunk: &str) {
        let mut sb = self.scrollback.lock();
        sb.push_str(chunk);
        let len = sb.chars().count();
        if len > MAX_SCROLLBACK {
            let excess = len - MAX_SCROLLBACK;
            let byte_idx = sb.char_indices().nth(excess).map(|(i, _)| i).unwrap_or(sb.len());
            sb.drain(..byte_idx);
        }
    }

    pub(crate) fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Forwards `data` to the pty if alive.
    pub fn write(&self, data: &str) -> Result<(), PtyError> {
        if !self.is_alive() {
            return Err(PtyError::Dead(self.id.as_str().to_string()));
        }
        self.writer
            .lock()
            .write_all(data.as_bytes())
            .map_err(PtyError::Io)
    }

    /// Updates stored dimensions and forwards the resize to the pty.
    pub fn resize(&self, cols: u16, rows: u16) -> Result<(), PtyError> {
        self.cols.store(cols, Ordering::SeqCst);
        self.rows.store(rows, Ordering::SeqCst);
        self.master
            .lock()
            .resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| PtyError::Backend(e.into()))
    }

    /// Marks the session dead and best-effort signals the child, swallowing
    /// errors if it has already exited.
    pub fn kill(&self) {
        self.mark_dead();
        if let Err(e) = self.killer.lock().kill() {
            tracing::debug!(session_id = %self.id, error = %e, "pty kill failed (already dead?)");
        }
    }
}
