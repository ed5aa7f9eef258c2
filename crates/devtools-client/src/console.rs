//! The capture surface: renders application objects into segments for
//! shipping.
//!
//! [`CaptureConsole`] is a write-only console. Nothing is ever printed to a
//! terminal; rendered output accumulates as [`Segment`]s in a record buffer
//! until the client extracts it for transport. The devtools server replays
//! the segments at its own display size, which is why the console carries
//! width/height fields the listener task keeps in sync with the server.
//!
//! The console is an explicitly owned object: the embedding application
//! creates one (usually inside an `Arc`) and hands it to the client. There
//! is no process-wide singleton.

use std::fmt::Display;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Mutex, PoisonError};

use devtools_core::{Segment, SegmentStyle};

/// Fallback geometry used until the server reports its real display size.
const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// A recording console that captures rendered output as segments.
///
/// All methods take `&self`: the record buffer is internally synchronized so
/// renderers and the extracting client can share one console across threads.
#[derive(Debug)]
pub struct CaptureConsole {
    /// Render width in cells; updated by the listener task on `server_info`.
    width: AtomicU16,
    /// Render height in cells; updated by the listener task on `server_info`.
    height: AtomicU16,
    /// Segments rendered since the last extraction.
    record_buffer: Mutex<Vec<Segment>>,
}

impl CaptureConsole {
    /// Creates a console with the default 80×24 geometry.
    pub fn new() -> Self {
        Self {
            width: AtomicU16::new(DEFAULT_WIDTH),
            height: AtomicU16::new(DEFAULT_HEIGHT),
            record_buffer: Mutex::new(Vec::new()),
        }
    }

    /// Renders `objects` into the record buffer, separated by single spaces
    /// and terminated with a line break, the way a console `print` would
    /// display them.
    ///
    /// Embedded newlines split the output into one segment per line so the
    /// server can reflow each line independently.
    pub fn print(&self, objects: &[&dyn Display]) {
        let rendered = objects
            .iter()
            .map(|object| object.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let mut buffer = self.lock_buffer();
        for line in rendered.split('\n') {
            if !line.is_empty() {
                buffer.push(Segment::plain(line));
            }
            buffer.push(Segment::line_break());
        }
    }

    /// Renders one pre-styled run of text followed by a line break.
    pub fn print_styled(&self, text: &str, style: SegmentStyle) {
        let mut buffer = self.lock_buffer();
        buffer.push(Segment::styled(text, style));
        buffer.push(Segment::line_break());
    }

    /// Atomically extracts and clears every segment rendered since the last
    /// extraction.
    ///
    /// A renderer running concurrently on another thread either lands fully
    /// in this extraction or fully in the next one — the buffer lock covers
    /// the whole take.
    pub fn export_segments(&self) -> Vec<Segment> {
        std::mem::take(&mut *self.lock_buffer())
    }

    /// Returns the current render geometry as `(width, height)` in cells.
    pub fn size(&self) -> (u16, u16) {
        (
            self.width.load(Ordering::Relaxed),
            self.height.load(Ordering::Relaxed),
        )
    }

    /// Applies a server-reported display geometry.
    pub fn set_size(&self, width: u16, height: u16) {
        self.width.store(width, Ordering::Relaxed);
        self.height.store(height, Ordering::Relaxed);
    }

    /// Locks the record buffer, recovering from a poisoned lock — a renderer
    /// that panicked mid-print leaves at worst a partial line behind, which
    /// is still displayable.
    fn lock_buffer(&self) -> std::sync::MutexGuard<'_, Vec<Segment>> {
        self.record_buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CaptureConsole {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
