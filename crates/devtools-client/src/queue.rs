//! The bounded outbound log queue and its spillover accounting.
//!
//! The queue decouples `log()` callers from the network: producers use a
//! non-blocking try-enqueue and the sender task drains with a blocking
//! receive, over one bounded FIFO channel. When the channel is full the
//! record is dropped and counted — the caller is never suspended and memory
//! never grows past the configured capacity.
//!
//! Spillover recovery piggybacks on ordinary traffic: the first successful
//! enqueue after a run of drops also tries to enqueue a `Spillover` notice
//! carrying the drop count. There is no timer task; a queue that stays
//! saturated simply keeps counting until room appears.

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// One captured log entry, ready for transport.
///
/// Built by the facade at `log()` time, consumed only by the sender task.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Unix timestamp (whole seconds) of the `log()` call.
    pub timestamp: u64,
    /// Source path the log call was made from.
    pub path: String,
    /// Line number the log call was made from.
    pub line_number: u32,
    /// Captured segments, already run through the segment codec.
    pub encoded_segments: String,
}

/// Everything that can travel on the outbound queue.
///
/// The shutdown sentinel shares the channel with real traffic so FIFO order
/// doubles as the drain guarantee: every item enqueued before the sentinel
/// is sent before the sender exits. Consumers match exhaustively — there is
/// no identity comparison anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueItem {
    /// A log record to transmit.
    Log(LogRecord),
    /// A spillover notice: how many records were dropped while the queue
    /// was full.
    Spillover(u64),
    /// Orderly-shutdown sentinel; the sender exits without writing it.
    Shutdown,
}

/// Outcome of a non-blocking enqueue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryEnqueue {
    /// The item was accepted.
    Enqueued,
    /// The queue is at capacity; the item was dropped.
    Full,
    /// The consumer is gone (session over); the item was dropped.
    Closed,
}

/// Creates the bounded log channel for one session.
pub fn log_channel(capacity: usize) -> (LogSender, LogReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (LogSender { tx }, LogReceiver { rx })
}

/// Producer handle: non-blocking enqueue, plus a blocking variant used only
/// for the shutdown sentinel.
#[derive(Debug, Clone)]
pub struct LogSender {
    tx: mpsc::Sender<QueueItem>,
}

impl LogSender {
    /// Attempts to enqueue without ever suspending the caller.
    pub fn try_enqueue(&self, item: QueueItem) -> TryEnqueue {
        match self.tx.try_send(item) {
            Ok(()) => TryEnqueue::Enqueued,
            Err(TrySendError::Full(_)) => TryEnqueue::Full,
            Err(TrySendError::Closed(_)) => TryEnqueue::Closed,
        }
    }

    /// Enqueues, waiting for room if necessary.
    ///
    /// Only `disconnect()` uses this, to guarantee the shutdown sentinel
    /// lands even when the queue is saturated. Returns `false` if the
    /// consumer is already gone.
    pub async fn enqueue_blocking(&self, item: QueueItem) -> bool {
        self.tx.send(item).await.is_ok()
    }
}

/// Consumer handle, held exclusively by the sender task.
#[derive(Debug)]
pub struct LogReceiver {
    rx: mpsc::Receiver<QueueItem>,
}

impl LogReceiver {
    /// Waits for the next item, in strict enqueue order.
    ///
    /// Returns `None` once every sender handle has been dropped.
    pub async fn dequeue(&mut self) -> Option<QueueItem> {
        self.rx.recv().await
    }
}

// ── Producer-side spillover accounting ────────────────────────────────────────

/// Serializes the producer-side sequence "try-enqueue → maybe flush a
/// spillover notice → maybe reset the counter".
///
/// `log()` may be called from several threads on one client. Without the
/// mutex, two concurrent callers could both flush the counter (double
/// report) or interleave a reset with an increment (lost drops). The lock is
/// only held across non-blocking operations, so producers still never
/// suspend.
#[derive(Debug)]
pub struct LogProducer {
    sender: LogSender,
    spillover: Mutex<u64>,
}

impl LogProducer {
    pub fn new(sender: LogSender) -> Self {
        Self {
            sender,
            spillover: Mutex::new(0),
        }
    }

    /// Submits one record, best effort.
    ///
    /// Queue full: the record is dropped and the spillover counter rises.
    /// Right after a successful enqueue, a pending spillover count is
    /// flushed as a `Spillover` notice — if the notice itself does not fit,
    /// the counter is left untouched for a later attempt. A closed queue
    /// (session already over) drops the record without counting: there is no
    /// consumer left to report spillover to.
    pub fn submit(&self, record: LogRecord) {
        let mut spillover = self
            .spillover
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match self.sender.try_enqueue(QueueItem::Log(record)) {
            TryEnqueue::Enqueued => {
                if *spillover > 0
                    && self.sender.try_enqueue(QueueItem::Spillover(*spillover))
                        == TryEnqueue::Enqueued
                {
                    *spillover = 0;
                }
            }
            TryEnqueue::Full => *spillover += 1,
            TryEnqueue::Closed => {}
        }
    }

    #[cfg(test)]
    fn spillover_count(&self) -> u64 {
        *self
            .spillover
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
