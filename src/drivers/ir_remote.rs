//! Interrupt-driven IR receiver.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌────────────┐
//! │ IR pin ISR  │────▶│  Edge ring   │────▶│  NecDecoder  │────▶│  pending   │
//! │ (any edge)  │     │  (lock-free) │     │  (main loop) │     │  frame     │
//! └─────────────┘     └──────────────┘     └──────────────┘     └────────────┘
//! ```
//!
//! The ISR timestamps every edge of the receiver output and pushes it into
//! a single-producer/single-consumer ring.  The main loop drains the ring
//! into the decoder on each poll.  One decoded frame is held until the
//! caller resumes the receiver; frames completing while one is held are
//! dropped.

use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use log::warn;

use super::nec::NecDecoder;

/// Maximum number of buffered edges.  One NEC frame is 68 edges.
const EDGE_QUEUE_CAP: usize = 256;

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISR writes (produces), main loop reads (consumes).  Each slot packs
// the edge timestamp with the post-edge level in bit 0, which costs one
// microsecond of resolution and keeps every slot a single atomic.

static EDGE_HEAD: AtomicUsize = AtomicUsize::new(0);
static EDGE_TAIL: AtomicUsize = AtomicUsize::new(0);
static EDGE_BUFFER: [AtomicU32; EDGE_QUEUE_CAP] = [const { AtomicU32::new(0) }; EDGE_QUEUE_CAP];

/// Record one receiver edge.  Safe to call from ISR context (lock-free).
/// Returns `false` if the ring is full (edge dropped).
pub fn record_edge(at_us: u32, level: bool) -> bool {
    let head = EDGE_HEAD.load(Ordering::Relaxed);
    let tail = EDGE_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EDGE_QUEUE_CAP;

    if next_head == tail {
        return false;
    }

    EDGE_BUFFER[head].store((at_us & !1) | u32::from(level), Ordering::Relaxed);
    EDGE_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the oldest edge as `(level, at_us)`.  Main loop only.
fn pop_edge() -> Option<(bool, u32)> {
    let tail = EDGE_TAIL.load(Ordering::Relaxed);
    let head = EDGE_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None;
    }

    let raw = EDGE_BUFFER[tail].load(Ordering::Relaxed);
    EDGE_TAIL.store((tail + 1) % EDGE_QUEUE_CAP, Ordering::Release);
    Some((raw & 1 == 1, raw & !1))
}

/// Number of edges waiting in the ring.
pub fn pending_edges() -> usize {
    let head = EDGE_HEAD.load(Ordering::Relaxed);
    let tail = EDGE_TAIL.load(Ordering::Relaxed);
    (head + EDGE_QUEUE_CAP - tail) % EDGE_QUEUE_CAP
}

// ── Receiver ──────────────────────────────────────────────────

pub struct IrReceiver {
    decoder: NecDecoder,
    pending: Option<u32>,
    dropped: u32,
}

impl Default for IrReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl IrReceiver {
    pub fn new() -> Self {
        Self {
            decoder: NecDecoder::new(),
            pending: None,
            dropped: 0,
        }
    }

    /// Drain the edge ring and return the held frame, if any.
    pub fn decode(&mut self) -> Option<u32> {
        while let Some((level, at_us)) = pop_edge() {
            if let Some(frame) = self.decoder.edge(level, at_us) {
                if self.pending.is_none() {
                    self.pending = Some(frame);
                } else {
                    self.dropped = self.dropped.wrapping_add(1);
                    warn!("IR frame {:08X} dropped (receiver not resumed)", frame);
                }
            }
        }
        self.pending
    }

    /// Release the held frame.
    pub fn resume(&mut self) {
        self.pending = None;
    }

    /// Frames discarded because the previous one was still held.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
