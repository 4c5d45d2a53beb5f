//! Trace context creation, lookup, and propagation.
//!
//! This module provides the tracing collaborator the logger consults per
//! record:
//!
//! - [`TraceId`] / [`SpanId`]: random identifiers in the usual 16/8-byte
//!   lowercase-hex shape; all-zero identifiers are invalid.
//! - [`TraceContext`]: the pair of identifiers attached to log records.
//! - [`start_span`] / [`SpanGuard`]: a thread-local span stack. The innermost
//!   active span is what [`TraceContext::current`] returns, which is the
//!   lookup the logger performs when assembling a record.
//! - [`inject`] / [`extract`]: W3C `traceparent` map-carrier propagation for
//!   crossing process boundaries.
//!
//! It does not sample, export spans, or talk to a tracing backend; it only
//! provides correlation identifiers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use uuid::Uuid;

/// Carrier key used by [`inject`] and [`extract`].
pub const TRACEPARENT_KEY: &str = "traceparent";

thread_local! {
    static ACTIVE_SPANS: RefCell<Vec<TraceContext>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Identifiers
// =============================================================================

fn decode_hex<const N: usize>(input: &str) -> Option<[u8; N]> {
    if input.len() != N * 2 {
        return None;
    }
    let mut bytes = [0_u8; N];
    for (index, chunk) in input.as_bytes().chunks_exact(2).enumerate() {
        let high = char::from(chunk[0]).to_digit(16)?;
        let low = char::from(chunk[1]).to_digit(16)?;
        bytes[index] = ((high << 4) | low) as u8;
    }
    Some(bytes)
}

fn encode_hex(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for byte in bytes {
        write!(f, "{byte:02x}")?;
    }
    Ok(())
}

/// A 16-byte trace identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId([u8; 16]);

impl TraceId {
    /// Generates a new random trace id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().into_bytes())
    }

    /// Parses a 32-character hex string. Rejects the all-zero id.
    #[must_use]
    pub fn from_hex(input: &str) -> Option<Self> {
        let id = Self(decode_hex(input)?);
        if id.is_valid() { Some(id) } else { None }
    }

    /// Whether the id is non-zero.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0 != [0_u8; 16]
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        encode_hex(&self.0, f)
    }
}

impl fmt::Debug for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TraceId({self})")
    }
}

/// An 8-byte span identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId([u8; 8]);

impl SpanId {
    /// Generates a new random span id.
    #[must_use]
    pub fn generate() -> Self {
        let bytes = Uuid::new_v4().into_bytes();
        let mut id = [0_u8; 8];
        id.copy_from_slice(&bytes[..8]);
        Self(id)
    }

    /// Parses a 16-character hex string. Rejects the all-zero id.
    #[must_use]
    pub fn from_hex(input: &str) -> Option<Self> {
        let id = Self(decode_hex(input)?);
        if id.is_valid() { Some(id) } else { None }
    }

    /// Whether the id is non-zero.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0 != [0_u8; 8]
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        encode_hex(&self.0, f)
    }
}

impl fmt::Debug for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpanId({self})")
    }
}

// =============================================================================
// TraceContext
// =============================================================================

/// The identifiers attached to log records while a span is active.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceContext {
    trace_id: TraceId,
    span_id: SpanId,
}

impl TraceContext {
    /// Starts a brand-new trace.
    #[must_use]
    pub fn root() -> Self {
        Self {
            trace_id: TraceId::generate(),
            span_id: SpanId::generate(),
        }
    }

    /// A child context: same trace, fresh span id.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: SpanId::generate(),
        }
    }

    /// Builds a context from existing identifiers.
    #[must_use]
    pub fn from_ids(trace_id: TraceId, span_id: SpanId) -> Self {
        Self { trace_id, span_id }
    }

    /// The innermost active span on the calling thread, if any.
    ///
    /// This is the lookup the logger performs for every record.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE_SPANS.with(|spans| spans.borrow().last().copied())
    }

    #[must_use]
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    #[must_use]
    pub fn span_id(&self) -> SpanId {
        self.span_id
    }
}

impl fmt::Debug for TraceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TraceContext(trace_id={}, span_id={})",
            self.trace_id, self.span_id
        )
    }
}

// =============================================================================
// Spans
// =============================================================================

/// Keeps a span active on the calling thread until dropped.
///
/// Guards nest: dropping restores the previous span as current. The guard is
/// not `Send`: the span stack is per-thread.
#[must_use = "the span ends as soon as the guard is dropped"]
pub struct SpanGuard {
    name: String,
    context: TraceContext,
    // Ties the guard to the thread whose stack it pushed onto.
    _not_send: PhantomData<*const ()>,
}

impl SpanGuard {
    /// The span's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The context this span made current.
    #[must_use]
    pub fn context(&self) -> TraceContext {
        self.context
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        ACTIVE_SPANS.with(|spans| {
            spans.borrow_mut().pop();
        });
    }
}

impl fmt::Debug for SpanGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanGuard")
            .field("name", &self.name)
            .field("context", &self.context)
            .finish()
    }
}

fn push_span(name: String, context: TraceContext) -> SpanGuard {
    ACTIVE_SPANS.with(|spans| spans.borrow_mut().push(context));
    SpanGuard {
        name,
        context,
        _not_send: PhantomData,
    }
}

/// Starts a span on the calling thread.
///
/// If a span is already active, the new span continues its trace with a fresh
/// span id; otherwise a new trace begins.
pub fn start_span(name: impl Into<String>) -> SpanGuard {
    let context = match TraceContext::current() {
        Some(parent) => parent.child(),
        None => TraceContext::root(),
    };
    push_span(name.into(), context)
}

/// Starts a span continuing a trace extracted from a remote caller.
pub fn continue_span(name: impl Into<String>, parent: &TraceContext) -> SpanGuard {
    push_span(name.into(), parent.child())
}

// =============================================================================
// Map-carrier propagation (W3C traceparent)
// =============================================================================

/// Writes the context into a string-map carrier under [`TRACEPARENT_KEY`].
pub fn inject(context: &TraceContext, carrier: &mut HashMap<String, String>) {
    carrier.insert(
        TRACEPARENT_KEY.to_owned(),
        format!("00-{}-{}-01", context.trace_id(), context.span_id()),
    );
}

/// Reads a context back out of a string-map carrier.
///
/// Returns `None` when the carrier holds no `traceparent` entry or the entry
/// is malformed (wrong field count, bad hex, all-zero identifiers).
#[must_use]
pub fn extract(carrier: &HashMap<String, String>) -> Option<TraceContext> {
    let header = carrier.get(TRACEPARENT_KEY)?;
    let mut parts = header.split('-');
    let version = parts.next()?;
    let trace_id = TraceId::from_hex(parts.next()?)?;
    let span_id = SpanId::from_hex(parts.next()?)?;
    let _flags = parts.next()?;

    if version.len() != 2 || version == "ff" || parts.next().is_some() {
        return None;
    }

    Some(TraceContext::from_ids(trace_id, span_id))
}

// =============================================================================
// Tests
// =============================================================================
