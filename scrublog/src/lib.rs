//! Structured JSON logging with field-name scrubbing.
//!
//! This crate separates:
//! - **The scrubbing engine**: a total, pure traversal that replaces the
//!   value of any field whose name is in a configured set with the
//!   `***scrubbed***` marker, over a closed variant tree ([`Value`]).
//! - **The logging facade**: a [`Logger`] handle that scrubs each payload,
//!   attaches trace identifiers, and hands one JSON record per call to its
//!   sinks.
//!
//! What this crate does:
//! - converts caller data into the scrubbing tree ([`Scrubbable`], with a
//!   derive macro for your own types)
//! - matches field and key names case-insensitively and replaces matched
//!   subtrees wholesale
//! - emits records with `level`, `context`, `service`, `env`, `time`,
//!   `message`, trace correlation ids, and `err`/`stack` at error severity
//!
//! What it does not do:
//! - detect sensitive data by content (matching is by name only)
//! - encrypt, hash, or otherwise make scrubbing reversible
//! - sample, export, or propagate spans beyond correlation ids
//!
//! The `Scrubbable` derive macro lives in `scrublog-derive` and is
//! re-exported from this crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else,
    clippy::from_over_into
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use scrublog_derive::Scrubbable;

#[allow(unused_extern_crates)]
extern crate self as scrublog;

// Module declarations
#[cfg(feature = "logger")]
mod logger;
mod scrub;
#[cfg(feature = "logger")]
pub mod sink;
#[cfg(feature = "trace")]
pub mod trace;

// Re-exports from the scrub module
pub use scrub::{
    FaultPolicy, Field, FieldSet, Fields, MapKey, SCRUBBED_PLACEHOLDER, Scalar, ScrubKey,
    Scrubbable, Scrubber, Value,
};

// Re-exports from the logger facade
#[cfg(feature = "logger")]
pub use logger::{Level, Logger, LoggerBuilder};
#[cfg(feature = "logger")]
pub use sink::{ConsoleSink, FileSink, MemorySink, Sink, SinkError};

#[cfg(feature = "http")]
pub use sink::HttpSink;

#[cfg(feature = "trace")]
pub use trace::{SpanGuard, SpanId, TraceContext, TraceId};
