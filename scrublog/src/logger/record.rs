//! Log record assembly and encoding.
//!
//! A record is one JSON object per log call: `level`, `context` (the
//! scrubbed payload), `service`, `env`, `time`, `message`, plus `trace_id`
//! and `span_id` when a span is active, and `err`/`stack` at error severity.
//! Encoding never fails the logging call: a serialization error produces a
//! fallback record describing the failure instead.

use std::backtrace::Backtrace;
use std::error::Error;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::Level;
use crate::trace::TraceContext;

#[derive(Serialize)]
struct LogRecord<'a> {
    level: &'a str,
    context: JsonValue,
    service: &'a str,
    env: &'a str,
    time: String,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    span_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    err: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

/// Renders an error together with its source chain.
fn render_error(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

pub(super) fn encode(
    level: Level,
    context: JsonValue,
    service: &str,
    env: &str,
    message: &str,
    trace: Option<TraceContext>,
    err: Option<&dyn Error>,
    pretty: bool,
) -> String {
    let record = LogRecord {
        level: level.as_str(),
        context,
        service,
        env,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        message,
        trace_id: trace.map(|t| t.trace_id().to_string()),
        span_id: trace.map(|t| t.span_id().to_string()),
        err: err.map(render_error),
        stack: err.map(|_| Backtrace::force_capture().to_string()),
    };

    let encoded = if pretty {
        serde_json::to_string_pretty(&record)
    } else {
        serde_json::to_string(&record)
    };

    encoded.unwrap_or_else(|encode_err| {
        format!(
            "{{\"level\":\"error\",\"message\":\"log record encoding failed\",\"err\":{:?}}}",
            encode_err.to_string()
        )
    })
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use serde_json::json;

    use super::*;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    impl Error for Inner {}

    #[test]
    fn info_record_has_the_expected_keys() {
        let line = encode(
            Level::Info,
            json!({ "key": "value" }),
            "svc",
            "test",
            "hello",
            None,
            None,
            false,
        );
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["context"], json!({ "key": "value" }));
        assert_eq!(parsed["service"], "svc");
        assert_eq!(parsed["env"], "test");
        assert_eq!(parsed["message"], "hello");
        assert!(parsed.get("trace_id").is_none());
        assert!(parsed.get("err").is_none());
        assert!(parsed.get("stack").is_none());
        assert!(parsed["time"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn trace_identifiers_are_rendered_when_present() {
        let context = TraceContext::root();
        let line = encode(
            Level::Debug,
            json!({}),
            "svc",
            "test",
            "m",
            Some(context),
            None,
            false,
        );
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["trace_id"], context.trace_id().to_string());
        assert_eq!(parsed["span_id"], context.span_id().to_string());
    }

    #[test]
    fn error_record_carries_the_source_chain_and_a_stack() {
        let err = Outer(Inner);
        let line = encode(
            Level::Error,
            json!({}),
            "svc",
            "test",
            "boom",
            None,
            Some(&err),
            false,
        );
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["err"], "request failed: connection reset");
        assert!(parsed["stack"].is_string());
    }

    #[test]
    fn pretty_encoding_spans_multiple_lines() {
        let line = encode(
            Level::Info,
            json!({ "k": 1 }),
            "svc",
            "test",
            "m",
            None,
            None,
            true,
        );
        assert!(line.contains('\n'));
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["context"]["k"], 1);
    }
}
