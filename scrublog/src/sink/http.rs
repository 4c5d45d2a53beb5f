//! HTTP forwarder sink.
//!
//! Posts each encoded record to a log-intake endpoint (e.g. a hosted
//! ingestion API). Requests are synchronous with a short timeout so a slow
//! endpoint cannot stall the caller for long; the logger treats a failed
//! write as a diagnostic, never as a logging failure.

use std::time::Duration;

use super::{Sink, SinkError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Forwards records to an HTTP endpoint as JSON, one POST per record.
///
/// ```ignore
/// use scrublog::{HttpSink, Logger};
///
/// let sink = HttpSink::new("https://http-intake.logs.example.com/api/v2/logs")
///     .with_header("DD-API-KEY", api_key);
/// let logger = Logger::builder("svc", "production").sink(sink).build();
/// ```
#[derive(Clone)]
pub struct HttpSink {
    agent: ureq::Agent,
    url: String,
    headers: Vec<(String, String)>,
}

impl std::fmt::Debug for HttpSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Header values may hold API keys; only names are shown.
        let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("HttpSink")
            .field("url", &self.url)
            .field("headers", &header_names)
            .finish_non_exhaustive()
    }
}

impl HttpSink {
    /// Creates a forwarder for the given endpoint URL, with the default
    /// one-second request timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Creates a forwarder with a custom request timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request (e.g. an API key).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The endpoint this sink posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Sink for HttpSink {
    fn write(&self, record: &str) -> Result<(), SinkError> {
        let mut request = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json");
        for (name, value) in &self.headers {
            request = request.set(name, value);
        }

        match request.send_string(record) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => Err(SinkError::UnexpectedStatus(code)),
            Err(err) => Err(SinkError::Transport(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_endpoint_reports_transport_error() {
        // Reserved TEST-NET-1 address: connection fails fast.
        let sink = HttpSink::with_timeout("http://192.0.2.1:9/logs", Duration::from_millis(50));
        let err = sink.write("{}").unwrap_err();
        assert!(matches!(err, SinkError::Transport(_)));
    }

    #[test]
    fn headers_accumulate() {
        let sink = HttpSink::new("http://localhost/logs")
            .with_header("DD-API-KEY", "k")
            .with_header("X-Env", "test");
        assert_eq!(sink.url(), "http://localhost/logs");
        assert_eq!(sink.headers.len(), 2);
    }
}
