//! Logging utilities for structured tracing

use crate::error::LogRouterError;
use std::fmt;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Event categories attached to log records emitted by the router.
///
/// Delivery failures for the `errors` destination are tagged with
/// [`EventId::LogChannelError`] so that a broken error channel never gets
/// routed back into itself by whatever forwards `Router` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventId {
    Router,
    LogChannelError,
}

impl EventId {
    pub fn for_key(key: &str) -> Self {
        if key == "errors" {
            Self::LogChannelError
        } else {
            Self::Router
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Router => "LogRouter",
            Self::LogChannelError => "LogChannelError",
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. `json` switches to one JSON object per line.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("log_router=debug,serenity=info,reqwest=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Track operation timing and log on drop
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Create a new timer for an operation
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis() as u64;
        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );
    }
}

/// Log a failed delivery with the key and the event id derived from it
pub fn log_delivery_error(key: &str, error: &LogRouterError) {
    let event_id = EventId::for_key(key);
    tracing::error!(
        event_id = %event_id,
        key = %key,
        error = %error,
        error_kind = ?error.kind(),
        "Error occurred trying to send message to key {}",
        key
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_event_id_for_errors_key() {
        assert_eq!(EventId::for_key("errors"), EventId::LogChannelError);
        assert_eq!(EventId::for_key("mod"), EventId::Router);
        assert_eq!(EventId::for_key("Errors"), EventId::Router);
    }

    #[test]
    fn test_event_id_display() {
        assert_eq!(EventId::LogChannelError.to_string(), "LogChannelError");
        assert_eq!(EventId::Router.as_str(), "LogRouter");
    }

    #[test]
    fn test_delivery_error_logs_kind_and_event() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            log_delivery_error(
                "errors",
                &LogRouterError::Transport("429 Too Many Requests".into()),
            );
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("error_kind=Transport"), "{output}");
        assert!(output.contains("event_id=LogChannelError"), "{output}");
        assert!(output.contains("key=errors"), "{output}");
    }
}
