//! Fan-out logging sinks
//!
//! The orchestration layer records `(service, message, level)` events
//! through a fixed set of sinks. Delivery is settle-all: every sink is
//! invoked, individual failures are counted and dropped, and the caller
//! never sees an error. Ordinary `tracing` diagnostics live alongside
//! this; the fan-out exists for sinks that may later be remote.

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One delivery target for lifecycle log events
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn log(&self, service: &str, message: &str, level: LogLevel) -> Result<(), String>;
}

/// Sink that forwards onto the process-wide `tracing` subscriber
pub struct TracingSink;

#[async_trait]
impl LogSink for TracingSink {
    async fn log(&self, service: &str, message: &str, level: LogLevel) -> Result<(), String> {
        match level {
            LogLevel::Debug => debug!("{}: {}", service, message),
            LogLevel::Info => info!("{}: {}", service, message),
            LogLevel::Warn => warn!("{}: {}", service, message),
            LogLevel::Error => error!("{}: {}", service, message),
        }
        Ok(())
    }
}

/// Fans one event out to every configured sink
#[derive(Clone)]
pub struct FanoutLogger {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl FanoutLogger {
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }

    /// Default sink set: tracing only
    pub fn tracing_only() -> Self {
        Self::new(vec![Arc::new(TracingSink)])
    }

    /// Deliver to all sinks, ignoring individual failures
    pub async fn log(&self, service: &str, message: &str, level: LogLevel) {
        let deliveries = self
            .sinks
            .iter()
            .map(|sink| sink.log(service, message, level));

        let failed = join_all(deliveries)
            .await
            .into_iter()
            .filter(|outcome| outcome.is_err())
            .count();

        if failed > 0 {
            debug!("{} log sink(s) failed to deliver", failed);
        }
    }

    pub async fn debug(&self, service: &str, message: &str) {
        self.log(service, message, LogLevel::Debug).await;
    }

    pub async fn info(&self, service: &str, message: &str) {
        self.log(service, message, LogLevel::Info).await;
    }

    pub async fn warn(&self, service: &str, message: &str) {
        self.log(service, message, LogLevel::Warn).await;
    }

    pub async fn error(&self, service: &str, message: &str) {
        self.log(service, message, LogLevel::Error).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LogSink for CountingSink {
        async fn log(&self, _service: &str, _message: &str, _level: LogLevel) -> Result<(), String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl LogSink for FailingSink {
        async fn log(&self, _service: &str, _message: &str, _level: LogLevel) -> Result<(), String> {
            Err("sink down".to_string())
        }
    }

    #[tokio::test]
    async fn test_all_sinks_receive_the_event() {
        let counting = Arc::new(CountingSink {
            calls: AtomicUsize::new(0),
        });
        let logger = FanoutLogger::new(vec![counting.clone(), Arc::new(TracingSink)]);

        logger.info("CallService", "hello").await;
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sink_failure_never_propagates() {
        let counting = Arc::new(CountingSink {
            calls: AtomicUsize::new(0),
        });
        let logger = FanoutLogger::new(vec![Arc::new(FailingSink), counting.clone()]);

        // Does not panic or error, and the healthy sink still fires
        logger.error("CallService", "boom").await;
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }
}
