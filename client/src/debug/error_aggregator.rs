//! Error aggregation and storm detection
//!
//! Keeps the most recent absorbed failures (activation errors, rejected
//! config) so they can be inspected after the fact, and flags error storms.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::core::service::DiagnosticSink;
use crate::wallet::ConnectionError;

/// Process-wide aggregator used by the binary
static GLOBAL: Lazy<Arc<ErrorAggregator>> = Lazy::new(|| Arc::new(ErrorAggregator::new(100)));

/// Shared handle to the process-wide aggregator.
pub fn global() -> Arc<ErrorAggregator> {
    Arc::clone(&GLOBAL)
}

/// Error entry
#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub timestamp: Instant,
    pub level: ErrorLevel,
    pub context: String,
    pub message: String,
}

/// Error level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorLevel {
    Error,
    Warning,
}

impl std::fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorLevel::Error => write!(f, "ERROR"),
            ErrorLevel::Warning => write!(f, "WARN"),
        }
    }
}

struct Inner {
    /// Ring buffer of the last `max_errors` entries
    recent: VecDeque<ErrorEntry>,
    counts: HashMap<ErrorLevel, u64>,
    last_storm_warning: Option<Instant>,
}

/// Error aggregator
pub struct ErrorAggregator {
    inner: Mutex<Inner>,
    max_errors: usize,
    /// Errors per second that count as a storm
    storm_threshold: usize,
}

impl ErrorAggregator {
    pub fn new(max_errors: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                recent: VecDeque::with_capacity(max_errors),
                counts: HashMap::new(),
                last_storm_warning: None,
            }),
            max_errors: max_errors.max(1),
            storm_threshold: 10,
        }
    }

    pub fn record_error(&self, context: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(context, detail = %message, "Error recorded");
        self.add(ErrorLevel::Error, context, message);
    }

    pub fn record_warning(&self, context: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(context, detail = %message, "Warning recorded");
        self.add(ErrorLevel::Warning, context, message);
    }

    /// Most recent entries first.
    pub fn recent(&self, count: usize) -> Vec<ErrorEntry> {
        self.inner.lock().recent.iter().rev().take(count).cloned().collect()
    }

    pub fn count(&self, level: ErrorLevel) -> u64 {
        self.inner.lock().counts.get(&level).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.inner.lock().counts.values().sum()
    }

    pub fn log_stats(&self) {
        tracing::info!(
            total = self.total(),
            errors = self.count(ErrorLevel::Error),
            warnings = self.count(ErrorLevel::Warning),
            "Error aggregation statistics"
        );
    }

    fn add(&self, level: ErrorLevel, context: &str, message: String) {
        let mut inner = self.inner.lock();
        *inner.counts.entry(level).or_insert(0) += 1;
        if inner.recent.len() >= self.max_errors {
            inner.recent.pop_front();
        }
        inner.recent.push_back(ErrorEntry {
            timestamp: Instant::now(),
            level,
            context: context.to_string(),
            message,
        });
        self.check_storm(&mut inner);
    }

    fn check_storm(&self, inner: &mut Inner) {
        let now = Instant::now();
        let window_start = now.checked_sub(Duration::from_secs(1)).unwrap_or(now);
        let recent_count = inner
            .recent
            .iter()
            .rev()
            .take_while(|e| e.timestamp > window_start)
            .count();

        if recent_count >= self.storm_threshold {
            // Only every 5 seconds
            let should_warn = inner
                .last_storm_warning
                .map(|t| now.duration_since(t) >= Duration::from_secs(5))
                .unwrap_or(true);
            if should_warn {
                tracing::error!(
                    errors_per_second = recent_count,
                    threshold = self.storm_threshold,
                    "Error storm detected"
                );
                inner.last_storm_warning = Some(now);
            }
        }
    }
}

impl DiagnosticSink for ErrorAggregator {
    /// Activation failures are expected (user rejection) so they count as warnings.
    fn report(&self, context: &str, error: &ConnectionError) {
        self.record_warning(context, error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_keeps_latest() {
        let aggregator = ErrorAggregator::new(2);
        aggregator.record_error("a", "first");
        aggregator.record_error("b", "second");
        aggregator.record_warning("c", "third");

        let recent = aggregator.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "third");
        assert_eq!(recent[1].message, "second");
        assert_eq!(aggregator.total(), 3);
        assert_eq!(aggregator.count(ErrorLevel::Error), 2);
        assert_eq!(aggregator.count(ErrorLevel::Warning), 1);
    }

    #[test]
    fn test_report_records_warning() {
        let aggregator = ErrorAggregator::new(10);
        aggregator.report("reconnect:injected", &ConnectionError::Rejected("closed".to_string()));

        let recent = aggregator.recent(1);
        assert_eq!(recent[0].level, ErrorLevel::Warning);
        assert_eq!(recent[0].context, "reconnect:injected");
        assert_eq!(recent[0].message, "Connection rejected: closed");
    }

    #[test]
    fn test_storm_does_not_panic() {
        let aggregator = ErrorAggregator::new(50);
        for i in 0..20 {
            aggregator.record_error("storm", format!("error {i}"));
        }
        assert_eq!(aggregator.count(ErrorLevel::Error), 20);
    }
}
