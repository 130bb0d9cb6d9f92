//! User-facing notifications
//!
//! The form reports duplicate contacts (and successful adds) through a
//! [`Notifier`]. The shell prints them; the TUI keeps them as toasts that
//! close themselves after `notify.auto_close_ms`.

use std::time::{Duration, Instant};

use super::output::Output;
use crate::storage::NotifyConfig;

/// Maximum number of toasts kept on screen
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Sink for user-facing notifications
pub trait Notifier {
    fn notify(&mut self, kind: ToastKind, message: &str);

    fn success(&mut self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(ToastKind::Error, message);
    }
}

/// Writes notifications through [`Output`]: errors to stderr, the rest to stdout
pub struct ConsoleNotifier<'a> {
    output: &'a Output,
}

impl<'a> ConsoleNotifier<'a> {
    pub fn new(output: &'a Output) -> Self {
        Self { output }
    }
}

impl Notifier for ConsoleNotifier<'_> {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Success => self.output.success(message),
            ToastKind::Error => self.output.error(message),
        }
    }
}

/// A single toast
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    created: Instant,
}

impl Toast {
    /// Fraction of the display time left, or None when the toast never expires
    pub fn remaining(&self, now: Instant, auto_close: Option<Duration>) -> Option<f64> {
        let total = auto_close?;
        let elapsed = now.saturating_duration_since(self.created);
        let left = total.saturating_sub(elapsed);
        Some(left.as_secs_f64() / total.as_secs_f64())
    }
}

/// Toasts currently on screen, newest last
#[derive(Debug, Clone)]
pub struct ToastQueue {
    config: NotifyConfig,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new(config: NotifyConfig) -> Self {
        Self {
            config,
            toasts: Vec::new(),
        }
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Display time per toast, None when auto-close is disabled
    pub fn auto_close(&self) -> Option<Duration> {
        match self.config.auto_close_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Adds a toast created at the given instant
    pub fn push_at(&mut self, kind: ToastKind, message: &str, now: Instant) {
        self.toasts.push(Toast {
            kind,
            message: message.to_string(),
            created: now,
        });
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
    }

    /// Drops toasts whose display time has run out
    pub fn expire(&mut self, now: Instant) {
        if let Some(auto_close) = self.auto_close() {
            self.toasts
                .retain(|t| now.saturating_duration_since(t.created) < auto_close);
        }
    }

    /// Closes every toast
    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        self.push_at(kind, message, Instant::now());
    }
}
