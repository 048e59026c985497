//! Collaborator trait definitions
//!
//! The data-access layer never reaches for globals: credentials, user-facing
//! notifications and diagnostics are all injected through these traits.

use crate::error::RepodashError;
use std::sync::{Arc, Mutex};

/// Supplies an optional API token for a named provider (e.g. `"github"`)
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self, provider: &str) -> Option<String>;
}

/// User-visible, fire-and-forget failure notifications
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Developer-visible, fire-and-forget diagnostics
pub trait DiagnosticLog: Send + Sync {
    fn log_error(&self, context: &str, cause: &RepodashError);
}

impl<T: CredentialProvider + ?Sized> CredentialProvider for Arc<T> {
    fn api_key(&self, provider: &str) -> Option<String> {
        (**self).api_key(provider)
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify_error(&self, message: &str) {
        (**self).notify_error(message)
    }
}

impl<T: DiagnosticLog + ?Sized> DiagnosticLog for Arc<T> {
    fn log_error(&self, context: &str, cause: &RepodashError) {
        (**self).log_error(context, cause)
    }
}

/// Provider that never has a token
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn api_key(&self, _provider: &str) -> Option<String> {
        None
    }
}

/// Records every notification in memory, in order
///
/// The web layer creates one per request and returns the messages alongside
/// the payload; tests use it to count notifications.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for CollectingNotifier {
    fn notify_error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
