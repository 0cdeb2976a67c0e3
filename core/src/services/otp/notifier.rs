//! Out-of-band delivery boundary

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::value_objects::DeliveryMethod;
use crate::errors::DeliveryError;

/// Delivers a code to a destination over one channel
///
/// Implementations may block on network I/O; the service never holds store
/// state while awaiting them.
#[async_trait]
pub trait OtpNotifier: Send + Sync {
    /// Channel this notifier serves
    fn method(&self) -> DeliveryMethod;

    /// Send `code` to `destination`
    async fn send(&self, destination: &str, code: &str) -> Result<(), DeliveryError>;
}

/// One notifier per delivery method
#[derive(Clone, Default)]
pub struct NotifierRegistry {
    notifiers: HashMap<DeliveryMethod, Arc<dyn OtpNotifier>>,
}

impl NotifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration
    pub fn with(mut self, notifier: Arc<dyn OtpNotifier>) -> Self {
        self.register(notifier);
        self
    }

    /// Register a notifier under its own method, replacing any previous one
    pub fn register(&mut self, notifier: Arc<dyn OtpNotifier>) {
        self.notifiers.insert(notifier.method(), notifier);
    }

    pub fn get(&self, method: DeliveryMethod) -> Option<Arc<dyn OtpNotifier>> {
        self.notifiers.get(&method).cloned()
    }

    pub fn supports(&self, method: DeliveryMethod) -> bool {
        self.notifiers.contains_key(&method)
    }

    /// Registered methods, in display order
    pub fn methods(&self) -> Vec<DeliveryMethod> {
        DeliveryMethod::ALL
            .into_iter()
            .filter(|m| self.supports(*m))
            .collect()
    }
}

impl std::fmt::Debug for NotifierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}
