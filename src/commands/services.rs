//! Injected Services
//!
//! Session and notifier handed to the command handlers through `AppState`.
//! Nothing here is global: tests and hosts pass their own implementations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The signed-in user, if any
pub trait Session: Send + Sync {
    fn user_id(&self) -> Option<String>;
}

/// Fixed session, set once by the host
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user_id: Option<String>,
}

impl StaticSession {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self { user_id: Some(user_id.into()) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl Session for StaticSession {
    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Short user-facing messages (toasts)
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Notifier that only writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Error => log::warn!("[notice] {}", message),
            _ => log::info!("[notice] {}", message),
        }
    }
}

/// Services bundle passed into `AppState`
#[derive(Clone)]
pub struct Services {
    pub session: Arc<dyn Session>,
    pub notifier: Arc<dyn Notifier>,
}

impl Services {
    pub fn new(session: Arc<dyn Session>, notifier: Arc<dyn Notifier>) -> Self {
        Self { session, notifier }
    }

    pub fn success(&self, message: &str) {
        self.notifier.notify(NoticeKind::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.notifier.notify(NoticeKind::Error, message);
    }

    pub fn info(&self, message: &str) {
        self.notifier.notify(NoticeKind::Info, message);
    }
}

impl Default for Services {
    /// Anonymous session, log-only notices
    fn default() -> Self {
        Self::new(Arc::new(StaticSession::anonymous()), Arc::new(LogNotifier))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    #[test]
    fn test_static_session() {
        assert_eq!(StaticSession::signed_in("u1").user_id().as_deref(), Some("u1"));
        assert!(StaticSession::anonymous().user_id().is_none());
    }

    #[test]
    fn test_services_route_notices() {
        let notifier = Arc::new(RecordingNotifier::default());
        let services = Services::new(Arc::new(StaticSession::anonymous()), notifier.clone());

        services.success("Saved");
        services.error("Nope");

        assert_eq!(
            notifier.notices(),
            vec![
                (NoticeKind::Success, "Saved".to_string()),
                (NoticeKind::Error, "Nope".to_string()),
            ]
        );
    }
}
