// src/ui/mod.rs - UI system coordinator

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;

// Re-export main app component
pub use app::App;

// Module declarations
pub mod app;
pub mod components;
pub mod layout;
pub mod pages;
pub mod router;
pub mod state;

// Re-exports for convenience
pub use components::*;
pub use layout::*;
pub use router::Route;
pub use state::*;

static LAUNCH_CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Hands the loaded configuration to the root component. Only the first call wins.
pub fn set_launch_config(config: AppConfig) -> bool {
    LAUNCH_CONFIG.set(config).is_ok()
}

/// Configuration the app was launched with, or the defaults
pub fn launch_config() -> AppConfig {
    LAUNCH_CONFIG.get().cloned().unwrap_or_default()
}

/// Notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub notification_type: NotificationType,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            notification_type,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Notification types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub fn classes(self) -> &'static str {
        match self {
            Self::Info => "bg-blue-50 border-blue-400 text-blue-800",
            Self::Success => "bg-green-50 border-green-400 text-green-800",
            Self::Warning => "bg-yellow-50 border-yellow-400 text-yellow-800",
            Self::Error => "bg-red-50 border-red-400 text-red-800",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_config_falls_back_to_defaults() {
        let config = launch_config();
        assert_eq!(config.app.required_role, "admin");
    }

    #[test]
    fn test_notifications_get_unique_ids() {
        let a = Notification::new(NotificationType::Success, "Saved");
        let b = Notification::new(NotificationType::Success, "Saved");
        assert_ne!(a.id, b.id);
        assert_eq!(a.message, "Saved");
    }
}
