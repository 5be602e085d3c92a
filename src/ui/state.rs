// src/ui/state.rs - Application state management and context

use std::sync::Arc;

use dioxus::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, CloudinaryUploader};
use crate::auth::{AuthContext, CurrentUser, Role};
use crate::config::AppConfig;
use crate::ui::{Notification, NotificationType};

/// Most toasts kept on screen at once
pub const MAX_NOTIFICATIONS: usize = 5;

/// Application state context that provides global state to all components
#[derive(Debug, Clone, PartialEq)]
pub struct AppStateContext {
    pub auth: AuthContext,
    pub notifications: Vec<Notification>,
    pub is_loading: bool,
    pub sidebar_collapsed: bool,
}

impl Default for AppStateContext {
    fn default() -> Self {
        Self {
            auth: AuthContext::default(),
            notifications: Vec::new(),
            is_loading: false,
            sidebar_collapsed: false,
        }
    }
}

/// Actions that can be performed on the application state
#[derive(Debug, Clone)]
pub enum AppAction {
    SessionChecked(Option<CurrentUser>),
    LoggedOut,
    SetLoading(bool),
    AddNotification(Notification),
    RemoveNotification(uuid::Uuid),
    ClearNotifications,
    ToggleSidebar,
}

/// State reducer function
pub fn app_state_reducer(state: &AppStateContext, action: AppAction) -> AppStateContext {
    let mut new_state = state.clone();

    match action {
        AppAction::SessionChecked(user) => {
            new_state.auth.session_checked(user);
        }
        AppAction::LoggedOut => {
            new_state.auth.logged_out();
            new_state.notifications.clear();
        }
        AppAction::SetLoading(loading) => {
            new_state.is_loading = loading;
        }
        AppAction::AddNotification(notification) => {
            new_state.notifications.push(notification);
            let overflow = new_state
                .notifications
                .len()
                .saturating_sub(MAX_NOTIFICATIONS);
            new_state.notifications.drain(..overflow);
        }
        AppAction::RemoveNotification(id) => {
            new_state.notifications.retain(|n| n.id != id);
        }
        AppAction::ClearNotifications => {
            new_state.notifications.clear();
        }
        AppAction::ToggleSidebar => {
            new_state.sidebar_collapsed = !new_state.sidebar_collapsed;
        }
    }

    new_state
}

/// Backend handles shared by every page
#[derive(Clone)]
pub struct Services {
    pub api: ApiClient,
    pub uploader: CloudinaryUploader,
    pub config: Arc<AppConfig>,
}

impl Services {
    pub fn new(config: AppConfig) -> crate::error::Result<Self> {
        Ok(Self {
            api: ApiClient::new(&config.api)?,
            uploader: CloudinaryUploader::new(config.upload.clone()),
            config: Arc::new(config),
        })
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}

/// Application state provider component
#[component]
pub fn AppStateProvider(services: Services, children: Element) -> Element {
    let required_role = Role::parse(&services.config.app.required_role);
    let mut state = use_signal(move || AppStateContext {
        auth: AuthContext::new(required_role),
        ..AppStateContext::default()
    });

    let dispatch = use_callback(move |action: AppAction| {
        let next = app_state_reducer(&state.peek(), action);
        state.set(next);
    });

    use_context_provider(|| state);
    use_context_provider(|| dispatch);
    use_context_provider({
        let services = services.clone();
        move || services
    });

    // Session check: the admin routes stay pending until it settles
    let token = use_cancel_token();
    use_future(move || {
        let api = services.api.clone();
        let token = token.clone();
        async move {
            match api.current_user(&token).await {
                Ok(user) => dispatch.call(AppAction::SessionChecked(Some(user))),
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    tracing::debug!(error = %e, "no active session");
                    dispatch.call(AppAction::SessionChecked(None));
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Hook to access the current application state
pub fn use_app_state() -> AppStateContext {
    let state = use_context::<Signal<AppStateContext>>();
    let current = state.read().clone();
    current
}

/// Hook to dispatch actions to the application state
pub fn use_app_dispatch() -> Callback<AppAction> {
    use_context::<Callback<AppAction>>()
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Token cancelled when the calling component unmounts
pub fn use_cancel_token() -> CancellationToken {
    let token = use_hook(CancellationToken::new);
    use_drop({
        let token = token.clone();
        move || token.cancel()
    });
    token
}

/// Pushes a toast
pub fn use_notify() -> Callback<(NotificationType, String)> {
    let dispatch = use_app_dispatch();
    use_callback(move |(kind, message): (NotificationType, String)| {
        dispatch.call(AppAction::AddNotification(Notification::new(kind, message)));
    })
}

/// Authentication helper hooks
pub mod auth {
    use super::*;
    use crate::auth::LoginData;
    use crate::error::Result;

    /// Signs in and reloads the session; the error is returned for the form to show
    pub async fn login(api: &ApiClient, data: &LoginData, token: &CancellationToken) -> Result<CurrentUser> {
        api.login(data, token).await?;
        api.current_user(token).await
    }

    /// Hook for logout functionality
    pub fn use_logout() -> Callback<()> {
        let dispatch = use_app_dispatch();
        let services = use_services();

        use_callback(move |_: ()| {
            let api = services.api.clone();
            spawn(async move {
                // Session is cleared locally even when the call fails
                if let Err(e) = api.logout(&CancellationToken::new()).await {
                    tracing::warn!(error = %e, "logout request failed");
                }
                dispatch.call(AppAction::LoggedOut);
            });
        })
    }

    pub fn use_current_user() -> Option<CurrentUser> {
        use_app_state().auth.current_user().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Access;

    fn admin() -> CurrentUser {
        CurrentUser {
            id: "u1".to_string(),
            full_name: "Lan Nguyen".to_string(),
            email: "lan@example.com".to_string(),
            role: Role::Admin,
            avatar: None,
            phone_number: None,
        }
    }

    #[test]
    fn test_default_app_state() {
        let state = AppStateContext::default();
        assert_eq!(state.auth.access(), Access::Pending);
        assert!(!state.is_loading);
        assert!(state.notifications.is_empty());
        assert!(!state.sidebar_collapsed);
    }

    #[test]
    fn test_session_actions() {
        let state = AppStateContext::default();
        let signed_in = app_state_reducer(&state, AppAction::SessionChecked(Some(admin())));
        assert_eq!(signed_in.auth.access(), Access::Granted);
        assert_eq!(signed_in.auth.greeting(), "Hello, Lan");

        let with_toast = app_state_reducer(
            &signed_in,
            AppAction::AddNotification(Notification::new(NotificationType::Success, "Saved")),
        );
        let signed_out = app_state_reducer(&with_toast, AppAction::LoggedOut);
        assert_eq!(signed_out.auth.access(), Access::NotLoggedIn);
        assert!(signed_out.notifications.is_empty());
    }

    #[test]
    fn test_notification_actions() {
        let mut state = AppStateContext::default();
        for i in 0..(MAX_NOTIFICATIONS + 2) {
            state = app_state_reducer(
                &state,
                AppAction::AddNotification(Notification::new(NotificationType::Info, format!("n{}", i))),
            );
        }
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.notifications[0].message, "n2");

        let id = state.notifications[0].id;
        let state = app_state_reducer(&state, AppAction::RemoveNotification(id));
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS - 1);

        let state = app_state_reducer(&state, AppAction::ToggleSidebar);
        assert!(state.sidebar_collapsed);
    }
}
