//! Authentication context and provider
//!
//! One [`AuthProvider`] per mounted application. It owns the reducer state,
//! restores the session from the credential store on mount, and turns the
//! client's session-expiry notice into state.

use fitrack_core::User;
use fitrack_http::{
    AuthService, AuthSession, ClientError, LoginRequest, LogoutOutcome, RegisterRequest,
};
use std::ops::Deref;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::error_handler::{clear_session_expired_callback, set_session_expired_callback};

/// Who the context believes is signed in
#[derive(Clone, Debug, PartialEq)]
pub enum SessionUser {
    /// A token was found on restore but no profile has been loaded
    Marker,
    Profile(User),
}

impl SessionUser {
    pub const fn profile(&self) -> Option<&User> {
        match self {
            Self::Marker => None,
            Self::Profile(user) => Some(user),
        }
    }
}

/// Authentication context data
#[derive(Clone, Debug, PartialEq)]
pub struct AuthContextData {
    pub user: Option<SessionUser>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AuthContextData {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true, // Until the credential store has been checked
            error: None,
        }
    }
}

impl AuthContextData {
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Authentication context actions
#[derive(Debug, PartialEq)]
pub enum AuthAction {
    /// Result of the mount-time credential check
    Restore(bool),
    LoggedIn(Option<User>),
    LoggedOut,
    Failed(String),
    SessionExpired,
}

impl Reducible for AuthContextData {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::Restore(authenticated) => Rc::new(Self {
                user: authenticated.then_some(SessionUser::Marker),
                is_loading: false,
                error: None,
            }),
            AuthAction::LoggedIn(user) => Rc::new(Self {
                user: Some(user.map_or(SessionUser::Marker, SessionUser::Profile)),
                is_loading: false,
                error: None,
            }),
            AuthAction::LoggedOut => Rc::new(Self {
                user: None,
                is_loading: false,
                error: None,
            }),
            AuthAction::Failed(message) => Rc::new(Self {
                is_loading: false,
                error: Some(message),
                ..(*self).clone()
            }),
            AuthAction::SessionExpired => Rc::new(Self {
                user: None,
                is_loading: false,
                error: Some("Your session has expired. Please sign in again.".to_string()),
            }),
        }
    }
}

/// Action recording the outcome of a login or registration
pub fn action_for(result: &Result<AuthSession, ClientError>) -> AuthAction {
    match result {
        Ok(session) => AuthAction::LoggedIn(session.user.clone()),
        Err(e) => AuthAction::Failed(e.to_string()),
    }
}

/// Handle returned by [`use_auth`]: the current state plus the actions that
/// change it
#[derive(Clone)]
pub struct AuthHandle {
    state: UseReducerHandle<AuthContextData>,
    service: AuthService,
}

impl PartialEq for AuthHandle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.service.client().ptr_eq(other.service.client())
    }
}

impl Deref for AuthHandle {
    type Target = AuthContextData;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl AuthHandle {
    pub fn service(&self) -> &AuthService {
        &self.service
    }

    /// Sign in and update the context with the outcome
    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession, ClientError> {
        let result = self.service.login(&request).await;
        self.settle(&result);
        result
    }

    /// Register and update the context with the outcome
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthSession, ClientError> {
        let result = self.service.register(&request).await;
        self.settle(&result);
        result
    }

    pub async fn logout(&self) -> LogoutOutcome {
        let outcome = self.service.logout().await;
        self.state.dispatch(AuthAction::LoggedOut);
        outcome
    }

    /// Callback that signs out in the background, for buttons and menu items
    pub fn logout_callback<T: 'static>(&self) -> Callback<T> {
        let handle = self.clone();
        Callback::from(move |_| {
            let handle = handle.clone();
            spawn_local(async move {
                handle.logout().await;
            });
        })
    }

    fn settle(&self, result: &Result<AuthSession, ClientError>) {
        self.state.dispatch(action_for(result));
    }
}

/// Auth provider props
#[derive(Properties)]
pub struct AuthProviderProps {
    pub service: AuthService,
    pub children: Children,
}

impl PartialEq for AuthProviderProps {
    fn eq(&self, other: &Self) -> bool {
        self.service.client().ptr_eq(other.service.client()) && self.children == other.children
    }
}

/// Auth provider component
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let state = use_reducer(AuthContextData::default);

    // Route the client's 401 handling into this tree
    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            set_session_expired_callback(Rc::new(move || {
                dispatcher.dispatch(AuthAction::SessionExpired);
            }));

            // Cleanup on unmount
            clear_session_expired_callback
        });
    }

    // Restore from the credential store on mount
    {
        let dispatcher = state.dispatcher();
        let service = props.service.clone();
        use_effect_with((), move |_| {
            let authenticated = service.is_authenticated();
            debug!(authenticated, "Restored session state");
            dispatcher.dispatch(AuthAction::Restore(authenticated));
        });
    }

    let handle = AuthHandle {
        state,
        service: props.service.clone(),
    };

    html! {
        <ContextProvider<AuthHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<AuthHandle>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthHandle {
    use_context::<AuthHandle>()
        .expect("AuthHandle not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let auth = use_auth();
    auth.is_authenticated()
}

/// Whether the signed-in user holds `role`. Always false while the session
/// is being restored.
#[hook]
pub fn use_has_role(role: &str) -> bool {
    let auth = use_auth();
    !auth.is_loading && auth.is_authenticated() && auth.service().has_role(role)
}
