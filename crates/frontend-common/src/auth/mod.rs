//! Authentication module

pub mod context;
pub mod error_handler;
pub mod expiry;
pub mod guard;

pub use context::{
    AuthAction, AuthContextData, AuthHandle, AuthProvider, SessionUser, action_for, use_auth,
    use_has_role, use_is_authenticated,
};
pub use expiry::BrowserSessionExpiry;
pub use guard::{GuardDecision, RequireAuth, guard_decision};
