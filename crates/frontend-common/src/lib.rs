//! Browser glue for Fitrack frontends
//!
//! Wire it up once at the application root:
//!
//! ```ignore
//! let auth = fitrack_frontend_common::browser_auth_service()?;
//! html! {
//!     <BrowserRouter>
//!         <AuthProvider service={auth}>
//!             <RequireAuth<Route> login={Route::Login}>
//!                 <Dashboard />
//!             </RequireAuth<Route>>
//!         </AuthProvider>
//!     </BrowserRouter>
//! }
//! ```

pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod logging;
pub mod storage;

pub use auth::{
    AuthAction, AuthContextData, AuthHandle, AuthProvider, BrowserSessionExpiry, GuardDecision,
    RequireAuth, SessionUser, guard_decision, use_auth, use_has_role, use_is_authenticated,
};
pub use client::{browser_auth_service, browser_client};
pub use components::Spinner;
pub use config::AuthConfig;
pub use logging::init_browser_logging;
pub use storage::BrowserStorage;
