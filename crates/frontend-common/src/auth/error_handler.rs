//! Global session-expiry callback
//!
//! The HTTP client reports an expired session from whatever future hit the
//! 401. This hands the notice to the mounted [`AuthProvider`] without the
//! client knowing about yew.
//!
//! [`AuthProvider`]: super::AuthProvider

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static SESSION_EXPIRED_CALLBACK: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Set the session-expired callback, replacing any previous one
pub fn set_session_expired_callback(callback: Rc<dyn Fn()>) {
    SESSION_EXPIRED_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(callback);
    });
}

/// Clear the session-expired callback
pub fn clear_session_expired_callback() {
    SESSION_EXPIRED_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Run the session-expired callback. Returns false when none is installed.
pub fn trigger_session_expired() -> bool {
    // Clone out of the cell so the callback may re-register itself
    let callback = SESSION_EXPIRED_CALLBACK.with(|cb| cb.borrow().clone());
    match callback {
        Some(callback) => {
            callback();
            true
        }
        None => false,
    }
}
