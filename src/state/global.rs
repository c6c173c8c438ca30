//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::state::session;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Session token for the signed-in user, mirrored from the `jwt` cookie
    pub session: RwSignal<Option<String>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(session::token()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Record a fresh session token in the cookie and the signal
    pub fn sign_in(&self, token: &str) {
        session::store_token(token);
        self.session.set(Some(token.to_string()));
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}
