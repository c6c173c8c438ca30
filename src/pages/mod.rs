//! Pages
//!
//! Top-level page components for each route.

pub mod auth;
pub mod home;
pub mod edit_entry;

pub use auth::Auth;
pub use home::Home;
pub use edit_entry::EditEntry;
