//! UI Components
//!
//! Reusable Leptos components for the diary views.

pub mod nav;
pub mod entry_form;
pub mod loading;
pub mod toast;

pub use nav::Nav;
pub use entry_form::EntryForm;
pub use loading::ListSkeleton;
pub use toast::Toast;
