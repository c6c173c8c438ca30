//! Daybook
//!
//! Browser client for a personal diary API, built with Leptos (WASM).
//!
//! # Features
//!
//! - Email/password login and registration
//! - Diary entries with attached images
//! - Inline entry creation and editing from the list
//! - Standalone editor with per-image management
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All data lives in a remote diary REST API; the client keeps
//! only view state and the session cookie.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
