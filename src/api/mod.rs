//! API Client
//!
//! HTTP access to the diary REST API.

pub mod client;

pub use client::*;
