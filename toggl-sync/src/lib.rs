//! Session and working-set synchronization for a Toggl client.
//!
//! [`app::App`] is the entry point: it restores or establishes a session,
//! fetches the running timer, time entries and projects in one concurrent
//! sync, and exposes the result as a [`app::ViewModel`].

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod hydrate;
pub mod render;
pub mod session;
pub mod session_store;
pub mod sync;
pub mod time_utils;
pub mod types;
