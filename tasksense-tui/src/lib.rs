//! # TaskSense Terminal UI
//!
//! Keyboard-driven terminal client for managing tasks. The binary wires a
//! [`ServiceClient`](tasksense_client::ServiceClient) and an urgency
//! classifier into an [`App`](app::App), then drives it from a crossterm
//! event loop.
//!
//! ## Screens
//!
//! - **Loading**: shown while a persisted session is being restored
//! - **Auth**: sign-in and sign-up forms
//! - **Dashboard**: task list with filtering, inline status changes and a
//!   modal create/edit form
//!
//! Which screen is active follows the session state: the dashboard is shown
//! exactly when a session is present, the auth screen otherwise.

pub mod app;
pub mod auth;
pub mod dashboard;
pub mod form;
pub mod notify;
pub mod quotes;
pub mod ui;
