//! Collective application wizard
//!
//! A multi-step application form as a terminal wizard, plus the HTTP relay
//! server it submits to. The form itself (steps, validation, visibility,
//! persistence) is plain data and pure functions; the TUI and the HTTP
//! layers are thin adapters around it.

pub mod app;
pub mod config;
pub mod form;
pub mod server;
pub mod store;
pub mod submit;
pub mod ui;
