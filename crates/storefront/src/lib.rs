//! Flower shop storefront library.
//!
//! Signup and login, a flower inventory with JSON mutations, a cookie-held
//! cart, and checkout into a per-user purchase history. The binary in
//! `main.rs` wires configuration, tracing and Sentry around [`routes::app`];
//! integration tests drive the same router on an ephemeral port.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
