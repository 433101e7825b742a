//! Flower Shop Core - Shared types library.
//!
//! This crate provides the domain types used by every flower shop component:
//! - `storefront` - HTTP backend (inventory, accounts, cart, purchases)
//! - `cli` - Command-line tools for schema setup and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no database
//! access, no HTTP. Database encoding is available behind the `sqlite` feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, prices and the cookie cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
