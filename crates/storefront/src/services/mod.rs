//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Signup and password login over the user repository
//!
//! Flower, cart and purchase handlers talk to their repositories directly;
//! there is no logic there beyond what the queries already do.

pub mod auth;
