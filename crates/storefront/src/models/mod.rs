//! Domain models for the storefront.
//!
//! These are validated domain objects, separate from the HTTP form types in
//! `routes` and the view types handed to templates.

pub mod flower;
pub mod purchase;
pub mod session;
pub mod user;

pub use flower::{Flower, FlowerPatch};
pub use purchase::PurchasedFlower;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
