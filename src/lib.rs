//! Bullion Store
//!
//! Storefront state for a gold and silver bullion shop: the product catalog,
//! per-product likes, the session cart, listing filters and sort orders, the
//! view state machine and the authentication forms.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod likes;
pub mod listing;
pub mod navigation;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod session;
pub mod store;
pub mod summary;
