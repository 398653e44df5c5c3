//! Kitchen coordination core
//!
//! - [`KitchenService`] — the preparation state machine and read facade
//! - [`aggregate`] — the three display projections
//! - [`priority`] — wait-time tiers and the by-dish sort rule

pub mod aggregate;
pub mod priority;
mod service;

pub use service::KitchenService;
