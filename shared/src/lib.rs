//! Shared contract types for the kitchen display system
//!
//! Everything in this crate crosses the wire between `kds-server` and the
//! display clients (expeditor screen, station screens, table screens):
//! domain models, read-side projections, the broadcast event envelope and
//! the error-code taxonomy. No I/O lives here.

pub mod error;
pub mod kitchen;
pub mod message;
pub mod models;
pub mod response;
pub mod util;

pub use error::ErrorCode;
pub use response::CommandResponse;
