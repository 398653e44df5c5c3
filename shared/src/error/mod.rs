//! Unified error codes for the kitchen display system
//!
//! Shared between the server and display clients so command failures can be
//! distinguished programmatically (e.g. "nothing to act on" vs "action
//! rejected").

mod codes;
mod http;

pub use codes::ErrorCode;
