//! Real-time fan-out to connected display clients

mod hub;

pub use hub::{ConnectedDisplay, DisplayHub, ResourceVersions};
