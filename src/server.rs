//! Talk to the Geometry Dash level server.
//!
//! Requests are form encoded POSTs and responses are plain text, either a
//! negative error code or `key:value` pairs. Request building, checksums, and
//! response parsing are always available; the blocking [`Client`] that sends
//! requests needs the `http` feature.

#[cfg(feature = "http")]
mod client;
pub mod hash;
mod response;
mod upload;

#[cfg(feature = "http")]
pub use client::*;
pub use response::*;
pub use upload::*;

/// Root of the official server
pub const BASE_URL: &str = "https://www.boomlings.com/database";

/// Shared secret sent with level requests
pub const SECRET: &str = "Wmfd2893gb7";

/// Secret sent with account requests
pub const LOGIN_SECRET: &str = "Wmfv3899gc9";

/// Device id sent on login
pub const LOGIN_UDID: &str = "S15232137420643451451521515121125115195140311";

/// Game version the requests claim to come from
pub const GAME_VERSION: u32 = 22;
