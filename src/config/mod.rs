//! Credential profiles and connection resolution.
//!
//! Settings are layered flag > environment variable > stored profile > default.

pub mod profile;
pub mod resolver;

pub use profile::{Profile, ProfileEntry, ProfileStore, DEFAULT_PROFILE};
pub use resolver::{
    capture_profile, resolve, select_profile, ConnectionConfig, ConnectionFlags, Endpoint,
    ProcessEnv,
};
