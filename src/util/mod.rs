//! Utility types shared across the crate.

mod secret;

pub use secret::SecretString;
