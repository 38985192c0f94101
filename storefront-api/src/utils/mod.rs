//! Utility modules.

/// Date/time deserialization helpers for backend timestamps.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// Identifier deserialization helpers.
pub mod id;
