//! Network URL constants for the Liquid Nation SDK.

/// Default order API base URL (local backend).
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
