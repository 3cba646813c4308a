//! Domain-level constants.
//!
//! Authentication rules shared by the gateway and its configuration.

// =============================================================================
// Authentication
// =============================================================================

/// JWT token lifetime in hours (fixed, not configurable)
pub const JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";
