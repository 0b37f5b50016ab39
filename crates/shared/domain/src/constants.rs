//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_BUYER: &str = "buyer";

/// Role for users listing products
pub const ROLE_SELLER: &str = "seller";

/// Administrator role, never self-assignable
pub const ROLE_ADMIN: &str = "admin";

/// Roles a user may pick at registration or switch between
pub const SELF_ASSIGNABLE_ROLES: &[&str] = &[ROLE_BUYER, ROLE_SELLER];

/// Check if a role value may be chosen by the user themselves
pub fn is_self_assignable_role(role: &str) -> bool {
    SELF_ASSIGNABLE_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Length of passwords generated by the forgot-password flow
pub const GENERATED_PASSWORD_LENGTH: usize = 8;

/// Lowest rating a root review may carry
pub const MIN_RATING: i16 = 1;

/// Highest rating a root review may carry
pub const MAX_RATING: i16 = 5;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours (one day)
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
