//! Authentication adapters.
//!
//! Implementations of the `TokenIssuer` and `SessionValidator` ports:
//!
//! - `jwt` - HS256 tokens signed with the configured secret
//! - `mock` - map-backed tokens for tests
//! - `account_check` - rejects tokens whose account no longer exists

mod account_check;
mod jwt;
mod mock;

pub use account_check::AccountSessionValidator;
pub use jwt::{JwtConfig, JwtTokenService};
pub use mock::MockTokenService;
