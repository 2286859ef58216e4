//! Staff accounts, password hashing, bearer tokens and the role-aware request extractor.

pub mod domain;
pub mod password;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;
pub mod token;

#[cfg(test)]
mod tests;

pub use domain::{LoginRequest, NewUser, Role, User, UserId, UserPatch, UserSummary, UserView};
pub use repository::UserRepository;
pub use router::{account_admin_router, auth_router};
pub use service::{AccountService, AccountServiceError, LoginOutcome};
pub use session::{SessionAuthority, StaffSession};
pub use token::{TokenAuthority, TokenClaims, TokenError};
