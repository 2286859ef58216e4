use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{normalize_email, LoginRequest, NewUser, Role, User, UserId, UserPatch, UserView};
use super::password::{BcryptError, PasswordHasher};
use super::repository::UserRepository;
use super::session::{SessionAuthority, StaffSession};
use super::token::{IssuedToken, TokenAuthority, TokenError};
use crate::shared::{RepositoryError, ValidationErrors};

/// Account management plus credential and token checks.
pub struct AccountService {
    repository: Arc<dyn UserRepository>,
    tokens: TokenAuthority,
    passwords: PasswordHasher,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: UserView,
}

impl AccountService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        tokens: TokenAuthority,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            repository,
            tokens,
            passwords,
        }
    }

    pub fn create_user(&self, request: NewUser) -> Result<UserView, AccountServiceError> {
        request.validate()?;
        let email = normalize_email(&request.email);
        if self.repository.find_by_email(&email)?.is_some() {
            return Err(AccountServiceError::EmailInUse);
        }

        let user = User {
            id: UserId::generate(),
            name: request.name.trim().to_string(),
            email,
            password_hash: self.passwords.hash(&request.password)?,
            role: request.role,
            is_active: request.is_active,
            last_login_at: None,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(user).map_err(|err| match err {
            RepositoryError::Conflict(_) => AccountServiceError::EmailInUse,
            other => AccountServiceError::Repository(other),
        })?;
        info!(user_id = %stored.id, role = stored.role.label(), "staff account created");
        Ok(stored.view())
    }

    /// Create the bootstrap administrator unless the e-mail already exists.
    pub fn ensure_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserView, AccountServiceError> {
        if let Some(existing) = self.repository.find_by_email(&normalize_email(email))? {
            return Ok(existing.view());
        }
        self.create_user(NewUser {
            name: "System Administrator".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Admin,
            is_active: true,
        })
    }

    pub fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AccountServiceError> {
        let email = normalize_email(&request.email);
        let Some(mut user) = self.repository.find_by_email(&email)? else {
            self.passwords.verify_decoy(&request.password);
            warn!("login rejected for unknown account");
            return Err(AccountServiceError::InvalidCredentials);
        };

        if !self.passwords.verify(&request.password, &user.password_hash) {
            warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(AccountServiceError::InvalidCredentials);
        }
        if !user.is_active {
            warn!(user_id = %user.id, "login rejected: account inactive");
            return Err(AccountServiceError::InactiveAccount);
        }

        user.last_login_at = Some(Utc::now());
        self.repository.update(user.clone())?;

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, "staff login");
        Ok(LoginOutcome {
            token,
            user: user.view(),
        })
    }

    pub fn list_users(&self) -> Result<Vec<UserView>, AccountServiceError> {
        Ok(self
            .repository
            .all()?
            .iter()
            .map(User::view)
            .collect())
    }

    pub fn get(&self, id: &UserId) -> Result<User, AccountServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(AccountServiceError::NotFound)
    }

    /// Administrators cannot deactivate or demote their own account.
    pub fn update_user(
        &self,
        id: &UserId,
        patch: UserPatch,
        acting: &StaffSession,
    ) -> Result<UserView, AccountServiceError> {
        patch.validate()?;
        if &acting.user_id == id {
            if patch.is_active == Some(false) {
                return Err(AccountServiceError::SelfDeactivation);
            }
            if patch.role.is_some_and(|role| role != Role::Admin) {
                return Err(AccountServiceError::SelfDemotion);
            }
        }
        let mut user = self.get(id)?;

        if let Some(name) = patch.name {
            user.name = name.trim().to_string();
        }
        if let Some(password) = patch.password {
            user.password_hash = self.passwords.hash(&password)?;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }

        self.repository.update(user.clone())?;
        info!(user_id = %user.id, role = user.role.label(), active = user.is_active, "staff account updated");
        Ok(user.view())
    }

    /// Accounts are deactivated rather than removed so report assignments stay resolvable.
    pub fn deactivate(&self, id: &UserId, acting: &StaffSession) -> Result<UserView, AccountServiceError> {
        self.update_user(
            id,
            UserPatch {
                is_active: Some(false),
                ..UserPatch::default()
            },
            acting,
        )
    }

    #[cfg(test)]
    pub(crate) fn decoy_hashed(&self) -> bool {
        self.passwords.decoy_ready()
    }

    pub fn count_active(&self) -> Result<usize, AccountServiceError> {
        Ok(self
            .repository
            .all()?
            .iter()
            .filter(|user| user.is_active)
            .count())
    }
}

impl SessionAuthority for AccountService {
    fn authenticate(&self, token: &str) -> Result<StaffSession, AccountServiceError> {
        let claims = self.tokens.verify(token)?;
        let user = self
            .repository
            .fetch(&UserId(claims.sub))?
            .ok_or(AccountServiceError::InvalidCredentials)?;
        if !user.is_active {
            return Err(AccountServiceError::InactiveAccount);
        }
        Ok(StaffSession {
            user_id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        })
    }
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("Email already in use")]
    EmailInUse,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is inactive")]
    InactiveAccount,
    #[error("You cannot deactivate your own account")]
    SelfDeactivation,
    #[error("You cannot remove your own administrator role")]
    SelfDemotion,
    #[error("User not found")]
    NotFound,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("password hashing failed: {0}")]
    Password(#[from] BcryptError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
