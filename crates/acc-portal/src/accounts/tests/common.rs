use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::{Extension, Router};
use serde_json::Value;

use crate::accounts::{
    account_admin_router, auth_router, AccountService, NewUser, Role, SessionAuthority,
    StaffSession, TokenAuthority, User, UserId, UserRepository, UserView,
};
use crate::accounts::password::PasswordHasher;
use crate::memory::MemoryUserRepository;
use crate::rate_limit::FixedWindowLimiter;
use crate::shared::RepositoryError;

pub(super) const SECRET: &str = "accounts-test-secret";

pub(super) fn test_hasher() -> PasswordHasher {
    PasswordHasher::new(4)
}

pub(super) fn build_service() -> (Arc<AccountService>, MemoryUserRepository) {
    let repository = MemoryUserRepository::default();
    let service = AccountService::new(
        Arc::new(repository.clone()),
        TokenAuthority::new(SECRET, 30),
        test_hasher(),
    );
    (Arc::new(service), repository)
}

pub(super) fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        name: "Fatmata Kamara".to_string(),
        email: email.to_string(),
        password: "Str0ngPassw0rd".to_string(),
        role,
        is_active: true,
    }
}

pub(super) fn create(service: &AccountService, email: &str, role: Role) -> UserView {
    service
        .create_user(new_user(email, role))
        .expect("user created")
}

pub(super) fn session_for(user: &UserView) -> StaffSession {
    StaffSession {
        user_id: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
    }
}

/// Issues a bearer token for a freshly created account with the given role.
pub(super) fn token_for(service: &AccountService, email: &str, role: Role) -> (UserView, String) {
    let user = create(service, email, role);
    let outcome = service
        .login(crate::accounts::LoginRequest {
            email: email.to_string(),
            password: "Str0ngPassw0rd".to_string(),
        })
        .expect("login succeeds");
    (user, outcome.token.token)
}

pub(super) fn router(service: Arc<AccountService>) -> Router {
    let limiter = Arc::new(FixedWindowLimiter::new(3, std::time::Duration::from_secs(60)));
    let authority: Arc<dyn SessionAuthority> = service.clone();
    auth_router(service.clone(), limiter)
        .merge(account_admin_router(service))
        .layer(Extension(authority))
}

pub(super) fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) struct UnavailableRepository;

impl UserRepository for UnavailableRepository {
    fn insert(&self, _user: User) -> Result<User, RepositoryError> {
        Err(RepositoryError::Unavailable("user store offline".to_string()))
    }

    fn update(&self, _user: User) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("user store offline".to_string()))
    }

    fn fetch(&self, _id: &UserId) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("user store offline".to_string()))
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("user store offline".to_string()))
    }

    fn all(&self) -> Result<Vec<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("user store offline".to_string()))
    }
}
