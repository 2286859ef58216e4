use super::common::*;
use std::sync::Arc;

use crate::accounts::{
    AccountService, AccountServiceError, LoginRequest, Role, SessionAuthority, TokenAuthority,
    UserPatch, UserRepository,
};

#[test]
fn create_user_hashes_password_and_normalizes_email() {
    let (service, repository) = build_service();
    let view = create(&service, "  Editor@ACC.gov.sl ", Role::Editor);

    assert_eq!(view.email, "editor@acc.gov.sl");
    let stored = repository
        .fetch(&view.id)
        .expect("fetch")
        .expect("user stored");
    assert_ne!(stored.password_hash, "Str0ngPassw0rd");
    assert!(stored.password_hash.starts_with("$2b$04$"));
}

#[test]
fn duplicate_email_is_rejected_case_insensitively() {
    let (service, _) = build_service();
    create(&service, "staff@acc.gov.sl", Role::Viewer);

    let error = service
        .create_user(new_user("STAFF@acc.gov.sl", Role::Admin))
        .expect_err("duplicate rejected");
    assert!(matches!(error, AccountServiceError::EmailInUse));
    assert_eq!(error.to_string(), "Email already in use");
}

#[test]
fn create_user_validates_password_length() {
    let (service, _) = build_service();
    let mut request = new_user("short@acc.gov.sl", Role::Editor);
    request.password = "short".to_string();

    match service.create_user(request) {
        Err(AccountServiceError::Validation(errors)) => {
            assert!(errors.has_field("password"));
            assert_eq!(errors.first_message(), "Password must be at least 8 characters");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn login_records_last_login_and_returns_verifiable_token() {
    let (service, repository) = build_service();
    let view = create(&service, "admin@acc.gov.sl", Role::Admin);
    assert!(view.last_login_at.is_none());

    let outcome = service
        .login(LoginRequest {
            email: "ADMIN@acc.gov.sl".to_string(),
            password: "Str0ngPassw0rd".to_string(),
        })
        .expect("login succeeds");

    assert_eq!(outcome.token.token_type, "Bearer");
    let stored = repository.fetch(&view.id).expect("fetch").expect("stored");
    assert!(stored.last_login_at.is_some());

    let session = service
        .authenticate(&outcome.token.token)
        .expect("token authenticates");
    assert_eq!(session.user_id, view.id);
    assert_eq!(session.role, Role::Admin);
}

#[test]
fn login_rejects_wrong_password_and_inactive_accounts() {
    let (service, _) = build_service();
    let view = create(&service, "viewer@acc.gov.sl", Role::Viewer);
    let admin = create(&service, "admin@acc.gov.sl", Role::Admin);

    let wrong = service.login(LoginRequest {
        email: "viewer@acc.gov.sl".to_string(),
        password: "not-the-password".to_string(),
    });
    assert!(matches!(wrong, Err(AccountServiceError::InvalidCredentials)));

    service
        .update_user(
            &view.id,
            UserPatch {
                is_active: Some(false),
                ..UserPatch::default()
            },
            &session_for(&admin),
        )
        .expect("deactivated");

    let inactive = service.login(LoginRequest {
        email: "viewer@acc.gov.sl".to_string(),
        password: "Str0ngPassw0rd".to_string(),
    });
    assert!(matches!(inactive, Err(AccountServiceError::InactiveAccount)));
}

#[test]
fn tokens_from_another_secret_are_rejected() {
    let (service, _) = build_service();
    let view = create(&service, "editor@acc.gov.sl", Role::Editor);
    let stored = service.get(&view.id).expect("user exists");

    let foreign = TokenAuthority::new("some-other-secret", 30)
        .issue(&stored)
        .expect("token issued");
    assert!(matches!(
        service.authenticate(&foreign.token),
        Err(AccountServiceError::Token(_))
    ));
}

#[test]
fn deactivating_yourself_is_refused() {
    let (service, _) = build_service();
    let admin = create(&service, "admin@acc.gov.sl", Role::Admin);
    let session = session_for(&admin);

    assert!(matches!(
        service.deactivate(&admin.id, &session),
        Err(AccountServiceError::SelfDeactivation)
    ));

    let other = create(&service, "editor@acc.gov.sl", Role::Editor);
    let updated = service
        .deactivate(&other.id, &session)
        .expect("other account deactivated");
    assert!(!updated.is_active);
    assert_eq!(service.count_active().expect("count"), 1);
}

#[test]
fn admins_cannot_lock_themselves_out_through_updates() {
    let (service, _) = build_service();
    let admin = create(&service, "admin@acc.gov.sl", Role::Admin);
    let session = session_for(&admin);

    let deactivate = service.update_user(
        &admin.id,
        UserPatch {
            is_active: Some(false),
            ..UserPatch::default()
        },
        &session,
    );
    assert!(matches!(deactivate, Err(AccountServiceError::SelfDeactivation)));

    let demote = service.update_user(
        &admin.id,
        UserPatch {
            role: Some(Role::Viewer),
            ..UserPatch::default()
        },
        &session,
    );
    assert!(matches!(demote, Err(AccountServiceError::SelfDemotion)));

    let renamed = service
        .update_user(
            &admin.id,
            UserPatch {
                name: Some("Chief Administrator".to_string()),
                role: Some(Role::Admin),
                is_active: Some(true),
                ..UserPatch::default()
            },
            &session,
        )
        .expect("harmless self edit");
    assert_eq!(renamed.name, "Chief Administrator");

    let login = service.login(LoginRequest {
        email: "admin@acc.gov.sl".to_string(),
        password: "Str0ngPassw0rd".to_string(),
    });
    assert!(login.is_ok());
}

#[test]
fn unknown_accounts_still_pay_for_a_password_check() {
    let (service, _) = build_service();
    let unknown = service.login(LoginRequest {
        email: "nobody@acc.gov.sl".to_string(),
        password: "Str0ngPassw0rd".to_string(),
    });
    assert!(matches!(unknown, Err(AccountServiceError::InvalidCredentials)));
    assert!(service.decoy_hashed());
}

#[test]
fn ensure_admin_is_idempotent() {
    let (service, _) = build_service();
    let first = service
        .ensure_admin("admin@acc.gov.sl", "Admin@123")
        .expect("admin seeded");
    let second = service
        .ensure_admin("admin@acc.gov.sl", "Admin@123")
        .expect("admin already present");

    assert_eq!(first.id, second.id);
    assert_eq!(first.role, Role::Admin);
    assert_eq!(service.list_users().expect("list").len(), 1);
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let service = AccountService::new(
        Arc::new(UnavailableRepository),
        TokenAuthority::new(SECRET, 30),
        test_hasher(),
    );
    assert!(matches!(
        service.list_users(),
        Err(AccountServiceError::Repository(_))
    ));
}
