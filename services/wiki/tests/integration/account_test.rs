use delight_auth_types::password::verify_password;
use delight_auth_types::token::validate_session_token;
use delight_domain::user::UserRole;
use delight_wiki::error::WikiServiceError;
use delight_wiki::usecase::account::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};

use crate::helpers::{MockStore, TEST_PASSWORD};

const SECRET: &str = "account-test-secret";

fn register_input(username: &str, email: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_owned(),
        email: email.to_owned(),
        password: "harvest123".to_owned(),
        password_confirmation: "harvest123".to_owned(),
        agree_terms: true,
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_normal_user_with_hashed_password() {
    let store = MockStore::new();
    let user = RegisterUseCase {
        users: store.users(),
    }
    .execute(register_input("  farmer ", "farmer@example.com"))
    .await
    .unwrap();

    assert_eq!(user.username, "farmer");
    assert_eq!(user.role, UserRole::Normal);
    assert_ne!(user.password_hash, "harvest123");
    assert!(verify_password("harvest123", &user.password_hash));
    assert!(store.user(user.id).is_some());
}

#[tokio::test]
async fn should_reject_taken_username_and_email() {
    let store = MockStore::new();
    store.add_user("alice", UserRole::Normal);
    let usecase = RegisterUseCase {
        users: store.users(),
    };

    let username = usecase
        .execute(register_input("alice", "other@example.com"))
        .await;
    assert!(
        matches!(username, Err(WikiServiceError::UsernameTaken)),
        "expected UsernameTaken, got {:?}",
        username.err()
    );

    let email = usecase
        .execute(register_input("alicia", "alice@example.com"))
        .await;
    assert!(
        matches!(email, Err(WikiServiceError::EmailTaken)),
        "expected EmailTaken, got {:?}",
        email.err()
    );
}

#[tokio::test]
async fn should_validate_registration_form() {
    let store = MockStore::new();
    let usecase = RegisterUseCase {
        users: store.users(),
    };

    let mut weak = register_input("farmer", "farmer@example.com");
    weak.password = "password".to_owned();
    weak.password_confirmation = "password".to_owned();
    assert!(matches!(
        usecase.execute(weak).await,
        Err(WikiServiceError::WeakPassword)
    ));

    let mut mismatch = register_input("farmer", "farmer@example.com");
    mismatch.password_confirmation = "harvest124".to_owned();
    assert!(matches!(
        usecase.execute(mismatch).await,
        Err(WikiServiceError::PasswordMismatch)
    ));

    let mut terms = register_input("farmer", "farmer@example.com");
    terms.agree_terms = false;
    assert!(matches!(
        usecase.execute(terms).await,
        Err(WikiServiceError::TermsNotAccepted)
    ));

    assert!(matches!(
        usecase.execute(register_input("fa", "farmer@example.com")).await,
        Err(WikiServiceError::InvalidUsername)
    ));
    assert!(matches!(
        usecase.execute(register_input("farmer", "not-an-email")).await,
        Err(WikiServiceError::InvalidEmail)
    ));
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_by_username_or_email() {
    let store = MockStore::new();
    let alice = store.add_user("alice", UserRole::Admin);
    let usecase = LoginUseCase {
        users: store.users(),
        jwt_secret: SECRET,
    };

    for login in ["alice", "alice@example.com"] {
        let out = usecase
            .execute(LoginInput {
                login: login.to_owned(),
                password: TEST_PASSWORD.to_owned(),
                remember_me: false,
            })
            .await
            .unwrap();
        assert_eq!(out.user.id, alice.id);

        let info = validate_session_token(&out.token, SECRET).unwrap();
        assert_eq!(info.user_id, alice.id);
        assert_eq!(info.user_role, UserRole::Admin.as_u8());
    }
}

#[tokio::test]
async fn should_extend_session_when_remembered() {
    let store = MockStore::new();
    store.add_user("alice", UserRole::Normal);
    let usecase = LoginUseCase {
        users: store.users(),
        jwt_secret: SECRET,
    };
    let login = |remember_me| LoginInput {
        login: "alice".to_owned(),
        password: TEST_PASSWORD.to_owned(),
        remember_me,
    };

    let short = usecase.execute(login(false)).await.unwrap();
    let long = usecase.execute(login(true)).await.unwrap();
    let diff = long.exp - short.exp;
    assert!(
        (2_592_000 - 86_400 - 5..=2_592_000 - 86_400 + 5).contains(&diff),
        "unexpected ttl difference {diff}"
    );
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_login() {
    let store = MockStore::new();
    store.add_user("alice", UserRole::Normal);
    let usecase = LoginUseCase {
        users: store.users(),
        jwt_secret: SECRET,
    };

    for (login, password) in [("alice", "wrong-pass1"), ("nobody", TEST_PASSWORD)] {
        let result = usecase
            .execute(LoginInput {
                login: login.to_owned(),
                password: password.to_owned(),
                remember_me: false,
            })
            .await;
        assert!(
            matches!(result, Err(WikiServiceError::InvalidCredentials)),
            "expected InvalidCredentials for {login}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_treat_logout_without_session_as_noop() {
    let store = MockStore::new();
    let alice = store.add_user("alice", UserRole::Normal);
    let usecase = LogoutUseCase {
        users: store.users(),
    };
    usecase.execute(None).await.unwrap();
    usecase.execute(Some(alice.id)).await.unwrap();
}
