//! Integration tests for login, registration and profile editing.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use homestore_core::Role;
use homestore_integration_tests::{TestContext, user};
use homestore_storefront::services::{LoginForm, ProfileForm, RegistrationForm};
use rand::SeedableRng;
use rand::rngs::StdRng;
use secrecy::SecretString;

const PASSWORD: &str = "Sofa@2025oak";

fn profile_form(phone: &str, email: &str, nickname: &str) -> ProfileForm {
    ProfileForm {
        phone: phone.to_string(),
        email: email.to_string(),
        birthdate: "1990-04-12".to_string(),
        password: SecretString::from(PASSWORD.to_string()),
        first_name: "Olga".to_string(),
        last_name: "Ivanova".to_string(),
        middle_name: String::new(),
        nickname: nickname.to_string(),
    }
}

fn registration(phone: &str, email: &str, nickname: &str) -> RegistrationForm {
    RegistrationForm {
        profile: profile_form(phone, email, nickname),
        password_confirm: SecretString::from(PASSWORD.to_string()),
        agreement: true,
    }
}

fn login_form(login: &str, password: &str) -> LoginForm {
    LoginForm {
        login: login.to_string(),
        password: SecretString::from(password.to_string()),
    }
}

#[tokio::test]
async fn test_register_then_login_by_phone_and_email() {
    let ctx = TestContext::new().await;

    let alert = ctx
        .store
        .account()
        .register(&registration("+375291234567", "olga@example.by", "olgaStar42"))
        .await;
    assert_eq!(alert.message, "Registration successful!");

    let users = ctx.catalog.records("users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["role"], "customer");
    assert_eq!(users[0]["nickname"], "olgaStar42");
    let id = users[0]["id"].as_i64().unwrap();

    let alert = ctx
        .store
        .account()
        .login(&login_form("+375291234567", PASSWORD))
        .await;
    assert_eq!(alert.message, "Login successful!");
    let session = ctx.store.session().await.unwrap();
    assert_eq!(session.user_id.as_i64(), id);
    assert_eq!(session.role, Role::Customer);

    ctx.store.account().logout().await;
    assert!(ctx.store.session().await.is_none());

    let alert = ctx
        .store
        .account()
        .login(&login_form("olga@example.by", PASSWORD))
        .await;
    assert_eq!(alert.message, "Login successful!");
    assert!(ctx.store.session().await.is_some());
}

#[tokio::test]
async fn test_login_failures() {
    let ctx = TestContext::new().await;
    ctx.catalog.insert(
        "users",
        user("+375291234567", "olga@example.by", "olgaStar42", PASSWORD, Role::Customer),
    );

    let alert = ctx
        .store
        .account()
        .login(&login_form("olga@example.by", "Wrong@2025oak"))
        .await;
    assert!(alert.is_error());
    assert_eq!(alert.message, "Incorrect password");

    let alert = ctx
        .store
        .account()
        .login(&login_form("+375331112233", PASSWORD))
        .await;
    assert_eq!(alert.message, "Phone or email not found");
    assert!(ctx.store.session().await.is_none());
}

#[tokio::test]
async fn test_admin_login_keeps_role() {
    let ctx = TestContext::new().await;
    ctx.catalog.insert(
        "users",
        user("+375441234567", "admin@example.by", "admin", PASSWORD, Role::Admin),
    );

    let alert = ctx
        .store
        .account()
        .login(&login_form("admin@example.by", PASSWORD))
        .await;
    assert_eq!(alert.message, "Login successful!");
    assert!(ctx.store.session().await.unwrap().is_admin());
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let ctx = TestContext::new().await;
    ctx.catalog.insert(
        "users",
        user("+375291234567", "olga@example.by", "olgaStar42", PASSWORD, Role::Customer),
    );

    let alert = ctx
        .store
        .account()
        .register(&registration("+375291234567", "olga@example.by", "olgaStar42"))
        .await;
    assert!(alert.is_error());
    assert_eq!(
        alert.message,
        "Phone number already registered\nEmail already registered\nNickname already taken"
    );
    assert_eq!(ctx.catalog.records("users").len(), 1);
}

#[tokio::test]
async fn test_registration_needs_agreement_and_matching_passwords() {
    let ctx = TestContext::new().await;
    let mut form = registration("+375291234567", "olga@example.by", "olgaStar42");
    form.password_confirm = SecretString::from("Other@2025oak".to_string());
    form.agreement = false;

    let alert = ctx.store.account().register(&form).await;
    assert_eq!(
        alert.message,
        "Passwords do not match\nYou must accept the user agreement"
    );
    assert!(ctx.catalog.records("users").is_empty());
}

#[tokio::test]
async fn test_update_profile() {
    let ctx = TestContext::new().await;
    let id = ctx.catalog.insert(
        "users",
        user("+375291234567", "olga@example.by", "olgaStar42", PASSWORD, Role::Customer),
    );
    let session = ctx.login_as(id, Role::Customer).await;

    let current = ctx.store.account().profile(Some(&session)).await.unwrap();
    let mut form = ProfileForm::from_user(&current);
    form.email = "olga.ivanova@example.by".to_string();

    let alert = ctx
        .store
        .account()
        .update_profile(Some(&session), &form)
        .await;
    assert_eq!(alert.message, "Profile updated successfully!");
    assert_eq!(
        ctx.catalog.record("users", id).unwrap()["email"],
        "olga.ivanova@example.by"
    );
}

#[tokio::test]
async fn test_profile_cannot_take_another_users_phone() {
    let ctx = TestContext::new().await;
    let id = ctx.catalog.insert(
        "users",
        user("+375291234567", "olga@example.by", "olgaStar42", PASSWORD, Role::Customer),
    );
    ctx.catalog.insert(
        "users",
        user("+375337654321", "ivan@example.by", "ivanB", PASSWORD, Role::Customer),
    );
    let session = ctx.login_as(id, Role::Customer).await;

    let form = profile_form("+375337654321", "olga@example.by", "olgaStar42");
    let alert = ctx
        .store
        .account()
        .update_profile(Some(&session), &form)
        .await;
    assert_eq!(alert.message, "Phone number already registered");
}

#[tokio::test]
async fn test_profile_needs_login() {
    let ctx = TestContext::new().await;
    let err = ctx.store.account().profile(None).await.unwrap_err();
    assert_eq!(err.alert(), "Please log in to continue");
}

#[tokio::test]
async fn test_suggest_nickname_is_free() {
    let ctx = TestContext::new().await;
    let mut rng = StdRng::seed_from_u64(42);

    let nickname = ctx
        .store
        .account()
        .suggest_nickname(&mut rng, "Olga", "Ivanova")
        .await
        .unwrap();
    assert!(!nickname.is_empty());

    let alert = ctx
        .store
        .account()
        .suggest_nickname(&mut rng, " ", "Ivanova")
        .await
        .unwrap_err();
    assert_eq!(alert.message, "First name is required");
}
