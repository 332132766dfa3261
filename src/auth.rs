use std::sync::OnceLock;

use regex::Regex;

use crate::core::db::Store;
use crate::core::errors::{StoreError, StoreResult};
use crate::core::kv::KeyValue;
use crate::models::models::{NewUser, SessionUser};

#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Regex should compile"))
}

fn username_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("Regex should compile"))
}

/// Validates the form, creates the account and logs it in.
pub fn signup<K: KeyValue>(store: &Store<K>, form: SignupForm) -> StoreResult<SessionUser> {
    let full_name = form.full_name.trim();
    let username = form.username.trim().to_lowercase();
    let email = form.email.trim().to_lowercase();

    if full_name.is_empty() || username.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(StoreError::Invalid("Please fill in all fields".to_string()));
    }
    if form.password != form.confirm_password {
        return Err(StoreError::Invalid("Passwords do not match".to_string()));
    }
    let min_length = store.config().min_password_length;
    if form.password.chars().count() < min_length {
        return Err(StoreError::Invalid(format!(
            "Password must be at least {} characters",
            min_length
        )));
    }
    if !username_regex().is_match(&username) {
        return Err(StoreError::Invalid(
            "Username must be 3-20 characters, letters, numbers, and underscores only".to_string(),
        ));
    }
    if !email_regex().is_match(&email) {
        return Err(StoreError::Invalid("Please enter a valid email address".to_string()));
    }

    let user = store.create_user(NewUser {
        username,
        email,
        password: form.password,
        full_name: Some(full_name.to_string()),
        avatar: None,
    })?;
    store.set_current_user(&user)?;

    Ok(SessionUser::from(&user))
}

/// Logs in by email or username. Unknown accounts and wrong passwords both
/// come back as `Unauthorized`.
pub fn login<K: KeyValue>(
    store: &Store<K>,
    identifier: &str,
    password: &str,
) -> StoreResult<SessionUser> {
    let identifier = identifier.trim();
    if identifier.is_empty() || password.is_empty() {
        return Err(StoreError::Invalid("Please fill in all fields".to_string()));
    }

    let user = match store.get_user_by_email(identifier)? {
        Some(user) => Some(user),
        None => store.get_user_by_username(identifier)?,
    };
    let Some(user) = user else {
        return Err(StoreError::Unauthorized);
    };
    if !store.verify_password(&user, password) {
        return Err(StoreError::Unauthorized);
    }

    store.set_current_user(&user)?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(SessionUser::from(&user))
}

pub fn logout<K: KeyValue>(store: &Store<K>) -> StoreResult<()> {
    store.logout_user()?;
    tracing::info!("User logged out");
    Ok(())
}
