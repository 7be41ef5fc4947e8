//! User accounts.
//!
//! Accounts are identified by a username that is unique under
//! case-insensitive comparison and an email address that is unique the same
//! way. Passwords are never stored; stores keep the salted Argon2 PHC string
//! produced by [`hash_password`] and check logins with [`verify_password`].

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::config::AccountConfig;
use crate::error::{Error, Result};

/// Characters that satisfy the "special character" password rule.
const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+=[]{};':\"\\|,.<>/?-";

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Username as originally entered.
    pub username: String,
    /// Email address.
    pub email: String,
    /// When the account was created.
    pub registered_at: DateTime<Utc>,
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User: {} (Email: {})", self.username, self.email)
    }
}

/// A signup request that has passed [`AccountRules::validate`].
#[derive(Debug, Clone)]
pub struct NewAccount {
    username: String,
    email: String,
    password_hash: String,
}

impl NewAccount {
    /// Requested username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Requested email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Argon2 PHC string of the requested password.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Storage for user accounts.
pub trait AccountStore {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateUsername`] or [`Error::DuplicateEmail`] on a
    /// uniqueness clash, or a store error.
    fn register(&mut self, account: &NewAccount) -> Result<User>;

    /// Look up the account matching a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if no account matches, or a
    /// store error.
    fn authenticate(&self, username: &str, password: &str) -> Result<User>;

    /// Whether the username is taken (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn username_exists(&self, username: &str) -> Result<bool>;

    /// Whether the email address is taken (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn email_exists(&self, email: &str) -> Result<bool>;
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// The result is a self-describing PHC string (algorithm, parameters, salt
/// and hash), so hashing the same password twice gives different strings.
///
/// # Errors
///
/// Returns an internal error if the hasher rejects its input.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::internal(format!("password hashing failed: {e}")))
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns a store-unavailable error if `stored` is not a valid PHC string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        Error::store_unavailable("accounts", format!("corrupt password hash: {e}"))
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Signup validation rules.
#[derive(Debug, Clone)]
pub struct AccountRules {
    username_pattern: Regex,
    min_username_length: usize,
    min_password_length: usize,
}

impl AccountRules {
    /// Build rules from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the username pattern cannot be compiled.
    pub fn new(config: &AccountConfig) -> Result<Self> {
        let pattern = format!("^[A-Za-z0-9_]{{{},}}$", config.min_username_length);
        let username_pattern = Regex::new(&pattern)
            .map_err(|e| Error::internal(format!("bad username pattern: {e}")))?;
        Ok(Self {
            username_pattern,
            min_username_length: config.min_username_length,
            min_password_length: config.min_password_length,
        })
    }

    /// Check a password against the strength rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first rule that failed.
    pub fn check_password(&self, password: &str) -> Result<()> {
        if password.chars().count() < self.min_password_length {
            return Err(Error::validation(
                "password",
                format!("must be at least {} characters", self.min_password_length),
            ));
        }
        if !password.chars().any(char::is_uppercase) {
            return Err(Error::validation(
                "password",
                "must contain at least one uppercase letter",
            ));
        }
        if !password.chars().any(char::is_lowercase) {
            return Err(Error::validation(
                "password",
                "must contain at least one lowercase letter",
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(Error::validation(
                "password",
                "must contain at least one digit",
            ));
        }
        if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return Err(Error::validation(
                "password",
                "must contain at least one special character",
            ));
        }
        Ok(())
    }

    /// Validate a signup request against the rules and the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for malformed input,
    /// [`Error::DuplicateUsername`] / [`Error::DuplicateEmail`] when the
    /// identity is taken, or a store error.
    pub fn validate(
        &self,
        store: &impl AccountStore,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<NewAccount> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::validation("username", "cannot be empty"));
        }
        if username.contains(char::is_whitespace) {
            return Err(Error::validation("username", "cannot contain spaces"));
        }
        if !self.username_pattern.is_match(username) {
            return Err(Error::validation(
                "username",
                format!(
                    "must be at least {} characters of letters, digits, or underscores",
                    self.min_username_length
                ),
            ));
        }
        if store.username_exists(username)? {
            return Err(Error::DuplicateUsername(username.to_string()));
        }

        self.check_password(password)?;

        let email = email.trim();
        if !email.contains('@') || !email.contains('.') {
            return Err(Error::validation("email", format!("'{email}' is not an email address")));
        }
        if store.email_exists(email)? {
            return Err(Error::DuplicateEmail(email.to_string()));
        }

        Ok(NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        })
    }
}
