//! Account and credential service.
//!
//! Registration, login, profile updates and account deletion. Password
//! hashing uses Argon2id with the salt embedded in the PHC output string;
//! validation rules for email and password shape live in `parceldock-core`.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use parceldock_core::{ClientId, Email, password};

use crate::db::RepositoryError;
use crate::db::clients::{ClientChanges, ClientRepository};
use crate::models::Client;

/// Account service.
///
/// Handles client registration, login, profile updates, and deletion.
pub struct AuthService<'a> {
    clients: ClientRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool),
        }
    }

    /// Register a new client with name, email, and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::ClientAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Client, AuthError> {
        // Validate email
        let email = Email::parse(email)?;

        // Validate password
        password::validate_strength(password)?;

        // Hash password
        let password_hash = hash_password(password)?;

        // Create client
        let client = self
            .clients
            .create(name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::ClientAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(client)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<Client, AuthError> {
        // Validate email format
        let email = Email::parse(email)?;

        // Get client with password hash
        let (client, password_hash) = self
            .clients
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        if !verify_password(password, &password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(client)
    }

    /// Get a client by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ClientNotFound` if the client doesn't exist.
    pub async fn get_client(&self, id: ClientId) -> Result<Client, AuthError> {
        self.clients
            .get_by_id(id)
            .await?
            .ok_or(AuthError::ClientNotFound)
    }

    /// Apply a partial profile update.
    ///
    /// A new email is re-validated and re-checked for uniqueness; a new
    /// password is re-validated and re-hashed. `None` fields are untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` / `AuthError::WeakPassword` for
    /// format failures, `AuthError::ClientAlreadyExists` on an email
    /// conflict, and `AuthError::ClientNotFound` if the client is gone.
    pub async fn update_account(
        &self,
        id: ClientId,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Client, AuthError> {
        let email = email.map(Email::parse).transpose()?;

        let password_hash = match password {
            Some(p) => {
                password::validate_strength(p)?;
                Some(hash_password(p)?)
            }
            None => None,
        };

        let changes = ClientChanges {
            name: name.map(str::to_owned),
            email,
            password_hash,
        };

        self.clients.update(id, &changes).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::ClientAlreadyExists,
            RepositoryError::NotFound => AuthError::ClientNotFound,
            other => AuthError::Repository(other),
        })
    }

    /// Delete a client account and all of their packages.
    ///
    /// Returns the deleted client and the number of packages removed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ClientNotFound` if the client doesn't exist.
    pub async fn delete_account(&self, id: ClientId) -> Result<(Client, u64), AuthError> {
        self.clients.delete_cascade(id).await.map_err(|e| match e {
            RepositoryError::NotFound => AuthError::ClientNotFound,
            other => AuthError::Repository(other),
        })
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the algorithm cannot produce output.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC hash string.
///
/// Never fails: a mismatch, or an unparseable hash, is simply `false`.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hash = hash_password("Valid1Pass!").unwrap();
        assert!(verify_password("Valid1Pass!", &hash));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("Valid1Pass!").unwrap();
        assert!(!verify_password("Other2Pass!", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("Valid1Pass!", "not-a-phc-string"));
        assert!(!verify_password("Valid1Pass!", ""));
    }

    #[test]
    fn test_hash_embeds_salt() {
        // Two hashes of the same password differ because each embeds a
        // fresh random salt
        let a = hash_password("Valid1Pass!").unwrap();
        let b = hash_password("Valid1Pass!").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2"));
    }
}
