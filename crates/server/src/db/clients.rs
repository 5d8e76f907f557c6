//! Client repository for database operations.
//!
//! Provides database access for customer accounts. Queries use the runtime
//! sqlx API; rows are decoded into private row structs and validated into
//! domain types.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use parceldock_core::{ClientId, Email};

use super::RepositoryError;
use crate::models::Client;

/// Raw `client` table row.
#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i32,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(self) -> Result<Client, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Client {
            id: ClientId::new(self.id),
            name: self.name,
            email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Partial update of a client account. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
}

/// Repository for client database operations.
pub struct ClientRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a client by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            SELECT id, name, email, created_at, updated_at
            FROM client
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(ClientRow::into_client).transpose()
    }

    /// Get a client by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            SELECT id, name, email, created_at, updated_at
            FROM client
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(ClientRow::into_client).transpose()
    }

    /// Create a new client with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<Client, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            INSERT INTO client (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_client()
    }

    /// Get a client's password hash by email.
    ///
    /// Returns `None` if no client has this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Client, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct ClientWithHashRow {
            #[sqlx(flatten)]
            client: ClientRow,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, ClientWithHashRow>(
            r"
            SELECT id, name, email, created_at, updated_at, password_hash
            FROM client
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        Ok(Some((r.client.into_client()?, r.password_hash)))
    }

    /// Apply a partial update to a client account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the client doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new email is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ClientId,
        changes: &ClientChanges,
    ) -> Result<Client, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            UPDATE client
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, created_at, updated_at
            ",
        )
        .bind(id.as_i32())
        .bind(changes.name.as_deref())
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.password_hash.as_deref())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.ok_or(RepositoryError::NotFound)?.into_client()
    }

    /// Delete a client and every package they own, in one transaction.
    ///
    /// Returns the deleted client and the number of packages removed with it.
    /// Packages owned by other clients are untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the client doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_cascade(
        &self,
        id: ClientId,
    ) -> Result<(Client, u64), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let packages_deleted = sqlx::query(
            r"
            DELETE FROM package
            WHERE client_id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let row = sqlx::query_as::<_, ClientRow>(
            r"
            DELETE FROM client
            WHERE id = $1
            RETURNING id, name, email, created_at, updated_at
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(r) = row else {
            tx.rollback().await?;
            return Err(RepositoryError::NotFound);
        };

        tx.commit().await?;

        Ok((r.into_client()?, packages_deleted))
    }
}
