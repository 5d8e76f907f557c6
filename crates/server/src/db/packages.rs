//! Package repository for database operations.
//!
//! Every read, update, and delete here is scoped to the owning client: the
//! `client_id` filter is part of the SQL, so a package belonging to another
//! account simply does not exist from the caller's point of view.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use parceldock_core::{ClientId, PackageId, PackageStatus};

use super::RepositoryError;
use crate::models::{NewPackage, Package, PackageChanges};

/// Raw `package` table row.
#[derive(sqlx::FromRow)]
struct PackageRow {
    id: i32,
    client_id: i32,
    specs: serde_json::Value,
    date: Option<String>,
    time: Option<String>,
    pick_city: Option<String>,
    pick_address: Option<String>,
    dest_city: Option<String>,
    dest_address: Option<String>,
    recipient_name: Option<String>,
    recipient_tax_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PackageRow {
    fn into_package(self) -> Result<Package, RepositoryError> {
        let status: PackageStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Package {
            id: PackageId::new(self.id),
            client_id: ClientId::new(self.client_id),
            specs: self.specs,
            date: self.date,
            time: self.time,
            pick_city: self.pick_city,
            pick_address: self.pick_address,
            dest_city: self.dest_city,
            dest_address: self.dest_address,
            recipient_name: self.recipient_name,
            recipient_tax_id: self.recipient_tax_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PACKAGE_COLUMNS: &str = "id, client_id, specs, date, time, pick_city, pick_address, \
     dest_city, dest_address, recipient_name, recipient_tax_id, status, created_at, updated_at";

/// Repository for package database operations.
pub struct PackageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PackageRepository<'a> {
    /// Create a new package repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new package owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        owner: ClientId,
        new: &NewPackage,
    ) -> Result<Package, RepositoryError> {
        let query = format!(
            r"
            INSERT INTO package
                (client_id, specs, date, time, pick_city, pick_address,
                 dest_city, dest_address, recipient_name, recipient_tax_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PACKAGE_COLUMNS}
            "
        );

        let row = sqlx::query_as::<_, PackageRow>(&query)
            .bind(owner.as_i32())
            .bind(&new.specs)
            .bind(new.date.as_deref())
            .bind(new.time.as_deref())
            .bind(new.pick_city.as_deref())
            .bind(new.pick_address.as_deref())
            .bind(new.dest_city.as_deref())
            .bind(new.dest_address.as_deref())
            .bind(new.recipient_name.as_deref())
            .bind(new.recipient_tax_id.as_deref())
            .bind(new.status.to_string())
            .fetch_one(self.pool)
            .await?;

        row.into_package()
    }

    /// Get a single package, scoped to its owner.
    ///
    /// Returns `None` when the package doesn't exist or belongs to another
    /// client - callers cannot tell the difference.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        owner: ClientId,
        id: PackageId,
    ) -> Result<Option<Package>, RepositoryError> {
        let query = format!(
            r"
            SELECT {PACKAGE_COLUMNS}
            FROM package
            WHERE client_id = $1 AND id = $2
            "
        );

        let row = sqlx::query_as::<_, PackageRow>(&query)
            .bind(owner.as_i32())
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(PackageRow::into_package).transpose()
    }

    /// List all packages owned by `owner`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, owner: ClientId) -> Result<Vec<Package>, RepositoryError> {
        let query = format!(
            r"
            SELECT {PACKAGE_COLUMNS}
            FROM package
            WHERE client_id = $1
            ORDER BY created_at ASC
            "
        );

        let rows = sqlx::query_as::<_, PackageRow>(&query)
            .bind(owner.as_i32())
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(PackageRow::into_package).collect()
    }

    /// Apply a partial update to an owned package.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the package doesn't exist or
    /// belongs to another client.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        owner: ClientId,
        id: PackageId,
        changes: &PackageChanges,
    ) -> Result<Package, RepositoryError> {
        let query = format!(
            r"
            UPDATE package
            SET specs = COALESCE($3, specs),
                date = COALESCE($4, date),
                time = COALESCE($5, time),
                pick_city = COALESCE($6, pick_city),
                pick_address = COALESCE($7, pick_address),
                dest_city = COALESCE($8, dest_city),
                dest_address = COALESCE($9, dest_address),
                recipient_name = COALESCE($10, recipient_name),
                recipient_tax_id = COALESCE($11, recipient_tax_id),
                status = COALESCE($12, status),
                updated_at = now()
            WHERE client_id = $1 AND id = $2
            RETURNING {PACKAGE_COLUMNS}
            "
        );

        let row = sqlx::query_as::<_, PackageRow>(&query)
            .bind(owner.as_i32())
            .bind(id.as_i32())
            .bind(changes.specs.as_ref())
            .bind(changes.date.as_deref())
            .bind(changes.time.as_deref())
            .bind(changes.pick_city.as_deref())
            .bind(changes.pick_address.as_deref())
            .bind(changes.dest_city.as_deref())
            .bind(changes.dest_address.as_deref())
            .bind(changes.recipient_name.as_deref())
            .bind(changes.recipient_tax_id.as_deref())
            .bind(changes.status.map(|s| s.to_string()))
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.into_package()
    }

    /// Delete an owned package.
    ///
    /// # Returns
    ///
    /// Returns `true` if the package was deleted, `false` if it didn't exist
    /// or belongs to another client.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, owner: ClientId, id: PackageId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM package
            WHERE client_id = $1 AND id = $2
            ",
        )
        .bind(owner.as_i32())
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every package owned by `owner`, returning the count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self, owner: ClientId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM package
            WHERE client_id = $1
            ",
        )
        .bind(owner.as_i32())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Promote every `Saved` package created on or before `cutoff` to
    /// `Completed`, across all owners. Used by the background sweep.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn complete_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE package
            SET status = 'Completed', updated_at = now()
            WHERE status = 'Saved' AND created_at <= $1
            ",
        )
        .bind(cutoff)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
