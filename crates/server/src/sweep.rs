//! Background completion sweep.
//!
//! Packages left in `Saved` for longer than a day are assumed delivered and
//! moved to `Completed`. The sweep runs on an hourly tick for the lifetime
//! of the process; a failed pass is logged and retried on the next tick.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use sqlx::PgPool;

use crate::db::packages::PackageRepository;

/// How long a package may sit in `Saved` before the sweep completes it.
const COMPLETION_AGE: TimeDelta = TimeDelta::hours(24);

/// Interval between sweep passes.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Cutoff instant for the current pass: packages created at or before this
/// moment are overdue.
fn completion_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - COMPLETION_AGE
}

/// Run one sweep pass, returning the number of packages completed.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn sweep_once(pool: &PgPool) -> Result<u64, crate::db::RepositoryError> {
    let repo = PackageRepository::new(pool);
    repo.complete_stale(completion_cutoff(Utc::now())).await
}

/// Spawn the hourly sweep task.
///
/// The first pass runs immediately so a restart doesn't postpone overdue
/// completions by up to an hour.
pub fn start_completion_sweep(pool: PgPool) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);

        loop {
            ticker.tick().await;

            match sweep_once(&pool).await {
                Ok(0) => tracing::debug!("Completion sweep found nothing to do"),
                Ok(completed) => {
                    tracing::info!(completed, "Completion sweep finished");
                }
                Err(error) => {
                    tracing::error!(%error, "Completion sweep failed");
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_cutoff_is_24_hours_back() {
        let now = Utc::now();
        let cutoff = completion_cutoff(now);
        assert_eq!(now - cutoff, TimeDelta::hours(24));
    }

    #[test]
    fn test_package_saved_25_hours_ago_is_overdue() {
        let now = Utc::now();
        let created_at = now - TimeDelta::hours(25);
        assert!(created_at <= completion_cutoff(now));
    }

    #[test]
    fn test_package_saved_23_hours_ago_is_not_overdue() {
        let now = Utc::now();
        let created_at = now - TimeDelta::hours(23);
        assert!(created_at > completion_cutoff(now));
    }
}
