//! Integration tests for account deletion and package ownership scoping.
//!
//! These tests require a running `PostgreSQL` database; see the crate docs
//! for setup. Run with: `cargo test -p parceldock-integration-tests -- --ignored`

use parceldock_integration_tests::{test_pool, unique_email};
use parceldock_server::db::PackageRepository;
use parceldock_server::models::{Client, NewPackage};
use parceldock_server::services::AuthService;
use sqlx::PgPool;

const PASSWORD: &str = "Valid1Pass!";

async fn register_client(pool: &PgPool, name: &str) -> Client {
    AuthService::new(pool)
        .register(name, &unique_email(), PASSWORD)
        .await
        .expect("registration should succeed")
}

fn package_to(city: &str) -> NewPackage {
    NewPackage {
        specs: serde_json::json!({"weightKg": 2}),
        date: None,
        time: None,
        pick_city: None,
        pick_address: None,
        dest_city: Some(city.to_string()),
        dest_address: None,
        recipient_name: None,
        recipient_tax_id: None,
        status: parceldock_core::PackageStatus::Saved,
    }
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set PARCELDOCK_TEST_DATABASE_URL)"]
async fn test_account_deletion_cascades_to_owned_packages_only() {
    let pool = test_pool().await;
    let packages = PackageRepository::new(&pool);

    let doomed = register_client(&pool, "Doomed").await;
    let survivor = register_client(&pool, "Survivor").await;

    packages
        .create(doomed.id, &package_to("Cali"))
        .await
        .expect("package creation should succeed");
    packages
        .create(doomed.id, &package_to("Medellin"))
        .await
        .expect("package creation should succeed");
    let kept = packages
        .create(survivor.id, &package_to("Bogota"))
        .await
        .expect("package creation should succeed");

    let (deleted, package_count) = AuthService::new(&pool)
        .delete_account(doomed.id)
        .await
        .expect("account deletion should succeed");
    assert_eq!(deleted.id, doomed.id);
    assert_eq!(package_count, 2);

    // The deleted account's packages are gone
    let remaining: i64 = sqlx::query_scalar("SELECT count(*) FROM package WHERE client_id = $1")
        .bind(doomed.id.as_i32())
        .fetch_one(&pool)
        .await
        .expect("count query should succeed");
    assert_eq!(remaining, 0);

    // The other account's package is untouched
    let survivors = packages
        .list(survivor.id)
        .await
        .expect("listing should succeed");
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, kept.id);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set PARCELDOCK_TEST_DATABASE_URL)"]
async fn test_packages_are_invisible_across_accounts() {
    let pool = test_pool().await;
    let packages = PackageRepository::new(&pool);

    let owner = register_client(&pool, "Owner").await;
    let other = register_client(&pool, "Other").await;

    let package = packages
        .create(owner.id, &package_to("Cartagena"))
        .await
        .expect("package creation should succeed");

    // A different account cannot see or delete it
    let unseen = packages
        .get(other.id, package.id)
        .await
        .expect("lookup should succeed");
    assert!(unseen.is_none());

    let deleted = packages
        .delete(other.id, package.id)
        .await
        .expect("delete should succeed");
    assert!(!deleted);

    // The owner still can
    let seen = packages
        .get(owner.id, package.id)
        .await
        .expect("lookup should succeed");
    assert_eq!(seen.map(|p| p.id), Some(package.id));
}
