//! Embedded PostgreSQL provisioning for integration tests.
//!
//! A template database is migrated once per migration set (keyed by a hash of
//! `backend/migrations`); every test then clones it into a throwaway database.
//! Seeding goes through `postgres` so fixtures do not depend on the adapters
//! under test.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const TEMPLATE_NAME_PREFIX: &str = "sharefood_template";

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Failure while provisioning or seeding a test database.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SeedError(String);

impl SeedError {
    fn from_postgres(context: &str, error: &postgres::Error) -> Self {
        let detail = error
            .as_db_error()
            .map(|db| format!("{:?}: {}", db.code(), db.message()))
            .unwrap_or_else(|| error.to_string());
        Self(format!("{context}: {detail}"))
    }
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, SeedError> {
    let hash =
        hash_directory(migrations_dir()).map_err(|err| SeedError(format!("hash migrations: {err}")))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn migrate_schema(url: &str) -> Result<(), SeedError> {
    let mut conn =
        PgConnection::establish(url).map_err(|err| SeedError(format!("connect: {err}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| SeedError(format!("migrate: {err}")))?;
    Ok(())
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, SeedError> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| SeedError(format!("template check: {err:?}")))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| SeedError(format!("create template: {err:?}")))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }
    Ok(template_name)
}

/// Clone a fresh, migrated database from the shared cluster.
pub fn provision_database() -> Result<TemporaryDatabase, SeedError> {
    let cluster =
        shared_cluster_handle().map_err(|err| SeedError(format!("start cluster: {err:?}")))?;
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| SeedError(format!("clone template: {err:?}")))
}

/// Insert a user with a placeholder password hash.
pub fn seed_user(url: &str, email: &str) -> Result<Uuid, SeedError> {
    let mut client =
        Client::connect(url, NoTls).map_err(|err| SeedError::from_postgres("connect", &err))?;
    let id_user = Uuid::new_v4();
    client
        .execute(
            "INSERT INTO users (id_user, name, email, phone_number, password) \
             VALUES ($1, $2, $3, '0812345678', 'not-a-hash')",
            &[&id_user, &email.split('@').next().unwrap_or(email), &email],
        )
        .map_err(|err| SeedError::from_postgres("insert user", &err))?;
    Ok(id_user)
}

/// Insert a live food owned by `owner` with `quantity` in stock.
pub fn seed_food(url: &str, owner: Uuid, quantity: i32) -> Result<Uuid, SeedError> {
    let mut client =
        Client::connect(url, NoTls).map_err(|err| SeedError::from_postgres("connect", &err))?;
    let id_food = Uuid::new_v4();
    client
        .execute(
            "INSERT INTO foods (id_food, id_user, name, quantity) VALUES ($1, $2, 'Rendang', $3)",
            &[&id_food, &owner, &quantity],
        )
        .map_err(|err| SeedError::from_postgres("insert food", &err))?;
    Ok(id_food)
}

/// Current stock of a food.
pub fn food_quantity(url: &str, id_food: Uuid) -> Result<i32, SeedError> {
    let mut client =
        Client::connect(url, NoTls).map_err(|err| SeedError::from_postgres("connect", &err))?;
    let row = client
        .query_one("SELECT quantity FROM foods WHERE id_food = $1", &[&id_food])
        .map_err(|err| SeedError::from_postgres("read stock", &err))?;
    Ok(row.get(0))
}

/// Stored status code of a request.
pub fn request_status(url: &str, id_request: Uuid) -> Result<i16, SeedError> {
    let mut client =
        Client::connect(url, NoTls).map_err(|err| SeedError::from_postgres("connect", &err))?;
    let row = client
        .query_one(
            "SELECT status FROM requests WHERE id_request = $1",
            &[&id_request],
        )
        .map_err(|err| SeedError::from_postgres("read status", &err))?;
    Ok(row.get(0))
}
