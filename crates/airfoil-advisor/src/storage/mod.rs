//! Storage layer for airfoil-advisor.
//!
//! `SQLite`-backed implementations of the catalog, history and account
//! stores. Every field of an airfoil is stored as REAL/TEXT, so values read
//! back compare equal to the values written.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::account::{verify_password, AccountStore, NewAccount, User};
use crate::airfoil::Airfoil;
use crate::catalog::{lookup_key, CatalogStore};
use crate::error::{Error, Result};
use crate::flight::FlightParameters;
use crate::history::HistoryStore;

/// Path reported for in-memory databases.
const MEMORY_PATH: &str = ":memory:";

const AIRFOIL_COLUMNS: &str =
    "name, max_cl, min_cd, reynolds_min, reynolds_max, application_type, thickness";

/// Raw airfoil row before validation.
type AirfoilRow = (String, f64, f64, f64, f64, String, f64);

/// Raw history row before validation.
type HistoryRow = (i64, f64, f64, f64, f64);

/// Raw user row before timestamp parsing.
type UserRow = (i64, String, String, String, String);

/// `SQLite` storage for airfoils, accounts and search history.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(MEMORY_PATH),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(MEMORY_PATH),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn count(&self, table: &str) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let newest: Option<String> = self
            .conn
            .query_row(
                "SELECT searched_at FROM search_history ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let db_size_bytes = if self.path.as_os_str() == MEMORY_PATH {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_airfoils: self.count("airfoils")?,
            total_users: self.count("users")?,
            total_searches: self.count("search_history")?,
            last_search: newest.as_deref().and_then(parse_timestamp),
            schema_version: migrations::schema_version(&self.conn)?,
            db_size_bytes,
        })
    }

    fn row_to_airfoil(row: &rusqlite::Row) -> rusqlite::Result<AirfoilRow> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
        ))
    }

    fn airfoil_from_row(raw: AirfoilRow) -> Result<Airfoil> {
        let (name, max_cl, min_cd, re_min, re_max, application_type, thickness) = raw;
        Airfoil::new(&name, max_cl, min_cd, re_min, re_max, application_type, thickness).map_err(
            |e| Error::store_unavailable("catalog", format!("stored airfoil '{name}' is invalid: {e}")),
        )
    }

    fn user_from_row(raw: UserRow) -> Result<User> {
        let (id, username, email, _, registered_at) = raw;
        let registered_at = parse_timestamp(&registered_at).ok_or_else(|| {
            Error::store_unavailable(
                "accounts",
                format!("user {id} has malformed timestamp '{registered_at}'"),
            )
        })?;
        Ok(User {
            id,
            username,
            email,
            registered_at,
        })
    }

    fn find_user(&self, username: &str) -> Result<Option<UserRow>> {
        let row = self
            .conn
            .query_row(
                r"
                SELECT id, username, email, password_hash, registered_at
                FROM users WHERE username_key = ?1
                ",
                [lookup_key(username)],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()?;
        Ok(row)
    }
}

impl CatalogStore for Storage {
    fn list_all(&self) -> Result<Vec<Airfoil>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {AIRFOIL_COLUMNS} FROM airfoils ORDER BY id"))?;
        let rows = stmt
            .query_map([], Self::row_to_airfoil)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Loaded {} airfoils", rows.len());
        rows.into_iter().map(Self::airfoil_from_row).collect()
    }

    fn add(&mut self, airfoil: &Airfoil) -> Result<()> {
        if self.exists(airfoil.name())? {
            debug!("Rejecting duplicate airfoil {}", airfoil.name());
            return Err(Error::DuplicateAirfoil {
                name: airfoil.name().to_string(),
            });
        }

        self.conn.execute(
            r"
            INSERT INTO airfoils
                (name, name_key, max_cl, min_cd, reynolds_min, reynolds_max, application_type, thickness)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                airfoil.name(),
                airfoil.key(),
                airfoil.max_cl(),
                airfoil.min_cd(),
                airfoil.reynolds_min(),
                airfoil.reynolds_max(),
                airfoil.application_type(),
                airfoil.thickness(),
            ],
        )?;

        info!("Cataloged airfoil {}", airfoil.name());
        Ok(())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM airfoils WHERE name_key = ?1",
            [lookup_key(name)],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn find(&self, name: &str) -> Result<Option<Airfoil>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {AIRFOIL_COLUMNS} FROM airfoils WHERE name_key = ?1"),
                [lookup_key(name)],
                Self::row_to_airfoil,
            )
            .optional()?;
        row.map(Self::airfoil_from_row).transpose()
    }
}

impl HistoryStore for Storage {
    fn append(&mut self, username: &str, params: &FlightParameters) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO search_history
                (username_key, speed, altitude, wing_area, required_lift, searched_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                lookup_key(username),
                params.speed(),
                params.altitude(),
                params.wing_area(),
                params.required_lift(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        debug!("Recorded search {} for {}", self.conn.last_insert_rowid(), username);
        Ok(())
    }

    fn list(&self, username: &str) -> Result<Vec<FlightParameters>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, speed, altitude, wing_area, required_lift
            FROM search_history WHERE username_key = ?1 ORDER BY id
            ",
        )?;
        let rows: Vec<HistoryRow> = stmt
            .query_map([lookup_key(username)], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, speed, altitude, wing_area, lift)| {
                FlightParameters::new(speed, altitude, wing_area, lift).map_err(|e| {
                    Error::store_unavailable("history", format!("search {id} is invalid: {e}"))
                })
            })
            .collect()
    }
}

impl AccountStore for Storage {
    fn register(&mut self, account: &NewAccount) -> Result<User> {
        if self.username_exists(account.username())? {
            return Err(Error::DuplicateUsername(account.username().to_string()));
        }
        if self.email_exists(account.email())? {
            return Err(Error::DuplicateEmail(account.email().to_string()));
        }

        let registered_at = Utc::now();
        self.conn.execute(
            r"
            INSERT INTO users
                (username, username_key, email, email_key, password_hash, registered_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                account.username(),
                lookup_key(account.username()),
                account.email(),
                lookup_key(account.email()),
                account.password_hash(),
                registered_at.to_rfc3339(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!("Registered user {} (id {})", account.username(), id);
        Ok(User {
            id,
            username: account.username().to_string(),
            email: account.email().to_string(),
            registered_at,
        })
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let Some(row) = self.find_user(username)? else {
            debug!("Login failed: unknown user {}", username);
            return Err(Error::InvalidCredentials);
        };

        if !verify_password(password, &row.3)? {
            warn!("Login failed: wrong password for {}", username);
            return Err(Error::InvalidCredentials);
        }

        Self::user_from_row(row)
    }

    fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.find_user(username)?.is_some())
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE email_key = ?1",
            [lookup_key(email)],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Number of cataloged airfoils.
    pub total_airfoils: i64,
    /// Number of registered users.
    pub total_users: i64,
    /// Number of recorded searches across all users.
    pub total_searches: i64,
    /// When the most recent search was recorded.
    pub last_search: Option<DateTime<Utc>>,
    /// Schema version recorded in the database.
    pub schema_version: i32,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountRules;
    use crate::config::AccountConfig;
    use crate::logging::init_test_logging;

    fn create_test_storage() -> Storage {
        init_test_logging();
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn airfoil(name: &str) -> Airfoil {
        Airfoil::new(name, 1.2, 0.01, 1e5, 1e6, "General", 0.12).unwrap()
    }

    fn query(speed: f64) -> FlightParameters {
        FlightParameters::new(speed, 100.0, 0.8, 60.0).unwrap()
    }

    fn signup(storage: &mut Storage, username: &str, email: &str) -> User {
        let rules = AccountRules::new(&AccountConfig::default()).unwrap();
        let account = rules.validate(&*storage, username, "Secret#123", email).unwrap();
        storage.register(&account).unwrap()
    }

    fn temp_db(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "airfoil_advisor_{tag}_{}.db",
            std::process::id()
        ))
    }

    fn remove_db(path: &Path) {
        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_in_memory() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_add_and_list_in_insertion_order() {
        let mut storage = create_test_storage();
        for name in ["NACA 2412", "Clark-Y", "E387"] {
            storage.add(&airfoil(name)).unwrap();
        }

        let names: Vec<String> = storage
            .list_all()
            .unwrap()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, vec!["NACA 2412", "Clark-Y", "E387"]);
    }

    #[test]
    fn test_airfoil_fields_round_trip_exactly() {
        let mut storage = create_test_storage();
        let original =
            Airfoil::new("S1223", 2.237, 0.012_34, 123_456.7, 9.87e5, "High Lift", 0.1214).unwrap();
        storage.add(&original).unwrap();

        assert_eq!(storage.list_all().unwrap(), vec![original.clone()]);
        assert_eq!(storage.find("s1223").unwrap(), Some(original));
    }

    #[test]
    fn test_duplicate_airfoil_case_insensitive() {
        let mut storage = create_test_storage();
        storage.add(&airfoil("clark-y")).unwrap();

        let err = storage.add(&airfoil("Clark-Y")).unwrap_err();
        assert!(matches!(err, Error::DuplicateAirfoil { .. }));
        assert_eq!(storage.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_exists_and_find_missing() {
        let mut storage = create_test_storage();
        assert!(!storage.exists("E387").unwrap());
        storage.add(&airfoil("E387")).unwrap();
        assert!(storage.exists(" e387 ").unwrap());
        assert!(storage.find("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_all_is_idempotent() {
        let mut storage = create_test_storage();
        storage.add(&airfoil("A1")).unwrap();
        storage.add(&airfoil("B1")).unwrap();
        assert_eq!(storage.list_all().unwrap(), storage.list_all().unwrap());
    }

    #[test]
    fn test_corrupt_airfoil_row_is_store_error() {
        let storage = create_test_storage();
        storage
            .conn
            .execute(
                r"
                INSERT INTO airfoils
                    (name, name_key, max_cl, min_cd, reynolds_min, reynolds_max, application_type, thickness)
                VALUES ('bad', 'bad', -1.0, 0.01, 1e5, 1e6, 'x', 0.1)
                ",
                [],
            )
            .unwrap();

        let err = storage.list_all().unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_history_append_and_list() {
        let mut storage = create_test_storage();
        storage.append("pilot", &query(10.0)).unwrap();
        storage.append("Pilot", &query(20.0)).unwrap();
        storage.append("other", &query(30.0)).unwrap();

        let log = storage.list("PILOT").unwrap();
        assert_eq!(log, vec![query(10.0), query(20.0)]);
        assert!(storage.list("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_register_and_authenticate() {
        let mut storage = create_test_storage();
        let user = signup(&mut storage, "Pilot_1", "pilot@example.com");
        assert_eq!(user.username, "Pilot_1");

        let authed = storage.authenticate("pilot_1", "Secret#123").unwrap();
        assert_eq!(authed.id, user.id);
        assert_eq!(authed.username, "Pilot_1");
        assert_eq!(authed.email, "pilot@example.com");

        let stored: String = storage
            .conn
            .query_row(
                "SELECT password_hash FROM users WHERE username_key = 'pilot_1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(!stored.contains("Secret#123"));
    }

    #[test]
    fn test_authenticate_failures() {
        let mut storage = create_test_storage();
        signup(&mut storage, "pilot", "pilot@example.com");

        assert!(matches!(
            storage.authenticate("pilot", "Wrong#123").unwrap_err(),
            Error::InvalidCredentials
        ));
        assert!(matches!(
            storage.authenticate("ghost", "Secret#123").unwrap_err(),
            Error::InvalidCredentials
        ));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut storage = create_test_storage();
        signup(&mut storage, "pilot", "pilot@example.com");

        let rules = AccountRules::new(&AccountConfig::default()).unwrap();
        let clash = rules
            .validate(&storage, "pilot2", "Secret#123", "PILOT@example.com")
            .unwrap_err();
        assert!(matches!(clash, Error::DuplicateEmail(_)));
        assert!(storage.username_exists("PILOT").unwrap());
        assert!(storage.email_exists("Pilot@Example.com").unwrap());
    }

    #[test]
    fn test_stats() {
        let mut storage = create_test_storage();
        let empty = storage.stats().unwrap();
        assert_eq!(empty.total_airfoils, 0);
        assert!(empty.last_search.is_none());
        assert_eq!(empty.schema_version, migrations::CURRENT_VERSION);
        assert_eq!(empty.db_size_bytes, 0);

        storage.add(&airfoil("A1")).unwrap();
        signup(&mut storage, "pilot", "pilot@example.com");
        storage.append("pilot", &query(12.0)).unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_airfoils, 1);
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_searches, 1);
        assert!(stats.last_search.is_some());
    }

    #[test]
    fn test_open_file_based_persists() {
        let db_path = temp_db("persist");
        remove_db(&db_path);

        {
            let mut storage = Storage::open(&db_path).unwrap();
            storage.add(&airfoil("Persisted")).unwrap();
            assert_eq!(storage.path(), db_path);
            assert!(storage.stats().unwrap().db_size_bytes > 0);
        }

        let storage = Storage::open(&db_path).unwrap();
        assert!(storage.exists("persisted").unwrap());

        drop(storage);
        remove_db(&db_path);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!(
            "airfoil_advisor_nested_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        let nested_path = root.join("nested").join("airfoils.db");

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        let _ = std::fs::remove_dir_all(&root);
    }
}
