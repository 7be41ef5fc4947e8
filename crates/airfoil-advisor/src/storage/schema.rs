//! `SQLite` schema definitions for airfoil-advisor.
//!
//! Case-insensitive uniqueness is enforced through `*_key` columns holding
//! the lowercase form computed on the Rust side, so the database and the
//! in-memory stores agree on what counts as a duplicate.

/// SQL statement to create the airfoils table.
pub const CREATE_AIRFOILS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS airfoils (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    name_key TEXT NOT NULL UNIQUE,
    max_cl REAL NOT NULL,
    min_cd REAL NOT NULL,
    reynolds_min REAL NOT NULL,
    reynolds_max REAL NOT NULL,
    application_type TEXT NOT NULL,
    thickness REAL NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    username_key TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL,
    email_key TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    registered_at TEXT NOT NULL
)
";

/// SQL statement to create the search history table.
pub const CREATE_SEARCH_HISTORY_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS search_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username_key TEXT NOT NULL,
    speed REAL NOT NULL,
    altitude REAL NOT NULL,
    wing_area REAL NOT NULL,
    required_lift REAL NOT NULL,
    searched_at TEXT NOT NULL
)
";

/// SQL statement to create an index on the history owner.
pub const CREATE_HISTORY_USER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_search_history_user ON search_history(username_key, id)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_AIRFOILS_TABLE,
    CREATE_USERS_TABLE,
    CREATE_SEARCH_HISTORY_TABLE,
    CREATE_HISTORY_USER_INDEX,
    CREATE_METADATA_TABLE,
];
