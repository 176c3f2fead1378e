//! Table definitions, applied idempotently at startup.

pub(super) const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        current_threshold INTEGER NOT NULL,
        reset_threshold INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS adventures (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        user_id TEXT NOT NULL REFERENCES users(id),
        timestamp TEXT NOT NULL,
        rng_score INTEGER NOT NULL,
        material TEXT,
        status TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_adventures_user_timestamp
        ON adventures (user_id, timestamp)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS loot_boxes (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL REFERENCES users(id),
        rarity TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS prize_types (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        rarity TEXT NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity >= 0),
        number_claimed INTEGER NOT NULL DEFAULT 0,
        CHECK (number_claimed >= 0 AND number_claimed <= quantity)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS prizes (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL REFERENCES users(id),
        prize_type_id TEXT NOT NULL REFERENCES prize_types(id),
        loot_box_id TEXT NOT NULL REFERENCES loot_boxes(id),
        awarded_at TEXT NOT NULL
    )
    "#,
];
