//! SQL schema for the Stride SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS projects (
    project_id  TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT,
    purpose     TEXT,
    budget      REAL,
    final_date  TEXT,            -- ISO 8601 calendar date or NULL
    resources   TEXT,            -- opaque JSON or NULL
    schedule    TEXT,            -- opaque JSON or NULL
    reward_id   TEXT,
    active      INTEGER NOT NULL DEFAULT 1,
    status      TEXT NOT NULL,   -- discriminant of ProjectStatus
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- The UNIQUE index closes the check-then-insert race on the
-- one-entry-per-day-per-sprint invariant.
CREATE TABLE IF NOT EXISTS daily_entries (
    entry_id     TEXT PRIMARY KEY,
    user_id      TEXT NOT NULL,
    task_id      TEXT,
    sprint_id    TEXT NOT NULL,
    entry_date   TEXT NOT NULL,  -- local calendar day the entry covers
    accomplished TEXT NOT NULL,
    planned      TEXT NOT NULL,
    difficulty   TEXT NOT NULL,  -- 'low' | 'medium' | 'high'
    energy       TEXT NOT NULL,  -- 'increased' | 'stable' | 'decreased'
    created_at   TEXT NOT NULL,
    UNIQUE (user_id, entry_date, sprint_id)
);

CREATE TABLE IF NOT EXISTS rewards (
    reward_id          TEXT PRIMARY KEY,
    sponsor_id         TEXT,
    name               TEXT NOT NULL,
    description        TEXT,
    claim_instructions TEXT,
    claim_link         TEXT,
    created_at         TEXT NOT NULL
);

-- Written by the planning module; read-only through the repository trait.
CREATE TABLE IF NOT EXISTS milestones (
    milestone_id TEXT PRIMARY KEY,
    project_id   TEXT NOT NULL REFERENCES projects(project_id),
    name         TEXT NOT NULL,
    reward_id    TEXT,
    completed    INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS badges (
    badge_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    icon        TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_badges (
    user_id   TEXT NOT NULL,
    badge_id  TEXT NOT NULL REFERENCES badges(badge_id),
    earned_at TEXT NOT NULL,
    PRIMARY KEY (user_id, badge_id)
);

-- Audit logs are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS audit_logs (
    log_id      TEXT PRIMARY KEY,
    actor_id    TEXT NOT NULL,
    action      TEXT NOT NULL,
    entity_type TEXT NOT NULL,
    entity_id   TEXT NOT NULL,
    before_json TEXT,
    after_json  TEXT,
    recorded_at TEXT NOT NULL
);

-- Metrics events are strictly append-only, like audit logs.
CREATE TABLE IF NOT EXISTS metrics_events (
    event_id     TEXT PRIMARY KEY,
    user_id      TEXT,
    event_type   TEXT NOT NULL,
    payload_json TEXT NOT NULL,
    recorded_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS projects_user_idx       ON projects(user_id);
CREATE INDEX IF NOT EXISTS entries_user_idx        ON daily_entries(user_id);
CREATE INDEX IF NOT EXISTS milestones_project_idx  ON milestones(project_id);
CREATE INDEX IF NOT EXISTS audit_actor_idx         ON audit_logs(actor_id);
CREATE INDEX IF NOT EXISTS audit_entity_idx        ON audit_logs(entity_type, entity_id);
CREATE INDEX IF NOT EXISTS metrics_type_idx        ON metrics_events(event_type);
CREATE INDEX IF NOT EXISTS metrics_user_idx        ON metrics_events(user_id);

PRAGMA user_version = 1;
";
