//! SQL statements for the Postgres backend.

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS forecasts (
    id UUID PRIMARY KEY,
    date DATE NOT NULL,
    temperature_c INTEGER NOT NULL,
    summary TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_forecasts_date ON forecasts(date);
"#;

pub const SELECT_FORECAST_BY_ID: &str = r#"
SELECT id, date, temperature_c, summary, created_at, updated_at
FROM forecasts
WHERE id = $1
"#;

pub const SELECT_ALL_FORECASTS: &str = r#"
SELECT id, date, temperature_c, summary, created_at, updated_at
FROM forecasts
ORDER BY date
"#;

pub const INSERT_FORECAST: &str = r#"
INSERT INTO forecasts (id, date, temperature_c, summary, created_at, updated_at)
VALUES ($1, $2, $3, $4, $5, $6)
"#;

pub const UPDATE_FORECAST: &str = r#"
UPDATE forecasts
SET date = $2, temperature_c = $3, summary = $4, updated_at = $5
WHERE id = $1
"#;

pub const DELETE_FORECAST: &str = r#"
DELETE FROM forecasts
WHERE id = $1
"#;
