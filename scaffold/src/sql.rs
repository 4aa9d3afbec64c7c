//! Example schema and query SQL per database engine.
//!
//! The emitted files are meant to be edited, not shipped. They give new
//! projects one real table, the named-query annotations the codegen tool
//! expects (`-- name: GetUser :one`), and dialect-correct placeholders
//! (`$1` for PostgreSQL, `?` for MySQL and SQLite).

use sqlc_scaffold_core::DatabaseEngine;

/// Example `schema.sql` for the given engine.
pub fn example_schema(engine: DatabaseEngine) -> &'static str {
    match engine {
        DatabaseEngine::PostgreSql => {
            "CREATE TABLE users (\n    \
                id BIGSERIAL PRIMARY KEY,\n    \
                email TEXT NOT NULL UNIQUE,\n    \
                name TEXT NOT NULL,\n    \
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()\n\
            );\n"
        }
        DatabaseEngine::MySql => {
            "CREATE TABLE users (\n    \
                id BIGINT AUTO_INCREMENT PRIMARY KEY,\n    \
                email VARCHAR(255) NOT NULL UNIQUE,\n    \
                name VARCHAR(255) NOT NULL,\n    \
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP\n\
            );\n"
        }
        DatabaseEngine::Sqlite => {
            "CREATE TABLE users (\n    \
                id INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
                email TEXT NOT NULL UNIQUE,\n    \
                name TEXT NOT NULL,\n    \
                created_at TEXT NOT NULL DEFAULT (datetime('now'))\n\
            );\n"
        }
    }
}

/// Example named queries for the given engine.
pub fn example_queries(engine: DatabaseEngine) -> String {
    let placeholder = |n: u32| match engine {
        DatabaseEngine::PostgreSql => format!("${n}"),
        DatabaseEngine::MySql | DatabaseEngine::Sqlite => "?".to_string(),
    };
    let returning = match engine {
        DatabaseEngine::PostgreSql | DatabaseEngine::Sqlite => "\nRETURNING id, email, name, created_at",
        DatabaseEngine::MySql => "",
    };
    let create_verb = if returning.is_empty() { ":execresult" } else { ":one" };

    format!(
        "-- name: GetUser :one\n\
         SELECT id, email, name, created_at FROM users\n\
         WHERE id = {p1} LIMIT 1;\n\
         \n\
         -- name: ListUsers :many\n\
         SELECT id, email, name, created_at FROM users\n\
         ORDER BY created_at DESC\n\
         LIMIT {p1};\n\
         \n\
         -- name: CreateUser {create_verb}\n\
         INSERT INTO users (email, name)\n\
         VALUES ({p1}, {p2}){returning};\n\
         \n\
         -- name: DeleteUser :exec\n\
         DELETE FROM users\n\
         WHERE id = {p1};\n",
        p1 = placeholder(1),
        p2 = placeholder(2),
    )
}

/// Additional auth tables appended when the project opts into auth.
pub fn auth_schema(engine: DatabaseEngine) -> &'static str {
    match engine {
        DatabaseEngine::PostgreSql => {
            "\nCREATE TABLE sessions (\n    \
                token TEXT PRIMARY KEY,\n    \
                user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,\n    \
                expires_at TIMESTAMPTZ NOT NULL\n\
            );\n"
        }
        DatabaseEngine::MySql => {
            "\nCREATE TABLE sessions (\n    \
                token VARCHAR(64) PRIMARY KEY,\n    \
                user_id BIGINT NOT NULL,\n    \
                expires_at TIMESTAMP NOT NULL,\n    \
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE\n\
            );\n"
        }
        DatabaseEngine::Sqlite => {
            "\nCREATE TABLE sessions (\n    \
                token TEXT PRIMARY KEY,\n    \
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,\n    \
                expires_at TEXT NOT NULL\n\
            );\n"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_use_dialect_placeholders() {
        let pg = example_queries(DatabaseEngine::PostgreSql);
        assert!(pg.contains("WHERE id = $1"));
        assert!(pg.contains("RETURNING"));

        let mysql = example_queries(DatabaseEngine::MySql);
        assert!(mysql.contains("WHERE id = ?"));
        assert!(!mysql.contains("RETURNING"));
        assert!(mysql.contains(":execresult"));
    }

    #[test]
    fn test_every_engine_has_annotated_queries() {
        for engine in DatabaseEngine::ALL {
            let queries = example_queries(engine);
            assert!(queries.contains("-- name: GetUser :one"));
            assert!(queries.contains("-- name: ListUsers :many"));
            assert!(queries.contains("-- name: DeleteUser :exec"));
            assert!(example_schema(engine).contains("CREATE TABLE users"));
            assert!(auth_schema(engine).contains("CREATE TABLE sessions"));
        }
    }
}
