//! Auxiliary project artifacts: Docker Compose, Makefile, .gitignore,
//! README, and environment file templates.

use sqlc_scaffold_core::DatabaseEngine;

/// Docker Compose service definition for the engine's database.
///
/// SQLite is file-backed and needs no container, so it yields `None`.
pub fn docker_compose(engine: DatabaseEngine) -> Option<String> {
    match engine {
        DatabaseEngine::PostgreSql => Some(
            "services:\n  \
               db:\n    \
                 image: postgres:16\n    \
                 environment:\n      \
                   POSTGRES_USER: postgres\n      \
                   POSTGRES_PASSWORD: postgres\n      \
                   POSTGRES_DB: app\n    \
                 ports:\n      \
                   - \"5432:5432\"\n    \
                 volumes:\n      \
                   - db-data:/var/lib/postgresql/data\n\
             volumes:\n  \
               db-data:\n"
                .to_string(),
        ),
        DatabaseEngine::MySql => Some(
            "services:\n  \
               db:\n    \
                 image: mysql:8\n    \
                 environment:\n      \
                   MYSQL_ROOT_PASSWORD: root\n      \
                   MYSQL_DATABASE: app\n    \
                 ports:\n      \
                   - \"3306:3306\"\n    \
                 volumes:\n      \
                   - db-data:/var/lib/mysql\n\
             volumes:\n  \
               db-data:\n"
                .to_string(),
        ),
        DatabaseEngine::Sqlite => None,
    }
}

/// Makefile with the standard generate/migrate targets.
pub fn makefile(engine: DatabaseEngine) -> String {
    let db_up = match engine {
        DatabaseEngine::Sqlite => "",
        _ => "\ndb-up:\n\tdocker compose up -d db\n\ndb-down:\n\tdocker compose down\n",
    };
    format!(
        ".PHONY: generate validate doctor\n\
         \n\
         generate:\n\
         \tsqlc generate\n\
         \n\
         validate:\n\
         \tsqlc-scaffold validate\n\
         \n\
         doctor:\n\
         \tsqlc-scaffold doctor\n\
         {db_up}"
    )
}

/// Standard ignore list for a scaffolded project.
pub fn gitignore(engine: DatabaseEngine) -> String {
    let mut lines = vec!["/bin/", "*.log", ".env"];
    if engine == DatabaseEngine::Sqlite {
        lines.push("*.db");
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Project README stub.
pub fn readme(project_name: &str, engine: DatabaseEngine) -> String {
    format!(
        "# {project_name}\n\
         \n\
         Scaffolded with sqlc-scaffold for {engine}.\n\
         \n\
         - `sqlc.yaml` — codegen configuration\n\
         - `db/schema.sql` — database schema\n\
         - `db/queries/` — named queries compiled to typed code\n\
         - `db/migrations/` — timestamped up/down migration pairs\n\
         \n\
         Run `make generate` after editing queries, and `sqlc-scaffold doctor`\n\
         to check your environment.\n",
        engine = engine.as_str(),
    )
}

/// Example environment file pointing at the local database.
pub fn env_example(engine: DatabaseEngine) -> String {
    format!("DATABASE_URL={}\n", engine.default_uri())
}

/// Minimal frontend entry point for fullstack projects.
pub fn frontend_stub(project_name: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html>\n\
         <head><title>{project_name}</title></head>\n\
         <body><h1>{project_name}</h1></body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_only_for_server_engines() {
        assert!(docker_compose(DatabaseEngine::PostgreSql)
            .unwrap()
            .contains("postgres:16"));
        assert!(docker_compose(DatabaseEngine::MySql).unwrap().contains("mysql:8"));
        assert!(docker_compose(DatabaseEngine::Sqlite).is_none());
    }

    #[test]
    fn test_makefile_targets() {
        let mk = makefile(DatabaseEngine::PostgreSql);
        assert!(mk.contains("sqlc generate"));
        assert!(mk.contains("db-up:"));

        let sqlite_mk = makefile(DatabaseEngine::Sqlite);
        assert!(!sqlite_mk.contains("db-up:"));
    }

    #[test]
    fn test_gitignore_hides_sqlite_file() {
        assert!(gitignore(DatabaseEngine::Sqlite).contains("*.db"));
        assert!(!gitignore(DatabaseEngine::PostgreSql).contains("*.db"));
    }

    #[test]
    fn test_env_example_uses_default_uri() {
        let env = env_example(DatabaseEngine::MySql);
        assert!(env.starts_with("DATABASE_URL=mysql://"));
    }
}
