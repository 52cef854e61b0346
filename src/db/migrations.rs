use lazy_static::lazy_static;
use rusqlite_migration::{Migrations, M};

lazy_static! {
    pub static ref MIGRATIONS: Migrations<'static> = Migrations::new(vec![
        M::up(
            r#"
            CREATE TABLE notes (
                id BLOB PRIMARY KEY CHECK(length(id) = 16) NOT NULL UNIQUE DEFAULT (uuid7_now()),

                title TEXT NOT NULL DEFAULT '',
                content TEXT NOT NULL DEFAULT '',
                attachment TEXT,
                category TEXT NOT NULL DEFAULT 'Uncategorized',
                color TEXT NOT NULL,
                is_pinned INTEGER NOT NULL DEFAULT 0,

                user_id TEXT NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#
        ),
        M::up("CREATE INDEX notes_user_id ON notes (user_id);"),
    ]);
}
