pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod notes;
pub mod session;
pub mod state;

pub use config::config;
pub use db::{init_db, DB};
pub use errors::{Error, Result};

#[cfg(test)]
pub mod tests {
    use std::sync::Arc;

    use axum_test::TestServer;

    use crate::{
        app, config::config_override, db::DB, notes::store::SqliteNoteStore, state::AppState,
    };

    pub async fn test_server(db: DB) -> TestServer {
        config_override(|config| config);

        let state = AppState {
            store: Arc::new(SqliteNoteStore::new(db)),
        };

        TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .mock_transport()
            .build(app::create(state))
            .unwrap()
    }
}
