//! Route definitions for the REST API.
//!
//! Every resource route is a `POST` whose JSON body names the session it
//! targets through `alias`.

#[cfg(feature = "mongodb")]
mod backup;
mod health;
mod resources;
mod revisions;
mod session;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Sessions
        .route("/validateMongoDB", post(session::validate_mongodb))
        .route("/validateJSON", post(session::validate_json))
        .route("/logout", post(session::logout))
        .route("/saveSession", post(session::save_session))
        .route("/loadSession", post(session::load_session))
        // Resource operations
        .route("/find", post(resources::find))
        .route("/versions", post(resources::versions))
        .route("/checkExists", post(resources::check_exists))
        .route("/insert", post(resources::insert))
        .route("/update", post(resources::update))
        .route("/delete", post(resources::delete))
        // Undo/redo
        .route("/addToStack", post(revisions::add_to_stack))
        .route("/undo", post(revisions::undo))
        .route("/redo", post(revisions::redo))
        .route("/getRevisionStatus", post(revisions::revision_status));

    // Collection backups
    #[cfg(feature = "mongodb")]
    let router = router
        .route("/backupMongoDB", post(backup::backup_mongodb))
        .route("/restoreMongoDB", post(backup::restore_mongodb));

    router.with_state(state)
}

#[cfg(feature = "mongodb")]
pub use backup::*;
pub use health::*;
pub use resources::*;
pub use revisions::*;
pub use session::*;
