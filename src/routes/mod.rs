// Route exports
pub mod matches;

use actix_web::web;
use crate::services::ProfileStore;

pub use matches::AppState;

pub fn configure_routes<S: ProfileStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure::<S>),
    );
}
