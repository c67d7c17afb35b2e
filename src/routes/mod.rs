pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error::JsonPayloadError, error::PathError, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::state::AppState;

/// Registers `state`, `/auth` and the gated `/tasks` scope. Mount under `/api`.
///
/// The gate verifies with the same secret login signs with.
pub fn config(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let gate = AuthMiddleware::new(state.secret.clone());
        cfg.app_data(state)
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .service(
                web::scope("/auth")
                    .service(auth::login)
                    .service(auth::register),
            )
            .service(
                web::scope("/tasks")
                    .wrap(gate)
                    .service(tasks::get_tasks)
                    .service(tasks::create_task)
                    .service(tasks::get_task)
                    .service(tasks::update_task)
                    .service(tasks::delete_task),
            );
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}
