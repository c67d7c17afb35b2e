use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use std::sync::Arc;

use taskkeep::{
    routes::{self, health},
    store::{MemoryStore, PgStore, Store},
    AppState, Config,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config =
        Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            let store = PgStore::connect(database_url)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            store
                .migrate()
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            log::info!("Using Postgres record store");
            Arc::new(store)
        }
        None => {
            log::warn!("DATABASE_URL not set; records are kept in memory and lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let state = web::Data::new(AppState::new(store, config.jwt_secret.clone()));

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config(state.clone())))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
