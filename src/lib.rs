pub mod auth;
pub mod client;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub use auth::AuthConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Build and return an actix-web `Server` bound to `host:port`, exposing the
/// uniform CRUD verb set for every entity segment.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    auth: AuthConfig,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(auth.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/articles")
                    .route("/Add", web::post().to(handlers::articles::add))
                    .route("/AddRange", web::post().to(handlers::articles::add_range))
                    .route("/Update", web::post().to(handlers::articles::update))
                    .route("/Remove", web::post().to(handlers::articles::remove))
                    .route("/RemoveRange", web::post().to(handlers::articles::remove_range))
                    .route("/GetAll", web::get().to(handlers::articles::get_all))
                    .route("", web::get().to(handlers::articles::get_one)),
            )
            .service(
                web::scope("/pricelists")
                    .route("/Add", web::post().to(handlers::price_lists::add))
                    .route("/AddRange", web::post().to(handlers::price_lists::add_range))
                    .route("/Update", web::post().to(handlers::price_lists::update))
                    .route("/Remove", web::post().to(handlers::price_lists::remove))
                    .route(
                        "/RemoveRange",
                        web::post().to(handlers::price_lists::remove_range),
                    )
                    .route("/GetAll", web::get().to(handlers::price_lists::get_all))
                    .route("", web::get().to(handlers::price_lists::get_one)),
            )
            .service(
                web::scope("/orders")
                    .route("/Add", web::post().to(handlers::orders::add))
                    .route("/AddRange", web::post().to(handlers::orders::add_range))
                    .route("/Update", web::post().to(handlers::orders::update))
                    .route("/Remove", web::post().to(handlers::orders::remove))
                    .route("/RemoveRange", web::post().to(handlers::orders::remove_range))
                    .route("/GetAll", web::get().to(handlers::orders::get_all))
                    .route("", web::get().to(handlers::orders::get_one)),
            )
            .service(
                web::scope("/orderedarticles")
                    .route("/Add", web::post().to(handlers::ordered_articles::add))
                    .route(
                        "/AddRange",
                        web::post().to(handlers::ordered_articles::add_range),
                    )
                    .route("/Update", web::post().to(handlers::ordered_articles::update))
                    .route("/Remove", web::post().to(handlers::ordered_articles::remove))
                    .route(
                        "/RemoveRange",
                        web::post().to(handlers::ordered_articles::remove_range),
                    )
                    .route("/GetAll", web::get().to(handlers::ordered_articles::get_all))
                    .route("", web::get().to(handlers::ordered_articles::get_one)),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
