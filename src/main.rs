use actix_cors::Cors;
use actix_web::{
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use sqlx::postgres::PgPoolOptions;

use codesnippets_backend::{middleware::jwt_middleware::VerifyJWT, routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::from_filename(".env").or_else(|_| dotenv::dotenv()).ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a number");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Error building a connection pool");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Error running migrations");

    let app_data = Data::new(AppState::postgres(pool, jwt_secret));
    let jwt_middleware = VerifyJWT::new(app_data.clone());

    log::info!("listening on {host}:{port}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_data.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .service(
                web::scope("/api")
                    .configure(|cfg| routes::auth_routes::config(cfg, jwt_middleware.clone()))
                    .configure(|cfg| routes::snippet_routes::config(cfg, jwt_middleware.clone())),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
