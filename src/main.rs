use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use compiz_ai_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(handlers::generate_questions)
            .service(handlers::process_course)
            .service(handlers::delete_course)
            .service(handlers::stats)
            .service(handlers::health_check)
    })
    .bind((host, port))?
    .run()
    .await
}
