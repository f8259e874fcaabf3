use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use crate::{
    configs::{connect_database, run_migrations},
    constants::Env,
    modules::chat::{repository_pg::MessageRepositoryPg, service::ChatService},
};

mod api;
mod configs;
mod constants;
mod modules;
#[cfg(test)]
mod test;

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let env = Env::load().map_err(std::io::Error::other)?;
    log::info!("Environment loaded");

    let db_pool = connect_database(&env.database).await.map_err(std::io::Error::other)?;
    run_migrations(&db_pool).await.map_err(std::io::Error::other)?;

    let chat_service =
        ChatService::with_dependencies(Arc::new(MessageRepositoryPg::new(db_pool)));

    log::info!("Starting server at http://{}:{}", env.ip, env.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(chat_service.clone()))
            .service(health_check)
            .service(web::scope("/api").configure(modules::chat::route::configure))
    })
    .bind((env.ip.as_str(), env.port))?
    .workers(env.workers.get())
    .run()
    .await
}
