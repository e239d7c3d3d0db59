use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use employee_directory::config::Config;
use employee_directory::{configure, db};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let store = web::Data::from(db::connect_store(&config).await?);

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(configure)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await?;

    Ok(())
}
