use dotenvy::dotenv;
use order_gateway::{build_server, build_state, create_pool, run_migrations, AppConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().expect("invalid configuration");

    let pool = create_pool(&config.database_url).expect("Failed to create database pool");
    run_migrations(&pool);

    let host = config.host.clone();
    let port = config.port;

    let state = build_state(config, pool)
        .await
        .expect("Failed to wire adapters");

    log::info!("Starting order gateway at http://{}:{}", host, port);

    build_server(state, &host, port)?.await
}
