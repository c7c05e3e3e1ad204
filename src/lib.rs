pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::AppConfig;
pub use db::{create_pool, DbPool};

use application::health::HealthService;
use application::intake::IntakeService;
use application::queries::QueryService;
use domain::errors::DomainError;
use infrastructure::cache::RedisCache;
use infrastructure::customer_repo::DieselCustomerStore;
use infrastructure::order_repo::DieselOrderStore;
use infrastructure::queue::KafkaPublisher;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

pub type AppIntake = IntakeService<DieselOrderStore, KafkaPublisher>;
pub type AppQueries = QueryService<RedisCache, DieselCustomerStore, DieselOrderStore>;
pub type AppHealth = HealthService<DieselCustomerStore, RedisCache, KafkaPublisher>;

/// Everything a request handler can reach.
pub struct AppState {
    pub intake: AppIntake,
    pub queries: AppQueries,
    pub health: AppHealth,
    pub config: AppConfig,
}

/// Wire the adapters and services for the HTTP API.
///
/// Connects to Redis and creates the Kafka producer; both are validated here
/// so a bad endpoint fails at startup rather than on the first request.
pub async fn build_state(config: AppConfig, pool: DbPool) -> Result<AppState, DomainError> {
    let cache = RedisCache::connect(&config.redis_url).await?;
    let publisher = KafkaPublisher::new(&config.kafka_brokers, &config.order_queue_topic)?;

    let orders = DieselOrderStore::new(pool.clone());
    let customers = DieselCustomerStore::new(pool);

    Ok(AppState {
        intake: IntakeService::new(
            orders.clone(),
            publisher.clone(),
            config.order_queue_topic.clone(),
        ),
        queries: QueryService::new(
            cache.clone(),
            customers.clone(),
            orders,
            config.cache_ttl,
        ),
        health: HealthService::new(customers, cache, publisher),
        config,
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::submit_order,
        handlers::orders::get_order_status,
        handlers::customers::get_customer,
        handlers::customers::list_customers,
        handlers::health::health_check,
    ),
    components(schemas(
        handlers::orders::SubmitOrderRequest,
        handlers::orders::SubmitLineItemRequest,
        handlers::orders::OrderStatusResponse,
        handlers::customers::CustomerResponse,
        handlers::customers::PagedCustomersResponse,
        handlers::health::HealthResponse,
    ))
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .route("/orders", web::post().to(handlers::orders::submit_order))
                    .route(
                        "/orders/status/{orderNumber}",
                        web::get().to(handlers::orders::get_order_status),
                    )
                    .route(
                        "/customers/{id}",
                        web::get().to(handlers::customers::get_customer),
                    )
                    .route(
                        "/customers",
                        web::get().to(handlers::customers::list_customers),
                    )
                    .route("/health", web::get().to(handlers::health::health_check)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
