//! The asynchronous fulfillment worker: consumes queued order messages,
//! persists the order aggregate, and advances the status record.

use dotenvy::dotenv;
use order_gateway::infrastructure::consumer::FulfillmentConsumer;
use order_gateway::infrastructure::order_repo::DieselOrderStore;
use order_gateway::infrastructure::queue::KafkaPublisher;
use order_gateway::{create_pool, run_migrations, AppConfig};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().expect("invalid configuration");

    let pool = create_pool(&config.database_url).expect("Failed to create database pool");
    run_migrations(&pool);

    let store = DieselOrderStore::new(pool);
    let dead_letters = KafkaPublisher::new(&config.kafka_brokers, &config.dead_letter_topic)
        .expect("Failed to create dead-letter producer");

    let consumer = FulfillmentConsumer::new(
        &config.kafka_brokers,
        &config.consumer_group,
        &config.order_queue_topic,
        store,
        dead_letters,
        config.dead_letter_topic.clone(),
    )
    .expect("Failed to create consumer");

    log::info!(
        "Fulfillment worker consuming {} as group {}",
        config.order_queue_topic,
        config.consumer_group
    );

    consumer.run().await;
}
