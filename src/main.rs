use std::sync::Arc;

use topichub::config::load_config;
use topichub::utils::logging;
use topichub::{Hub, HubResult, Subscription};
use tracing::{error, info};

fn subscribe_demo_users(hub: &Hub) -> HubResult<(Subscription, Subscription)> {
    let user1 = hub.subscribe("127.0.0.1", ["topic1", "topic2"])?;
    let user2 = hub.subscribe("127.0.0.2", ["topic1"])?;
    Ok((user1, user2))
}

async fn drain(name: &'static str, mut sub: Subscription) {
    while let Some(msg) = sub.recv().await {
        match msg.to_json() {
            Ok(json) => info!("{}: {}", name, json),
            Err(e) => error!("{}: failed to serialize message: {}", name, e),
        }
    }
    info!("{} stream closed", name);
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&config.logging);

    let hub = Arc::new(Hub::from_settings(&config.hub));

    let (user1, user2) = match subscribe_demo_users(&hub) {
        Ok(pair) => pair,
        Err(e) => {
            error!("Failed to subscribe: {}", e);
            std::process::exit(1);
        }
    };

    let readers = [
        tokio::spawn(drain("user1", user1)),
        tokio::spawn(drain("user2", user2)),
    ];

    let publishers: Vec<_> = [("topic1", "hello"), ("topic2", "world")]
        .into_iter()
        .map(|(topic, payload)| {
            let hub = Arc::clone(&hub);
            tokio::spawn(async move { hub.publish(topic, payload) })
        })
        .collect();

    for publisher in publishers {
        match publisher.await {
            Ok(Ok(delivered)) => info!("Publish delivered to {} subscriber(s)", delivered),
            Ok(Err(e)) => error!("Publish failed: {}", e),
            Err(e) => error!("Publish task failed: {}", e),
        }
    }

    if let Err(e) = hub.shutdown() {
        error!("Shutdown failed: {}", e);
    }

    for reader in readers {
        if let Err(e) = reader.await {
            error!("Reader task failed: {}", e);
        }
    }

    let stats = hub.stats();
    info!(
        "published={} delivered={} dropped={}",
        stats.published, stats.delivered, stats.dropped
    );
}
