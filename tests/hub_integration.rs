use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use topichub::config::HubSettings;
use topichub::{Hub, HubError, SubscriberId};

#[tokio::test]
async fn integration_fan_out_across_tasks() {
    let hub = Arc::new(Hub::new());

    let mut readers = Vec::new();
    for n in 0..4 {
        let sub = hub
            .subscribe(format!("conn-{n}"), ["prices"])
            .expect("subscribe");
        readers.push(tokio::spawn(async move {
            sub.map(|msg| msg.payload).collect::<Vec<_>>().await
        }));
    }

    for tick in 0..10 {
        let delivered = hub.publish("prices", format!("tick-{tick}")).unwrap();
        assert_eq!(delivered, 4);
    }
    hub.shutdown().unwrap();

    let expected: Vec<String> = (0..10).map(|t| format!("tick-{t}")).collect();
    for reader in readers {
        let seen = tokio::time::timeout(Duration::from_secs(5), reader)
            .await
            .expect("reader did not finish")
            .unwrap();
        assert_eq!(seen, expected);
    }
}

#[tokio::test]
async fn integration_unsubscribe_ends_stream_for_one_consumer_only() {
    let hub = Hub::from_settings(&HubSettings { queue_capacity: 16 });
    let mut leaving = hub.subscribe("leaving", ["chat"]).unwrap();
    let mut staying = hub.subscribe("staying", ["chat"]).unwrap();

    hub.publish("chat", "hi").unwrap();
    hub.unsubscribe(&SubscriberId::from("leaving")).unwrap();
    hub.publish("chat", "bye").unwrap();

    assert_eq!(leaving.recv().await.unwrap().payload, "hi");
    assert!(leaving.recv().await.is_none());

    assert_eq!(staying.recv().await.unwrap().payload, "hi");
    assert_eq!(staying.recv().await.unwrap().payload, "bye");
    assert_eq!(hub.subscribers_of("chat"), vec![SubscriberId::from("staying")]);
}

#[test]
fn integration_blocking_consumer_thread() {
    let hub = Arc::new(Hub::with_capacity(4));
    let mut sub = hub.subscribe(SubscriberId::generate(), ["jobs"]).unwrap();

    let consumer = std::thread::spawn(move || {
        let mut seen = Vec::new();
        while let Some(msg) = sub.blocking_recv() {
            seen.push(msg.payload);
        }
        seen
    });

    hub.publish("jobs", "build").unwrap();
    hub.publish("jobs", "test").unwrap();
    hub.shutdown().unwrap();

    assert_eq!(consumer.join().unwrap(), vec!["build", "test"]);
    assert_eq!(hub.publish("jobs", "deploy"), Err(HubError::HubClosed));
}

#[test]
fn integration_slow_consumer_never_blocks_publisher() {
    let hub = Hub::with_capacity(2);
    let mut slow = hub.subscribe("slow", ["feed"]).unwrap();

    for n in 0..100 {
        hub.publish("feed", n.to_string()).unwrap();
    }

    assert_eq!(slow.try_recv().unwrap().payload, "0");
    assert_eq!(slow.try_recv().unwrap().payload, "1");
    assert!(slow.try_recv().is_err());

    let stats = hub.stats();
    assert_eq!(stats.published, 100);
    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.dropped, 98);
}
