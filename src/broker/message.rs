use serde::{Deserialize, Serialize};

/// A payload published to a topic, as it sits in a subscriber's queue.
///
/// One publish produces one `Message`; every subscriber of the topic gets a
/// clone of it, so all copies share the same `message_id`.
///
/// # Fields
///
/// - `topic` - The topic the payload was published to.
/// - `payload` - The published content, opaque to the hub.
/// - `timestamp` - Unix timestamp in milliseconds taken at publish time.
/// - `message_id` - A UUID v4 assigned at publish time.
///
/// # Example
///
/// ```rust
/// use topichub::broker::message::Message;
///
/// let msg = Message::new("sensor_updates", "{\"temp\":25}");
/// assert_eq!(msg.topic, "sensor_updates");
/// assert!(!msg.message_id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub payload: String,
    pub timestamp: i64,
    pub message_id: String,
}

impl Message {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            message_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Renders the message as JSON for a transport that frames it on the wire.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
