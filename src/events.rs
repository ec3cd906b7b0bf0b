//! In-process pub/sub for real-time fan-out.
//!
//! One global channel carries announcements every connected client should
//! see (new job offers); topic channels scope delivery to subscribers of a
//! single job (`job:{id}`). Delivery is at-most-once and fire-and-forget:
//! publishing never fails the state change that triggered it.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

pub const EVENT_JOB_NEW_OFFER: &str = "job:new-offer";
pub const EVENT_ATTENDANCE_CHECK_IN: &str = "attendance:check_in";

pub fn job_topic(job_id: Uuid) -> String {
    format!("job:{}", job_id)
}

/// Thread-safe, cloneable hub. Handed to each service at construction;
/// there is no process-wide singleton.
#[derive(Clone)]
pub struct EventHub {
    global: broadcast::Sender<serde_json::Value>,
    topics: Arc<RwLock<HashMap<String, broadcast::Sender<serde_json::Value>>>>,
    capacity: usize,
}

impl EventHub {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            global: broadcast::channel(capacity).0,
            topics: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    fn envelope(event: &str, payload: serde_json::Value) -> serde_json::Value {
        serde_json::json!({ "event": event, "data": payload })
    }

    /// Publish to every connected client. No-op without subscribers.
    pub fn publish_global(&self, event: &str, payload: serde_json::Value) {
        // Send errors mean no active receivers; dropped by design of the
        // at-most-once contract.
        let _ = self.global.send(Self::envelope(event, payload));
        tracing::debug!(event, "published global event");
    }

    /// Publish to one topic's subscribers. No-op for unknown topics.
    pub async fn publish_to_topic(&self, topic: &str, event: &str, payload: serde_json::Value) {
        let topics = self.topics.read().await;
        if let Some(tx) = topics.get(topic) {
            let _ = tx.send(Self::envelope(event, payload));
        }
        tracing::debug!(event, topic, "published topic event");
    }

    pub fn subscribe_global(&self) -> broadcast::Receiver<serde_json::Value> {
        self.global.subscribe()
    }

    /// Subscribe to a topic, creating its channel on first use.
    pub async fn subscribe_topic(&self, topic: &str) -> broadcast::Receiver<serde_json::Value> {
        let mut topics = self.topics.write().await;
        let tx = topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tx.subscribe()
    }

    /// Drop topic channels nobody listens to anymore.
    pub async fn cleanup(&self) {
        let mut topics = self.topics.write().await;
        topics.retain(|_, tx| tx.receiver_count() > 0);
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn global_publish_reaches_all_subscribers() {
        let hub = EventHub::new();
        let mut rx1 = hub.subscribe_global();
        let mut rx2 = hub.subscribe_global();

        hub.publish_global(EVENT_JOB_NEW_OFFER, serde_json::json!({"payPerDay": 500.0}));

        let got = rx1.recv().await.unwrap();
        assert_eq!(got["event"], EVENT_JOB_NEW_OFFER);
        assert_eq!(got["data"]["payPerDay"], 500.0);
        assert_eq!(rx2.recv().await.unwrap(), got);
    }

    #[tokio::test]
    async fn topic_publish_is_scoped() {
        let hub = EventHub::new();
        let job_a = Uuid::new_v4();
        let job_b = Uuid::new_v4();

        let mut rx_a = hub.subscribe_topic(&job_topic(job_a)).await;
        let mut rx_b = hub.subscribe_topic(&job_topic(job_b)).await;

        hub.publish_to_topic(
            &job_topic(job_a),
            EVENT_ATTENDANCE_CHECK_IN,
            serde_json::json!({"jobId": job_a}),
        )
        .await;

        let got = rx_a.recv().await.unwrap();
        assert_eq!(got["event"], EVENT_ATTENDANCE_CHECK_IN);
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let hub = EventHub::new();
        hub.publish_global(EVENT_JOB_NEW_OFFER, serde_json::json!({}));
        hub.publish_to_topic("job:nobody", EVENT_ATTENDANCE_CHECK_IN, serde_json::json!({}))
            .await;
    }

    #[tokio::test]
    async fn cleanup_drops_abandoned_topics() {
        let hub = EventHub::new();
        let rx = hub.subscribe_topic("job:ephemeral").await;
        assert_eq!(hub.topics.read().await.len(), 1);

        drop(rx);
        hub.cleanup().await;
        assert_eq!(hub.topics.read().await.len(), 0);
    }
}
