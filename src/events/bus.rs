use super::types::{EventSequence, WizardEvent, WizardEventPayload};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

pub type EventReceiver = broadcast::Receiver<WizardEvent>;
pub type EventSender = broadcast::Sender<WizardEvent>;

/// Event bus for distributing wizard events to observers
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: EventSender,
    sequence: Arc<AtomicU64>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            sequence: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Publish an event (returns sequence number). Fails when nobody is subscribed.
    pub fn publish(&self, payload: WizardEventPayload) -> Result<EventSequence, String> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);

        let event = WizardEvent {
            sequence,
            timestamp: Utc::now(),
            payload,
        };

        self.sender
            .send(event)
            .map(|_| sequence)
            .map_err(|e| format!("Failed to publish event: {}", e))
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    pub fn current_sequence(&self) -> EventSequence {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::PhotoId;
    use crate::wizard::WizardStep;

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::new(100);
        let mut rx = bus.subscribe();
        let photo_id = PhotoId::new();

        let seq = bus
            .publish(WizardEventPayload::PhotoUploaded {
                photo_id,
                remote_url: "https://cdn.example/1.jpg".to_string(),
            })
            .unwrap();
        assert_eq!(seq, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.sequence, 1);
        assert_eq!(event.photo_id(), Some(photo_id));
        assert_eq!(event.payload_type(), "photo_uploaded");
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new(100);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        bus.publish(WizardEventPayload::StepChanged {
            from: WizardStep::BasicInfo,
            to: WizardStep::Description,
        })
        .unwrap();

        let event1 = rx1.recv().await.unwrap();
        let event2 = rx2.recv().await.unwrap();
        assert_eq!(event1.sequence, event2.sequence);
        assert_eq!(event1.photo_id(), None);
    }

    #[test]
    fn test_publish_without_subscribers_fails() {
        let bus = EventBus::new(8);
        assert!(bus.publish(WizardEventPayload::DraftSaved).is_err());
        // The sequence still advances
        assert_eq!(bus.current_sequence(), 2);
    }

    #[test]
    fn test_sequence_ordering() {
        let bus = EventBus::new(100);
        let _rx = bus.subscribe(); // Keep receiver alive to prevent channel from closing

        let seq1 = bus.publish(WizardEventPayload::DraftSaved).unwrap();
        let seq2 = bus
            .publish(WizardEventPayload::Published {
                product_id: "p-1".to_string(),
            })
            .unwrap();

        assert_eq!(seq1, 1);
        assert_eq!(seq2, 2);
    }

    #[test]
    fn test_payload_json_shape() {
        let json = serde_json::to_value(WizardEventPayload::StepChanged {
            from: WizardStep::Seo,
            to: WizardStep::Preview,
        })
        .unwrap();
        assert_eq!(json["type"], "step_changed");
        assert_eq!(json["from"], 3);
        assert_eq!(json["to"], 4);
    }
}
