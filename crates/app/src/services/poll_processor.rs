//! Poll event processor: applies poll cycles to the shared registry.

use std::sync::Arc;

use serde_json::Value;
use shc_domain::registry::{Applied, Registry};
use tokio::sync::{Mutex, RwLock};

use crate::change::RegistryChange;
use crate::ports::ChangePublisher;
use crate::rejection_log::{RejectedEvent, RejectionLog};

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Events that validated, in arrival order.
    pub applied: Vec<Applied>,
    /// Events that failed validation, in arrival order.
    pub rejected: Vec<RejectedEvent>,
}

impl CycleReport {
    /// Number of applied events that changed the registry.
    #[must_use]
    pub fn changes(&self) -> usize {
        self.applied.iter().filter(|applied| applied.is_change()).count()
    }
}

/// Applies poll cycles to a registry shared with readers.
///
/// A cycle holds the registry's write lock and the rejection log from its
/// first event to its last, so readers of either only ever observe the state
/// between two cycles. Both are taken in that order.
pub struct PollEventProcessor<P> {
    registry: Arc<RwLock<Registry>>,
    rejections: Mutex<RejectionLog>,
    publisher: P,
}

impl<P: ChangePublisher> PollEventProcessor<P> {
    /// Create a processor over an empty registry.
    #[must_use]
    pub fn new(publisher: P, rejection_log_capacity: usize) -> Self {
        Self::with_registry(Arc::default(), publisher, rejection_log_capacity)
    }

    /// Create a processor over an existing registry.
    #[must_use]
    pub fn with_registry(
        registry: Arc<RwLock<Registry>>,
        publisher: P,
        rejection_log_capacity: usize,
    ) -> Self {
        Self {
            registry,
            rejections: Mutex::new(RejectionLog::new(rejection_log_capacity)),
            publisher,
        }
    }

    /// Apply every event of a cycle, in order.
    ///
    /// Invalid events are skipped, logged and recorded; they never stop the
    /// cycle nor alter the registry.
    #[tracing::instrument(skip(self, events), fields(events = events.len()))]
    pub async fn apply_cycle(&self, events: &[Value]) -> CycleReport {
        let mut registry = self.registry.write().await;
        let mut rejections = self.rejections.lock().await;
        let mut report = CycleReport::default();

        for (position, raw) in events.iter().enumerate() {
            match registry.apply(raw) {
                Ok(applied) => {
                    tracing::debug!(
                        position,
                        kind = %applied.key().kind,
                        id = %applied.key().id,
                        outcome = ?applied,
                        "applied poll event"
                    );
                    if let Some(change) = change_of(&registry, &applied) {
                        self.publisher.publish(change).await;
                    }
                    report.applied.push(applied);
                }
                Err(error) => {
                    tracing::warn!(
                        position,
                        tag = error.tag(),
                        path = %error.path(),
                        %error,
                        "rejected poll event"
                    );
                    let rejected = RejectedEvent::new(position, raw.clone(), error);
                    rejections.push(rejected.clone());
                    self.publisher
                        .publish(RegistryChange::Rejected(rejected.clone()))
                        .await;
                    report.rejected.push(rejected);
                }
            }
        }

        tracing::info!(
            applied = report.applied.len(),
            changes = report.changes(),
            rejected = report.rejected.len(),
            entities = registry.len(),
            "poll cycle applied"
        );
        report
    }

    /// A copy of the registry as of the last completed cycle.
    pub async fn snapshot(&self) -> Registry {
        self.registry.read().await.clone()
    }

    /// Retained rejections as of the last completed cycle, oldest first.
    pub async fn recent_rejections(&self) -> Vec<RejectedEvent> {
        self.rejections.lock().await.iter().cloned().collect()
    }
}

fn change_of(registry: &Registry, applied: &Applied) -> Option<RegistryChange> {
    match applied {
        Applied::Inserted(key) => registry
            .get(key.kind, &key.id)
            .cloned()
            .map(RegistryChange::Inserted),
        Applied::Replaced(key) => registry
            .get(key.kind, &key.id)
            .cloned()
            .map(RegistryChange::Replaced),
        Applied::Removed(key) => Some(RegistryChange::Removed(key.clone())),
        Applied::Unchanged(_) | Applied::AlreadyAbsent(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shc_domain::entity::{EntityKey, EntityKind};
    use shc_domain::error::ValidationError;
    use shc_domain::id::{RoomId, ServiceId};
    use shc_domain::state::BinarySwitchState;
    use std::future::Future;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Semaphore;

    #[derive(Default)]
    struct RecordingPublisher {
        changes: StdMutex<Vec<RegistryChange>>,
    }

    impl RecordingPublisher {
        fn changes(&self) -> Vec<RegistryChange> {
            self.changes.lock().unwrap().clone()
        }
    }

    impl ChangePublisher for RecordingPublisher {
        fn publish(&self, change: RegistryChange) -> impl Future<Output = ()> + Send {
            self.changes.lock().unwrap().push(change);
            async {}
        }
    }

    fn processor(capacity: usize) -> PollEventProcessor<Arc<RecordingPublisher>> {
        PollEventProcessor::new(Arc::new(RecordingPublisher::default()), capacity)
    }

    fn room(id: &str, name: &str) -> Value {
        json!({"@type": "room", "id": id, "iconId": "icon_room_living_room", "name": name})
    }

    fn switch(on: Value) -> Value {
        json!({
            "@type": "DeviceServiceData",
            "id": "BinarySwitch",
            "deviceId": "hdm:ZigBee:70ac08fffefe1234",
            "path": "/devices/hdm:ZigBee:70ac08fffefe1234/services/BinarySwitch",
            "state": {"@type": "binarySwitchState", "on": on}
        })
    }

    #[tokio::test]
    async fn should_apply_valid_events_and_skip_invalid_ones() {
        let processor = processor(8);
        let events = vec![
            room("hz_1", "Kitchen"),
            switch(json!("yes")),
            switch(json!(true)),
        ];

        let report = processor.apply_cycle(&events).await;

        assert_eq!(report.applied.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].position, 1);
        let snapshot = processor.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.service_state::<BinarySwitchState>(&ServiceId::new("BinarySwitch")),
            Some(&BinarySwitchState { on: true })
        );
    }

    #[tokio::test]
    async fn should_keep_prior_value_when_update_is_invalid() {
        let processor = processor(8);
        processor.apply_cycle(&[switch(json!(false))]).await;
        processor.apply_cycle(&[switch(json!(1))]).await;

        let snapshot = processor.snapshot().await;
        assert_eq!(
            snapshot.service_state::<BinarySwitchState>(&ServiceId::new("BinarySwitch")),
            Some(&BinarySwitchState { on: false })
        );
    }

    #[tokio::test]
    async fn should_leave_last_value_when_cycle_updates_twice() {
        let processor = processor(8);
        processor
            .apply_cycle(&[room("hz_1", "Kitchen"), room("hz_1", "Dining room")])
            .await;

        let snapshot = processor.snapshot().await;
        assert_eq!(
            snapshot.room(&RoomId::new("hz_1")).map(|room| room.name.as_str()),
            Some("Dining room")
        );
    }

    #[tokio::test]
    async fn should_remove_entity_when_deletion_arrives_in_a_later_cycle() {
        let processor = processor(8);
        processor.apply_cycle(&[room("hz_1", "Kitchen")]).await;

        let mut deletion = room("hz_1", "Kitchen");
        deletion["deleted"] = json!(true);
        let report = processor.apply_cycle(&[deletion]).await;

        assert_eq!(report.changes(), 1);
        assert!(processor.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn should_be_idempotent_when_cycle_is_replayed() {
        let processor = processor(8);
        let events = vec![room("hz_1", "Kitchen"), switch(json!(true))];

        processor.apply_cycle(&events).await;
        let first = processor.snapshot().await;
        let report = processor.apply_cycle(&events).await;

        assert_eq!(report.changes(), 0);
        assert_eq!(processor.snapshot().await, first);
    }

    #[tokio::test]
    async fn should_publish_effective_changes_and_rejections_only() {
        let publisher = Arc::new(RecordingPublisher::default());
        let processor = PollEventProcessor::new(Arc::clone(&publisher), 8);
        let mut missing = room("hz_9", "Attic");
        missing["deleted"] = json!(true);

        processor
            .apply_cycle(&[
                room("hz_1", "Kitchen"),
                room("hz_1", "Kitchen"),
                room("hz_1", "Dining room"),
                missing,
                json!({"@type": "scenario", "id": "s1"}),
            ])
            .await;

        let changes = publisher.changes();
        assert_eq!(changes.len(), 3);
        assert!(matches!(changes[0], RegistryChange::Inserted(_)));
        assert!(matches!(changes[1], RegistryChange::Replaced(_)));
        assert!(matches!(changes[2], RegistryChange::Rejected(_)));
        assert_eq!(
            changes[0].key(),
            Some(EntityKey::new(EntityKind::Room, "hz_1"))
        );
    }

    #[tokio::test]
    async fn should_record_rejections_up_to_capacity() {
        let processor = processor(2);
        let events: Vec<Value> = (0..3)
            .map(|index| json!({"@type": "message", "id": format!("m{index}")}))
            .collect();

        processor.apply_cycle(&events).await;

        let rejections = processor.recent_rejections().await;
        let positions: Vec<usize> = rejections.iter().map(|entry| entry.position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(
            rejections[0].error,
            ValidationError::UnknownDiscriminator {
                found: Some("message".to_string())
            }
        );
    }

    #[tokio::test]
    async fn should_share_registry_with_readers() {
        let registry = Arc::new(RwLock::new(Registry::new()));
        let processor = PollEventProcessor::with_registry(
            Arc::clone(&registry),
            Arc::new(RecordingPublisher::default()),
            4,
        );

        processor.apply_cycle(&[room("hz_1", "Kitchen")]).await;

        assert_eq!(registry.read().await.len(), 1);
    }

    /// Parks every rejection notification until permits are added.
    struct GatedPublisher {
        gate: Arc<Semaphore>,
    }

    impl ChangePublisher for GatedPublisher {
        fn publish(&self, change: RegistryChange) -> impl Future<Output = ()> + Send {
            let gate = Arc::clone(&self.gate);
            async move {
                if matches!(change, RegistryChange::Rejected(_)) {
                    let _permit = gate.acquire().await;
                }
            }
        }
    }

    #[tokio::test]
    async fn should_hide_rejections_of_cycle_in_progress() {
        let gate = Arc::new(Semaphore::new(0));
        let processor = Arc::new(PollEventProcessor::new(
            GatedPublisher {
                gate: Arc::clone(&gate),
            },
            8,
        ));
        let events = vec![
            json!({"@type": "message", "id": "m1"}),
            json!({"@type": "message", "id": "m2"}),
        ];

        let cycle = tokio::spawn({
            let processor = Arc::clone(&processor);
            async move { processor.apply_cycle(&events).await }
        });
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        let reader = tokio::spawn({
            let processor = Arc::clone(&processor);
            async move { processor.recent_rejections().await }
        });
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert!(!reader.is_finished());

        gate.add_permits(2);
        let report = cycle.await.unwrap();
        let rejections = reader.await.unwrap();
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(rejections.len(), 2);
    }
}
