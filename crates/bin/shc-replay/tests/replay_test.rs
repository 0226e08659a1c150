//! End-to-end tests: recorded cycles through the real processor and change bus.

use std::path::Path;
use std::sync::Arc;

use shc_app::change::RegistryChange;
use shc_app::change_bus::InProcessChangeBus;
use shc_app::services::poll_processor::PollEventProcessor;
use shc_domain::entity::EntityKind;
use shc_domain::error::ValidationError;
use shc_domain::id::{DeviceId, RoomId, ServiceId};
use shc_domain::registry::Registry;
use shc_domain::state::{ClimateControlState, OperationMode, ValveTappetState};
use shc_replay::replay::parse_cycle;

const INITIAL_CYCLE: &str = include_str!("fixtures/initial_cycle.json");
const LONG_POLL_RESPONSE: &str = include_str!("fixtures/long_poll_response.json");

fn processor() -> (PollEventProcessor<Arc<InProcessChangeBus>>, Arc<InProcessChangeBus>) {
    let bus = Arc::new(InProcessChangeBus::new(64));
    (PollEventProcessor::new(Arc::clone(&bus), 16), bus)
}

async fn replay_both(processor: &PollEventProcessor<Arc<InProcessChangeBus>>) -> Registry {
    let initial = parse_cycle(Path::new("initial_cycle.json"), INITIAL_CYCLE).unwrap();
    let update = parse_cycle(Path::new("long_poll_response.json"), LONG_POLL_RESPONSE).unwrap();
    processor.apply_cycle(&initial).await;
    processor.apply_cycle(&update).await;
    processor.snapshot().await
}

#[tokio::test]
async fn should_build_registry_from_initial_cycle() {
    let (processor, _bus) = processor();
    let events = parse_cycle(Path::new("initial_cycle.json"), INITIAL_CYCLE).unwrap();

    let report = processor.apply_cycle(&events).await;

    assert_eq!(report.applied.len(), 7);
    assert_eq!(report.rejected.len(), 2);
    let registry = processor.snapshot().await;
    assert_eq!(registry.rooms().count(), 2);
    assert_eq!(registry.devices_in_room(&RoomId::new("hz_1")).count(), 2);
    assert_eq!(
        registry
            .services_of_device(&DeviceId::new("hdm:HomeMaticIP:3014F711A0001916D859A8A9"))
            .count(),
        2
    );
}

#[tokio::test]
async fn should_record_why_events_were_rejected() {
    let (processor, _bus) = processor();
    let events = parse_cycle(Path::new("initial_cycle.json"), INITIAL_CYCLE).unwrap();
    processor.apply_cycle(&events).await;

    let rejections = processor.recent_rejections().await;
    assert_eq!(rejections.len(), 2);

    assert_eq!(rejections[0].position, 7);
    assert_eq!(rejections[0].error.path().to_string(), "state.mode");
    assert_eq!(rejections[0].error.tag(), Some("DeviceServiceData"));

    assert_eq!(rejections[1].position, 8);
    assert_eq!(
        rejections[1].error,
        ValidationError::UnknownDiscriminator {
            found: Some("message".to_string())
        }
    );
}

#[tokio::test]
async fn should_apply_long_poll_update_on_top_of_initial_cycle() {
    let (processor, _bus) = processor();
    let registry = replay_both(&processor).await;

    let valve = registry
        .service_state::<ValveTappetState>(&ServiceId::new("ValveTappet"))
        .unwrap();
    assert!((valve.position - 61.0).abs() < f64::EPSILON);

    assert!(registry.room(&RoomId::new("hz_2")).is_none());
    assert!(registry.get(EntityKind::Room, "hz_7").is_none());
    assert_eq!(registry.rooms().count(), 1);
}

#[tokio::test]
async fn should_keep_previous_climate_state_when_schedule_is_invalid() {
    let (processor, _bus) = processor();
    let registry = replay_both(&processor).await;

    let climate = registry
        .service_state::<ClimateControlState>(&ServiceId::new("RoomClimateControl"))
        .unwrap();
    assert_eq!(climate.operation_mode, OperationMode::Automatic);
    assert_eq!(climate.schedule.profiles[0].switch_points.len(), 2);

    let rejections = processor.recent_rejections().await;
    let last = rejections.last().unwrap();
    assert_eq!(
        last.error.path().to_string(),
        "state.schedule.profiles[0].switchPoints[0].startTimeMinutes"
    );
}

#[tokio::test]
async fn should_broadcast_changes_in_application_order() {
    let (processor, bus) = processor();
    let mut changes = bus.subscribe();
    let update = parse_cycle(Path::new("long_poll_response.json"), LONG_POLL_RESPONSE).unwrap();

    processor.apply_cycle(&update).await;

    // valve inserted, climate rejected, hz_2 and hz_7 absent
    assert!(matches!(
        changes.recv().await.unwrap(),
        RegistryChange::Inserted(_)
    ));
    assert!(matches!(
        changes.recv().await.unwrap(),
        RegistryChange::Rejected(_)
    ));
    assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn should_serialize_registry_in_key_order() {
    let (processor, _bus) = processor();
    let registry = replay_both(&processor).await;

    let json = serde_json::to_value(&registry).unwrap();
    let kinds: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entity| entity["@type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "room",
            "device",
            "device",
            "DeviceServiceData",
            "DeviceServiceData",
            "DeviceServiceData",
        ]
    );
    assert_eq!(json[5]["state"]["@type"], "valveTappetState");
}
