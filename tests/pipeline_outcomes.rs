//! End-to-end tests of the batch state machine against scripted resolver and
//! store implementations. No network or database is involved.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use coordinate_transform::error_handling::GeocodeError;
use coordinate_transform::geocode::{AddressComponent, ReverseGeocode};
use coordinate_transform::models::{CoordinateRecord, StructuredAddress};
use coordinate_transform::pipeline::BatchPipeline;
use coordinate_transform::storage::{SaveOutcome, StoreRecords};

/// One scripted resolver response.
enum Resolution {
    Found(Vec<AddressComponent>),
    NotFound,
    Fail,
}

/// Resolver that replays a fixed script, one entry per call. The call
/// counter is shared so tests can inspect it after the pipeline takes
/// ownership of the resolver.
struct ScriptedResolver {
    script: Vec<Resolution>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedResolver {
    fn new(script: Vec<Resolution>) -> (ScriptedResolver, Arc<Mutex<usize>>) {
        let calls = Arc::new(Mutex::new(0));
        (
            ScriptedResolver {
                script,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl ReverseGeocode for ScriptedResolver {
    async fn resolve(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Option<Vec<AddressComponent>>, GeocodeError> {
        let mut calls = self.calls.lock().unwrap();
        let step = self
            .script
            .get(*calls)
            .expect("resolver called more times than scripted");
        *calls += 1;
        match step {
            Resolution::Found(components) => Ok(Some(components.clone())),
            Resolution::NotFound => Ok(None),
            Resolution::Fail => Err(GeocodeError::RequestDenied(
                "The provided API key is invalid.".into(),
            )),
        }
    }
}

type SavedPairs = Arc<Mutex<Vec<(CoordinateRecord, StructuredAddress)>>>;

/// Store that records every save and replays scripted outcomes; once the
/// script runs out every further save succeeds.
struct RecordingStore {
    outcomes: Mutex<Vec<SaveOutcome>>,
    saved: SavedPairs,
}

impl RecordingStore {
    fn new(outcomes: Vec<SaveOutcome>) -> (RecordingStore, SavedPairs) {
        let saved: SavedPairs = Arc::new(Mutex::new(Vec::new()));
        (
            RecordingStore {
                outcomes: Mutex::new(outcomes),
                saved: Arc::clone(&saved),
            },
            saved,
        )
    }

    fn saving_everything() -> (RecordingStore, SavedPairs) {
        RecordingStore::new(Vec::new())
    }
}

#[async_trait]
impl StoreRecords for RecordingStore {
    async fn save(
        &self,
        coordinate: &CoordinateRecord,
        address: &StructuredAddress,
    ) -> SaveOutcome {
        self.saved
            .lock()
            .unwrap()
            .push((coordinate.clone(), address.clone()));
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            SaveOutcome::Saved
        } else {
            outcomes.remove(0)
        }
    }
}

fn coordinate(latitude: f64, longitude: f64) -> CoordinateRecord {
    CoordinateRecord {
        latitude,
        longitude,
        distance_km: Some(1.0),
        bearing_degrees: Some(90.0),
    }
}

fn component(name: &str, tag: &str) -> AddressComponent {
    AddressComponent {
        long_name: name.to_string(),
        short_name: name.to_string(),
        types: vec![tag.to_string()],
    }
}

/// A component list carrying all seven recognized tags.
fn full_components() -> Vec<AddressComponent> {
    vec![
        component("123", "street_number"),
        component("Avenida Ipiranga", "route"),
        component("Partenon", "sublocality_level_1"),
        component("Porto Alegre", "administrative_area_level_2"),
        component("RS", "administrative_area_level_1"),
        component("Brasil", "country"),
        component("90160-093", "postal_code"),
    ]
}

#[tokio::test]
async fn resolved_row_is_persisted_with_merged_coordinates() {
    let (resolver, _) = ScriptedResolver::new(vec![Resolution::Found(full_components())]);
    let (store, saved) = RecordingStore::saving_everything();
    let pipeline = BatchPipeline::new(resolver, store);

    let row = coordinate(-30.896756, -51.987642);
    let summary = pipeline.run(std::slice::from_ref(&row)).await;

    assert_eq!(summary.persisted, 1);
    assert_eq!(summary.attempted(), 1);
    assert!(summary.aborted.is_none());

    let saved = saved.lock().unwrap();
    let (stored_coordinate, stored_address) = &saved[0];
    assert_eq!(stored_coordinate, &row);
    assert_eq!(stored_address.latitude, Some(-30.896756));
    assert_eq!(stored_address.longitude, Some(-51.987642));
    assert_eq!(stored_address.street_number.as_deref(), Some("123"));
}

#[tokio::test]
async fn not_found_row_is_skipped_and_never_stored() {
    let (resolver, _) = ScriptedResolver::new(vec![Resolution::NotFound]);
    let (store, saved) = RecordingStore::saving_everything();
    let pipeline = BatchPipeline::new(resolver, store);

    let summary = pipeline.run(&[coordinate(0.0, 0.0)]).await;

    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.persisted, 0);
    assert_eq!(summary.attempted(), 1);
    assert!(saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unrecognized_components_skip_the_row_before_the_store() {
    let (resolver, _) = ScriptedResolver::new(vec![Resolution::Found(vec![component(
        "irrelevant",
        "plus_code",
    )])]);
    let (store, saved) = RecordingStore::saving_everything();
    let pipeline = BatchPipeline::new(resolver, store);

    let summary = pipeline.run(&[coordinate(10.0, 20.0)]).await;

    assert_eq!(summary.empty_address, 1);
    assert_eq!(summary.persisted, 0);
    assert!(saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn partial_address_is_rejected_by_validation() {
    // Country alone is a non-empty extraction that fails completeness.
    let (resolver, _) = ScriptedResolver::new(vec![Resolution::Found(vec![component(
        "Brasil", "country",
    )])]);
    let (store, saved) = RecordingStore::saving_everything();
    let pipeline = BatchPipeline::new(resolver, store);

    let summary = pipeline.run(&[coordinate(10.0, 20.0)]).await;

    assert_eq!(summary.incomplete, 1);
    assert_eq!(summary.persisted, 0);
    assert!(saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn conflict_does_not_stop_the_batch() {
    let (resolver, _) = ScriptedResolver::new(vec![
        Resolution::Found(full_components()),
        Resolution::Found(full_components()),
    ]);
    let (store, saved) = RecordingStore::new(vec![SaveOutcome::Conflict, SaveOutcome::Saved]);
    let pipeline = BatchPipeline::new(resolver, store);

    let rows = vec![coordinate(1.0, 1.0), coordinate(2.0, 2.0)];
    let summary = pipeline.run(&rows).await;

    assert_eq!(summary.conflicts, 1);
    assert_eq!(summary.persisted, 1);
    assert_eq!(summary.attempted(), 2);
    assert!(summary.aborted.is_none());
    assert_eq!(saved.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn store_failure_does_not_stop_the_batch() {
    let (resolver, _) = ScriptedResolver::new(vec![
        Resolution::Found(full_components()),
        Resolution::Found(full_components()),
    ]);
    let (store, _) = RecordingStore::new(vec![SaveOutcome::StoreFailure, SaveOutcome::Saved]);
    let pipeline = BatchPipeline::new(resolver, store);

    let rows = vec![coordinate(1.0, 1.0), coordinate(2.0, 2.0)];
    let summary = pipeline.run(&rows).await;

    assert_eq!(summary.store_failures, 1);
    assert_eq!(summary.persisted, 1);
}

#[tokio::test]
async fn api_failure_aborts_before_remaining_rows() {
    let (resolver, calls) = ScriptedResolver::new(vec![
        Resolution::Found(full_components()),
        Resolution::Found(full_components()),
        Resolution::Fail,
    ]);
    let (store, saved) = RecordingStore::saving_everything();
    let pipeline = BatchPipeline::new(resolver, store);

    let rows: Vec<CoordinateRecord> = (1..=5).map(|i| coordinate(f64::from(i), 0.0)).collect();
    let summary = pipeline.run(&rows).await;

    // Rows 1-2 reach a terminal state; rows 3-5 are never attempted.
    assert_eq!(summary.attempted(), 2);
    assert_eq!(summary.persisted, 2);
    assert_eq!(*calls.lock().unwrap(), 3);
    assert_eq!(saved.lock().unwrap().len(), 2);
    assert!(matches!(
        summary.aborted,
        Some(GeocodeError::RequestDenied(_))
    ));
}

#[tokio::test]
async fn immediate_api_failure_attempts_nothing() {
    let (resolver, calls) = ScriptedResolver::new(vec![Resolution::Fail]);
    let (store, saved) = RecordingStore::saving_everything();
    let pipeline = BatchPipeline::new(resolver, store);

    let rows = vec![coordinate(1.0, 1.0), coordinate(2.0, 2.0)];
    let summary = pipeline.run(&rows).await;

    assert!(summary.aborted.is_some());
    assert_eq!(summary.attempted(), 0);
    assert_eq!(*calls.lock().unwrap(), 1);
    assert!(saved.lock().unwrap().is_empty());
}
