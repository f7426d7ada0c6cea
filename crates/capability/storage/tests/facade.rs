use api_contract::{
    AlarmCreate, Camera, CameraCreate, CameraId, CameraInfo, CameraUpdate, CameraType,
    DetectionCreate, DetectionFilter, RoiCreate, RoiFilter, RoiUpdate, StreamCreate, StreamStatus,
};
use async_trait::async_trait;
use nvc_storage::{
    CameraFacade, CameraStore, EntityFacades, EntityStores, FaultSwitch, InMemoryCameraStore,
    StorageError, UNKNOWN_LABEL, camera_label, stream_cards,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 统计列表拉取次数的摄像头存储
struct CountingCameraStore {
    inner: InMemoryCameraStore,
    lists: AtomicUsize,
}

impl CountingCameraStore {
    fn new(inner: InMemoryCameraStore) -> Self {
        Self {
            inner,
            lists: AtomicUsize::new(0),
        }
    }

    fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraStore for CountingCameraStore {
    async fn list_cameras(&self) -> Result<Vec<Camera>, StorageError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list_cameras().await
    }

    async fn find_camera(&self, camera_id: CameraId) -> Result<Option<Camera>, StorageError> {
        self.inner.find_camera(camera_id).await
    }

    async fn create_camera(&self, record: CameraCreate) -> Result<Camera, StorageError> {
        self.inner.create_camera(record).await
    }

    async fn update_camera(
        &self,
        camera_id: CameraId,
        update: CameraUpdate,
    ) -> Result<Option<Camera>, StorageError> {
        self.inner.update_camera(camera_id, update).await
    }

    async fn delete_camera(&self, camera_id: CameraId) -> Result<bool, StorageError> {
        self.inner.delete_camera(camera_id).await
    }

    async fn scan_cameras(&self, max_devices: u32) -> Result<Vec<CameraInfo>, StorageError> {
        self.inner.scan_cameras(max_devices).await
    }
}

fn counting_facade(faults: FaultSwitch) -> (Arc<CountingCameraStore>, CameraFacade) {
    let store = Arc::new(CountingCameraStore::new(InMemoryCameraStore::with_faults(
        faults,
    )));
    let facade = CameraFacade::new(store.clone());
    (store, facade)
}

fn in_memory_facades() -> (FaultSwitch, EntityFacades) {
    let faults = FaultSwitch::new();
    let facades = EntityFacades::new(EntityStores::in_memory(faults.clone()));
    (faults, facades)
}

fn door_alarm(camera_id: CameraId) -> AlarmCreate {
    AlarmCreate {
        name: "Door".to_string(),
        camera_id,
        class_name: "person".to_string(),
        confidence_threshold: 0.7,
        region_of_interest: [10.0, 10.0, 200.0, 150.0],
        is_active: true,
    }
}

#[tokio::test]
async fn listing_is_served_from_cache_until_invalidated() {
    let (store, facade) = counting_facade(FaultSwitch::new());
    assert!(facade.list_all().await.expect("list").is_empty());
    assert!(facade.list_all().await.expect("list").is_empty());
    assert_eq!(store.lists(), 1);

    facade.invalidate();
    assert!(facade.cached().is_none());
    facade.list_all().await.expect("list");
    assert_eq!(store.lists(), 2);
}

#[tokio::test]
async fn every_successful_mutation_invalidates_the_listing() {
    let (store, facade) = counting_facade(FaultSwitch::new());
    facade.list_all().await.expect("list");

    let camera = facade
        .create(CameraCreate::rtsp("Gate", "rtsp://10.0.0.1/stream"))
        .await
        .expect("create");
    assert!(facade.cached().is_none());
    let listed = facade.list_all().await.expect("list");
    assert_eq!(listed, vec![camera.clone()]);

    let update = CameraUpdate {
        name: Some("Front gate".to_string()),
        ..CameraUpdate::default()
    };
    facade.update(camera.id, update).await.expect("update");
    assert!(facade.cached().is_none());
    assert_eq!(facade.list_all().await.expect("list")[0].name, "Front gate");

    facade.delete(camera.id).await.expect("delete");
    assert!(facade.cached().is_none());
    assert!(facade.list_all().await.expect("list").is_empty());
    assert_eq!(store.lists(), 4);
}

#[tokio::test]
async fn failed_mutation_keeps_cached_listing() {
    let faults = FaultSwitch::new();
    let (_store, facade) = counting_facade(faults.clone());
    let cached = facade.list_all().await.expect("list");

    faults.set_failing(true);
    let err = facade
        .create(CameraCreate::rtsp("Gate", "rtsp://10.0.0.1/stream"))
        .await
        .expect_err("transport failure");
    assert!(err.is_transport());
    assert_eq!(facade.cached(), Some(cached));
}

#[tokio::test]
async fn validation_rejects_before_any_backend_call() {
    let faults = FaultSwitch::new();
    let (_store, facade) = counting_facade(faults.clone());
    faults.set_failing(true);

    let mut record = CameraCreate::rtsp("Gate", "rtsp://10.0.0.1/stream");
    record.resolution = Some([1280, 0]);
    let err = facade.create(record).await.expect_err("bad resolution");
    assert!(matches!(err, StorageError::Invalid(_)));

    let err = facade
        .create(CameraCreate::rtsp("  ", "rtsp://10.0.0.1/stream"))
        .await
        .expect_err("blank name");
    assert!(matches!(err, StorageError::Invalid(_)));
}

#[tokio::test]
async fn missing_entities_surface_as_not_found() {
    let (_faults, facades) = in_memory_facades();
    let err = facades.cameras.get_one(7).await.expect_err("missing");
    assert!(matches!(err, StorageError::NotFound { .. }));
    assert_eq!(err.to_string(), "camera not found: 7");

    let err = facades.alarms.delete(7).await.expect_err("missing");
    assert!(matches!(err, StorageError::NotFound { .. }));

    let err = facades.models.get_one("resnet").await.expect_err("missing");
    assert_eq!(err.to_string(), "model not found: resnet");
}

#[tokio::test]
async fn accepted_scan_result_becomes_local_camera() {
    let device = CameraInfo {
        device_id: 2,
        physical_address: None,
        usb_id: None,
        name: String::new(),
        resolution: [1280, 720],
        fps: 30.0,
        supported_resolutions: vec![[640, 480], [1280, 720]],
        is_available: true,
    };
    let store = InMemoryCameraStore::new().with_devices(vec![device.clone()]);
    let facade = CameraFacade::new(Arc::new(store));

    let found = facade.scan(10).await.expect("scan");
    assert_eq!(found, vec![device.clone()]);
    assert!(facade.list_all().await.expect("list").is_empty());

    let camera = facade.add_scanned(&found[0]).await.expect("add");
    assert_eq!(camera.camera_type, CameraType::Local);
    assert_eq!(camera.device_id, Some(2));
    assert_eq!(camera.resolution, Some([1280, 720]));
    assert_eq!(camera.fps, Some(30.0));
    assert_eq!(camera.is_available, Some(true));
    assert_eq!(camera.name, "Camera 2");

    let listed = facade.list_all().await.expect("list");
    assert_eq!(listed, vec![camera]);
}

#[tokio::test]
async fn stream_creation_requires_existing_camera() {
    let (_faults, facades) = in_memory_facades();
    let err = facades
        .streams
        .create(StreamCreate {
            camera_id: 5,
            metadata: None,
        })
        .await
        .expect_err("dangling camera");
    assert!(matches!(err, StorageError::Invalid(_)));

    let camera = facades
        .cameras
        .create(CameraCreate::rtsp("Gate", "rtsp://10.0.0.1/stream"))
        .await
        .expect("camera");
    let stream = facades
        .streams
        .create(StreamCreate {
            camera_id: camera.id,
            metadata: None,
        })
        .await
        .expect("stream");

    let running = facades.streams.start(stream.id).await.expect("start");
    assert_eq!(running.status, StreamStatus::Running);
    let stopped = facades.streams.stop(stream.id).await.expect("stop");
    assert_eq!(stopped.status, StreamStatus::Stopped);
    assert_eq!(stopped.current_frame, 0);
}

#[tokio::test]
async fn alarm_round_trip_keeps_field_values() {
    let (_faults, facades) = in_memory_facades();
    let created = facades.alarms.create(door_alarm(3)).await.expect("create");
    let fetched = facades.alarms.get_one(created.id).await.expect("get");
    assert_eq!(fetched, created);
    assert_eq!(fetched.region_of_interest, [10.0, 10.0, 200.0, 150.0]);
    assert_eq!(fetched.confidence_threshold, 0.7);
    assert_eq!(fetched.camera_id, 3);
    assert_eq!(fetched.class_name, "person");
    assert_eq!(facades.alarms.list_all().await.expect("list"), vec![created]);
}

#[tokio::test]
async fn deleted_camera_degrades_to_placeholder() {
    let (_faults, facades) = in_memory_facades();
    let camera = facades
        .cameras
        .create(CameraCreate::rtsp("Gate", "rtsp://10.0.0.1/stream"))
        .await
        .expect("camera");
    let stream = facades
        .streams
        .create(StreamCreate {
            camera_id: camera.id,
            metadata: None,
        })
        .await
        .expect("stream");
    let alarm = facades
        .alarms
        .create(door_alarm(camera.id))
        .await
        .expect("alarm");

    let cameras = facades.cameras.list_all().await.expect("cameras");
    assert_eq!(camera_label(&cameras, alarm.camera_id), "Gate");

    facades.cameras.delete(camera.id).await.expect("delete");
    let cameras = facades.cameras.list_all().await.expect("cameras");
    let alarms = facades.alarms.list_all().await.expect("alarms");
    assert_eq!(alarms.len(), 1);
    assert_eq!(camera_label(&cameras, alarms[0].camera_id), UNKNOWN_LABEL);

    let streams = facades.streams.list_all().await.expect("streams");
    let cards = stream_cards(&streams, &cameras);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].stream_id, stream.id);
    assert_eq!(cards[0].camera_name, "Unknown");
}

#[tokio::test]
async fn model_threshold_is_clamped() {
    let (_faults, facades) = in_memory_facades();
    let model = facades
        .models
        .set_threshold("yolov5s", 1.4)
        .await
        .expect("set threshold");
    assert_eq!(model.confidence_threshold, Some(1.0));
    let model = facades
        .models
        .set_threshold("yolov5s", -0.2)
        .await
        .expect("set threshold");
    assert_eq!(model.confidence_threshold, Some(0.0));

    let err = facades
        .models
        .set_threshold("yolov5s", f64::NAN)
        .await
        .expect_err("nan");
    assert!(matches!(err, StorageError::Invalid(_)));

    let classes = facades.models.class_names().await.expect("classes");
    assert!(classes.contains(&"yolov5s".to_string()));
}

#[tokio::test]
async fn detection_listings_are_cached_per_filter() {
    let (_faults, facades) = in_memory_facades();
    let by_camera = DetectionFilter {
        camera_id: Some(1),
        stream_id: None,
    };
    assert!(facades.detections.list_all(by_camera).await.expect("list").is_empty());
    assert!(facades.detections.list_all(DetectionFilter::default()).await.expect("list").is_empty());
    assert!(facades.detections.cached(by_camera).is_some());

    facades
        .detections
        .create(DetectionCreate {
            camera_id: 1,
            stream_id: 4,
            frame_number: 12,
            model_name: "yolov5s".to_string(),
            confidence: 0.9,
            class_name: "person".to_string(),
            bbox: [5.0, 5.0, 50.0, 80.0],
            metadata: Default::default(),
        })
        .await
        .expect("create");
    assert!(facades.detections.cached(by_camera).is_none());
    assert!(facades.detections.cached(DetectionFilter::default()).is_none());
    assert_eq!(facades.detections.list_all(by_camera).await.expect("list").len(), 1);
    let other_camera = DetectionFilter {
        camera_id: Some(2),
        stream_id: None,
    };
    assert!(facades.detections.list_all(other_camera).await.expect("list").is_empty());
}

fn dock_region(camera_id: CameraId) -> RoiCreate {
    RoiCreate {
        camera_id,
        name: "Dock".to_string(),
        points: vec![10.0, 10.0, 200.0, 10.0, 120.0, 150.0],
        is_active: true,
    }
}

#[tokio::test]
async fn named_regions_are_cached_per_camera() {
    let (_faults, facades) = in_memory_facades();
    let gate = facades
        .cameras
        .create(CameraCreate::rtsp("Gate", "rtsp://10.0.0.1/stream"))
        .await
        .expect("camera");
    let yard = facades
        .cameras
        .create(CameraCreate::rtsp("Yard", "rtsp://10.0.0.2/stream"))
        .await
        .expect("camera");

    let by_gate = RoiFilter::camera(gate.id);
    assert!(facades.rois.list_all(by_gate).await.expect("list").is_empty());
    assert!(facades.rois.cached(by_gate).is_some());

    let region = facades.rois.create(dock_region(gate.id)).await.expect("create");
    assert!(facades.rois.cached(by_gate).is_none());
    facades.rois.create(dock_region(yard.id)).await.expect("create");

    assert_eq!(
        facades.rois.list_all(by_gate).await.expect("list"),
        vec![region.clone()]
    );
    assert_eq!(
        facades
            .rois
            .list_all(RoiFilter::default())
            .await
            .expect("list")
            .len(),
        2
    );

    let update = RoiUpdate {
        name: Some("North dock".to_string()),
        ..RoiUpdate::default()
    };
    let renamed = facades.rois.update(region.id, update).await.expect("update");
    assert_eq!(renamed.points, region.points);
    assert!(facades.rois.cached(by_gate).is_none());
    assert_eq!(
        facades.rois.list_all(by_gate).await.expect("list")[0].name,
        "North dock"
    );

    facades.rois.delete(region.id).await.expect("delete");
    assert!(facades.rois.list_all(by_gate).await.expect("list").is_empty());
    let err = facades.rois.get_one(region.id).await.expect_err("gone");
    assert_eq!(err.to_string(), format!("roi not found: {}", region.id));
}

#[tokio::test]
async fn named_region_checks_camera_and_polygon() {
    let (_faults, facades) = in_memory_facades();
    let err = facades
        .rois
        .create(dock_region(9))
        .await
        .expect_err("dangling camera");
    assert!(matches!(err, StorageError::Invalid(_)));

    let camera = facades
        .cameras
        .create(CameraCreate::rtsp("Gate", "rtsp://10.0.0.1/stream"))
        .await
        .expect("camera");
    for points in [
        vec![10.0, 10.0, 200.0, 10.0],
        vec![10.0, 10.0, 200.0, 10.0, 120.0],
        vec![-1.0, 10.0, 200.0, 10.0, 120.0, 150.0],
        vec![f64::NAN, 10.0, 200.0, 10.0, 120.0, 150.0],
    ] {
        let record = RoiCreate {
            points,
            ..dock_region(camera.id)
        };
        let err = facades.rois.create(record).await.expect_err("bad polygon");
        assert!(matches!(err, StorageError::Invalid(_)));
    }
    assert!(
        facades
            .rois
            .list_all(RoiFilter::camera(camera.id))
            .await
            .expect("list")
            .is_empty()
    );
}

#[tokio::test]
async fn negative_alarm_region_is_invalid() {
    let (_faults, facades) = in_memory_facades();
    let mut record = door_alarm(3);
    record.region_of_interest = [-10.0, 5.0, 100.0, 100.0];
    let err = facades.alarms.create(record).await.expect_err("negative");
    assert!(matches!(err, StorageError::Invalid(_)));
}
