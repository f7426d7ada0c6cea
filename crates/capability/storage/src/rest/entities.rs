//! 各实体种类的 REST 映射

use super::RestStore;
use crate::error::StorageError;
use crate::traits::{AlarmStore, CameraStore, DetectionStore, ModelStore, RoiStore, StreamStore};
use api_contract::{
    Alarm, AlarmCreate, AlarmId, AlarmUpdate, Camera, CameraCreate, CameraId, CameraInfo,
    CameraUpdate, Detection, DetectionCreate, DetectionFilter, DetectionId, EntityKind, Model,
    ModelCreate, ModelUpdate, RegionOfInterest, RoiCreate, RoiFilter, RoiId, RoiUpdate, Stream,
    StreamCreate, StreamId, StreamUpdate,
};
use async_trait::async_trait;

const NO_QUERY: &[(&str, &str)] = &[];

#[async_trait]
impl CameraStore for RestStore {
    async fn list_cameras(&self) -> Result<Vec<Camera>, StorageError> {
        self.get_list(self.collection_url(EntityKind::Camera), NO_QUERY)
            .await
    }

    async fn find_camera(&self, camera_id: CameraId) -> Result<Option<Camera>, StorageError> {
        self.get_one(self.item_url(EntityKind::Camera, &camera_id.to_string()))
            .await
    }

    async fn create_camera(&self, record: CameraCreate) -> Result<Camera, StorageError> {
        self.post(self.collection_url(EntityKind::Camera), &record)
            .await
    }

    async fn update_camera(
        &self,
        camera_id: CameraId,
        update: CameraUpdate,
    ) -> Result<Option<Camera>, StorageError> {
        self.put(
            self.item_url(EntityKind::Camera, &camera_id.to_string()),
            &update,
        )
        .await
    }

    async fn delete_camera(&self, camera_id: CameraId) -> Result<bool, StorageError> {
        self.delete(self.item_url(EntityKind::Camera, &camera_id.to_string()))
            .await
    }

    async fn scan_cameras(&self, max_devices: u32) -> Result<Vec<CameraInfo>, StorageError> {
        let url = self.item_url(EntityKind::Camera, "scan");
        self.get_list(url, &[("max_devices", max_devices)]).await
    }
}

#[async_trait]
impl StreamStore for RestStore {
    async fn list_streams(&self) -> Result<Vec<Stream>, StorageError> {
        self.get_list(self.collection_url(EntityKind::Stream), NO_QUERY)
            .await
    }

    async fn find_stream(&self, stream_id: StreamId) -> Result<Option<Stream>, StorageError> {
        self.get_one(self.item_url(EntityKind::Stream, &stream_id.to_string()))
            .await
    }

    async fn create_stream(&self, record: StreamCreate) -> Result<Stream, StorageError> {
        self.post(self.collection_url(EntityKind::Stream), &record)
            .await
    }

    async fn update_stream(
        &self,
        stream_id: StreamId,
        update: StreamUpdate,
    ) -> Result<Option<Stream>, StorageError> {
        self.put(
            self.item_url(EntityKind::Stream, &stream_id.to_string()),
            &update,
        )
        .await
    }

    async fn delete_stream(&self, stream_id: StreamId) -> Result<bool, StorageError> {
        self.delete(self.item_url(EntityKind::Stream, &stream_id.to_string()))
            .await
    }
}

#[async_trait]
impl ModelStore for RestStore {
    async fn list_models(&self) -> Result<Vec<Model>, StorageError> {
        self.get_list(self.collection_url(EntityKind::Model), NO_QUERY)
            .await
    }

    async fn find_model(&self, name: &str) -> Result<Option<Model>, StorageError> {
        self.get_one(self.item_url(EntityKind::Model, name)).await
    }

    async fn create_model(&self, record: ModelCreate) -> Result<Model, StorageError> {
        self.post(self.collection_url(EntityKind::Model), &record)
            .await
    }

    async fn update_model(
        &self,
        name: &str,
        update: ModelUpdate,
    ) -> Result<Option<Model>, StorageError> {
        self.put(self.item_url(EntityKind::Model, name), &update)
            .await
    }

    async fn delete_model(&self, name: &str) -> Result<bool, StorageError> {
        self.delete(self.item_url(EntityKind::Model, name)).await
    }
}

#[async_trait]
impl AlarmStore for RestStore {
    async fn list_alarms(&self) -> Result<Vec<Alarm>, StorageError> {
        self.get_list(self.collection_url(EntityKind::Alarm), NO_QUERY)
            .await
    }

    async fn find_alarm(&self, alarm_id: AlarmId) -> Result<Option<Alarm>, StorageError> {
        self.get_one(self.item_url(EntityKind::Alarm, &alarm_id.to_string()))
            .await
    }

    async fn create_alarm(&self, record: AlarmCreate) -> Result<Alarm, StorageError> {
        self.post(self.collection_url(EntityKind::Alarm), &record)
            .await
    }

    async fn update_alarm(
        &self,
        alarm_id: AlarmId,
        update: AlarmUpdate,
    ) -> Result<Option<Alarm>, StorageError> {
        self.put(
            self.item_url(EntityKind::Alarm, &alarm_id.to_string()),
            &update,
        )
        .await
    }

    async fn delete_alarm(&self, alarm_id: AlarmId) -> Result<bool, StorageError> {
        self.delete(self.item_url(EntityKind::Alarm, &alarm_id.to_string()))
            .await
    }
}

#[async_trait]
impl DetectionStore for RestStore {
    async fn list_detections(
        &self,
        filter: DetectionFilter,
    ) -> Result<Vec<Detection>, StorageError> {
        self.get_list(self.collection_url(EntityKind::Detection), &filter)
            .await
    }

    async fn create_detection(&self, record: DetectionCreate) -> Result<Detection, StorageError> {
        self.post(self.collection_url(EntityKind::Detection), &record)
            .await
    }

    async fn delete_detection(&self, detection_id: DetectionId) -> Result<bool, StorageError> {
        self.delete(self.item_url(EntityKind::Detection, &detection_id.to_string()))
            .await
    }
}

#[async_trait]
impl RoiStore for RestStore {
    async fn list_rois(&self, filter: RoiFilter) -> Result<Vec<RegionOfInterest>, StorageError> {
        self.get_list(self.collection_url(EntityKind::Roi), &filter)
            .await
    }

    async fn find_roi(&self, roi_id: RoiId) -> Result<Option<RegionOfInterest>, StorageError> {
        self.get_one(self.item_url(EntityKind::Roi, &roi_id.to_string()))
            .await
    }

    async fn create_roi(&self, record: RoiCreate) -> Result<RegionOfInterest, StorageError> {
        self.post(self.collection_url(EntityKind::Roi), &record)
            .await
    }

    async fn update_roi(
        &self,
        roi_id: RoiId,
        update: RoiUpdate,
    ) -> Result<Option<RegionOfInterest>, StorageError> {
        self.put(self.item_url(EntityKind::Roi, &roi_id.to_string()), &update)
            .await
    }

    async fn delete_roi(&self, roi_id: RoiId) -> Result<bool, StorageError> {
        self.delete(self.item_url(EntityKind::Roi, &roi_id.to_string()))
            .await
    }
}
