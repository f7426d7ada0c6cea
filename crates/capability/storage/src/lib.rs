//! # NVC Storage 模块
//!
//! 实体存储门面：对摄像头、视频流、检测模型、告警规则、检测结果、命名区域六类实体
//! 提供类型化访问与显式的缓存失效协议。
//!
//! ## 分层
//!
//! 1. **接口抽象层** (`traits.rs`)：每个实体种类一个异步存储 Trait
//! 2. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 3. **验证辅助层** (`validation.rs`)：请求体校验，发生在任何后端调用之前
//! 4. **缓存层** (`cache.rs`)：按实体种类划分的列表缓存
//! 5. **门面层** (`facade/`)：读缓存、写后失效、失败上报
//! 6. **实现层**：
//!    - `rest/`：HTTP/JSON 后端（生产使用）
//!    - `in_memory/`：内存后端（测试、演示、mock 服务端）
//! 7. **降级解析** (`resolve.rs`)：悬空引用回退为占位符
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use nvc_storage::{EntityFacades, EntityStores, RestStore};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(RestStore::new("http://localhost:8000/api/v1", None)?);
//! let facades = EntityFacades::new(EntityStores::from_backend(backend));
//! let cameras = facades.cameras.list_all().await?;
//! ```

pub mod cache;
pub mod error;
pub mod facade;
pub mod in_memory;
pub mod resolve;
pub mod rest;
pub mod traits;
pub mod validation;

pub use cache::ListingCache;
pub use error::StorageError;
pub use facade::{
    AlarmFacade, CameraFacade, DEFAULT_SCAN_DEVICES, DetectionFacade, EntityFacades,
    EntityStores, ModelFacade, RoiFacade, StreamFacade,
};
pub use in_memory::*;
pub use resolve::{StreamCard, UNKNOWN_LABEL, camera_label, model_label, stream_cards};
pub use rest::RestStore;
pub use traits::*;
