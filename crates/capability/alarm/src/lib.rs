//! 告警规则编辑与求值
//!
//! - [`AlarmComposer`]：把摄像头、类别、阈值与 ROI 组装为经过校验的告警记录，
//!   并通过实体门面创建或更新
//! - [`alarm_cards`]：列表展示，摄像头悬空时回退为占位符
//! - [`evaluate_frame`]：用检测器输出对告警规则求值
//!
//! 阈值策略：输入时静默钳制到 [0,1]，非有限值为校验错误。

mod card;
mod composer;
mod error;
mod form;
mod rule;

pub use card::{AlarmCard, alarm_cards};
pub use composer::{AlarmComposer, ComposerDefaults};
pub use error::{ComposeError, ValidationError};
pub use form::{AlarmForm, Session};
pub use rule::{AlarmRule, DetectedObject, Detector, DetectorError, Trigger, evaluate_frame};
