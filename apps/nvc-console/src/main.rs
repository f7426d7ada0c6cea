//! 监控控制台命令行入口。
//!
//! 通过 REST 后端装配实体门面与告警编辑器；传输失败作为非致命提示输出到
//! stderr，退出码为 1，不做自动重试。

mod cli;

use api_contract::{Alarm, DetectionFilter, RoiCreate, RoiFilter};
use clap::Parser;
use cli::{
    AlarmCommand, Args, CameraCommand, Command, DetectionCommand, ModelCommand, RoiCommand,
    StreamCommand,
};
use domain::Size;
use nvc_alarm::{AlarmComposer, ComposeError, ComposerDefaults, alarm_cards};
use nvc_config::ConsoleConfig;
use nvc_storage::{
    EntityFacades, EntityStores, RestStore, StorageError, camera_label, stream_cards,
};
use nvc_telemetry::init_tracing;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type AppResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if is_retryable(err.as_ref()) {
                eprintln!("error: {err} (backend unavailable, retry the command)");
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> AppResult {
    let mut config = ConsoleConfig::from_env()?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    debug!(target: "nvc.console", api_url = %config.api_url, "console_starting");

    let timeout = config.http_timeout_seconds.map(Duration::from_secs);
    let backend = Arc::new(RestStore::new(&config.api_url, timeout)?);
    let facades = EntityFacades::new(EntityStores::from_backend(backend));
    let defaults = ComposerDefaults {
        confidence: config.default_confidence,
        frame_size: Size::new(
            f64::from(config.default_frame_width),
            f64::from(config.default_frame_height),
        ),
    };

    match args.command {
        Command::Cameras(command) => cameras(&facades, command).await,
        Command::Streams(command) => streams(&facades, command).await,
        Command::Models(command) => models(&facades, command).await,
        Command::Alarms(command) => alarms(&facades, defaults, command).await,
        Command::Detections(command) => detections(&facades, command).await,
        Command::Rois(command) => rois(&facades, command).await,
    }
}

async fn cameras(facades: &EntityFacades, command: CameraCommand) -> AppResult {
    match command {
        CameraCommand::List => {
            for camera in facades.cameras.list_all().await? {
                let resolution = camera
                    .resolution
                    .map(|[w, h]| format!("{w}x{h}"))
                    .unwrap_or_else(|| "-".to_string());
                let state = if camera.is_active { "active" } else { "inactive" };
                println!(
                    "{:>4}  {:<24} {:<40} {:<10} {}",
                    camera.id,
                    camera.name,
                    camera.locator(),
                    resolution,
                    state
                );
            }
        }
        CameraCommand::Scan { max_devices } => {
            for device in facades.cameras.scan(max_devices).await? {
                let [w, h] = device.resolution;
                let availability = if device.is_available { "available" } else { "busy" };
                println!(
                    "{:>4}  {:<24} {w}x{h} @ {:.0} fps  {}",
                    device.device_id,
                    device.display_name(),
                    device.fps,
                    availability
                );
            }
        }
        CameraCommand::AddScanned {
            device_id,
            max_devices,
        } => {
            let devices = facades.cameras.scan(max_devices).await?;
            let device = devices
                .iter()
                .find(|device| device.device_id == device_id)
                .ok_or_else(|| format!("device {device_id} not found in scan results"))?;
            let camera = facades.cameras.add_scanned(device).await?;
            println!("added camera {} ({})", camera.id, camera.name);
        }
        CameraCommand::Delete { camera_id } => {
            facades.cameras.delete(camera_id).await?;
            println!("deleted camera {camera_id}");
        }
    }
    Ok(())
}

async fn streams(facades: &EntityFacades, command: StreamCommand) -> AppResult {
    match command {
        StreamCommand::List => {
            let streams = facades.streams.list_all().await?;
            let cameras = facades.cameras.list_all().await?;
            for card in stream_cards(&streams, &cameras) {
                println!(
                    "{:>4}  {:<24} {:<8} frame {}",
                    card.stream_id, card.camera_name, card.status, card.current_frame
                );
            }
        }
        StreamCommand::Start { stream_id } => {
            let stream = facades.streams.start(stream_id).await?;
            println!("stream {} requested: {}", stream.id, stream.status);
        }
        StreamCommand::Stop { stream_id } => {
            let stream = facades.streams.stop(stream_id).await?;
            println!("stream {} requested: {}", stream.id, stream.status);
        }
    }
    Ok(())
}

async fn models(facades: &EntityFacades, command: ModelCommand) -> AppResult {
    match command {
        ModelCommand::List => {
            for model in facades.models.list_all().await? {
                let threshold = model
                    .confidence_threshold
                    .map(|value| format!("{value:.2}"))
                    .unwrap_or_else(|| "-".to_string());
                let availability = if model.is_available { "available" } else { "unavailable" };
                println!(
                    "{:<12} {:<28} {:<12} {}",
                    model.name, model.description, availability, threshold
                );
            }
        }
        ModelCommand::SetThreshold { name, threshold } => {
            let model = facades.models.set_threshold(&name, threshold).await?;
            let applied = model.confidence_threshold.unwrap_or(threshold);
            println!("model {} threshold {applied:.2}", model.name);
        }
    }
    Ok(())
}

async fn alarms(
    facades: &EntityFacades,
    defaults: ComposerDefaults,
    command: AlarmCommand,
) -> AppResult {
    match command {
        AlarmCommand::List => {
            let alarms = facades.alarms.list_all().await?;
            let cameras = facades.cameras.list_all().await?;
            for card in alarm_cards(&alarms, &cameras) {
                println!(
                    "{:>4}  {:<20} camera {:<20} class {:<10} conf {:.2}  {}",
                    card.alarm_id,
                    card.name,
                    card.camera_name,
                    card.class_name,
                    card.confidence_threshold,
                    card.status_label()
                );
            }
        }
        AlarmCommand::Create {
            name,
            camera,
            class_name,
            threshold,
            roi,
            inactive,
        } => {
            let mut composer = AlarmComposer::from_facades(facades, defaults);
            composer.open_create();
            composer.set_name(name);
            composer.select_camera(camera);
            composer.select_class(class_name);
            if let Some(threshold) = threshold {
                composer.set_threshold(threshold)?;
            }
            if let Some(roi) = roi {
                composer.apply_region(roi);
            }
            composer.set_active(!inactive);
            let alarm = submit(&mut composer).await?;
            println!(
                "created alarm {} roi {:?} conf {:.2}",
                alarm.id, alarm.region_of_interest, alarm.confidence_threshold
            );
        }
        AlarmCommand::Update {
            alarm_id,
            name,
            camera,
            class_name,
            threshold,
            roi,
            full_frame,
            active,
        } => {
            let existing = facades.alarms.get_one(alarm_id).await?;
            let mut composer = AlarmComposer::from_facades(facades, defaults);
            composer.open_edit(&existing);
            if let Some(name) = name {
                composer.set_name(name);
            }
            if let Some(camera) = camera {
                composer.select_camera(camera);
            }
            if let Some(class_name) = class_name {
                composer.select_class(class_name);
            }
            if let Some(threshold) = threshold {
                composer.set_threshold(threshold)?;
            }
            if full_frame {
                composer.clear_region();
            }
            if let Some(roi) = roi {
                composer.apply_region(roi);
            }
            if let Some(active) = active {
                composer.set_active(active);
            }
            let alarm = submit(&mut composer).await?;
            println!(
                "updated alarm {} roi {:?} conf {:.2}",
                alarm.id, alarm.region_of_interest, alarm.confidence_threshold
            );
        }
        AlarmCommand::Delete { alarm_id } => {
            facades.alarms.delete(alarm_id).await?;
            println!("deleted alarm {alarm_id}");
        }
    }
    Ok(())
}

/// 提交编辑器；校验错误带上出错字段名
async fn submit(composer: &mut AlarmComposer) -> Result<Alarm, Box<dyn std::error::Error>> {
    match composer.submit().await {
        Ok(alarm) => Ok(alarm),
        Err(ComposeError::Validation(err)) => Err(format!("{}: {err}", err.field()).into()),
        Err(err) => Err(err.into()),
    }
}

async fn detections(facades: &EntityFacades, command: DetectionCommand) -> AppResult {
    let DetectionCommand::List { camera, stream } = command;
    let filter = DetectionFilter {
        camera_id: camera,
        stream_id: stream,
    };
    let detections = facades.detections.list_all(filter).await?;
    for detection in detections {
        println!(
            "{:>6}  cam {:<4} stream {:<4} frame {:<8} {:<10} {:.2} {:?}",
            detection.id,
            detection.camera_id,
            detection.stream_id,
            detection.frame_number,
            detection.class_name,
            detection.confidence,
            detection.bbox
        );
    }
    Ok(())
}

async fn rois(facades: &EntityFacades, command: RoiCommand) -> AppResult {
    match command {
        RoiCommand::List { camera } => {
            let filter = RoiFilter { camera_id: camera };
            let regions = facades.rois.list_all(filter).await?;
            let cameras = facades.cameras.list_all().await?;
            for region in regions {
                let bounds = region
                    .bounding_rect()
                    .map(|rect| format!("{:?}", rect.to_array()))
                    .unwrap_or_else(|| "-".to_string());
                let state = if region.is_active { "active" } else { "inactive" };
                println!(
                    "{:>4}  {:<20} camera {:<20} {} vertices  bounds {}  {}",
                    region.id,
                    region.name,
                    camera_label(&cameras, region.camera_id),
                    region.vertices().len(),
                    bounds,
                    state
                );
            }
        }
        RoiCommand::Create {
            camera,
            name,
            points,
            inactive,
        } => {
            let region = facades
                .rois
                .create(RoiCreate {
                    camera_id: camera,
                    name,
                    points,
                    is_active: !inactive,
                })
                .await?;
            println!("created region {} ({})", region.id, region.name);
        }
        RoiCommand::Delete { roi_id } => {
            facades.rois.delete(roi_id).await?;
            println!("deleted region {roi_id}");
        }
    }
    Ok(())
}

/// 传输类失败：非致命，由用户重新执行命令
fn is_retryable(err: &(dyn std::error::Error + 'static)) -> bool {
    err.downcast_ref::<StorageError>()
        .is_some_and(StorageError::is_transport)
        || err
            .downcast_ref::<ComposeError>()
            .is_some_and(ComposeError::is_retryable)
}
