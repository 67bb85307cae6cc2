use anyhow::{Context, Result};
use app::main::App;
use camera_session::CameraSession;
use clap::{Parser, ValueEnum};
use config::Config;
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::impl_image_dir::DeviceCameraImageDir;
use device_camera::interface::{DeviceCamera, Facing};
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use image_classifier::classifier::Classifier;
use image_classifier::impl_fake::InferenceEngineFake;
use image_classifier::impl_tract_onnx::InferenceEngineTractOnnx;
use image_classifier::interface::InferenceEngine;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

mod app;
mod camera_session;
mod config;
mod device_camera;
mod device_display;
mod error;
mod image_classifier;
mod image_source;
mod library;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DisplayKind {
    Gui,
    Console,
}

/// Classify eye state (closed / open) from an image file or a camera.
#[derive(Parser, Debug)]
#[command(name = "eye-state-classifier")]
#[command(version, about, long_about = None)]
struct Args {
    /// ONNX model path.
    #[arg(long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Run without a model, producing random scores.
    #[arg(long, conflicts_with = "model")]
    fake_model: bool,

    /// Directory of images to use as the camera. Without it the camera
    /// shows a blank frame.
    #[arg(long, value_name = "DIR")]
    camera_dir: Option<PathBuf>,

    /// Which camera to ask for.
    #[arg(long, value_enum, default_value_t = Facing::User)]
    camera_facing: Facing,

    #[arg(long, value_enum, default_value_t = DisplayKind::Gui)]
    display: DisplayKind,

    /// Log timestamp offset from UTC, in hours.
    #[arg(long, value_name = "HOURS", allow_hyphen_values = true)]
    utc_offset: Option<i32>,
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::default();

    if let Some(model) = &args.model {
        config.model.onnx_model_path = model.clone();
    }

    config.camera.facing = args.camera_facing;

    if let Some(hours) = args.utc_offset {
        config.logger_timezone = chrono::FixedOffset::east_opt(hours * 3600)
            .with_context(|| format!("invalid UTC offset: {} hours", hours))?;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let inference_engine: Arc<dyn InferenceEngine + Send + Sync> = if args.fake_model {
        Arc::new(InferenceEngineFake::new(config.labels.len(), logger.clone()))
    } else {
        Arc::new(InferenceEngineTractOnnx::new(&config.model, logger.clone()))
    };

    let classifier = Arc::new(Classifier::new(
        inference_engine,
        config.labels.clone(),
        logger.clone(),
    ));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match &args.camera_dir {
        Some(dir) => Arc::new(DeviceCameraImageDir::new(
            dir.clone(),
            config.camera.clone(),
            logger.clone(),
        )),
        None => Arc::new(DeviceCameraFake::new(logger.clone())),
    };

    let camera_session = Arc::new(CameraSession::new(device_camera, logger.clone()));

    match args.display {
        DisplayKind::Console => {
            let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> =
                Arc::new(Mutex::new(DeviceDisplayConsole::new()));
            let app = App::new(logger, camera_session, device_display, classifier);
            app.run()?;
        }
        DisplayKind::Gui => {
            let device_display_gui = DeviceDisplayGui::new();
            let window = device_display_gui.handle();
            let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> =
                Arc::new(Mutex::new(device_display_gui));
            let app = App::new(logger, camera_session, device_display, classifier);

            // The window owns the main thread; the app loop runs beside it.
            let app_thread = std::thread::spawn(move || app.run());
            window.run_window()?;
            app_thread
                .join()
                .map_err(|_| anyhow::anyhow!("app thread panicked"))??;
        }
    }

    Ok(())
}
