use crate::device_camera::interface::DeviceCameraConfig;
use chrono::{Offset, Utc};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    pub input_name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: PathBuf::from("model.onnx"),
            input_name: "pixel_values".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelConfig,
    /// Class labels in the order the model emits its scores.
    pub labels: Vec<String>,
    pub camera: DeviceCameraConfig,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            labels: vec!["Closed Eyes 😴".to_string(), "Open Eyes 👀".to_string()],
            camera: DeviceCameraConfig::default(),
            logger_timezone: Utc.fix(),
        }
    }
}
