use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::image_classifier::interface::InferenceEngine;
use crate::image_classifier::preprocess::TENSOR_SHAPE;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex, PoisonError};
use tract_onnx::prelude::*;

type Model = TypedRunnableModel<TypedModel>;

/// Runs an ONNX model with tract. The model is loaded on the first run, and
/// a failed load is retried on the next one, so a missing or broken model
/// file surfaces as a run error instead of stopping the program.
pub struct InferenceEngineTractOnnx {
    config: ModelConfig,
    model: Mutex<Option<Model>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceEngineTractOnnx {
    pub fn new(config: &ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config: config.clone(),
            model: Mutex::new(None),
            logger: logger.with_namespace("image_classifier").with_namespace("tract"),
        }
    }

    fn load(&self) -> Result<Model> {
        let path = &self.config.onnx_model_path;

        self.logger
            .info(&format!("Loading model from {}", path.display()));

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_names([self.config.input_name.as_str()]))
            .and_then(|model| model.with_input_fact(0, f32::fact(TENSOR_SHAPE).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| Error::ModelLoad {
                path: path.clone(),
                reason: format!("{:#}", e),
            })?;

        self.logger.info("Model loaded");

        Ok(model)
    }
}

impl InferenceEngine for InferenceEngineTractOnnx {
    fn infer(&self, input: Tensor) -> Result<Vec<f32>> {
        let to_error = |e: TractError| Error::Inference {
            reason: format!("{:#}", e),
        };

        let mut slot = self.model.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(self.load()?);
        }
        let model = slot.as_ref().ok_or_else(|| Error::Inference {
            reason: "model not loaded".to_string(),
        })?;

        let outputs = model.run(tvec!(input.into_tvalue())).map_err(to_error)?;

        let first = outputs.first().ok_or_else(|| Error::Inference {
            reason: "model produced no outputs".to_string(),
        })?;
        let scores: Vec<f32> = first
            .to_array_view::<f32>()
            .map_err(to_error)?
            .iter()
            .copied()
            .collect();

        self.logger
            .info(&format!("Model returned {} scores", scores.len()));

        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;
    use std::path::PathBuf;

    fn input() -> Tensor {
        Tensor::zero::<f32>(&TENSOR_SHAPE).unwrap()
    }

    #[test]
    fn test_missing_model_is_a_load_error_on_infer() {
        let config = ModelConfig {
            onnx_model_path: PathBuf::from("./does/not/exist/model.onnx"),
            ..ModelConfig::default()
        };
        let engine = InferenceEngineTractOnnx::new(&config, Arc::new(LoggerFake::new()));

        let result = engine.infer(input());

        match result {
            Err(Error::ModelLoad { path, .. }) => assert_eq!(path, config.onnx_model_path),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("model should not load"),
        }
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        let config = ModelConfig {
            onnx_model_path: path.clone(),
            ..ModelConfig::default()
        };
        let logger = Arc::new(LoggerFake::new());
        let engine = InferenceEngineTractOnnx::new(&config, logger.clone());

        assert!(matches!(engine.infer(input()), Err(Error::ModelLoad { .. })));
        std::fs::write(&path, b"still not a model").unwrap();
        assert!(matches!(engine.infer(input()), Err(Error::ModelLoad { .. })));

        let attempts = logger
            .lines()
            .iter()
            .filter(|line| line.contains("Loading model from"))
            .count();
        assert_eq!(attempts, 2);
    }

    #[test]
    fn test_garbage_model_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"definitely not protobuf").unwrap();
        let config = ModelConfig {
            onnx_model_path: path,
            ..ModelConfig::default()
        };

        let engine = InferenceEngineTractOnnx::new(&config, Arc::new(LoggerFake::new()));

        assert!(matches!(engine.infer(input()), Err(Error::ModelLoad { .. })));
    }
}
