use crate::error::Result;
use tract_onnx::prelude::Tensor;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

/// Runs a model on a preprocessed input tensor and returns the raw scores
/// (logits) of its first output.
pub trait InferenceEngine: Send + Sync {
    fn infer(&self, input: Tensor) -> Result<Vec<f32>>;
}
