use crate::error::{Error, Result};
use crate::image_classifier::interface::InferenceEngine;
use crate::image_classifier::preprocess::TENSOR_SHAPE;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tract_onnx::prelude::Tensor;

enum Behavior {
    Random { classes: usize },
    Fixed(Vec<f32>),
    Fail(String),
}

pub struct InferenceEngineFake {
    behavior: Behavior,
    calls: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferenceEngineFake {
    /// Random logits for `classes` classes, for running without a model.
    pub fn new(classes: usize, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Random { classes }, logger)
    }

    #[allow(dead_code)]
    pub fn with_scores(scores: Vec<f32>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Fixed(scores), logger)
    }

    #[allow(dead_code)]
    pub fn failing(reason: &str, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Fail(reason.to_string()), logger)
    }

    fn with_behavior(behavior: Behavior, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InferenceEngine for InferenceEngineFake {
    fn infer(&self, input: Tensor) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.logger.info("Running fake inference...");

        if input.shape() != &TENSOR_SHAPE[..] {
            return Err(Error::Inference {
                reason: format!("unexpected input shape {:?}", input.shape()),
            });
        }

        match &self.behavior {
            Behavior::Random { classes } => {
                let dist = Uniform::new(-4.0f32, 4.0).map_err(|e| Error::Inference {
                    reason: e.to_string(),
                })?;
                let mut rng = rand::rng();
                Ok((0..*classes).map(|_| dist.sample(&mut rng)).collect())
            }
            Behavior::Fixed(scores) => Ok(scores.clone()),
            Behavior::Fail(reason) => Err(Error::Inference {
                reason: reason.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    fn input() -> Tensor {
        Tensor::zero::<f32>(&TENSOR_SHAPE).unwrap()
    }

    #[test]
    fn test_random_scores_have_one_entry_per_class() {
        let engine = InferenceEngineFake::new(2, Arc::new(LoggerFake::new()));

        let scores = engine.infer(input()).unwrap();

        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|s| (-4.0..4.0).contains(s)));
        assert_eq!(engine.calls(), 1);
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let engine = InferenceEngineFake::with_scores(vec![1.0], Arc::new(LoggerFake::new()));

        let result = engine.infer(Tensor::zero::<f32>(&[1, 3, 10, 10]).unwrap());

        assert!(matches!(result, Err(Error::Inference { .. })));
    }
}
