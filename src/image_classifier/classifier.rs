use crate::error::Result;
use crate::image_classifier::interface::InferenceEngine;
use crate::image_classifier::postprocess::{classify_scores, format_percentage, Report};
use crate::image_classifier::preprocess::image_to_tensor;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;

/// Turns an image into a report of class probabilities.
pub struct Classifier {
    engine: Arc<dyn InferenceEngine + Send + Sync>,
    labels: Vec<String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl Classifier {
    pub fn new(
        engine: Arc<dyn InferenceEngine + Send + Sync>,
        labels: Vec<String>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            engine,
            labels,
            logger: logger.with_namespace("classifier"),
        }
    }

    pub fn classify(&self, image: &DynamicImage) -> Result<Report> {
        self.logger.info(&format!(
            "Classifying {}x{} image",
            image.width(),
            image.height()
        ));

        let input = image_to_tensor(image)?;
        let scores = self.engine.infer(input)?;
        let report = Report::new(classify_scores(&self.labels, &scores)?);

        if let Some(top) = report.top() {
            self.logger.info(&format!(
                "Top class: {} ({})",
                top.label,
                format_percentage(top.confidence)
            ));
        }

        Ok(report)
    }
}
