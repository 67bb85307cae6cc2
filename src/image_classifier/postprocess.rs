use crate::error::{Error, Result};
use crate::image_classifier::interface::Classification;

/// Numerically stable softmax: the max is subtracted before exponentiation
/// so large logits never overflow.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return vec![0.0; scores.len()];
    }

    let exps: Vec<f64> = scores
        .iter()
        .map(|&score| (f64::from(score) - f64::from(max)).exp())
        .collect();
    let sum: f64 = exps.iter().sum();

    exps.iter().map(|&e| (e / sum) as f32).collect()
}

/// Pairs labels with softmax probabilities by position.
pub fn classify_scores(labels: &[String], scores: &[f32]) -> Result<Vec<Classification>> {
    if labels.len() != scores.len() {
        return Err(Error::LabelCountMismatch {
            labels: labels.len(),
            scores: scores.len(),
        });
    }

    Ok(labels
        .iter()
        .zip(softmax(scores))
        .map(|(label, confidence)| Classification {
            label: label.clone(),
            confidence,
        })
        .collect())
}

pub fn format_percentage(probability: f32) -> String {
    format!("{:.2}%", probability * 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub classifications: Vec<Classification>,
}

impl Report {
    pub fn new(classifications: Vec<Classification>) -> Self {
        Self { classifications }
    }

    pub fn top(&self) -> Option<&Classification> {
        self.classifications
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    pub fn to_text(&self) -> String {
        let mut text = String::from("Analysis Results:\n");
        for classification in &self.classifications {
            text.push_str(&format!(
                "{}: {}\n",
                classification.label,
                format_percentage(classification.confidence)
            ));
        }
        text
    }
}
