use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Neither a camera frame nor a selected file is available.
    #[error("no input available")]
    NoInputAvailable,

    /// Camera permission refused, device missing or stream ended on start.
    #[error("camera access denied: {reason}")]
    MediaAccessDenied { reason: String },

    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("failed to build input tensor: {reason}")]
    Tensor { reason: String },

    #[error("failed to load model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("inference failed: {reason}")]
    Inference { reason: String },

    /// The model returned a different number of scores than there are labels.
    #[error("model returned {scores} scores for {labels} labels")]
    LabelCountMismatch { labels: usize, scores: usize },

    #[error("display error: {reason}")]
    Display { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Text shown to the user when a run or a camera toggle fails.
    pub fn user_message(&self) -> String {
        match self {
            Error::NoInputAvailable => {
                "Please select an image or enable the camera and ensure it's ready.".to_string()
            }
            Error::MediaAccessDenied { reason } => {
                format!("Failed to access the camera: {}", reason)
            }
            error => format!("Error during analysis: {}", error),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_no_input() {
        assert_eq!(
            Error::NoInputAvailable.user_message(),
            "Please select an image or enable the camera and ensure it's ready."
        );
    }

    #[test]
    fn test_user_message_media_access_denied() {
        let error = Error::MediaAccessDenied {
            reason: "Permission denied".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "Failed to access the camera: Permission denied"
        );
    }

    #[test]
    fn test_user_message_inference_failure() {
        let error = Error::Inference {
            reason: "shape mismatch".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "Error during analysis: inference failed: shape mismatch"
        );
    }

    #[test]
    fn test_user_message_tensor_failure() {
        let error = Error::Tensor {
            reason: "bad shape".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "Error during analysis: failed to build input tensor: bad shape"
        );
    }
}
