use crate::app::core::{CameraMode, RunState, State};
use crate::device_display::interface::{DeviceDisplay, View};
use crate::error::Result;
use crate::image_classifier::postprocess::format_percentage;
use std::sync::{Arc, Mutex, PoisonError};

pub fn view(state: &State) -> View {
    let camera_button = match state.camera {
        CameraMode::Off => "Use Camera 📷",
        CameraMode::Starting => "Starting Camera...",
        CameraMode::On => "Turn Off Camera",
        CameraMode::Stopping => "Stopping Camera...",
    };

    let result = match &state.run {
        RunState::Idle => String::new(),
        RunState::Running => "Analyzing...".to_string(),
        RunState::Done(report) => report.to_text(),
        RunState::Failed(text) => text.clone(),
    };

    let top = match &state.run {
        RunState::Done(report) => report.top().map(|classification| {
            format!(
                "{} ({})",
                classification.label,
                format_percentage(classification.confidence)
            )
        }),
        _ => None,
    };

    View {
        camera_button: camera_button.to_string(),
        camera_on: state.camera == CameraMode::On,
        file: state.file.as_ref().map(|path| path.display().to_string()),
        busy: state.run == RunState::Running,
        result,
        top,
    }
}

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn render(&self, state: &State) -> Result<()> {
        self.device_display
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render(&view(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::interface::Classification;
    use crate::image_classifier::postprocess::Report;
    use std::path::PathBuf;

    fn report() -> Report {
        Report::new(vec![
            Classification {
                label: "Closed Eyes 😴".to_string(),
                confidence: 0.01,
            },
            Classification {
                label: "Open Eyes 👀".to_string(),
                confidence: 0.99,
            },
        ])
    }

    #[test]
    fn test_view_initial() {
        let view = view(&State::default());

        assert_eq!(view.camera_button, "Use Camera 📷");
        assert!(!view.camera_on);
        assert!(!view.busy);
        assert_eq!(view.file, None);
        assert_eq!(view.result, "");
        assert_eq!(view.top, None);
    }

    #[test]
    fn test_view_camera_on_with_results() {
        let state = State {
            camera: CameraMode::On,
            file: Some(PathBuf::from("eyes.png")),
            run: RunState::Done(report()),
            exiting: false,
        };

        let view = view(&state);

        assert_eq!(view.camera_button, "Turn Off Camera");
        assert!(view.camera_on);
        assert_eq!(view.file.as_deref(), Some("eyes.png"));
        assert_eq!(
            view.result,
            "Analysis Results:\nClosed Eyes 😴: 1.00%\nOpen Eyes 👀: 99.00%\n"
        );
        assert_eq!(view.top.as_deref(), Some("Open Eyes 👀 (99.00%)"));
    }

    #[test]
    fn test_view_camera_stopping() {
        let state = State {
            camera: CameraMode::Stopping,
            ..State::default()
        };

        let view = view(&state);

        assert_eq!(view.camera_button, "Stopping Camera...");
        assert!(!view.camera_on);
    }

    #[test]
    fn test_view_running() {
        let state = State {
            run: RunState::Running,
            ..State::default()
        };

        let view = view(&state);

        assert!(view.busy);
        assert_eq!(view.result, "Analyzing...");
        assert_eq!(view.top, None);
    }
}
