use crate::device_display::interface::DisplayEvent;
use crate::error::Error;
use crate::image_classifier::postprocess::Report;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Off,
    Starting,
    On,
    Stopping,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Done(Report),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub camera: CameraMode,
    pub file: Option<PathBuf>,
    pub run: RunState,
    pub exiting: bool,
}

#[derive(Debug)]
pub enum Event {
    DisplayEvent(DisplayEvent),
    CameraStartDone(Result<(), Error>),
    CameraStopDone,
    ClassifyDone(Result<Report, Error>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToDisplayEvents,
    StartCamera,
    StopCamera,
    Classify {
        use_camera: bool,
        file: Option<PathBuf>,
    },
}

pub fn init() -> (State, Vec<Effect>) {
    (State::default(), vec![Effect::SubscribeToDisplayEvents])
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state.camera, event) {
        (_, Event::DisplayEvent(DisplayEvent::Quit)) => (
            State {
                exiting: true,
                ..state
            },
            vec![],
        ),

        // Camera toggle
        (CameraMode::Off, Event::DisplayEvent(DisplayEvent::ToggleCamera)) => (
            State {
                camera: CameraMode::Starting,
                ..state
            },
            vec![Effect::StartCamera],
        ),
        (CameraMode::On, Event::DisplayEvent(DisplayEvent::ToggleCamera)) => (
            State {
                camera: CameraMode::Stopping,
                ..state
            },
            vec![Effect::StopCamera],
        ),
        (CameraMode::Stopping, Event::CameraStopDone) => (
            State {
                camera: CameraMode::Off,
                ..state
            },
            vec![],
        ),
        (CameraMode::Starting, Event::CameraStartDone(Ok(()))) => (
            State {
                camera: CameraMode::On,
                ..state
            },
            vec![],
        ),
        (CameraMode::Starting, Event::CameraStartDone(Err(error))) => (
            State {
                camera: CameraMode::Off,
                run: RunState::Failed(error.user_message()),
                ..state
            },
            vec![],
        ),
        (_, Event::CameraStartDone(Ok(()))) => (state, vec![Effect::StopCamera]),

        // Inference
        (_, Event::DisplayEvent(DisplayEvent::SelectFile(path))) => (
            State {
                file: Some(path),
                ..state
            },
            vec![],
        ),
        (camera, Event::DisplayEvent(DisplayEvent::RunInference))
            if state.run != RunState::Running =>
        {
            let effect = Effect::Classify {
                use_camera: camera == CameraMode::On,
                file: state.file.clone(),
            };
            (
                State {
                    run: RunState::Running,
                    ..state
                },
                vec![effect],
            )
        }
        (_, Event::ClassifyDone(result)) if state.run == RunState::Running => {
            let run = match result {
                Ok(report) => RunState::Done(report),
                Err(error) => RunState::Failed(error.user_message()),
            };
            (State { run, ..state }, vec![])
        }

        // Toggles while starting or stopping, runs while running, stale completions.
        (_, _) => (state, vec![]),
    }
}
