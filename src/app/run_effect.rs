use crate::app::core::{Effect, Event};
use crate::camera_session::CameraSession;
use crate::device_display::interface::DeviceDisplay;
use crate::error::Result;
use crate::image_classifier::classifier::Classifier;
use crate::image_classifier::postprocess::Report;
use crate::image_source::{acquire_image, ImageSource};
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    camera_session: Arc<CameraSession>,
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    classifier: Arc<Classifier>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        camera_session: Arc<CameraSession>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        classifier: Arc<Classifier>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("run_effect"),
            camera_session,
            device_display,
            classifier,
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToDisplayEvents => {
                let events = self
                    .device_display
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .events();
                for event in events {
                    if self.event_sender.send(Event::DisplayEvent(event)).is_err() {
                        break;
                    }
                }
            }
            Effect::StartCamera => {
                let started = self.camera_session.enable();
                let _ = self.event_sender.send(Event::CameraStartDone(started));
            }
            Effect::StopCamera => {
                self.camera_session.disable();
                let _ = self.event_sender.send(Event::CameraStopDone);
            }
            Effect::Classify { use_camera, file } => {
                let report = self.classify(use_camera, file);
                if let Err(e) = &report {
                    self.logger.error(&format!("Classification failed: {}", e));
                }
                let _ = self.event_sender.send(Event::ClassifyDone(report));
            }
        }
    }

    fn classify(&self, use_camera: bool, file: Option<PathBuf>) -> Result<Report> {
        let camera = use_camera.then(|| self.camera_session.as_ref());
        let (source, image) = acquire_image(camera, file.as_deref())?;

        match &source {
            ImageSource::Camera => self.logger.info("Using camera frame"),
            ImageSource::File(path) => self
                .logger
                .info(&format!("Using file {}", path.display())),
        }

        self.classifier.classify(&image)
    }
}
