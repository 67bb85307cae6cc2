use crate::device_camera::interface::{CameraStream, DeviceCamera};
use crate::error::{Error, Result};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Owns the camera stream: acquired on `enable`, released on `disable`, on a
/// failed start, and on drop.
pub struct CameraSession {
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    stream: Mutex<Option<Box<dyn CameraStream + Send>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraSession {
    pub fn new(
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            device_camera,
            stream: Mutex::new(None),
            logger: logger.with_namespace("camera_session"),
        }
    }

    fn stream(&self) -> MutexGuard<'_, Option<Box<dyn CameraStream + Send>>> {
        self.stream.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enable(&self) -> Result<()> {
        let mut stream = self.stream();
        if stream.is_some() {
            return Ok(());
        }

        let mut opened = match self.device_camera.open() {
            Ok(opened) => opened,
            Err(e) => {
                self.logger.error(&format!("Failed to start camera: {}", e));
                return Err(e);
            }
        };

        if !opened.is_live() {
            opened.stop();
            self.logger.error("Camera stream ended before it started");
            return Err(Error::MediaAccessDenied {
                reason: "camera stream ended before it started".to_string(),
            });
        }

        *stream = Some(opened);
        self.logger.info("Camera enabled");
        Ok(())
    }

    pub fn disable(&self) {
        if let Some(mut stream) = self.stream().take() {
            stream.stop();
            self.logger.info("Camera disabled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream().is_some()
    }

    /// The current frame, or `None` when the camera is off or no frame is
    /// ready.
    pub fn frame(&self) -> Option<DynamicImage> {
        self.stream()
            .as_mut()
            .and_then(|stream| stream.capture_frame())
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.disable();
    }
}
