use crate::device_camera::interface::{CameraStream, DeviceCamera};
use crate::error::{Error, Result};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    denied: Option<String>,
    frame: Option<DynamicImage>,
    active_tracks: Arc<AtomicUsize>,
    opened: Arc<AtomicUsize>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            denied: None,
            frame: Some(DynamicImage::new_rgba8(640, 480)),
            active_tracks: Arc::new(AtomicUsize::new(0)),
            opened: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[allow(dead_code)]
    pub fn denying(mut self, reason: &str) -> Self {
        self.denied = Some(reason.to_string());
        self
    }

    #[allow(dead_code)]
    pub fn with_frame(mut self, frame: DynamicImage) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Streams open but never have a frame ready.
    #[allow(dead_code)]
    pub fn without_frames(mut self) -> Self {
        self.frame = None;
        self
    }

    #[allow(dead_code)]
    /// Tracks acquired and not yet stopped.
    pub fn active_tracks(&self) -> usize {
        self.active_tracks.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn times_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn open(&self) -> Result<Box<dyn CameraStream + Send>> {
        self.logger.info("Opening camera...");

        if let Some(reason) = &self.denied {
            self.logger.error(&format!("Camera access denied: {}", reason));
            return Err(Error::MediaAccessDenied {
                reason: reason.clone(),
            });
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        self.active_tracks.fetch_add(1, Ordering::SeqCst);
        self.logger.info("Camera opened");

        Ok(Box::new(CameraStreamFake {
            frame: self.frame.clone(),
            active_tracks: self.active_tracks.clone(),
            live: true,
            logger: self.logger.clone(),
        }))
    }
}

struct CameraStreamFake {
    frame: Option<DynamicImage>,
    active_tracks: Arc<AtomicUsize>,
    live: bool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraStream for CameraStreamFake {
    fn capture_frame(&mut self) -> Option<DynamicImage> {
        if !self.live {
            return None;
        }
        self.frame.clone()
    }

    fn stop(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        self.active_tracks.fetch_sub(1, Ordering::SeqCst);
        self.logger.info("Camera stopped");
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    #[test]
    fn test_open_and_stop_tracks() {
        let camera = DeviceCameraFake::new(Arc::new(LoggerFake::new()));

        let mut stream = camera.open().unwrap();
        assert_eq!(camera.active_tracks(), 1);
        assert!(stream.capture_frame().is_some());

        stream.stop();
        stream.stop();
        assert_eq!(camera.active_tracks(), 0);
        assert!(!stream.is_live());
        assert!(stream.capture_frame().is_none());
    }

    #[test]
    fn test_denied() {
        let camera = DeviceCameraFake::new(Arc::new(LoggerFake::new())).denying("Permission denied");

        let result = camera.open();

        assert!(matches!(result, Err(Error::MediaAccessDenied { .. })));
        assert_eq!(camera.active_tracks(), 0);
    }
}
