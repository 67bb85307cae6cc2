use crate::device_camera::interface::{CameraStream, DeviceCamera, DeviceCameraConfig};
use crate::error::{Error, Result};
use crate::library::logger::interface::Logger;
use image::{imageops, DynamicImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const FRAME_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "gif", "webp"];

/// A camera that plays back the images of a directory as its frames, in file
/// name order, looping forever.
pub struct DeviceCameraImageDir {
    dir: PathBuf,
    config: DeviceCameraConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraImageDir {
    pub fn new(
        dir: PathBuf,
        config: DeviceCameraConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            dir,
            config,
            logger: logger.with_namespace("camera").with_namespace("image_dir"),
        }
    }

    fn list_frames(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_frame = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false);
            if path.is_file() && is_frame {
                frames.push(path);
            }
        }
        frames.sort();
        Ok(frames)
    }
}

impl DeviceCamera for DeviceCameraImageDir {
    fn open(&self) -> Result<Box<dyn CameraStream + Send>> {
        self.logger.info(&format!(
            "Opening {}-facing camera at {} ({}x{})",
            self.config.facing.as_str(),
            self.dir.display(),
            self.config.width,
            self.config.height
        ));

        let frames = Self::list_frames(&self.dir).map_err(|e| Error::MediaAccessDenied {
            reason: format!("{}: {}", self.dir.display(), e),
        })?;

        if frames.is_empty() {
            return Err(Error::MediaAccessDenied {
                reason: format!("no camera frames found in {}", self.dir.display()),
            });
        }

        self.logger
            .info(&format!("Camera opened with {} frames", frames.len()));

        Ok(Box::new(CameraStreamImageDir {
            frames,
            next: 0,
            config: self.config.clone(),
            logger: self.logger.clone(),
        }))
    }
}

struct CameraStreamImageDir {
    frames: Vec<PathBuf>,
    next: usize,
    config: DeviceCameraConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CameraStream for CameraStreamImageDir {
    fn capture_frame(&mut self) -> Option<DynamicImage> {
        if self.frames.is_empty() {
            return None;
        }

        let path = &self.frames[self.next];
        self.next = (self.next + 1) % self.frames.len();

        match image::open(path) {
            Ok(frame) => Some(frame.resize_exact(
                self.config.width,
                self.config.height,
                imageops::FilterType::Triangle,
            )),
            Err(e) => {
                self.logger
                    .error(&format!("Skipping frame {}: {}", path.display(), e));
                None
            }
        }
    }

    fn stop(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.frames.clear();
        self.logger.info("Camera stopped");
    }

    fn is_live(&self) -> bool {
        !self.frames.is_empty()
    }
}
