use crate::camera_session::CameraSession;
use crate::error::{Error, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Camera,
    File(PathBuf),
}

/// Decides where the next image comes from: the camera when it has a frame
/// ready, otherwise the selected file.
pub fn select_source(camera_ready: bool, file: Option<&Path>) -> Result<ImageSource> {
    match (camera_ready, file) {
        (true, _) => Ok(ImageSource::Camera),
        (false, Some(path)) => Ok(ImageSource::File(path.to_path_buf())),
        (false, None) => Err(Error::NoInputAvailable),
    }
}

/// Captures a frame from an active camera or decodes the selected file,
/// following `select_source`.
pub fn acquire_image(
    camera: Option<&CameraSession>,
    file: Option<&Path>,
) -> Result<(ImageSource, DynamicImage)> {
    let frame = camera
        .filter(|session| session.is_active())
        .and_then(|session| session.frame());

    match (select_source(frame.is_some(), file)?, frame) {
        (ImageSource::Camera, Some(frame)) => Ok((ImageSource::Camera, frame)),
        (ImageSource::File(path), _) => {
            let image = load_image(&path)?;
            Ok((ImageSource::File(path), image))
        }
        (ImageSource::Camera, None) => Err(Error::NoInputAvailable),
    }
}

pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}
