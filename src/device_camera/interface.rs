use crate::error::Result;
use image::DynamicImage;

/// Which way the requested camera points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Facing {
    /// Towards the user, a selfie camera.
    #[default]
    User,
    Environment,
}

impl Facing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::User => "user",
            Facing::Environment => "environment",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCameraConfig {
    /// Ideal frame width requested from the device.
    pub width: u32,
    /// Ideal frame height requested from the device.
    pub height: u32,
    pub facing: Facing,
}

impl Default for DeviceCameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            facing: Facing::User,
        }
    }
}

/// A camera that can be asked for a stream. Opening a stream is where access
/// is granted or denied.
pub trait DeviceCamera: Send + Sync {
    fn open(&self) -> Result<Box<dyn CameraStream + Send>>;
}

/// An acquired stream. Holds the hardware until `stop` is called.
pub trait CameraStream {
    /// The current frame, or `None` while no frame is decodable yet.
    fn capture_frame(&mut self) -> Option<DynamicImage>;

    /// Stops every track of the stream. Calling it twice is a no-op.
    fn stop(&mut self);

    fn is_live(&self) -> bool;
}
