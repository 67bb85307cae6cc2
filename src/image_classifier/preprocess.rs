use crate::error::{Error, Result};
use image::{imageops, DynamicImage, RgbaImage};
use tract_onnx::prelude::*;

pub const TENSOR_SIZE: u32 = 224;
pub const TENSOR_CHANNELS: usize = 3;
pub const TENSOR_SHAPE: [usize; 4] = [1, TENSOR_CHANNELS, TENSOR_SIZE as usize, TENSOR_SIZE as usize];

const PLANE_LEN: usize = (TENSOR_SIZE * TENSOR_SIZE) as usize;

/// Stretches the image to exactly `TENSOR_SIZE` x `TENSOR_SIZE`, ignoring
/// aspect ratio.
pub fn resize_image(image: &DynamicImage) -> RgbaImage {
    let rgba = image.to_rgba8();
    if rgba.dimensions() == (TENSOR_SIZE, TENSOR_SIZE) {
        return rgba;
    }
    imageops::resize(&rgba, TENSOR_SIZE, TENSOR_SIZE, imageops::FilterType::Triangle)
}

/// Maps a byte to [-1, 1].
pub fn normalize_channel(value: u8) -> f32 {
    (value as f32 / 255.0 - 0.5) / 0.5
}

/// Builds the `[1, 3, 224, 224]` planar input tensor: all red values, then
/// all green, then all blue. Alpha is dropped.
pub fn image_to_tensor(image: &DynamicImage) -> Result<Tensor> {
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }

    let resized = resize_image(image);

    let mut data = vec![0.0f32; TENSOR_CHANNELS * PLANE_LEN];
    for (i, pixel) in resized.pixels().enumerate() {
        for c in 0..TENSOR_CHANNELS {
            data[c * PLANE_LEN + i] = normalize_channel(pixel[c]);
        }
    }

    Tensor::from_shape(&TENSOR_SHAPE, &data).map_err(|e| Error::Tensor {
        reason: e.to_string(),
    })
}
