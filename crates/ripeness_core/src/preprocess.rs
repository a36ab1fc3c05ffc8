use anyhow::{Context, Result};
use image::{DynamicImage, RgbImage, imageops::FilterType};
use ndarray::Array4;

/// Side length of the square model input.
pub const INPUT_SIZE: u32 = 150;

/// Decode an uploaded image and build the model input tensor.
pub fn preprocess_bytes(bytes: &[u8], size: u32) -> Result<Array4<f32>> {
    let img = image::load_from_memory(bytes).context("cannot decode uploaded image")?;
    Ok(preprocess_image(&img, size))
}

/// RGB, resized to `size` x `size`, scaled to [0,1], laid out as NHWC
/// `(1, size, size, 3)`.
pub fn preprocess_image(img: &DynamicImage, size: u32) -> Array4<f32> {
    let resized = resize_to_square(img, size);
    let mut array = Array4::<f32>::zeros((1, size as usize, size as usize, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (row, col) = (y as usize, x as usize);
        for (c, value) in pixel.0.iter().enumerate() {
            array[[0, row, col, c]] = scale_channel(*value);
        }
    }
    array
}

fn resize_to_square(img: &DynamicImage, size: u32) -> RgbImage {
    img.resize_exact(size, size, FilterType::CatmullRom).to_rgb8()
}

fn scale_channel(value: u8) -> f32 {
    value as f32 / 255.0
}
