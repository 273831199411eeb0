use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

/// Inverted adaptive threshold against a gaussian-weighted local mean.
///
/// A pixel is foreground (255) when it is at least `offset` darker than its
/// neighborhood, so dark vessels on a bright fundus come out white.
pub fn adaptive_threshold_inv(image: &GrayImage, sigma: f32, offset: i16) -> GrayImage {
    let local = gaussian_blur_f32(image, sigma);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = image.get_pixel(x, y)[0] as i16;
        let threshold = local.get_pixel(x, y)[0] as i16 - offset;
        if value > threshold {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}
