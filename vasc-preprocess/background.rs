use crate::config::PreprocessConfig;
use image::{GrayImage, Luma};
use imageproc::filter::{box_filter, gaussian_blur_f32, median_filter};
use imageproc::morphology::{grayscale_open, Mask as StructuringElement};

/// Smooth estimate of the illumination field: median of a gaussian of a
/// box mean
pub fn estimate_background(image: &GrayImage, cfg: &PreprocessConfig) -> GrayImage {
    let mean_radius = cfg.mean_size / 2;
    let median_radius = cfg.median_size / 2;

    let mean = box_filter(image, mean_radius, mean_radius);
    let smooth = gaussian_blur_f32(&mean, cfg.gaussian_sigma);
    median_filter(&smooth, median_radius, median_radius)
}

/// Opens the green channel, subtracts its background and stretches the
/// difference to the full 0..255 range
pub fn flatten_illumination(green: &GrayImage, cfg: &PreprocessConfig) -> GrayImage {
    let element = StructuringElement::square(PreprocessConfig::radius(cfg.tophat_size));
    let opened = grayscale_open(green, &element);
    let background = estimate_background(&opened, cfg);
    normalize_difference(&opened, &background)
}

/// Min-max normalization of `a - b`. A flat difference maps to all zero.
pub fn normalize_difference(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let diff: Vec<i32> = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(&x, &y)| x as i32 - y as i32)
        .collect();

    let (min, max) = diff
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &d| (lo.min(d), hi.max(d)));
    let span = (max - min) as i64;

    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        if span <= 0 {
            return Luma([0]);
        }
        let d = diff[(y * a.width() + x) as usize];
        Luma([((d - min) as i64 * 255 / span) as u8])
    })
}
