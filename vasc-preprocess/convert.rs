use image::{GrayImage, Luma, RgbImage};
use vasc_core::Mask;

/// Green channel of an RGB image, where retinal vessels have the most contrast
pub fn green_channel(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([image.get_pixel(x, y)[1]])
    })
}

/// Non-zero pixels become foreground; image `y` maps to mask row
pub fn mask_from_gray(image: &GrayImage) -> Mask {
    Mask::from_fn(image.height() as usize, image.width() as usize, |row, col| {
        image.get_pixel(col as u32, row as u32)[0] != 0
    })
}

pub fn mask_to_gray(mask: &Mask) -> GrayImage {
    GrayImage::from_fn(mask.cols() as u32, mask.rows() as u32, |x, y| {
        if mask.get(y as usize, x as usize) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
