use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};
use imageproc::region_labelling::{connected_components, Connectivity};

/// Binary closing then opening with square windows of the given radii
pub fn close_then_open(binary: &GrayImage, closing_radius: u8, opening_radius: u8) -> GrayImage {
    let closed = close(binary, Norm::LInf, closing_radius);
    open(&closed, Norm::LInf, opening_radius)
}

/// Drops 8-connected foreground components with `min_area` pixels or fewer
pub fn remove_small_areas(binary: &GrayImage, min_area: usize) -> GrayImage {
    let labels = connected_components(binary, Connectivity::Eight, Luma([0u8]));

    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    let mut areas = vec![0usize; max_label + 1];
    for p in labels.pixels() {
        areas[p[0] as usize] += 1;
    }

    let kept = areas.iter().skip(1).filter(|&&a| a > min_area).count();
    log::debug!(
        "Area filter kept {} of {} components (min_area={})",
        kept,
        max_label,
        min_area
    );

    GrayImage::from_fn(binary.width(), binary.height(), |x, y| {
        let label = labels.get_pixel(x, y)[0] as usize;
        if label != 0 && areas[label] > min_area {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}
