use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use vasc_core::{Junction, JunctionSet};

/// Square markers drawn around confirmed junctions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Side of the box, centered on the junction
    pub box_size: u32,
    /// Line thickness, growing inward
    pub stroke: u32,
    pub bifurcation_color: [u8; 3],
    pub intersection_color: [u8; 3],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            box_size: 20,
            stroke: 2,
            bifurcation_color: [0, 0, 255],
            intersection_color: [0, 255, 0],
        }
    }
}

impl MarkerStyle {
    pub fn validate(&self) -> Result<(), String> {
        if self.box_size == 0 {
            return Err("marker box_size must be > 0".to_string());
        }
        if self.stroke == 0 || self.stroke > self.box_size / 2 + 1 {
            return Err(format!(
                "marker stroke must be in 1..={} for box_size {}",
                self.box_size / 2 + 1,
                self.box_size
            ));
        }
        Ok(())
    }
}

/// Copy of `image` with every junction boxed in its class color
pub fn draw_junctions(image: &RgbImage, junctions: &JunctionSet, style: &MarkerStyle) -> RgbImage {
    let mut canvas = image.clone();
    for junction in &junctions.bifurcations {
        draw_marker(&mut canvas, junction, Rgb(style.bifurcation_color), style);
    }
    for junction in &junctions.intersections {
        draw_marker(&mut canvas, junction, Rgb(style.intersection_color), style);
    }
    canvas
}

fn draw_marker(canvas: &mut RgbImage, junction: &Junction, color: Rgb<u8>, style: &MarkerStyle) {
    let half = (style.box_size / 2) as i32;
    let (x, y) = (junction.col as i32, junction.row as i32);

    for k in 0..style.stroke as i32 {
        let side = 2 * (half - k) + 1;
        if side <= 0 {
            break;
        }
        let rect = Rect::at(x - half + k, y - half + k).of_size(side as u32, side as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}
