use std::collections::HashMap;

/// One-pixel-thick circular outline on a square grid of odd side.
///
/// A pixel at offset `(dy, dx)` from the center belongs to the ring when
/// `r^2 <= dy^2 + dx^2 < (r + 1)^2`, `r` being `diameter / 2`: the
/// difference between a disk of radius `r + 1` and a disk of radius `r`.
///
/// The outline is 8-connected, so a one-pixel diagonal strand through the
/// center can pass between two ring pixels. Diameters 7, 13, 21, 27, 35, 41,
/// 47, 55 and 61 miss the main diagonal entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingTemplate {
    diameter: usize,
    data: Vec<bool>,
    offsets: Vec<(isize, isize)>,
}

impl RingTemplate {
    /// Even diameters are bumped to the next odd value so the center is a pixel.
    pub fn new(diameter: usize) -> Self {
        let diameter = if diameter % 2 == 0 {
            diameter + 1
        } else {
            diameter
        };
        let radius = (diameter / 2) as isize;
        let inner_sq = radius * radius;
        let outer_sq = (radius + 1) * (radius + 1);

        let mut data = Vec::with_capacity(diameter * diameter);
        let mut offsets = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let dist_sq = dy * dy + dx * dx;
                let on_ring = dist_sq >= inner_sq && dist_sq < outer_sq;
                data.push(on_ring);
                if on_ring {
                    offsets.push((dy, dx));
                }
            }
        }

        Self {
            diameter,
            data,
            offsets,
        }
    }

    /// Side length of the grid (always odd)
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    pub fn radius(&self) -> usize {
        self.diameter / 2
    }

    /// Grid lookup with `(0, 0)` at the top-left corner
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.diameter && col < self.diameter && self.data[row * self.diameter + col]
    }

    /// Ring pixels as `(drow, dcol)` offsets from the center, raster ordered
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    /// Number of pixels on the outline
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Ring templates memoized by diameter for one detection run
#[derive(Debug, Clone, Default)]
pub struct RingCache {
    by_diameter: HashMap<usize, RingTemplate>,
}

impl RingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-build templates for every listed diameter
    pub fn for_diameters<I>(diameters: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut cache = Self::new();
        for diameter in diameters {
            cache.get_or_build(diameter);
        }
        cache
    }

    pub fn get(&self, diameter: usize) -> Option<&RingTemplate> {
        self.by_diameter.get(&diameter)
    }

    pub fn get_or_build(&mut self, diameter: usize) -> &RingTemplate {
        self.by_diameter
            .entry(diameter)
            .or_insert_with(|| RingTemplate::new(diameter))
    }

    pub fn len(&self) -> usize {
        self.by_diameter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_diameter.is_empty()
    }
}
