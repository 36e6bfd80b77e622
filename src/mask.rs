//! Pixel silhouettes and the mask-overlap collision test.
//!
//! Collision is a per-pixel AND over the intersection of two masks at a
//! relative offset, not a bounding-box test: transparent sprite corners must
//! not register as hits.

use crate::bird::Bird;
use crate::config::Config;
use crate::error::SimError;
use crate::obstacle::Obstacle;

/// Occupied-pixel silhouette of a sprite, row-major.
#[derive(Clone, Debug)]
pub struct SpriteMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl SpriteMask {
    /// Fully opaque rectangle
    pub fn filled(width: usize, height: usize) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyMask { what: "filled" });
        }
        Ok(Self {
            width,
            height,
            bits: vec![true; width * height],
        })
    }

    /// Ellipse inscribed in `width x height`. Used as the default bird
    /// silhouette so the corners of the sprite stay permeable.
    pub fn ellipse(width: usize, height: usize) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyMask { what: "ellipse" });
        }
        let mut bits = vec![false; width * height];
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        for y in 0..height {
            for x in 0..width {
                let nx = (x as f32 + 0.5 - rx) / rx;
                let ny = (y as f32 + 0.5 - ry) / ry;
                bits[y * width + x] = nx * nx + ny * ny <= 1.0;
            }
        }
        Ok(Self { width, height, bits })
    }

    /// Parse a silhouette from text rows, `#` solid and `.` empty.
    /// All rows must have the same length.
    pub fn from_rows(rows: &[&str]) -> Result<Self, SimError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(SimError::EmptyMask { what: "from_rows" });
        }
        let width = rows[0].len();
        let height = rows.len();
        let mut bits = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return Err(SimError::InvalidConfig(
                    "mask rows must all have the same length".to_string(),
                ));
            }
            bits.extend(row.chars().map(|c| c == '#'));
        }
        Ok(Self { width, height, bits })
    }

    /// Copy with rows reversed, for the top obstacle segment
    pub fn flipped_vertical(&self) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len());
        for y in (0..self.height).rev() {
            bits.extend_from_slice(&self.bits[y * self.width..(y + 1) * self.width]);
        }
        Self {
            width: self.width,
            height: self.height,
            bits,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    /// True if any solid pixel of `other`, positioned at `offset` relative
    /// to this mask's origin, coincides with a solid pixel of this mask.
    pub fn overlaps(&self, other: &SpriteMask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;

        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width as i32).min(self.width as i32);
        let y1 = (oy + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as usize, y as usize)
                    && other.get((x - ox) as usize, (y - oy) as usize)
                {
                    return true;
                }
            }
        }
        false
    }
}

/// The silhouettes a simulation collides with, owned per session rather
/// than held as process-wide loaded assets.
#[derive(Clone, Debug)]
pub struct Silhouettes {
    pub bird: SpriteMask,
    pub pipe_top: SpriteMask,
    pub pipe_bottom: SpriteMask,
}

impl Silhouettes {
    /// Build from a bird mask and a bottom-oriented pipe mask; the top
    /// segment uses the vertical flip of the same pipe silhouette.
    pub fn new(bird: SpriteMask, pipe: SpriteMask) -> Self {
        Self {
            bird,
            pipe_top: pipe.flipped_vertical(),
            pipe_bottom: pipe,
        }
    }

    /// Default silhouettes from configured sprite dimensions: elliptical
    /// bird, rectangular pipe segments.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        let bird = SpriteMask::ellipse(config.bird.sprite_width, config.bird.sprite_height)?;
        let pipe = SpriteMask::filled(config.obstacles.sprite_width, config.obstacles.sprite_height)?;
        Ok(Self::new(bird, pipe))
    }

    /// Pixel-accurate test of a bird against both segments of an obstacle.
    ///
    /// Offsets are `(pipe.x - bird.x, segment_y - round(bird.y))` in the
    /// bird mask's frame.
    pub fn collides(&self, bird: &Bird, obstacle: &Obstacle) -> bool {
        let bird_y = bird.y.round();
        let dx = (obstacle.x - bird.x).round() as i32;
        let top_dy = (obstacle.top - bird_y).round() as i32;
        let bottom_dy = (obstacle.gap_bottom - bird_y).round() as i32;

        self.bird.overlaps(&self.pipe_top, (dx, top_dy))
            || self.bird.overlaps(&self.pipe_bottom, (dx, bottom_dy))
    }
}
