//! Screen regions and captured frames.

use ballbot_common::config::RegionConfig;
use ballbot_common::error::{BallbotError, BallbotResult};
use ballbot_kinematics::Vector2D;
use serde::{Deserialize, Serialize};

/// An axis-aligned area of the screen, described by its four corners in
/// physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRegion {
    pub top_left: Vector2D,
    pub top_right: Vector2D,
    pub bottom_left: Vector2D,
    pub bottom_right: Vector2D,
}

impl ScreenRegion {
    pub fn new(
        top_left: Vector2D,
        top_right: Vector2D,
        bottom_left: Vector2D,
        bottom_right: Vector2D,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Build a region from its left/top origin and size.
    pub fn from_bounds(left: i32, top: i32, width: u32, height: u32) -> Self {
        let top_left = Vector2D::from((left, top));
        let right = f64::from(left) + f64::from(width);
        let bottom = f64::from(top) + f64::from(height);
        Self::new(
            top_left,
            Vector2D::new(right, top_left.y),
            Vector2D::new(top_left.x, bottom),
            Vector2D::new(right, bottom),
        )
    }

    pub fn from_config(config: &RegionConfig) -> Self {
        Self::from_bounds(config.left, config.top, config.width, config.height)
    }

    pub fn width(&self) -> f64 {
        (self.top_right - self.top_left).x
    }

    pub fn height(&self) -> f64 {
        (self.bottom_left - self.top_left).y
    }

    pub fn center(&self) -> Vector2D {
        self.top_left + Vector2D::new(self.width(), self.height()) * 0.5
    }

    pub fn contains(&self, point: &Vector2D) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.top_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_left.y
    }

    /// Left/top/width/height form understood by capture backends.
    pub fn capture_bounds(&self) -> RegionConfig {
        RegionConfig {
            left: self.top_left.x as i32,
            top: self.top_left.y as i32,
            width: self.width().max(0.0) as u32,
            height: self.height().max(0.0) as u32,
        }
    }
}

/// A captured RGB image, 3 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> BallbotResult<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(BallbotError::capture(format!(
                "frame {width}x{height} needs {expected} RGB bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert a raw BGRX/BGRA screenshot buffer, dropping the fourth byte.
    pub fn from_bgra(width: u32, height: u32, bgra: &[u8]) -> BallbotResult<Self> {
        let expected = width as usize * height as usize * 4;
        if bgra.len() != expected {
            return Err(BallbotError::capture(format!(
                "screenshot {width}x{height} needs {expected} BGRA bytes, got {}",
                bgra.len()
            )));
        }
        let pixels = bgra
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB triple at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }
}
