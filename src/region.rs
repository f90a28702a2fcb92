use crate::error::{Result, SimError};
use crate::vector::Vector2;

/// Axis-aligned rectangle bounding the simulation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Region {
    xmin: f32,
    ymin: f32,
    xmax: f32,
    ymax: f32,
}

impl Region {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Result<Self> {
        // Written so NaN bounds fail too
        if !(xmin < xmax && ymin < ymax) {
            return Err(SimError::InvalidRegion {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Region anchored at the origin, `[0, width] x [0, height]`.
    pub fn sized(width: f32, height: f32) -> Result<Self> {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn xmin(&self) -> f32 {
        self.xmin
    }
    pub fn ymin(&self) -> f32 {
        self.ymin
    }
    pub fn xmax(&self) -> f32 {
        self.xmax
    }
    pub fn ymax(&self) -> f32 {
        self.ymax
    }

    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }
    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    pub fn contains(&self, point: Vector2) -> bool {
        (self.xmin..=self.xmax).contains(&point.x()) && (self.ymin..=self.ymax).contains(&point.y())
    }
}
