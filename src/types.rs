use std::ops::{Add, Sub};

use crate::error::TrackingError;

pub const LANDMARK_COUNT: usize = 21;

/// Hand landmark indices, following the 21-point hand model layout.
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    /// (tip, mcp) pairs of the four non-thumb fingers.
    pub const FINGERS: [(usize, usize); 4] = [
        (INDEX_TIP, INDEX_MCP),
        (MIDDLE_TIP, MIDDLE_MCP),
        (RING_TIP, RING_MCP),
        (PINKY_TIP, PINKY_MCP),
    ];
}

/// Camera frame handed to the scheduler by the host's capture path.
#[derive(Clone, Debug)]
pub struct Frame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp_ms: u64,
}

impl Frame {
    pub fn has_valid_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Screen-space point in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned screen rectangle; `origin` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
    }
}

/// One normalized landmark: x and y in `[0, 1]` of the frame, z relative depth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar distance in camera-normalized units.
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The 21 landmarks of one detected hand, plus the source timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: [Landmark; LANDMARK_COUNT],
    pub timestamp_ms: u64,
}

impl LandmarkFrame {
    pub fn new(points: [Landmark; LANDMARK_COUNT], timestamp_ms: u64) -> Self {
        Self {
            points,
            timestamp_ms,
        }
    }

    /// Builds a frame from detector output, rejecting anything that is not a full hand.
    pub fn from_raw(raw: &[[f32; 3]], timestamp_ms: u64) -> Result<Self, TrackingError> {
        if raw.len() != LANDMARK_COUNT {
            return Err(TrackingError::LandmarkCount(raw.len()));
        }
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (slot, [x, y, z]) in points.iter_mut().zip(raw) {
            *slot = Landmark::new(*x, *y, *z);
        }
        Ok(Self::new(points, timestamp_ms))
    }

    pub fn point(&self, index: usize) -> &Landmark {
        &self.points[index]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Index fingertip, the point that drives the cursor.
    pub fn pointer(&self) -> &Landmark {
        &self.points[landmarks::INDEX_TIP]
    }

    pub fn scaled(&self, factor: f32) -> Self {
        let mut points = self.points;
        for point in points.iter_mut() {
            point.x *= factor;
            point.y *= factor;
            point.z *= factor;
        }
        Self::new(points, self.timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_partial_hand() {
        let raw = vec![[0.5, 0.5, 0.0]; 20];
        assert!(matches!(
            LandmarkFrame::from_raw(&raw, 0),
            Err(TrackingError::LandmarkCount(20))
        ));
    }

    #[test]
    fn from_raw_keeps_point_order() {
        let raw: Vec<[f32; 3]> = (0..LANDMARK_COUNT)
            .map(|i| [i as f32 / 100.0, 0.5, 0.0])
            .collect();
        let frame = LandmarkFrame::from_raw(&raw, 42).unwrap();
        assert_eq!(frame.timestamp_ms, 42);
        assert_eq!(frame.pointer().x, 0.08);
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(110.0, 60.0)));
        assert!(!rect.contains(Point::new(110.1, 30.0)));
        assert_eq!(rect.center(), Point::new(60.0, 35.0));
    }

    #[test]
    fn zero_sized_frame_is_invalid() {
        let frame = Frame {
            rgba: Vec::new(),
            width: 0,
            height: 480,
            timestamp_ms: 1,
        };
        assert!(!frame.has_valid_dimensions());
    }
}
