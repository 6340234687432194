//! Native geometry value types
//!
//! Layouts mirror the native library's `Point2f`, `Rect`, `Size` and
//! `Scalar`. Points are single precision; everything else is either
//! `i32` or `f64`.

/// 2D point with single-precision coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer rectangle: top-left origin plus extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

/// Four-channel double-precision value (colour, border fill, ...)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scalar(pub [f64; 4]);

impl Scalar {
    pub fn new(v0: f64, v1: f64, v2: f64, v3: f64) -> Self {
        Self([v0, v1, v2, v3])
    }

    /// Same value in every channel
    pub fn all(v: f64) -> Self {
        Self([v; 4])
    }

    pub fn channels(&self) -> &[f64; 4] {
        &self.0
    }
}

/// A single value fills channel 0, the rest stay zero
impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self([v, 0.0, 0.0, 0.0])
    }
}

impl std::ops::Index<usize> for Scalar {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_from_single_value() {
        let s = Scalar::from(5.0);
        assert_eq!(s.channels(), &[5.0, 0.0, 0.0, 0.0]);
        assert_eq!(Scalar::all(1.0)[3], 1.0);
    }

    #[test]
    fn test_rect_area_does_not_overflow() {
        let r = Rect::new(0, 0, i32::MAX, 2);
        assert_eq!(r.area(), i64::from(i32::MAX) * 2);
        assert_eq!(r.size(), Size::new(i32::MAX, 2));
    }
}
