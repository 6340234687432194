//! Dense array (`Mat`) and its element type tag
//!
//! The type tag uses the native library's packing:
//!
//! ```text
//! type = depth + ((channels - 1) << 3)
//!
//! depth: 0=8U 1=8S 2=16U 3=16S 4=32S 5=32F 6=64F 7=16F
//! channels: 1..=512
//! ```
//!
//! Storage is always continuous and row-major, so `step == cols * elem_size`.

use crate::error::{Error, Result};

/// Maximum channel count of a single element
pub const CN_MAX: i32 = 512;
/// Bit offset of the channel count inside a type tag
pub const CN_SHIFT: i32 = 3;
const DEPTH_MASK: i32 = (1 << CN_SHIFT) - 1;
const TYPE_MASK: i32 = CN_MAX * (1 << CN_SHIFT) - 1;

/// Element depth (per-channel numeric type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Depth {
    U8 = 0,
    S8 = 1,
    U16 = 2,
    S16 = 3,
    S32 = 4,
    F32 = 5,
    F64 = 6,
    F16 = 7,
}

impl Depth {
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Depth::U8,
            1 => Depth::S8,
            2 => Depth::U16,
            3 => Depth::S16,
            4 => Depth::S32,
            5 => Depth::F32,
            6 => Depth::F64,
            7 => Depth::F16,
            _ => return None,
        })
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Bytes per channel
    pub fn size(self) -> usize {
        match self {
            Depth::U8 | Depth::S8 => 1,
            Depth::U16 | Depth::S16 | Depth::F16 => 2,
            Depth::S32 | Depth::F32 => 4,
            Depth::F64 => 8,
        }
    }
}

/// Packed depth + channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatType(i32);

const fn make_type(depth: Depth, channels: i32) -> MatType {
    MatType(depth as i32 + ((channels - 1) << CN_SHIFT))
}

pub const CV_8UC1: MatType = make_type(Depth::U8, 1);
pub const CV_8UC2: MatType = make_type(Depth::U8, 2);
pub const CV_8UC3: MatType = make_type(Depth::U8, 3);
pub const CV_8UC4: MatType = make_type(Depth::U8, 4);
pub const CV_16UC1: MatType = make_type(Depth::U16, 1);
pub const CV_16SC1: MatType = make_type(Depth::S16, 1);
pub const CV_32SC1: MatType = make_type(Depth::S32, 1);
pub const CV_32FC1: MatType = make_type(Depth::F32, 1);
pub const CV_32FC2: MatType = make_type(Depth::F32, 2);
pub const CV_32FC3: MatType = make_type(Depth::F32, 3);
pub const CV_64FC1: MatType = make_type(Depth::F64, 1);
pub const CV_64FC3: MatType = make_type(Depth::F64, 3);

impl MatType {
    pub fn new(depth: Depth, channels: i32) -> Result<Self> {
        if !(1..=CN_MAX).contains(&channels) {
            return Err(Error::InvalidArgument(format!(
                "channel count {} outside 1..={}",
                channels, CN_MAX
            )));
        }
        Ok(make_type(depth, channels))
    }

    /// Validate a raw type tag
    pub fn from_code(code: i32) -> Result<Self> {
        if !(0..=TYPE_MASK).contains(&code) {
            return Err(Error::InvalidArgument(format!("unknown Mat type {}", code)));
        }
        Ok(MatType(code))
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn depth(self) -> Depth {
        // DEPTH_MASK keeps the value in 0..=7, every code of which is a Depth
        Depth::from_code(self.0 & DEPTH_MASK).unwrap_or(Depth::U8)
    }

    pub fn channels(self) -> i32 {
        (self.0 >> CN_SHIFT) + 1
    }

    /// Bytes per channel
    pub fn elem_size1(self) -> usize {
        self.depth().size()
    }

    /// Bytes per element (all channels)
    pub fn elem_size(self) -> usize {
        self.elem_size1() * self.channels() as usize
    }
}

impl Default for MatType {
    fn default() -> Self {
        CV_8UC1
    }
}

/// Dense row-major array with an owned, continuous byte buffer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mat {
    rows: i32,
    cols: i32,
    typ: MatType,
    data: Vec<u8>,
}

fn byte_len(rows: i32, cols: i32, typ: MatType) -> Result<usize> {
    if rows < 0 || cols < 0 {
        return Err(Error::InvalidArgument(format!(
            "negative Mat dimensions {}x{}",
            rows, cols
        )));
    }
    (rows as usize)
        .checked_mul(cols as usize)
        .and_then(|n| n.checked_mul(typ.elem_size()))
        .ok_or_else(|| {
            Error::InvalidArgument(format!("Mat of {}x{} elements is too large", rows, cols))
        })
}

impl Mat {
    /// Allocate a zero-initialised array
    ///
    /// Fails with `InvalidArgument` instead of aborting when the allocator
    /// cannot provide the storage.
    pub fn new(rows: i32, cols: i32, typ: MatType) -> Result<Self> {
        let len = byte_len(rows, cols, typ)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            Error::InvalidArgument(format!(
                "Mat of {}x{} type {} is too large: {}",
                rows,
                cols,
                typ.code(),
                e
            ))
        })?;
        data.resize(len, 0);
        Ok(Self {
            rows,
            cols,
            typ,
            data,
        })
    }

    /// Wrap an existing buffer; its length must match the shape exactly
    pub fn from_bytes(rows: i32, cols: i32, typ: MatType, data: Vec<u8>) -> Result<Self> {
        let len = byte_len(rows, cols, typ)?;
        if data.len() != len {
            return Err(Error::InvalidArgument(format!(
                "buffer of {} bytes does not match a {}x{} Mat of type {} ({} bytes)",
                data.len(),
                rows,
                cols,
                typ.code(),
                len
            )));
        }
        Ok(Self {
            rows,
            cols,
            typ,
            data,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn typ(&self) -> MatType {
        self.typ
    }

    pub fn depth(&self) -> Depth {
        self.typ.depth()
    }

    pub fn channels(&self) -> i32 {
        self.typ.channels()
    }

    pub fn elem_size(&self) -> usize {
        self.typ.elem_size()
    }

    /// Bytes per row
    pub fn step(&self) -> usize {
        self.cols as usize * self.elem_size()
    }

    /// Element count (rows * cols)
    pub fn total(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// 0 for a never-shaped array, 2 otherwise
    pub fn dims(&self) -> i32 {
        if self.rows == 0 && self.cols == 0 {
            0
        } else {
            2
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_packing() {
        assert_eq!(CV_8UC1.code(), 0);
        assert_eq!(CV_8UC3.code(), 16);
        assert_eq!(CV_32FC1.code(), 5);
        assert_eq!(CV_64FC3.code(), 22);

        let t = MatType::from_code(16).unwrap();
        assert_eq!(t.depth(), Depth::U8);
        assert_eq!(t.channels(), 3);
        assert_eq!(t.elem_size(), 3);

        assert_eq!(CV_32FC2.elem_size(), 8);
        assert_eq!(CV_64FC1.elem_size1(), 8);
    }

    #[test]
    fn test_type_rejects_out_of_range() {
        assert!(MatType::from_code(-1).is_err());
        assert!(MatType::from_code(4096).is_err());
        assert!(MatType::from_code(4095).is_ok());
        assert!(MatType::new(Depth::F32, 0).is_err());
        assert_eq!(MatType::new(Depth::F32, 512).unwrap().channels(), 512);
    }

    #[test]
    fn test_new_is_zeroed_and_sized() {
        let mat = Mat::new(4, 3, CV_8UC3).unwrap();
        assert_eq!(mat.data().len(), 36);
        assert!(mat.data().iter().all(|&b| b == 0));
        assert_eq!(mat.step(), 9);
        assert_eq!(mat.total(), 12);
        assert_eq!(mat.dims(), 2);
        assert!(!mat.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        let mat = Mat::default();
        assert!(mat.is_empty());
        assert_eq!(mat.dims(), 0);
        assert_eq!(mat.typ(), CV_8UC1);
        assert!(mat.data().is_empty());
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        assert!(matches!(
            Mat::new(-1, 3, CV_8UC1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unallocatable_shape_rejected() {
        let err = Mat::new(i32::MAX, i32::MAX, CV_8UC1).unwrap_err();
        match err {
            Error::InvalidArgument(msg) => {
                assert!(msg.starts_with("Mat of 2147483647x2147483647 type 0 is too large"), "{}", msg)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_bytes_length_check() {
        assert!(Mat::from_bytes(2, 2, CV_8UC1, vec![1, 2, 3, 4]).is_ok());
        assert!(Mat::from_bytes(2, 2, CV_8UC1, vec![1, 2, 3]).is_err());
    }
}
