//! Opaque typed-buffer abstraction for decoded payloads.
//!
//! A [`TypedBuffer`] is a contiguous row-major byte buffer tagged with its
//! scalar datatype, shape, and declared byte order. The declared byte order
//! is preserved as-is; it is never silently normalized to the host order, so
//! a byte-swapped buffer still resolves to the same datatype code.

use crate::codes::{DataType, Endian};
use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ndarray::{ArrayD, IxDyn};

/// A scalar type storable in a GIFTI data array.
///
/// Implementations cover exactly the ten types in the GIFTI datatype
/// enumeration and carry the byteorder plumbing and the canonical ASCII
/// token form for each.
pub trait Element: Copy + PartialEq + Send + Sync + 'static {
    /// The GIFTI datatype code for this scalar type.
    const DATATYPE: DataType;

    /// Read one element from the start of `buf` with byte order `E`.
    fn read_from<E: ByteOrder>(buf: &[u8]) -> Self;

    /// Write this element to the start of `buf` with byte order `E`.
    fn write_to<E: ByteOrder>(self, buf: &mut [u8]);

    /// Parse one ASCII token; `None` if unparseable.
    fn parse_token(tok: &str) -> Option<Self>;

    /// Canonical ASCII token (shortest round-trip form for floats).
    fn format_token(self) -> String;
}

macro_rules! impl_element {
    ($t:ty, $dt:expr, $read:ident, $write:ident) => {
        impl Element for $t {
            const DATATYPE: DataType = $dt;

            fn read_from<E: ByteOrder>(buf: &[u8]) -> Self {
                E::$read(buf)
            }

            fn write_to<E: ByteOrder>(self, buf: &mut [u8]) {
                E::$write(buf, self)
            }

            fn parse_token(tok: &str) -> Option<Self> {
                tok.parse().ok()
            }

            fn format_token(self) -> String {
                self.to_string()
            }
        }
    };
}

impl_element!(i16, DataType::Int16, read_i16, write_i16);
impl_element!(i32, DataType::Int32, read_i32, write_i32);
impl_element!(i64, DataType::Int64, read_i64, write_i64);
impl_element!(u16, DataType::UInt16, read_u16, write_u16);
impl_element!(u32, DataType::UInt32, read_u32, write_u32);
impl_element!(u64, DataType::UInt64, read_u64, write_u64);
impl_element!(f32, DataType::Float32, read_f32, write_f32);
impl_element!(f64, DataType::Float64, read_f64, write_f64);

// Single-byte types have no byte order; implemented by hand since the
// `ByteOrder` trait has no u8/i8 accessors.
impl Element for u8 {
    const DATATYPE: DataType = DataType::UInt8;

    fn read_from<E: ByteOrder>(buf: &[u8]) -> Self {
        buf[0]
    }

    fn write_to<E: ByteOrder>(self, buf: &mut [u8]) {
        buf[0] = self;
    }

    fn parse_token(tok: &str) -> Option<Self> {
        tok.parse().ok()
    }

    fn format_token(self) -> String {
        self.to_string()
    }
}

impl Element for i8 {
    const DATATYPE: DataType = DataType::Int8;

    fn read_from<E: ByteOrder>(buf: &[u8]) -> Self {
        buf[0] as i8
    }

    fn write_to<E: ByteOrder>(self, buf: &mut [u8]) {
        buf[0] = self as u8;
    }

    fn parse_token(tok: &str) -> Option<Self> {
        tok.parse().ok()
    }

    fn format_token(self) -> String {
        self.to_string()
    }
}

/// Checked element count for a shape; rejects overflow and empty dims.
pub(crate) fn element_count(dims: &[usize]) -> Result<usize> {
    let mut count: usize = 1;
    for &d in dims {
        count = count
            .checked_mul(d)
            .ok_or_else(|| Error::InvalidArgument("dimension product overflow".into()))?;
    }
    Ok(count)
}

/// A contiguous typed byte buffer with shape, datatype, and byte order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedBuffer {
    bytes: Vec<u8>,
    datatype: DataType,
    dims: Vec<usize>,
    endian: Endian,
}

impl TypedBuffer {
    /// Construct from raw bytes, enforcing the length invariant
    /// `prod(dims) * byte_size == bytes.len()`.
    pub fn new(bytes: Vec<u8>, datatype: DataType, dims: Vec<usize>, endian: Endian) -> Result<Self> {
        let expected = element_count(&dims)? * datatype.byte_size();
        if bytes.len() != expected {
            return Err(Error::ArrayLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes,
            datatype,
            dims,
            endian,
        })
    }

    /// Build a native-endian buffer from an `ndarray` array, row-major.
    pub fn from_ndarray<T: Element>(arr: &ArrayD<T>) -> Self {
        let size = T::DATATYPE.byte_size();
        let mut bytes = Vec::with_capacity(arr.len() * size);
        let mut scratch = [0u8; 8];
        for &v in arr.iter() {
            // Logical (row-major) iteration order, independent of layout.
            match Endian::native() {
                Endian::Little => v.write_to::<LittleEndian>(&mut scratch[..size]),
                Endian::Big => v.write_to::<BigEndian>(&mut scratch[..size]),
            }
            bytes.extend_from_slice(&scratch[..size]);
        }
        Self {
            bytes,
            datatype: T::DATATYPE,
            dims: arr.shape().to_vec(),
            endian: Endian::native(),
        }
    }

    /// Raw payload bytes in the declared byte order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Scalar datatype.
    pub fn datatype(&self) -> DataType {
        self.datatype
    }

    /// Array shape.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Declared byte order of `bytes`.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.datatype.byte_size()
    }

    /// True when the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The same logical values with the opposite declared byte order.
    ///
    /// The datatype code is unchanged; byte order and datatype are
    /// orthogonal axes.
    pub fn byte_swapped(&self) -> Self {
        let size = self.datatype.byte_size();
        let mut bytes = Vec::with_capacity(self.bytes.len());
        for chunk in self.bytes.chunks_exact(size) {
            bytes.extend(chunk.iter().rev());
        }
        Self {
            bytes,
            datatype: self.datatype,
            dims: self.dims.clone(),
            endian: self.endian.swapped(),
        }
    }

    /// Decode the elements into a native `Vec<T>`, converting from the
    /// declared byte order.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DATATYPE != self.datatype {
            return Err(Error::UnsupportedDatatype(format!(
                "buffer holds {}, requested {}",
                self.datatype,
                T::DATATYPE
            )));
        }
        let size = self.datatype.byte_size();
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.bytes.chunks_exact(size) {
            let v = match self.endian {
                Endian::Little => T::read_from::<LittleEndian>(chunk),
                Endian::Big => T::read_from::<BigEndian>(chunk),
            };
            out.push(v);
        }
        Ok(out)
    }

    /// Materialize as an `ndarray` array in the declared shape.
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>> {
        let values = self.to_vec::<T>()?;
        ArrayD::from_shape_vec(IxDyn(&self.dims), values)
            .map_err(|e| Error::InvalidArgument(format!("shape error: {e}")))
    }
}
