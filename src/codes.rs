//! GIFTI format enumerations: datatype codes, intent codes, payload
//! encodings, byte order, and array indexing order.
//!
//! Datatype and intent codes are the NIfTI-1 numeric codes; attribute
//! spellings (`NIFTI_TYPE_FLOAT32`, `NIFTI_INTENT_POINTSET`, ...) are the
//! ones carried in the document text representation.

use crate::error::{Error, Result};

/// GIFTI scalar datatype codes.
///
/// Byte order is deliberately orthogonal to the datatype code: a
/// byte-swapped buffer of some type resolves to the same `DataType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DataType {
    /// Unsigned 8-bit integer
    UInt8 = 2,
    /// Signed 16-bit integer
    Int16 = 4,
    /// Signed 32-bit integer
    Int32 = 8,
    /// 32-bit floating point
    Float32 = 16,
    /// 64-bit floating point
    Float64 = 64,
    /// Signed 8-bit integer
    Int8 = 256,
    /// Unsigned 16-bit integer
    UInt16 = 512,
    /// Unsigned 32-bit integer
    UInt32 = 768,
    /// Signed 64-bit integer
    Int64 = 1024,
    /// Unsigned 64-bit integer
    UInt64 = 1280,
}

/// All supported datatypes, in code order.
pub const ALL_DATATYPES: [DataType; 10] = [
    DataType::UInt8,
    DataType::Int16,
    DataType::Int32,
    DataType::Float32,
    DataType::Float64,
    DataType::Int8,
    DataType::UInt16,
    DataType::UInt32,
    DataType::Int64,
    DataType::UInt64,
];

impl DataType {
    /// Parse from a NIfTI datatype code.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            2 => Ok(Self::UInt8),
            4 => Ok(Self::Int16),
            8 => Ok(Self::Int32),
            16 => Ok(Self::Float32),
            64 => Ok(Self::Float64),
            256 => Ok(Self::Int8),
            512 => Ok(Self::UInt16),
            768 => Ok(Self::UInt32),
            1024 => Ok(Self::Int64),
            1280 => Ok(Self::UInt64),
            _ => Err(Error::UnsupportedDatatype(format!("code {code}"))),
        }
    }

    /// Parse from the GIFTI attribute spelling, e.g. `NIFTI_TYPE_FLOAT32`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "NIFTI_TYPE_UINT8" => Ok(Self::UInt8),
            "NIFTI_TYPE_INT16" => Ok(Self::Int16),
            "NIFTI_TYPE_INT32" => Ok(Self::Int32),
            "NIFTI_TYPE_FLOAT32" => Ok(Self::Float32),
            "NIFTI_TYPE_FLOAT64" => Ok(Self::Float64),
            "NIFTI_TYPE_INT8" => Ok(Self::Int8),
            "NIFTI_TYPE_UINT16" => Ok(Self::UInt16),
            "NIFTI_TYPE_UINT32" => Ok(Self::UInt32),
            "NIFTI_TYPE_INT64" => Ok(Self::Int64),
            "NIFTI_TYPE_UINT64" => Ok(Self::UInt64),
            _ => Err(Error::UnsupportedDatatype(name.to_string())),
        }
    }

    /// NIfTI numeric code.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// GIFTI attribute spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::UInt8 => "NIFTI_TYPE_UINT8",
            Self::Int16 => "NIFTI_TYPE_INT16",
            Self::Int32 => "NIFTI_TYPE_INT32",
            Self::Float32 => "NIFTI_TYPE_FLOAT32",
            Self::Float64 => "NIFTI_TYPE_FLOAT64",
            Self::Int8 => "NIFTI_TYPE_INT8",
            Self::UInt16 => "NIFTI_TYPE_UINT16",
            Self::UInt32 => "NIFTI_TYPE_UINT32",
            Self::Int64 => "NIFTI_TYPE_INT64",
            Self::UInt64 => "NIFTI_TYPE_UINT64",
        }
    }

    /// Size of each element in bytes.
    pub const fn byte_size(self) -> usize {
        match self {
            Self::UInt8 | Self::Int8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// NIfTI intent codes carried on a data array.
///
/// The intent drives downstream interpretation (geometry, topology, label,
/// statistic); this layer never validates it against the payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum Intent {
    /// No intent declared.
    #[default]
    None = 0,
    /// Correlation coefficient statistic.
    Correlation = 2,
    /// Student's t statistic.
    TTest = 3,
    /// Fisher F statistic.
    FTest = 4,
    /// Standard normal z score.
    ZScore = 5,
    /// Chi-squared statistic.
    ChiSquared = 6,
    /// Beta-distributed value.
    Beta = 7,
    /// P-value.
    PValue = 22,
    /// ln(p-value).
    LogPValue = 23,
    /// log10(p-value).
    Log10PValue = 24,
    /// Parameter estimate.
    Estimate = 1001,
    /// Categorical label index into the label table.
    Label = 1002,
    /// Generic matrix.
    GenericMatrix = 1004,
    /// Per-node vector.
    Vector = 1007,
    /// Surface vertex coordinates.
    Pointset = 1008,
    /// Surface triangle topology.
    Triangle = 1009,
    /// Per-node time series.
    TimeSeries = 2001,
    /// Node index list (sparse array support).
    NodeIndex = 2002,
    /// RGB color per node.
    RgbVector = 2003,
    /// RGBA color per node.
    RgbaVector = 2004,
    /// Shape measurement (e.g. curvature).
    Shape = 2005,
}

impl Intent {
    /// Parse from the GIFTI attribute spelling, e.g. `NIFTI_INTENT_POINTSET`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "NIFTI_INTENT_NONE" => Ok(Self::None),
            "NIFTI_INTENT_CORREL" => Ok(Self::Correlation),
            "NIFTI_INTENT_TTEST" => Ok(Self::TTest),
            "NIFTI_INTENT_FTEST" => Ok(Self::FTest),
            "NIFTI_INTENT_ZSCORE" => Ok(Self::ZScore),
            "NIFTI_INTENT_CHISQ" => Ok(Self::ChiSquared),
            "NIFTI_INTENT_BETA" => Ok(Self::Beta),
            "NIFTI_INTENT_PVAL" => Ok(Self::PValue),
            "NIFTI_INTENT_LOGPVAL" => Ok(Self::LogPValue),
            "NIFTI_INTENT_LOG10PVAL" => Ok(Self::Log10PValue),
            "NIFTI_INTENT_ESTIMATE" => Ok(Self::Estimate),
            "NIFTI_INTENT_LABEL" => Ok(Self::Label),
            "NIFTI_INTENT_GENMATRIX" => Ok(Self::GenericMatrix),
            "NIFTI_INTENT_VECTOR" => Ok(Self::Vector),
            "NIFTI_INTENT_POINTSET" => Ok(Self::Pointset),
            "NIFTI_INTENT_TRIANGLE" => Ok(Self::Triangle),
            "NIFTI_INTENT_TIME_SERIES" => Ok(Self::TimeSeries),
            "NIFTI_INTENT_NODE_INDEX" => Ok(Self::NodeIndex),
            "NIFTI_INTENT_RGB_VECTOR" => Ok(Self::RgbVector),
            "NIFTI_INTENT_RGBA_VECTOR" => Ok(Self::RgbaVector),
            "NIFTI_INTENT_SHAPE" => Ok(Self::Shape),
            _ => Err(Error::InvalidArgument(format!("unknown intent: '{name}'"))),
        }
    }

    /// NIfTI numeric code.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// GIFTI attribute spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NIFTI_INTENT_NONE",
            Self::Correlation => "NIFTI_INTENT_CORREL",
            Self::TTest => "NIFTI_INTENT_TTEST",
            Self::FTest => "NIFTI_INTENT_FTEST",
            Self::ZScore => "NIFTI_INTENT_ZSCORE",
            Self::ChiSquared => "NIFTI_INTENT_CHISQ",
            Self::Beta => "NIFTI_INTENT_BETA",
            Self::PValue => "NIFTI_INTENT_PVAL",
            Self::LogPValue => "NIFTI_INTENT_LOGPVAL",
            Self::Log10PValue => "NIFTI_INTENT_LOG10PVAL",
            Self::Estimate => "NIFTI_INTENT_ESTIMATE",
            Self::Label => "NIFTI_INTENT_LABEL",
            Self::GenericMatrix => "NIFTI_INTENT_GENMATRIX",
            Self::Vector => "NIFTI_INTENT_VECTOR",
            Self::Pointset => "NIFTI_INTENT_POINTSET",
            Self::Triangle => "NIFTI_INTENT_TRIANGLE",
            Self::TimeSeries => "NIFTI_INTENT_TIME_SERIES",
            Self::NodeIndex => "NIFTI_INTENT_NODE_INDEX",
            Self::RgbVector => "NIFTI_INTENT_RGB_VECTOR",
            Self::RgbaVector => "NIFTI_INTENT_RGBA_VECTOR",
            Self::Shape => "NIFTI_INTENT_SHAPE",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// On-the-wire representation of a data array payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Whitespace-delimited decimal text, row-major.
    Ascii,
    /// Standard base64 over the raw bytes.
    Base64Binary,
    /// zlib-deflated bytes wrapped in base64.
    #[default]
    GzipBase64Binary,
    /// Payload lives in a sibling file (name + byte offset).
    ExternalFileBinary,
}

impl Encoding {
    /// Parse from the GIFTI attribute spelling.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "ASCII" => Ok(Self::Ascii),
            "Base64Binary" => Ok(Self::Base64Binary),
            "GZipBase64Binary" => Ok(Self::GzipBase64Binary),
            "ExternalFileBinary" => Ok(Self::ExternalFileBinary),
            _ => Err(Error::InvalidArgument(format!("unknown encoding: '{name}'"))),
        }
    }

    /// GIFTI attribute spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ASCII",
            Self::Base64Binary => "Base64Binary",
            Self::GzipBase64Binary => "GZipBase64Binary",
            Self::ExternalFileBinary => "ExternalFileBinary",
        }
    }
}

/// Byte order used to interpret multi-byte scalars in a payload,
/// independent of host architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl Endian {
    /// The host byte order.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    /// Parse from the GIFTI attribute spelling.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "LittleEndian" => Ok(Self::Little),
            "BigEndian" => Ok(Self::Big),
            _ => Err(Error::InvalidArgument(format!("unknown endian: '{name}'"))),
        }
    }

    /// GIFTI attribute spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Little => "LittleEndian",
            Self::Big => "BigEndian",
        }
    }

    /// The opposite byte order.
    pub const fn swapped(self) -> Self {
        match self {
            Self::Little => Self::Big,
            Self::Big => Self::Little,
        }
    }
}

/// Storage order of a multi-dimensional payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexOrder {
    /// C-contiguous, last index fastest.
    #[default]
    RowMajor,
    /// Fortran-contiguous, first index fastest.
    ColumnMajor,
}

impl IndexOrder {
    /// Parse from the GIFTI `ArrayIndexingOrder` attribute spelling.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "RowMajorOrder" => Ok(Self::RowMajor),
            "ColumnMajorOrder" => Ok(Self::ColumnMajor),
            _ => Err(Error::InvalidArgument(format!(
                "unknown indexing order: '{name}'"
            ))),
        }
    }

    /// GIFTI attribute spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RowMajor => "RowMajorOrder",
            Self::ColumnMajor => "ColumnMajorOrder",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_code_roundtrip() {
        for dt in ALL_DATATYPES {
            assert_eq!(DataType::from_code(dt.code()).unwrap(), dt);
            assert_eq!(DataType::from_name(dt.name()).unwrap(), dt);
        }
    }

    #[test]
    fn test_datatype_unknown_code() {
        assert!(matches!(
            DataType::from_code(9999),
            Err(Error::UnsupportedDatatype(_))
        ));
        assert!(matches!(
            DataType::from_name("NIFTI_TYPE_COMPLEX64"),
            Err(Error::UnsupportedDatatype(_))
        ));
    }

    #[test]
    fn test_datatype_byte_sizes() {
        assert_eq!(DataType::UInt8.byte_size(), 1);
        assert_eq!(DataType::Int16.byte_size(), 2);
        assert_eq!(DataType::Float32.byte_size(), 4);
        assert_eq!(DataType::UInt64.byte_size(), 8);
    }

    #[test]
    fn test_intent_name_roundtrip() {
        for intent in [
            Intent::None,
            Intent::Pointset,
            Intent::Triangle,
            Intent::Label,
            Intent::ZScore,
            Intent::Shape,
        ] {
            assert_eq!(Intent::from_name(intent.name()).unwrap(), intent);
        }
    }

    #[test]
    fn test_intent_codes() {
        assert_eq!(Intent::Pointset.code(), 1008);
        assert_eq!(Intent::Triangle.code(), 1009);
        assert_eq!(Intent::Label.code(), 1002);
        assert_eq!(Intent::None.code(), 0);
    }

    #[test]
    fn test_intent_unknown_name() {
        assert!(matches!(
            Intent::from_name("NIFTI_INTENT_SPAGHETTI"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_encoding_name_roundtrip() {
        for enc in [
            Encoding::Ascii,
            Encoding::Base64Binary,
            Encoding::GzipBase64Binary,
            Encoding::ExternalFileBinary,
        ] {
            assert_eq!(Encoding::from_name(enc.name()).unwrap(), enc);
        }
    }

    #[test]
    fn test_endian_swapped() {
        assert_eq!(Endian::Little.swapped(), Endian::Big);
        assert_eq!(Endian::Big.swapped(), Endian::Little);
        assert_eq!(Endian::native().swapped().swapped(), Endian::native());
    }

    #[test]
    fn test_index_order_names() {
        assert_eq!(
            IndexOrder::from_name("RowMajorOrder").unwrap(),
            IndexOrder::RowMajor
        );
        assert_eq!(IndexOrder::ColumnMajor.name(), "ColumnMajorOrder");
        assert!(IndexOrder::from_name("DiagonalOrder").is_err());
    }
}
