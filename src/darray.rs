//! The GIFTI data array: a typed, shaped payload plus its format metadata.

use crate::buffer::{element_count, Element, TypedBuffer};
use crate::codec::{self, ExternalRef};
use crate::codes::{DataType, Encoding, Endian, IndexOrder, Intent};
use crate::deprecate;
use crate::error::{Error, Result};
use crate::meta::MetadataMap;
use ndarray::ArrayD;

/// A named coordinate transform attached to a data array.
///
/// The affine is stored verbatim; this layer never computes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordSystem {
    /// Source space identifier (`DataSpace`).
    pub data_space: String,
    /// Target space identifier (`TransformedSpace`).
    pub xform_space: String,
    /// Row-major 4x4 affine (`MatrixData`).
    pub xform: [[f64; 4]; 4],
}

impl CoordSystem {
    /// Build from the tokenized `CoordinateSystemTransformMatrix` block:
    /// two space names plus the 16 whitespace-delimited matrix floats.
    pub fn from_parts(data_space: &str, xform_space: &str, matrix_text: &str) -> Result<Self> {
        let values: Vec<f64> = matrix_text
            .split_whitespace()
            .map(|tok| {
                tok.parse()
                    .map_err(|_| Error::InvalidArgument(format!("bad matrix value: '{tok}'")))
            })
            .collect::<Result<_>>()?;
        if values.len() != 16 {
            return Err(Error::InvalidArgument(format!(
                "transform matrix needs 16 values, got {}",
                values.len()
            )));
        }
        let mut xform = [[0.0f64; 4]; 4];
        for (i, v) in values.into_iter().enumerate() {
            xform[i / 4][i % 4] = v;
        }
        Ok(Self {
            data_space: data_space.to_string(),
            xform_space: xform_space.to_string(),
            xform,
        })
    }

    /// The 16 matrix values as serializer text, row-major.
    pub fn matrix_text(&self) -> String {
        let mut tokens = Vec::with_capacity(16);
        for row in &self.xform {
            for v in row {
                tokens.push(v.to_string());
            }
        }
        tokens.join(" ")
    }
}

/// Payload state: raw encoded text as parsed, or a decoded typed buffer.
///
/// The pending variant remembers the encoding its text arrived in, so a
/// later `set_encoding` changes only the output choice.
#[derive(Debug, Clone, PartialEq)]
enum Payload {
    /// Nothing attached yet.
    Empty,
    /// Undecoded payload text in the recorded encoding.
    Pending { text: String, encoding: Encoding },
    /// Materialized typed buffer.
    Decoded(TypedBuffer),
}

/// A single typed, shaped array plus its GIFTI metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    /// Semantic tag; never validated against the payload shape here.
    pub intent: Intent,
    /// Scalar datatype.
    pub datatype: DataType,
    /// Array shape, outermost dimension first.
    pub dims: Vec<usize>,
    /// Payload encoding for serialization.
    pub encoding: Encoding,
    /// Declared payload byte order, independent of host order.
    pub endian: Endian,
    /// Storage order of the payload.
    pub index_order: IndexOrder,
    /// Coordinate transforms, stored verbatim.
    pub coord_systems: Vec<CoordSystem>,
    /// Array-scope metadata.
    pub meta: MetadataMap,
    /// External payload location: file name and byte offset.
    pub ext_file: Option<(String, u64)>,
    payload: Payload,
}

impl DataArray {
    /// An empty array with the given intent and fresh, independent metadata.
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            datatype: DataType::Float32,
            dims: Vec::new(),
            encoding: Encoding::default(),
            endian: Endian::native(),
            index_order: IndexOrder::default(),
            coord_systems: Vec::new(),
            meta: MetadataMap::new(),
            ext_file: None,
            payload: Payload::Empty,
        }
    }

    /// Build from a typed buffer, inferring datatype, dims, and endian.
    ///
    /// The buffer's declared byte order is preserved as-is: a byte-swapped
    /// buffer is not normalized to host order, and its datatype code still
    /// resolves identically. Data is materialized immediately; the default
    /// encoding is `GZipBase64Binary`.
    pub fn from_array(buffer: TypedBuffer, intent: Intent) -> Self {
        let mut da = Self::new(intent);
        da.datatype = buffer.datatype();
        da.dims = buffer.dims().to_vec();
        da.endian = buffer.endian();
        da.payload = Payload::Decoded(buffer);
        da
    }

    /// Convenience over [`from_array`](Self::from_array) for native
    /// `ndarray` data.
    pub fn from_ndarray<T: Element>(arr: &ArrayD<T>, intent: Intent) -> Self {
        Self::from_array(TypedBuffer::from_ndarray(arr), intent)
    }

    /// Builder-style encoding override.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Builder-style metadata attachment.
    pub fn with_meta(mut self, meta: MetadataMap) -> Self {
        self.meta = meta;
        self
    }

    /// Number of dimensions.
    pub fn num_dim(&self) -> usize {
        self.dims.len()
    }

    /// Expected decoded payload length in bytes for the declared shape.
    pub fn expected_byte_len(&self) -> Result<usize> {
        Ok(element_count(&self.dims)? * self.datatype.byte_size())
    }

    /// The decoded buffer, if already materialized.
    pub fn data(&self) -> Option<&TypedBuffer> {
        match &self.payload {
            Payload::Decoded(buf) => Some(buf),
            _ => None,
        }
    }

    /// True when a payload is attached but not yet decoded.
    pub fn is_pending(&self) -> bool {
        matches!(self.payload, Payload::Pending { .. })
    }

    /// Replace the payload with an already-decoded buffer, adopting its
    /// datatype, shape, and byte order.
    pub fn set_data(&mut self, buffer: TypedBuffer) {
        self.datatype = buffer.datatype();
        self.dims = buffer.dims().to_vec();
        self.endian = buffer.endian();
        self.payload = Payload::Decoded(buffer);
    }

    /// Decode a pending payload in place. Idempotent: an already-decoded
    /// array returns its buffer unchanged.
    ///
    /// `ExternalFileBinary` payloads cannot be decoded inline; use
    /// [`external_ref`](Self::external_ref) and
    /// [`load_external`](Self::load_external).
    pub fn decode_data(&mut self) -> Result<&TypedBuffer> {
        if let Payload::Pending { text, encoding } = &self.payload {
            if *encoding == Encoding::ExternalFileBinary {
                return Err(Error::InvalidArgument(
                    "external payload: read the bytes via external_ref/load_external".into(),
                ));
            }
            let bytes =
                codec::decode_payload(text, self.datatype, &self.dims, self.endian, *encoding)?;
            let buf = TypedBuffer::new(bytes, self.datatype, self.dims.clone(), self.endian)?;
            self.payload = Payload::Decoded(buf);
        }
        match &self.payload {
            Payload::Decoded(buf) => Ok(buf),
            Payload::Empty => Err(Error::InvalidArgument("data array has no payload".into())),
            Payload::Pending { .. } => unreachable!("pending payload decoded above"),
        }
    }

    /// Encode the payload with the array's current encoding choice.
    ///
    /// A pending payload is first decoded (without mutating `self`), so
    /// changing `encoding` after parse re-encodes correctly.
    pub fn encode_data(&self) -> Result<String> {
        let decoded;
        let buf = match &self.payload {
            Payload::Decoded(buf) => buf,
            Payload::Pending { text, encoding } => {
                if *encoding == Encoding::ExternalFileBinary {
                    return Err(Error::InvalidArgument(
                        "external payload: read the bytes via external_ref/load_external".into(),
                    ));
                }
                let bytes = codec::decode_payload(
                    text,
                    self.datatype,
                    &self.dims,
                    self.endian,
                    *encoding,
                )?;
                decoded = TypedBuffer::new(bytes, self.datatype, self.dims.clone(), self.endian)?;
                &decoded
            }
            Payload::Empty => {
                return Err(Error::InvalidArgument("data array has no payload".into()))
            }
        };
        codec::encode_payload(buf.bytes(), self.datatype, buf.endian(), self.encoding)
    }

    /// The external-file contract for an `ExternalFileBinary` array.
    pub fn external_ref(&self) -> Result<ExternalRef> {
        if self.encoding != Encoding::ExternalFileBinary {
            return Err(Error::InvalidArgument(
                "array payload is inline, not external".into(),
            ));
        }
        let (path, offset) = self.ext_file.clone().ok_or_else(|| {
            Error::InvalidArgument("ExternalFileBinary array has no external file name".into())
        })?;
        Ok(ExternalRef {
            path,
            offset,
            length: self.expected_byte_len()?,
        })
    }

    /// Attach bytes read by the file-I/O collaborator for an external
    /// payload, validating the length invariant.
    pub fn load_external(&mut self, bytes: Vec<u8>) -> Result<&TypedBuffer> {
        let buf = TypedBuffer::new(bytes, self.datatype, self.dims.clone(), self.endian)?;
        self.payload = Payload::Decoded(buf);
        self.decode_data()
    }

    /// Parse entry point for the XML collaborator: build an array from the
    /// tokenized attribute set plus the raw payload text.
    pub fn from_attributes(attrs: &[(String, String)], data_text: &str) -> Result<Self> {
        let intent = Intent::from_name(required(attrs, "Intent")?)?;
        let datatype = DataType::from_name(required(attrs, "DataType")?)?;
        let encoding = Encoding::from_name(required(attrs, "Encoding")?)?;

        let index_order = match attr(attrs, "ArrayIndexingOrder") {
            Some(name) => IndexOrder::from_name(name)?,
            None => IndexOrder::default(),
        };
        let endian = match attr(attrs, "Endian") {
            Some(name) => Endian::from_name(name)?,
            None => {
                log::debug!("DataArray without Endian attribute, assuming LittleEndian");
                Endian::Little
            }
        };

        let ndim_text = required(attrs, "Dimensionality")?;
        let ndim: usize = ndim_text
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("bad Dimensionality: '{ndim_text}'")))?;
        let mut dims = Vec::with_capacity(ndim);
        for i in 0..ndim {
            let dim_text = required(attrs, &format!("Dim{i}"))?;
            let dim: usize = dim_text
                .parse()
                .map_err(|_| Error::InvalidArgument(format!("bad Dim{i}: '{dim_text}'")))?;
            if dim == 0 {
                return Err(Error::InvalidArgument(format!("Dim{i} must be positive")));
            }
            dims.push(dim);
        }

        let ext_file = match attr(attrs, "ExternalFileName") {
            Some(name) if !name.is_empty() => {
                let offset = match attr(attrs, "ExternalFileOffset") {
                    Some(text) if !text.is_empty() => text.parse().map_err(|_| {
                        Error::InvalidArgument(format!("bad ExternalFileOffset: '{text}'"))
                    })?,
                    _ => 0,
                };
                Some((name.to_string(), offset))
            }
            _ => None,
        };

        let mut da = Self::new(intent);
        da.datatype = datatype;
        da.dims = dims;
        da.encoding = encoding;
        da.endian = endian;
        da.index_order = index_order;
        da.ext_file = ext_file;
        da.payload = Payload::Pending {
            text: data_text.to_string(),
            encoding,
        };
        Ok(da)
    }

    /// Serializer entry point: the ordered attribute fragments for the
    /// `DataArray` element. The payload fragment comes from
    /// [`encode_data`](Self::encode_data).
    pub fn to_attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![
            ("Intent".to_string(), self.intent.name().to_string()),
            ("DataType".to_string(), self.datatype.name().to_string()),
            (
                "ArrayIndexingOrder".to_string(),
                self.index_order.name().to_string(),
            ),
            ("Dimensionality".to_string(), self.dims.len().to_string()),
        ];
        for (i, dim) in self.dims.iter().enumerate() {
            attrs.push((format!("Dim{i}"), dim.to_string()));
        }
        attrs.push(("Encoding".to_string(), self.encoding.name().to_string()));
        attrs.push(("Endian".to_string(), self.endian.name().to_string()));
        if let Some((name, offset)) = &self.ext_file {
            attrs.push(("ExternalFileName".to_string(), name.clone()));
            attrs.push(("ExternalFileOffset".to_string(), offset.to_string()));
        }
        attrs
    }

    /// Deprecated alias for reading [`meta`](Self::meta).
    ///
    /// Identical return value; emits one deprecation signal per call. A
    /// freshly constructed array yields an empty map.
    #[deprecated(since = "0.1.0", note = "use the `meta` field instead")]
    pub fn get_metadata(&self) -> &MetadataMap {
        deprecate::warn("DataArray::get_metadata", "DataArray::meta");
        &self.meta
    }
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn required<'a>(attrs: &'a [(String, String)], name: &str) -> Result<&'a str> {
    attr(attrs, name).ok_or_else(|| Error::InvalidArgument(format!("missing attribute: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ALL_DATATYPES;
    use ndarray::{ArrayD, IxDyn};

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn zeros_buffer(datatype: DataType, dims: &[usize], endian: Endian) -> TypedBuffer {
        let len: usize = dims.iter().product::<usize>() * datatype.byte_size();
        TypedBuffer::new(vec![0u8; len], datatype, dims.to_vec(), endian).unwrap()
    }

    #[test]
    fn test_from_array_every_datatype_native_and_swapped() {
        for datatype in ALL_DATATYPES {
            let native = zeros_buffer(datatype, &[10, 3], Endian::native());
            let da = DataArray::from_array(native, Intent::Triangle);
            assert_eq!(da.datatype, datatype);
            assert_eq!(da.dims, vec![10, 3]);
            assert_eq!(da.endian, Endian::native());

            // Byte-swapped input keeps its declared order and the same code.
            let swapped = zeros_buffer(datatype, &[10, 3], Endian::native()).byte_swapped();
            let da = DataArray::from_array(swapped, Intent::Triangle);
            assert_eq!(da.datatype, datatype);
            assert_eq!(da.endian, Endian::native().swapped());
        }
    }

    #[test]
    fn test_decode_is_idempotent() {
        let arr = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1i16, 2, 3, 4]).unwrap();
        let text = {
            let da = DataArray::from_ndarray(&arr, Intent::Shape).with_encoding(Encoding::Ascii);
            da.encode_data().unwrap()
        };

        let mut parsed = DataArray::from_attributes(
            &attrs(&[
                ("Intent", "NIFTI_INTENT_SHAPE"),
                ("DataType", "NIFTI_TYPE_INT16"),
                ("Dimensionality", "2"),
                ("Dim0", "2"),
                ("Dim1", "2"),
                ("Encoding", "ASCII"),
                ("Endian", "LittleEndian"),
            ]),
            &text,
        )
        .unwrap();

        assert!(parsed.is_pending());
        let first = parsed.decode_data().unwrap().clone();
        let second = parsed.decode_data().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(first.to_ndarray::<i16>().unwrap(), arr);
    }

    #[test]
    fn test_reencode_after_changing_encoding() {
        let arr = ArrayD::from_shape_vec(IxDyn(&[3]), vec![1.5f32, -2.0, 8.25]).unwrap();
        let ascii = DataArray::from_ndarray(&arr, Intent::Shape).with_encoding(Encoding::Ascii);
        let text = ascii.encode_data().unwrap();

        let mut parsed = DataArray::from_attributes(
            &attrs(&[
                ("Intent", "NIFTI_INTENT_SHAPE"),
                ("DataType", "NIFTI_TYPE_FLOAT32"),
                ("Dimensionality", "1"),
                ("Dim0", "3"),
                ("Encoding", "ASCII"),
                ("Endian", "LittleEndian"),
            ]),
            &text,
        )
        .unwrap();

        // Switch the output encoding before decoding; encode_data must
        // honor the pending text's original encoding on the way in.
        parsed.encoding = Encoding::Base64Binary;
        let b64 = parsed.encode_data().unwrap();
        let bytes = codec::decode_payload(
            &b64,
            DataType::Float32,
            &[3],
            Endian::Little,
            Encoding::Base64Binary,
        )
        .unwrap();
        let buf = TypedBuffer::new(bytes, DataType::Float32, vec![3], Endian::Little).unwrap();
        assert_eq!(buf.to_ndarray::<f32>().unwrap(), arr);
        // And the lazy array itself still decodes.
        assert_eq!(parsed.decode_data().unwrap().to_ndarray::<f32>().unwrap(), arr);
    }

    #[test]
    fn test_length_mismatch_is_an_error_not_truncation() {
        let mut parsed = DataArray::from_attributes(
            &attrs(&[
                ("Intent", "NIFTI_INTENT_NONE"),
                ("DataType", "NIFTI_TYPE_INT32"),
                ("Dimensionality", "1"),
                ("Dim0", "4"),
                ("Encoding", "ASCII"),
                ("Endian", "LittleEndian"),
            ]),
            "1 2 3",
        )
        .unwrap();
        assert!(matches!(
            parsed.decode_data(),
            Err(Error::ArrayLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_from_attributes_defaults_endian_and_index_order() {
        // Endian and ArrayIndexingOrder are the two lenient attributes;
        // absence falls back to LittleEndian / RowMajorOrder.
        let mut parsed = DataArray::from_attributes(
            &attrs(&[
                ("Intent", "NIFTI_INTENT_NONE"),
                ("DataType", "NIFTI_TYPE_INT32"),
                ("Dimensionality", "1"),
                ("Dim0", "3"),
                ("Encoding", "ASCII"),
            ]),
            "7 8 9",
        )
        .unwrap();
        assert_eq!(parsed.endian, Endian::Little);
        assert_eq!(parsed.index_order, IndexOrder::RowMajor);
        assert_eq!(
            parsed.decode_data().unwrap().to_vec::<i32>().unwrap(),
            vec![7, 8, 9]
        );
    }

    #[test]
    fn test_from_attributes_rejects_bad_values() {
        let missing = attrs(&[("Intent", "NIFTI_INTENT_NONE")]);
        assert!(matches!(
            DataArray::from_attributes(&missing, ""),
            Err(Error::InvalidArgument(_))
        ));

        let zero_dim = attrs(&[
            ("Intent", "NIFTI_INTENT_NONE"),
            ("DataType", "NIFTI_TYPE_FLOAT32"),
            ("Dimensionality", "1"),
            ("Dim0", "0"),
            ("Encoding", "ASCII"),
        ]);
        assert!(matches!(
            DataArray::from_attributes(&zero_dim, ""),
            Err(Error::InvalidArgument(_))
        ));

        let bad_type = attrs(&[
            ("Intent", "NIFTI_INTENT_NONE"),
            ("DataType", "NIFTI_TYPE_RGB24"),
            ("Dimensionality", "1"),
            ("Dim0", "1"),
            ("Encoding", "ASCII"),
        ]);
        assert!(matches!(
            DataArray::from_attributes(&bad_type, ""),
            Err(Error::UnsupportedDatatype(_))
        ));
    }

    #[test]
    fn test_attribute_roundtrip() {
        let arr = ArrayD::from_shape_vec(IxDyn(&[2, 3]), vec![0u32, 1, 2, 3, 4, 5]).unwrap();
        let da = DataArray::from_ndarray(&arr, Intent::Triangle);
        let fragments = da.to_attributes();
        let text = da.encode_data().unwrap();

        let mut parsed = DataArray::from_attributes(&fragments, &text).unwrap();
        assert_eq!(parsed.intent, Intent::Triangle);
        assert_eq!(parsed.dims, vec![2, 3]);
        assert_eq!(
            parsed.decode_data().unwrap().to_ndarray::<u32>().unwrap(),
            arr
        );
        // Serializing again reproduces identical fragments and payload text.
        assert_eq!(parsed.to_attributes(), fragments);
        assert_eq!(parsed.encode_data().unwrap(), text);
    }

    #[test]
    fn test_external_contract() {
        let mut da = DataArray::from_attributes(
            &attrs(&[
                ("Intent", "NIFTI_INTENT_POINTSET"),
                ("DataType", "NIFTI_TYPE_FLOAT32"),
                ("Dimensionality", "2"),
                ("Dim0", "2"),
                ("Dim1", "3"),
                ("Encoding", "ExternalFileBinary"),
                ("Endian", "LittleEndian"),
                ("ExternalFileName", "verts.dat"),
                ("ExternalFileOffset", "16"),
            ]),
            "",
        )
        .unwrap();

        // Inline decode refuses; the contract describes the sidecar read.
        assert!(matches!(
            da.decode_data(),
            Err(Error::InvalidArgument(_))
        ));
        let ext = da.external_ref().unwrap();
        assert_eq!(ext.path, "verts.dat");
        assert_eq!(ext.offset, 16);
        assert_eq!(ext.length, 24);

        // Wrong-length sidecar bytes are rejected, right-length accepted.
        assert!(matches!(
            da.load_external(vec![0u8; 10]),
            Err(Error::ArrayLengthMismatch { .. })
        ));
        let buf = da.load_external(vec![0u8; 24]).unwrap();
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn test_coord_system_verbatim_roundtrip() {
        let text = "1 0 0 10.5 0 1 0 -3 0 0 1 0 0 0 0 1";
        let cs = CoordSystem::from_parts(
            "NIFTI_XFORM_UNKNOWN",
            "NIFTI_XFORM_TALAIRACH",
            text,
        )
        .unwrap();
        assert_eq!(cs.xform[0][3], 10.5);
        assert_eq!(cs.xform[1][3], -3.0);
        assert_eq!(cs.matrix_text(), text);

        assert!(CoordSystem::from_parts("a", "b", "1 2 3").is_err());
    }

    #[test]
    #[allow(deprecated)]
    fn test_fresh_array_metadata_empty_via_alias() {
        let da = DataArray::new(Intent::None);
        assert_eq!(da.get_metadata().len(), 0);
    }
}
