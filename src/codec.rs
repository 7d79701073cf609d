//! Payload encode/decode for the four GIFTI encodings.
//!
//! Encode is the exact inverse of decode for the inline encodings:
//! re-encoding a decoded payload with the same encoding reproduces
//! byte-identical text (single-space ASCII tokens, padded unwrapped base64,
//! and a fixed deflate level).

use crate::buffer::{element_count, Element};
use crate::codes::{DataType, Encoding, Endian};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use byteorder::{BigEndian, LittleEndian};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Seek, SeekFrom, Write};

/// Fixed deflate level for `GZipBase64Binary` output.
///
/// Matches the zlib default the reference writer uses, so compressed
/// fixtures are reproducible. Not an observable knob.
const DEFLATE_LEVEL: u32 = 6;

/// Contract for an `ExternalFileBinary` payload: where the bytes live.
///
/// The codec defines the contract only; the actual blocking read is
/// delegated to the caller's file-I/O layer (see [`read_external`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRef {
    /// Sibling file name as recorded in the document.
    pub path: String,
    /// Byte offset of the payload within that file.
    pub offset: u64,
    /// Expected payload length in bytes.
    pub length: usize,
}

/// Decode an encoded payload into raw bytes in the declared byte order.
///
/// The decoded length must satisfy `prod(dims) * byte_size`; a mismatch is
/// an error, never a silent truncation or pad.
pub fn decode_payload(
    text: &str,
    datatype: DataType,
    dims: &[usize],
    endian: Endian,
    encoding: Encoding,
) -> Result<Vec<u8>> {
    let count = element_count(dims)?;
    let expected = count * datatype.byte_size();
    let bytes = match encoding {
        Encoding::Ascii => ascii_decode(text, datatype, count, endian)?,
        Encoding::Base64Binary => BASE64
            .decode(text.trim())
            .map_err(|e| Error::CorruptPayload(format!("base64 decode failed: {e}")))?,
        Encoding::GzipBase64Binary => {
            let compressed = BASE64
                .decode(text.trim())
                .map_err(|e| Error::CorruptPayload(format!("base64 decode failed: {e}")))?;
            let mut out = Vec::with_capacity(expected);
            ZlibDecoder::new(compressed.as_slice())
                .read_to_end(&mut out)
                .map_err(|e| Error::CorruptPayload(format!("zlib inflate failed: {e}")))?;
            out
        }
        Encoding::ExternalFileBinary => {
            return Err(Error::InvalidArgument(
                "ExternalFileBinary payloads are read out-of-line; use the external-file contract"
                    .into(),
            ));
        }
    };
    if bytes.len() != expected {
        return Err(Error::ArrayLengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Encode raw payload bytes (in `endian` order) into the payload text for
/// `encoding`.
///
/// `ExternalFileBinary` emits an empty text node; the bytes live out-of-line.
pub fn encode_payload(
    bytes: &[u8],
    datatype: DataType,
    endian: Endian,
    encoding: Encoding,
) -> Result<String> {
    match encoding {
        Encoding::Ascii => ascii_encode(bytes, datatype, endian),
        Encoding::Base64Binary => Ok(BASE64.encode(bytes)),
        Encoding::GzipBase64Binary => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(DEFLATE_LEVEL));
            encoder
                .write_all(bytes)
                .and_then(|()| encoder.finish())
                .map(|compressed| BASE64.encode(compressed))
                .map_err(Error::Io)
        }
        Encoding::ExternalFileBinary => Ok(String::new()),
    }
}

/// Perform the delegated blocking read for an external payload.
///
/// Seeks to the recorded offset and reads exactly `length` bytes; a short
/// file surfaces as an I/O error from `read_exact`.
pub fn read_external<R: Read + Seek>(reader: &mut R, ext: &ExternalRef) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(ext.offset))?;
    let mut bytes = vec![0u8; ext.length];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

fn write_elem<T: Element>(v: T, endian: Endian, out: &mut Vec<u8>) {
    let size = T::DATATYPE.byte_size();
    let mut scratch = [0u8; 8];
    match endian {
        Endian::Little => v.write_to::<LittleEndian>(&mut scratch[..size]),
        Endian::Big => v.write_to::<BigEndian>(&mut scratch[..size]),
    }
    out.extend_from_slice(&scratch[..size]);
}

fn read_elem<T: Element>(chunk: &[u8], endian: Endian) -> T {
    match endian {
        Endian::Little => T::read_from::<LittleEndian>(chunk),
        Endian::Big => T::read_from::<BigEndian>(chunk),
    }
}

fn ascii_decode_typed<T: Element>(text: &str, count: usize, endian: Endian) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(count * T::DATATYPE.byte_size());
    let mut seen = 0usize;
    for tok in text.split_whitespace() {
        seen += 1;
        if seen > count {
            // Keep counting for the error message but stop writing.
            continue;
        }
        let v = T::parse_token(tok)
            .ok_or_else(|| Error::CorruptPayload(format!("unparseable ASCII token: '{tok}'")))?;
        write_elem(v, endian, &mut out);
    }
    if seen != count {
        return Err(Error::ArrayLengthMismatch {
            expected: count,
            actual: seen,
        });
    }
    Ok(out)
}

fn ascii_encode_typed<T: Element>(bytes: &[u8], endian: Endian) -> String {
    let size = T::DATATYPE.byte_size();
    let mut tokens = Vec::with_capacity(bytes.len() / size);
    for chunk in bytes.chunks_exact(size) {
        tokens.push(read_elem::<T>(chunk, endian).format_token());
    }
    tokens.join(" ")
}

fn ascii_decode(text: &str, datatype: DataType, count: usize, endian: Endian) -> Result<Vec<u8>> {
    match datatype {
        DataType::UInt8 => ascii_decode_typed::<u8>(text, count, endian),
        DataType::Int8 => ascii_decode_typed::<i8>(text, count, endian),
        DataType::Int16 => ascii_decode_typed::<i16>(text, count, endian),
        DataType::UInt16 => ascii_decode_typed::<u16>(text, count, endian),
        DataType::Int32 => ascii_decode_typed::<i32>(text, count, endian),
        DataType::UInt32 => ascii_decode_typed::<u32>(text, count, endian),
        DataType::Int64 => ascii_decode_typed::<i64>(text, count, endian),
        DataType::UInt64 => ascii_decode_typed::<u64>(text, count, endian),
        DataType::Float32 => ascii_decode_typed::<f32>(text, count, endian),
        DataType::Float64 => ascii_decode_typed::<f64>(text, count, endian),
    }
}

fn ascii_encode(bytes: &[u8], datatype: DataType, endian: Endian) -> Result<String> {
    let size = datatype.byte_size();
    if bytes.len() % size != 0 {
        // A trailing partial element must fail, never be dropped.
        return Err(Error::ArrayLengthMismatch {
            expected: bytes.len() / size * size,
            actual: bytes.len(),
        });
    }
    let text = match datatype {
        DataType::UInt8 => ascii_encode_typed::<u8>(bytes, endian),
        DataType::Int8 => ascii_encode_typed::<i8>(bytes, endian),
        DataType::Int16 => ascii_encode_typed::<i16>(bytes, endian),
        DataType::UInt16 => ascii_encode_typed::<u16>(bytes, endian),
        DataType::Int32 => ascii_encode_typed::<i32>(bytes, endian),
        DataType::UInt32 => ascii_encode_typed::<u32>(bytes, endian),
        DataType::Int64 => ascii_encode_typed::<i64>(bytes, endian),
        DataType::UInt64 => ascii_encode_typed::<u64>(bytes, endian),
        DataType::Float32 => ascii_encode_typed::<f32>(bytes, endian),
        DataType::Float64 => ascii_encode_typed::<f64>(bytes, endian),
    };
    Ok(text)
}
