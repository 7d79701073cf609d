//! Cross-checks of datatype/shape/encoding consistency.
//!
//! Run before serialization and after parsing; attribute-level constraints
//! are checked again at the parse boundary itself.

use crate::codes::Encoding;
use crate::darray::DataArray;
use crate::error::{Error, Result};

/// Validate one data array's declared metadata and, when materialized, its
/// payload length.
pub fn validate_darray(da: &DataArray) -> Result<()> {
    if da.dims.is_empty() {
        return Err(Error::InvalidArgument(
            "data array has no dimensions".into(),
        ));
    }
    for (i, &dim) in da.dims.iter().enumerate() {
        if dim == 0 {
            return Err(Error::InvalidArgument(format!("Dim{i} must be positive")));
        }
    }

    // Catches dimension-product and byte-size overflow via checked_mul.
    let expected = da.expected_byte_len()?;

    if da.encoding == Encoding::ExternalFileBinary {
        match &da.ext_file {
            Some((name, _)) if !name.is_empty() => {}
            _ => {
                return Err(Error::InvalidArgument(
                    "ExternalFileBinary array requires an external file name".into(),
                ))
            }
        }
    }

    if let Some(buf) = da.data() {
        if buf.bytes().len() != expected {
            return Err(Error::ArrayLengthMismatch {
                expected,
                actual: buf.bytes().len(),
            });
        }
        if buf.datatype() != da.datatype {
            return Err(Error::InvalidArgument(format!(
                "decoded buffer is {}, array declares {}",
                buf.datatype(),
                da.datatype
            )));
        }
    }
    Ok(())
}
