//! Container and codec for the GIFTI surface-data exchange format.
//!
//! GIFTI stores geometric surface data, labels, and statistical maps for
//! neuroimaging as typed, multi-dimensional arrays embedded in a structured
//! document. This crate covers the data model and the encode/decode
//! pipeline: payload encodings (ASCII text, base64, compressed base64,
//! external file references), datatype and endianness negotiation, and the
//! auxiliary label and metadata tables.
//!
//! XML tokenization and file path handling are left to callers: parsing
//! enters through [`DataArray::from_attributes`] with already-tokenized
//! attribute sets, and serialization exits through
//! [`DataArray::to_attributes`] and [`DataArray::encode_data`].
//!
//! ```
//! use giftirs::{DataArray, Document, Intent};
//! use ndarray::{ArrayD, IxDyn};
//!
//! let verts = ArrayD::from_shape_vec(IxDyn(&[3, 3]), vec![0.0f32; 9]).unwrap();
//! let mut doc = Document::new();
//! doc.add_darray(DataArray::from_ndarray(&verts, Intent::Pointset));
//! assert_eq!(doc.num_darrays(), 1);
//! ```

pub mod buffer;
pub mod codec;
pub mod codes;
mod deprecate;
pub mod error;
pub mod validate;

mod darray;
mod document;
mod label;
mod meta;

pub use buffer::{Element, TypedBuffer};
pub use codec::{decode_payload, encode_payload, read_external, ExternalRef};
pub use codes::{DataType, Encoding, Endian, IndexOrder, Intent, ALL_DATATYPES};
pub use darray::{CoordSystem, DataArray};
pub use deprecate::deprecation_count;
pub use document::{Document, GIFTI_VERSION};
pub use error::{Error, Result};
pub use label::{Label, LabelTable};
pub use meta::MetadataMap;
