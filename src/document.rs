//! The top-level GIFTI document: an ordered collection of data arrays plus
//! one label table and one metadata map.

use crate::codes::Intent;
use crate::darray::DataArray;
use crate::deprecate;
use crate::error::{Error, Result};
use crate::label::LabelTable;
use crate::meta::MetadataMap;
use crate::validate;
use rayon::prelude::*;

/// Default GIFTI format version string.
pub const GIFTI_VERSION: &str = "1.0";

/// A GIFTI document.
///
/// The document exclusively owns its arrays, label table, and metadata;
/// every constructor allocates fresh sequences, so no two documents ever
/// share state. The array count is always `darrays.len()`; there is no
/// separately persisted counter.
///
/// Mutation methods take `&mut self` and provide no internal
/// synchronization; callers sharing one document across threads must
/// serialize access themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    darrays: Vec<DataArray>,
    /// Label table for categorical array interpretation.
    pub labeltable: LabelTable,
    /// Document-scope metadata.
    pub meta: MetadataMap,
    /// Format version carried on the root element.
    pub version: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A fresh, empty document with its own independent sequences.
    pub fn new() -> Self {
        Self {
            darrays: Vec::new(),
            labeltable: LabelTable::new(),
            meta: MetadataMap::new(),
            version: GIFTI_VERSION.to_string(),
        }
    }

    /// Number of data arrays (the `numDA` of the serialized form).
    pub fn num_darrays(&self) -> usize {
        self.darrays.len()
    }

    /// The arrays in insertion order (which is serialization order).
    pub fn darrays(&self) -> &[DataArray] {
        &self.darrays
    }

    /// Mutable access to the arrays, same ordering guarantees.
    pub fn darrays_mut(&mut self) -> &mut [DataArray] {
        &mut self.darrays
    }

    /// The array at `index`, if in range.
    pub fn darray(&self, index: usize) -> Option<&DataArray> {
        self.darrays.get(index)
    }

    /// Append a data array. O(1) amortized; `num_darrays` grows by one.
    pub fn add_darray(&mut self, da: DataArray) {
        self.darrays.push(da);
    }

    /// Remove and return the array at `index`.
    pub fn remove_darray(&mut self, index: usize) -> Result<DataArray> {
        if index >= self.darrays.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.darrays.len(),
            });
        }
        Ok(self.darrays.remove(index))
    }

    /// Remove the first array whose intent matches.
    ///
    /// Removes at most one array per call; silently does nothing when no
    /// array matches, including on an empty document. Returns the removed
    /// array, if any.
    pub fn remove_darray_by_intent(&mut self, intent: Intent) -> Option<DataArray> {
        let pos = self.darrays.iter().position(|da| da.intent == intent)?;
        Some(self.darrays.remove(pos))
    }

    /// All arrays with the given intent, in document order.
    pub fn arrays_with_intent(&self, intent: Intent) -> impl Iterator<Item = &DataArray> {
        self.darrays.iter().filter(move |da| da.intent == intent)
    }

    /// Replace the label table.
    ///
    /// The replacement is constrained to a [`LabelTable`] by the signature;
    /// the format's "reject arbitrary values" rule is enforced by the type
    /// system rather than a runtime check.
    pub fn set_labeltable(&mut self, table: LabelTable) {
        self.labeltable = table;
    }

    /// Decode every pending array payload.
    ///
    /// Arrays are independent, so decoding runs in parallel; results are
    /// identical to decoding each array in turn. The first error (in
    /// document order) is reported.
    pub fn decode_all(&mut self) -> Result<()> {
        let results: Vec<Result<()>> = self
            .darrays
            .par_iter_mut()
            .map(|da| da.decode_data().map(|_| ()))
            .collect();
        results.into_iter().collect()
    }

    /// Serializer entry point for the XML writer: per-array
    /// (attribute set, payload text) fragments in document order.
    pub fn array_fragments(&self) -> Result<Vec<(Vec<(String, String)>, String)>> {
        self.darrays
            .iter()
            .map(|da| Ok((da.to_attributes(), da.encode_data()?)))
            .collect()
    }

    /// Cross-check every array's datatype/shape/encoding consistency.
    ///
    /// Intended to run before serialization and after parsing.
    pub fn validate(&self) -> Result<()> {
        for da in &self.darrays {
            validate::validate_darray(da)?;
        }
        Ok(())
    }

    /// Deprecated alias for reading [`meta`](Self::meta).
    ///
    /// Identical return value; emits one deprecation signal per call. A
    /// freshly constructed document yields an empty map.
    #[deprecated(since = "0.1.0", note = "use the `meta` field instead")]
    pub fn get_metadata(&self) -> &MetadataMap {
        deprecate::warn("Document::get_metadata", "Document::meta");
        &self.meta
    }
}
