//! Label table support for categorical data arrays.
//!
//! A label table maps integer keys (the values stored in a
//! `NIFTI_INTENT_LABEL` array) to a display name and an RGBA color.

use crate::deprecate;
use crate::error::{Error, Result};

/// One label table entry: key, display name, RGBA color in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label {
    /// Integer key referenced by label-intent array values.
    pub key: i32,
    /// Display name (the `Label` element text content).
    pub name: String,
    /// Red component in `[0, 1]`.
    pub red: f32,
    /// Green component in `[0, 1]`.
    pub green: f32,
    /// Blue component in `[0, 1]`.
    pub blue: f32,
    /// Alpha component in `[0, 1]`.
    pub alpha: f32,
}

impl Label {
    /// A named label with default (transparent black) color.
    pub fn new<S: Into<String>>(key: i32, name: S) -> Self {
        Self {
            key,
            name: name.into(),
            ..Self::default()
        }
    }

    /// The four color components, in RGBA order.
    ///
    /// Components set individually by field and components set positionally
    /// via [`set_rgba`](Self::set_rgba) are observable identically here.
    pub fn rgba(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Set the color positionally. Requires exactly four components.
    pub fn set_rgba(&mut self, rgba: &[f32]) -> Result<()> {
        let [red, green, blue, alpha] = <[f32; 4]>::try_from(rgba)
            .map_err(|_| Error::InvalidColorComponents(rgba.len()))?;
        self.red = red;
        self.green = green;
        self.blue = blue;
        self.alpha = alpha;
        Ok(())
    }

    /// Deprecated alias for [`rgba`](Self::rgba).
    ///
    /// Identical return value; emits one deprecation signal per call.
    #[deprecated(since = "0.1.0", note = "use `rgba` instead")]
    pub fn get_rgba(&self) -> [f32; 4] {
        deprecate::warn("Label::get_rgba", "Label::rgba");
        self.rgba()
    }

    /// Build from parsed `Label` element attributes plus text content.
    ///
    /// `Key` is required; color attributes are optional and default to 0,
    /// but when present must be numeric and within `[0, 1]`.
    pub fn from_attributes(attrs: &[(String, String)], name: &str) -> Result<Self> {
        let key_text = attr(attrs, "Key")
            .ok_or_else(|| Error::InvalidArgument("Label missing Key attribute".into()))?;
        let key: i32 = key_text
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("bad Label Key: '{key_text}'")))?;

        let mut label = Label::new(key, name);
        for (field, slot) in [
            ("Red", &mut label.red),
            ("Green", &mut label.green),
            ("Blue", &mut label.blue),
            ("Alpha", &mut label.alpha),
        ] {
            if let Some(text) = attr(attrs, field) {
                let v: f32 = text
                    .parse()
                    .map_err(|_| Error::InvalidArgument(format!("bad Label {field}: '{text}'")))?;
                if !(0.0..=1.0).contains(&v) {
                    return Err(Error::InvalidArgument(format!(
                        "Label {field} must be in [0, 1], got {v}"
                    )));
                }
                *slot = v;
            }
        }
        Ok(label)
    }

    /// Attribute fragments for the serializer, in document order.
    pub fn to_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Key", self.key.to_string()),
            ("Red", self.red.to_string()),
            ("Green", self.green.to_string()),
            ("Blue", self.blue.to_string()),
            ("Alpha", self.alpha.to_string()),
        ]
    }
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Ordered collection of labels.
///
/// Duplicate keys are allowed by construction; key lookups return the first
/// match in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTable {
    /// Entries in document order.
    pub labels: Vec<Label>,
}

impl LabelTable {
    /// A fresh, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn push(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// First label with the given key, if any.
    pub fn label(&self, key: i32) -> Option<&Label> {
        self.labels.iter().find(|l| l.key == key)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the table holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Key-to-name pairs in table order, first occurrence of a key winning.
    pub fn label_map(&self) -> Vec<(i32, &str)> {
        let mut seen = Vec::new();
        let mut out = Vec::with_capacity(self.labels.len());
        for label in &self.labels {
            if !seen.contains(&label.key) {
                seen.push(label.key);
                out.push((label.key, label.name.as_str()));
            }
        }
        out
    }

    /// Iterate labels in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.labels.iter()
    }
}
