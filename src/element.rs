//! Positioned, sized, colored text elements.
//!
//! An element is a rectangle of cells anchored at `(x, y)`. Its `value` is
//! laid out left to right, top to bottom; a `\n` ends the current row early.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::Geometry;

/// Byte that forces an early end of row.
pub const LINE_SEPARATOR: u8 = b'\n';

/// What happens to value bytes left over when a row is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    /// The next row continues where this one stopped.
    #[default]
    Continue,
    /// The rest of the logical line is dropped; the next row starts after
    /// the next line separator.
    Truncate,
}

/// A rectangle of text on the canvas.
///
/// A `width` or `height` of 0 extends the element to the canvas edge when it
/// is drawn through [`crate::raster::draw_all`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    pub color: Color,
    pub width: usize,
    pub height: usize,
    #[serde(with = "text")]
    pub value: Vec<u8>,
    pub x: usize,
    pub y: usize,
    /// Blank first/last row and first/last column.
    pub padding: bool,
    pub overflow: Overflow,
}

impl Element {
    /// A 1x1 uncolored element at the origin holding `value`.
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            width: 1,
            height: 1,
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, x: usize, y: usize) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn padded(mut self) -> Self {
        self.padding = true;
        self
    }

    pub fn truncating(mut self) -> Self {
        self.overflow = Overflow::Truncate;
        self
    }

    /// Resolve zero dimensions against `geometry`.
    ///
    /// Borrows when nothing needs resolving.
    pub fn fitted(&self, geometry: &Geometry) -> Cow<'_, Element> {
        if self.width != 0 && self.height != 0 {
            return Cow::Borrowed(self);
        }

        let mut resolved = self.clone();
        if resolved.width == 0 {
            resolved.width = geometry.cols().saturating_sub(self.x);
        }
        if resolved.height == 0 {
            resolved.height = geometry.rows().saturating_sub(self.y);
        }
        Cow::Owned(resolved)
    }
}

/// Values travel through layout files as strings.
mod text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&String::from_utf8_lossy(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)?.into_bytes())
    }
}
