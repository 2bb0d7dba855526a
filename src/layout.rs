//! Element layouts: the built-in demo and JSON layout files.
//!
//! Structure:
//! - Pure functions: the demo layout, default path computation
//! - Effect functions: layout file loading

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::element::Element;
use crate::error::{Error, Result};

/// Layout filename within the config directory.
const LAYOUT_FILENAME: &str = "layout.json";

/// An ordered list of elements. Order is paint order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub elements: Vec<Element>,
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Returns the default layout file location.
///
/// On Linux: ~/.config/termcanvas/layout.json
pub fn default_layout_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("termcanvas")
        .join(LAYOUT_FILENAME)
}

impl Layout {
    /// The demonstration set shown when no layout file exists.
    ///
    /// Needs a terminal of at least 20 columns by 11 rows.
    pub fn demo() -> Self {
        Self {
            elements: vec![
                Element::new(" termcanvas")
                    .sized(0, 1)
                    .colored(Color::BgBlue),
                Element::new("resize the\nterminal to\nsee it redraw")
                    .at(2, 2)
                    .sized(16, 6)
                    .colored(Color::BgGreen)
                    .padded()
                    .truncating(),
                Element::new("*")
                    .at(19, 2)
                    .colored(Color::BgHiMagenta),
                Element::new("q or ctrl-c quits")
                    .at(2, 10)
                    .sized(17, 1)
                    .colored(Color::FgHiYellow),
            ],
        }
    }

    // ========================================================================
    // EFFECT FUNCTIONS
    // ========================================================================

    /// Load a layout file.
    ///
    /// # Errors
    /// [`Error::LayoutRead`] if the file cannot be read,
    /// [`Error::LayoutParse`] if it is not a valid layout.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::LayoutRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| Error::LayoutParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Pick the layout to render.
    ///
    /// An explicit path must load. Without one, the default file is used if
    /// it exists, otherwise the demo layout.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_with_default(explicit, &default_layout_path())
    }

    /// [`Layout::resolve`] with an injectable default path.
    pub fn resolve_with_default(explicit: Option<&Path>, default: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                debug!("loading layout from {}", path.display());
                Self::load(path)
            }
            None if default.exists() => {
                debug!("loading default layout from {}", default.display());
                Self::load(default)
            }
            None => {
                debug!("no layout file, using the demo layout");
                Ok(Self::demo())
            }
        }
    }

    /// Pretty JSON for this layout.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// TESTS
// ============================================================================
