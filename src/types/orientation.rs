use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape iff strictly wider than tall; a square viewport is portrait.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Parse a screen orientation type such as `landscape-primary`.
    /// Anything that is not a landscape variant maps to portrait.
    pub fn from_screen_type(kind: &str) -> Self {
        if kind.trim().to_ascii_lowercase().starts_with("landscape") {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Body class marking this orientation.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Portrait => "orientation-portrait",
            Self::Landscape => "orientation-landscape",
        }
    }
}
