use serde::{Deserialize, Serialize};

/// Coarse layout class derived from a `DeviceInfo` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    SmallMobile,
    LargeMobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small-mobile" => Some(Self::SmallMobile),
            "large-mobile" => Some(Self::LargeMobile),
            "tablet" => Some(Self::Tablet),
            "desktop" => Some(Self::Desktop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmallMobile => "small-mobile",
            Self::LargeMobile => "large-mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, Self::SmallMobile | Self::LargeMobile)
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
