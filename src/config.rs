use std::path::Path;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::types::DeviceClass;

/// Base font size used when the page does not supply its own.
pub const DEFAULT_BASE_FONT_SIZE: u32 = 16;

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

/// Adapter configuration. Every field has a default, so an empty YAML
/// document is a valid configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub signatures: SignatureConfig,
    /// Font scale per device class. Entries given in YAML override the
    /// defaults one class at a time.
    #[serde(deserialize_with = "merge_font_scale")]
    pub font_scale: IndexMap<DeviceClass, f64>,
    pub touch_selector: String,
    pub touch_class: String,
    pub pressed_transform: String,
    pub released_transform: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            layout: LayoutConfig::default(),
            signatures: SignatureConfig::default(),
            font_scale: default_font_scale(),
            touch_selector: r#"button, .clickable, [role="button"]"#.to_string(),
            touch_class: "touch-device".to_string(),
            pressed_transform: "scale(0.95)".to_string(),
            released_transform: "scale(1)".to_string(),
        }
    }
}

impl AdapterConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.small_mobile_max_width == 0 {
            return Err(invalid("layout.small_mobile_max_width must be positive"));
        }
        if layout.tablet_max_width == 0 || layout.tablet_max_height == 0 {
            return Err(invalid("layout tablet maxima must be positive"));
        }
        if !(layout.tablet_viewport_fraction > 0.0 && layout.tablet_viewport_fraction <= 1.0) {
            return Err(invalid("layout.tablet_viewport_fraction must be in (0, 1]"));
        }
        if layout.frame_selector.trim().is_empty() {
            return Err(invalid("layout.frame_selector must not be empty"));
        }
        if self.touch_selector.trim().is_empty() {
            return Err(invalid("touch_selector must not be empty"));
        }
        if let Some((class, scale)) = self
            .font_scale
            .iter()
            .find(|(_, s)| !(s.is_finite() && **s > 0.0))
        {
            return Err(invalid(&format!("font_scale.{class} must be positive, got {scale}")));
        }
        for (name, rule) in self.signatures.rules() {
            if rule.pattern.is_empty() {
                return Err(invalid(&format!("signatures.{name}.pattern must not be empty")));
            }
        }
        Ok(())
    }

    /// Scale factor for `class`; classes missing from the table scale by 1.
    pub fn font_scale_for(&self, class: DeviceClass) -> f64 {
        self.font_scale.get(&class).copied().unwrap_or(1.0)
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidConfig(msg.to_string())
}

fn default_font_scale() -> IndexMap<DeviceClass, f64> {
    IndexMap::from([
        (DeviceClass::SmallMobile, 0.9),
        (DeviceClass::LargeMobile, 1.0),
        (DeviceClass::Tablet, 1.1),
        (DeviceClass::Desktop, 1.2),
    ])
}

fn merge_font_scale<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<DeviceClass, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = IndexMap::<DeviceClass, f64>::deserialize(deserializer)?;
    let mut table = default_font_scale();
    table.extend(overrides);
    Ok(table)
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub resize_debounce_ms: u64,
    pub orientation_debounce_ms: u64,
    /// Delay between `start()` and the image/touch pass.
    pub deferred_setup_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 250,
            orientation_debounce_ms: 100,
            deferred_setup_ms: 100,
        }
    }
}

impl TimingConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn orientation_debounce(&self) -> Duration {
        Duration::from_millis(self.orientation_debounce_ms)
    }

    pub fn deferred_setup(&self) -> Duration {
        Duration::from_millis(self.deferred_setup_ms)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub frame_selector: String,
    pub small_mobile_max_width: u32,
    pub tablet_max_width: u32,
    pub tablet_max_height: u32,
    pub tablet_viewport_fraction: f64,
    pub tablet_margin: String,
    pub desktop_width: String,
    pub desktop_height: String,
    pub desktop_margin: String,
    pub desktop_border_radius: String,
    pub desktop_border: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            frame_selector: ".iphone13-frame".to_string(),
            small_mobile_max_width: 480,
            tablet_max_width: 768,
            tablet_max_height: 1024,
            tablet_viewport_fraction: 0.8,
            tablet_margin: "20px auto".to_string(),
            desktop_width: "390px".to_string(),
            desktop_height: "844px".to_string(),
            desktop_margin: "40px auto".to_string(),
            desktop_border_radius: "40px".to_string(),
            desktop_border: "1px solid #ccc".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// User-agent signatures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SignatureRule {
    pub pattern: String,
    #[serde(default)]
    pub case_insensitive: bool,
}

impl SignatureRule {
    fn new(pattern: &str, case_insensitive: bool) -> Self {
        Self {
            pattern: pattern.to_string(),
            case_insensitive,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub mobile: SignatureRule,
    pub ios: SignatureRule,
    pub android: SignatureRule,
    pub tablet: SignatureRule,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            mobile: SignatureRule::new(
                "Android|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini",
                true,
            ),
            ios: SignatureRule::new("iPad|iPhone|iPod", false),
            android: SignatureRule::new("Android", false),
            tablet: SignatureRule::new(
                r"iPad|Android(?=.*\bMobile\b)(?=.*\bSafari\b)",
                false,
            ),
        }
    }
}

impl SignatureConfig {
    pub(crate) fn rules(&self) -> [(&'static str, &SignatureRule); 4] {
        [
            ("mobile", &self.mobile),
            ("ios", &self.ios),
            ("android", &self.android),
            ("tablet", &self.tablet),
        ]
    }
}
