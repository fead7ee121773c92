use super::{DeviceClass, Orientation};
use crate::environment::Environment;
use crate::signatures::Signatures;
use serde::Serialize;

/// Device-class flags derived from the user agent. Fixed for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeviceFlags {
    pub is_mobile: bool,
    pub is_ios: bool,
    pub is_android: bool,
    pub is_tablet: bool,
}

/// Snapshot of the environment the adapter lays the page out for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub user_agent: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub pixel_ratio: f64,
    orientation: Orientation,
    flags: DeviceFlags,
}

impl DeviceInfo {
    /// Read the environment once and build the snapshot.
    ///
    /// Never fails: an unknown screen size falls back to the inner window
    /// size, a missing or nonsensical pixel ratio to 1, and a missing
    /// orientation to portrait.
    pub fn detect<E: Environment + ?Sized>(env: &E, signatures: &Signatures) -> Self {
        let user_agent = env.user_agent();
        let flags = signatures.detect(&user_agent);

        let (inner_width, inner_height) = env.inner_size();
        let (screen_width, screen_height) = match env.screen_size() {
            (0, _) | (_, 0) => (inner_width, inner_height),
            size => size,
        };

        let pixel_ratio = env
            .device_pixel_ratio()
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(1.0);

        let orientation = if inner_width > 0 && inner_height > 0 {
            Orientation::from_dimensions(inner_width, inner_height)
        } else {
            env.screen_orientation()
                .map(|kind| Orientation::from_screen_type(&kind))
                .unwrap_or_default()
        };

        Self {
            user_agent,
            screen_width,
            screen_height,
            pixel_ratio,
            orientation,
            flags,
        }
    }

    /// Record a new viewport size. Dimensions and orientation always move together.
    pub fn update_viewport(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
        self.orientation = Orientation::from_dimensions(width, height);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }

    pub fn flags(&self) -> DeviceFlags {
        self.flags
    }

    pub fn is_mobile(&self) -> bool {
        self.flags.is_mobile
    }

    pub fn is_ios(&self) -> bool {
        self.flags.is_ios
    }

    pub fn is_android(&self) -> bool {
        self.flags.is_android
    }

    pub fn is_tablet(&self) -> bool {
        self.flags.is_tablet
    }

    /// Mobile beats tablet beats desktop; the small/large mobile split is
    /// `width <= small_mobile_max_width`.
    pub fn classify(&self, small_mobile_max_width: u32) -> DeviceClass {
        if self.flags.is_mobile {
            if self.screen_width <= small_mobile_max_width {
                DeviceClass::SmallMobile
            } else {
                DeviceClass::LargeMobile
            }
        } else if self.flags.is_tablet {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }
}
