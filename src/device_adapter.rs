use std::time::Duration;

use tracing::{debug, trace};

use super::config::AdapterConfig;
use super::debounce::Debouncer;
use super::environment::{DocumentWriter, Environment};
use super::error::Result;
use super::layout::frame_style;
use super::signatures::Signatures;
use super::types::*;

const VIEWPORT_CONTENT: &str = "width=device-width, initial-scale=1.0, user-scalable=no";
const VIEWPORT_FIT_COVER: &str = ", viewport-fit=cover";

const SAFE_AREA_CSS: &str = "\
.safe-area-top {
    padding-top: env(safe-area-inset-top);
}
.safe-area-bottom {
    padding-bottom: env(safe-area-inset-bottom);
}
.safe-area-left {
    padding-left: env(safe-area-inset-left);
}
.safe-area-right {
    padding-right: env(safe-area-inset-right);
}
";

/// Every class `apply_device_classes` may add; all are cleared first.
pub const MANAGED_BODY_CLASSES: [&str; 7] = [
    "device-mobile",
    "device-tablet",
    "device-desktop",
    "device-ios",
    "device-android",
    "orientation-portrait",
    "orientation-landscape",
];

/// Which debounced handler ran during a `poll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterEvent {
    OrientationChange,
    Resize,
}

/// Adapts a fixed-layout page to the device it runs on.
///
/// Owns its environment probe and document writer; the host page builds one
/// at load time, calls `start`, then `deferred_setup` once the document has
/// settled, and forwards native resize/orientation events through
/// `notify_*` + `poll`.
pub struct DeviceAdapter<E, D> {
    env: E,
    doc: D,
    config: AdapterConfig,
    signatures: Signatures,
    info: DeviceInfo,
    resize: Debouncer,
    orientation: Debouncer,
}

impl<E: Environment, D: DocumentWriter> DeviceAdapter<E, D> {
    /// Validate `config`, compile the user-agent signatures and take the
    /// initial `DeviceInfo` snapshot.
    pub fn new(env: E, doc: D, config: AdapterConfig) -> Result<Self> {
        config.validate()?;
        let signatures = Signatures::build(&config.signatures)?;
        let info = DeviceInfo::detect(&env, &signatures);
        debug!(
            width = info.screen_width,
            height = info.screen_height,
            pixel_ratio = info.pixel_ratio,
            orientation = info.orientation().as_str(),
            mobile = info.is_mobile(),
            tablet = info.is_tablet(),
            ios = info.is_ios(),
            android = info.is_android(),
            "detected device"
        );

        let resize = Debouncer::new(config.timing.resize_debounce());
        let orientation = Debouncer::new(config.timing.orientation_debounce());

        Ok(Self {
            env,
            doc,
            config,
            signatures,
            info,
            resize,
            orientation,
        })
    }

    pub fn with_defaults(env: E, doc: D) -> Result<Self> {
        Self::new(env, doc, AdapterConfig::default())
    }

    /// Read the environment afresh. Does not touch the held snapshot.
    pub fn detect(&self) -> DeviceInfo {
        DeviceInfo::detect(&self.env, &self.signatures)
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Page-load setup. Call exactly once.
    pub fn start(&mut self) {
        self.configure_viewport();
        self.inject_safe_area_styles();
        self.apply_device_classes();
        self.adjust_container_layout();
    }

    /// Second pass once images and interactive elements are in the DOM.
    pub fn deferred_setup(&mut self) {
        self.optimize_images();
        self.setup_touch_optimization();
    }

    pub fn configure_viewport(&mut self) {
        let mut content = VIEWPORT_CONTENT.to_string();
        if self.info.is_ios() {
            content.push_str(VIEWPORT_FIT_COVER);
        }
        self.doc.set_viewport_content(&content);
    }

    /// Appends the safe-area utility classes. Not idempotent.
    pub fn inject_safe_area_styles(&mut self) {
        self.doc.append_style(SAFE_AREA_CSS);
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// A native `resize` arrived at `now`; returns the new deadline.
    pub fn notify_resize(&mut self, now: Duration) -> Duration {
        self.resize.schedule(now)
    }

    /// A native `orientationchange` arrived at `now`; returns the new deadline.
    pub fn notify_orientation_change(&mut self, now: Duration) -> Duration {
        self.orientation.schedule(now)
    }

    /// Earliest pending handler deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.orientation.next_deadline(), self.resize.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run whichever debounced handlers are due at `now`.
    pub fn poll(&mut self, now: Duration) -> Vec<AdapterEvent> {
        let mut ran = Vec::new();
        if self.orientation.fire(now) {
            self.on_orientation_change();
            ran.push(AdapterEvent::OrientationChange);
        }
        if self.resize.fire(now) {
            self.on_resize();
            ran.push(AdapterEvent::Resize);
        }
        ran
    }

    pub fn on_orientation_change(&mut self) {
        self.refresh_viewport();
        debug!(orientation = self.info.orientation().as_str(), "orientation changed");
        self.apply_device_classes();
        self.adjust_container_layout();
    }

    pub fn on_resize(&mut self) {
        self.refresh_viewport();
        debug!(
            width = self.info.screen_width,
            height = self.info.screen_height,
            "viewport resized"
        );
        self.apply_device_classes();
        self.adjust_container_layout();
    }

    fn refresh_viewport(&mut self) {
        let (width, height) = self.env.inner_size();
        if width == 0 || height == 0 {
            return;
        }
        self.info.update_viewport(width, height);
    }

    // -----------------------------------------------------------------------
    // Styling
    // -----------------------------------------------------------------------

    pub fn apply_device_classes(&mut self) {
        self.doc.remove_body_classes(&MANAGED_BODY_CLASSES);

        let device_class = if self.info.is_mobile() {
            "device-mobile"
        } else if self.info.is_tablet() {
            "device-tablet"
        } else {
            "device-desktop"
        };
        self.doc.add_body_class(device_class);

        if self.info.is_ios() {
            self.doc.add_body_class("device-ios");
        } else if self.info.is_android() {
            self.doc.add_body_class("device-android");
        }

        let orientation_class = self.info.orientation().css_class();
        self.doc.add_body_class(orientation_class);
        trace!(device_class, orientation_class, "applied body classes");
    }

    pub fn adjust_container_layout(&mut self) {
        let style = frame_style(&self.info, self.env.inner_size(), &self.config.layout);
        let selector = &self.config.layout.frame_selector;
        if !self.doc.apply_frame_style(selector, &style) {
            trace!(selector = selector.as_str(), "no frame element");
        }
    }

    pub fn classify(&self) -> DeviceClass {
        self.info.classify(self.config.layout.small_mobile_max_width)
    }

    pub fn recommended_font_size(&self, base: u32) -> u32 {
        let scale = self.config.font_scale_for(self.classify());
        (f64::from(base) * scale).round() as u32
    }

    pub fn touch_supported(&self) -> bool {
        self.env.has_touch_events() || self.env.max_touch_points() > 0
    }

    pub fn screen_density(&self) -> f64 {
        self.info.pixel_ratio
    }

    /// Point every image carrying a base source at the variant matching the
    /// screen density. Returns how many images were updated.
    pub fn optimize_images(&mut self) -> usize {
        let density = self.screen_density();
        let mut updated = 0;
        for (index, sources) in self.doc.image_sources().iter().enumerate() {
            if let Some(src) = sources.select(density) {
                self.doc.set_image_src(index, src);
                updated += 1;
            }
        }
        debug!(updated, density, "optimized images");
        updated
    }

    /// Returns whether touch mode was enabled.
    pub fn setup_touch_optimization(&mut self) -> bool {
        if !self.touch_supported() {
            return false;
        }
        self.doc.add_body_class(&self.config.touch_class);
        let wired = self.doc.attach_press_feedback(
            &self.config.touch_selector,
            &self.config.pressed_transform,
            &self.config.released_transform,
        );
        debug!(wired, "touch feedback attached");
        true
    }
}
