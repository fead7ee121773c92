//! Deterministic in-memory `Environment` and `DocumentWriter`.
//!
//! Used by this crate's tests and available to hosts that want to exercise
//! an adapter without a browser.

use indexmap::{IndexMap, IndexSet};

use crate::environment::{DocumentWriter, Environment};
use crate::types::{FrameStyle, ImageSources};

#[derive(Debug, Clone, Default)]
pub struct FakeEnvironment {
    pub user_agent: String,
    pub screen_size: (u32, u32),
    pub screen_orientation: Option<String>,
    pub pixel_ratio: Option<f64>,
    pub inner_size: (u32, u32),
    pub touch_events: bool,
    pub max_touch_points: u32,
}

impl FakeEnvironment {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            ..Self::default()
        }
    }

    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_size = (width, height);
        self
    }

    pub fn with_inner_size(mut self, width: u32, height: u32) -> Self {
        self.inner_size = (width, height);
        self
    }

    pub fn with_screen_orientation(mut self, kind: &str) -> Self {
        self.screen_orientation = Some(kind.to_string());
        self
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = Some(ratio);
        self
    }

    pub fn with_touch(mut self, touch_events: bool, max_touch_points: u32) -> Self {
        self.touch_events = touch_events;
        self.max_touch_points = max_touch_points;
        self
    }
}

impl Environment for FakeEnvironment {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    fn screen_orientation(&self) -> Option<String> {
        self.screen_orientation.clone()
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.pixel_ratio
    }

    fn inner_size(&self) -> (u32, u32) {
        self.inner_size
    }

    fn has_touch_events(&self) -> bool {
        self.touch_events
    }

    fn max_touch_points(&self) -> u32 {
        self.max_touch_points
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeImage {
    pub sources: ImageSources,
    pub src: Option<String>,
}

impl FakeImage {
    pub fn new(base: Option<&str>, x2: Option<&str>, x3: Option<&str>) -> Self {
        Self {
            sources: ImageSources {
                base: base.map(String::from),
                x2: x2.map(String::from),
                x3: x3.map(String::from),
            },
            src: None,
        }
    }
}

/// Records every write the adapter makes.
#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    pub viewport: Option<String>,
    pub styles: Vec<String>,
    pub body_classes: IndexSet<String>,
    /// Selector the frame element answers to; `None` means no frame.
    pub frame_selector: Option<String>,
    pub frame_style: IndexMap<String, String>,
    pub images: Vec<FakeImage>,
    /// Number of elements matching the touch selector.
    pub touch_targets: usize,
    /// `(selector, pressed, released)` per wiring call.
    pub press_feedback: Vec<(String, String, String)>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame(mut self, selector: &str) -> Self {
        self.frame_selector = Some(selector.to_string());
        self
    }

    pub fn with_image(mut self, image: FakeImage) -> Self {
        self.images.push(image);
        self
    }

    pub fn with_touch_targets(mut self, count: usize) -> Self {
        self.touch_targets = count;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn frame_property(&self, name: &str) -> Option<&str> {
        self.frame_style.get(name).map(String::as_str)
    }
}

impl DocumentWriter for FakeDocument {
    fn set_viewport_content(&mut self, content: &str) {
        self.viewport = Some(content.to_string());
    }

    fn append_style(&mut self, css: &str) {
        self.styles.push(css.to_string());
    }

    fn remove_body_classes(&mut self, classes: &[&str]) {
        for class in classes {
            self.body_classes.shift_remove(*class);
        }
    }

    fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_string());
    }

    fn apply_frame_style(&mut self, selector: &str, style: &FrameStyle) -> bool {
        if self.frame_selector.as_deref() != Some(selector) {
            return false;
        }
        for (name, value) in style.properties() {
            self.frame_style.insert(name.to_string(), value.to_string());
        }
        true
    }

    fn image_sources(&mut self) -> Vec<ImageSources> {
        self.images.iter().map(|img| img.sources.clone()).collect()
    }

    fn set_image_src(&mut self, index: usize, src: &str) {
        if let Some(img) = self.images.get_mut(index) {
            img.src = Some(src.to_string());
        }
    }

    fn attach_press_feedback(&mut self, selector: &str, pressed: &str, released: &str) -> usize {
        self.press_feedback
            .push((selector.to_string(), pressed.to_string(), released.to_string()));
        self.touch_targets
    }
}
