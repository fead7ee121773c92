use crate::types::{FrameStyle, ImageSources};

/// Read-only probe over the host page's navigator, screen and window.
///
/// Implementations report "unavailable" with zero sizes or `None` rather
/// than failing; detection substitutes defaults.
pub trait Environment {
    fn user_agent(&self) -> String;

    /// `screen.width` × `screen.height`, `(0, 0)` when unknown.
    fn screen_size(&self) -> (u32, u32);

    /// `screen.orientation.type`, e.g. `portrait-primary`.
    fn screen_orientation(&self) -> Option<String>;

    fn device_pixel_ratio(&self) -> Option<f64>;

    /// `innerWidth` × `innerHeight`, `(0, 0)` when unknown.
    fn inner_size(&self) -> (u32, u32);

    /// Whether the window exposes an `ontouchstart` handler.
    fn has_touch_events(&self) -> bool;

    fn max_touch_points(&self) -> u32;
}

/// The parts of the document the adapter writes to.
///
/// Every operation degrades to a no-op when its target is missing.
pub trait DocumentWriter {
    /// Create `<meta name="viewport">` if absent and set its `content`.
    fn set_viewport_content(&mut self, content: &str);

    /// Append a `<style>` block to the document head.
    fn append_style(&mut self, css: &str);

    fn remove_body_classes(&mut self, classes: &[&str]);

    fn add_body_class(&mut self, class: &str);

    /// Apply inline style to the first element matching `selector`.
    /// Returns `false` when nothing matched.
    fn apply_frame_style(&mut self, selector: &str, style: &FrameStyle) -> bool;

    /// Resolution variants of every `<img>` in document order. Writers may
    /// keep the element list from this call for `set_image_src`.
    fn image_sources(&mut self) -> Vec<ImageSources>;

    /// Set `src` on the `index`-th image of the last `image_sources` call.
    fn set_image_src(&mut self, index: usize, src: &str);

    /// Attach touchstart/touchend listeners that set `transform` to
    /// `pressed`/`released` on every element matching `selector`.
    /// Returns the number of elements wired.
    fn attach_press_feedback(&mut self, selector: &str, pressed: &str, released: &str) -> usize;
}
