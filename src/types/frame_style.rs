/// Inline style values applied to the frame container.
///
/// `None` leaves the corresponding property untouched on the element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStyle {
    pub width: Option<String>,
    pub height: Option<String>,
    pub margin: Option<String>,
    pub border_radius: Option<String>,
    pub border: Option<String>,
}

impl FrameStyle {
    /// `(css property, value)` pairs for every property that is set.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("width", self.width.as_deref()),
            ("height", self.height.as_deref()),
            ("margin", self.margin.as_deref()),
            ("border-radius", self.border_radius.as_deref()),
            ("border", self.border.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}
