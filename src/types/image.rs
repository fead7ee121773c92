/// Resolution variants declared on an image element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSources {
    /// Base low-resolution source (`data-src`).
    pub base: Option<String>,
    /// `data-src2x`.
    pub x2: Option<String>,
    /// `data-src3x`.
    pub x3: Option<String>,
}

impl ImageSources {
    /// Pick the source for a given pixel density, or `None` when the image
    /// carries no base source and must be left alone.
    ///
    /// A 2x variant wins at any density of 2 or more; the 3x variant is only
    /// used by images that declare no 2x.
    pub fn select(&self, density: f64) -> Option<&str> {
        let base = self.base.as_deref()?;
        if density >= 2.0 {
            if let Some(x2) = self.x2.as_deref() {
                return Some(x2);
            }
        }
        if density >= 3.0 {
            if let Some(x3) = self.x3.as_deref() {
                return Some(x3);
            }
        }
        Some(base)
    }
}
