use crate::config::LayoutConfig;
use crate::types::{DeviceInfo, FrameStyle};

const TABLET_LANDSCAPE_ASPECT: f64 = 4.0 / 3.0;
const TABLET_PORTRAIT_ASPECT: f64 = 3.0 / 4.0;

/// Frame style for the current snapshot.
///
/// First match wins. Small mobile screens fill the viewport; tablets get an
/// aspect-locked frame capped to a fraction of the viewport. Anything else
/// keeps the fixed desktop phone mock-up.
pub fn frame_style(info: &DeviceInfo, viewport: (u32, u32), cfg: &LayoutConfig) -> FrameStyle {
    if info.is_mobile() && info.screen_width <= cfg.small_mobile_max_width {
        return FrameStyle {
            width: Some("100vw".into()),
            height: Some("100vh".into()),
            margin: Some("0".into()),
            border_radius: Some("0".into()),
            border: Some("none".into()),
        };
    }

    if info.is_tablet() {
        let (inner_width, inner_height) = viewport;
        let (width, height) = if info.is_landscape() {
            let width = (f64::from(inner_width) * cfg.tablet_viewport_fraction)
                .min(f64::from(cfg.tablet_max_width));
            (width, width / TABLET_LANDSCAPE_ASPECT)
        } else {
            let height = (f64::from(inner_height) * cfg.tablet_viewport_fraction)
                .min(f64::from(cfg.tablet_max_height));
            (height * TABLET_PORTRAIT_ASPECT, height)
        };
        return FrameStyle {
            width: Some(px(width)),
            height: Some(px(height)),
            margin: Some(cfg.tablet_margin.clone()),
            border_radius: None,
            border: None,
        };
    }

    FrameStyle {
        width: Some(cfg.desktop_width.clone()),
        height: Some(cfg.desktop_height.clone()),
        margin: Some(cfg.desktop_margin.clone()),
        border_radius: Some(cfg.desktop_border_radius.clone()),
        border: Some(cfg.desktop_border.clone()),
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}
