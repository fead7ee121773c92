use std::path::Path;
use std::time::Duration;

use device_adapter::fake::{FakeDocument, FakeEnvironment, FakeImage};
use device_adapter::{
    AdapterConfig, AdapterEvent, DeviceAdapter, DeviceClass, DocumentWriter, Orientation,
    MANAGED_BODY_CLASSES,
};
use fixtures::fixtures;
use serde::Deserialize;

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.6 Mobile/15E148 Safari/604.1";
const PIXEL: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
const WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const FRAME: &str = ".iphone13-frame";

type TestAdapter = DeviceAdapter<FakeEnvironment, FakeDocument>;

fn adapter(env: FakeEnvironment) -> TestAdapter {
    DeviceAdapter::with_defaults(env, FakeDocument::new().with_frame(FRAME)).unwrap()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn count_present(doc: &FakeDocument, classes: &[&str]) -> usize {
    classes.iter().filter(|c| doc.has_class(c)).count()
}

fn assert_class_invariants(doc: &FakeDocument) {
    assert_eq!(
        count_present(doc, &["device-mobile", "device-tablet", "device-desktop"]),
        1,
        "exactly one device class in {:?}",
        doc.body_classes
    );
    assert!(count_present(doc, &["device-ios", "device-android"]) <= 1);
    assert_eq!(
        count_present(doc, &["orientation-portrait", "orientation-landscape"]),
        1,
        "exactly one orientation class in {:?}",
        doc.body_classes
    );
}

// ---------------------------------------------------------------------------
// User-agent fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UserAgentFixture {
    user_agent: String,
    viewport: (u32, u32),
    mobile: bool,
    ios: bool,
    android: bool,
    tablet: bool,
    class: String,
}

#[fixtures(["tests/fixtures/user_agents.yml"])]
#[test]
fn test_user_agent_fixtures(path: &Path) {
    let content = std::fs::read_to_string(path).unwrap();
    let fixtures: Vec<UserAgentFixture> = serde_yaml::from_str(&content).unwrap();
    assert!(!fixtures.is_empty());

    for f in &fixtures {
        let (width, height) = f.viewport;
        let mut a = adapter(FakeEnvironment::new(&f.user_agent).with_inner_size(width, height));
        let info = a.device_info();

        assert_eq!(info.is_mobile(), f.mobile, "mobile flag for UA: {}", f.user_agent);
        assert_eq!(info.is_ios(), f.ios, "ios flag for UA: {}", f.user_agent);
        assert_eq!(info.is_android(), f.android, "android flag for UA: {}", f.user_agent);
        assert_eq!(info.is_tablet(), f.tablet, "tablet flag for UA: {}", f.user_agent);

        let expected = DeviceClass::from_str(&f.class).unwrap();
        assert_eq!(a.classify(), expected, "class for UA: {}", f.user_agent);
        if f.mobile {
            assert!(a.classify().is_mobile());
        }

        a.apply_device_classes();
        assert_class_invariants(a.document());
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

#[test]
fn portrait_and_landscape_from_viewport() {
    let a = adapter(FakeEnvironment::new(IPHONE).with_inner_size(400, 800));
    assert!(!a.device_info().is_landscape());
    assert_eq!(a.device_info().orientation(), Orientation::Portrait);

    let a = adapter(FakeEnvironment::new(IPHONE).with_inner_size(800, 400));
    assert!(a.device_info().is_landscape());
    assert_eq!(a.device_info().orientation(), Orientation::Landscape);
}

#[test]
fn detection_defaults() {
    let a = adapter(FakeEnvironment::new(WINDOWS));
    let info = a.device_info();
    assert_eq!(info.pixel_ratio, 1.0);
    assert_eq!(info.orientation(), Orientation::Portrait);
    assert_eq!(a.screen_density(), 1.0);

    let a = adapter(FakeEnvironment::new(WINDOWS).with_pixel_ratio(f64::NAN));
    assert_eq!(a.device_info().pixel_ratio, 1.0);
}

#[test]
fn screen_orientation_used_without_viewport() {
    let a = adapter(FakeEnvironment::new(PIXEL).with_screen_orientation("landscape-primary"));
    assert!(a.device_info().is_landscape());
}

#[test]
fn screen_size_preferred_over_viewport() {
    let env = FakeEnvironment::new(IPHONE)
        .with_screen_size(390, 844)
        .with_inner_size(390, 664);
    let a = adapter(env);
    assert_eq!(a.device_info().screen_width, 390);
    assert_eq!(a.device_info().screen_height, 844);
}

#[test]
fn detect_has_no_side_effects() {
    let a = adapter(FakeEnvironment::new(IPHONE).with_inner_size(390, 844));
    let fresh = a.detect();
    assert_eq!(&fresh, a.device_info());
    assert!(a.document().body_classes.is_empty());
    assert!(a.document().viewport.is_none());
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn start_applies_everything_once() {
    let mut a = adapter(
        FakeEnvironment::new(IPHONE)
            .with_inner_size(390, 844)
            .with_pixel_ratio(3.0),
    );
    a.start();

    let doc = a.document();
    assert!(doc.viewport.as_deref().unwrap().ends_with("viewport-fit=cover"));
    assert_eq!(doc.styles.len(), 1);
    assert!(doc.has_class("device-mobile"));
    assert!(doc.has_class("device-ios"));
    assert!(doc.has_class("orientation-portrait"));
    assert_eq!(doc.frame_property("width"), Some("100vw"));
    assert_eq!(doc.frame_property("border"), Some("none"));
}

#[test]
fn apply_classes_is_reentrant() {
    let mut a = adapter(FakeEnvironment::new(PIXEL).with_inner_size(412, 915));
    a.document_mut().add_body_class("device-desktop");
    a.document_mut().add_body_class("orientation-landscape");
    a.document_mut().add_body_class("page-theme");

    for _ in 0..3 {
        a.apply_device_classes();
        assert_class_invariants(a.document());
    }
    let doc = a.document();
    assert!(doc.has_class("device-mobile"));
    assert!(doc.has_class("device-android"));
    assert!(doc.has_class("orientation-portrait"));
    assert!(!doc.has_class("device-desktop"));
    assert!(doc.has_class("page-theme"), "unmanaged classes survive");
    assert_eq!(count_present(doc, &MANAGED_BODY_CLASSES), 3);
}

#[test]
fn missing_frame_is_noop() {
    let mut a = DeviceAdapter::with_defaults(
        FakeEnvironment::new(WINDOWS).with_inner_size(1920, 1080),
        FakeDocument::new(),
    )
    .unwrap();
    a.adjust_container_layout();
    assert!(a.document().frame_style.is_empty());
}

#[test]
fn custom_frame_selector() {
    let yaml = "layout:\n  frame_selector: \"#device\"\n  desktop_width: 414px\n";
    let config = AdapterConfig::from_yaml_str(yaml).unwrap();
    let mut a = DeviceAdapter::new(
        FakeEnvironment::new(WINDOWS).with_inner_size(1920, 1080),
        FakeDocument::new().with_frame("#device"),
        config,
    )
    .unwrap();
    a.adjust_container_layout();
    assert_eq!(a.document().frame_property("width"), Some("414px"));
    assert_eq!(a.document().frame_property("height"), Some("844px"));
}

#[test]
fn font_sizes() {
    let a = adapter(FakeEnvironment::new(WINDOWS).with_inner_size(1920, 1080));
    assert_eq!(a.recommended_font_size(16), 19);

    let a = adapter(FakeEnvironment::new(PIXEL).with_inner_size(800, 1280));
    assert_eq!(a.classify(), DeviceClass::LargeMobile);
    assert_eq!(a.recommended_font_size(16), 16);
}

// ---------------------------------------------------------------------------
// Images and touch
// ---------------------------------------------------------------------------

fn image_doc() -> FakeDocument {
    FakeDocument::new()
        .with_image(FakeImage::new(Some("a.png"), Some("a@2x.png"), None))
        .with_image(FakeImage::new(None, Some("b@2x.png"), None))
        .with_image(FakeImage::new(Some("c.png"), Some("c@2x.png"), Some("c@3x.png")))
}

#[test]
fn images_follow_density() {
    let mut a = DeviceAdapter::with_defaults(
        FakeEnvironment::new(IPHONE).with_pixel_ratio(2.0),
        image_doc(),
    )
    .unwrap();
    assert_eq!(a.optimize_images(), 2);
    let images = &a.document().images;
    assert_eq!(images[0].src.as_deref(), Some("a@2x.png"));
    assert_eq!(images[1].src, None);
    assert_eq!(images[2].src.as_deref(), Some("c@2x.png"));

    let mut a = DeviceAdapter::with_defaults(
        FakeEnvironment::new(WINDOWS).with_pixel_ratio(1.0),
        image_doc(),
    )
    .unwrap();
    a.optimize_images();
    assert_eq!(a.document().images[0].src.as_deref(), Some("a.png"));
    assert_eq!(a.document().images[2].src.as_deref(), Some("c.png"));

    let mut a = DeviceAdapter::with_defaults(
        FakeEnvironment::new(IPHONE).with_pixel_ratio(3.0),
        image_doc(),
    )
    .unwrap();
    a.optimize_images();
    assert_eq!(a.document().images[0].src.as_deref(), Some("a@2x.png"));
    assert_eq!(a.document().images[2].src.as_deref(), Some("c@2x.png"));
}

#[test]
fn triple_density_uses_3x_only_without_2x() {
    let doc = FakeDocument::new()
        .with_image(FakeImage::new(Some("d.png"), None, Some("d@3x.png")))
        .with_image(FakeImage::new(Some("e.png"), Some("e@2x.png"), Some("e@3x.png")));
    let mut a =
        DeviceAdapter::with_defaults(FakeEnvironment::new(IPHONE).with_pixel_ratio(3.0), doc)
            .unwrap();
    assert_eq!(a.optimize_images(), 2);
    assert_eq!(a.document().images[0].src.as_deref(), Some("d@3x.png"));
    assert_eq!(a.document().images[1].src.as_deref(), Some("e@2x.png"));
}

#[test]
fn touch_devices_get_feedback() {
    let mut a = DeviceAdapter::with_defaults(
        FakeEnvironment::new(IPHONE).with_touch(true, 5),
        FakeDocument::new().with_touch_targets(4),
    )
    .unwrap();
    a.deferred_setup();

    let doc = a.document();
    assert!(doc.has_class("touch-device"));
    assert_eq!(
        doc.press_feedback,
        vec![(
            r#"button, .clickable, [role="button"]"#.to_string(),
            "scale(0.95)".to_string(),
            "scale(1)".to_string()
        )]
    );
}

#[test]
fn non_touch_devices_are_left_alone() {
    let mut a = DeviceAdapter::with_defaults(
        FakeEnvironment::new(WINDOWS),
        FakeDocument::new().with_touch_targets(4),
    )
    .unwrap();
    assert!(!a.setup_touch_optimization());
    assert!(!a.document().has_class("touch-device"));
    assert!(a.document().press_feedback.is_empty());
}

// ---------------------------------------------------------------------------
// Debounced events
// ---------------------------------------------------------------------------

#[test]
fn spaced_resizes_each_recompute() {
    let mut a = adapter(FakeEnvironment::new(WINDOWS).with_inner_size(1280, 720));
    let mut recomputes = 0;

    for start in [0, 300, 600] {
        a.notify_resize(ms(start));
        recomputes += a.poll(ms(start + 250)).len();
    }
    assert_eq!(recomputes, 3);
}

#[test]
fn burst_of_resizes_collapses() {
    let mut a = adapter(FakeEnvironment::new(IPHONE).with_inner_size(390, 844));
    a.start();

    let mut recomputes = 0;
    for t in [0, 50, 120, 200] {
        a.environment_mut().inner_size = (390 + t as u32, 844);
        a.notify_resize(ms(t));
        recomputes += a.poll(ms(t)).len();
    }
    assert_eq!(recomputes, 0);
    assert!(a.poll(ms(449)).is_empty());
    assert_eq!(a.poll(ms(450)), vec![AdapterEvent::Resize]);
    assert!(a.poll(ms(2000)).is_empty());

    // Only the final size is observed.
    assert_eq!(a.device_info().screen_width, 590);
    assert_eq!(a.classify(), DeviceClass::LargeMobile);
}

#[test]
fn rotation_updates_classes_and_layout() {
    let mut a = adapter(FakeEnvironment::new(IPAD).with_inner_size(600, 1000));
    a.start();
    assert!(a.document().has_class("orientation-portrait"));
    assert_eq!(a.document().frame_property("width"), Some("600px"));
    assert_eq!(a.document().frame_property("height"), Some("800px"));

    a.environment_mut().inner_size = (1000, 600);
    a.notify_orientation_change(ms(1000));
    assert!(a.poll(ms(1099)).is_empty());
    assert_eq!(a.poll(ms(1100)), vec![AdapterEvent::OrientationChange]);

    let doc = a.document();
    assert!(doc.has_class("orientation-landscape"));
    assert!(!doc.has_class("orientation-portrait"));
    assert_class_invariants(doc);
    assert_eq!(doc.frame_property("width"), Some("768px"));
    assert_eq!(doc.frame_property("height"), Some("576px"));
    assert_eq!(a.device_info().orientation(), Orientation::Landscape);
    assert_eq!(a.device_info().screen_width, 1000);
}

#[test]
fn configured_delays_are_honoured() {
    let config = AdapterConfig::from_yaml_str(
        "timing:\n  resize_debounce_ms: 50\n  orientation_debounce_ms: 10\n",
    )
    .unwrap();
    let mut a = DeviceAdapter::new(
        FakeEnvironment::new(WINDOWS).with_inner_size(1280, 720),
        FakeDocument::new(),
        config,
    )
    .unwrap();
    a.notify_resize(ms(0));
    a.notify_orientation_change(ms(0));
    assert_eq!(a.poll(ms(10)), vec![AdapterEvent::OrientationChange]);
    assert_eq!(a.poll(ms(50)), vec![AdapterEvent::Resize]);
}
