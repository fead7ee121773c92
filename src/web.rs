//! Browser bindings over `web-sys`.
//!
//! `BrowserEnvironment` and `BrowserDocument` back the adapter with the live
//! page; `attach` wires the native `resize` and `orientationchange` events to
//! it through a single timer armed at the earliest debounce deadline.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use js_sys::Reflect;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::AdapterConfig;
use crate::device_adapter::DeviceAdapter;
use crate::environment::{DocumentWriter, Environment};
use crate::error::{Error, Result};
use crate::types::{FrameStyle, ImageSources};

type JsResult<T> = std::result::Result<T, JsValue>;

pub type BrowserAdapter = DeviceAdapter<BrowserEnvironment, BrowserDocument>;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub struct BrowserEnvironment {
    window: Window,
}

impl BrowserEnvironment {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

/// Positive finite JS number as a pixel count, 0 otherwise.
fn pixels(value: JsResult<JsValue>) -> u32 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v as u32)
        .unwrap_or(0)
}

impl Environment for BrowserEnvironment {
    fn user_agent(&self) -> String {
        self.window.navigator().user_agent().unwrap_or_default()
    }

    fn screen_size(&self) -> (u32, u32) {
        match self.window.screen() {
            Ok(screen) => (
                screen.width().map(|w| w.max(0) as u32).unwrap_or(0),
                screen.height().map(|h| h.max(0) as u32).unwrap_or(0),
            ),
            Err(_) => (0, 0),
        }
    }

    fn screen_orientation(&self) -> Option<String> {
        let screen = self.window.screen().ok()?;
        let orientation = Reflect::get(&screen, &JsValue::from_str("orientation")).ok()?;
        if orientation.is_undefined() || orientation.is_null() {
            return None;
        }
        Reflect::get(&orientation, &JsValue::from_str("type"))
            .ok()?
            .as_string()
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        Some(self.window.device_pixel_ratio())
    }

    fn inner_size(&self) -> (u32, u32) {
        (
            pixels(self.window.inner_width()),
            pixels(self.window.inner_height()),
        )
    }

    fn has_touch_events(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
    }

    fn max_touch_points(&self) -> u32 {
        self.window.navigator().max_touch_points().max(0) as u32
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

pub struct BrowserDocument {
    document: Document,
    /// `<img>` elements seen by the last `image_sources` call.
    images: Vec<Element>,
}

impl BrowserDocument {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            images: Vec::new(),
        }
    }

    fn try_set_viewport(&self, content: &str) -> JsResult<()> {
        let meta = match self.document.query_selector(r#"meta[name="viewport"]"#)? {
            Some(meta) => meta,
            None => {
                let meta = self.document.create_element("meta")?;
                meta.set_attribute("name", "viewport")?;
                if let Some(head) = self.document.head() {
                    head.append_child(&meta)?;
                }
                meta
            }
        };
        meta.set_attribute("content", content)
    }

    fn try_append_style(&self, css: &str) -> JsResult<()> {
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(css));
        if let Some(head) = self.document.head() {
            head.append_child(&style)?;
        }
        Ok(())
    }

    fn try_apply_frame_style(&self, selector: &str, style: &FrameStyle) -> JsResult<bool> {
        let Some(element) = self.document.query_selector(selector)? else {
            return Ok(false);
        };
        let element: HtmlElement = element.dyn_into()?;
        let declaration = element.style();
        for (name, value) in style.properties() {
            declaration.set_property(name, value)?;
        }
        Ok(true)
    }

    fn query_images(&self) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all("img") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn try_attach_press_feedback(
        &self,
        selector: &str,
        pressed: &str,
        released: &str,
    ) -> JsResult<usize> {
        let nodes = self.document.query_selector_all(selector)?;
        let mut wired = 0;
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            listen_transform(&element, "touchstart", pressed)?;
            listen_transform(&element, "touchend", released)?;
            wired += 1;
        }
        Ok(wired)
    }
}

/// Set `transform` on `element` whenever `event` fires on it. The listener
/// lives as long as the page.
fn listen_transform(element: &HtmlElement, event: &str, transform: &str) -> JsResult<()> {
    let target = element.clone();
    let transform = transform.to_string();
    let listener = Closure::wrap(Box::new(move || {
        if let Err(err) = target.style().set_property("transform", &transform) {
            warn!(error = ?err, "failed to set touch transform");
        }
    }) as Box<dyn FnMut()>);
    element.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

impl DocumentWriter for BrowserDocument {
    fn set_viewport_content(&mut self, content: &str) {
        if let Err(err) = self.try_set_viewport(content) {
            warn!(error = ?err, "failed to configure viewport meta");
        }
    }

    fn append_style(&mut self, css: &str) {
        if let Err(err) = self.try_append_style(css) {
            warn!(error = ?err, "failed to inject style block");
        }
    }

    fn remove_body_classes(&mut self, classes: &[&str]) {
        let Some(body) = self.document.body() else {
            return;
        };
        let list = body.class_list();
        for class in classes {
            if let Err(err) = list.remove_1(class) {
                warn!(error = ?err, class, "failed to remove body class");
            }
        }
    }

    fn add_body_class(&mut self, class: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(err) = body.class_list().add_1(class) {
            warn!(error = ?err, class, "failed to add body class");
        }
    }

    fn apply_frame_style(&mut self, selector: &str, style: &FrameStyle) -> bool {
        self.try_apply_frame_style(selector, style)
            .unwrap_or_else(|err| {
                warn!(error = ?err, selector, "failed to style frame");
                false
            })
    }

    fn image_sources(&mut self) -> Vec<ImageSources> {
        self.images = self.query_images();
        self.images
            .iter()
            .map(|img| ImageSources {
                base: img.get_attribute("data-src"),
                x2: img.get_attribute("data-src2x"),
                x3: img.get_attribute("data-src3x"),
            })
            .collect()
    }

    fn set_image_src(&mut self, index: usize, src: &str) {
        if let Some(img) = self.images.get(index) {
            if let Err(err) = img.set_attribute("src", src) {
                warn!(error = ?err, src, "failed to set image src");
            }
        }
    }

    fn attach_press_feedback(&mut self, selector: &str, pressed: &str, released: &str) -> usize {
        self.try_attach_press_feedback(selector, pressed, released)
            .unwrap_or_else(|err| {
                warn!(error = ?err, selector, "failed to attach touch feedback");
                0
            })
    }
}

// ---------------------------------------------------------------------------
// Event wiring
// ---------------------------------------------------------------------------

/// An attached adapter plus the one timer that drives its debouncers.
pub struct Runtime {
    window: Window,
    adapter: RefCell<BrowserAdapter>,
    timer: Cell<Option<i32>>,
}

impl Runtime {
    pub fn adapter(&self) -> &RefCell<BrowserAdapter> {
        &self.adapter
    }
}

fn now(window: &Window) -> Duration {
    let ms = window.performance().map(|p| p.now()).unwrap_or(0.0);
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

/// Clear the pending timer and, if a debounce deadline is pending, arm a new
/// one for it. A callback that runs early just re-arms.
fn rearm(rt: &Rc<Runtime>) {
    if let Some(handle) = rt.timer.take() {
        rt.window.clear_timeout_with_handle(handle);
    }
    let Some(deadline) = rt.adapter.borrow().next_deadline() else {
        return;
    };
    let wait = deadline.saturating_sub(now(&rt.window));
    let wait_ms = (wait.as_secs_f64() * 1000.0).ceil().min(f64::from(i32::MAX)) as i32;

    let next = Rc::clone(rt);
    let callback = Closure::once_into_js(move || {
        next.timer.set(None);
        let at = now(&next.window);
        next.adapter.borrow_mut().poll(at);
        rearm(&next);
    });
    match rt
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), wait_ms)
    {
        Ok(handle) => rt.timer.set(Some(handle)),
        Err(err) => warn!(error = ?err, "failed to arm debounce timer"),
    }
}

fn listen(target: &web_sys::EventTarget, event: &str, handler: impl FnMut() + 'static) -> Result<()> {
    let listener = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    target
        .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        .map_err(|_| Error::Unavailable("event listener registration"))?;
    listener.forget();
    Ok(())
}

/// Build an adapter for the current page, run its load-time setup, schedule
/// the deferred image/touch pass and subscribe to viewport events.
pub fn attach(config: AdapterConfig) -> Result<Rc<Runtime>> {
    let window = web_sys::window().ok_or(Error::Unavailable("window"))?;
    let document = window.document().ok_or(Error::Unavailable("document"))?;
    let deferred_ms = config
        .timing
        .deferred_setup()
        .as_millis()
        .min(i32::MAX as u128) as i32;

    let adapter = DeviceAdapter::new(
        BrowserEnvironment::new(window.clone()),
        BrowserDocument::new(document),
        config,
    )?;
    let rt = Rc::new(Runtime {
        window: window.clone(),
        adapter: RefCell::new(adapter),
        timer: Cell::new(None),
    });
    rt.adapter.borrow_mut().start();

    let deferred = Rc::clone(&rt);
    let callback = Closure::once_into_js(move || {
        deferred.adapter.borrow_mut().deferred_setup();
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), deferred_ms)
        .map_err(|_| Error::Unavailable("setTimeout"))?;

    let on_resize = Rc::clone(&rt);
    listen(&window, "resize", move || {
        let at = now(&on_resize.window);
        on_resize.adapter.borrow_mut().notify_resize(at);
        rearm(&on_resize);
    })?;

    let on_orientation = Rc::clone(&rt);
    listen(&window, "orientationchange", move || {
        let at = now(&on_orientation.window);
        on_orientation.adapter.borrow_mut().notify_orientation_change(at);
        rearm(&on_orientation);
    })?;

    Ok(rt)
}

/// Attach on `DOMContentLoaded`, or right away if the document is already
/// past the loading state.
pub fn install(config: AdapterConfig) -> Result<()> {
    let window = web_sys::window().ok_or(Error::Unavailable("window"))?;
    let document = window.document().ok_or(Error::Unavailable("document"))?;

    if document.ready_state() != "loading" {
        attach(config)?;
        return Ok(());
    }

    let callback = Closure::once_into_js(move || {
        if let Err(err) = attach(config) {
            warn!(error = %err, "device adapter failed to attach");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|_| Error::Unavailable("DOMContentLoaded listener"))
}

/// JS entry point: install with the default configuration, or with a YAML
/// configuration string when one is given.
#[wasm_bindgen(js_name = installDeviceAdapter)]
pub fn install_device_adapter(config_yaml: Option<String>) -> JsResult<()> {
    let config = match config_yaml {
        Some(yaml) => AdapterConfig::from_yaml_str(&yaml),
        None => Ok(AdapterConfig::default()),
    }
    .map_err(|err| JsValue::from_str(&err.to_string()))?;
    install(config).map_err(|err| JsValue::from_str(&err.to_string()))
}
