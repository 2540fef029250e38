//! Browser implementations of the `ssm-core` capabilities.
//!
//! The Google Maps shim lives in `assets/js/school-map.js` and is evaluated
//! as a global (no ES modules), exposing `window.schoolMap.*`. Calls that
//! carry data go through `js_sys::Reflect` so strings never need escaping;
//! fire-and-forget calls use `call_js`, wrapped in try/catch.

use futures::future::LocalBoxFuture;
use js_sys::{Array, Function, Object, Promise, Reflect};
use ssm_core::capability::{EventCallback, MapCapability, MarkerEvent, Sleeper, TabularSource};
use ssm_core::LoadError;
use ssm_schools::{parse_rows, Coordinates, RawRow};
use std::collections::HashMap;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

// Embed the map shim at compile time
static SCHOOL_MAP_JS: &str = include_str!("../assets/js/school-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('SSM JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate a JS expression and read it as a boolean (false on any error).
fn eval_bool(expr: &str) -> bool {
    js_sys::eval(&format!("(function() {{ try {{ return !!({}); }} catch(e) {{ return false; }} }})()", expr))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Evaluate the map shim and inject the Google Maps script tag.
/// Call once at app startup; the library then loads asynchronously.
pub fn load_map_scripts(api_key: &str) {
    let _ = js_sys::eval(SCHOOL_MAP_JS);
    if api_key.is_empty() {
        log::warn!("js_bridge: no Google Maps API key configured");
    }
    if let Err(e) = call_shim("loadLibrary", &[JsValue::from_str(api_key)]) {
        log::error!("js_bridge: could not inject Google Maps script: {}", describe(&e));
    }
}

fn shim() -> Result<Object, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let value = Reflect::get(&window, &JsValue::from_str("schoolMap"))?;
    value
        .dyn_into::<Object>()
        .map_err(|_| JsValue::from_str("window.schoolMap is not loaded"))
}

/// Call `window.schoolMap[method](...args)`.
fn call_shim(method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let shim = shim()?;
    let function: Function = Reflect::get(&shim, &JsValue::from_str(method))?.dyn_into()?;
    let array = args.iter().collect::<Array>();
    function.apply(&shim, &array)
}

/// Best-effort text for a thrown JS value.
fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

/// The Google Maps widget, reached through `window.schoolMap`.
///
/// Marker handles are the numeric ids the shim hands out. Event closures
/// are kept alive here until their marker is removed.
#[derive(Default)]
pub struct JsMap {
    closures: HashMap<u32, Vec<Closure<dyn Fn()>>>,
}

impl JsMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapCapability for JsMap {
    type Marker = u32;

    fn is_ready(&self) -> bool {
        eval_bool("window.schoolMap && window.schoolMap.isReady()")
    }

    fn construct_display(
        &mut self,
        container_id: &str,
        center: Coordinates,
        zoom: u8,
    ) -> Result<(), LoadError> {
        let created = call_shim(
            "init",
            &[
                JsValue::from_str(container_id),
                JsValue::from_f64(center.lat),
                JsValue::from_f64(center.lng),
                JsValue::from_f64(f64::from(zoom)),
            ],
        )
        .map_err(|e| LoadError::Display(describe(&e)))?;
        if created.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(LoadError::Display(format!(
                "no element #{} or Google Maps not loaded",
                container_id
            )))
        }
    }

    fn create_marker(&mut self, position: Coordinates, icon: &str, title: &str) -> u32 {
        let result = call_shim(
            "createMarker",
            &[
                JsValue::from_f64(position.lat),
                JsValue::from_f64(position.lng),
                JsValue::from_str(icon),
                JsValue::from_str(title),
            ],
        );
        match result {
            Ok(id) => id.as_f64().map(|id| id as u32).unwrap_or(0),
            Err(e) => {
                log::error!("js_bridge: createMarker failed for {}: {}", title, describe(&e));
                0
            }
        }
    }

    fn bind_event(&mut self, marker: &u32, event: MarkerEvent, callback: EventCallback) {
        let kind = match event {
            MarkerEvent::Hover => "hover",
            MarkerEvent::Click => "click",
        };
        let closure = Closure::<dyn Fn()>::new(move || callback());
        let result = call_shim(
            "bindEvent",
            &[
                JsValue::from(*marker),
                JsValue::from_str(kind),
                closure.as_ref().clone(),
            ],
        );
        if let Err(e) = result {
            log::error!("js_bridge: bindEvent failed: {}", describe(&e));
            return;
        }
        self.closures.entry(*marker).or_default().push(closure);
    }

    fn open_popup(&mut self, html: &str, anchor: &u32) {
        if let Err(e) = call_shim("openPopup", &[JsValue::from_str(html), JsValue::from(*anchor)]) {
            log::warn!("js_bridge: openPopup failed: {}", describe(&e));
        }
    }

    fn pan_to(&mut self, position: Coordinates) {
        call_js(&format!(
            "window.schoolMap.panTo({}, {});",
            position.lat, position.lng
        ));
    }

    fn set_zoom(&mut self, level: u8) {
        call_js(&format!("window.schoolMap.setZoom({});", level));
    }

    fn remove_marker(&mut self, marker: &u32) {
        call_js(&format!("window.schoolMap.removeMarker({});", marker));
        self.closures.remove(marker);
    }
}

/// CSV over `fetch`, parsed with `ssm_schools::parse_rows`.
#[derive(Default, Clone, Copy)]
pub struct HttpCsvSource;

impl TabularSource for HttpCsvSource {
    fn is_ready(&self) -> bool {
        eval_bool("typeof window.fetch === 'function'")
    }

    fn fetch_rows<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Vec<RawRow>, LoadError>> {
        Box::pin(async move {
            let text = fetch_text(url).await?;
            Ok(parse_rows(&text)?)
        })
    }
}

/// Fetch a URL and return the body as text.
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .and_then(|value| value.dyn_into())
        .map_err(|e| LoadError::Fetch(describe(&e)))?;
    if !response.ok() {
        return Err(LoadError::Fetch(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }
    let text_promise = response.text().map_err(|e| LoadError::Fetch(describe(&e)))?;
    JsFuture::from(text_promise)
        .await
        .map_err(|e| LoadError::Fetch(describe(&e)))?
        .as_string()
        .ok_or_else(|| LoadError::Fetch("response body is not text".to_string()))
}

/// `setTimeout` wrapped in a promise.
#[derive(Default, Clone, Copy)]
pub struct JsSleeper;

impl Sleeper for JsSleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().and_then(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .ok()
            });
            if scheduled.is_none() {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        Box::pin(async move {
            let _ = JsFuture::from(promise).await;
        })
    }
}
