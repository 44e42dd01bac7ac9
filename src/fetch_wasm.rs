//! WASM polling client for `/api/lidar-data`
//!
//! A `setInterval` timer fires the update cycle once per second. Each tick
//! spawns a fetch; whichever response lands is applied to the shared scene.
//! Ticks never wait for earlier fetches and no fetch is ever cancelled.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::core::{parse_sweep, FetchError, Scene, Sweep, UPDATE_PERIOD_MS};

/// Scene shared between the poll callbacks and the render loop
pub type SharedScene = Rc<RefCell<Scene>>;

/// Periodic sweep poller, stops when dropped
pub struct SweepPoller {
    interval_id: i32,
    #[allow(dead_code)]
    on_tick: Closure<dyn FnMut()>,
}

impl SweepPoller {
    /// Fetch once immediately, then every `UPDATE_PERIOD_MS`
    pub fn start(url: &str, scene: SharedScene) -> Result<Self, JsValue> {
        info!(url, period_ms = UPDATE_PERIOD_MS, "Starting sweep polling");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let url = url.to_string();
        let on_tick = Closure::wrap(Box::new(move || {
            let url = url.clone();
            let scene = scene.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_sweep(&url).await;
                scene.borrow_mut().apply_update(result);
            });
        }) as Box<dyn FnMut()>);

        let tick_fn: &js_sys::Function = on_tick.as_ref().unchecked_ref();
        tick_fn.call0(&JsValue::NULL)?;
        let interval_id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(tick_fn, UPDATE_PERIOD_MS)?;

        Ok(Self {
            interval_id,
            on_tick,
        })
    }
}

impl Drop for SweepPoller {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.interval_id);
            debug!(interval_id = self.interval_id, "Sweep polling stopped");
        }
    }
}

/// One update-cycle request. No timeout: a hung request just never resolves.
async fn fetch_sweep(url: &str) -> Result<Sweep, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Transport("no window".into()))?;

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_transport)?
        .dyn_into()
        .map_err(js_transport)?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(js_transport)?)
        .await
        .map_err(js_transport)?
        .as_string()
        .ok_or_else(|| FetchError::Transport("response body is not text".into()))?;

    parse_sweep(&body)
}

fn js_transport(e: JsValue) -> FetchError {
    let msg = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_else(|| format!("{:?}", e));
    debug!(error = %msg, "Sweep fetch rejected");
    FetchError::Transport(msg)
}
