use folio_core::{load_scene_from_slice, SceneLoad, SceneLoadError};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let win = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_val = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_val.dyn_into().map_err(js_err)?;

    if !resp.ok() {
        anyhow::bail!("HTTP {} {}", resp.status(), resp.status_text());
    }

    let buf_promise = resp.array_buffer().map_err(js_err)?;
    let buf_val = JsFuture::from(buf_promise).await.map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buf_val).to_vec())
}

/// Fetch and parse the scene bundle in the background; `target` moves from
/// `Pending` to `Loaded` or `Failed` when done. There is no retry.
pub fn spawn_scene_load(path: &'static str, target: Rc<RefCell<SceneLoad>>) {
    spawn_local(async move {
        let started = Instant::now();
        let result = match fetch_bytes(path).await {
            Ok(bytes) => load_scene_from_slice(&bytes),
            Err(e) => Err(SceneLoadError::Fetch(format!("{:#}", e))),
        };
        match &result {
            Ok(scene) => log::info!(
                "[scene] loaded {} nodes={} primitives={} interactive={:?} in {:.0}ms",
                path,
                scene.graph.node_count(),
                scene.graph.primitives().len(),
                scene.registry_names(),
                started.elapsed().as_secs_f64() * 1000.0
            ),
            Err(e) => log::error!("[scene] failed to load {}: {}", path, e),
        }
        *target.borrow_mut() = SceneLoad::from_result(result);
    });
}
