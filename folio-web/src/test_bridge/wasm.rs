use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{BRIDGE_GLOBAL, test_mode_requested};
use crate::app::{Site, with_site};
use crate::dom;

struct BridgeBindings {
    state: Closure<dyn FnMut() -> JsValue>,
    open: Closure<dyn FnMut(JsValue) -> bool>,
    step: Closure<dyn FnMut(JsValue) -> bool>,
    close: Closure<dyn FnMut() -> JsValue>,
    toggle_nav: Closure<dyn FnMut() -> JsValue>,
}

thread_local! {
    static BRIDGE: RefCell<Option<BridgeBindings>> = const { RefCell::new(None) };
}

fn test_mode_enabled() -> bool {
    dom::window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| test_mode_requested(&search))
}

fn snapshot_value(site: &Site) -> JsValue {
    site.snapshot()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

fn build_bridge() -> BridgeBindings {
    let state = Closure::wrap(Box::new(move || {
        with_site(snapshot_value).unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let open = Closure::wrap(Box::new(move |value: JsValue| {
        let Some(index) = super::index_arg(value.as_f64()) else {
            return false;
        };
        with_site(|site| site.lightbox().is_some_and(|lb| lb.open(index))).unwrap_or(false)
    }) as Box<dyn FnMut(JsValue) -> bool>);

    let step = Closure::wrap(Box::new(move |value: JsValue| {
        let direction = value.as_f64().map_or(1, |v| if v < 0.0 { -1 } else { 1 });
        with_site(|site| site.lightbox().is_some_and(|lb| lb.step(direction))).unwrap_or(false)
    }) as Box<dyn FnMut(JsValue) -> bool>);

    let close = Closure::wrap(Box::new(move || {
        with_site(|site| site.lightbox().and_then(|lb| lb.close()))
            .flatten()
            .map_or(JsValue::NULL, |index| JsValue::from_f64(index as f64))
    }) as Box<dyn FnMut() -> JsValue>);

    let toggle_nav = Closure::wrap(Box::new(move || {
        with_site(|site| site.nav().map(|nav| nav.toggle().is_expanded()))
            .flatten()
            .map_or(JsValue::NULL, JsValue::from_bool)
    }) as Box<dyn FnMut() -> JsValue>);

    BridgeBindings {
        state,
        open,
        step,
        close,
        toggle_nav,
    }
}

fn attach_bridge(bindings: &BridgeBindings) -> Result<(), JsValue> {
    let window = dom::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let bridge = js_sys::Object::new();
    let entries: [(&str, &JsValue); 5] = [
        ("state", bindings.state.as_ref()),
        ("open", bindings.open.as_ref()),
        ("step", bindings.step.as_ref()),
        ("close", bindings.close.as_ref()),
        ("toggleNav", bindings.toggle_nav.as_ref()),
    ];
    for (name, func) in entries {
        js_sys::Reflect::set(&bridge, &JsValue::from_str(name), func)?;
    }
    js_sys::Reflect::set(&window, &JsValue::from_str(BRIDGE_GLOBAL), &bridge)?;
    Ok(())
}

pub fn install_test_bridge() {
    if !test_mode_enabled() {
        return;
    }
    let bindings = build_bridge();
    if let Err(err) = attach_bridge(&bindings) {
        log::warn!("test bridge not attached: {}", dom::js_error_message(&err));
        return;
    }
    log::info!("test bridge attached as window.{BRIDGE_GLOBAL}");
    BRIDGE.with(|slot| slot.replace(Some(bindings)));
}
