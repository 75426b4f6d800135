//! Browser-side tests for the JavaScript facade.

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use network_map_wasm::NetworkMapWasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn object(fields: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in fields {
        Reflect::set(&obj, &JsValue::from_str(key), value).expect("set field");
    }
    obj.into()
}

fn nodes(count: u32) -> JsValue {
    let array = Array::new();
    for id in 0..count {
        array.push(&object(&[("id", id.into()), ("weight", JsValue::from_f64(5000.0))]));
    }
    array.into()
}

fn edges(pairs: &[(u32, u32, &str)]) -> JsValue {
    let array = Array::new();
    for (i, (from, to, kind)) in pairs.iter().enumerate() {
        array.push(&object(&[
            ("id", (i as u32).into()),
            ("from", (*from).into()),
            ("to", (*to).into()),
            ("kind", JsValue::from_str(kind)),
        ]));
    }
    array.into()
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).expect("get field")
}

#[wasm_bindgen_test]
fn test_set_graph_and_positions() {
    let mut map = NetworkMapWasm::new();
    map.set_graph(nodes(4), edges(&[(0, 1, "referral"), (2, 3, "fleet")]))
        .expect("graph decodes");

    assert_eq!(map.cluster_count(), 2);
    let positions = map.positions().to_vec();
    assert_eq!(positions.len(), 8);
    assert!(positions.iter().all(|v| v.is_finite()));
}

#[wasm_bindgen_test]
fn test_unknown_kind_still_lays_out() {
    let mut map = NetworkMapWasm::new();
    map.set_graph(nodes(3), edges(&[(0, 1, "partner"), (1, 2, "referral")]))
        .expect("unknown kinds decode");

    assert_eq!(map.cluster_count(), 1);
    assert_eq!(map.visible_edges(), vec![0, 1]);
    let connections = Array::from(&map.connections_of(0).expect("connections encode"));
    assert_eq!(get(&connections.get(0), "kind").as_string().as_deref(), Some("other"));
}

#[wasm_bindgen_test]
fn test_malformed_graph_is_rejected() {
    let mut map = NetworkMapWasm::new();
    let bad = object(&[("id", JsValue::from_str("not a list"))]);
    assert!(map.set_graph(nodes(2), bad).is_err());
}

#[wasm_bindgen_test]
fn test_with_config_partial_object() {
    let config = object(&[("minDistance", JsValue::from_f64(90.0))]);
    assert!(NetworkMapWasm::with_config(config).is_ok());

    let invalid = object(&[("clusterRingFactor", JsValue::from_f64(2.0))]);
    assert!(NetworkMapWasm::with_config(invalid).is_err());
}

#[wasm_bindgen_test]
fn test_drag_round_trip() {
    let mut map = NetworkMapWasm::new();
    map.set_graph(nodes(3), edges(&[])).expect("graph decodes");

    assert!(map.pointer_down(1));
    assert!(map.is_dragging());
    assert!(map.pointer_move(50.0, 50.0));
    assert!(map.pointer_up());
    assert_eq!(map.get_position(1), Some(vec![50.0, 50.0]));

    map.set_filter(&[1, 2]);
    assert_eq!(map.get_position(1), Some(vec![50.0, 50.0]));

    assert!(!map.set_override(1, f32::NAN, 10.0));
    assert_eq!(map.get_position(1), Some(vec![50.0, 50.0]));

    map.reset_layout();
    assert_ne!(map.get_position(1), Some(vec![50.0, 50.0]));
}

#[wasm_bindgen_test]
fn test_override_reads_back_as_f32() {
    let mut map = NetworkMapWasm::new();
    map.set_graph(nodes(2), edges(&[])).expect("graph decodes");

    assert!(map.set_override(0, 50.1, 50.1));
    let position = map.get_position(0).expect("overridden");
    assert_eq!(position, vec![50.1_f32, 50.1_f32]);
    assert_ne!(f64::from(position[0]), 50.1_f64);
}

#[wasm_bindgen_test]
fn test_queries_serialize() {
    let mut map = NetworkMapWasm::new();
    map.set_graph(nodes(3), edges(&[(0, 1, "referral"), (1, 2, "referral")]))
        .expect("graph decodes");

    let stats = map.stats().expect("stats encode");
    assert_eq!(get(&stats, "referralLinks").as_f64(), Some(2.0));
    assert_eq!(get(&stats, "clusters").as_f64(), Some(1.0));

    let chain = Array::from(&map.referral_chain(2).expect("chain encodes"));
    assert_eq!(chain.length(), 3);

    let connections = Array::from(&map.connections_of(1).expect("connections encode"));
    assert_eq!(connections.length(), 2);
    assert_eq!(get(&connections.get(0), "isSource").as_bool(), Some(false));

    map.pointer_hover(Some(0));
    let highlight = map.highlight().expect("highlight encodes");
    assert_eq!(Array::from(&get(&highlight, "nodes")).length(), 2);
}

#[wasm_bindgen_test]
fn test_degenerate_canvas_gives_empty_positions() {
    let mut map = NetworkMapWasm::new();
    map.set_graph(nodes(2), edges(&[])).expect("graph decodes");
    map.resize(0.0, 600.0);
    assert_eq!(map.positions().length(), 0);
}
