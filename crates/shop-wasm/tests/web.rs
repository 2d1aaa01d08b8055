//! Browser tests; run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use shop_core::{CartStorage, CART_STORAGE_KEY};
use shop_wasm::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn dish() -> JsValue {
    let item = serde_json::json!({
        "id": "prod_dish",
        "name": "Dish",
        "price": 19.99,
        "image": "/images/dish.jpg",
        "stripePriceId": "price_dish"
    });
    serde_wasm_bindgen::to_value(&item).unwrap()
}

#[wasm_bindgen_test]
fn add_update_and_clear() {
    clear_cart().unwrap();

    add_to_cart(dish()).unwrap();
    add_to_cart(dish()).unwrap();
    assert_eq!(get_cart_item_count(), 2);
    assert!(is_item_in_cart("prod_dish"));

    update_item_quantity("prod_dish", 5.0).unwrap();
    assert_eq!(get_item_quantity("prod_dish"), 5);
    assert_eq!(
        cart_checkout_body(),
        r#"{"lineItems":[{"price":"price_dish","quantity":5}]}"#
    );

    update_item_quantity("prod_dish", 0.0).unwrap();
    assert!(!is_item_in_cart("prod_dish"));

    clear_cart().unwrap();
    assert_eq!(get_cart_item_count(), 0);
}

#[wasm_bindgen_test]
fn corrupt_storage_reads_as_empty() {
    BrowserStorage::local()
        .set_item(CART_STORAGE_KEY, "{not json")
        .unwrap();
    assert_eq!(get_cart_item_count(), 0);
    clear_cart().unwrap();
}
