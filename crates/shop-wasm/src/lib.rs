//! # shop-wasm
//!
//! WebAssembly bindings for the storefront cart.
//!
//! The cart lives in `window.localStorage` under `satellite_spectrum_cart`.
//! Every mutation writes the whole cart back and dispatches a `cartUpdated`
//! `CustomEvent` on `window` whose `detail` is the updated cart. The event
//! is same-page only; other tabs are not notified.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { addToCart, getCart, cartCheckoutBody } from 'shop-wasm';
//!
//! await init();
//!
//! window.addEventListener('cartUpdated', (e) => renderBadge(e.detail.itemCount));
//!
//! addToCart({ id: 'prod_dish', name: 'Dish', price: 19.99, image: '/dish.jpg', stripePriceId: 'price_dish' });
//!
//! const res = await fetch('/api/create-cart-checkout-session', {
//!   method: 'POST',
//!   headers: { 'Content-Type': 'application/json' },
//!   body: cartCheckoutBody(),
//! });
//! window.location.href = (await res.json()).url;
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use serde::Serialize;
use shop_core::{Cart, CartObserver, CartStorage, CartStore, NewCartItem, StorageError};
use wasm_bindgen::prelude::*;

/// Name of the DOM event fired after every cart mutation
pub const CART_UPDATED_EVENT: &str = "cartUpdated";

/// `window.localStorage`, or nothing outside a browser
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl CartStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::ReadFailed(describe(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Without a window there is nothing to persist to
        let Some(storage) = self.storage.as_ref() else {
            return Ok(());
        };
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected(describe(&e)))
    }
}

/// Fires `cartUpdated` on `window`
pub struct CartEventDispatcher;

impl CartObserver for CartEventDispatcher {
    fn cart_updated(&self, cart: &Cart) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let dispatched = to_js(cart).and_then(|detail| {
            let init = web_sys::CustomEventInit::new();
            init.set_detail(&detail);
            let event = web_sys::CustomEvent::new_with_event_init_dict(CART_UPDATED_EVENT, &init)?;
            window.dispatch_event(&event)
        });

        if let Err(e) = dispatched {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Failed to dispatch {}: {}",
                CART_UPDATED_EVENT,
                describe(&e)
            )));
        }
    }
}

fn store() -> CartStore<BrowserStorage> {
    CartStore::new(BrowserStorage::local()).with_observer(CartEventDispatcher)
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

fn storage_error(err: StorageError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// JS numbers to a signed quantity; NaN and infinities count as zero
fn quantity_from_js(quantity: f64) -> i64 {
    if quantity.is_finite() {
        quantity.trunc() as i64
    } else {
        0
    }
}

/// Body for `POST /api/create-cart-checkout-session`
pub fn checkout_body(cart: &Cart) -> String {
    serde_json::json!({ "lineItems": cart.line_items() }).to_string()
}

/// Format a decimal amount for display
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

// =============================================================================
// JavaScript API
// =============================================================================

/// The current cart (empty if storage is missing or corrupt)
#[wasm_bindgen(js_name = getCart)]
pub fn get_cart() -> Result<JsValue, JsValue> {
    to_js(&store().get())
}

/// Add one unit of a product: `{ id, name, price, image, stripePriceId }`
#[wasm_bindgen(js_name = addToCart)]
pub fn add_to_cart(item: JsValue) -> Result<JsValue, JsValue> {
    let item: NewCartItem = serde_wasm_bindgen::from_value(item)
        .map_err(|e| js_sys::Error::new(&format!("Invalid cart item: {}", e)))?;
    let cart = store().add(item).map_err(storage_error)?;
    to_js(&cart)
}

#[wasm_bindgen(js_name = removeFromCart)]
pub fn remove_from_cart(item_id: &str) -> Result<JsValue, JsValue> {
    let cart = store().remove(item_id).map_err(storage_error)?;
    to_js(&cart)
}

/// Set a quantity; zero or negative removes the item
#[wasm_bindgen(js_name = updateItemQuantity)]
pub fn update_item_quantity(item_id: &str, quantity: f64) -> Result<JsValue, JsValue> {
    let cart = store()
        .set_quantity(item_id, quantity_from_js(quantity))
        .map_err(storage_error)?;
    to_js(&cart)
}

#[wasm_bindgen(js_name = clearCart)]
pub fn clear_cart() -> Result<JsValue, JsValue> {
    let cart = store().clear().map_err(storage_error)?;
    to_js(&cart)
}

#[wasm_bindgen(js_name = getCartItemCount)]
pub fn get_cart_item_count() -> u32 {
    store().count()
}

#[wasm_bindgen(js_name = isItemInCart)]
pub fn is_item_in_cart(item_id: &str) -> bool {
    store().contains(item_id)
}

#[wasm_bindgen(js_name = getItemQuantity)]
pub fn get_item_quantity(item_id: &str) -> u32 {
    store().quantity_of(item_id)
}

/// JSON body for the cart checkout endpoint
#[wasm_bindgen(js_name = cartCheckoutBody)]
pub fn cart_checkout_body() -> String {
    checkout_body(&store().get())
}

#[wasm_bindgen(js_name = formatPrice)]
pub fn format_price(amount: f64) -> String {
    format_amount(amount)
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
