//! # Cart Store
//!
//! Storage-backed cart. Every mutation reads the whole persisted cart,
//! applies one change, recomputes totals, writes the whole cart back and
//! notifies observers.
//!
//! The storage port mirrors the Web Storage API so the browser build can
//! plug in `localStorage` while native code and tests use [`MemoryStorage`].
//!
//! Two writers sharing one storage key (two browser tabs) are not
//! coordinated: each mutation is read-modify-write and the last write wins.

use crate::cart::{Cart, NewCartItem};
use crate::checkout::CheckoutLineItem;
use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key holding the serialized cart
pub const CART_STORAGE_KEY: &str = "satellite_spectrum_cart";

/// Key/value persistence port (Web Storage shaped)
pub trait CartStorage {
    /// Read a value; `Ok(None)` when the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Receives the cart after every successful mutation
pub trait CartObserver {
    fn cart_updated(&self, cart: &Cart);
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::WriteRejected(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage for contexts without a browser (server rendering).
///
/// Reads report [`StorageError::Unavailable`]; writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl CartStorage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Why `CartStore::load` could not produce the stored cart
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartLoadError {
    #[error("cart storage unavailable: {0}")]
    Unavailable(#[from] StorageError),

    #[error("stored cart is malformed: {0}")]
    Malformed(String),
}

/// The cart, bound to a storage backend and its observers
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: String,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: CartStorage> CartStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            observers: Vec::new(),
        }
    }

    /// Builder: register an observer
    pub fn with_observer(mut self, observer: impl CartObserver + 'static) -> Self {
        self.subscribe(observer);
        self
    }

    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the stored cart, telling "empty" apart from "broken".
    ///
    /// An absent key is initialised with an empty cart and reads as `Ok`.
    pub fn load(&self) -> Result<Cart, CartLoadError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => serde_json::from_str::<Cart>(&raw)
                .map(Cart::normalized)
                .map_err(|e| CartLoadError::Malformed(e.to_string())),
            None => {
                let empty = Cart::empty();
                if let Err(e) = self.write(&empty) {
                    debug!("Could not initialise cart storage: {}", e);
                }
                Ok(empty)
            }
        }
    }

    /// The current cart; an empty cart if storage is unavailable or malformed
    pub fn get(&self) -> Cart {
        match self.load() {
            Ok(cart) => cart,
            Err(CartLoadError::Unavailable(e)) => {
                debug!("Cart storage unavailable, using empty cart: {}", e);
                Cart::empty()
            }
            Err(e) => {
                warn!("Error parsing cart data: {}", e);
                Cart::empty()
            }
        }
    }

    /// Add one unit of a product
    pub fn add(&self, item: impl Into<NewCartItem>) -> Result<Cart, StorageError> {
        let item = item.into();
        self.mutate(|cart| cart.add(item))
    }

    /// Remove a product entirely
    pub fn remove(&self, item_id: &str) -> Result<Cart, StorageError> {
        self.mutate(|cart| cart.remove(item_id))
    }

    /// Set a product's quantity; zero or negative removes it
    pub fn set_quantity(&self, item_id: &str, quantity: i64) -> Result<Cart, StorageError> {
        self.mutate(|cart| cart.set_quantity(item_id, quantity))
    }

    /// Replace the cart with an empty one
    pub fn clear(&self) -> Result<Cart, StorageError> {
        let empty = Cart::empty();
        self.commit(empty)
    }

    /// Total units in the cart
    pub fn count(&self) -> u32 {
        self.get().item_count
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.get().get(item_id).is_some()
    }

    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.get().quantity_of(item_id)
    }

    /// Cart contents in the shape the cart checkout endpoint expects
    pub fn line_items(&self) -> Vec<CheckoutLineItem> {
        self.get().line_items()
    }

    fn mutate(&self, change: impl FnOnce(&mut Cart)) -> Result<Cart, StorageError> {
        let mut cart = self.get();
        change(&mut cart);
        cart.recalculate();
        self.commit(cart)
    }

    fn commit(&self, cart: Cart) -> Result<Cart, StorageError> {
        self.write(&cart)?;
        for observer in &self.observers {
            observer.cart_updated(&cart);
        }
        Ok(cart)
    }

    fn write(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)
            .map_err(|e| StorageError::WriteRejected(e.to_string()))?;
        self.storage.set_item(&self.key, &raw)
    }
}
