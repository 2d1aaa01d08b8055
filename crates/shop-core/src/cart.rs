//! # Cart Types
//!
//! The client-held cart and its derived totals.
//! Serialized as `{ items, total, itemCount }` in browser storage.

use crate::checkout::CheckoutLineItem;
use crate::product::ProcessedProduct;
use serde::{Deserialize, Deserializer, Serialize};

/// A product line in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id (unique within the cart)
    pub id: String,

    /// Product name (denormalized for display)
    pub name: String,

    /// Unit price in decimal currency units
    pub price: f64,

    /// Image URL
    pub image: String,

    /// Provider price reference
    #[serde(rename = "stripePriceId")]
    pub price_id: String,

    /// Quantity, always at least 1 once persisted
    #[serde(deserialize_with = "lenient_count")]
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A cart item before it has a quantity, as passed to `CartStore::add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    #[serde(rename = "stripePriceId")]
    pub price_id: String,
}

impl NewCartItem {
    pub(crate) fn with_quantity(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            price_id: self.price_id,
            quantity,
        }
    }
}

impl From<&ProcessedProduct> for NewCartItem {
    fn from(product: &ProcessedProduct) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            price_id: product.price_id.clone(),
        }
    }
}

/// The shopping cart
///
/// `total` and `item_count` are derived from `items`; every mutation goes
/// through [`Cart::recalculate`] rather than patching them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in insertion order
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Σ price × quantity
    #[serde(default)]
    pub total: f64,

    /// Σ quantity
    #[serde(default, deserialize_with = "lenient_count")]
    pub item_count: u32,
}

/// Read a stored count that may be negative, fractional or not a number.
///
/// Positive values truncate toward zero and saturate at `u32::MAX`; anything
/// else reads as 0, which [`Cart::normalized`] then drops.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value.as_f64() {
        Some(n) if n.is_finite() && n >= 1.0 => n.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    })
}

impl Cart {
    /// An empty cart with zero totals
    pub fn empty() -> Self {
        Self::default()
    }

    /// Recompute `total` and `item_count` from the items
    pub fn recalculate(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
        self.item_count = self.items.iter().map(|item| item.quantity).sum();
    }

    /// Drop lines without a usable quantity and recompute totals.
    ///
    /// Applied to carts read back from storage, which may have been written
    /// by an older client or edited by hand.
    pub fn normalized(mut self) -> Self {
        self.items.retain(|item| item.quantity > 0);
        self.recalculate();
        self
    }

    /// Add one unit of a product, appending it if not present
    pub fn add(&mut self, item: NewCartItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.items.push(item.with_quantity(1)),
        }
        self.recalculate();
    }

    /// Remove every line with this id
    pub fn remove(&mut self, item_id: &str) {
        self.items.retain(|item| item.id != item_id);
        self.recalculate();
    }

    /// Set a line's quantity exactly; zero or negative removes it
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) {
        if let Some(index) = self.items.iter().position(|item| item.id == item_id) {
            if quantity <= 0 {
                self.items.remove(index);
            } else {
                self.items[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        }
        self.recalculate();
    }

    /// Check if cart has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a line by product id
    pub fn get(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Quantity of a product, 0 when absent
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.get(item_id).map_or(0, |item| item.quantity)
    }

    /// Cart contents as checkout line items, in cart order
    pub fn line_items(&self) -> Vec<CheckoutLineItem> {
        self.items
            .iter()
            .map(|item| CheckoutLineItem::new(item.price_id.clone(), item.quantity))
            .collect()
    }
}
