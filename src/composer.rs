//! The cart of one cafe + table session.
//!
//! Every mutation persists the line-item list to the session's cart slot and
//! recomputes the running total before returning.

use chrono::Utc;
use tokio::sync::broadcast;

use crate::api::OrderGateway;
use crate::error::{ComposerError, DEFAULT_REJECTION_MSG};
use crate::models::{
    AddOn, Dish, HistorySnapshot, LineItem, LineItemKey, OrderDetails, OrderLine, OrderPayload,
    Variant,
};
use crate::notify::{notify_order_placed, OrderEvent};
use crate::selection::Selection;
use crate::storage::{KeyValueStore, SessionKey};

/// How long the last submitted order stays visible, in milliseconds.
pub const HISTORY_TTL_MS: i64 = 10_800_000;

/// Price of one portion: the variant price replaces the dish price (a zero
/// variant price falls back to it), add-ons are added on top. Missing prices
/// have already defaulted to 0 during deserialization.
pub fn unit_price(dish_price: f64, variant: Option<&Variant>, add_ons: &[AddOn]) -> f64 {
    let base = match variant {
        Some(v) if v.price != 0.0 => v.price,
        _ => dish_price,
    };

    base + add_ons.iter().map(|a| a.price).sum::<f64>()
}

pub struct OrderComposer<S: KeyValueStore> {
    store: S,
    session: SessionKey,
    items: Vec<LineItem>,
    total: f64,
    events: Option<broadcast::Sender<OrderEvent>>,
}

impl<S: KeyValueStore> OrderComposer<S> {
    /// Loads the persisted cart of `session`. Missing or unreadable data
    /// yields an empty cart.
    pub fn restore(store: S, session: SessionKey) -> Self {
        let slot = session.cart_slot();
        let items = match store.get(&slot) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<LineItem>>(&raw).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable cart in {}: {}", slot, e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read cart slot {}: {}", slot, e);
                Vec::new()
            }
        };

        let items: Vec<LineItem> = items.into_iter().filter(|i| i.quantity > 0).collect();
        log::debug!("Restored {} line item(s) for {}", items.len(), slot);

        let mut composer = OrderComposer {
            store,
            session,
            items,
            total: 0.0,
            events: None,
        };
        composer.recompute_total();
        composer
    }

    pub fn with_notifier(mut self, tx: broadcast::Sender<OrderEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn session(&self) -> &SessionKey {
        &self.session
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds `quantity` portions of `dish`. A matching line item (same dish,
    /// variant and add-on set) absorbs the quantity instead of a new line
    /// being appended.
    pub fn add(
        &mut self,
        dish: &Dish,
        variant: Option<Variant>,
        add_ons: Vec<AddOn>,
        quantity: u32,
    ) -> Result<(), ComposerError> {
        if quantity == 0 {
            return Ok(());
        }

        let mut unique: Vec<AddOn> = Vec::with_capacity(add_ons.len());
        for add_on in add_ons {
            if !unique.iter().any(|a| a.name == add_on.name) {
                unique.push(add_on);
            }
        }

        let price = unit_price(dish.price, variant.as_ref(), &unique);
        let variant = variant.unwrap_or_default();
        let key = LineItemKey::new(&dish.id, &dish.name, &variant, &unique);

        match self.position(&key) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.unit_price = price;
                item.set_quantity(item.quantity.saturating_add(quantity));
            }
            None => self.items.push(LineItem {
                dish_id: dish.id.clone(),
                dish_name: dish.name.clone(),
                dish_type: dish.dish_type,
                dish_category: dish.category.clone(),
                variant,
                add_ons: unique,
                quantity,
                unit_price: price,
                line_total: price * quantity as f64,
            }),
        }

        self.commit()
    }

    /// One portion, default variant, no add-ons.
    pub fn quick_add(&mut self, dish: &Dish) -> Result<(), ComposerError> {
        self.add(dish, None, Vec::new(), 1)
    }

    pub fn add_selection(&mut self, selection: Selection<'_>) -> Result<(), ComposerError> {
        let (dish, variant, add_ons, quantity) = selection.into_parts();
        self.add(dish, variant, add_ons, quantity)
    }

    /// Starts a selection for `dish`, prefilled from the first line already
    /// holding that dish.
    pub fn selection_for<'a>(&self, dish: &'a Dish) -> Selection<'a> {
        match self.items.iter().find(|i| i.dish_id == dish.id) {
            Some(existing) => Selection::prefilled(dish, &existing.variant, &existing.add_ons),
            None => Selection::new(dish),
        }
    }

    /// Sets the quantity of a line. Zero removes it.
    pub fn change_quantity(
        &mut self,
        key: &LineItemKey,
        quantity: u32,
    ) -> Result<(), ComposerError> {
        let Some(idx) = self.position(key) else {
            return Ok(());
        };

        if quantity == 0 {
            self.items.remove(idx);
        } else {
            self.items[idx].set_quantity(quantity);
        }

        self.commit()
    }

    pub fn increment(&mut self, key: &LineItemKey) -> Result<(), ComposerError> {
        match self.position(key) {
            Some(idx) => {
                let quantity = self.items[idx].quantity.saturating_add(1);
                self.change_quantity(key, quantity)
            }
            None => Ok(()),
        }
    }

    /// Decrease by 1. A line at quantity 1 is removed.
    pub fn decrement(&mut self, key: &LineItemKey) -> Result<(), ComposerError> {
        match self.position(key) {
            Some(idx) => {
                let quantity = self.items[idx].quantity.saturating_sub(1);
                self.change_quantity(key, quantity)
            }
            None => Ok(()),
        }
    }

    pub fn remove(&mut self, key: &LineItemKey) -> Result<(), ComposerError> {
        self.change_quantity(key, 0)
    }

    pub fn to_order_payload(&self, details: &OrderDetails, timestamp: i64) -> OrderPayload {
        OrderPayload {
            cafe_id: self.session.cafe_id.clone(),
            table_id: self.session.table_id.clone(),
            customer: details.customer.clone(),
            cooking_request: details.cooking_request.clone(),
            order_list: self.items.iter().map(OrderLine::from).collect(),
            timestamp,
        }
    }

    pub async fn submit<G: OrderGateway>(
        &mut self,
        gateway: &G,
        details: &OrderDetails,
    ) -> Result<OrderPayload, ComposerError> {
        self.submit_at(gateway, details, Utc::now().timestamp_millis())
            .await
    }

    /// Places the order. On success the cart is cleared, the history slot
    /// holds the submitted lines and staff are notified. If validation or the
    /// backend fails, the cart stays as it was. Once the backend has accepted
    /// the order, the result is `Ok` even if the store cannot be updated.
    pub async fn submit_at<G: OrderGateway>(
        &mut self,
        gateway: &G,
        details: &OrderDetails,
        now_ms: i64,
    ) -> Result<OrderPayload, ComposerError> {
        if self.items.is_empty() {
            return Err(ComposerError::EmptyCart);
        }
        if details.customer.trim().is_empty() {
            return Err(ComposerError::MissingField("customer"));
        }

        let payload = self.to_order_payload(details, now_ms);
        log::info!(
            "Placing order for table {} at cafe {} ({} line(s), total {:.2})",
            self.session.table_id,
            self.session.cafe_id,
            payload.order_list.len(),
            self.total
        );

        let response = gateway.place_order(&payload).await.map_err(|e| {
            log::error!("Order submission failed: {}", e);
            e
        })?;

        if !response.success {
            let message = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION_MSG.to_string());
            log::warn!("Order rejected: {}", message);
            return Err(ComposerError::Rejected(message));
        }

        // Accepted upstream: store failures from here on are only logged.
        self.items.clear();
        self.recompute_total();
        self.discard(&self.session.cart_slot());

        let snapshot = HistorySnapshot {
            order_list: payload.order_list.clone(),
            timestamp: payload.timestamp,
        };
        self.record_history(&snapshot);

        if let Some(tx) = &self.events {
            notify_order_placed(tx, &self.session.cafe_id);
        }

        Ok(payload)
    }

    /// Lines of the last submitted order while it is younger than
    /// [`HISTORY_TTL_MS`]. Expired or unreadable snapshots are dropped.
    pub fn history_snapshot(&self, now_ms: i64) -> Vec<OrderLine> {
        let slot = self.session.history_slot();
        let raw = match self.store.get(&slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read history slot {}: {}", slot, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<HistorySnapshot>(&raw) {
            Ok(snapshot) if now_ms - snapshot.timestamp < HISTORY_TTL_MS => snapshot.order_list,
            Ok(_) => {
                log::debug!("History in {} expired", slot);
                self.discard(&slot);
                Vec::new()
            }
            Err(e) => {
                log::warn!("Discarding unreadable history in {}: {}", slot, e);
                self.discard(&slot);
                Vec::new()
            }
        }
    }

    fn discard(&self, slot: &str) {
        if let Err(e) = self.store.remove(slot) {
            log::warn!("Could not clear {}: {}", slot, e);
        }
    }

    fn record_history(&self, snapshot: &HistorySnapshot) {
        let slot = self.session.history_slot();
        let written = serde_json::to_string(snapshot)
            .map_err(ComposerError::from)
            .and_then(|raw| self.store.set(&slot, &raw).map_err(ComposerError::from));

        if let Err(e) = written {
            log::warn!("Could not record order history in {}: {}", slot, e);
        }
    }

    fn position(&self, key: &LineItemKey) -> Option<usize> {
        self.items.iter().position(|i| &i.key() == key)
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(|i| i.line_total).sum::<f64>().max(0.0);
    }

    fn commit(&mut self) -> Result<(), ComposerError> {
        self.recompute_total();
        let raw = serde_json::to_string(&self.items)?;
        self.store.set(&self.session.cart_slot(), &raw)?;
        Ok(())
    }
}
