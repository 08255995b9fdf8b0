use crate::composer::unit_price;
use crate::models::{AddOn, Dish, Variant};

/// What a customer is putting together for one dish before adding it to the
/// cart: at most one variant, a set of add-ons and a quantity.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    dish: &'a Dish,
    variant: Option<Variant>,
    add_ons: Vec<AddOn>,
    quantity: u32,
}

impl<'a> Selection<'a> {
    pub fn new(dish: &'a Dish) -> Self {
        Selection {
            dish,
            variant: None,
            add_ons: Vec::new(),
            quantity: 1,
        }
    }

    pub fn prefilled(dish: &'a Dish, variant: &Variant, add_ons: &[AddOn]) -> Self {
        let mut selection = Selection::new(dish);
        if !variant.is_default() {
            selection.variant = Some(variant.clone());
        }
        for add_on in add_ons {
            if !selection.has_add_on(&add_on.name) {
                selection.add_ons.push(add_on.clone());
            }
        }
        selection
    }

    pub fn dish(&self) -> &'a Dish {
        self.dish
    }

    pub fn variant(&self) -> Option<&Variant> {
        self.variant.as_ref()
    }

    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Picks the dish's variant called `name`, or clears it if it was the
    /// one already picked. Returns false if the dish has no such variant.
    pub fn toggle_variant(&mut self, name: &str) -> bool {
        if self.variant.as_ref().is_some_and(|v| v.name == name) {
            self.variant = None;
            return true;
        }

        match self.dish.variants.iter().find(|v| v.name == name) {
            Some(v) => {
                self.variant = Some(v.clone());
                true
            }
            None => false,
        }
    }

    /// Add-ons form a set keyed by name: toggling a picked one drops it.
    pub fn toggle_add_on(&mut self, add_on: &AddOn) {
        if self.has_add_on(&add_on.name) {
            self.add_ons.retain(|a| a.name != add_on.name);
        } else {
            self.add_ons.push(add_on.clone());
        }
    }

    pub fn has_add_on(&self, name: &str) -> bool {
        self.add_ons.iter().any(|a| a.name == name)
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1);
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn unit_price(&self) -> f64 {
        unit_price(self.dish.price, self.variant.as_ref(), &self.add_ons)
    }

    /// Price shown on the "add item" button.
    pub fn total_price(&self) -> f64 {
        self.unit_price() * self.quantity as f64
    }

    pub fn into_parts(self) -> (&'a Dish, Option<Variant>, Vec<AddOn>, u32) {
        (self.dish, self.variant, self.add_ons, self.quantity)
    }
}
