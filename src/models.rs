use serde::{Deserialize, Serialize};

/// Name carried by the variant that stands in for "no variant selected".
pub const DEFAULT_VARIANT_NAME: &str = "Default";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum DishType {
    #[serde(rename = "VEG")]
    Veg,
    #[default]
    #[serde(rename = "NON-VEG", other)]
    NonVeg,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Variant {
    #[serde(rename = "variantName", default)]
    pub name: String,
    #[serde(rename = "variantPrice", default)]
    pub price: f64,
}

impl Variant {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Variant {
            name: name.into(),
            price,
        }
    }

    pub fn is_default(&self) -> bool {
        self.name.is_empty() || self.name == DEFAULT_VARIANT_NAME
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::new(DEFAULT_VARIANT_NAME, 0.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddOn {
    #[serde(rename = "addOnName", default)]
    pub name: String,
    #[serde(rename = "addOnPrice", default)]
    pub price: f64,
}

impl AddOn {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        AddOn {
            name: name.into(),
            price,
        }
    }
}

/// Entry of the cafe-wide add-on catalogue.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CafeAddOn {
    pub addon_name: String,
    #[serde(default)]
    pub addon_price: f64,
    #[serde(default)]
    pub addon_status: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Dish {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "dishName")]
    pub name: String,
    #[serde(rename = "dishDescription", default)]
    pub description: String,
    #[serde(rename = "dishPrice", default)]
    pub price: f64,
    #[serde(rename = "dishType", default)]
    pub dish_type: DishType,
    #[serde(rename = "dishCategory", default)]
    pub category: String,
    #[serde(rename = "dishVariants", default)]
    pub variants: Vec<Variant>,
    #[serde(rename = "dishAddOns", default)]
    pub add_ons: Vec<AddOn>,
    #[serde(rename = "dishStatus", default)]
    pub available: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MenuResponse {
    #[serde(default)]
    pub dishes: Vec<Dish>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CafeDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub addons: Vec<CafeAddOn>,
    pub instagram: Option<String>,
    pub banner: Option<String>,
}

/// Identity of a line item. Add-ons are kept sorted by name so that the
/// order in which they were picked does not matter.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemKey {
    pub dish_id: String,
    pub dish_name: String,
    pub variant: Variant,
    pub add_ons: Vec<AddOn>,
}

impl LineItemKey {
    pub fn new(dish_id: &str, dish_name: &str, variant: &Variant, add_ons: &[AddOn]) -> Self {
        let mut add_ons = add_ons.to_vec();
        add_ons.sort_by(|a, b| a.name.cmp(&b.name).then(a.price.total_cmp(&b.price)));

        LineItemKey {
            dish_id: dish_id.to_string(),
            dish_name: dish_name.to_string(),
            variant: variant.clone(),
            add_ons,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(rename = "_id")]
    pub dish_id: String,
    pub dish_name: String,
    pub dish_type: DishType,
    #[serde(default)]
    pub dish_category: String,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl LineItem {
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(&self.dish_id, &self.dish_name, &self.variant, &self.add_ons)
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.line_total = self.unit_price * quantity as f64;
    }
}

/// Customer supplied fields of an order.
#[derive(Debug, Clone, Default)]
pub struct OrderDetails {
    pub customer: String,
    pub cooking_request: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VariantPayload {
    #[serde(rename = "variantName")]
    pub name: String,
    #[serde(rename = "variantPrice")]
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddOnPayload {
    #[serde(rename = "addOnName")]
    pub name: String,
    #[serde(rename = "addOnPrice")]
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub dish_name: String,
    pub dish_category: String,
    pub quantity: u32,
    pub dish_type: DishType,
    /// Unit price of one portion, variant and add-ons included.
    pub dish_price: f64,
    pub dish_variants: VariantPayload,
    pub dish_add_ons: Vec<AddOnPayload>,
}

impl From<&LineItem> for OrderLine {
    fn from(item: &LineItem) -> Self {
        let variant_name = if item.variant.name.is_empty() {
            DEFAULT_VARIANT_NAME.to_string()
        } else {
            item.variant.name.clone()
        };

        OrderLine {
            dish_name: item.dish_name.clone(),
            dish_category: item.dish_category.clone(),
            quantity: item.quantity,
            dish_type: item.dish_type,
            dish_price: item.unit_price,
            dish_variants: VariantPayload {
                name: variant_name,
                price: item.variant.price,
            },
            dish_add_ons: item
                .add_ons
                .iter()
                .map(|a| AddOnPayload {
                    name: a.name.clone(),
                    price: a.price,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub cafe_id: String,
    pub table_id: String,
    pub customer: String,
    pub cooking_request: String,
    pub order_list: Vec<OrderLine>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceOrderResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub order_list: Vec<OrderLine>,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    pub total: f64,
}
