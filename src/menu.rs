use crate::models::{AddOn, CafeAddOn, Dish, DishType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DishTypeFilter {
    #[default]
    Both,
    Only(DishType),
}

#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub category: Option<String>,
    pub dish_type: DishTypeFilter,
    pub search: Option<String>,
}

/// Dishes a customer can order, narrowed by `filter`. Unavailable dishes are
/// never listed. Menu order is preserved.
pub fn filter_dishes<'a>(dishes: &'a [Dish], filter: &MenuFilter) -> Vec<&'a Dish> {
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    dishes
        .iter()
        .filter(|d| d.available)
        .filter(|d| filter.category.as_ref().map_or(true, |c| &d.category == c))
        .filter(|d| match filter.dish_type {
            DishTypeFilter::Both => true,
            DishTypeFilter::Only(t) => d.dish_type == t,
        })
        .filter(|d| {
            search
                .as_ref()
                .map_or(true, |s| d.name.to_lowercase().contains(s))
        })
        .collect()
}

/// Distinct category names in menu order.
pub fn categories(dishes: &[Dish]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for dish in dishes {
        if !dish.category.is_empty() && !seen.contains(&dish.category) {
            seen.push(dish.category.clone());
        }
    }
    seen
}

/// The dish's add-ons the cafe currently offers: same name and price in the
/// cafe catalogue, with an active status.
pub fn offered_add_ons(dish: &Dish, catalogue: &[CafeAddOn]) -> Vec<AddOn> {
    dish.add_ons
        .iter()
        .filter(|a| {
            catalogue
                .iter()
                .any(|c| c.addon_name == a.name && c.addon_price == a.price && c.addon_status)
        })
        .cloned()
        .collect()
}

pub fn find_dish<'a>(dishes: &'a [Dish], id: &str) -> Option<&'a Dish> {
    dishes.iter().find(|d| d.id == id)
}
