use crate::commands::App;
use crate::composer::OrderComposer;
use crate::menu::{find_dish, offered_add_ons};
use crate::models::{CartSummary, LineItemKey};
use crate::selection::Selection;
use crate::storage::KeyValueStore;

pub async fn add_to_cart(
    app: &App,
    dish_id: &str,
    variant: Option<&str>,
    add_ons: &[String],
    quantity: u32,
) -> Result<CartSummary, String> {
    let dishes = app
        .api
        .fetch_menu(&app.session.cafe_id)
        .await
        .map_err(|e| format!("Failed to fetch dishes: {}", e))?;
    let details = app
        .api
        .fetch_cafe_details(&app.session.cafe_id)
        .await
        .map_err(|e| e.to_string())?;

    let dish =
        find_dish(&dishes, dish_id).ok_or_else(|| format!("Dish not found: {}", dish_id))?;
    if !dish.available {
        return Err(format!("{} is not available right now", dish.name));
    }

    let mut selection = Selection::new(dish);
    if let Some(name) = variant {
        if !selection.toggle_variant(name) {
            return Err(format!("{} has no variant '{}'", dish.name, name));
        }
    }

    let offered = offered_add_ons(dish, &details.addons);
    for name in add_ons {
        let add_on = offered
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("Add-on '{}' is not offered for {}", name, dish.name))?;
        if !selection.has_add_on(&add_on.name) {
            selection.toggle_add_on(add_on);
        }
    }
    selection.set_quantity(quantity);

    let mut composer = app.composer();
    composer.add_selection(selection).map_err(|e| e.to_string())?;

    Ok(summary(&composer))
}

pub fn get_cart(app: &App) -> Result<CartSummary, String> {
    Ok(summary(&app.composer()))
}

/// `line` is the 1-based position shown by `get_cart`.
pub fn update_quantity(app: &App, line: usize, quantity: u32) -> Result<CartSummary, String> {
    let mut composer = app.composer();
    let key = line_key(&composer, line)?;

    composer
        .change_quantity(&key, quantity)
        .map_err(|e| e.to_string())?;

    Ok(summary(&composer))
}

pub fn remove_from_cart(app: &App, line: usize) -> Result<CartSummary, String> {
    let mut composer = app.composer();
    let key = line_key(&composer, line)?;

    composer.remove(&key).map_err(|e| e.to_string())?;

    Ok(summary(&composer))
}

fn line_key<S: KeyValueStore>(
    composer: &OrderComposer<S>,
    line: usize,
) -> Result<LineItemKey, String> {
    line.checked_sub(1)
        .and_then(|idx| composer.items().get(idx))
        .map(|item| item.key())
        .ok_or_else(|| format!("Cart line {} not found", line))
}

fn summary<S: KeyValueStore>(composer: &OrderComposer<S>) -> CartSummary {
    CartSummary {
        items: composer.items().to_vec(),
        total: composer.total(),
    }
}
