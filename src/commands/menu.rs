use crate::commands::App;
use crate::menu::{categories, filter_dishes, offered_add_ons, MenuFilter};
use crate::models::Dish;

pub async fn get_menu(app: &App, filter: &MenuFilter) -> Result<Vec<Dish>, String> {
    let dishes = app
        .api
        .fetch_menu(&app.session.cafe_id)
        .await
        .map_err(|e| format!("Failed to fetch dishes: {}", e))?;

    // Only list add-ons the cafe currently serves
    let details = app
        .api
        .fetch_cafe_details(&app.session.cafe_id)
        .await
        .map_err(|e| format!("Failed to fetch cafe details: {}", e))?;

    let menu = filter_dishes(&dishes, filter)
        .into_iter()
        .map(|d| Dish {
            add_ons: offered_add_ons(d, &details.addons),
            ..d.clone()
        })
        .collect();

    Ok(menu)
}

pub async fn get_categories(app: &App) -> Result<Vec<String>, String> {
    let details = app
        .api
        .fetch_cafe_details(&app.session.cafe_id)
        .await
        .map_err(|e| format!("Failed to fetch categories: {}", e))?;

    if !details.categories.is_empty() {
        return Ok(details.categories);
    }

    let dishes = app
        .api
        .fetch_menu(&app.session.cafe_id)
        .await
        .map_err(|e| e.to_string())?;

    Ok(categories(&dishes))
}
