use chrono::Utc;

use crate::commands::App;
use crate::models::{OrderDetails, OrderLine, OrderPayload};

pub async fn place_order(app: &App, customer: &str, note: &str) -> Result<OrderPayload, String> {
    let details = OrderDetails {
        customer: customer.to_string(),
        cooking_request: note.to_string(),
    };

    let mut composer = app.composer();
    composer
        .submit(&app.api, &details)
        .await
        .map_err(|e| e.to_string())
}

pub fn get_order_history(app: &App) -> Result<Vec<OrderLine>, String> {
    Ok(app.composer().history_snapshot(Utc::now().timestamp_millis()))
}
