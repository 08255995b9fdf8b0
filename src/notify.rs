use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Signals pushed to the staff side of a cafe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OrderEvent {
    /// A new order was placed; staff views should refresh their order list.
    #[serde(rename_all = "camelCase")]
    FetchOrders { cafe_id: String },
}

pub type OrderEventChannel = (
    broadcast::Sender<OrderEvent>,
    broadcast::Receiver<OrderEvent>,
);

pub fn order_event_channel() -> OrderEventChannel {
    broadcast::channel(16)
}

/// Fire and forget. Nobody listening is not an error.
pub fn notify_order_placed(tx: &broadcast::Sender<OrderEvent>, cafe_id: &str) {
    let event = OrderEvent::FetchOrders {
        cafe_id: cafe_id.to_string(),
    };

    match tx.send(event) {
        Ok(receivers) => log::debug!("Order notification sent to {} listener(s)", receivers),
        Err(_) => log::debug!("No listener for order notification of cafe {}", cafe_id),
    }
}

/// Logs every event already queued on `rx`. Returns how many were seen.
pub fn log_order_events(rx: &mut broadcast::Receiver<OrderEvent>) -> usize {
    let mut seen = 0;
    loop {
        match rx.try_recv() {
            Ok(OrderEvent::FetchOrders { cafe_id }) => {
                log::info!("New order placed at cafe {}, staff order list is stale", cafe_id);
                seen += 1;
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                log::warn!("Missed {} order notification(s)", skipped);
            }
            Err(_) => return seen,
        }
    }
}
