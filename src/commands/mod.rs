pub mod cart;
pub mod menu;
pub mod orders;

use crate::api::HttpCafeApi;
use crate::composer::OrderComposer;
use crate::db::Database;
use crate::notify::OrderEvent;
use crate::storage::SessionKey;
use tokio::sync::broadcast;

/// Everything a command needs: the local store, the backend and the table
/// being ordered from.
pub struct App {
    pub db: Database,
    pub api: HttpCafeApi,
    pub session: SessionKey,
    pub events: broadcast::Sender<OrderEvent>,
}

impl App {
    pub fn composer(&self) -> OrderComposer<&Database> {
        OrderComposer::restore(&self.db, self.session.clone()).with_notifier(self.events.clone())
    }
}
