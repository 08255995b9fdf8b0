use std::future::Future;
use std::time::Instant;

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::{CafeDetails, Dish, MenuResponse, OrderPayload, PlaceOrderResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Where the composer hands a finished order.
pub trait OrderGateway {
    fn place_order(
        &self,
        payload: &OrderPayload,
    ) -> impl Future<Output = Result<PlaceOrderResponse, ApiError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpCafeApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCafeApi {
    pub fn new(base_url: &str) -> Self {
        HttpCafeApi {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_menu(&self, cafe_id: &str) -> Result<Vec<Dish>, ApiError> {
        let now = Instant::now();
        let resp = self
            .client
            .get(format!(
                "{}/server/menuDetails/getMenu/{}",
                self.base_url, cafe_id
            ))
            .send()
            .await?;

        let menu: MenuResponse = Self::json_or_status(resp).await?;
        log::debug!(
            "Menu for {}: {} dishes in {:.2?}",
            cafe_id,
            menu.dishes.len(),
            now.elapsed()
        );

        Ok(menu.dishes)
    }

    pub async fn fetch_cafe_details(&self, cafe_id: &str) -> Result<CafeDetails, ApiError> {
        let resp = self
            .client
            .get(format!(
                "{}/server/cafeDetails/getCafeDetails/{}",
                self.base_url, cafe_id
            ))
            .send()
            .await?;

        Self::json_or_status(resp).await
    }

    async fn json_or_status<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(resp.json::<T>().await?)
    }
}

impl OrderGateway for HttpCafeApi {
    async fn place_order(&self, payload: &OrderPayload) -> Result<PlaceOrderResponse, ApiError> {
        let resp = self
            .client
            .post(format!(
                "{}/server/orderDetails/placeOrder/{}/{}",
                self.base_url, payload.cafe_id, payload.table_id
            ))
            .json(payload)
            .send()
            .await?;

        // the backend explains rejections in the body, whatever the status
        let status = resp.status();
        let body = resp.text().await?;
        parse_place_order_body(status, &body)
    }
}

pub(crate) fn parse_place_order_body(
    status: StatusCode,
    body: &str,
) -> Result<PlaceOrderResponse, ApiError> {
    match serde_json::from_str::<PlaceOrderResponse>(body) {
        Ok(mut parsed) => {
            if !status.is_success() {
                parsed.success = false;
            }
            Ok(parsed)
        }
        Err(e) if status.is_success() => {
            log::warn!("Unreadable order response ({}): {}", e, body);
            Ok(PlaceOrderResponse {
                success: false,
                message: None,
            })
        }
        Err(_) => Err(ApiError::Status {
            status,
            body: body.to_string(),
        }),
    }
}
