//! Blocking REST client for the budget server.

use pence_core::{CoreError, ItemPayload, RemoteStore, SyncSnapshot};
use pence_domain::{Category, ItemAttrs, ItemId};
use reqwest::blocking::{Client, RequestBuilder, Response};
use tracing::{debug, info};

use crate::dto::{BulkResponse, CreateResponse, ItemBody};
use crate::error::SyncError;
use crate::translate::translate;

/// HTTP client for the bulk-fetch and item endpoints.
///
/// Authentication is a session API key sent verbatim in the
/// `Authorization` header; session management itself lives elsewhere.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", key),
            None => request,
        }
    }

    fn checked(response: Response) -> Result<Response, SyncError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(SyncError::Status(response.status().as_u16()))
        }
    }

    fn item_body(id: Option<ItemId>, item: &ItemPayload) -> ItemBody {
        let (k, s, h) = match &item.attrs {
            ItemAttrs::Consumable { category, shop } => {
                (Some(category.clone()), Some(shop.clone()), None)
            }
            ItemAttrs::Holiday { holiday, shop } => {
                (None, Some(shop.clone()), Some(holiday.clone()))
            }
            ItemAttrs::Social { shop } => (None, Some(shop.clone()), None),
            ItemAttrs::Plain | ItemAttrs::Funds { .. } => (None, None, None),
        };
        ItemBody {
            id: id.map(|id| id.0),
            d: [
                item.date.year as i64,
                item.date.month as i64,
                item.date.day as i64,
            ],
            i: item.label.clone(),
            c: item.cost,
            k,
            s,
            h,
        }
    }
}

impl RemoteStore for ApiClient {
    fn fetch_all(&self) -> Result<SyncSnapshot, CoreError> {
        let url = self.url("data/all");
        info!(url, "fetching full dataset");

        let fetch = || -> Result<SyncSnapshot, SyncError> {
            let response = Self::checked(self.authorised(self.http.get(&url)).send()?)?;
            let payload: BulkResponse = response.json()?;
            translate(payload.data)
        };
        Ok(fetch()?)
    }

    fn create_item(&self, category: Category, item: &ItemPayload) -> Result<ItemId, CoreError> {
        let url = self.url(&format!("update/{category}"));
        debug!(url, "creating item");

        let create = || -> Result<ItemId, SyncError> {
            let body = Self::item_body(None, item);
            let response =
                Self::checked(self.authorised(self.http.post(&url)).json(&body).send()?)?;
            let created: CreateResponse = response.json()?;
            Ok(ItemId(created.id))
        };
        Ok(create()?)
    }

    fn update_item(
        &self,
        category: Category,
        id: ItemId,
        item: &ItemPayload,
    ) -> Result<(), CoreError> {
        let url = self.url(&format!("update/{category}"));
        debug!(url, %id, "updating item");

        let update = || -> Result<(), SyncError> {
            let body = Self::item_body(Some(id), item);
            Self::checked(self.authorised(self.http.put(&url)).json(&body).send()?)?;
            Ok(())
        };
        Ok(update()?)
    }
}
