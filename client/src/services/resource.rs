use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{Id, ListQuery, Paginated};
use std::marker::PhantomData;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// CRUD over one REST collection, e.g. `customers/`.
///
/// `T` is what the server returns, `P` what create and update send.
pub struct Resource<T, P> {
    client: ApiClient,
    base: &'static str,
    _types: PhantomData<fn() -> (T, P)>,
}

impl<T, P> Clone for Resource<T, P> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base: self.base,
            _types: PhantomData,
        }
    }
}

impl<T, P> PartialEq for Resource<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.client == other.client
    }
}

impl<T, P> Resource<T, P>
where
    T: DeserializeOwned,
    P: Serialize,
{
    pub fn new(client: ApiClient, base: &'static str) -> Self {
        Self {
            client,
            base,
            _types: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn item_path(&self, id: &Id) -> String {
        format!("{}{}/", self.base, id)
    }

    /// Path of a nested collection or action, e.g. `loans/3/payments/`.
    pub fn sub_path(&self, id: &Id, name: &str) -> String {
        format!("{}{}/{}/", self.base, id, name)
    }

    pub async fn get_all(&self, query: &ListQuery) -> ApiResult<Paginated<T>> {
        self.client.get_page(self.base, query).await
    }

    pub async fn get_by_id(&self, id: &Id) -> ApiResult<T> {
        self.client.get(&self.item_path(id)).await
    }

    pub async fn create(&self, payload: &P) -> ApiResult<T> {
        self.client.post(self.base, payload).await
    }

    pub async fn update(&self, id: &Id, payload: &P) -> ApiResult<T> {
        self.client.put(&self.item_path(id), payload).await
    }

    pub async fn partial_update<B: Serialize + ?Sized>(&self, id: &Id, changes: &B) -> ApiResult<T> {
        self.client.patch(&self.item_path(id), changes).await
    }

    pub async fn delete(&self, id: &Id) -> ApiResult<()> {
        self.client.delete(&self.item_path(id)).await
    }

    /// POST to an action endpoint. Action responses vary between endpoints,
    /// so the body is discarded and callers reload what they display.
    pub(crate) async fn action<B: Serialize + ?Sized>(
        &self,
        id: &Id,
        name: &str,
        body: Option<&B>,
    ) -> ApiResult<()> {
        let path = self.sub_path(id, name);
        let _: Value = match body {
            Some(body) => self.client.post(&path, body).await?,
            None => self.client.post_action(&path).await?,
        };
        Ok(())
    }

    pub(crate) async fn nested_page<U: DeserializeOwned>(
        &self,
        id: &Id,
        name: &str,
        query: &ListQuery,
    ) -> ApiResult<Paginated<U>> {
        self.client.get_page(&self.sub_path(id, name), query).await
    }
}
