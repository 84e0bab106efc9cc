use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::client::ClientResult;
use crate::models::{Article, Order, OrderedArticle, PriceList};

pub const ARTICLES_ENDPOINT: &str = "articles";
pub const PRICE_LISTS_ENDPOINT: &str = "pricelists";
pub const ORDERS_ENDPOINT: &str = "orders";
pub const ORDERED_ARTICLES_ENDPOINT: &str = "orderedarticles";

/// Generic CRUD client for one entity kind, mirroring the server verb set.
///
/// Each instantiation differs only in its configuration pair: the peer's base
/// address and the entity's endpoint segment. A bearer token is attached once
/// via [`set_bearer_token`](Self::set_bearer_token) after authorization;
/// calling a protected verb without one is not a local error — the peer
/// rejects it and the rejection surfaces as a failed [`ClientResult`].
pub struct RepoClient<T> {
    http: reqwest::Client,
    base_address: String,
    endpoint: &'static str,
    bearer_token: Option<String>,
    _entity: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> RepoClient<T> {
    pub fn new(
        http: reqwest::Client,
        base_address: impl Into<String>,
        endpoint: &'static str,
    ) -> Self {
        let base_address = base_address.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_address,
            endpoint,
            bearer_token: None,
            _entity: PhantomData,
        }
    }

    pub fn set_bearer_token(&mut self, token: impl Into<String>) {
        self.bearer_token = Some(token.into());
    }

    pub async fn add(&self, entity: &T) -> ClientResult<Uuid> {
        self.post_expecting("Add", entity).await
    }

    pub async fn add_range(&self, entities: &[T]) -> ClientResult<Vec<Uuid>> {
        self.post_expecting("AddRange", entities).await
    }

    pub async fn update(&self, entity: &T) -> ClientResult<T> {
        self.post_expecting("Update", entity).await
    }

    pub async fn remove(&self, id: Uuid) -> ClientResult<()> {
        self.post_empty("Remove", &id).await
    }

    pub async fn remove_range(&self, ids: &[Uuid]) -> ClientResult<()> {
        self.post_empty("RemoveRange", ids).await
    }

    pub async fn get_one(&self, id: Uuid) -> ClientResult<T> {
        let url = self.url("");
        let request = self.http.get(&url).query(&[("Id", id.to_string())]);
        let response = self.authorized(request).send().await;
        Self::decode(&url, response).await
    }

    pub async fn get_all(&self) -> ClientResult<Vec<T>> {
        let url = self.url("GetAll");
        let response = self.authorized(self.http.get(&url)).send().await;
        Self::decode(&url, response).await
    }

    fn url(&self, action: &str) -> String {
        if action.is_empty() {
            format!("{}/{}", self.base_address, self.endpoint)
        } else {
            format!("{}/{}/{}", self.base_address, self.endpoint, action)
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post_expecting<B, P>(&self, action: &str, body: &B) -> ClientResult<P>
    where
        B: Serialize + ?Sized,
        P: DeserializeOwned,
    {
        let url = self.url(action);
        let response = self.authorized(self.http.post(&url).json(body)).send().await;
        Self::decode(&url, response).await
    }

    async fn post_empty<B: Serialize + ?Sized>(&self, action: &str, body: &B) -> ClientResult<()> {
        let url = self.url(action);
        match self.authorized(self.http.post(&url).json(body)).send().await {
            Ok(response) if response.status().is_success() => ClientResult::empty_success(),
            Ok(response) => {
                log::warn!("{url}: rejected with status {}", response.status());
                ClientResult::failure()
            }
            Err(e) => {
                log::warn!("{url}: transport failure: {e}");
                ClientResult::failure()
            }
        }
    }

    async fn decode<P: DeserializeOwned>(
        url: &str,
        response: reqwest::Result<reqwest::Response>,
    ) -> ClientResult<P> {
        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<P>().await {
                    Ok(payload) => ClientResult::success(payload),
                    Err(e) => {
                        log::warn!("{url}: undecodable response body: {e}");
                        ClientResult::failure()
                    }
                }
            }
            Ok(response) => {
                log::warn!("{url}: rejected with status {}", response.status());
                ClientResult::failure()
            }
            Err(e) => {
                log::warn!("{url}: transport failure: {e}");
                ClientResult::failure()
            }
        }
    }
}

impl RepoClient<Article> {
    pub fn articles(http: reqwest::Client, base_address: impl Into<String>) -> Self {
        Self::new(http, base_address, ARTICLES_ENDPOINT)
    }
}

impl RepoClient<PriceList> {
    pub fn price_lists(http: reqwest::Client, base_address: impl Into<String>) -> Self {
        Self::new(http, base_address, PRICE_LISTS_ENDPOINT)
    }
}

impl RepoClient<Order> {
    pub fn orders(http: reqwest::Client, base_address: impl Into<String>) -> Self {
        Self::new(http, base_address, ORDERS_ENDPOINT)
    }
}

impl RepoClient<OrderedArticle> {
    pub fn ordered_articles(http: reqwest::Client, base_address: impl Into<String>) -> Self {
        Self::new(http, base_address, ORDERED_ARTICLES_ENDPOINT)
    }
}
