use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::{normalize_base_url, ClientConfig},
    domain::{
        gateway::TodoGateway,
        todo::{NewTodoPayload, Todo, TodoId, UpdateTodoPayload},
    },
    error::ClientError,
};

/// `TodoGateway` over the service's JSON REST endpoints.
#[derive(Clone)]
pub struct HttpTodoGateway {
    client: Client,
    base_url: String,
}

impl HttpTodoGateway {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self { client: Client::new(), base_url: normalize_base_url(base_url)? })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout { builder = builder.timeout(timeout); }
        let client = builder.build().map_err(ClientError::Transport)?;
        Ok(Self { client, base_url: normalize_base_url(&config.base_url)? })
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn collection_url(&self) -> String { format!("{}/todos", self.base_url) }

    fn item_url(&self, id: TodoId) -> String { format!("{}/todos/{}", self.base_url, id) }
}

#[async_trait]
impl TodoGateway for HttpTodoGateway {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let url = self.collection_url();
        let res = self.client.get(&url).send().await.map_err(ClientError::Transport)?;
        tracing::debug!(method = "GET", %url, status = %res.status(), "todo request");
        decode(ensure_success(res).await?).await
    }

    async fn create(&self, input: NewTodoPayload) -> Result<Todo, ClientError> {
        let url = self.collection_url();
        let res = self.client.post(&url).json(&input).send().await.map_err(ClientError::Transport)?;
        tracing::debug!(method = "POST", %url, status = %res.status(), "todo request");
        decode(ensure_success(res).await?).await
    }

    async fn update(&self, id: TodoId, input: UpdateTodoPayload) -> Result<Todo, ClientError> {
        let url = self.item_url(id);
        let res = self.client.patch(&url).json(&input).send().await.map_err(ClientError::Transport)?;
        tracing::debug!(method = "PATCH", %url, status = %res.status(), "todo request");
        decode(ensure_success(res).await?).await
    }

    async fn delete(&self, id: TodoId) -> Result<(), ClientError> {
        let url = self.item_url(id);
        let res = self.client.delete(&url).send().await.map_err(ClientError::Transport)?;
        let status = res.status();
        tracing::debug!(method = "DELETE", %url, %status, "todo request");
        if !status.is_success() {
            tracing::warn!(%id, %status, "delete not acknowledged by server, removing locally anyway");
        }
        Ok(())
    }
}

async fn ensure_success(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() { return Ok(res); }
    let body = res.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    res.json::<T>().await.map_err(ClientError::Decode)
}
