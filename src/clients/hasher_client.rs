use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::errors::client_error::ClientError;
use crate::server::hasher_server::{HealthResponse, PredictRequest, PredictResponse};

#[async_trait]
pub trait HasherInteractions {
    async fn health(&self) -> Result<HealthResponse, ClientError>;
    async fn predict(&self, user_id: String) -> Result<PredictResponse, ClientError>;
}

/// HTTP client for a running hasher service.
#[derive(Clone)]
pub struct HasherClient {
    client: Arc<Client>,
    address: String,
}

impl HasherClient {
    pub fn new(client: Arc<Client>, address: String) -> Self {
        Self { client, address }
    }
}

fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus(status.as_u16()));
    }
    Ok(resp)
}

#[async_trait]
impl HasherInteractions for HasherClient {
    async fn health(&self) -> Result<HealthResponse, ClientError> {
        let request_url = format!("{}/health", self.address);
        let resp = self.client.get(request_url).send().await?;
        let data: HealthResponse = check_status(resp)?.json().await?;
        Ok(data)
    }

    async fn predict(&self, user_id: String) -> Result<PredictResponse, ClientError> {
        let request_url = format!("{}/predict", self.address);
        let resp = self
            .client
            .post(request_url)
            .json(&PredictRequest::new(user_id))
            .send()
            .await?;
        let data: PredictResponse = check_status(resp)?.json().await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use httpmock::prelude::*;
    use reqwest::Client;
    use serde_json::json;

    use crate::clients::hasher_client::{HasherClient, HasherInteractions};
    use crate::core::hash::hash_feature_default;
    use crate::errors::client_error::ClientError;
    use crate::server::hasher_server::routes;

    fn spawn_server() -> SocketAddr {
        let (addr, server) = warp::serve(routes()).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        addr
    }

    #[tokio::test]
    async fn test_health_call_success() {
        let server = MockServer::start();

        let health_mock = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"status": "healthy", "message": "Service is running"}));
        });

        let client = HasherClient::new(Arc::new(Client::new()), server.url(""));
        assert_eq!(true, client.health().await.unwrap().is_healthy());
        health_mock.assert();
    }

    #[tokio::test]
    async fn test_predict_call_sends_user_id() {
        let server = MockServer::start();

        let predict_mock = server.mock(|when, then| {
            when.method(POST).path("/predict").json_body(json!({"user_id": "foo"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"user_id": "foo", "hashed_feature": 42}));
        });

        let client = HasherClient::new(Arc::new(Client::new()), server.url(""));
        let resp = client.predict("foo".to_string()).await.unwrap();
        assert_eq!("foo", resp.user_id);
        assert_eq!(42, resp.hashed_feature);
        predict_mock.assert();
    }

    #[tokio::test]
    async fn test_predict_call_unexpected_status() {
        let server = MockServer::start();

        let predict_mock = server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(422)
                .header("content-type", "application/json")
                .json_body(json!({"detail": "missing field `user_id`"}));
        });

        let client = HasherClient::new(Arc::new(Client::new()), server.url(""));
        match client.predict("foo".to_string()).await {
            Err(ClientError::UnexpectedStatus(code)) => assert_eq!(422, code),
            other => panic!("expected unexpected status error, got {:?}", other),
        }
        predict_mock.assert();
    }

    #[tokio::test]
    async fn test_end_to_end_against_running_server() {
        let addr = spawn_server();
        let client = HasherClient::new(Arc::new(Client::new()), format!("http://{addr}"));

        assert_eq!(true, client.health().await.unwrap().is_healthy());

        let resp = client.predict("test_user_123".to_string()).await.unwrap();
        assert_eq!("test_user_123", resp.user_id);
        assert_eq!(hash_feature_default("test_user_123"), resp.hashed_feature);
        assert!(resp.hashed_feature < 1000);
    }

    #[tokio::test]
    async fn test_concurrent_predictions() {
        let addr = spawn_server();
        let client = HasherClient::new(Arc::new(Client::new()), format!("http://{addr}"));

        let mut handles = Vec::with_capacity(20);
        for i in 0..20 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client.predict(format!("user-{i}")).await.unwrap()
            }));
        }

        let results = futures::future::join_all(handles).await;
        for result in results {
            let resp = result.unwrap();
            assert_eq!(hash_feature_default(&resp.user_id), resp.hashed_feature);
        }
    }
}
