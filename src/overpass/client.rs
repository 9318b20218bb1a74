//! Overpass API client with ordered endpoint fallback.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::query::{building_query, OverpassResponse};
use crate::config::GeocoderConfig;
use crate::error::{ConfigError, FetchError};
use crate::models::{Anchor, RawBuilding};

/// Anything that can list the named buildings around an anchor.
///
/// Failures are absorbed by the source: an unreachable backend yields an
/// empty list.
pub trait BuildingSource {
    fn fetch(&self, anchor: Anchor, radius_m: u32) -> impl Future<Output = Vec<RawBuilding>> + Send;
}

/// Fetches named buildings from the Overpass API
pub struct OverpassClient {
    client: Client,
    /// Primary endpoint first, then backups in the order they are tried
    endpoints: Vec<String>,
    timeout_secs: u64,
}

impl OverpassClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Query each endpoint in turn until one answers.
    pub async fn fetch_buildings(&self, anchor: Anchor, radius_m: u32) -> Vec<RawBuilding> {
        let query = building_query(anchor, radius_m, self.timeout_secs);
        debug!("Overpass query: {}", query);

        for (attempt, endpoint) in self.endpoints.iter().enumerate() {
            match self.query_endpoint(endpoint, &query).await {
                Ok(response) => {
                    let buildings = response.into_buildings();
                    info!(
                        "Fetched {} buildings from OSM near {} via {}",
                        buildings.len(),
                        anchor,
                        endpoint
                    );
                    return buildings;
                }
                Err(e) => {
                    warn!(
                        "OSM Overpass query failed (endpoint {}/{}): {}",
                        attempt + 1,
                        self.endpoints.len(),
                        e
                    );
                }
            }
        }

        warn!("All Overpass endpoints failed for anchor {}", anchor);
        Vec::new()
    }

    async fn query_endpoint(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<OverpassResponse, FetchError> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("data", query)
            .finish();

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        response
            .json::<OverpassResponse>()
            .await
            .map_err(|source| FetchError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}

impl BuildingSource for OverpassClient {
    async fn fetch(&self, anchor: Anchor, radius_m: u32) -> Vec<RawBuilding> {
        self.fetch_buildings(anchor, radius_m).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Form, Json, Router};
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Deserialize)]
    struct QueryForm {
        data: String,
    }

    async fn buildings_handler(Form(form): Form<QueryForm>) -> Json<Value> {
        assert!(form.data.contains("out center tags;"));
        Json(json!({
            "elements": [
                {
                    "type": "way",
                    "id": 42,
                    "center": { "lat": 34.07, "lon": -118.44 },
                    "tags": { "building": "university", "name": "Boelter Hall" }
                }
            ]
        }))
    }

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api/interpreter", addr)
    }

    /// An address nothing is listening on
    async fn dead_endpoint() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/api/interpreter", addr)
    }

    fn client_for(endpoints: Vec<String>) -> OverpassClient {
        let config = GeocoderConfig {
            endpoints,
            timeout_secs: 5,
            ..GeocoderConfig::default()
        };
        OverpassClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_primary_endpoint() {
        let good = spawn_server(Router::new().route("/api/interpreter", post(buildings_handler))).await;
        let client = client_for(vec![good]);

        let buildings = client.fetch(Anchor::new(34.07, -118.44), 2000).await;
        assert_eq!(buildings, vec![RawBuilding::new("Boelter Hall", 34.07, -118.44)]);
    }

    #[tokio::test]
    async fn test_falls_back_after_unreachable_and_error_status() {
        let failing = spawn_server(Router::new().route(
            "/api/interpreter",
            post(|| async { (StatusCode::GATEWAY_TIMEOUT, "busy") }),
        ))
        .await;
        let good = spawn_server(Router::new().route("/api/interpreter", post(buildings_handler))).await;
        let client = client_for(vec![dead_endpoint().await, failing, good]);

        let buildings = client.fetch(Anchor::new(34.07, -118.44), 2000).await;
        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].name, "Boelter Hall");
    }

    #[tokio::test]
    async fn test_falls_back_after_malformed_body() {
        let garbage = spawn_server(Router::new().route(
            "/api/interpreter",
            post(|| async { "<html>rate limited</html>" }),
        ))
        .await;
        let good = spawn_server(Router::new().route("/api/interpreter", post(buildings_handler))).await;
        let client = client_for(vec![garbage, good]);

        let buildings = client.fetch(Anchor::new(34.07, -118.44), 2000).await;
        assert_eq!(buildings.len(), 1);
    }

    #[tokio::test]
    async fn test_all_endpoints_fail() {
        let client = client_for(vec![dead_endpoint().await, dead_endpoint().await]);

        let buildings = client.fetch(Anchor::new(34.07, -118.44), 2000).await;
        assert!(buildings.is_empty());
    }
}
