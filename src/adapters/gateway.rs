use crate::adapters::http::ReqwestFetcher;
use crate::core::handler::{ApiRequest, ApiResponse, LatestVideosHandler, ERROR_SERVER};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// HTTP event as delivered by API Gateway (REST and HTTP APIs) or a function URL.
/// Only the fields the handler reads are modelled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpContext {
    pub method: String,
}

impl GatewayRequest {
    /// v1 events carry `httpMethod`, v2 events `requestContext.http.method`.
    pub fn method(&self) -> &str {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .map(|http| http.method.as_str())
            })
            .unwrap_or("GET")
    }

    pub fn to_api_request(&self) -> ApiRequest {
        let empty = HashMap::new();
        let query = self.query_string_parameters.as_ref().unwrap_or(&empty);
        ApiRequest::from_query(self.method(), query)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    pub fn from_api_response(response: &ApiResponse) -> Result<Self> {
        Ok(Self {
            status_code: response.status,
            headers: response.headers.iter().cloned().collect(),
            body: response.body_json()?,
            is_base64_encoded: false,
        })
    }

    /// Used when the invocation fails before or after the handler runs.
    pub fn server_error(error: &FeedError) -> Self {
        let response = ApiResponse::server_error(error);
        let body = response.body_json().unwrap_or_else(|_| {
            serde_json::json!({ "error": ERROR_SERVER, "detail": error.to_string() }).to_string()
        });
        Self {
            status_code: response.status,
            headers: response.headers.into_iter().collect(),
            body,
            is_base64_encoded: false,
        }
    }
}

/// Runs one gateway invocation end to end. Configuration, client setup and
/// serialization failures become a `500` response instead of an invocation error.
pub async fn handle_event<C>(event: &GatewayRequest, config: Result<C>) -> GatewayResponse
where
    C: ConfigProvider + Validate,
{
    match try_handle_event(event, config).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                "❌ Invocation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            GatewayResponse::server_error(&e)
        }
    }
}

async fn try_handle_event<C>(event: &GatewayRequest, config: Result<C>) -> Result<GatewayResponse>
where
    C: ConfigProvider + Validate,
{
    let config = config?;
    config.validate()?;

    // Each invocation builds its own handler; nothing carries over between calls.
    let fetcher = ReqwestFetcher::from_config(&config)?;
    let handler = LatestVideosHandler::new(fetcher, config);

    let response = handler.handle(&event.to_api_request()).await;
    GatewayResponse::from_api_response(&response)
}
