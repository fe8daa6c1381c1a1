use http::{
    HeaderMap, HeaderName, HeaderValue, Method,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    config::ClientConfig,
    error::ClientError,
    transport::{ReqwestTransport, Transport},
};

/// JSON client for a REST API rooted at a base URL.
///
/// The header set is fixed at construction. Every request carries it, so a
/// bearer token given to the constructor is sent on all calls.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    base_url: String,
    headers: HeaderMap,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ClientError> {
        Self::with_transport(base_url, token, ReqwestTransport::new()?)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::with_timeout(config.timeout())?;
        Self::from_config_with_transport(config, transport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(
        base_url: &str,
        token: Option<&str>,
        transport: T,
    ) -> Result<Self, ClientError> {
        let mut config = ClientConfig::new(base_url);
        config.token = token.map(str::to_string);
        Self::from_config_with_transport(&config, transport)
    }

    pub fn from_config_with_transport(
        config: &ClientConfig,
        transport: T,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.effective_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
            let mut header_value = HeaderValue::from_str(&value)
                .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        Ok(ApiClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let url = self.url(path, Vec::<(String, String)>::new())?;
        self.execute(Method::GET, url, None)
    }

    /// GET with query parameters appended to the URL as given.
    pub fn get_with_query<R, I, K, V>(&self, path: &str, query: I) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = self.url(path, query)?;
        self.execute(Method::GET, url, None)
    }

    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body)
    }

    pub fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body)
    }

    pub fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let url = self.url(path, Vec::<(String, String)>::new())?;
        self.execute(Method::DELETE, url, None)
    }

    fn send_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        let url = self.url(path, Vec::<(String, String)>::new())?;
        self.execute(method, url, Some(body))
    }

    fn url<I, K, V>(&self, path: &str, query: I) -> Result<Url, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|source| ClientError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;

        let query: Vec<(K, V)> = query.into_iter().collect();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<R, ClientError> {
        let mut headers = self.headers.clone();
        headers
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static("application/json"));
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut builder = http::Request::builder()
            .method(method.clone())
            .uri(url.as_str());
        if let Some(request_headers) = builder.headers_mut() {
            *request_headers = headers;
        }
        let request = builder.body(body.unwrap_or_default())?;

        debug!("{method} {url}");
        let response = self.transport.send(request)?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            warn!("{method} {url} failed with {status}");
            return Err(ClientError::Http {
                status,
                body: response.into_body(),
            });
        }

        decode_body(response.body())
    }
}

/// Decodes a success body. An empty body decodes as JSON `null`, so callers
/// expecting `()`, `Option<_>` or [`serde_json::Value`] accept it.
fn decode_body<R: DeserializeOwned>(body: &[u8]) -> Result<R, ClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(body)
    }
    .map_err(ClientError::Decode)
}
