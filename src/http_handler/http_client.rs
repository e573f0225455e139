use super::http_request::request_common::HTTPRequestMethod;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and default settings.
///
/// This client is used for making REST API calls to the dispatch backend.
/// It sets a fixed timeout and carries the bearer key on every request.
#[derive(Debug)]
pub(crate) struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` with the given base URL and API key.
    ///
    /// This client has a default request timeout of 5 seconds.
    ///
    /// # Arguments
    /// * `base_url` – The root URL for all HTTP requests (e.g., `"https://fly.bushdivers.com/api"`).
    /// * `api_key` – The pilot's bearer token.
    ///
    /// # Returns
    /// A configured `HTTPClient` instance.
    pub(crate) fn new(base_url: &str, api_key: &str) -> HTTPClient {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Ok(auth) = reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}")) {
            headers.insert(reqwest::header::AUTHORIZATION, auth);
        }
        HTTPClient {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .user_agent(concat!("bushtracker/", env!("CARGO_PKG_VERSION")))
                .default_headers(headers)
                .build()
                .unwrap(),
            base_url: String::from(base_url),
        }
    }

    /// Starts a request against `{base_url}{endpoint}` with the given method.
    pub(crate) fn request_builder(
        &self,
        method: HTTPRequestMethod,
        endpoint: &str,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        match method {
            HTTPRequestMethod::Get => self.client.get(url),
            HTTPRequestMethod::Post => self.client.post(url),
            HTTPRequestMethod::Put => self.client.put(url),
            HTTPRequestMethod::Delete => self.client.delete(url),
        }
    }

    /// Returns the base URL that the client was initialized with.
    pub(crate) fn url(&self) -> &str { self.base_url.as_str() }
}
