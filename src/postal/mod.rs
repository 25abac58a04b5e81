use std::future::Future;
use std::time::Duration;
use log::debug;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use crate::error::LookupError;
use crate::postal::model::{decode_reply, Pincode, ServiceReply};

pub mod model;

pub const DEFAULT_API_URL: &str = "https://api.postalpincode.in";
const UA: &str = concat!("pincode-lookup/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a pincode query
pub trait LookupService {
    fn lookup(&self, pincode: &Pincode) -> impl Future<Output = Result<ServiceReply, LookupError>>;
}

/// HTTP client for the public postal pincode API
pub struct PostalClient {
    client: Client,
    api_url: String,
}

impl PostalClient {
    /// * `api_url` - scheme and host of the service, i.e. https://api.postalpincode.in
    /// * `timeout` - request timeout, `None` waits for the transport to give up
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> color_eyre::Result<Self> {
        let mut builder = Client::builder().default_headers(Self::default_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(
            Self {
                client: builder.build()?,
                api_url: api_url.into(),
            }
        )
    }

    fn default_headers() -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(USER_AGENT, HeaderValue::from_static(UA));
        map
    }

    pub fn lookup_url(&self, pincode: &Pincode) -> String {
        lookup_url(&self.api_url, pincode)
    }
}

impl LookupService for PostalClient {
    #[tracing::instrument(skip_all, fields(pincode = %pincode))]
    async fn lookup(&self, pincode: &Pincode) -> Result<ServiceReply, LookupError> {
        let url = self.lookup_url(pincode);
        debug!("fetching [{}]", url);
        // the status code is not inspected, the body alone decides
        let response = self.client.get(&url).send().await?;
        debug!("[{}] answered with {}", url, response.status());
        let body = response.text().await?;
        decode_reply(&body)
    }
}

/// `{api_url}/pincode/{code}`, tolerating a trailing slash on `api_url`
pub fn lookup_url(api_url: &str, pincode: &Pincode) -> String {
    format!("{}/pincode/{}", api_url.trim_end_matches('/'), pincode)
}
