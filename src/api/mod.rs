// Blocking REST client for the central manager (v3), element manager (v2)
// and Karbon endpoints.
pub mod central;
pub mod element;
pub mod karbon;
pub mod paging;
pub mod types;

use crate::config::{ConnectionConfig, Endpoint};
use crate::error::{CliError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Central,
    Element,
    Karbon,
}

impl Service {
    fn setting(self) -> &'static str {
        match self {
            Service::Central => "pcurl or pcaddress",
            Service::Element => "peurl or peaddress",
            Service::Karbon => "karbonurl or karbonaddress",
        }
    }
}

pub struct NutanixClient {
    http: Client,
    config: ConnectionConfig,
}

impl NutanixClient {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        if config.skip_cert_verify {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let http = Client::builder()
            .danger_accept_invalid_certs(config.skip_cert_verify)
            .build()?;

        Ok(Self { http, config })
    }

    fn endpoint(&self, service: Service) -> Result<&Endpoint> {
        let endpoint = match service {
            Service::Central => Some(&self.config.pc),
            Service::Element => self.config.pe.as_ref(),
            Service::Karbon => self.config.karbon.as_ref(),
        };
        endpoint.ok_or(CliError::MissingSetting(service.setting()))
    }

    fn request(&self, service: Service, method: Method, path: &str) -> Result<(RequestBuilder, String)> {
        let endpoint = self.endpoint(service)?;
        let url = join_url(&endpoint.url, path);

        tracing::debug!(%method, %url, "sending request");

        let builder = self
            .http
            .request(method, &url)
            .basic_auth(&endpoint.username, Some(&endpoint.password))
            .header(reqwest::header::ACCEPT, "application/json");

        Ok((builder, url))
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, service: Service, path: &str) -> Result<T> {
        let (builder, url) = self.request(service, Method::GET, path)?;
        Self::send(builder, &url)
    }

    pub(crate) fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let (builder, url) = self.request(service, Method::POST, path)?;
        Self::send(builder.json(body), &url)
    }

    pub(crate) fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let (builder, url) = self.request(service, Method::PUT, path)?;
        Self::send(builder.json(body), &url)
    }

    fn send<T: DeserializeOwned>(builder: RequestBuilder, url: &str) -> Result<T> {
        let response = builder.send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::debug!(%status, %url, "request failed");
            return Err(CliError::Api {
                status,
                url: url.to_string(),
                body,
            });
        }

        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| CliError::UnexpectedResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Joins a base URL and a relative path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Client with every endpoint pointed at `server` as admin/secret.
#[cfg(test)]
pub(crate) fn mock_client(server: &httpmock::MockServer) -> NutanixClient {
    let endpoint = |path: &str| Endpoint {
        url: server.url(path),
        username: "admin".to_string(),
        password: "secret".to_string(),
    };
    NutanixClient::new(ConnectionConfig {
        pc: endpoint("/api/nutanix/v3/"),
        pe: Some(endpoint("/PrismGateway/services/rest/v2.0/")),
        karbon: Some(endpoint("/karbon/")),
        skip_cert_verify: false,
    })
    .unwrap()
}
