use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header::USER_AGENT};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::{ClientError, TransportConfig, build_http_client};

/// A component ethernet interface as tracked by the state manager.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompEthInterface {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "MACAddress", default)]
    pub mac_address: String,
    #[serde(rename = "IPAddress", default, skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
    #[serde(rename = "LastUpdate", default, skip_serializing_if = "String::is_empty")]
    pub last_update: String,
    #[serde(rename = "ComponentID", default, skip_serializing_if = "String::is_empty")]
    pub component_id: String,
    #[serde(rename = "Type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

/// Client for `{hsm}/Inventory/EthernetInterfaces`. Every request identifies
/// the caller through the `User-Agent` header.
#[derive(Debug, Clone)]
pub struct EthInterfaceClient {
    client: Client,
    collection: Url,
    service_name: String,
}

impl EthInterfaceClient {
    pub fn new(
        hsm_url: &str,
        client: Client,
        service_name: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let base = hsm_url.trim_end_matches('/');
        let raw = format!("{base}/Inventory/EthernetInterfaces");
        let collection = Url::parse(&raw).map_err(|source| ClientError::Url {
            url: hsm_url.to_string(),
            source,
        })?;
        Ok(Self {
            client,
            collection,
            service_name: service_name.into(),
        })
    }

    pub fn from_config(
        hsm_url: &str,
        config: &TransportConfig,
        service_name: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::new(hsm_url, build_http_client(config)?, service_name)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Interfaces that have not been associated with a component yet.
    pub async fn get_unknown_components(&self) -> Result<Vec<CompEthInterface>, ClientError> {
        let mut url = self.collection.clone();
        url.query_pairs_mut().append_pair("ComponentID", "");
        self.get_json(url).await
    }

    pub async fn get_all_ethernet_interfaces(&self) -> Result<Vec<CompEthInterface>, ClientError> {
        self.get_json(self.collection.clone()).await
    }

    /// Creates `iface`. When it already exists and `update_if_exists` is set,
    /// the existing entry is patched instead.
    pub async fn add_new_ethernet_interface(
        &self,
        iface: &CompEthInterface,
        update_if_exists: bool,
    ) -> Result<(), ClientError> {
        let url = self.collection.clone();
        let response = self
            .send(Method::POST, url.clone(), |req| req.json(iface))
            .await?;
        if response.status() == StatusCode::CONFLICT && update_if_exists {
            log::info!("ethernet interface {} exists, patching", iface.id);
            return self.patch_ethernet_interface(iface).await;
        }
        check_status(Method::POST, &url, response).await.map(drop)
    }

    pub async fn patch_ethernet_interface(&self, iface: &CompEthInterface) -> Result<(), ClientError> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Url {
                url: self.collection.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .push(&iface.id);
        let response = self
            .send(Method::PATCH, url.clone(), |req| req.json(iface))
            .await?;
        check_status(Method::PATCH, &url, response).await.map(drop)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.send(Method::GET, url.clone(), |req| req).await?;
        let response = check_status(Method::GET, &url, response).await?;
        response.json::<T>().await.map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ClientError> {
        log::debug!("{method} {url}");
        let request = self
            .client
            .request(method.clone(), url.clone())
            .header(USER_AGENT, self.service_name.as_str());
        build(request)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                method,
                url: url.to_string(),
                source,
            })
    }
}

async fn check_status(method: Method, url: &Url, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        method,
        url: url.to_string(),
        status,
        body,
    })
}
