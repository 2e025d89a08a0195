use std::time::Duration;

use log::debug;
use reqwest::blocking::{
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;

use super::{Storage, StorageFile, UploadError};
use crate::constants::PINATA_PIN_FILE_URL;

/// Pins files to IPFS through Pinata and returns gateway URLs.
pub struct PinataStorage {
    client: Client,
    jwt: String,
    endpoint: String,
    gateway: String,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinataStorage {
    pub fn new(jwt: String, gateway: String, timeout: Duration) -> Result<Self, UploadError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            jwt,
            endpoint: PINATA_PIN_FILE_URL.to_string(),
            gateway,
        })
    }
}

fn gateway_uri(gateway: &str, ipfs_hash: &str) -> String {
    format!("{}/{}", gateway.trim_end_matches('/'), ipfs_hash)
}

impl Storage for PinataStorage {
    fn upload(&self, file: &StorageFile) -> Result<String, UploadError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        debug!(
            "Pinning {} ({} bytes) to {}",
            file.file_name,
            file.bytes.len(),
            self.endpoint
        );
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Rejected {
                file_name: file.file_name.clone(),
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let pinned: PinResponse = response.json()?;
        if pinned.ipfs_hash.is_empty() {
            return Err(UploadError::EmptyLocator(file.file_name.clone()));
        }

        Ok(gateway_uri(&self.gateway, &pinned.ipfs_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_uri_joins_without_double_slash() {
        assert_eq!(
            gateway_uri("https://gateway.pinata.cloud/ipfs/", "Qm123"),
            "https://gateway.pinata.cloud/ipfs/Qm123"
        );
        assert_eq!(
            gateway_uri("https://gateway.pinata.cloud/ipfs", "Qm123"),
            "https://gateway.pinata.cloud/ipfs/Qm123"
        );
    }

    #[test]
    fn parses_pin_response() {
        let response: PinResponse = serde_json::from_str(
            r#"{"IpfsHash":"QmHash","PinSize":1234,"Timestamp":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(response.ipfs_hash, "QmHash");
    }
}
