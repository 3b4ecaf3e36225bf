use crate::types::StorageContext;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::io::Read;
use tempfile::NamedTempFile;
use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    ReadFailed,
    UploadFailed,
    DeleteFailed,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Serialize, Clone, Debug, Deserialize, PartialEq)]
pub struct UploadedMedia {
    pub public_id: String,
    pub url: String,
    pub timestamp: i64,
}

/// Signs the given `key=value` pairs the way the media host expects: sorted by key,
/// joined with `&`, suffixed with the API secret and hashed with SHA-256.
pub fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut params = params.to_vec();
    params.sort_by(|a, b| a.0.cmp(&b.0));

    let data_to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(format!("{}{}", data_to_sign, api_secret));
    base16ct::lower::encode_string(&hasher.finalize())
}

pub async fn upload_file(cfg: StorageContext, contents: Vec<u8>) -> Result<UploadedMedia, Error> {
    let file_name = Ulid::new().to_string();
    let part = Part::bytes(contents).file_name(file_name);

    let timestamp = chrono::Utc::now().timestamp();
    let signature = sign(
        &[
            ("timestamp", timestamp.to_string()),
            ("upload_preset", cfg.upload_preset.clone()),
        ],
        &cfg.api_secret,
    );

    let form = Form::new()
        .text("upload_preset", cfg.upload_preset.clone())
        .text("api_key", cfg.api_key.clone())
        .text("timestamp", timestamp.to_string())
        .text("signature", signature)
        .text("signature_algorithm", "sha256")
        .part("file", part);

    let res = Client::new()
        .post(cfg.upload_endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to upload a file: {:?}", err);
            Error::UploadFailed
        })?;

    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!("Error occurred while processing return data: {:?}", err);
        Error::UploadFailed
    })?;

    if status != StatusCode::OK {
        tracing::error!("Failed to upload file: {}", data);
        return Err(Error::UploadFailed);
    }

    match serde_json::de::from_str::<UploadResponse>(data.as_ref()) {
        Ok(res) => Ok(UploadedMedia {
            url: res.secure_url,
            public_id: res.public_id,
            timestamp,
        }),
        Err(err) => {
            tracing::error!("Failed to deserialize cloudinary response: {:?}", err);
            Err(Error::UploadFailed)
        }
    }
}

pub async fn delete_file(cfg: StorageContext, media: UploadedMedia) -> Result<(), Error> {
    let timestamp = chrono::Utc::now().timestamp();
    let signature = sign(
        &[
            ("public_id", media.public_id.clone()),
            ("timestamp", timestamp.to_string()),
        ],
        &cfg.api_secret,
    );

    let body = json!({
        "public_id": media.public_id,
        "api_key": cfg.api_key,
        "signature": signature,
        "signature_algorithm": "sha256",
        "timestamp": timestamp,
    });

    let res = Client::new()
        .post(cfg.delete_endpoint)
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to delete file {}: {:?}", media.url, err);
            Error::DeleteFailed
        })?;

    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!(
            "Failed to process delete file response {}: {:?}",
            media.url,
            err
        );
        Error::DeleteFailed
    })?;

    if status != StatusCode::OK {
        tracing::error!("Failed to delete uploaded file: {}", data);
        return Err(Error::DeleteFailed);
    }

    tracing::debug!("Delete file response: {}", data);

    Ok(())
}

pub async fn upload_temp_file(
    cfg: StorageContext,
    mut file: NamedTempFile,
) -> Result<UploadedMedia, Error> {
    let mut buf: Vec<u8> = vec![];

    file.read_to_end(&mut buf).map_err(|err| {
        tracing::error!("Failed to read the uploaded file {:?}", err);
        Error::ReadFailed
    })?;

    upload_file(cfg, buf).await
}

/// Uploads the new file first and only then drops the old one. A failed delete is
/// logged and otherwise ignored since the new file is already live.
pub async fn replace_file(
    cfg: StorageContext,
    old: Option<UploadedMedia>,
    file: NamedTempFile,
) -> Result<UploadedMedia, Error> {
    let uploaded = upload_temp_file(cfg.clone(), file).await?;

    if let Some(old) = old {
        if delete_file(cfg, old.clone()).await.is_err() {
            tracing::warn!("Failed to remove replaced file {}", old.public_id);
        }
    }

    Ok(uploaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_independent_of_parameter_order() {
        let a = sign(
            &[
                ("timestamp", String::from("1700000000")),
                ("upload_preset", String::from("menu")),
            ],
            "secret",
        );
        let b = sign(
            &[
                ("upload_preset", String::from("menu")),
                ("timestamp", String::from("1700000000")),
            ],
            "secret",
        );
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_matches_manual_digest() {
        let mut hasher = Sha256::new();
        hasher.update("public_id=abc&timestamp=42shh");
        let expected = base16ct::lower::encode_string(&hasher.finalize());

        assert_eq!(
            sign(
                &[
                    ("timestamp", String::from("42")),
                    ("public_id", String::from("abc"))
                ],
                "shh"
            ),
            expected
        );
    }
}
