//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use studio_shared::StorageSettings;

use super::error::StorageError;

/// Byte store for uploaded documents.
pub struct StorageService {
    operator: Operator,
    provider: &'static str,
}

impl StorageService {
    /// Create a storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let operator = Self::create_operator(settings)?;
        let provider = match settings {
            StorageSettings::Local { .. } => "local",
            StorageSettings::S3 { .. } => "s3",
        };
        Ok(Self { operator, provider })
    }

    fn create_operator(settings: &StorageSettings) -> Result<Operator, StorageError> {
        match settings {
            StorageSettings::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageSettings::Local { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Store `data` under `key`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    pub async fn write(&self, key: &str, data: Bytes) -> Result<(), StorageError> {
        validate_key(key)?;
        self.operator.write(key, data).await?;
        Ok(())
    }

    /// Read the whole object stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored under `key`.
    pub async fn read(&self, key: &str) -> Result<Bytes, StorageError> {
        validate_key(key)?;
        match self.operator.read(key).await {
            Ok(buffer) => Ok(buffer.to_bytes()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a file from storage. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match self.operator.delete(key).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a file exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        validate_key(key).is_ok() && self.operator.stat(key).await.is_ok()
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }
}

/// Keys are flat relative names: no empty keys, no leading slash, no `..`.
fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
