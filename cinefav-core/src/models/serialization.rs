use serde::de::DeserializeOwned;

use crate::error::CinefavError;

pub fn from_json<T: DeserializeOwned>(data: &[u8]) -> Result<T, CinefavError> {
    serde_json::from_slice(data).map_err(|e| CinefavError::Serialization(e.to_string()))
}
