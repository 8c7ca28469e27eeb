//! Lenient JSON helpers for call sites written against the old client.
//!
//! A non-2xx response is NOT an error here: the helpers return
//! `T::default()` and callers detect failure by checking for that value.
//! Transport faults, timeouts, and undecodable 2xx bodies still fail.
//! New code should use [`ApiClient::get`] / [`ApiClient::post`], which
//! report the status as [`crate::ApiError::Status`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::response::RawResponse;

impl ApiClient {
    /// GET and deserialize on 2xx; any other status yields `T::default()`.
    pub async fn get_json<T>(&self, path: &str, token: Option<&str>) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.get_raw(path, token).await?;
        default_on_failure(path, raw)
    }

    /// POST a JSON body and deserialize on 2xx; any other status yields `T::default()`.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let raw = self.post_raw(path, body, token).await?;
        default_on_failure(path, raw)
    }
}

fn default_on_failure<T>(path: &str, raw: RawResponse) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    if !raw.is_success() {
        debug!(path = %path, status = raw.status, "Non-success status, returning default value");
        return Ok(T::default());
    }
    raw.json()
}
