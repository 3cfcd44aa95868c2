//! One authenticated transport call, start to finish.

use reqwest::blocking::RequestBuilder;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::client::NotaryClient;
use crate::error::NotaryError;
use crate::response::ResponseMetadata;
use crate::Result;

impl NotaryClient {
    /// Authenticated GET against the notary service.
    pub(crate) fn execute_get(&self, url: Url) -> Result<ResponseMetadata> {
        let request = self.http.get(url.clone());
        self.execute(self.authenticate(request)?, &url)
    }

    /// Authenticated POST with a JSON body.
    pub(crate) fn execute_post<T: Serialize>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<ResponseMetadata> {
        let request = self.http.post(url.clone()).json(body);
        self.execute(self.authenticate(request)?, &url)
    }

    /// Plain GET without the bearer token, for the temporary log URL.
    pub(crate) fn execute_unauthenticated_get(
        &self,
        url: Url,
    ) -> Result<ResponseMetadata> {
        let request = self
            .http
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent);
        self.execute(request, &url)
    }

    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token_manager.current_token()?;
        Ok(request
            .header(USER_AGENT, &self.user_agent)
            .header(AUTHORIZATION, format!("Bearer {}", token.encoded())))
    }

    /// Send the request and capture the response metadata exactly once.
    /// The body is drained here on every path so the connection returns to
    /// the pool; transport failures pass the reqwest message through as
    /// [`NotaryError::Connection`].
    fn execute(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<ResponseMetadata> {
        debug!(%url, "sending request");
        let response = request
            .send()
            .map_err(|e| NotaryError::Connection(e.to_string()))?;
        let meta = ResponseMetadata::from_blocking(response)?;
        debug!(status = meta.status_code, url = %meta.request_url, "response received");
        Ok(meta)
    }
}
