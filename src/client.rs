use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::credentials::Credentials;
use crate::error::{Result, YouTrackError};

pub const DEFAULT_BASE_URL: &str = "https://celayix.myjetbrains.com/youtrack";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin wrapper over the YouTrack REST API.
///
/// Holds no credentials: every call takes the caller's [`Credentials`].
pub struct YouTrackClient {
    http: Client,
    api_root: Url,
    timeout: Duration,
}

impl YouTrackClient {
    /// `timeout` bounds each JSON call end to end. For streamed downloads it
    /// only bounds the wait between reads, so large files are not cut off.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let api_root = format!("{}/api/", base_url.trim_end_matches('/'));
        let api_root =
            Url::parse(&api_root).map_err(|_| YouTrackError::InvalidUrl(base_url.to_string()))?;

        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_root,
            timeout,
        })
    }

    /// GET `<base>/api/<path>` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        credentials: &Credentials,
    ) -> Result<T> {
        let url = self
            .api_root
            .join(path.trim_start_matches('/'))
            .map_err(|_| YouTrackError::InvalidUrl(path.to_string()))?;

        let request = self.request(url, query, credentials)?.timeout(self.timeout);
        let body = Self::check_status(request.send().await?).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET an absolute URL for streaming. Anything but `200 OK` becomes
    /// [`YouTrackError::Remote`] with the raw response body.
    pub async fn get(
        &self,
        url: Url,
        query: &[(&str, String)],
        credentials: &Credentials,
    ) -> Result<Response> {
        let response = self.request(url, query, credentials)?.send().await?;
        Self::check_status(response).await
    }

    /// Credentials are only attached when the target shares the tracker's origin.
    fn request(
        &self,
        url: Url,
        query: &[(&str, String)],
        credentials: &Credentials,
    ) -> Result<RequestBuilder> {
        tracing::debug!(%url, "GET");

        let same_origin = url.origin() == self.api_root.origin();
        let mut request = self.http.get(url).query(query);
        if same_origin {
            request = request.headers(credentials.headers()?);
        } else {
            tracing::debug!("foreign host, sending request without credentials");
        }
        Ok(request)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(YouTrackError::Remote {
                status: status.as_u16(),
                body: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response)
    }

    /// Resolve an attachment href against the tracker host. Host-relative
    /// paths are joined onto the origin; absolute URLs pass through.
    pub fn resolve_url(&self, href: &str) -> Result<Url> {
        self.api_root
            .join(href)
            .map_err(|_| YouTrackError::InvalidUrl(href.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client(base: &str) -> YouTrackClient {
        YouTrackClient::new(base, DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn test_relative_href_joins_host() {
        let c = client("https://example.myjetbrains.com/youtrack/");
        assert_eq!(
            c.resolve_url("/youtrack/api/files/74-1?sign=abc").unwrap().as_str(),
            "https://example.myjetbrains.com/youtrack/api/files/74-1?sign=abc"
        );
    }

    #[test]
    fn test_absolute_href_passes_through() {
        let c = client("https://example.myjetbrains.com/youtrack");
        assert_eq!(
            c.resolve_url("https://cdn.example.com/a.png").unwrap().as_str(),
            "https://cdn.example.com/a.png"
        );
    }

    #[tokio::test]
    async fn test_json_call_is_bounded_by_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let c = YouTrackClient::new(&server.uri(), Duration::from_millis(300)).unwrap();
        let err = c
            .get_json::<serde_json::Value>("issues/CEL-1", &[], &Credentials::bearer("t"))
            .await
            .unwrap_err();

        assert!(matches!(err, YouTrackError::Http(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_foreign_host_gets_no_credentials() {
        let tracker = MockServer::start().await;
        let cdn = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.png"))
            .and(|req: &Request| !req.headers.contains_key("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
            .expect(1)
            .mount(&cdn)
            .await;

        let c = client(&tracker.uri());
        let url = c.resolve_url(&format!("{}/a.png", cdn.uri())).unwrap();
        let response = c.get(url, &[], &Credentials::bearer("secret")).await.unwrap();

        assert_eq!(response.bytes().await.unwrap().as_ref(), b"png");
    }

    #[tokio::test]
    async fn test_same_host_gets_credentials() {
        let tracker = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/1"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&tracker)
            .await;

        let c = client(&tracker.uri());
        let url = c.resolve_url("/files/1").unwrap();
        c.get(url, &[], &Credentials::bearer("secret")).await.unwrap();
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            YouTrackClient::new("not a url", DEFAULT_TIMEOUT),
            Err(YouTrackError::InvalidUrl(_))
        ));
    }
}
