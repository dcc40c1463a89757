use crate::request::{HttpRequest, redact_url};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub total: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            total: Duration::from_secs(30),
        }
    }
}

/// `Build` means the request never left the process; `Transport` and `Timeout`
/// mean the remote side could not be reached or did not answer in time.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("could not build request: {0}")]
    Build(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("http request failed: {0}")]
    Transport(String),
}

impl HttpError {
    pub fn is_build(&self) -> bool {
        matches!(self, HttpError::Build(_))
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        // reqwest includes the URL in its messages; strip credentials before
        // the error can reach a log line.
        let msg = match e.url() {
            Some(u) => e
                .to_string()
                .replace(u.as_str(), &redact_url(u.as_str())),
            None => e.to_string(),
        };
        if e.is_builder() {
            HttpError::Build(msg)
        } else if e.is_timeout() {
            HttpError::Timeout(msg)
        } else {
            HttpError::Transport(msg)
        }
    }
}

pub async fn execute(req: &HttpRequest, timeouts: HttpTimeouts) -> Result<HttpResponse, HttpError> {
    // Without an explicit timeout a stalled provider would park the session in
    // Processing forever.
    let client = reqwest::Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.total)
        .build()
        .map_err(|e| HttpError::Build(format!("build http client: {e}")))?;

    let mut headers = HeaderMap::new();
    for (k, v) in &req.headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|_| HttpError::Build(format!("invalid header name: {k}")))?;
        let value = HeaderValue::from_str(v)
            .map_err(|_| HttpError::Build(format!("invalid header value for {k}")))?;
        headers.insert(name, value);
    }

    let url = reqwest::Url::parse(&req.url)
        .map_err(|e| HttpError::Build(format!("invalid url {}: {e}", redact_url(&req.url))))?;

    // search.list is a plain GET; nothing here sends a body.
    if req.method != "GET" {
        return Err(HttpError::Build(format!("unsupported method: {}", req.method)));
    }
    let builder = client.get(url).headers(headers);

    log::debug!("http {} {}", req.method, redact_url(&req.url));

    let resp = builder.send().await.map_err(HttpError::from_reqwest)?;
    let status = resp.status().as_u16();
    let body = resp
        .bytes()
        .await
        .map_err(HttpError::from_reqwest)?
        .to_vec();

    Ok(HttpResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "gatos"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let req = HttpRequest::get(format!("{}/search?q=gatos", server.uri()));
        let resp = execute(&req, HttpTimeouts::default()).await.unwrap();
        assert_eq!(resp.status, 503);
        assert!(!resp.is_success());
        assert_eq!(resp.body, b"down");
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let req = HttpRequest::get(server.uri());
        let timeouts = HttpTimeouts {
            connect: Duration::from_secs(1),
            total: Duration::from_millis(50),
        };
        let err = execute(&req, timeouts).await.unwrap_err();
        assert!(matches!(err, HttpError::Timeout(_)), "{err:?}");
    }

    #[tokio::test]
    async fn invalid_header_is_a_build_error() {
        let mut req = HttpRequest::get("http://127.0.0.1:9/");
        req.headers.push(("bad header".into(), "v".into()));
        let err = execute(&req, HttpTimeouts::default()).await.unwrap_err();
        assert!(err.is_build());
    }

    #[tokio::test]
    async fn non_get_method_is_a_build_error() {
        let mut req = HttpRequest::get("http://127.0.0.1:9/search");
        req.method = "POST".into();
        let err = execute(&req, HttpTimeouts::default()).await.unwrap_err();
        assert!(err.is_build());
        assert!(err.to_string().contains("POST"));
    }

    #[tokio::test]
    async fn invalid_url_is_a_build_error() {
        let req = HttpRequest::get("not a url?key=secret");
        let err = execute(&req, HttpTimeouts::default()).await.unwrap_err();
        assert!(err.is_build());
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) is closed on test machines.
        let req = HttpRequest::get("http://127.0.0.1:9/search?key=k");
        let err = execute(
            &req,
            HttpTimeouts {
                connect: Duration::from_secs(2),
                total: Duration::from_secs(2),
            },
        )
        .await
        .unwrap_err();
        assert!(!err.is_build(), "{err:?}");
    }
}
