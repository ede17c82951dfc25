use crate::request::{Body, HttpRequest};
use anyhow::{Context, anyhow};
use moodreader_core::config::HttpTimeouts;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

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

/// Transport limits. The controller enforces no timeout of its own, so these
/// are the only bound on a stuck curation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpTimeouts::default().into()
    }
}

impl From<HttpTimeouts> for HttpSettings {
    fn from(t: HttpTimeouts) -> Self {
        Self {
            connect_timeout: Duration::from_secs(t.connect_timeout_secs),
            timeout: Duration::from_secs(t.request_timeout_secs),
        }
    }
}

pub async fn execute(req: &HttpRequest) -> anyhow::Result<HttpResponse> {
    execute_with(req, &HttpSettings::default()).await
}

pub async fn execute_with(req: &HttpRequest, settings: &HttpSettings) -> anyhow::Result<HttpResponse> {
    let client = reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.timeout)
        .build()
        .context("build http client")?;

    let mut headers = HeaderMap::new();
    for (k, v) in &req.headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .with_context(|| format!("invalid header name: {k}"))?;
        let value =
            HeaderValue::from_str(v).with_context(|| format!("invalid header value for {k}"))?;
        headers.insert(name, value);
    }

    let builder = match req.method.as_str() {
        "GET" => client.get(&req.url),
        "HEAD" => client.head(&req.url),
        "POST" => client.post(&req.url),
        other => return Err(anyhow!("unsupported method: {other}")),
    }
    .headers(headers);

    let builder = match &req.body {
        Body::Empty => builder,
        Body::Json(s) => builder.body(s.clone()),
    };

    let resp = builder.send().await.context("http request failed")?;
    let status = resp.status().as_u16();
    let body = resp
        .bytes()
        .await
        .context("failed reading response body")?
        .to_vec();

    Ok(HttpResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn settings_follow_configured_timeouts() {
        let s: HttpSettings = HttpTimeouts {
            connect_timeout_secs: 3,
            request_timeout_secs: 45,
        }
        .into();
        assert_eq!(s.connect_timeout, Duration::from_secs(3));
        assert_eq!(s.timeout, Duration::from_secs(45));
    }

    #[tokio::test]
    async fn posts_json_body_with_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("x-goog-api-key", "k"))
            .and(body_string(r#"{"a":1}"#))
            .respond_with(ResponseTemplate::new(201).set_body_string("ok"))
            .mount(&server)
            .await;

        let req = HttpRequest {
            method: "POST".into(),
            url: format!("{}/echo", server.uri()),
            headers: vec![
                ("Content-Type".into(), "application/json".into()),
                ("x-goog-api-key".into(), "k".into()),
            ],
            body: Body::Json(r#"{"a":1}"#.into()),
        };

        let resp = execute(&req).await.unwrap();
        assert_eq!(resp.status, 201);
        assert!(resp.is_success());
        assert_eq!(resp.body, b"ok");
    }

    #[tokio::test]
    async fn rejects_unsupported_method() {
        let mut req = HttpRequest::get("http://127.0.0.1:9/");
        req.method = "PATCH".into();
        let err = execute(&req).await.unwrap_err();
        assert!(err.to_string().contains("unsupported method"));
    }
}
