use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("cannot connect to {url}")]
    Connect { url: String, authority: String },
    #[error("no response from {url} within {timeout:?}")]
    Timeout { url: String, timeout: Duration },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16, body: String },
    #[error("{url} did not return JSON: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ProbeError {
    /// 给用户的修复提示
    pub fn hint(&self) -> String {
        match self {
            ProbeError::Connect { authority, .. } => format!(
                "Is the server running on {}? Start it with `continuity serve`.",
                authority
            ),
            ProbeError::Timeout { .. } => {
                "The server accepted the connection but did not answer. Check its logs for a stuck handler.".to_string()
            }
            ProbeError::Status { status, .. } if *status == 404 => {
                "The route is not mounted on this server. Check the endpoint path.".to_string()
            }
            ProbeError::Status { .. } => "The server reported an error. Check its logs.".to_string(),
            ProbeError::Parse { .. } => {
                "Something other than the API server is answering on this port.".to_string()
            }
            ProbeError::Request(_) => "Check the base URL.".to_string(),
        }
    }
}

/// 一次成功探测的结果
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub url: String,
    pub status: u16,
    pub elapsed: Duration,
    pub body: Value,
}

/// 对 API 服务发起单次 GET 探测，不重试
pub struct HealthProbe {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HealthProbe {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    pub async fn probe(&self, endpoint: &str) -> Result<ProbeReport, ProbeError> {
        let url = self.url_for(endpoint);
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(&url, e))?;
        let elapsed = started.elapsed();

        if !status.is_success() {
            return Err(ProbeError::Status {
                url,
                status: status.as_u16(),
                body: text,
            });
        }

        let body = serde_json::from_str(&text).map_err(|source| ProbeError::Parse {
            url: url.clone(),
            source,
        })?;

        log::debug!("GET {} -> {} in {:?}", url, status, elapsed);

        Ok(ProbeReport {
            url,
            status: status.as_u16(),
            elapsed,
            body,
        })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            ProbeError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if err.is_connect() {
            let authority = reqwest::Url::parse(url)
                .ok()
                .and_then(|u| {
                    u.host_str()
                        .map(|h| format!("{}:{}", h, u.port_or_known_default().unwrap_or(80)))
                })
                .unwrap_or_else(|| url.to_string());
            ProbeError::Connect {
                url: url.to_string(),
                authority,
            }
        } else {
            ProbeError::Request(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 启动一个只回复一次固定响应的 TCP 服务
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_url_join() {
        let probe = HealthProbe::new("http://localhost:5000/", DEFAULT_PROBE_TIMEOUT).unwrap();
        assert_eq!(probe.url_for("/api/health"), "http://localhost:5000/api/health");
        assert_eq!(probe.url_for("api/test"), "http://localhost:5000/api/test");
    }

    #[actix_rt::test]
    async fn test_probe_success() {
        let base = one_shot_server("HTTP/1.1 200 OK", r#"{"status":"OK"}"#).await;
        let probe = HealthProbe::new(&base, DEFAULT_PROBE_TIMEOUT).unwrap();

        let report = probe.probe("/api/health").await.unwrap();
        assert_eq!(report.status, 200);
        assert_eq!(report.body["status"], "OK");
        assert!(report.url.ends_with("/api/health"));
    }

    #[actix_rt::test]
    async fn test_probe_error_status() {
        let base = one_shot_server("HTTP/1.1 500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let probe = HealthProbe::new(&base, DEFAULT_PROBE_TIMEOUT).unwrap();

        match probe.probe("/api/health").await {
            Err(ProbeError::Status { status, body, .. }) => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_probe_not_json() {
        let base = one_shot_server("HTTP/1.1 200 OK", "<html>hi</html>").await;
        let probe = HealthProbe::new(&base, DEFAULT_PROBE_TIMEOUT).unwrap();

        let err = probe.probe("/").await.unwrap_err();
        assert!(matches!(err, ProbeError::Parse { .. }));
    }

    #[actix_rt::test]
    async fn test_probe_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = HealthProbe::new(&format!("http://{}", addr), DEFAULT_PROBE_TIMEOUT).unwrap();
        let err = probe.probe("/api/health").await.unwrap_err();

        match &err {
            ProbeError::Connect { authority, .. } => {
                assert_eq!(authority, &addr.to_string());
            }
            other => panic!("expected connect error, got {:?}", other),
        }
        assert!(err.hint().contains("continuity serve"));
    }

    #[actix_rt::test]
    async fn test_probe_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // 接受连接但从不回复
        tokio::spawn(async move {
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(socket);
            }
        });

        let timeout = Duration::from_millis(200);
        let probe = HealthProbe::new(&format!("http://{}", addr), timeout).unwrap();

        match probe.probe("/api/health").await {
            Err(ProbeError::Timeout { timeout: t, .. }) => assert_eq!(t, timeout),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
