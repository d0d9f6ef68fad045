//! HTTP risk-scoring adapter. Posts the feature record to the prediction service.

use crate::adapters::http::{client_with_timeout, describe, snippet};
use crate::domain::{DomainError, FeatureRecord, Rate, RiskRecord};
use crate::ports::RiskScoringPort;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

pub struct HttpRiskScorer {
    client: reqwest::Client,
    url: String,
}

impl HttpRiskScorer {
    /// # Arguments
    /// * `url` - Prediction endpoint, e.g. "http://127.0.0.1:5000/predict"
    /// * `timeout` - Upper bound for each request
    pub fn new(url: String, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: client_with_timeout(timeout)?,
            url,
        })
    }
}

/// Reply as sent by the service; every field may be absent.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRiskResponse {
    #[serde(default)]
    failure_rate: Option<Rate>,
    #[serde(default)]
    success_rate: Option<Rate>,
    #[serde(default)]
    risk_factors: Option<Vec<String>>,
}

impl RawRiskResponse {
    /// A reply without `risk_factors` (or without rates) is an invalid result, not a transport failure.
    pub(crate) fn into_record(self) -> Result<RiskRecord, DomainError> {
        let risk_factors = self.risk_factors.ok_or_else(|| {
            DomainError::InvalidScoringResult("risk_factors missing from response".to_string())
        })?;
        match (self.failure_rate, self.success_rate) {
            (Some(failure_rate), Some(success_rate)) => Ok(RiskRecord {
                failure_rate,
                success_rate,
                risk_factors,
            }),
            _ => Err(DomainError::InvalidScoringResult(
                "failure_rate or success_rate missing from response".to_string(),
            )),
        }
    }
}

/// Decode a successful reply body. Text that is not the expected JSON is an invalid result.
pub(crate) fn parse_body(text: &str) -> Result<RiskRecord, DomainError> {
    let raw: RawRiskResponse = serde_json::from_str(text).map_err(|e| {
        DomainError::InvalidScoringResult(format!(
            "unreadable prediction response: {}: {}",
            e,
            snippet(text)
        ))
    })?;
    raw.into_record()
}

#[async_trait::async_trait]
impl RiskScoringPort for HttpRiskScorer {
    async fn score(&self, features: &FeatureRecord) -> Result<RiskRecord, DomainError> {
        info!(
            industry = %features.industry,
            budget = %features.budget,
            country = %features.country,
            "sending features to prediction model"
        );

        let response = self
            .client
            .post(&self.url)
            .json(features)
            .send()
            .await
            .map_err(|e| DomainError::ScoringUnavailable(describe(&e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %snippet(&text), "prediction model returned error");
            return Err(DomainError::ScoringUnavailable(format!(
                "prediction model error {}: {}",
                status,
                snippet(&text)
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DomainError::ScoringUnavailable(describe(&e)))?;
        let record = parse_body(&text)?;
        info!(
            failure_rate = %record.failure_rate,
            factors = record.risk_factors.len(),
            "prediction received"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn features() -> FeatureRecord {
        FeatureRecord {
            industry: "Tech".into(),
            budget: "1-5L".into(),
            team_size: "2-5".into(),
            market_size: "Medium".into(),
            country: "India".into(),
        }
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.trim().eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        request.len() >= end + 4 + length
    }

    /// One-shot server: reads a full request, writes `response` verbatim, closes.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request_complete(&request) {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        format!("http://{}/predict", addr)
    }

    fn direct_scorer(url: String) -> HttpRiskScorer {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpRiskScorer { client, url }
    }

    #[tokio::test]
    async fn test_score_reads_complete_reply() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 73\r\nConnection: close\r\n\r\n{\"success_rate\":40,\"failure_rate\":60,\"risk_factors\":[\"High competition\"]}",
        )
        .await;
        let scorer = direct_scorer(url);

        let record = scorer.score(&features()).await.unwrap();
        assert_eq!(record.failure_rate.percent(), Some(60.0));
    }

    #[tokio::test]
    async fn test_truncated_body_is_unavailable() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n{\"success_rate\":",
        )
        .await;
        let scorer = direct_scorer(url);

        let err = scorer.score(&features()).await.unwrap_err();
        assert!(matches!(err, DomainError::ScoringUnavailable(_)), "{:?}", err);
        assert!(err.is_transport());
    }

    #[test]
    fn test_non_json_body_is_invalid() {
        assert!(matches!(
            parse_body("<html>Internal proxy page</html>"),
            Err(DomainError::InvalidScoringResult(_))
        ));
    }

    #[test]
    fn test_complete_response() {
        let raw: RawRiskResponse = serde_json::from_str(
            r#"{"success_rate":"37.5%","failure_rate":"62.5%","risk_factors":["High competition"]}"#,
        )
        .unwrap();
        let record = raw.into_record().unwrap();
        assert_eq!(record.failure_rate.percent(), Some(62.5));
        assert_eq!(record.risk_factors, vec!["High competition".to_string()]);
    }

    #[test]
    fn test_missing_risk_factors_is_invalid() {
        let raw: RawRiskResponse =
            serde_json::from_str(r#"{"success_rate":40,"failure_rate":60}"#).unwrap();
        assert!(matches!(
            raw.into_record(),
            Err(DomainError::InvalidScoringResult(_))
        ));
    }

    #[test]
    fn test_error_body_is_invalid() {
        let raw: RawRiskResponse =
            serde_json::from_str(r#"{"error":"Invalid category in input"}"#).unwrap();
        assert!(matches!(
            raw.into_record(),
            Err(DomainError::InvalidScoringResult(_))
        ));
    }
}
