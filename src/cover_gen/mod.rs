use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

pub(super) const DEFAULT_GEN_ENDPOINT: &str = "http://localhost:6969/gen";


#[derive(Debug, Error)]
pub(crate) enum GenError {
    #[error("cover letter request failed with status {status}")]
    RequestFailed { status: StatusCode },
    #[error("cover letter request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),
}


#[derive(Serialize)]
struct GenRequest<'a> {
    description: &'a str,
}


/// Client for the local cover letter generation endpoint.
pub(crate) struct GenClient {
    endpoint: String,
    client: reqwest::Client,
}

impl GenClient {
    pub(crate) fn new(endpoint: String, client: reqwest::Client) -> Self {
        Self { endpoint, client }
    }

    /// Send the job description and return the generated cover letter text.
    ///
    /// Exactly one request per call, no retries and no deadline beyond what the
    /// transport imposes. A non 2xx status becomes [`GenError::RequestFailed`];
    /// anything the transport reports, including a failed body read, becomes
    /// [`GenError::Transport`]. The response body is treated opaquely.
    pub(crate) async fn generate(&self, description: &str) -> Result<String, GenError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .json(&GenRequest { description })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenError::RequestFailed { status });
        }

        Ok(response.text().await?)
    }
}


#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(server: &MockServer) -> GenClient {
        GenClient::new(format!("{}/gen", server.uri()), reqwest::Client::new())
    }

    #[tokio::test]
    async fn returns_the_cover_letter_text_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gen"))
            .and(header("content-type", "application/json; charset=UTF-8"))
            .and(body_json(serde_json::json!({ "description": "Build things" })))
            .respond_with(ResponseTemplate::new(200).set_body_string("Dear Hiring Manager..."))
            .expect(1)
            .mount(&server)
            .await;

        let letter = test_client(&server).generate("Build things").await.unwrap();
        assert_eq!(letter, "Dear Hiring Manager...");
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_its_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gen"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = test_client(&server).generate("Build things").await.unwrap_err();
        assert!(
            matches!(err, GenError::RequestFailed { status } if status == StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Grab an address nothing will be listening on once the server is gone.
        // An exclusive (non-pooled) server is required here: pooled servers keep
        // their listener bound after drop, so the port would still answer.
        let server = MockServer::builder().start().await;
        let endpoint = format!("{}/gen", server.uri());
        drop(server);

        let err = GenClient::new(endpoint, reqwest::Client::new())
            .generate("Build things")
            .await
            .unwrap_err();
        assert!(matches!(err, GenError::Transport(_)));
    }
}
