//! HTTP client for the project-management API.
//!
//! JSON over HTTPS with a bearer token. Each integration endpoint answers
//! with the updated project. Errors carry a human readable `msg`.

use meat_core::{
    application::{ApiError, ports::ProjectApi},
    domain::{Project, ProjectType},
    error::MeatResult,
};
use reqwest::blocking::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("meat-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: String,
}

pub struct HttpProjectApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpProjectApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> MeatResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            // Provisioning a staging host can run for minutes.
            .timeout(None)
            .build()
            .map_err(|e| ApiError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn post(&self, path: &str, body: &Value) -> Result<String, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
        let url = self.url(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .map_err(|e| ApiError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let text = response.text().map_err(|e| ApiError::Transport {
            reason: e.to_string(),
        })?;
        check_status(status, text)
    }

    fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> MeatResult<T> {
        let text = self.post(path, body)?;
        Ok(decode(&text)?)
    }
}

/// Split a response into its body or the matching `ApiError`.
///
/// Only error bodies carrying `msg` count as rejections; anything else is
/// reported with the raw status.
fn check_status(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        return Ok(body);
    }

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody { msg }) => Err(ApiError::Rejected {
            status,
            message: msg,
        }),
        Err(_) => Err(ApiError::Transport {
            reason: format!("HTTP {status}: {}", body.trim()),
        }),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        reason: e.to_string(),
    })
}

impl ProjectApi for HttpProjectApi {
    #[instrument(skip(self))]
    fn create_project(
        &self,
        code: &str,
        name: &str,
        project_type: ProjectType,
    ) -> MeatResult<Project> {
        self.post_json(
            "projects",
            &json!({ "code": code, "name": name, "type": project_type }),
        )
    }

    fn setup_source_hosting(&self, project_id: u64) -> MeatResult<Project> {
        self.post_json(&format!("projects/{project_id}/source-hosting"), &json!({}))
    }

    fn setup_hosting_platform(&self, project_id: u64, build_script: &str) -> MeatResult<Project> {
        self.post_json(
            &format!("projects/{project_id}/hosting-platform"),
            &json!({ "build_script": build_script }),
        )
    }

    fn setup_task_board(&self, project_id: u64) -> MeatResult<Project> {
        self.post_json(&format!("projects/{project_id}/task-board"), &json!({}))
    }

    fn setup_chat_channel(&self, project_id: u64) -> MeatResult<Project> {
        self.post_json(&format!("projects/{project_id}/chat-channel"), &json!({}))
    }

    fn notify_installation(&self, project_code: &str) -> MeatResult<()> {
        self.post(&format!("projects/{project_code}/installations"), &json!({}))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msg_bodies_become_rejections() {
        let err = check_status(422, r#"{"msg":"The code has already been taken."}"#.into())
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 422,
                message: "The code has already been taken.".into()
            }
        );
    }

    #[test]
    fn other_failures_are_not_rejections() {
        let err = check_status(502, "<html>Bad gateway</html>".into()).unwrap_err();
        assert!(matches!(err, ApiError::Transport { reason } if reason.starts_with("HTTP 502")));
    }

    #[test]
    fn success_passes_body_through() {
        assert_eq!(check_status(201, "{}".into()).unwrap(), "{}");
    }

    #[test]
    fn malformed_project_is_a_decode_error() {
        let err = decode::<Project>(r#"{"id":"nope"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn missing_token_fails_before_any_request() {
        let api = HttpProjectApi::new("http://127.0.0.1:9", None).unwrap();
        let err = api.post("projects", &json!({})).unwrap_err();
        assert_eq!(err, ApiError::MissingToken);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let api = HttpProjectApi::new("https://api.example.test/v1/", Some("t".into())).unwrap();
        assert_eq!(api.url("projects"), "https://api.example.test/v1/projects");
    }
}
