use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ProjectType};

/// A project registered on the remote project-management API.
///
/// Every integration call returns a fresh snapshot; callers replace their
/// copy instead of patching fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub repo_full_name: Option<String>,
}

impl Project {
    /// SSH remote of the project's source-hosting repository.
    pub fn remote_url(&self, git_host: &str) -> Result<String, DomainError> {
        self.repo_full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(|name| format!("git@{git_host}:{name}.git"))
            .ok_or_else(|| DomainError::MissingRepository {
                code: self.code.clone(),
            })
    }
}
