//! In-memory project API for end-to-end tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use meat_core::{
    application::{ApiError, ports::ProjectApi},
    domain::{Project, ProjectType},
    error::MeatResult,
};

/// A call received by [`InMemoryProjectApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    CreateProject { code: String, name: String, project_type: ProjectType },
    SourceHosting(u64),
    HostingPlatform { id: u64, build_script: String },
    TaskBoard(u64),
    ChatChannel(u64),
    NotifyInstallation(String),
}

/// Registers projects in memory and records every call.
///
/// Codes listed with [`taken`](Self::taken) are rejected the way the real
/// service rejects duplicates.
#[derive(Debug, Clone)]
pub struct InMemoryProjectApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    next_id: u64,
    organization: String,
    taken: Vec<String>,
    project: Option<Project>,
    calls: Vec<ApiCall>,
    notify_failures: VecDeque<ApiError>,
}

impl InMemoryProjectApi {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 1,
                organization: organization.into(),
                taken: Vec::new(),
                project: None,
                calls: Vec::new(),
                notify_failures: VecDeque::new(),
            })),
        }
    }

    /// Reject `code` as already taken.
    pub fn taken(self, code: impl Into<String>) -> Self {
        self.lock().taken.push(code.into());
        self
    }

    /// Fail the next installation notification with `error`.
    pub fn fail_next_notification(self, error: ApiError) -> Self {
        self.lock().notify_failures.push_back(error);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn update(
        &self,
        call: ApiCall,
        id: u64,
        apply: impl FnOnce(&mut Project, &str),
    ) -> MeatResult<Project> {
        let mut inner = self.lock();
        inner.calls.push(call);
        let organization = inner.organization.clone();

        match inner.project.as_mut() {
            Some(project) if project.id == id => {
                apply(project, &organization);
                Ok(project.clone())
            }
            _ => Err(ApiError::Rejected {
                status: 404,
                message: format!("Project {id} not found"),
            }
            .into()),
        }
    }
}

impl ProjectApi for InMemoryProjectApi {
    fn create_project(
        &self,
        code: &str,
        name: &str,
        project_type: ProjectType,
    ) -> MeatResult<Project> {
        let mut inner = self.lock();
        inner.calls.push(ApiCall::CreateProject {
            code: code.into(),
            name: name.into(),
            project_type,
        });

        if inner.taken.iter().any(|t| t == code) {
            return Err(ApiError::Rejected {
                status: 422,
                message: "The code has already been taken.".into(),
            }
            .into());
        }

        let project = Project {
            id: inner.next_id,
            code: code.into(),
            name: name.into(),
            project_type,
            repo_full_name: None,
        };
        inner.next_id += 1;
        inner.taken.push(code.into());
        inner.project = Some(project.clone());
        Ok(project)
    }

    fn setup_source_hosting(&self, project_id: u64) -> MeatResult<Project> {
        self.update(
            ApiCall::SourceHosting(project_id),
            project_id,
            |project, organization| {
                project.repo_full_name = Some(format!("{organization}/{}", project.code));
            },
        )
    }

    fn setup_hosting_platform(&self, project_id: u64, build_script: &str) -> MeatResult<Project> {
        self.update(
            ApiCall::HostingPlatform {
                id: project_id,
                build_script: build_script.into(),
            },
            project_id,
            |_, _| {},
        )
    }

    fn setup_task_board(&self, project_id: u64) -> MeatResult<Project> {
        self.update(ApiCall::TaskBoard(project_id), project_id, |_, _| {})
    }

    fn setup_chat_channel(&self, project_id: u64) -> MeatResult<Project> {
        self.update(ApiCall::ChatChannel(project_id), project_id, |_, _| {})
    }

    fn notify_installation(&self, project_code: &str) -> MeatResult<()> {
        let mut inner = self.lock();
        inner
            .calls
            .push(ApiCall::NotifyInstallation(project_code.into()));
        match inner.notify_failures.pop_front() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}
