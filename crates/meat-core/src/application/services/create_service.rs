//! Create Service - register a new project and scaffold it locally.
//!
//! Workflow:
//! 1. Ask for the scaffold type and project name
//! 2. Register the project remotely, re-asking the code while it is rejected
//! 3. Ask for an installation folder that does not exist yet
//! 4. Run the scaffold command
//! 5. Wire the optional integrations
//! 6. Initialise git against the new repository

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::application::ports::{
    Console, Filesystem, ProjectApi, ProjectConfigSource, Prompter, ShellCommand, ShellRunner,
};
use crate::application::services::{RepositoryManager, run_checked};
use crate::domain::{
    BuildMode, Conventions, DomainError, Project, ProjectType, scaffold_command, slugify,
};
use crate::error::MeatResult;

const BANNER: &str = "=============================";

/// Adapters the creation flow runs against.
pub struct CreatePorts {
    pub shell: Box<dyn ShellRunner>,
    pub filesystem: Box<dyn Filesystem>,
    pub prompter: Box<dyn Prompter>,
    pub console: Box<dyn Console>,
    pub api: Box<dyn ProjectApi>,
    pub config_source: Box<dyn ProjectConfigSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// Directory `meat` was started from; relative folders resolve here.
    pub invocation_dir: PathBuf,
    /// Add the remote but skip the initial commit.
    pub no_commit: bool,
}

/// Integrations the user accepted, in the order they were wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Integrations {
    source_hosting: bool,
    hosting_platform: bool,
    task_board: bool,
    chat_channel: bool,
}

/// Interactive flow behind `meat create`.
pub struct CreateService {
    ports: CreatePorts,
    conventions: Conventions,
}

impl CreateService {
    pub fn new(ports: CreatePorts, conventions: Conventions) -> Self {
        Self { ports, conventions }
    }

    /// Run the whole flow and return the final project snapshot.
    #[instrument(skip_all, fields(dir = %request.invocation_dir.display()))]
    pub fn create(&self, request: CreateRequest) -> MeatResult<Project> {
        let (project_type, name) = self.ask_type_and_name()?;
        let project = self.register(&name, project_type)?;
        let folder = self.ask_installation_folder(&request.invocation_dir, &project.code)?;

        self.install_scaffold(project_type, &folder, &request.invocation_dir)?;

        let (project, wired) = self.wire_integrations(project, &folder)?;

        if wired.source_hosting {
            self.ports
                .console
                .info("Setting newly created repository as a git remote")?;
            let remote = project.remote_url(&self.conventions.git_host)?;
            self.repository()
                .init_with_remote(&folder, &remote, !request.no_commit)?;
            self.ports
                .console
                .success("Repository added to remote origin successfully")?;
        }

        let console = self.ports.console.as_ref();
        console.line("")?;
        console.line(BANNER)?;
        console.line("Process complete!")?;
        console.line(BANNER)?;
        console.line("")?;

        info!(code = %project.code, ?wired, "project created");
        Ok(project)
    }

    fn repository(&self) -> RepositoryManager<'_> {
        RepositoryManager::new(
            self.ports.shell.as_ref(),
            self.ports.filesystem.as_ref(),
            self.ports.console.as_ref(),
            &self.conventions,
        )
    }

    fn ask_type_and_name(&self) -> MeatResult<(ProjectType, String)> {
        let options: Vec<String> = ProjectType::ALL
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        let chosen = self.ports.prompter.choice(
            "Select a base scaffolding",
            &options,
            ProjectType::default().as_str(),
        )?;
        let project_type: ProjectType = chosen.parse()?;
        self.ports
            .console
            .info(&format!("{} selected", project_type.label()))?;

        loop {
            let name = self.ports.prompter.ask("Project name:", None, &[])?;
            let name = name.trim();
            if !name.is_empty() {
                return Ok((project_type, name.to_string()));
            }
            self.ports
                .console
                .error(&DomainError::EmptyProjectName.to_string())?;
        }
    }

    /// Register the project, re-asking for the code on every rejection.
    fn register(&self, name: &str, project_type: ProjectType) -> MeatResult<Project> {
        let mut code = slugify(name);

        loop {
            let answer = self.ports.prompter.ask(
                &format!("Project code ({code}):"),
                Some(code.clone()),
                &[],
            )?;
            let answer = answer.trim();
            if answer.is_empty() {
                self.ports.console.error("The project code cannot be empty")?;
                continue;
            }
            code = answer.to_string();

            self.ports.console.line("Creating project remotely...")?;
            match self.ports.api.create_project(&code, name, project_type) {
                Ok(project) => {
                    self.ports.console.success("Project created successfully!")?;
                    return Ok(project);
                }
                Err(e) => match e.rejection_message() {
                    Some(message) => {
                        info!(%code, %message, "project code rejected");
                        self.ports.console.error(message)?;
                    }
                    None => return Err(e),
                },
            }
        }
    }

    fn ask_installation_folder(&self, base: &Path, code: &str) -> MeatResult<PathBuf> {
        let mut default = base.join(code).display().to_string();

        loop {
            let answer = self.ports.prompter.ask(
                &format!("Installation folder ({default}):"),
                Some(default.clone()),
                &[],
            )?;
            let answer = answer.trim();
            let folder = if answer.is_empty() {
                PathBuf::from(&default)
            } else {
                base.join(answer)
            };

            if !self.ports.filesystem.exists(&folder) {
                return Ok(folder);
            }
            self.ports.console.error("This directory already exists...")?;
            default = folder.display().to_string();
        }
    }

    fn install_scaffold(
        &self,
        project_type: ProjectType,
        folder: &Path,
        invocation_dir: &Path,
    ) -> MeatResult<()> {
        self.ports
            .console
            .info(&format!("Installing base on {}", folder.display()))?;
        let command = ShellCommand::new(scaffold_command(project_type, folder))
            .in_dir(invocation_dir)
            .streamed();
        run_checked(self.ports.shell.as_ref(), &command)?;
        Ok(())
    }

    /// Offer each integration; every response replaces the project snapshot.
    ///
    /// Staging needs a repository to deploy from, so it is only offered
    /// once source hosting exists.
    fn wire_integrations(
        &self,
        mut project: Project,
        folder: &Path,
    ) -> MeatResult<(Project, Integrations)> {
        let prompter = self.ports.prompter.as_ref();
        let console = self.ports.console.as_ref();
        let api = self.ports.api.as_ref();
        let mut wired = Integrations::default();

        if prompter.confirm("Create source repository? (Y/n):", true)? {
            console.info("Setting up source repository...")?;
            project = api.setup_source_hosting(project.id)?;
            wired.source_hosting = true;
        }

        if wired.source_hosting && prompter.confirm("Create staging server? (Y/n):", true)? {
            let config = self.ports.config_source.load(folder)?;
            let build_script = config.assets.build_script(BuildMode::Production);
            console.info("Setting up staging...")?;
            project = api.setup_hosting_platform(project.id, &build_script)?;
            wired.hosting_platform = true;
        }

        if prompter.confirm("Create task board? (Y/n):", true)? {
            console.info("Setting up task board...")?;
            project = api.setup_task_board(project.id)?;
            wired.task_board = true;
        }

        if prompter.confirm("Create chat channel? (Y/n):", true)? {
            console.info("Setting up chat channel...")?;
            project = api.setup_chat_channel(project.id)?;
            wired.chat_channel = true;
        }

        Ok((project, wired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        CommandOutput, MockConsole, MockFilesystem, MockProjectApi, MockProjectConfigSource,
        MockPrompter, MockShellRunner,
    };
    use crate::application::{ApiError, ApplicationError};
    use crate::domain::ProjectConfig;
    use crate::error::MeatError;
    use mockall::Sequence;
    use std::sync::{Arc, Mutex};

    fn project(code: &str, repo: Option<&str>) -> Project {
        Project {
            id: 7,
            code: code.into(),
            name: "Acme Web".into(),
            project_type: ProjectType::Laravel,
            repo_full_name: repo.map(String::from),
        }
    }

    fn rejected() -> MeatError {
        ApiError::Rejected {
            status: 422,
            message: "The code has already been taken.".into(),
        }
        .into()
    }

    fn console() -> MockConsole {
        let mut console = MockConsole::new();
        console.expect_line().returning(|_| Ok(()));
        console.expect_info().returning(|_| Ok(()));
        console.expect_success().returning(|_| Ok(()));
        console.expect_warning().returning(|_| Ok(()));
        console.expect_error().returning(|_| Ok(()));
        console
    }

    fn service(
        shell: MockShellRunner,
        filesystem: MockFilesystem,
        prompter: MockPrompter,
        api: MockProjectApi,
    ) -> CreateService {
        let mut config_source = MockProjectConfigSource::new();
        config_source
            .expect_load()
            .returning(|_| Ok(ProjectConfig::default()));

        CreateService::new(
            CreatePorts {
                shell: Box::new(shell),
                filesystem: Box::new(filesystem),
                prompter: Box::new(prompter),
                console: Box::new(console()),
                api: Box::new(api),
                config_source: Box::new(config_source),
            },
            Conventions::default(),
        )
    }

    fn request() -> CreateRequest {
        CreateRequest {
            invocation_dir: PathBuf::from("/work"),
            no_commit: false,
        }
    }

    /// Prompter answering type, name and folder; confirmations via `confirm`.
    fn prompter(confirm: bool) -> MockPrompter {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_choice()
            .withf(|q, options, default| {
                q == "Select a base scaffolding" && options.len() == 3 && default == "blank"
            })
            .returning(|_, _, _| Ok("laravel".into()));
        prompter
            .expect_ask()
            .withf(|q, _, _| q == "Project name:")
            .returning(|_, _, _| Ok("Acme Web".into()));
        prompter
            .expect_ask()
            .withf(|q, _, _| q.starts_with("Installation folder"))
            .returning(|_, default, _| Ok(default.unwrap_or_default()));
        prompter.expect_confirm().returning(move |_, _| Ok(confirm));
        prompter
    }

    #[test]
    fn blank_project_names_are_asked_again() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_choice()
            .returning(|_, _, _| Ok("blank".into()));
        let mut seq = Sequence::new();
        prompter
            .expect_ask()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok("   ".into()));
        prompter
            .expect_ask()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(" Acme Web ".into()));

        let mut console = MockConsole::new();
        console.expect_info().returning(|_| Ok(()));
        console
            .expect_error()
            .withf(|msg| msg == "The project name cannot be empty")
            .times(2)
            .returning(|_| Ok(()));

        let mut config_source = MockProjectConfigSource::new();
        config_source.expect_load().never();
        let service = CreateService::new(
            CreatePorts {
                shell: Box::new(MockShellRunner::new()),
                filesystem: Box::new(MockFilesystem::new()),
                prompter: Box::new(prompter),
                console: Box::new(console),
                api: Box::new(MockProjectApi::new()),
                config_source: Box::new(config_source),
            },
            Conventions::default(),
        );

        let (kind, name) = service.ask_type_and_name().unwrap();
        assert_eq!(kind, ProjectType::Blank);
        assert_eq!(name, "Acme Web");
    }

    #[test]
    fn rejected_codes_are_asked_again() {
        let mut prompter = prompter(false);
        let asked = Arc::new(Mutex::new(Vec::new()));
        let recorded = asked.clone();
        prompter
            .expect_ask()
            .withf(|q, _, _| q.starts_with("Project code"))
            .times(3)
            .returning(move |_, default, _| {
                let mut asked = recorded.lock().unwrap();
                asked.push(default.clone().unwrap_or_default());
                Ok(format!("acme-{}", asked.len()))
            });

        let mut api = MockProjectApi::new();
        let mut seq = Sequence::new();
        api.expect_create_project()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(rejected()));
        api.expect_create_project()
            .withf(|code, name, kind| {
                code == "acme-3" && name == "Acme Web" && *kind == ProjectType::Laravel
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|code, _, _| Ok(project(code, None)));

        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().returning(|_| false);
        let mut shell = MockShellRunner::new();
        shell.expect_run().returning(|_| Ok(CommandOutput::success()));

        let created = service(shell, filesystem, prompter, api)
            .create(request())
            .unwrap();

        assert_eq!(created.code, "acme-3");
        // First default is the slug, then the previously attempted code.
        assert_eq!(*asked.lock().unwrap(), vec!["acme-web", "acme-1", "acme-2"]);
    }

    #[test]
    fn transport_errors_during_registration_are_fatal() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_choice()
            .returning(|_, _, _| Ok("blank".into()));
        prompter
            .expect_ask()
            .times(2)
            .returning(|_, default, _| Ok(default.unwrap_or_else(|| "Acme".into())));

        let mut api = MockProjectApi::new();
        api.expect_create_project().times(1).returning(|_, _, _| {
            Err(ApiError::Transport {
                reason: "connection refused".into(),
            }
            .into())
        });

        let err = service(
            MockShellRunner::new(),
            MockFilesystem::new(),
            prompter,
            api,
        )
        .create(request())
        .unwrap_err();
        assert!(matches!(err, MeatError::Api(ApiError::Transport { .. })));
    }

    #[test]
    fn existing_folders_are_asked_again() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_choice()
            .returning(|_, _, _| Ok("blank".into()));
        prompter
            .expect_ask()
            .withf(|q, _, _| q == "Project name:" || q.starts_with("Project code"))
            .returning(|_, default, _| Ok(default.unwrap_or_else(|| "Acme".into())));
        let mut seq = Sequence::new();
        for answer in ["first", "second", "third"] {
            prompter
                .expect_ask()
                .withf(|q, _, _| q.starts_with("Installation folder"))
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_, _, _| Ok(answer.into()));
        }
        prompter.expect_confirm().returning(|_, _| Ok(false));

        let mut filesystem = MockFilesystem::new();
        filesystem
            .expect_exists()
            .returning(|p| p == Path::new("/work/first") || p == Path::new("/work/second"));

        let mut shell = MockShellRunner::new();
        shell
            .expect_run()
            .withf(|cmd| cmd.line == "mkdir '/work/third'")
            .times(1)
            .returning(|_| Ok(CommandOutput::success()));

        let mut api = MockProjectApi::new();
        api.expect_create_project()
            .returning(|code, _, _| Ok(project(code, None)));

        service(shell, filesystem, prompter, api)
            .create(request())
            .unwrap();
    }

    #[test]
    fn failed_scaffold_is_fatal() {
        let mut api = MockProjectApi::new();
        api.expect_create_project()
            .returning(|code, _, _| Ok(project(code, None)));
        api.expect_setup_source_hosting().never();

        let mut prompter = prompter(true);
        prompter
            .expect_ask()
            .withf(|q, _, _| q.starts_with("Project code"))
            .returning(|_, default, _| Ok(default.unwrap_or_default()));

        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().returning(|_| false);
        let mut shell = MockShellRunner::new();
        shell.expect_run().returning(|_| Ok(CommandOutput::failure(1)));

        let err = service(shell, filesystem, prompter, api)
            .create(request())
            .unwrap_err();
        assert!(matches!(
            err,
            MeatError::Application(ApplicationError::CommandFailed { .. })
        ));
    }

    #[test]
    fn declining_source_hosting_skips_staging_and_git() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_choice()
            .returning(|_, _, _| Ok("blank".into()));
        prompter
            .expect_ask()
            .returning(|_, default, _| Ok(default.unwrap_or_else(|| "Acme".into())));
        prompter
            .expect_confirm()
            .withf(|q, _| q.starts_with("Create source repository"))
            .returning(|_, _| Ok(false));
        prompter.expect_confirm().returning(|_, _| Ok(true));

        let mut api = MockProjectApi::new();
        api.expect_create_project()
            .returning(|code, _, _| Ok(project(code, None)));
        api.expect_setup_hosting_platform().never();
        api.expect_setup_task_board()
            .with(mockall::predicate::eq(7))
            .times(1)
            .returning(|_| Ok(project("acme", None)));
        api.expect_setup_chat_channel()
            .times(1)
            .returning(|_| Ok(project("acme", None)));

        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().returning(|_| false);
        let mut shell = MockShellRunner::new();
        // Only the scaffold runs.
        shell
            .expect_run()
            .times(1)
            .returning(|_| Ok(CommandOutput::success()));

        service(shell, filesystem, prompter, api)
            .create(request())
            .unwrap();
    }

    #[test]
    fn source_hosting_wires_staging_and_remote() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut prompter = prompter(true);
        prompter
            .expect_ask()
            .withf(|q, _, _| q.starts_with("Project code"))
            .returning(|_, default, _| Ok(default.unwrap_or_default()));

        let mut api = MockProjectApi::new();
        api.expect_create_project()
            .returning(|code, _, _| Ok(project(code, None)));
        api.expect_setup_source_hosting()
            .times(1)
            .returning(|_| Ok(project("acme-web", Some("digitalmeatdev/acme-web"))));
        api.expect_setup_hosting_platform()
            .withf(|id, script| *id == 7 && script == "npm run production")
            .times(1)
            .returning(|_, _| Ok(project("acme-web", Some("digitalmeatdev/acme-web"))));
        api.expect_setup_task_board()
            .returning(|_| Ok(project("acme-web", Some("digitalmeatdev/acme-web"))));
        api.expect_setup_chat_channel()
            .returning(|_| Ok(project("acme-web", Some("digitalmeatdev/acme-web"))));

        let mut filesystem = MockFilesystem::new();
        filesystem.expect_exists().returning(|_| false);

        let recorded = log.clone();
        let mut shell = MockShellRunner::new();
        shell.expect_run().returning(move |cmd| {
            recorded.lock().unwrap().push(cmd.line.clone());
            Ok(CommandOutput::success())
        });

        let created = service(shell, filesystem, prompter, api)
            .create(request())
            .unwrap();

        assert_eq!(created.repo_full_name.as_deref(), Some("digitalmeatdev/acme-web"));
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "laravel new '/work/acme-web' > /dev/null 2>&1 || composer create-project --prefer-dist laravel/laravel '/work/acme-web'",
                "git init",
                "git remote add origin 'git@bitbucket.org:digitalmeatdev/acme-web.git'",
                "git add .",
                "git commit -m \"[GIT] Initial commit\"",
            ]
        );
    }
}
