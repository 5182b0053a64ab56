//! `meat create` end to end against the in-memory project API.

use std::collections::HashMap;
use std::path::PathBuf;

use meat_adapters::{
    ApiCall, BufferConsole, ConfigFileSource, InMemoryProjectApi, MemoryFilesystem,
    RecordingShell, ScriptedPrompter, console::Level,
};
use meat_core::prelude::*;

struct Harness {
    workspace: PathBuf,
    filesystem: MemoryFilesystem,
    shell: RecordingShell,
    prompter: ScriptedPrompter,
    console: BufferConsole,
    api: InMemoryProjectApi,
}

impl Harness {
    fn new(answers: &[&str]) -> Self {
        Self {
            workspace: PathBuf::from("/work"),
            filesystem: MemoryFilesystem::new(),
            shell: RecordingShell::new(),
            prompter: ScriptedPrompter::new(answers.iter().copied()),
            console: BufferConsole::new(),
            api: InMemoryProjectApi::new("digitalmeatdev").taken("acme-site"),
        }
    }

    fn create(&self, no_commit: bool) -> MeatResult<Project> {
        let ports = CreatePorts {
            shell: Box::new(self.shell.clone()),
            filesystem: Box::new(self.filesystem.clone()),
            prompter: Box::new(self.prompter.clone()),
            console: Box::new(self.console.clone()),
            api: Box::new(self.api.clone()),
            config_source: Box::new(ConfigFileSource::with_env(HashMap::new())),
        };
        CreateService::new(ports, Conventions::default()).create(CreateRequest {
            invocation_dir: self.workspace.clone(),
            no_commit,
        })
    }
}

#[test]
fn taken_code_is_asked_again_and_repository_becomes_origin() {
    // type, name, suggested code (taken), new code, folder,
    // source repository, staging, task board, chat channel
    let harness = Harness::new(&["laravel", "Acme Site", "", "acme-web", "", "", "", "n", "n"]);

    let project = harness.create(false).unwrap();

    assert_eq!(project.code, "acme-web");
    assert_eq!(project.repo_full_name.as_deref(), Some("digitalmeatdev/acme-web"));
    assert_eq!(harness.prompter.remaining(), 0);
    assert_eq!(
        harness.console.at(Level::Error),
        vec!["The code has already been taken."]
    );

    assert_eq!(
        harness.api.calls(),
        vec![
            ApiCall::CreateProject {
                code: "acme-site".into(),
                name: "Acme Site".into(),
                project_type: ProjectType::Laravel,
            },
            ApiCall::CreateProject {
                code: "acme-web".into(),
                name: "Acme Site".into(),
                project_type: ProjectType::Laravel,
            },
            ApiCall::SourceHosting(1),
            ApiCall::HostingPlatform {
                id: 1,
                build_script: "npm run production".into(),
            },
        ]
    );

    let folder = harness.workspace.join("acme-web");
    let commands = harness.shell.commands();
    assert!(commands[0].line.starts_with("laravel new '"));
    assert_eq!(commands[0].cwd.as_deref(), Some(harness.workspace.as_path()));

    let git: Vec<_> = commands[1..].iter().map(|c| c.line.as_str()).collect();
    assert_eq!(
        git,
        vec![
            "git init",
            "git remote add origin 'git@bitbucket.org:digitalmeatdev/acme-web.git'",
            "git add .",
            "git commit -m \"[GIT] Initial commit\"",
        ]
    );
    assert!(commands[1..].iter().all(|c| c.cwd.as_deref() == Some(folder.as_path())));
}

#[test]
fn no_commit_only_adds_the_remote() {
    let harness = Harness::new(&["blank", "Acme", "", "", "", "n", "n", "n"]);

    harness.create(true).unwrap();

    let lines = harness.shell.lines();
    assert_eq!(lines.last().unwrap(), "git remote add origin 'git@bitbucket.org:digitalmeatdev/acme.git'");
    assert!(!lines.iter().any(|l| l.starts_with("git commit")));
}

#[test]
fn declining_source_hosting_skips_git_and_staging() {
    // staging is never offered without a repository
    let harness = Harness::new(&["themosis", "Acme", "", "", "n", "y", "y"]);

    harness.create(false).unwrap();

    assert_eq!(harness.shell.lines().len(), 1);
    assert_eq!(
        harness.api.calls()[1..],
        [ApiCall::TaskBoard(1), ApiCall::ChatChannel(1)]
    );
    assert_eq!(harness.prompter.remaining(), 0);
}

#[test]
fn existing_folder_is_refused() {
    let harness = Harness::new(&["blank", "Acme", "", "", "other", "n", "n", "n"]);
    harness.filesystem.create_dir_all(&harness.workspace.join("acme"));

    harness.create(false).unwrap();

    assert!(harness.console.contains("This directory already exists..."));
    let scaffold = &harness.shell.lines()[0];
    assert_eq!(scaffold, &format!("mkdir '{}'", harness.workspace.join("other").display()));
}
