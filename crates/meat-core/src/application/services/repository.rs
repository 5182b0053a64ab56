//! Git working trees: cloning organisation repositories, recognising
//! existing clones, and turning a fresh scaffold into a repository.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::{Console, Filesystem, ShellCommand, ShellRunner};
use crate::application::services::{run_checked, run_reported};
use crate::domain::{Conventions, shell_quote};
use crate::error::MeatResult;

pub const INITIAL_COMMIT_MESSAGE: &str = "[GIT] Initial commit";

/// Borrowing collaborator used by both `mount` and `create`.
pub struct RepositoryManager<'a> {
    shell: &'a dyn ShellRunner,
    filesystem: &'a dyn Filesystem,
    console: &'a dyn Console,
    conventions: &'a Conventions,
}

impl<'a> RepositoryManager<'a> {
    pub fn new(
        shell: &'a dyn ShellRunner,
        filesystem: &'a dyn Filesystem,
        console: &'a dyn Console,
        conventions: &'a Conventions,
    ) -> Self {
        Self {
            shell,
            filesystem,
            console,
            conventions,
        }
    }

    /// Make sure `target` holds a clone of the project and return the
    /// project code it belongs to.
    ///
    /// An existing folder must already be a git repository; its code is
    /// read back from `origin`. A missing folder is cloned from the
    /// organisation account.
    #[instrument(skip(self), fields(target = %target.display()))]
    pub fn acquire_working_tree(
        &self,
        project_code: &str,
        display_path: &Path,
        target: &Path,
    ) -> MeatResult<String> {
        if !self.filesystem.exists(target) {
            self.clone_into(project_code, target)?;
            return Ok(project_code.to_string());
        }

        self.console
            .line(&format!("The folder {} already exists...", display_path.display()))?;

        if !self.filesystem.exists(&target.join(".git")) {
            return Err(ApplicationError::FolderNotARepository {
                path: display_path.to_path_buf(),
            }
            .into());
        }

        let code = self.project_from_remote(target)?;
        self.console
            .line(&format!("Project name defined as {code}"))?;
        Ok(code)
    }

    /// Clone `git@<host>:<org>/<code>.git` into `target`.
    pub fn clone_into(&self, project_code: &str, target: &Path) -> MeatResult<()> {
        let url = self.conventions.clone_url(project_code);
        self.console.info(&format!(
            "Cloning {url} repository on {}",
            target.display()
        ))?;
        info!(%url, "cloning repository");

        let line = format!(
            "git clone {url} {}",
            shell_quote(&target.display().to_string())
        );
        run_checked(self.shell, &ShellCommand::new(line).streamed())?;
        Ok(())
    }

    /// Project code of the clone at `dir`, from its `origin` remote.
    pub fn project_from_remote(&self, dir: &Path) -> MeatResult<String> {
        let output = run_checked(
            self.shell,
            &ShellCommand::new("git remote get-url origin").in_dir(dir),
        )?;
        let remote = output.stdout.trim();
        debug!(remote, "origin remote");

        self.conventions
            .project_code_from_remote(remote)
            .ok_or_else(|| {
                ApplicationError::UnrecognizedRemote {
                    url: remote.to_string(),
                }
                .into()
            })
    }

    /// Start a fresh history in `dir` pointing at `remote`.
    ///
    /// Any existing `.git` directory (left by the scaffold) is discarded.
    /// With `commit`, everything is committed as the initial commit; a
    /// failing commit is reported but does not undo the remote.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn init_with_remote(&self, dir: &Path, remote: &str, commit: bool) -> MeatResult<()> {
        let git_dir = dir.join(".git");
        if self.filesystem.exists(&git_dir) {
            debug!("removing scaffold history");
            self.filesystem.remove_dir_all(&git_dir)?;
        }

        run_checked(self.shell, &ShellCommand::new("git init").in_dir(dir).streamed())?;
        run_checked(
            self.shell,
            &ShellCommand::new(format!("git remote add origin {}", shell_quote(remote)))
                .in_dir(dir)
                .streamed(),
        )?;

        if commit {
            let added = run_reported(
                self.shell,
                self.console,
                &ShellCommand::new("git add .").in_dir(dir).streamed(),
            )?;
            let committed = added
                && run_reported(
                    self.shell,
                    self.console,
                    &ShellCommand::new(format!("git commit -m \"{INITIAL_COMMIT_MESSAGE}\""))
                        .in_dir(dir)
                        .streamed(),
                )?;
            if !committed {
                warn!("initial commit was not created");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        CommandOutput, MockConsole, MockFilesystem, MockShellRunner,
    };
    use crate::error::MeatError;
    use mockall::Sequence;
    use std::path::PathBuf;

    fn quiet_console() -> MockConsole {
        let mut console = MockConsole::new();
        console.expect_line().returning(|_| Ok(()));
        console.expect_info().returning(|_| Ok(()));
        console.expect_warning().returning(|_| Ok(()));
        console
    }

    #[test]
    fn missing_folder_is_cloned_from_organisation() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let mut shell = MockShellRunner::new();
        shell
            .expect_run()
            .withf(|cmd| {
                cmd.line
                    == "git clone git@bitbucket.org:digitalmeatdev/acme.git '/work/acme'"
                    && cmd.stream
            })
            .times(1)
            .returning(|_| Ok(CommandOutput::success()));

        let console = quiet_console();
        let conventions = Conventions::default();
        let repo = RepositoryManager::new(&shell, &fs, &console, &conventions);

        let code = repo
            .acquire_working_tree("acme", Path::new("acme"), Path::new("/work/acme"))
            .unwrap();
        assert_eq!(code, "acme");
    }

    #[test]
    fn failed_clone_is_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let mut shell = MockShellRunner::new();
        shell
            .expect_run()
            .returning(|_| Ok(CommandOutput::failure(128)));

        let console = quiet_console();
        let conventions = Conventions::default();
        let repo = RepositoryManager::new(&shell, &fs, &console, &conventions);

        let err = repo
            .acquire_working_tree("acme", Path::new("acme"), Path::new("/work/acme"))
            .unwrap_err();
        assert!(matches!(
            err,
            MeatError::Application(ApplicationError::CommandFailed {
                status: Some(128),
                ..
            })
        ));
    }

    #[test]
    fn existing_folder_without_git_is_rejected() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|path| path == Path::new("/work/acme"));

        let mut shell = MockShellRunner::new();
        shell.expect_run().never();

        let console = quiet_console();
        let conventions = Conventions::default();
        let repo = RepositoryManager::new(&shell, &fs, &console, &conventions);

        let err = repo
            .acquire_working_tree("acme", Path::new("acme"), Path::new("/work/acme"))
            .unwrap_err();
        assert_eq!(
            err,
            MeatError::Application(ApplicationError::FolderNotARepository {
                path: PathBuf::from("acme")
            })
        );
    }

    #[test]
    fn existing_clone_takes_code_from_origin() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);

        let mut shell = MockShellRunner::new();
        shell
            .expect_run()
            .withf(|cmd| {
                cmd.line == "git remote get-url origin"
                    && cmd.cwd.as_deref() == Some(Path::new("/work/old-name"))
                    && !cmd.stream
            })
            .returning(|_| {
                Ok(CommandOutput::success()
                    .with_stdout("git@bitbucket.org:digitalmeatdev/real-code.git\n"))
            });

        let console = quiet_console();
        let conventions = Conventions::default();
        let repo = RepositoryManager::new(&shell, &fs, &console, &conventions);

        let code = repo
            .acquire_working_tree("old-name", Path::new("."), Path::new("/work/old-name"))
            .unwrap();
        assert_eq!(code, "real-code");
    }

    #[test]
    fn init_with_remote_replaces_history_and_commits() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_dir_all()
            .withf(|p| p == Path::new("/work/acme/.git"))
            .times(1)
            .returning(|_| Ok(()));

        let mut seq = Sequence::new();
        let mut shell = MockShellRunner::new();
        for expected in [
            "git init",
            "git remote add origin 'git@bitbucket.org:digitalmeatdev/acme.git'",
            "git add .",
            "git commit -m \"[GIT] Initial commit\"",
        ] {
            shell
                .expect_run()
                .withf(move |cmd| {
                    cmd.line == expected && cmd.cwd.as_deref() == Some(Path::new("/work/acme"))
                })
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(CommandOutput::success()));
        }

        let console = quiet_console();
        let conventions = Conventions::default();
        let repo = RepositoryManager::new(&shell, &fs, &console, &conventions);

        repo.init_with_remote(
            Path::new("/work/acme"),
            "git@bitbucket.org:digitalmeatdev/acme.git",
            true,
        )
        .unwrap();
    }

    #[test]
    fn no_commit_only_adds_the_remote() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let mut shell = MockShellRunner::new();
        shell
            .expect_run()
            .withf(|cmd| !cmd.line.starts_with("git add") && !cmd.line.starts_with("git commit"))
            .times(2)
            .returning(|_| Ok(CommandOutput::success()));

        let console = quiet_console();
        let conventions = Conventions::default();
        let repo = RepositoryManager::new(&shell, &fs, &console, &conventions);

        repo.init_with_remote(Path::new("/work/acme"), "git@bitbucket.org:x/acme.git", false)
            .unwrap();
    }
}
