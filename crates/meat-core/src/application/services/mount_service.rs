//! Mount Service - clone and provision a project for local development.
//!
//! The pipeline is an ordered table of stages. Each stage receives the
//! [`MountContext`] produced by the previous one and may return an updated
//! copy; the first error stops the run.
//!
//! 1. Acquire working tree (clone or recognise an existing clone)
//! 2. Enter the working tree and load its configuration
//! 3. Notify the project API
//! 4. Pre-install script
//! 5. Interactive `.env`
//! 6. Database bootstrap
//! 7. Composer / npm dependencies
//! 8. Asset compilation
//! 9. Remote data sync (envoy)
//! 10. Migrations
//! 11. Post-install script
//! 12. Open the browser

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::{
    Browser, Console, DatabaseAdmin, Filesystem, ProjectApi, ProjectConfigSource, Prompter,
    SettingsStore, ShellCommand, ShellRunner,
};
use crate::application::services::dotenv::{self, EnvHints};
use crate::application::services::{RepositoryManager, run_reported};
use crate::domain::{
    BuildMode, Conventions, DatabaseConfig, EnvironmentVariableSet, LocalSettings, ProjectConfig,
};
use crate::error::MeatResult;

/// Adapters the pipeline runs against.
pub struct MountPorts {
    pub shell: Box<dyn ShellRunner>,
    pub filesystem: Box<dyn Filesystem>,
    pub prompter: Box<dyn Prompter>,
    pub console: Box<dyn Console>,
    pub api: Box<dyn ProjectApi>,
    pub settings: Box<dyn SettingsStore>,
    pub config_source: Box<dyn ProjectConfigSource>,
    pub database: Box<dyn DatabaseAdmin>,
    pub browser: Box<dyn Browser>,
}

/// Flags of `meat mount`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountOptions {
    /// Skip `envoy run pull_images`.
    pub no_images: bool,
    /// Do not open the local URL when done.
    pub no_browser: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRequest {
    /// Directory `meat` was started from.
    pub invocation_dir: PathBuf,
    pub project_code: Option<String>,
    pub folder: Option<String>,
    pub options: MountOptions,
}

/// State threaded through the stages.
#[derive(Debug, Clone, PartialEq)]
pub struct MountContext {
    pub invocation_dir: PathBuf,
    pub project_code: String,
    /// Folder name used for the local URL.
    pub folder_name: String,
    /// Working path as the user sees it: `.` or the folder.
    pub working_path: PathBuf,
    /// Absolute root of the working tree. Set by the change-directory stage.
    pub root: PathBuf,
    pub options: MountOptions,
    pub config: ProjectConfig,
    pub settings: LocalSettings,
}

impl MountContext {
    /// Resolve the defaults of `meat mount [project-code] [folder]`.
    ///
    /// The project code falls back to the current directory name and the
    /// folder to the project code. With neither argument the current
    /// directory itself is the working tree.
    pub fn resolve(request: MountRequest) -> MeatResult<Self> {
        let MountRequest {
            invocation_dir,
            project_code,
            folder,
            options,
        } = request;

        let whole_directory = project_code.is_none() && folder.is_none();

        let project_code = match project_code {
            Some(code) => code,
            None => invocation_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    ApplicationError::InvalidInput(format!(
                        "cannot derive a project code from {}",
                        invocation_dir.display()
                    ))
                })?,
        };
        let folder_name = folder.unwrap_or_else(|| project_code.clone());
        let working_path = if whole_directory {
            PathBuf::from(".")
        } else {
            PathBuf::from(&folder_name)
        };

        Ok(Self {
            root: invocation_dir.clone(),
            invocation_dir,
            project_code,
            folder_name,
            working_path,
            options,
            config: ProjectConfig::default(),
            settings: LocalSettings::default(),
        })
    }

    /// Absolute location of the working path.
    pub fn target_path(&self) -> PathBuf {
        if self.working_path == Path::new(".") {
            self.invocation_dir.clone()
        } else {
            self.invocation_dir.join(&self.working_path)
        }
    }

    fn in_root(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountStage {
    AcquireWorkingTree,
    ChangeDirectory,
    NotifyInstallation,
    PreInstallScript,
    EnvironmentFile,
    Database,
    Dependencies,
    Assets,
    RemoteSync,
    Migrations,
    PostInstallScript,
    OpenBrowser,
}

impl MountStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcquireWorkingTree => "acquire-working-tree",
            Self::ChangeDirectory => "change-directory",
            Self::NotifyInstallation => "notify-installation",
            Self::PreInstallScript => "pre-install-script",
            Self::EnvironmentFile => "environment-file",
            Self::Database => "database",
            Self::Dependencies => "dependencies",
            Self::Assets => "assets",
            Self::RemoteSync => "remote-sync",
            Self::Migrations => "migrations",
            Self::PostInstallScript => "post-install-script",
            Self::OpenBrowser => "open-browser",
        }
    }
}

impl fmt::Display for MountStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type StageFn = fn(&MountService, MountContext) -> MeatResult<MountContext>;

static STAGES: [(MountStage, StageFn); 12] = [
    (MountStage::AcquireWorkingTree, MountService::acquire_working_tree),
    (MountStage::ChangeDirectory, MountService::change_directory),
    (MountStage::NotifyInstallation, MountService::notify_installation),
    (MountStage::PreInstallScript, MountService::pre_install_script),
    (MountStage::EnvironmentFile, MountService::environment_file),
    (MountStage::Database, MountService::database),
    (MountStage::Dependencies, MountService::dependencies),
    (MountStage::Assets, MountService::assets),
    (MountStage::RemoteSync, MountService::remote_sync),
    (MountStage::Migrations, MountService::migrations),
    (MountStage::PostInstallScript, MountService::post_install_script),
    (MountStage::OpenBrowser, MountService::open_browser),
];

/// Provisioning pipeline behind `meat mount`.
pub struct MountService {
    ports: MountPorts,
    conventions: Conventions,
}

impl MountService {
    pub fn new(ports: MountPorts, conventions: Conventions) -> Self {
        Self { ports, conventions }
    }

    /// Stage order, for display and tests.
    pub fn stages() -> impl Iterator<Item = MountStage> {
        STAGES.iter().map(|(stage, _)| *stage)
    }

    /// Run every stage and return the final context.
    #[instrument(
        skip_all,
        fields(
            project = ?request.project_code,
            folder = ?request.folder,
        )
    )]
    pub fn mount(&self, request: MountRequest) -> MeatResult<MountContext> {
        let mut context = MountContext::resolve(request)?;
        info!(
            project = %context.project_code,
            working_path = %context.working_path.display(),
            "Mounting project"
        );

        for &(stage, run) in STAGES.iter() {
            debug!(%stage, "running stage");
            context = run(self, context)?;
        }

        self.ports.console.success("Process complete!")?;
        Ok(context)
    }

    fn repository(&self) -> RepositoryManager<'_> {
        RepositoryManager::new(
            self.ports.shell.as_ref(),
            self.ports.filesystem.as_ref(),
            self.ports.console.as_ref(),
            &self.conventions,
        )
    }

    fn exists(&self, path: &Path) -> bool {
        self.ports.filesystem.exists(path)
    }

    /// Run a configured command in the working tree, streaming its output.
    fn run_in_root(&self, context: &MountContext, line: &str) -> MeatResult<bool> {
        run_reported(
            self.ports.shell.as_ref(),
            self.ports.console.as_ref(),
            &ShellCommand::new(line).in_dir(&context.root).streamed(),
        )
    }

    // ── Stages ───────────────────────────────────────────────────────────────

    fn acquire_working_tree(&self, mut context: MountContext) -> MeatResult<MountContext> {
        let target = context.target_path();
        context.project_code = self.repository().acquire_working_tree(
            &context.project_code,
            &context.working_path,
            &target,
        )?;
        Ok(context)
    }

    fn change_directory(&self, mut context: MountContext) -> MeatResult<MountContext> {
        context.root = context.target_path();
        context.config = self.ports.config_source.load(&context.root)?;
        context.settings = self.ports.settings.load()?;
        debug!(root = %context.root.display(), config = ?context.config, "working tree ready");
        Ok(context)
    }

    fn notify_installation(&self, context: MountContext) -> MeatResult<MountContext> {
        if let Err(e) = self.ports.api.notify_installation(&context.project_code) {
            warn!(error = %e, "installation notification failed");
            self.ports
                .console
                .warning(&format!("Could not notify the installation: {e}"))?;
        }
        Ok(context)
    }

    fn pre_install_script(&self, context: MountContext) -> MeatResult<MountContext> {
        if let Some(script) = context.config.scripts.pre_install() {
            self.ports.console.info(&format!("Running pre-install script: {script}"))?;
            self.run_in_root(&context, script)?;
        }
        Ok(context)
    }

    fn environment_file(&self, context: MountContext) -> MeatResult<MountContext> {
        let example_path = context.in_root(".env.example");
        let env_path = context.in_root(".env");

        let enabled = context
            .config
            .dotenv
            .resolve(|| self.exists(&example_path) && !self.exists(&env_path));
        if !enabled {
            debug!("environment file skipped");
            return Ok(context);
        }

        if !self.exists(&example_path) {
            warn!(path = %example_path.display(), "no example environment file");
            self.ports
                .console
                .warning(".env.example not found, skipping .env configuration")?;
            return Ok(context);
        }

        let example = EnvironmentVariableSet::parse(
            &self.ports.filesystem.read_to_string(&example_path)?,
        )?;
        let local_url = self.conventions.local_url(&context.folder_name);
        let hints = EnvHints {
            project_code: &context.project_code,
            local_url: &local_url,
            settings: &context.settings,
        };

        let env = dotenv::configure(
            self.ports.prompter.as_ref(),
            self.ports.console.as_ref(),
            &example,
            &hints,
        )?;
        self.ports.filesystem.write_file(&env_path, &env.render())?;
        info!(entries = env.len(), "wrote .env");

        Ok(context)
    }

    fn database(&self, context: MountContext) -> MeatResult<MountContext> {
        let env_path = context.in_root(".env");
        if !self.exists(&env_path) {
            debug!("no .env, database bootstrap skipped");
            return Ok(context);
        }

        let env = match EnvironmentVariableSet::parse(
            &self.ports.filesystem.read_to_string(&env_path)?,
        ) {
            Ok(env) => env,
            Err(e) => {
                warn!(error = %e, "unreadable .env");
                self.ports
                    .console
                    .warning(&format!("Skipping database setup: {e}"))?;
                return Ok(context);
            }
        };

        let config = DatabaseConfig::from_env(&env);
        if !config.is_mysql() {
            debug!(kind = %config.kind, "database bootstrap only supports mysql");
            return Ok(context);
        }
        if config.name.is_empty() {
            debug!("no database name configured");
            return Ok(context);
        }

        self.bootstrap_mysql(&config)?;
        Ok(context)
    }

    fn bootstrap_mysql(&self, config: &DatabaseConfig) -> MeatResult<()> {
        let database = self.ports.database.as_ref();
        let console = self.ports.console.as_ref();

        if let Err(e) = database.check_connection(config) {
            warn!(error = %e, host = %config.host, "database connection failed");
            console.error("Could not establish connection with the database")?;
            return Ok(());
        }

        let exists = match database.database_exists(config) {
            Ok(exists) => exists,
            Err(e) => {
                warn!(error = %e, "database lookup failed");
                console.error(&format!("Could not look up database \"{}\"", config.name))?;
                return Ok(());
            }
        };
        if exists {
            debug!(database = %config.name, "database already exists");
            return Ok(());
        }

        let create = self.ports.prompter.confirm(
            &format!(
                "The database \"{}\" doesn't exist. Do you want to create it? (Y/n):",
                config.name
            ),
            true,
        )?;
        if create {
            match database.create_database(config) {
                Ok(()) => console.success(&format!("Database \"{}\" created", config.name))?,
                Err(e) => {
                    warn!(error = %e, "database creation failed");
                    console.error(&format!("Error creating database: {e}"))?;
                }
            }
        }
        Ok(())
    }

    fn dependencies(&self, context: MountContext) -> MeatResult<MountContext> {
        if context.config.composer {
            self.ports.console.info("Installing composer dependencies")?;
            self.run_in_root(&context, "composer install --prefer-dist")?;
        }

        if context.config.npm {
            self.ports.console.info("Installing NPM dependencies")?;
            if !self.run_in_root(&context, "yarn install")? {
                self.ports.console.info("Falling back to npm install")?;
                self.run_in_root(&context, "npm install")?;
            }
        }

        Ok(context)
    }

    fn assets(&self, context: MountContext) -> MeatResult<MountContext> {
        let configured = context
            .config
            .assets
            .driver
            .as_deref()
            .is_some_and(|driver| !driver.trim().is_empty());

        if configured {
            let command = context.config.assets.build_script(BuildMode::Dev);
            self.ports
                .console
                .info(&format!("Compiling assets: {command}"))?;
            self.run_in_root(&context, &command)?;
        }
        Ok(context)
    }

    fn remote_sync(&self, context: MountContext) -> MeatResult<MountContext> {
        let enabled = context.config.envoy.resolve(|| {
            self.exists(&context.in_root("envoy.blade.php"))
                || self.exists(&context.in_root("Envoy.blade.php"))
        });
        if !enabled {
            return Ok(context);
        }

        self.ports.console.info("Running envoy sync_database...")?;
        self.run_in_root(&context, "envoy run sync_database")?;

        if !context.options.no_images {
            self.ports.console.info("Running envoy pull_images...")?;
            self.run_in_root(&context, "envoy run pull_images")?;
        }
        Ok(context)
    }

    fn migrations(&self, context: MountContext) -> MeatResult<MountContext> {
        let enabled = context
            .config
            .migrate
            .resolve(|| self.exists(&context.in_root("artisan")));

        if enabled {
            self.ports.console.info("Running Laravel Migrations...")?;
            self.run_in_root(&context, "php artisan migrate")?;
        }
        Ok(context)
    }

    fn post_install_script(&self, context: MountContext) -> MeatResult<MountContext> {
        if let Some(script) = context.config.scripts.post_install() {
            self.ports.console.info(&format!("Running post-install script: {script}"))?;
            self.run_in_root(&context, script)?;
        }
        Ok(context)
    }

    fn open_browser(&self, context: MountContext) -> MeatResult<MountContext> {
        if context.options.no_browser {
            return Ok(context);
        }

        let url = format!("{}/", self.conventions.local_url(&context.folder_name));
        self.ports.console.info(&format!("Opening browser: {url}"))?;
        if let Err(e) = self.ports.browser.open(&url) {
            warn!(error = %e, %url, "could not open browser");
            self.ports
                .console
                .warning(&format!("Could not open the browser: {e}"))?;
        }
        Ok(context)
    }
}
