//! `meat mount`: clone a project and provision it for local development.

use meat_adapters::{ConfigFileSource, LocalFilesystem, LocalShell, MysqlCli, SystemBrowser};
use meat_core::application::{
    MountOptions, MountPorts, MountRequest, MountService, ports::SettingsStore,
};
use tracing::{info, instrument};

use crate::{cli::MountArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(project = ?args.project_code))]
pub fn execute(args: MountArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let store = super::settings_store()?;
    let settings = store.load()?;

    let ports = MountPorts {
        shell: Box::new(LocalShell::new()),
        filesystem: Box::new(LocalFilesystem::new()),
        prompter: Box::new(super::prompter(&output)),
        console: Box::new(output),
        api: Box::new(super::project_api(&config, &settings)?),
        settings: Box::new(store),
        config_source: Box::new(ConfigFileSource::new()),
        database: Box::new(MysqlCli::new(LocalShell::new())),
        browser: Box::new(SystemBrowser::new(LocalShell::new())),
    };

    let request = MountRequest {
        invocation_dir: std::env::current_dir()?,
        project_code: args.project_code,
        folder: args.folder,
        options: MountOptions {
            no_images: args.no_images,
            no_browser: args.no_browser,
        },
    };

    let context = MountService::new(ports, config.conventions()).mount(request)?;
    info!(
        project = %context.project_code,
        root = %context.root.display(),
        "project mounted"
    );
    Ok(())
}
