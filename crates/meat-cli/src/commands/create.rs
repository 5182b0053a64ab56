//! `meat create`: register a new project and scaffold it.

use meat_adapters::{ConfigFileSource, LocalFilesystem, LocalShell};
use meat_core::application::{
    AssumeYes, CreatePorts, CreateRequest, CreateService,
    ports::{Prompter, SettingsStore},
};
use tracing::{info, instrument};

use crate::{cli::CreateArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(yes = args.yes, no_commit = args.no_commit))]
pub fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = super::settings_store()?.load()?;

    let mut prompter: Box<dyn Prompter> = Box::new(super::prompter(&output));
    if args.yes {
        prompter = Box::new(AssumeYes::new(prompter));
    }

    let ports = CreatePorts {
        shell: Box::new(LocalShell::new()),
        filesystem: Box::new(LocalFilesystem::new()),
        prompter,
        console: Box::new(output),
        api: Box::new(super::project_api(&config, &settings)?),
        config_source: Box::new(ConfigFileSource::new()),
    };

    let request = CreateRequest {
        invocation_dir: std::env::current_dir()?,
        no_commit: args.no_commit,
    };

    let project = CreateService::new(ports, config.conventions()).create(request)?;
    info!(code = %project.code, id = project.id, "project created");
    Ok(())
}
