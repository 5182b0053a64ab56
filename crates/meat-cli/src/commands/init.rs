//! `meat init`: store local database credentials and the API token.

use meat_core::application::InitService;
use tracing::{debug, instrument};

use crate::{error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(output: OutputManager) -> CliResult<()> {
    let store = super::settings_store()?;
    debug!(path = %store.path().display(), "settings file");

    let prompter = super::prompter(&output);
    let saved = InitService::new(Box::new(prompter), Box::new(store), Box::new(output)).run()?;
    debug!(updated = saved.is_some(), "init finished");
    Ok(())
}
