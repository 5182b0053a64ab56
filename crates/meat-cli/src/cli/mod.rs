//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "meat",
    bin_name = "meat",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Clone, mount and create MEAT projects",
    long_about = "meat registers new web projects on the project API, scaffolds \
                  them locally and mounts existing ones for development: clone, \
                  .env, database, dependencies, assets and migrations.",
    after_help = "EXAMPLES:\n\
        \x20 meat init\n\
        \x20 meat create\n\
        \x20 meat mount acme\n\
        \x20 meat mount acme acme-local --no-images\n\
        \x20 meat completions bash > /usr/share/bash-completion/completions/meat",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a new project and scaffold it locally.
    #[command(
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 meat create\n\
            \x20 meat create --no-commit\n\
            \x20 meat create --yes   # accept every integration"
    )]
    Create(CreateArgs),

    /// Clone a project (or reuse a clone) and set it up for local development.
    #[command(
        about = "Mount a project for local development",
        after_help = "EXAMPLES:\n\
            \x20 meat mount                  # the current directory\n\
            \x20 meat mount acme             # clone into ./acme\n\
            \x20 meat mount acme acme-old    # clone into ./acme-old\n\
            \x20 meat mount acme -k -b       # no images, no browser"
    )]
    Mount(MountArgs),

    /// Store local database credentials and the API token.
    #[command(about = "Configure local settings")]
    Init,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 meat completions bash > ~/.local/share/bash-completion/completions/meat\n\
            \x20 meat completions zsh  > ~/.zfunc/_meat\n\
            \x20 meat completions fish > ~/.config/fish/completions/meat.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the tool configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 meat config get git.host\n\
            \x20 meat config list\n\
            \x20 meat config path"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Add the git remote without committing the scaffold.
    #[arg(short = 'c', long = "no-commit", help = "Do not create the initial commit")]
    pub no_commit: bool,

    /// Answer yes to every confirmation.
    #[arg(short = 'y', long = "yes", help = "Accept every confirmation")]
    pub yes: bool,
}

// ── mount ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MountArgs {
    /// Project code; defaults to the current directory name.
    #[arg(value_name = "PROJECT_CODE")]
    pub project_code: Option<String>,

    /// Folder to clone into; defaults to the project code.
    #[arg(value_name = "FOLDER")]
    pub folder: Option<String>,

    #[arg(short = 'k', long = "no-images", help = "Skip envoy pull_images")]
    pub no_images: bool,

    #[arg(short = 'b', long = "no-browser", help = "Do not open the browser when done")]
    pub no_browser: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `git.host`.
        key: String,
    },
    /// Print the resolved configuration.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
