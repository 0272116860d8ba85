//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "trellis",
    bin_name = "trellis",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Feature dependency graph and compatibility checks",
    long_about = "Trellis answers questions about a catalog of project features: \
                  which features depend on which, whether a selection can be \
                  removed or installed together, and how large a removal would be.",
    after_help = "EXAMPLES:\n\
        \x20 trellis check jest vitest\n\
        \x20 trellis impact react --summary\n\
        \x20 trellis validate router auth\n\
        \x20 trellis graph --focus auth\n\
        \x20 trellis --catalog features.toml deps auth --reverse",
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

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check pairwise compatibility of a feature set.
    #[command(
        visible_alias = "c",
        about = "Check compatibility of features",
        after_help = "EXAMPLES:\n\
            \x20 trellis check jest vitest\n\
            \x20 trellis check router,state --output-format json"
    )]
    Check(CheckArgs),

    /// Estimate the impact of removing a feature set.
    #[command(
        visible_alias = "i",
        about = "Estimate removal impact",
        after_help = "EXAMPLES:\n\
            \x20 trellis impact react\n\
            \x20 trellis impact eslint prettier --summary"
    )]
    Impact(ImpactArgs),

    /// Validate a selection for removal (default) or installation.
    #[command(
        visible_alias = "v",
        about = "Validate a feature selection",
        after_help = "EXAMPLES:\n\
            \x20 trellis validate storybook\n\
            \x20 trellis validate jest vitest --install"
    )]
    Validate(ValidateArgs),

    /// Render the dependency graph.
    #[command(
        visible_alias = "g",
        about = "Show the dependency graph",
        after_help = "EXAMPLES:\n\
            \x20 trellis graph\n\
            \x20 trellis graph --summary\n\
            \x20 trellis graph --focus auth --focus storybook"
    )]
    Graph(GraphArgs),

    /// Find a dependency path between two features.
    #[command(
        about = "Find a dependency path",
        after_help = "EXAMPLES:\n\
            \x20 trellis path auth core"
    )]
    Path(PathArgs),

    /// List transitive dependencies or dependents of a feature.
    #[command(
        about = "List dependencies of a feature",
        after_help = "EXAMPLES:\n\
            \x20 trellis deps auth\n\
            \x20 trellis deps react --reverse"
    )]
    Deps(DepsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 trellis completions bash > ~/.local/share/bash-completion/completions/trellis\n\
            \x20 trellis completions zsh  > ~/.zfunc/_trellis\n\
            \x20 trellis completions fish > ~/.config/fish/completions/trellis.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 trellis config show\n\
            \x20 trellis config path"
    )]
    Config(ConfigCommands),
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `trellis check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Features to check; repeat or separate with commas.
    #[arg(
        value_name = "FEATURE",
        required = true,
        value_delimiter = ',',
        help = "Feature ids to check"
    )]
    pub features: Vec<String>,
}

// ── impact ────────────────────────────────────────────────────────────────────

/// Arguments for `trellis impact`.
#[derive(Debug, Args)]
pub struct ImpactArgs {
    #[arg(
        value_name = "FEATURE",
        required = true,
        value_delimiter = ',',
        help = "Feature ids to remove"
    )]
    pub features: Vec<String>,

    /// Omit the per-feature breakdown.
    #[arg(short = 's', long = "summary", help = "Only show totals and recommendations")]
    pub summary: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `trellis validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// An empty selection is accepted and reported as invalid.
    #[arg(
        value_name = "FEATURE",
        value_delimiter = ',',
        help = "Feature ids in the selection"
    )]
    pub features: Vec<String>,

    /// Validate for installation instead of removal (skips impact).
    #[arg(long = "install", help = "Validate an installation instead of a removal")]
    pub install: bool,
}

// ── graph ─────────────────────────────────────────────────────────────────────

/// Arguments for `trellis graph`.
#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Print counts, roots, leaves and levels instead of the tree.
    #[arg(short = 's', long = "summary", help = "Show a summary instead of the tree")]
    pub summary: bool,

    /// Restrict the graph to these features and their dependencies.
    #[arg(
        short = 'f',
        long = "focus",
        value_name = "ID",
        value_delimiter = ',',
        help = "Only show these features and their dependencies"
    )]
    pub focus: Vec<String>,
}

// ── path ──────────────────────────────────────────────────────────────────────

/// Arguments for `trellis path`.
#[derive(Debug, Args)]
pub struct PathArgs {
    #[arg(value_name = "FROM", help = "Dependent feature")]
    pub from: String,

    #[arg(value_name = "TO", help = "Dependency to reach")]
    pub to: String,
}

// ── deps ──────────────────────────────────────────────────────────────────────

/// Arguments for `trellis deps`.
#[derive(Debug, Args)]
pub struct DepsArgs {
    #[arg(value_name = "ID", help = "Feature id")]
    pub id: String,

    /// List the features that depend on `ID` instead.
    #[arg(short = 'r', long = "reverse", help = "List dependents instead")]
    pub reverse: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `trellis completions`.
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

/// Subcommands for `trellis config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the path of the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
