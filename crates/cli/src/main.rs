//! eazysvn: simple Subversion revision merges and branch switching.
//!
//! Works out branch and tag URLs from the working copy's own URL, turns
//! friendly revision numbers into `svn merge -r` ranges, prints the svn
//! command it is about to run, and runs it.

mod registry;
mod style;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use eazysvn_core::config::AppConfig;
use eazysvn_core::selftest::run_selftest;
use eazysvn_core::{CommandEngine, ListKind, MergeRequest, SvnClient, SwitchRequest};

use crate::registry::CommandKind;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Make simple Subversion revision merges and branch switching much easier.
#[derive(Parser, Debug)]
#[command(
    name = "eazysvn",
    bin_name = "eazysvn",
    version,
    disable_help_subcommand = true
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (off, error, warn, info, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Option<Commands>,
}

// One-line summaries come from the registry so `help` and `--help` agree.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = CommandKind::Merge.summary(),
        override_usage = "eazysvn merge [OPTIONS] [REV] <SOURCE-BRANCH> [WC-PATH]\n       \
                          eazysvn merge -l [-t]"
    )]
    Merge(MergeArgs),

    #[command(
        about = CommandKind::Revert.summary(),
        override_usage = "eazysvn revert [OPTIONS] <REV> [WC-PATH]"
    )]
    Revert(RevertArgs),

    #[command(
        about = CommandKind::Switch.summary(),
        after_help = "When run without arguments, prints the URL of the current branch.",
        override_usage = "eazysvn switch [-n] [-c] [-m MSG] <BRANCH> [WC-PATH]\n       \
                          eazysvn switch [-n] [-c] [-m MSG] -t <TAG> [WC-PATH]\n       \
                          eazysvn switch -l [-t]\n       \
                          eazysvn switch"
    )]
    Switch(SwitchArgs),

    #[command(about = CommandKind::Tag.summary())]
    Tag(TagArgs),

    #[command(
        about = CommandKind::BranchUrl.summary(),
        after_help = "When run without arguments, prints the URL of the current branch."
    )]
    Branchurl(BranchUrlArgs),

    #[command(about = CommandKind::RmBranch.summary())]
    Rmbranch(RmBranchArgs),

    #[command(about = CommandKind::MvBranch.summary())]
    Mvbranch(MvBranchArgs),

    #[command(about = CommandKind::BranchDiff.summary())]
    Branchdiff(InspectArgs),

    #[command(about = CommandKind::BranchPoint.summary())]
    Branchpoint(InspectArgs),

    #[command(about = CommandKind::Selftest.summary())]
    Selftest,

    #[command(about = CommandKind::Help.summary())]
    Help,
}

impl Commands {
    fn kind(&self) -> CommandKind {
        match self {
            Commands::Merge(_) => CommandKind::Merge,
            Commands::Revert(_) => CommandKind::Revert,
            Commands::Switch(_) => CommandKind::Switch,
            Commands::Tag(_) => CommandKind::Tag,
            Commands::Branchurl(_) => CommandKind::BranchUrl,
            Commands::Rmbranch(_) => CommandKind::RmBranch,
            Commands::Mvbranch(_) => CommandKind::MvBranch,
            Commands::Branchdiff(_) => CommandKind::BranchDiff,
            Commands::Branchpoint(_) => CommandKind::BranchPoint,
            Commands::Selftest => CommandKind::Selftest,
            Commands::Help => CommandKind::Help,
        }
    }
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// List existing branches (or tags, with -t).
    #[arg(short, long)]
    list: bool,

    /// Passed to svn merge.
    #[arg(short, long)]
    reintegrate: bool,

    /// Passed to svn merge.
    #[arg(long, value_name = "ARG")]
    accept: Option<String>,

    /// Show a diff of changes on the branch.
    #[arg(short, long)]
    diff: bool,

    /// Use a tag instead of a branch.
    #[arg(short, long)]
    tag: bool,

    /// Do not touch any files on disk or in subversion.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// [REV] SOURCE-BRANCH [WC-PATH]; REV defaults to ALL.
    #[arg(value_name = "ARGS", num_args = 1..=3, required_unless_present = "list")]
    args: Vec<String>,
}

#[derive(Args, Debug)]
struct RevertArgs {
    /// List existing branches.
    #[arg(short, long)]
    list: bool,

    /// Do not touch any files on disk or in subversion.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Revision or range to revert (43, r43, 42-50, 50:41).
    #[arg(required_unless_present = "list")]
    rev: Option<String>,

    #[arg(value_name = "WC-PATH", default_value = ".")]
    path: String,
}

#[derive(Args, Debug)]
struct SwitchArgs {
    /// List existing branches (or tags, with -t).
    #[arg(short, long)]
    list: bool,

    /// Look for a tag instead of a branch.
    #[arg(short, long)]
    tag: bool,

    /// Create the new branch before switching to it.
    #[arg(short, long)]
    create_branch: bool,

    /// Commit message for --create-branch.
    #[arg(short, value_name = "MSG")]
    message: Option<String>,

    /// Do not touch any files on disk or in subversion.
    #[arg(short = 'n', long)]
    dry_run: bool,

    branch: Option<String>,

    #[arg(value_name = "WC-PATH", default_value = ".")]
    path: String,
}

#[derive(Args, Debug)]
struct TagArgs {
    /// List existing tags.
    #[arg(short, long)]
    list: bool,

    /// Commit message.
    #[arg(short, value_name = "MSG")]
    message: Option<String>,

    /// Do not make the tag, just print the command.
    #[arg(short = 'n', long)]
    dry_run: bool,

    #[arg(value_name = "NEWTAGNAME", required_unless_present = "list")]
    name: Option<String>,

    #[arg(value_name = "WC-PATH", default_value = ".")]
    path: String,
}

#[derive(Args, Debug)]
struct BranchUrlArgs {
    /// List existing branches (or tags, with -t).
    #[arg(short, long)]
    list: bool,

    /// Look for a tag instead of a branch.
    #[arg(short, long)]
    tag: bool,

    branch: Option<String>,

    #[arg(value_name = "WC-PATH", default_value = ".")]
    path: String,
}

#[derive(Args, Debug)]
struct RmBranchArgs {
    /// List existing branches.
    #[arg(short, long)]
    list: bool,

    /// Commit message.
    #[arg(short, value_name = "MSG")]
    message: Option<String>,

    /// Do not remove the branch, just print the command.
    #[arg(short = 'n', long)]
    dry_run: bool,

    #[arg(required_unless_present = "list")]
    branch: Option<String>,
}

#[derive(Args, Debug)]
struct MvBranchArgs {
    /// List existing branches.
    #[arg(short, long)]
    list: bool,

    /// Commit message.
    #[arg(short, value_name = "MSG")]
    message: Option<String>,

    /// Do not rename the branch, just print the command.
    #[arg(short = 'n', long)]
    dry_run: bool,

    #[arg(value_name = "OLDBRANCH", required_unless_present = "list")]
    old: Option<String>,

    #[arg(value_name = "NEWBRANCH", required_unless_present = "list")]
    new: Option<String>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// List existing branches.
    #[arg(short, long)]
    list: bool,

    /// Branch to inspect; defaults to the current one.
    branch: Option<String>,

    #[arg(value_name = "WC-PATH", default_value = ".")]
    path: String,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse_from(registry::expand_alias(std::env::args_os().collect()));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style::error(&format!("Error: {:#}", e)));
            ExitCode::FAILURE
        }
    }
}

type Engine = CommandEngine<SvnClient, io::StdoutLock<'static>>;

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        return cmd_help();
    };
    let kind = command.kind();
    let open = || open_engine(cli.config.as_deref(), cli.log_level, kind);

    match command {
        Commands::Help => return cmd_help(),
        Commands::Selftest => return cmd_selftest(),
        Commands::Merge(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, args.tag);
            }
            engine.merge(&merge_request(args))?;
        }
        Commands::Revert(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, false);
            }
            let rev = args.rev.unwrap_or_default();
            engine.revert(&rev, &args.path, args.dry_run)?;
        }
        Commands::Switch(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, args.tag);
            }
            engine.switch(&SwitchRequest {
                branch: args.branch,
                path: args.path,
                tag: args.tag,
                create: args.create_branch,
                message: args.message,
                dry_run: args.dry_run,
            })?;
        }
        Commands::Tag(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, true);
            }
            let name = args.name.unwrap_or_default();
            engine.tag(&name, &args.path, args.message.as_deref(), args.dry_run)?;
        }
        Commands::Branchurl(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, args.tag);
            }
            engine.branch_url(args.branch.as_deref(), &args.path, args.tag)?;
        }
        Commands::Rmbranch(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, false);
            }
            let branch = args.branch.unwrap_or_default();
            engine.remove_branch(&branch, ".", args.message.as_deref(), args.dry_run)?;
        }
        Commands::Mvbranch(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, false);
            }
            let (old, new) = (args.old.unwrap_or_default(), args.new.unwrap_or_default());
            engine.move_branch(&old, &new, ".", args.message.as_deref(), args.dry_run)?;
        }
        Commands::Branchdiff(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, false);
            }
            engine.branch_diff(args.branch.as_deref(), &args.path)?;
        }
        Commands::Branchpoint(args) => {
            let mut engine = open()?;
            if args.list {
                return list(&mut engine, false);
            }
            engine.branch_point(args.branch.as_deref(), &args.path)?;
        }
    }
    Ok(())
}

/// Load configuration, start logging and connect to svn.
fn open_engine(
    config_path: Option<&Path>,
    log_level: Option<LevelFilter>,
    kind: CommandKind,
) -> Result<Engine> {
    let mut config =
        AppConfig::load(config_path).context("failed to load configuration file")?;
    init_tracing(log_level, &config);
    config
        .resolve_env_vars()
        .context("failed to resolve environment variables")?;
    config.validate().context("configuration validation failed")?;

    let client = SvnClient::from_config(&config.svn);
    debug!(command = kind.name(), svn = client.binary(), "dispatching");
    Ok(CommandEngine::new(client, io::stdout().lock()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `[REV] SOURCE-BRANCH [WC-PATH]`: a lone argument is the branch.
fn merge_request(args: MergeArgs) -> MergeRequest {
    let mut positional = args.args.into_iter();
    let (revision, source, path) = match (positional.next(), positional.next(), positional.next()) {
        (Some(source), None, _) => (None, source, ".".to_string()),
        (Some(rev), Some(source), path) => (Some(rev), source, path.unwrap_or_else(|| ".".into())),
        (None, _, _) => (None, String::new(), ".".to_string()),
    };
    MergeRequest {
        revision,
        source,
        path,
        tag: args.tag,
        reintegrate: args.reintegrate,
        accept: args.accept,
        diff: args.diff,
        dry_run: args.dry_run,
    }
}

fn list<W: Write>(engine: &mut CommandEngine<SvnClient, W>, tags: bool) -> Result<()> {
    let kind = if tags { ListKind::Tags } else { ListKind::Branches };
    engine.list(kind, ".")?;
    Ok(())
}

fn cmd_help() -> Result<()> {
    registry::write_help(&mut io::stdout().lock(), "eazysvn").context("failed to write help")
}

fn cmd_selftest() -> Result<()> {
    let report = run_selftest();
    if report.is_success() {
        println!(
            "{}",
            style::success(&format!("All {} tests passed.", report.total()))
        );
        return Ok(());
    }
    println!("{}", style::header("Selftest failures:"));
    for failure in &report.failures {
        println!("  {}", failure);
    }
    anyhow::bail!(
        "{} of {} self-tests failed",
        report.failures.len(),
        report.total()
    )
}

/// Diagnostics go to stderr: `--log-level`, else `RUST_LOG`, else the
/// config file's `[logging] level`.
fn init_tracing(cli_level: Option<LevelFilter>, config: &AppConfig) {
    let filter = match cli_level {
        Some(level) => Some(EnvFilter::default().add_directive(level.into())),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .or_else(|| EnvFilter::try_new(&config.logging.level).ok())
    .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}
