use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "youtrack")]
#[command(about = "A CLI for YouTrack issues and their attachments", version)]
#[command(after_help = "EXAMPLES:
    youtrack issues --tag codex           List issues tagged 'codex'
    youtrack issue view CEL-1234          Show issue details
    youtrack issue download CEL-1234      Download all attachments
    youtrack fetch CEL-1234 <TOKEN>       Fetch and download with an explicit token")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YouTrack base URL (e.g., https://example.myjetbrains.com/youtrack)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Permanent token (overrides YOUTRACK_TOKEN and the config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage issues
    #[command(after_help = "EXAMPLES:
    youtrack issue list --tag codex --limit 10
    youtrack issue view CEL-1234
    youtrack issue download CEL-1234 -o ./attachments")]
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// List issues by tag (alias for 'issue list')
    #[command(after_help = "EXAMPLES:
    youtrack issues --tag codex
    youtrack issues --tag codex --limit 20 --json")]
    Issues(IssueListArgs),
    /// Fetch an issue and download its attachments using an explicit token
    #[command(after_help = "EXAMPLES:
    youtrack fetch CEL-1234 perm:xxxx
    youtrack fetch CEL-1234 perm:xxxx -o ./attachments")]
    Fetch(FetchArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    youtrack completions bash > ~/.bash_completion.d/youtrack
    youtrack completions zsh > ~/.zfunc/_youtrack")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    youtrack init")]
    Init,
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// List issues carrying a tag
    #[command(after_help = "EXAMPLES:
    youtrack issue list --tag codex")]
    List(IssueListArgs),
    /// Show issue title, description and attachments
    #[command(after_help = "EXAMPLES:
    youtrack issue view CEL-1234
    youtrack issue view CEL-1234 --tags")]
    View(IssueViewArgs),
    /// List attachments on an issue
    #[command(after_help = "EXAMPLES:
    youtrack issue attachments CEL-1234")]
    Attachments {
        /// Issue identifier (e.g., CEL-1234)
        id: String,
    },
    /// Download all attachments of an issue
    #[command(after_help = "EXAMPLES:
    youtrack issue download CEL-1234
    youtrack issue download CEL-1234 -o ./attachments")]
    Download(DownloadArgs),
}

#[derive(Args, Clone)]
pub struct IssueListArgs {
    /// Tag name to filter by
    #[arg(long, short)]
    pub tag: String,

    /// Maximum number of issues to return (one page)
    #[arg(long, short, default_value = "100")]
    pub limit: u32,
}

#[derive(Args)]
pub struct IssueViewArgs {
    /// Issue identifier (e.g., CEL-1234)
    pub id: String,

    /// Also request the issue's tags
    #[arg(long)]
    pub tags: bool,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// Issue identifier (e.g., CEL-1234)
    pub id: String,

    /// Output directory (defaults to download_dir from config, then ./downloads)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Issue identifier (e.g., CEL-1234)
    pub id: String,

    /// Permanent token used for this request
    #[arg(value_name = "TOKEN")]
    pub api_token: String,

    /// Output directory for attachments
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Exit code for a failed parse. Help and version output exit 0, every usage
/// error exits 1.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
