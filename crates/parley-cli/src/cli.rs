use clap::{Parser, Subcommand, ValueEnum};
use parley_types::{SettingsPatch, Theme};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "parley")]
#[command(about = "Locally cached chat conversations, synced with a remote store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List cached conversations, newest first
    List,
    /// Pull the remote conversation list and merge it into the cache
    Sync,
    /// Print a conversation, fetching its history if it is not loaded yet
    Show {
        /// Conversation id (defaults to the current one)
        id: Option<String>,
    },
    /// Start a new conversation and make it current
    New,
    /// Make a conversation current
    Use { id: String },
    /// Send a message and print the assistant's reply
    Send {
        /// Target conversation (defaults to the current one, or a new one)
        #[arg(short, long)]
        conversation: Option<String>,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a conversation
    Delete { id: String },
    /// Delete every conversation
    Clear,
    /// Write conversations and settings as JSON
    Export {
        /// Output file (stdout when omitted)
        path: Option<PathBuf>,
    },
    /// Replace conversations and settings from an export file
    Import { path: PathBuf },
    /// Show or change settings
    Settings(SettingsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Debug, Default, clap::Args)]
pub struct SettingsArgs {
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
    #[arg(long)]
    pub temperature: Option<f32>,
    #[arg(long)]
    pub max_tokens: Option<u32>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub memory: Option<bool>,
    #[arg(long)]
    pub research: Option<bool>,
    #[arg(long)]
    pub internet: Option<bool>,
    #[arg(long)]
    pub auto_learn: Option<bool>,
    #[arg(long)]
    pub batch: Option<bool>,
    #[arg(long)]
    pub user_id: Option<String>,
}

impl From<SettingsArgs> for SettingsPatch {
    fn from(args: SettingsArgs) -> Self {
        SettingsPatch {
            theme: args.theme.map(Theme::from),
            temperature: args.temperature,
            max_tokens: args.max_tokens,
            model: args.model,
            use_memory: args.memory,
            use_research: args.research,
            internet_access: args.internet,
            auto_learn: args.auto_learn,
            use_batch_processing: args.batch,
            auth_token: None,
            user_id: args.user_id,
        }
    }
}
