//! CLI command definitions and dispatch.

pub mod grant;
pub mod revoke;
pub mod search;
pub mod show;

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;
use sharelink_core::config::AppConfig;
use sharelink_core::error::AppError;
use sharelink_engine::SharingSession;
use sharelink_entity::IdentityKind;
use sharelink_identity::IdentityResolver;
use sharelink_remote::SshExecutor;

/// ShareLink — remote shared-link permission manager
#[derive(Debug, Parser)]
#[command(name = "sharelink", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search shared links by path substring
    Search(search::SearchArgs),
    /// Show full details of one record
    Show(show::ShowArgs),
    /// Add a user or group to selected records
    Grant(grant::GrantArgs),
    /// Remove users or groups from selected records
    Revoke(revoke::RevokeArgs),
}

/// Identity kind selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// A user account
    User,
    /// A group
    Group,
}

impl From<KindArg> for IdentityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::User => IdentityKind::User,
            KindArg::Group => IdentityKind::Group,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Search(args) => search::execute(args, &self.config, self.format).await,
            Commands::Show(args) => show::execute(args, &self.config, self.format).await,
            Commands::Grant(args) => grant::execute(args, &self.config).await,
            Commands::Revoke(args) => revoke::execute(args, &self.config).await,
        }
    }
}

/// Helper: build a session over the configured remote endpoint
pub fn build_session(config_path: &str) -> Result<SharingSession, AppError> {
    let config = AppConfig::load(config_path)?;
    let executor = Arc::new(SshExecutor::new(config.remote.clone()));
    let resolver = Arc::new(IdentityResolver::new(
        executor.clone(),
        config.sharing.account_cache_dir.clone(),
    ));
    Ok(SharingSession::new(
        executor,
        resolver,
        config.sharing.db_path.clone(),
        config.sharing.base_url.clone(),
    ))
}
