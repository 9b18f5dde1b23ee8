//! CLI for omark.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{run_marker, run_o_count};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "omark")]
#[command(about = "omark: scene markers from O-counter mutations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Increment a scene's O-counter; the marker hook observes the call and
    /// offers to create a marker at the playback timestamp.
    OCount {
        /// Scene identifier.
        scene_id: String,

        /// GraphQL endpoint URL (e.g. http://localhost:9999/graphql).
        #[arg(long)]
        endpoint: String,

        /// Primary tag id attached to created markers.
        #[arg(long)]
        tag: String,

        /// Playback timestamp ("[[H:]MM:]SS"). Defaults to 0:00 when omitted.
        #[arg(long, value_name = "TIMESTAMP")]
        at: Option<String>,

        /// Create the marker without asking.
        #[arg(long)]
        yes: bool,
    },

    /// Create a scene marker directly, without a trigger.
    Marker {
        /// Scene identifier.
        scene_id: String,

        /// Playback timestamp ("[[H:]MM:]SS").
        at: String,

        /// GraphQL endpoint URL.
        #[arg(long)]
        endpoint: String,

        /// Primary tag id attached to created markers.
        #[arg(long)]
        tag: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::OCount {
                scene_id,
                endpoint,
                tag,
                at,
                yes,
            } => run_o_count(&endpoint, &tag, &scene_id, at.as_deref(), yes).await?,
            CliCommand::Marker {
                scene_id,
                at,
                endpoint,
                tag,
            } => run_marker(&endpoint, &tag, &scene_id, &at).await?,
        }

        Ok(())
    }
}
