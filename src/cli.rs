use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gin", about = "OpenGIN console: entity graph and extraction pipeline client")]
pub struct Cli {
    /// Write debug logs to /tmp/gin-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file to use instead of ~/.config/gin/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every entity across the configured major kinds.
    Entities,

    /// Show one entity by id.
    Entity { id: String },

    /// Create an entity through the ingestion API.
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        major: String,
        #[arg(long, default_value = "")]
        minor: String,
        #[arg(long)]
        name: String,
        /// Start of the name's validity window.
        #[arg(long, default_value = "")]
        start_time: String,
    },

    /// Update an existing entity. The kind cannot be changed.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        terminated: Option<String>,
    },

    /// Upload a PDF to the extraction pipeline.
    Upload { path: PathBuf },

    /// Stage the pipeline's bundled sample document and settings.
    QuickStart,

    /// Start an extraction run on an uploaded file.
    Extract {
        #[arg(long)]
        file_id: String,
        #[arg(long)]
        api_key: String,
        /// YAML file describing the metadata schema.
        #[arg(long)]
        metadata: Option<PathBuf>,
        #[arg(long)]
        prompt: String,
        /// Poll until the run finishes.
        #[arg(long)]
        wait: bool,
    },

    /// Show the state of an extraction run.
    Results {
        job_id: String,
        #[arg(long)]
        wait: bool,
    },

    /// Print an output file of an extraction run.
    File { path: String },

    /// Save the zip archive of a whole extraction run.
    Download {
        job_id: String,
        #[arg(long)]
        out: PathBuf,
    },

    /// List demo metadata records.
    Metadata,

    /// List demo attribute tables.
    Attributes {
        #[arg(long)]
        name: Option<String>,
    },

    /// List demo relationships.
    Relationships,
}
