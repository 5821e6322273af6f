use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-importer")]
#[command(author, version, about = "Import photos and videos from camera cards")]
pub struct Cli {
    /// Directory holding config.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub settings_dir: Option<PathBuf>,

    /// Thumbnail cache directory (defaults to the platform cache dir)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List importable media under a directory
    Scan {
        #[arg(required = true)]
        dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import files into the library using the saved settings
    Import {
        /// Files to import, in order (defaults to everything on the source disk)
        files: Vec<PathBuf>,

        /// Import everything on the source disk except the listed files
        #[arg(long)]
        invert: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract and cache embedded thumbnails
    Thumbnail {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Worker threads (defaults to the CPU count)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Print a cached thumbnail as a data URI
    ShowThumbnail {
        #[arg(required = true)]
        path: PathBuf,
    },

    /// Remove every cached thumbnail
    ClearCache,

    /// Check that the external tools are available
    CheckTools,

    /// Print the import settings in effect
    ShowSettings,
}
