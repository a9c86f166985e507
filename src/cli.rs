//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sitekit", version, about = "Static site server and maintenance tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the site over HTTP with cross-origin isolation headers
    Serve(ServeArgs),
    /// Regenerate playlist.json from a folder of MP3 files
    Playlist(PlaylistArgs),
    /// Repair shell-mangled stylesheet/script tags in an HTML file
    Patch(PatchArgs),
    /// Make an image's background transparent around its top-left pixel color
    Cutout(CutoutArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on; 0 picks an ephemeral port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory to serve (overrides config)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Config file name, without extension
    #[arg(long, default_value = "sitekit")]
    pub config: String,
}

#[derive(Debug, Args)]
pub struct PlaylistArgs {
    /// Folder to scan for MP3 files
    #[arg(default_value = "Music")]
    pub dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct PatchArgs {
    /// HTML file to repair in place
    #[arg(default_value = "index.html")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct CutoutArgs {
    /// Input image
    pub input: PathBuf,

    /// Output PNG path
    pub output: PathBuf,

    /// Per-channel distance from the background color that still counts as background
    #[arg(long, default_value_t = crate::tools::cutout::DEFAULT_THRESHOLD)]
    pub threshold: u8,
}
