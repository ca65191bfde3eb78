use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::document::InsertMode;
use crate::navigate::HighlightClock;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "navtoc")]
#[command(about = "Navigable table of contents for HTML and Markdown documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Custom configuration file(s); later files override earlier ones
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<Vec<PathBuf>>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false, global = true)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Silence output except errors
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Build a table of contents and insert it into a document
    #[command(alias = "b")]
    Build {
        /// HTML or Markdown document
        input: PathBuf,

        /// Id of the element containing the headings
        #[arg(long, value_name = "ID")]
        src: Option<String>,

        /// Heading levels to include, e.g. 1,2,3
        #[arg(short, long, value_name = "LEVELS")]
        levels: Option<String>,

        /// Id of the element receiving the navigation
        #[arg(long, value_name = "ID")]
        dest: Option<String>,

        /// How the navigation is inserted into the destination
        #[arg(long, value_enum)]
        insert: Option<InsertMode>,

        /// Language of the navigation label (de, en)
        #[arg(long, value_name = "LANG")]
        lang: Option<String>,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Simulate a click on a table of contents link against a page layout
    #[command(alias = "n")]
    Navigate {
        /// Link target, e.g. #h2-3
        href: String,

        /// YAML page layout with viewport, scroll offset and element boxes
        #[arg(long, value_name = "FILE")]
        layout: PathBuf,

        /// Class applied to the scroll destination
        #[arg(long, value_name = "CLASS")]
        highlight_class: Option<String>,

        /// How long the highlight stays on, in milliseconds
        #[arg(long, value_name = "MS")]
        duration_ms: Option<u64>,

        /// What the highlight duration is measured from
        #[arg(long, value_enum)]
        clock: Option<HighlightClock>,
    },
}
