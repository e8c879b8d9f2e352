use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Renders a preview job and prints what was drawn
    Preview {
        /// The preview job TOML file
        job: PathBuf,

        /// A theme TOML file, used instead of the job's own theme
        #[clap(short, long, env = "PAGE_EXTENDERS_THEME")]
        theme: Option<PathBuf>,

        /// Print the draw operations as JSON
        #[clap(long)]
        json: bool,
    },
    /// Prints the default theme as TOML
    Theme,
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Log what the renderers decide
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
