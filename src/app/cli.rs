use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find TODO and FIXME markers in a source tree"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a directory tree for TODOs and FIXMEs
    Run(RunArgs),
    /// Print the built-in directory and file type blacklists
    Filter,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Directory to start from (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Only scan files with these extensions (e.g. '.py .json')
    #[arg(long = "whitelist-ext", visible_alias = "wle", num_args = 1..)]
    pub whitelist_ext: Option<Vec<String>>,

    /// File names to skip
    #[arg(long = "exclude-file", visible_alias = "ef", num_args = 1..)]
    pub exclude_file: Option<Vec<String>>,

    /// Directory names to skip
    #[arg(long = "exclude-dir", visible_alias = "ed", num_args = 1..)]
    pub exclude_dir: Option<Vec<String>>,

    /// Print the name of every file searched
    #[arg(short = 'p', long, conflicts_with = "json")]
    pub print_filenames: bool,

    /// Emit the results as JSON
    #[arg(long)]
    pub json: bool,

    /// Visit directory entries in file name order
    #[arg(long)]
    pub sorted: bool,

    /// Do not descend into symlinked directories
    #[arg(long)]
    pub no_follow_links: bool,

    /// Skip files ignored by .gitignore
    #[arg(long)]
    pub git_ignore: bool,
}
