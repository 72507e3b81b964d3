use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gitlocalstats")]
#[command(about = "Scan a folder for Git repositories and remember where they live")]
pub struct CliArgs {
    /// Folder to scan for Git repositories
    pub folder: PathBuf,

    /// Keep scanning when a subdirectory cannot be read instead of aborting
    #[arg(long)]
    pub keep_going: bool,
}
