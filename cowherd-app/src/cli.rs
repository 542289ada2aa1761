use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cowherd",
    about = "Scrapes constitution documents out of the world constitutions collection"
)]
pub struct Cli {
    /// Mirror log events to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape a country's document and version links into a catalog JSON
    Links(LinksArgs),
    /// Extract full text for every version in a catalog JSON
    Text(TextArgs),
    /// Extract one document URL straight to a file
    Doc(DocArgs),
}

#[derive(Args)]
pub struct LinksArgs {
    /// Numeric country code in the collection
    #[arg(short = 'c', long)]
    pub country_code: u32,

    /// CSV map between country codes and names
    #[arg(short = 'm', long, default_value = "country_codes.csv")]
    pub map_file: PathBuf,

    /// Output directory for the catalog JSON
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Keep every dated file, not just keyword matches
    #[arg(short = 'a', long)]
    pub all_files: bool,

    /// Latest document year to keep
    #[arg(long)]
    pub max_year: Option<i32>,

    /// Reach the archive through the off-campus proxy
    #[arg(long)]
    pub off_campus: bool,
}

#[derive(Args)]
pub struct TextArgs {
    /// Catalog JSON produced by `links`
    #[arg(short = 'c', long)]
    pub catalog: PathBuf,

    /// Output directory for version text files
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Reach the archive through the off-campus proxy
    #[arg(long)]
    pub off_campus: bool,
}

#[derive(Args)]
pub struct DocArgs {
    /// Viewer URL of the document
    #[arg(long)]
    pub url: String,

    /// Output file
    #[arg(long)]
    pub out: PathBuf,
}
