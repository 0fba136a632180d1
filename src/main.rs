//! tagwalk - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tagwalk::{SortOrder, SystemGit, Tag, TagReader};

/// List git tags in release order with previous/next links.
#[derive(Parser, Debug)]
#[command(name = "tagwalk")]
#[command(about = "List git tags in release order with previous/next links")]
#[command(version)]
struct Cli {
    /// Path to the git repository
    #[arg(short = 'C', long, default_value = ".")]
    path: PathBuf,

    /// Keep only tags whose name matches this regular expression
    #[arg(long)]
    filter: Option<String>,

    /// Sort order for the tag list
    #[arg(long, value_enum, default_value_t = Sort::Version)]
    sort: Sort,

    /// Emit the tag list as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Sort {
    /// Descending semantic-version precedence (tag names must be semver)
    Version,
    /// Most recent tag first
    Date,
}

impl From<Sort> for SortOrder {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Version => SortOrder::Version,
            Sort::Date => SortOrder::Date,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runner = SystemGit::at(&cli.path);
    let reader = TagReader::new(runner, cli.filter.as_deref(), cli.sort.into())
        .context("Invalid tag filter")?;

    let tags = reader.read_all().context("Failed to read tags")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    if tags.is_empty() {
        println!("No tags found.");
        return Ok(());
    }

    for tag in &tags {
        print_tag(tag);
    }

    Ok(())
}

/// Print one tag with its neighbors.
fn print_tag(tag: &Tag) {
    println!(
        "{}  {}  {}",
        tag.date.format("%Y-%m-%d"),
        tag.name,
        tag.subject
    );
    if let Some(next) = &tag.next {
        println!("        next: {}", next.name);
    }
    if let Some(previous) = &tag.previous {
        println!("    previous: {}", previous.name);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sort_rejects_unknown_value() {
        assert!(Cli::try_parse_from(["tagwalk", "--sort", "alphabetical"]).is_err());
    }

    #[test]
    fn test_sort_defaults_to_version() {
        let cli = Cli::try_parse_from(["tagwalk"]).expect("parse failed");
        assert!(matches!(cli.sort, Sort::Version));
    }
}
