//! Command-line interface for the splitter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_output_dir, SplitOptions, DEFAULT_OUTPUT_DIR, MAX_HEADING_LEVEL};
use crate::document::ChmDocument;
use crate::error::{Result, SplitterError};
use crate::output::render_outline;
use crate::package::{read_source, split_file};

/// CHM Splitter - Split an HTML document into help pages by heading.
#[derive(Parser)]
#[command(name = "chm-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a document into one page per section.
    Split {
        /// Source HTML document
        input: PathBuf,

        /// Output directory (default: help/, created when missing)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deepest heading level that starts a new page (1-6)
        #[arg(long, default_value_t = MAX_HEADING_LEVEL)]
        max_level: u8,

        /// Title for the start page and table of contents
        #[arg(long)]
        title: Option<String>,

        /// Do not write search-index.yaml
        #[arg(long)]
        no_search_index: bool,
    },

    /// Print the section tree of a document.
    Tree {
        /// Source HTML document
        input: PathBuf,

        /// Deepest heading level that starts a new section (1-6)
        #[arg(long, default_value_t = MAX_HEADING_LEVEL)]
        max_level: u8,

        /// Wrap width for long titles
        #[arg(long, default_value_t = 80)]
        width: usize,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            output,
            max_level,
            title,
            no_search_index,
        } => split_command(
            &input,
            output.as_deref(),
            max_level,
            title,
            !no_search_index,
        ),
        Commands::Tree {
            input,
            max_level,
            width,
        } => tree_command(&input, max_level, width),
    }
}

fn split_options(max_level: u8, title: Option<String>) -> Result<SplitOptions> {
    let options = SplitOptions::new().with_max_split_level(max_level)?;
    Ok(match title {
        Some(title) => options.with_title(title),
        None => options,
    })
}

/// Resolve the output directory. Only the default location is created.
fn prepare_output_dir(output: Option<&Path>) -> Result<PathBuf> {
    match output {
        Some(dir) => {
            validate_output_dir(dir)?;
            Ok(dir.to_path_buf())
        }
        None => {
            let dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
            std::fs::create_dir_all(&dir).map_err(|e| SplitterError::OutputDirectory {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
            Ok(dir)
        }
    }
}

/// Execute the split command.
fn split_command(
    input: &Path,
    output: Option<&Path>,
    max_level: u8,
    title: Option<String>,
    write_search_index: bool,
) -> Result<()> {
    // Validate everything before touching the filesystem
    let options = split_options(max_level, title)?;
    let output_dir = prepare_output_dir(output)?;

    println!(
        "{} {} into {}",
        style("Splitting").bold(),
        style(input.display()).cyan(),
        style(output_dir.display()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Writing pages...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = match split_file(input, &output_dir, &options, write_search_index) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Title: {}", style(&report.title).green());
    println!("  Sections: {}", report.sections);
    println!("  Files: {}", report.files.len());
    println!("  Contents: {}", report.toc_path.display());
    if let Some(path) = &report.search_index_path {
        println!("  Search index: {}", path.display());
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_dir.display()
    );

    Ok(())
}

/// Execute the tree command.
fn tree_command(input: &Path, max_level: u8, width: usize) -> Result<()> {
    let options = split_options(max_level, None)?;
    let html = read_source(input)?;
    let document = ChmDocument::parse(&html, &options);

    println!("{}", style(document.title()).bold());
    if document.is_empty() {
        println!("{}", style("(no sections)").yellow());
    } else {
        println!("{}", render_outline(document.root(), width));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_split() {
        let cli = Cli::parse_from(["chm-splitter", "split", "manual.htm"]);

        let Commands::Split {
            input,
            output,
            max_level,
            title,
            no_search_index,
        } = cli.command
        else {
            panic!("expected split command");
        };
        assert_eq!(input, PathBuf::from("manual.htm"));
        assert!(output.is_none());
        assert_eq!(max_level, 6);
        assert!(title.is_none());
        assert!(!no_search_index);
    }

    #[test]
    fn test_cli_parse_split_with_options() {
        let cli = Cli::parse_from([
            "chm-splitter",
            "split",
            "manual.htm",
            "-o",
            "out",
            "--max-level",
            "2",
            "--title",
            "User Guide",
            "--no-search-index",
        ]);

        let Commands::Split {
            output,
            max_level,
            title,
            no_search_index,
            ..
        } = cli.command
        else {
            panic!("expected split command");
        };
        assert_eq!(output, Some(PathBuf::from("out")));
        assert_eq!(max_level, 2);
        assert_eq!(title.as_deref(), Some("User Guide"));
        assert!(no_search_index);
    }

    #[test]
    fn test_cli_parse_tree() {
        let cli = Cli::parse_from(["chm-splitter", "tree", "manual.htm", "--width", "40"]);

        let Commands::Tree { width, max_level, .. } = cli.command else {
            panic!("expected tree command");
        };
        assert_eq!(width, 40);
        assert_eq!(max_level, 6);
    }

    #[test]
    fn test_split_options_rejects_bad_level() {
        assert!(matches!(
            split_options(0, None),
            Err(SplitterError::InvalidHeadingLevel(0))
        ));
        let options = split_options(3, Some("T".to_string())).unwrap();
        assert_eq!(options.max_split_level, 3);
        assert_eq!(options.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_explicit_output_dir_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(prepare_output_dir(Some(&missing)).is_err());
        assert_eq!(prepare_output_dir(Some(dir.path())).unwrap(), dir.path());
    }
}
