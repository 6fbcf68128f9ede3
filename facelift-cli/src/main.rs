//! Facelift CLI
//!
//! Loads a saved copy of the chat page, applies the demo-day decoration,
//! and writes the restyled page back out.
//!
//! ```text
//! facelift page.html -o decorated.html
//! facelift --html '<html>...</html>'
//! facelift page.html --print-tree
//! facelift page.html --json -o decorated.html
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;

use facelift_decor::{
    ANCHOR_ID, BANNER_TEXT, CONTAINER_STYLE, Decoration, HEADER_BAR_CLASS, LAYOUT_STYLE,
    PAGE_STYLE, decorate,
};
use facelift_html::{parse_with_issues, print_tree, serialize};

/// Restyle the hackathon chat page and stamp the demo banner.
#[derive(Parser)]
#[command(name = "facelift", version, about)]
struct Cli {
    /// Path to the HTML page to decorate
    #[arg(required_unless_present = "html")]
    input: Option<PathBuf>,

    /// Decorate an inline HTML string instead of a file
    #[arg(long, conflicts_with = "input")]
    html: Option<String>,

    /// Write the decorated page here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the decorated DOM tree instead of serialized HTML
    #[arg(long)]
    print_tree: bool,

    /// Print a JSON report of the applied decoration to stdout
    #[arg(long)]
    json: bool,

    /// Suppress the summary on stderr
    #[arg(short, long)]
    quiet: bool,
}

/// Machine-readable account of one decoration run.
#[derive(Serialize)]
struct Report<'a> {
    anchor_id: &'a str,
    header_bar_class: &'a str,
    container_style: &'a str,
    layout_style: &'a str,
    page_style: &'a str,
    banner_text: &'a str,
    banner_node: usize,
    parse_issues: usize,
}

impl Report<'_> {
    fn new(decoration: &Decoration, parse_issues: usize) -> Self {
        Report {
            anchor_id: ANCHOR_ID,
            header_bar_class: HEADER_BAR_CLASS,
            container_style: CONTAINER_STYLE,
            layout_style: LAYOUT_STYLE,
            page_style: PAGE_STYLE,
            banner_text: BANNER_TEXT,
            banner_node: decoration.banner.0,
            parse_issues,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let html = read_source(&cli)?;
    let (mut tree, issues) = parse_with_issues(&html);
    if !issues.is_empty() && !cli.quiet {
        eprintln!(
            "{} {} parse issue(s) in input page",
            "facelift:".yellow().bold(),
            issues.len()
        );
    }

    let decoration: Decoration = decorate(&mut tree).context("page cannot be decorated")?;

    if cli.print_tree {
        print_tree(&tree, tree.root(), 0);
    } else {
        let decorated = serialize(&tree);
        match &cli.output {
            Some(path) => {
                fs::write(path, &decorated)
                    .with_context(|| format!("failed to write '{}'", path.display()))?;
            }
            None if cli.json => {
                // JSON owns stdout; the page only goes to a file.
            }
            None => println!("{decorated}"),
        }
    }

    if cli.json {
        let report = Report::new(&decoration, issues.len());
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if !cli.quiet {
        eprintln!(
            "{} header bar tagged, 3 styles overwritten, banner appended",
            "facelift:".green().bold()
        );
    }

    Ok(())
}

/// Read the page source from the input file or the `--html` argument.
fn read_source(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        return Ok(html.clone());
    }
    let path = cli
        .input
        .as_ref()
        .context("either an input path or --html is required")?;
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}
