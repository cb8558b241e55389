//! doctree - Normalize docutils trees for DOCX/PDF export

use std::collections::BTreeMap;
use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doctree::docutils::XmlFile;
use doctree::normalize::TARGET_CLASSES;
use doctree::{Document, NormalizeConfig, ProjectConfig, ProjectInfo, assemble, write_xml};

#[derive(Parser)]
#[command(name = "doctree")]
#[command(version, about = "Normalize docutils trees for DOCX/PDF export", long_about = None)]
#[command(after_help = "EXAMPLES:
    doctree index.xml out.xml           Normalize a tree
    doctree -i index.xml                Show node statistics
    doctree --project conf.json         Show project export settings
    RUST_LOG=doctree=debug doctree -v index.xml")]
struct Cli {
    /// Input docutils XML file
    #[arg(value_name = "INPUT", required_unless_present = "project")]
    input: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    /// Read normalizer switches from the `normalize` section of a conf.json
    #[arg(long, value_name = "CONF")]
    config: Option<String>,

    /// Write the tree without normalizing it
    #[arg(long)]
    raw: bool,

    /// Log each stage and processed node
    #[arg(short, long)]
    verbose: bool,

    /// Dump root-to-leaf paths before normalizing
    #[arg(long)]
    dump_before: bool,

    /// Dump root-to-leaf paths after normalizing
    #[arg(long)]
    dump_after: bool,

    /// Suppress output messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show node statistics instead of writing the tree
    #[arg(short, long)]
    info: bool,

    /// Show project metadata and export settings from a conf.json
    #[arg(long, value_name = "CONF")]
    project: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default = if cli.quiet {
        "doctree=error"
    } else if cli.verbose || cli.dump_before || cli.dump_after {
        "doctree=info"
    } else {
        "doctree=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> doctree::Result<()> {
    if let Some(ref conf) = cli.project {
        show_project(conf)?;
    }

    let Some(ref input) = cli.input else {
        return Ok(());
    };

    let config = normalize_config(cli)?;
    let doc = assemble(&XmlFile::new(input), &config)?;

    if cli.info {
        show_info(input, &doc);
        return Ok(());
    }

    let xml = write_xml(&doc);
    match cli.output {
        Some(ref output) => {
            fs::write(output, xml)?;
            if !cli.quiet {
                eprintln!("{input} -> {output}");
            }
        }
        None => print!("{xml}"),
    }

    Ok(())
}

/// Switches from `--config` (or defaults), then command-line overrides.
fn normalize_config(cli: &Cli) -> doctree::Result<NormalizeConfig> {
    let base = match cli.config {
        Some(ref path) => ProjectConfig::load(path)?.normalize,
        None => NormalizeConfig::quiet(),
    };

    let mut config = base;
    if cli.raw {
        config.apply = false;
    }
    if cli.verbose {
        config.log = true;
    }
    if cli.dump_before || cli.dump_after {
        config.log = true;
        config.log_node_before |= cli.dump_before;
        config.log_node_after |= cli.dump_after;
    }
    if cli.quiet {
        config.log = false;
    }
    Ok(config)
}

fn show_info(path: &str, doc: &Document) {
    let mut histogram: BTreeMap<&str, usize> = BTreeMap::new();
    for id in doc.iter_dfs() {
        if let Some(class) = doc.class(id) {
            *histogram.entry(class.name()).or_default() += 1;
        }
    }

    println!("File: {path}");
    println!("Nodes: {}", doc.node_count());
    for class in TARGET_CLASSES {
        let count = histogram.get(class.name()).copied().unwrap_or(0);
        println!("Targets ({}): {count}", class.name());
    }
    println!("Classes:");
    for (name, count) in &histogram {
        println!("  {name}: {count}");
    }
}

fn show_project(path: &str) -> doctree::Result<()> {
    let config = ProjectConfig::load(path)?;
    let info = ProjectInfo::load(&config)?;

    println!("Project: {}", info.project);
    println!("Release: {}", info.release);
    println!("Title: {}", info.title);
    println!("Author: {}", info.author);
    println!("Copyright: {}", info.copyright());

    let docx = info.docx_document_now();
    println!("DOCX: {} ({})", docx.filename, docx.subject);
    if let Some(ref style) = docx.style {
        println!("DOCX style: {style}");
    }

    let pdf = info.pdf_document();
    println!("PDF: {} ({})", pdf.filename, pdf.title);
    println!();
    print!("{}", info.rst_prolog());

    Ok(())
}
