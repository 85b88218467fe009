//! spacetex - wiki space to LaTeX document tree

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, warn};
use serde::Serialize;

use spacetex::{Diagnostic, Document, FormatOptions, LabelRegistry, format, load_pages, read_definitions};

#[derive(Parser)]
#[command(name = "spacetex")]
#[command(version, about = "Convert a downloaded wiki space into a LaTeX document tree", long_about = None)]
#[command(after_help = "EXAMPLES:
    spacetex --pages space/ --definition document-data.html
    spacetex --pages space/ --definition document-data.html --exclude Sandbox -o guide.json")]
struct Cli {
    /// Directory holding the page-*.html files
    #[arg(long, value_name = "DIR")]
    pages: PathBuf,

    /// Document definition file
    #[arg(long, value_name = "FILE")]
    definition: PathBuf,

    /// Title of a page to leave out (repeatable)
    #[arg(long, value_name = "TITLE")]
    exclude: Vec<String>,

    /// Directory images were downloaded into
    #[arg(long, value_name = "DIR")]
    image_root: Option<PathBuf>,

    /// Skip pages the definition does not mention instead of adding them to an appendix
    #[arg(long)]
    no_appendix: bool,

    /// Space key prefix whose cross-space links are dropped (repeatable)
    #[arg(long, value_name = "PREFIX")]
    ignore_space_prefix: Vec<String>,

    /// Write the JSON dump here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// One formatted document, as dumped.
#[derive(Serialize)]
struct DocumentDump {
    document: Document,
    labels: LabelRegistry,
    unreferenced_pages: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut options = FormatOptions::default().with_create_missing_chapters(!cli.no_appendix);
    if let Some(root) = &cli.image_root {
        options = options.with_image_root(root);
    }
    for prefix in &cli.ignore_space_prefix {
        options = options.with_ignored_space_prefix(prefix.as_str());
    }

    let documents = read_definitions(&cli.definition).map_err(|e| e.to_string())?;
    let mut dumps = Vec::with_capacity(documents.len());

    for mut document in documents {
        // Inclusion flags live on the pages, so every document gets a fresh load
        let pages = load_pages(&cli.pages).map_err(|e| e.to_string())?;
        for title in &cli.exclude {
            if !pages.exclude(title) {
                warn!("Excluded page not found: {title}");
            }
        }

        let output = format(&pages, &mut document, &options)
            .map_err(|e| format!("{}: {e}", document.title))?;
        for label in output.labels.undefined_references() {
            warn!("Reference to undefined label {}", label.key);
        }

        dumps.push(DocumentDump {
            document,
            labels: output.labels,
            unreferenced_pages: output.unreferenced_pages,
            diagnostics: output.diagnostics,
        });
    }

    write_dump(&dumps, cli.output.as_ref()).map_err(|e| e.to_string())
}

fn write_dump(dumps: &[DocumentDump], path: Option<&PathBuf>) -> io::Result<()> {
    let mut writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    serde_json::to_writer_pretty(&mut writer, dumps)?;
    writeln!(writer)?;
    writer.flush()
}
