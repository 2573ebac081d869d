//! pdfoutline CLI - batch heading outline extraction

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::{
    find_documents, process_documents_with, BatchOptions, BatchReport, DocumentReport,
    DocumentStatus, Error, JsonFormat, OutlineOptions, SourceOptions,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract title and heading outline from PDFs as JSON", long_about = None)]
struct Cli {
    /// Directory containing the PDF files
    #[arg(value_name = "INPUT_DIR", default_value = "input")]
    input: PathBuf,

    /// Directory receiving one JSON file per document
    #[arg(value_name = "OUTPUT_DIR", default_value = "output")]
    output: PathBuf,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Process documents in parallel
    #[arg(long)]
    parallel: bool,

    /// Skip unreadable pages instead of failing the document
    #[arg(long)]
    lenient: bool,

    /// Minimum size ratio over body text for a heading
    #[arg(long, value_name = "F", default_value_t = OutlineOptions::DEFAULT_SIZE_RATIO)]
    size_ratio: f32,

    /// Only print errors and the summary
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn batch_options(&self) -> BatchOptions {
        let source = if self.lenient {
            SourceOptions::new().lenient()
        } else {
            SourceOptions::new()
        };
        let format = if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };

        BatchOptions::new()
            .with_outline(OutlineOptions::new().with_size_ratio(self.size_ratio))
            .with_source(source)
            .with_format(format)
            .with_parallel(self.parallel)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let documents = find_documents(&cli.input)?;
    if documents.is_empty() {
        return Err(Error::NoDocuments(cli.input.clone()).into());
    }

    if !cli.quiet {
        println!(
            "{} {} PDF file(s) in {}",
            "Found".cyan().bold(),
            documents.len(),
            cli.input.display()
        );
        for doc in &documents {
            println!("  {} {}", "-".dimmed(), file_name(doc));
        }
        println!();
    }

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(documents.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let options = cli.batch_options();
    log::debug!("Batch options: {:?}", options);

    let quiet = cli.quiet;
    let report = process_documents_with(&documents, &cli.output, &options, |doc| {
        if !quiet {
            pb.println(save_line(doc));
        }
        pb.set_message(file_name(&doc.input));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    print_summary(&report, &cli.output);
    Ok(())
}

fn save_line(doc: &DocumentReport) -> String {
    let input = file_name(&doc.input);
    let output = file_name(&doc.output);
    match doc.status {
        DocumentStatus::Processed => format!(
            "{} {} -> {} ({} headings)",
            "Saved".green(),
            input,
            output,
            doc.headings
        ),
        DocumentStatus::Fallback => format!(
            "{} {} -> {} (unreadable, placeholder written)",
            "Saved".yellow(),
            input,
            output
        ),
        DocumentStatus::WriteFailed => format!(
            "{} {}: {}",
            "Failed".red(),
            output,
            doc.error.as_deref().unwrap_or("write error")
        ),
    }
}

fn print_summary(report: &BatchReport, output: &Path) {
    println!("\n{}", "Summary".green().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Processed".bold(), report.processed());
    if report.fallbacks() > 0 {
        println!("{}: {}", "Fallback".bold(), report.fallbacks().to_string().yellow());
    }
    if report.write_failures() > 0 {
        println!(
            "{}: {}",
            "Write failures".bold(),
            report.write_failures().to_string().red()
        );
    }
    println!("{}: {}", "Output".bold(), output.display());
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
