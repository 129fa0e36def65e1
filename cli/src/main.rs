//! skimpdf CLI - PDF outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use skimpdf::{extract_outline, to_json, JsonFormat, PdfSource};

#[derive(Parser)]
#[command(name = "skimpdf")]
#[command(version)]
#[command(about = "Extract title and heading outlines from PDF files", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Per-document time budget in seconds
    #[arg(long, default_value = "10")]
    time_limit: f64,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one PDF to JSON
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Per-document time budget in seconds
        #[arg(long, default_value = "10")]
        time_limit: f64,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Process every PDF in a directory into a directory of JSON files
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "DIR")]
        input_dir: PathBuf,

        /// Output directory for .json files
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output_dir: PathBuf,

        /// Per-document time budget in seconds
        #[arg(long, default_value = "10")]
        time_limit: f64,
    },

    /// Show document information and outline statistics
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Per-document time budget in seconds
        #[arg(long, default_value = "10")]
        time_limit: f64,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            time_limit,
            compact,
        }) => cmd_extract(&input, output.as_deref(), time_limit, compact),
        Some(Commands::Batch {
            input_dir,
            output_dir,
            time_limit,
        }) => cmd_batch(&input_dir, &output_dir, time_limit),
        Some(Commands::Info { input, time_limit }) => cmd_info(&input, time_limit),
        None => match cli.input {
            Some(input) => cmd_extract(&input, cli.output.as_deref(), cli.time_limit, cli.compact),
            None => {
                eprintln!("{}", "No input file specified. Try --help.".red());
                std::process::exit(2);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    time_limit: f64,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = extract_outline(input, Duration::from_secs_f64(time_limit));

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&result, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    time_limit: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pdfs: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdfs.sort();

    if pdfs.is_empty() {
        println!("{}", "No PDF files found.".yellow());
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    let bar = ProgressBar::new(pdfs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("progress template"),
    );

    let mut heading_total = 0usize;
    for pdf in &pdfs {
        let name = pdf
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("?")
            .to_string();
        bar.set_message(name.clone());

        let result = extract_outline(pdf, Duration::from_secs_f64(time_limit));
        heading_total += result.outline.len();

        let json = to_json(&result, JsonFormat::Pretty)?;
        let out_path = output_dir.join(pdf.file_stem().unwrap_or_default()).with_extension("json");
        fs::write(&out_path, &json)?;

        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} {} files, {} headings, written to {}",
        "Done!".green().bold(),
        pdfs.len(),
        heading_total,
        output_dir.display()
    );

    Ok(())
}

fn cmd_info(input: &Path, time_limit: f64) -> Result<(), Box<dyn std::error::Error>> {
    let format = skimpdf::detect_format_from_path(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    match PdfSource::open(input) {
        Ok(source) => {
            use skimpdf::DocumentSource;
            println!("{}: {}", "Pages".bold(), source.page_count());
            if let Some(title) = source.metadata_title() {
                println!("{}: {}", "Metadata title".bold(), title);
            }
        }
        Err(e) => println!("{}: {}", "Open failed".bold(), e),
    }

    let result = extract_outline(input, Duration::from_secs_f64(time_limit));

    println!();
    println!("{}", "Extracted Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Title".bold(), result.title);
    println!("{}: {}", "Headings".bold(), result.outline.len());

    for heading in &result.outline {
        let indent = match heading.level {
            skimpdf::HeadingLevel::H1 => "",
            skimpdf::HeadingLevel::H2 => "  ",
            skimpdf::HeadingLevel::H3 => "    ",
        };
        println!(
            "{}{} {} {}",
            indent,
            heading.level.to_string().dimmed(),
            heading.text,
            format!("(p. {})", heading.page).dimmed()
        );
    }

    Ok(())
}
