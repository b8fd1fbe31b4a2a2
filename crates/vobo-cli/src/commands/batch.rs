//! Batch processing command for multiple request documents.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use vobo_core::{FieldParser, Register, RegisterRecord, TextExtractor};

use super::process::{OutputFormat, ProcessOutput};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Append every parsed request to the register as pending
    #[arg(long)]
    save: bool,

    /// Register file (default: from config)
    #[arg(long)]
    register: Option<PathBuf>,

    /// Continue when a file cannot be processed
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    output: Option<ProcessOutput>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "docx" | "pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("no matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = TextExtractor::from_config(&config);
    let parser = FieldParser::new().with_max_value_len(config.fields.max_value_length);

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let result = process_single_file(&path, &extractor, &parser);

        match result {
            Ok(output) => {
                let line = if output.blank {
                    format!(
                        "{} {} (no text extracted)",
                        style("⚠").yellow(),
                        path.display()
                    )
                } else {
                    format!("{} {}", style("✓").green(), path.display())
                };
                overall_pb.suspend(|| println!("{line}"));
                results.push(FileResult {
                    path: path.clone(),
                    output: Some(output),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("failed to process {}: {}", path.display(), error_msg);
                    overall_pb.suspend(|| {
                        println!("{} {}: {}", style("✗").red(), path.display(), error_msg)
                    });
                    results.push(FileResult {
                        path: path.clone(),
                        output: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.output.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Per-file outputs
    for result in &successful {
        if let (Some(output), Some(output_dir)) = (&result.output, &args.output_dir) {
            let stem = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("solicitud");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", stem, extension));
            let content = super::process::render(output, args.format)?;
            fs::write(&output_path, content)?;
            debug!("wrote output to {}", output_path.display());
        }
    }

    // Register rows are appended in one pass so the file is rewritten once
    if args.save {
        let register = Register::open(
            args.register
                .clone()
                .unwrap_or_else(|| config.register.path.clone()),
        );
        let mut records = register.load()?;
        let received = Local::now().date_naive();

        let mut added = 0;
        for result in &successful {
            if let Some(output) = &result.output {
                records.push(RegisterRecord::new(
                    output.fields.clone(),
                    received,
                    None,
                    output.source_file.clone(),
                ));
                added += 1;
            }
        }
        register.save(&records)?;
        println!(
            "{} Added {} rows to register at {}",
            style("✓").green(),
            added,
            register.path().display()
        );
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &PathBuf,
    extractor: &TextExtractor,
    parser: &FieldParser,
) -> anyhow::Result<ProcessOutput> {
    let data = fs::read(path)?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let document = extractor.extract(&data, extension);
    let fields = parser.parse(&document.text);

    Ok(ProcessOutput {
        source_file: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string(),
        fields,
        blank: document.is_blank(),
        log: document.report.entries().to_vec(),
        text: None,
    })
}

fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_date",
        "applicant_name",
        "requesting_unit",
        "objective",
        "estimated_amount",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(output) = &result.output {
            let status = if output.blank { "blank" } else { "ok" };
            wtr.write_record([
                filename,
                status,
                &output.fields.document_date,
                &output.fields.applicant_name,
                &output.fields.requesting_unit,
                &output.fields.objective,
                &output
                    .fields
                    .estimated_amount
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
