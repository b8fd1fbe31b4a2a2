//! Process command - extract fields from a single request document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use vobo_core::models::record::DATE_FORMAT;
use vobo_core::{FieldParser, Register, RegisterRecord, RequestFields, TextExtractor, VoboConfig};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (DOCX or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Append the parsed request to the register
    #[arg(long)]
    save: bool,

    /// Reception date as dd/mm/yyyy (default: today)
    #[arg(long)]
    received: Option<String>,

    /// Mark the request as signed today
    #[arg(long)]
    signed: bool,

    /// Signoff date as dd/mm/yyyy (overrides --signed)
    #[arg(long)]
    signoff_date: Option<String>,

    /// Register file (default: from config)
    #[arg(long)]
    register: Option<PathBuf>,

    /// Include the extracted text in the output
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON output
    Json,
}

/// Everything the command reports about one document.
#[derive(Serialize)]
pub(crate) struct ProcessOutput {
    pub(crate) source_file: String,
    pub(crate) fields: RequestFields,
    pub(crate) blank: bool,
    pub(crate) log: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    info!("processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading file...");
    pb.set_position(10);
    let data = fs::read(&args.input)?;
    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();

    pb.set_message("Extracting text...");
    pb.set_position(30);
    let extractor = TextExtractor::from_config(&config);
    let document = extractor.extract(&data, &extension);

    pb.set_message("Parsing fields...");
    pb.set_position(70);
    let parser = FieldParser::new().with_max_value_len(config.fields.max_value_length);
    let fields = parser.parse(&document.text);

    pb.set_position(100);
    pb.finish_and_clear();

    if document.is_blank() {
        eprintln!(
            "{}",
            style(
                "Warning: no text could be extracted; parsed fields will be empty \
                 (run `vobo doctor` to check extraction capabilities)"
            )
            .yellow()
        );
    }

    let output = ProcessOutput {
        source_file: file_name(&args.input),
        fields: fields.clone(),
        blank: document.is_blank(),
        log: document.report.entries().to_vec(),
        text: args.show_text.then(|| document.text.clone()),
    };

    let rendered = render(&output, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", rendered);
    }

    if args.save {
        save_to_register(&args, &config, fields)?;
    }

    debug!("total processing time: {:?}", start.elapsed());

    Ok(())
}

pub(crate) fn render(output: &ProcessOutput, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(output)?),
        OutputFormat::Text => Ok(format_text(output)),
    }
}

fn format_text(output: &ProcessOutput) -> String {
    let mut out = String::new();

    out.push_str(&format!("Archivo: {}\n", output.source_file));
    out.push_str(&format!(
        "Fecha Documento: {}\n",
        dash(&output.fields.document_date)
    ));
    out.push_str(&format!(
        "Solicitante (Nombre): {}\n",
        dash(&output.fields.applicant_name)
    ));
    out.push_str(&format!(
        "Unidad Requirente: {}\n",
        dash(&output.fields.requesting_unit)
    ));
    out.push_str(&format!("Objetivo: {}\n", dash(&output.fields.objective)));
    out.push_str(&format!(
        "Monto Estimado: {}\n",
        output
            .fields
            .estimated_amount
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));

    out.push_str("\nExtraction log:\n");
    for entry in &output.log {
        out.push_str(&format!("  - {}\n", entry));
    }

    if let Some(text) = &output.text {
        out.push_str("\nExtracted text:\n");
        out.push_str(text);
        out.push('\n');
    }

    out
}

fn dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

fn save_to_register(
    args: &ProcessArgs,
    config: &VoboConfig,
    fields: RequestFields,
) -> anyhow::Result<()> {
    let received = match args.received.as_deref() {
        Some(raw) => parse_cli_date(raw, "--received")?,
        None => Local::now().date_naive(),
    };
    let signoff = match args.signoff_date.as_deref() {
        Some(raw) => Some(parse_cli_date(raw, "--signoff-date")?),
        None if args.signed => Some(Local::now().date_naive()),
        None => None,
    };

    let path = args
        .register
        .clone()
        .unwrap_or_else(|| config.register.path.clone());
    let register = Register::open(path);
    let record = RegisterRecord::new(fields, received, signoff, file_name(&args.input));
    let rows = register.append(record)?;

    println!(
        "{} Saved to register ({} rows) at {}",
        style("✓").green(),
        rows,
        register.path().display()
    );
    Ok(())
}

fn parse_cli_date(raw: &str, flag: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| anyhow::anyhow!("invalid {flag} date {raw:?}, expected dd/mm/yyyy"))
}
