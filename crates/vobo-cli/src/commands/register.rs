//! Register command - inspect and export the V°B° register.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use vobo_core::Register;

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Register file (default: from config)
    #[arg(long)]
    register: Option<PathBuf>,

    #[command(subcommand)]
    command: RegisterCommand,
}

#[derive(Subcommand)]
enum RegisterCommand {
    /// Print every register row
    Show,

    /// Write the register as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(args: RegisterArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let register = Register::open(
        args.register
            .clone()
            .unwrap_or_else(|| config.register.path.clone()),
    );

    match args.command {
        RegisterCommand::Show => show(&register),
        RegisterCommand::Export { output } => export(&register, output.as_deref()),
    }
}

fn show(register: &Register) -> anyhow::Result<()> {
    let records = register.load()?;

    if records.is_empty() {
        println!(
            "{} register is empty ({})",
            style("ℹ").blue(),
            register.path().display()
        );
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        println!(
            "{} {}",
            style(format!("#{}", i + 1)).bold(),
            record.source_file
        );
        println!("   Fecha Documento: {}", dash(&record.document_date));
        println!("   Solicitante:     {}", dash(&record.applicant_name));
        println!("   Unidad:          {}", dash(&record.requesting_unit));
        println!("   Objetivo:        {}", dash(&record.objective));
        println!(
            "   Monto Estimado:  {}",
            record
                .estimated_amount
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
        println!("   Recepción:       {}", dash(&record.received));
        println!(
            "   Firma V°B°:      {} ({})",
            dash(&record.signoff),
            record.status
        );
    }

    println!();
    println!(
        "{} {} rows at {}",
        style("✓").green(),
        records.len(),
        register.path().display()
    );
    Ok(())
}

fn export(register: &Register, output: Option<&Path>) -> anyhow::Result<()> {
    let csv_text = register.export()?;

    match output {
        Some(path) => {
            fs::write(path, &csv_text)?;
            println!(
                "{} Register exported to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => print!("{}", csv_text),
    }
    Ok(())
}

fn dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
