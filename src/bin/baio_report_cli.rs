use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

use baio_report::config::ReportConfig;
use baio_report::presentation::{confidence_bar, format_length};
use baio_report::report::{ExportContext, ReportFormat};
use baio_report::assess_file;

/// Interpret a saved BAIO classification response and export reports.
#[derive(Parser, Debug)]
#[command(name = "baio-report", version, about)]
struct Args {
    /// Classification response (.json or .json.gz)
    input: PathBuf,

    /// json, csv, pdf, txt or all
    #[arg(short, long, default_value = "all")]
    format: String,

    /// Directory the reports are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Optional report settings (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn spinner(color: &str, message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let template = format!("{{spinner:.{color}}} {{msg}}");
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template(&template)
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let formats: Vec<ReportFormat> = if args.format.eq_ignore_ascii_case("all") {
        ReportFormat::ALL.to_vec()
    } else {
        vec![args.format.parse::<ReportFormat>()?]
    };

    let config = match &args.config {
        Some(path) => ReportConfig::from_json_file(path)?,
        None => ReportConfig::default(),
    };

    // 1. Load and assess
    let sp = spinner("blue", "Reading classification response...");
    let results = assess_file(&args.input)?;
    sp.finish_with_message(format!(
        "Loaded {} sequence(s) from {}.",
        results.response.total_sequences,
        args.input.display()
    ));

    println!(
        "Sample risk: {} - {}",
        results.sample_risk.level.upper(),
        results.sample_risk.message
    );
    for (row, risk) in results.rows() {
        println!(
            "  {}\t{}\t{}\t{}\t{}",
            row.sequence_id,
            row.prediction,
            confidence_bar(row.confidence).0,
            format_length(row.length),
            risk.label
        );
    }

    // 2. Export
    let sp = spinner("yellow", "Writing reports...");
    fs::create_dir_all(&args.out_dir)?;
    let ctx = ExportContext::now(config);
    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let artifact = results.export(format, &ctx)?;
        let path = args.out_dir.join(&artifact.filename);
        fs::write(&path, &artifact.bytes)?;
        written.push(path);
    }
    sp.finish_with_message(format!("Wrote {} report(s).", written.len()));

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
