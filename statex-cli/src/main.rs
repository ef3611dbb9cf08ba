use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use statex_core::DecryptionError;
use statex_ingest::{
    LopdfSource, ParseOutcome, PdftotextSource, PipelineError, PlainTextSource, Profile, TextLayout, TextSource,
    run_pipeline,
};
use statex_report::{CurrencyPartition, ExportLayout, aggregate_top, aggregate_top_by_currency, positive_only, write_csv};
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(name = "statex", version, about = "Bank statement transaction extractor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement and rank them by description
    Extract {
        /// Statement PDF (or a text dump with --text)
        file: PathBuf,

        /// Password for protected statements
        #[arg(long, env = "STATEX_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Parsing profile (see `statex profiles`)
        #[arg(long)]
        profile: Option<String>,

        /// Write the records to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Rows per ranking (default: config top_n)
        #[arg(long)]
        top: Option<usize>,

        /// Input is already-extracted text
        #[arg(long)]
        text: bool,

        /// Print a JSON report instead of tables
        #[arg(long)]
        json: bool,
    },

    /// List available parsing profiles
    Profiles,

    /// Write a default ~/.statex/config.toml
    InitConfig,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    profile: &'a str,
    #[serde(flatten)]
    outcome: &'a ParseOutcome,
    rankings: Vec<CurrencyPartition>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            file,
            password,
            profile,
            csv,
            top,
            text,
            json,
        } => {
            let cfg = config::load_config()?;
            let Some(profile) = cfg.profile(profile.as_deref()) else {
                bail!(
                    "unknown profile {:?} (run `statex profiles`)",
                    profile.unwrap_or_else(|| cfg.default_profile.clone())
                );
            };
            let top_n = top.unwrap_or(cfg.top_n);

            let bytes = fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            let source = select_source(&profile, text, &cfg.pdftotext_command)?;

            let outcome = match run_pipeline(source.as_ref(), &bytes, password.as_deref(), &profile) {
                Ok(outcome) => outcome,
                Err(PipelineError::Decryption(DecryptionError::NoPasswordGiven)) => {
                    bail!("This PDF is password-protected. Please pass --password.")
                }
                Err(PipelineError::Decryption(DecryptionError::WrongPassword)) => {
                    bail!("Incorrect password. Please try again.")
                }
                Err(PipelineError::EmptyResult { candidates, misses }) => {
                    log::info!("{candidates} candidate lines, {misses} unparsed");
                    bail!("No transactions extracted. Check the password or file format.")
                }
                Err(e) => return Err(e).with_context(|| format!("processing {}", file.display())),
            };

            if let Some(csv_path) = &csv {
                export(csv_path, &outcome, &profile)?;
            }

            let rankings = rankings_for(&profile, &outcome, top_n);

            if json {
                let report = JsonReport {
                    profile: &profile.name,
                    outcome: &outcome,
                    rankings,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("# Extracted transactions ({})\n", profile.name);
            render::print_records(&outcome.records);
            println!(
                "\nRecords: {} (candidates: {}, unparsed: {}, filtered: {})",
                outcome.records.len(),
                outcome.candidates,
                outcome.misses,
                outcome.filtered
            );

            for part in &rankings {
                let title = match part.currency.code() {
                    "" => format!("Top {top_n} by description"),
                    code => format!("Top {top_n} by description ({code})"),
                };
                render::print_ranking(&title, &positive_only(&part.rows));
            }

            if let Some(csv_path) = csv {
                println!("\nWrote {}", csv_path.display());
            }
        }

        Command::Profiles => {
            let cfg = config::load_config()?;
            for p in cfg.all_profiles() {
                let marker = if p.name == cfg.default_profile { "*" } else { " " };
                println!("{marker} {:<16} {}", p.name, p.summary);
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

/// Pick the extractor whose layout guarantee the profile needs.
fn select_source(profile: &Profile, text_input: bool, pdftotext: &str) -> Result<Box<dyn TextSource>> {
    let needs_columns = profile.required_layout() == Some(TextLayout::FixedColumns);

    if text_input {
        let layout = if needs_columns {
            TextLayout::FixedColumns
        } else {
            TextLayout::Flowing
        };
        return Ok(Box::new(PlainTextSource::new(layout)));
    }

    if needs_columns {
        let source = PdftotextSource::new(pdftotext);
        if !source.is_available() {
            bail!(
                "profile {} needs layout-preserving text but `{}` is not available (install poppler-utils or pass --text)",
                profile.name,
                pdftotext
            );
        }
        return Ok(Box::new(source));
    }

    Ok(Box::new(LopdfSource))
}

fn rankings_for(profile: &Profile, outcome: &ParseOutcome, top_n: usize) -> Vec<CurrencyPartition> {
    match ExportLayout::for_profile(profile) {
        ExportLayout::CountryColumn => vec![CurrencyPartition {
            currency: statex_core::Currency::Unspecified,
            rows: aggregate_top(&outcome.records, top_n),
        }],
        _ => aggregate_top_by_currency(&outcome.records, top_n),
    }
}

fn export(path: &Path, outcome: &ParseOutcome, profile: &Profile) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv(file, &outcome.records, ExportLayout::for_profile(profile))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
