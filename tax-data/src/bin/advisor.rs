use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tax_core::db::DbConfig;
use tax_core::{
    FinancialsRepository, JsonFieldExtractor, NewFinancialRecord, RawFinancials,
    RegexFieldExtractor, RegimeComparator, extract_with_fallback,
};
use tax_data::{FinancialsCsvLoader, RecordReport, build_registry};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Salary tax regime advisor.
///
/// Compares the old (deduction-heavy) and new (deduction-light) income tax
/// regimes for a salary record, and keeps submitted records in a local
/// database.
#[derive(Debug, Parser)]
#[command(name = "tax-advisor", version, about, long_about = None)]
struct Cli {
    /// Database backend to use.
    #[arg(long, default_value = "sqlite", global = true)]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `tax_advisor.db`) or `:memory:`.
    #[arg(long, default_value = "tax_advisor.db", global = true)]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute both regimes and print the comparison as JSON.
    Compare(CompareArgs),

    /// Pull salary figures out of a salary slip's text.
    ///
    /// A JSON record embedded in the text wins; otherwise labelled figures
    /// are matched by keyword.
    Extract {
        /// Text file holding the document contents.
        #[arg(short, long)]
        file: PathBuf,

        /// Store the extracted record and print its session id.
        #[arg(long, default_value_t = false)]
        save: bool,
    },

    /// Store a raw salary record read from a JSON file.
    Save {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print stored records, newest first, each with its regime comparison.
    List {
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Bulk-load salary records from a CSV file.
    Import {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// JSON file holding the salary record.
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[command(flatten)]
    amounts: AmountArgs,
}

/// Individual amounts; each overrides the same field from `--file`.
#[derive(Debug, Default, Args)]
struct AmountArgs {
    #[arg(long)]
    gross_salary: Option<String>,
    #[arg(long)]
    basic_salary: Option<String>,
    #[arg(long)]
    hra_received: Option<String>,
    #[arg(long)]
    rent_paid: Option<String>,
    #[arg(long = "deduction-80c")]
    deduction_80c: Option<String>,
    #[arg(long = "deduction-80d")]
    deduction_80d: Option<String>,
    #[arg(long)]
    professional_tax: Option<String>,
    #[arg(long)]
    tds: Option<String>,
}

impl AmountArgs {
    fn apply_to(
        self,
        raw: &mut RawFinancials,
    ) {
        let overrides = [
            (&mut raw.gross_salary, self.gross_salary),
            (&mut raw.basic_salary, self.basic_salary),
            (&mut raw.hra_received, self.hra_received),
            (&mut raw.rent_paid, self.rent_paid),
            (&mut raw.deduction_80c, self.deduction_80c),
            (&mut raw.deduction_80d, self.deduction_80d),
            (&mut raw.professional_tax, self.professional_tax),
            (&mut raw.tds, self.tds),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                *slot = Some(Value::String(value));
            }
        }
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Writes to stderr so JSON on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn read_raw_financials(path: &Path) -> Result<RawFinancials> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse salary record JSON: {}", path.display()))
}

fn extract_fields(text: &str) -> Result<RawFinancials> {
    let regex = RegexFieldExtractor::new().context("Failed to build extractor")?;
    Ok(extract_with_fallback(&JsonFieldExtractor, &regex, text))
}

async fn open_repository(
    backend: &str,
    db: &str,
) -> Result<Box<dyn FinancialsRepository>> {
    let db_config = DbConfig::new(backend, db);

    debug!("connecting to {} backend", db_config.backend);
    build_registry()
        .create(&db_config)
        .await
        .with_context(|| format!("Failed to open database: {}", db_config.connection_string))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let comparator = RegimeComparator::default();

    match cli.command {
        Command::Compare(args) => {
            let mut raw = match &args.file {
                Some(path) => read_raw_financials(path)?,
                None => RawFinancials::default(),
            };
            args.amounts.apply_to(&mut raw);

            let comparison = comparator.compare_raw(&raw);
            let recommended = comparison.recommended();
            info!(
                "{} recommended, saving {}",
                recommended.label(),
                comparison.savings()
            );
            print_json(&comparison)?;
        }
        Command::Extract { file, save } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read: {}", file.display()))?;
            let raw = extract_fields(&text)?;
            print_json(&raw)?;

            if save {
                let repo = open_repository(&cli.backend, &cli.db).await?;
                let saved = repo
                    .save_financials(NewFinancialRecord::from_raw(&raw))
                    .await
                    .context("Failed to save extracted record")?;
                println!("{}", saved.session_id);
            }
        }
        Command::Save { file } => {
            let raw = read_raw_financials(&file)?;
            let repo = open_repository(&cli.backend, &cli.db).await?;
            let saved = repo
                .save_financials(NewFinancialRecord::from_raw(&raw))
                .await
                .context("Failed to save record")?;
            println!("{}", saved.session_id);
        }
        Command::List { limit } => {
            let repo = open_repository(&cli.backend, &cli.db).await?;
            let reports: Vec<_> = repo
                .list_financials(limit)
                .await
                .context("Failed to list records")?
                .into_iter()
                .map(|record| RecordReport::new(record, &comparator))
                .collect();
            print_json(&reports)?;
        }
        Command::Import { file } => {
            info!("Loading salary records from: {}", file.display());
            let reader =
                File::open(&file).with_context(|| format!("Failed to open: {}", file.display()))?;
            let records = FinancialsCsvLoader::parse(reader)
                .with_context(|| format!("Failed to parse CSV: {}", file.display()))?;
            info!("Parsed {} records from CSV", records.len());

            let repo = open_repository(&cli.backend, &cli.db).await?;
            let inserted = FinancialsCsvLoader::load(repo.as_ref(), &records)
                .await
                .context("Failed to load salary records into database")?;
            println!("Successfully imported {} records.", inserted);
        }
    }

    Ok(())
}
