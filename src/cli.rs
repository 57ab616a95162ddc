use crate::client::{FatSecretClient, TokenStore};
use crate::config::{default_config_path, Config};
use crate::constants::DATE_HELP_TEXT;
use crate::date_codec::parse_date;
use crate::errors::AppResult;
use crate::exporter::{Exporter, Throttle};
use crate::models::{parse_data_kind, DataKind, DateRange};
use crate::writer::{open_output, write_batch};
use chrono::{Local, NaiveDate};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Arguments of one export run, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    pub kind: DataKind,
    pub range: DateRange,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub delay_ms: Option<u64>,
}

/// Builds the command-line interface.
pub fn command() -> Command<'static> {
    Command::new("fatsecret-export")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .after_help("Example:\n  fatsecret-export food -s 2023-01-01 -e 2023-01-31 -f food.csv")
        .arg(
            Arg::new("kind")
                .help("Data to export: 'food', 'exercise' or 'weight'")
                .required(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Write output to FILE instead of standard output")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("start_date")
                .short('s')
                .long("start-date")
                .help(DATE_HELP_TEXT)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("end_date")
                .short('e')
                .long("end-date")
                .help(DATE_HELP_TEXT)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Config file (defaults to ~/.fatsecret)")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("delay_ms")
                .short('d')
                .long("delay-ms")
                .help("Pause after each API call in milliseconds; 0 disables it")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set),
        )
}

/// Resolves parsed matches into [`ExportArgs`].
///
/// Missing dates default to `today`. Reversed dates are swapped.
///
/// # Errors
///
/// Returns `InvalidDataKind` for an unknown data kind and `InvalidInput` for a
/// date that is not `YYYY-MM-DD`.
pub fn resolve_args(matches: &ArgMatches, today: NaiveDate) -> AppResult<ExportArgs> {
    let kind = parse_data_kind(
        matches
            .get_one::<String>("kind")
            .map(String::as_str)
            .unwrap_or_default(),
    )?;

    let date_arg = |name: &str| -> AppResult<NaiveDate> {
        match matches.get_one::<String>(name) {
            Some(value) => parse_date(value),
            None => Ok(today),
        }
    };
    let range = DateRange::new(date_arg("start_date")?, date_arg("end_date")?);

    Ok(ExportArgs {
        kind,
        range,
        output: matches.get_one::<PathBuf>("file").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        delay_ms: matches.get_one::<u64>("delay_ms").copied(),
    })
}

/// Parses command-line arguments and runs the export.
///
/// The workflow is:
/// 1. Resolve data kind and date range
/// 2. Load the config file and the token store
/// 3. Authorize the configured user
/// 4. Fetch the records over the range
/// 5. Write them as CSV to the output file or stdout
pub async fn cli() -> AppResult<()> {
    let matches = command().get_matches();
    let args = resolve_args(&matches, Local::now().date_naive())?;
    run_export(&args).await
}

/// Runs one export end to end.
pub async fn run_export(args: &ExportArgs) -> AppResult<()> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = Config::from_file(&config_path)?;
    info!(config = %config_path.display(), user = %config.user.name, "Config loaded");

    let mut store = TokenStore::open(&config.user.datastore)?;
    let mut client = FatSecretClient::from_config(&config);
    client.authorize(&config.user.name, &mut store).await?;

    let throttle = Throttle::from_millis(args.delay_ms.unwrap_or(config.export.delay_ms));
    let batch = Exporter::new(&client, throttle)
        .export(args.kind, args.range)
        .await?;

    let out = open_output(args.output.as_deref())?;
    write_batch(out, &batch)?;

    info!(
        data_kind = args.kind.display_name(),
        records = batch.records.len(),
        "Export completed successfully"
    );
    Ok(())
}
