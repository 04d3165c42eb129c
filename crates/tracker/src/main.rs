use anyhow::Context;
use chrono::{Local, NaiveDate, Utc};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use equity_core::Config;
use equity_tracker::chart::{write_equity_chart, ChartOptions};
use equity_tracker::session::{
    execute, parse_command, submit_error_message, write_load_error, write_snapshot, Flow,
    LOGGED_MESSAGE, SESSION_HELP,
};
use equity_tracker::{Dashboard, RowSource, SqliteRowSource, Submitted};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("equity-tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track daily P/L and its cumulative equity curve")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to a JSON config file"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Override the sheet database path"),
        )
        .arg(
            Arg::new("worksheet")
                .long("worksheet")
                .global(true)
                .help("Override the worksheet name"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("init").about("Create the sheet with its header row"))
        .subcommand(
            Command::new("show")
                .about("Show summary, equity curve and data log")
                .arg(json_arg())
                .arg(
                    Arg::new("chart")
                        .long("chart")
                        .value_parser(value_parser!(PathBuf))
                        .help("Also write the equity curve as an SVG line chart to this path"),
                ),
        )
        .subcommand(
            Command::new("log")
                .about("Log a daily P/L entry")
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("P/L in dollars, e.g. -42.50"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_parser(value_parser!(NaiveDate))
                        .help("Date of the P/L (YYYY-MM-DD), defaults to today"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("session")
                .about("Interactive session reading commands from stdin"),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(db) = matches.get_one::<PathBuf>("db") {
        config.sheet.database_path = db.clone();
    }
    if let Some(worksheet) = matches.get_one::<String>("worksheet") {
        config.sheet.worksheet = worksheet.clone();
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_sheet(config: &Config) -> anyhow::Result<SqliteRowSource> {
    let source = SqliteRowSource::open(
        &config.sheet.database_path,
        config.sheet.spreadsheet_key.clone(),
        config.sheet.worksheet.clone(),
    )?;
    Ok(source)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run() -> anyhow::Result<ExitCode> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config);

    let source = open_sheet(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Sheet {}/{} ready at {}",
                source.spreadsheet_key(),
                source.worksheet(),
                config.sheet.database_path.display()
            );
        }
        Some(("show", args)) => {
            let mut dashboard = Dashboard::with_config(source, &config);
            let snapshot = match dashboard.load(Utc::now()) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    write_load_error(&mut out, &e)?;
                    return Ok(ExitCode::FAILURE);
                }
            };
            write_snapshot(&mut out, &snapshot, args.get_flag("json"))?;

            if let Some(path) = args.get_one::<PathBuf>("chart") {
                if snapshot.series.is_empty() {
                    eprintln!("No entries yet, chart not written.");
                } else {
                    write_equity_chart(&snapshot.series, &ChartOptions::default(), path)
                        .with_context(|| format!("writing chart to {}", path.display()))?;
                    eprintln!("Equity chart written to {}", path.display());
                }
            }
        }
        Some(("log", args)) => {
            let amount = *args.get_one::<f64>("amount").context("amount is required")?;
            let date = args.get_one::<NaiveDate>("date").copied().unwrap_or_else(today);

            let mut dashboard = Dashboard::with_config(source, &config);
            match dashboard.submit(date, amount, Utc::now()) {
                Ok(Submitted::Reloaded(snapshot)) => {
                    eprintln!("{}", LOGGED_MESSAGE);
                    write_snapshot(&mut out, &snapshot, args.get_flag("json"))?;
                }
                Ok(Submitted::ReloadFailed(e)) => {
                    eprintln!("{}", LOGGED_MESSAGE);
                    write_load_error(&mut out, &e)?;
                }
                Err(e) => {
                    eprintln!("{}", submit_error_message(&e));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(("session", _)) => {
            let mut dashboard = Dashboard::with_config(source, &config);
            run_session(&mut dashboard, &mut out)?;
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(ExitCode::SUCCESS)
}

fn run_session<S: RowSource, W: Write>(
    dashboard: &mut Dashboard<S>,
    out: &mut W,
) -> anyhow::Result<()> {
    let stdin = io::stdin();

    writeln!(out, "{}", SESSION_HELP)?;
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = parse_command(&line, today());
        if execute(dashboard, command, Utc::now(), out)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
