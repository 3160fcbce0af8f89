//! CLI binary for SkyView Log
//!
//! Subcommands:
//! - `showdates` lists the recording sessions found in a log
//! - `filter` cuts a date range out of a log
//! - `upload` sends a file to savvyanalysis.com

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use dialoguer::Password;
use skyview_log::{
    detect, select, upload_file, write_filtered, write_report, Bound, SavvyClient, SkyviewLog,
    UploadConfig,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const ENV_PASSWORD: &str = "SKYVIEW_PASSWORD";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (git ",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

fn infile_arg() -> Arg {
    Arg::new("infile")
        .help("SkyView user log in CSV format")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .index(1)
}

fn start_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .value_name("START_DATE_TIME")
        .help("Start date (and optionally time), e.g. --start \"2017-01-28 20:04:34\" or \"2017-01-28\"")
}

fn end_arg() -> Arg {
    Arg::new("end")
        .long("end")
        .value_name("END_DATE_TIME")
        .help("End date (and optionally time), same format as --start. The matching row is excluded")
}

fn build_command() -> Command {
    let showdates = Command::new("showdates")
        .about("Show distinct flight sessions in a log")
        .arg(infile_arg())
        .arg(start_arg())
        .arg(end_arg());
    #[cfg(feature = "json")]
    let showdates = showdates.arg(
        Arg::new("json")
            .long("json")
            .help("Print the sessions as JSON")
            .action(ArgAction::SetTrue),
    );

    Command::new("SkyView Log")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(LONG_VERSION)
        .about("Process SkyView user logs: list sessions, filter by date, upload to savvyanalysis.com")
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output on stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(showdates)
        .subcommand(
            Command::new("filter")
                .about("Filter the log by dates")
                .after_help("e.g. skyview filter sample.csv --start 2017-01-29 --end 2017-02-01 --outfile test.csv")
                .arg(infile_arg())
                .arg(
                    Arg::new("outfile")
                        .long("outfile")
                        .value_name("FILE")
                        .help("Output file (default: standard output)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(start_arg())
                .arg(end_arg()),
        )
        .subcommand(
            Command::new("upload")
                .about("Upload a file to savvyanalysis.com")
                .after_help("e.g. skyview upload out.csv username 3434\nThe password is prompted for unless SKYVIEW_PASSWORD is set.")
                .arg(
                    Arg::new("uploadfile")
                        .help("File to upload")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("username")
                        .help("Username at savvyanalysis.com")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("aircraft_id")
                        .help("Aircraft id at savvyanalysis.com")
                        .required(true)
                        .index(3),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .help("Name given to the upload (default: the file name)"),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Service root URL (default: https://www.savvyanalysis.com, or SKYVIEW_BASE_URL)"),
                )
                .arg(
                    Arg::new("insecure")
                        .long("insecure")
                        .help("Skip TLS certificate verification")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn bounds(matches: &ArgMatches) -> (Option<Bound>, Option<Bound>) {
    let start = matches.get_one::<String>("start").cloned().and_then(Bound::new);
    let end = matches.get_one::<String>("end").cloned().and_then(Bound::new);
    (start, end)
}

fn open_log(matches: &ArgMatches) -> Result<SkyviewLog<File>> {
    let path = matches
        .get_one::<PathBuf>("infile")
        .context("missing input file")?;
    SkyviewLog::open(path).with_context(|| format!("Failed to read SkyView log: {path:?}"))
}

fn cmd_showdates(matches: &ArgMatches) -> Result<()> {
    let log = open_log(matches)?;
    let (start, end) = bounds(matches);
    let blocks = detect(select(log.rows(), start, end)).context("Failed to detect sessions")?;
    debug!(blocks = blocks.len(), "sessions detected");

    #[cfg(feature = "json")]
    if matches.get_flag("json") {
        println!("{}", skyview_log::render_report_json(&blocks)?);
        return Ok(());
    }

    write_report(&blocks, io::stdout().lock())?;
    Ok(())
}

fn cmd_filter(matches: &ArgMatches) -> Result<()> {
    let (header, rows) = open_log(matches)?.into_parts();
    let (start, end) = bounds(matches);

    let sink: Box<dyn Write> = match matches.get_one::<PathBuf>("outfile") {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {path:?}"))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let written = write_filtered(&header, select(rows, start, end), sink)
        .context("Failed to write filtered rows")?;
    debug!(rows = written, "filter complete");
    Ok(())
}

fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var(ENV_PASSWORD) {
        return Ok(password);
    }
    let password = Password::new().with_prompt("Password").interact()?;
    Ok(password)
}

fn cmd_upload(matches: &ArgMatches) -> Result<()> {
    let file = matches
        .get_one::<PathBuf>("uploadfile")
        .context("missing upload file")?;
    let username = matches
        .get_one::<String>("username")
        .context("missing username")?;
    let aircraft_id = matches
        .get_one::<String>("aircraft_id")
        .context("missing aircraft id")?;

    let mut config = UploadConfig::from_env();
    if let Some(url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(url.as_str());
    }
    if matches.get_flag("insecure") {
        config.accept_invalid_certs = true;
    }
    if let Some(name) = matches.get_one::<String>("name") {
        config.upload_name = Some(name.clone());
    }
    debug!(base_url = %config.base_url, insecure = config.accept_invalid_certs, "upload config");

    let password = read_password()?;
    let mut client = SavvyClient::new(config).context("Failed to build HTTP client")?;
    let ack = upload_file(&mut client, username, &password, aircraft_id, file)?;
    info!(status = ack.status, "upload accepted");

    println!("File was uploaded successfully.");
    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("debug"));

    match matches.subcommand() {
        Some(("showdates", sub)) => cmd_showdates(sub),
        Some(("filter", sub)) => cmd_filter(sub),
        Some(("upload", sub)) => cmd_upload(sub),
        _ => {
            build_command().print_help()?;
            println!();
            Ok(())
        }
    }
}
