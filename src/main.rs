// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tunesday CLI entrypoint.
//!
//! Runs the interactive menu on Tuesdays (or with `--force-tunesday`). A termination signal ends
//! the session through the interrupt channel so the data file is saved before exit.

use std::error::Error;
use std::path::PathBuf;

use time::{UtcOffset, Weekday};
use tracing::error;
use tracing_subscriber::EnvFilter;

use tunesday::interrupt::{self, Interrupt};
use tunesday::link::YouTubeTitles;
use tunesday::model::{local_offset, now_in};
use tunesday::session::{Session, SessionEnd};
use tunesday::store::{DataFile, WriteDurability, DEFAULT_DATA_FILENAME};
use tunesday::tui::{banner, CrosstermKeys, TerminalSession, Tui, TuiTheme};

type BoxError = Box<dyn Error + Send + Sync>;

const DATA_FILE_ENV: &str = "TUNESDAY_DATA_FILE";
const LOG_ENV: &str = "TUNESDAY_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--force-tunesday] [--durable-writes]\n  {program} --radio\n  {program} --help\n\nThe menu only opens on Tuesdays; --force-tunesday skips that check.\n--radio prints the radio banner and exits.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n\nEnvironment:\n  {DATA_FILE_ENV}  data file (default {DEFAULT_DATA_FILENAME} in the working directory)\n  {LOG_ENV}        log filter for stderr (default {DEFAULT_LOG_FILTER})\n  TUNESDAY_PALETTE    fg,bg,accent,highlight hex colors\n  NO_COLOR            disable colors"
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    radio: bool,
    force_tunesday: bool,
    durable_writes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseStop {
    Help,
    Invalid,
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ParseStop> {
    let mut options = CliOptions::default();

    for arg in args {
        let flag = match arg.as_str() {
            "-h" | "--help" => return Err(ParseStop::Help),
            "--radio" => &mut options.radio,
            "--force-tunesday" => &mut options.force_tunesday,
            "--durable-writes" => &mut options.durable_writes,
            _ => return Err(ParseStop::Invalid),
        };
        if *flag {
            return Err(ParseStop::Invalid);
        }
        *flag = true;
    }

    if options.radio && (options.force_tunesday || options.durable_writes) {
        return Err(ParseStop::Invalid);
    }

    Ok(options)
}

#[derive(Debug, Clone)]
struct Config {
    data_file: PathBuf,
    durability: WriteDurability,
    offset: UtcOffset,
    theme: TuiTheme,
}

impl Config {
    fn from_env(options: &CliOptions, offset: UtcOffset) -> Result<Self, BoxError> {
        let data_file = std::env::var_os(DATA_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILENAME));
        let durability = if options.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        };

        Ok(Self {
            data_file,
            durability,
            offset,
            theme: TuiTheme::from_env()?,
        })
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_tuesday(offset: UtcOffset) -> bool {
    now_in(offset).weekday() == Weekday::Tuesday
}

fn print_banner(lines: &[&str]) {
    for line in lines {
        println!("{line}");
    }
    println!();
}

/// Runs the menu session; returns how it ended and the playlist to print after teardown.
fn run_session(
    config: Config,
    interrupt: Interrupt,
) -> Result<(SessionEnd, Option<String>), BoxError> {
    let store = DataFile::new(config.data_file).with_durability(config.durability);

    let terminal_session = TerminalSession::enter()?;
    let tui = Tui::new(
        terminal_session.terminal()?,
        CrosstermKeys,
        interrupt,
        config.theme,
    );

    let mut session = match Session::open(tui, store, YouTubeTitles::new(), rand::thread_rng()) {
        Ok(session) => session.with_offset(config.offset),
        Err(err) => {
            error!(error = %err, "could not load data file");
            return Err(err.into());
        }
    };
    let end = session.run()?;
    Ok((end, session.take_playlist()))
}

fn run(options: CliOptions) -> Result<(), BoxError> {
    if options.radio {
        print_banner(banner::RADIO);
        return Ok(());
    }
    // Read the local offset before any runtime threads exist.
    let offset = local_offset();
    if !options.force_tunesday && !is_tuesday(offset) {
        print_banner(banner::NOT_TUESDAY);
        return Ok(());
    }

    let config = Config::from_env(&options, offset)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (trigger, interrupt) = interrupt::channel();

    let (end, playlist) = runtime.block_on(async move {
        tokio::spawn(interrupt::listen(trigger));
        tokio::task::spawn_blocking(move || run_session(config, interrupt)).await
    })??;

    if let Some(playlist) = playlist {
        println!("{playlist}\n");
    }
    match end {
        SessionEnd::Exited => println!("Goodbye!"),
        SessionEnd::Interrupted => println!("Interrupted. Goodbye!"),
    }
    Ok(())
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "tunesday".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(ParseStop::Help) => {
            print_usage(&program);
            return;
        }
        Err(ParseStop::Invalid) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    init_tracing();

    if let Err(err) = run(options) {
        eprintln!("tunesday: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{parse_options, CliOptions, ParseStop};

    fn parse(args: &[&str]) -> Result<CliOptions, ParseStop> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_empty_args() {
        assert_eq!(parse(&[]).expect("parse options"), CliOptions::default());
    }

    #[test]
    fn parses_flags_in_any_order() {
        let expected = CliOptions {
            radio: false,
            force_tunesday: true,
            durable_writes: true,
        };

        assert_eq!(parse(&["--force-tunesday", "--durable-writes"]), Ok(expected.clone()));
        assert_eq!(parse(&["--durable-writes", "--force-tunesday"]), Ok(expected));
    }

    #[test]
    fn parses_radio_alone() {
        let options = parse(&["--radio"]).expect("parse options");
        assert!(options.radio);
        assert!(!options.force_tunesday);
    }

    #[rstest]
    #[case(&["-h"])]
    #[case(&["--help"])]
    #[case(&["--force-tunesday", "--help"])]
    fn help_stops_parsing(#[case] args: &[&str]) {
        assert_eq!(parse(args), Err(ParseStop::Help));
    }

    #[rstest]
    #[case(&["--nope"])]
    #[case(&["tunesday.json"])]
    #[case(&["--radio", "--radio"])]
    #[case(&["--durable-writes", "--durable-writes"])]
    #[case(&["--radio", "--force-tunesday"])]
    fn rejects_invalid_args(#[case] args: &[&str]) {
        assert_eq!(parse(args), Err(ParseStop::Invalid));
    }
}
