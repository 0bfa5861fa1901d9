extern crate clap;
#[macro_use]
extern crate slog;
extern crate slog_term;

use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use jkvs::{HostStore, Quota, SledStore, TypedStorage};
use serde_json::Value;
use slog::Drain;
use std::env;
use std::path::PathBuf;

fn main() -> jkvs::Result<()> {
    if let Err(e) = run_jkvs() {
        // Print the Display message for any error.
        // Simply returning the error will print the Debug version, which is not as nice.
        println!("{}", e);
        std::process::exit(1)
    }
    Ok(())
}

fn run_jkvs() -> jkvs::Result<()> {
    let key_arg = || {
        Arg::with_name("key")
            .takes_value(true)
            .value_name("KEY")
            .required(true)
    };

    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(crate_version!())
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .settings(&[
            AppSettings::VersionlessSubcommands,
            AppSettings::SubcommandRequiredElseHelp,
        ])
        .arg(
            Arg::with_name("dir")
                .help("Directory to keep the store in, defaults to the current directory")
                .long("dir")
                .takes_value(true)
                .value_name("DIR"),
        )
        .arg(
            Arg::with_name("quota")
                .help("Refuse writes which would take the store beyond this many bytes")
                .long("quota")
                .takes_value(true)
                .value_name("BYTES"),
        )
        .arg(
            Arg::with_name("verbose")
                .help("Log every read and write to stderr")
                .short("v")
                .long("verbose"),
        )
        .subcommand(
            SubCommand::with_name("get")
                .about("Print the JSON value of a given key")
                .arg(key_arg()),
        )
        .subcommand(
            SubCommand::with_name("set")
                .about("Set the value of a key to a JSON value")
                .arg(key_arg())
                .arg(
                    Arg::with_name("value")
                        .takes_value(true)
                        .value_name("JSON")
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("rm")
                .about("Remove a given key")
                .arg(key_arg()),
        )
        .get_matches();

    let log = logger(matches.is_present("verbose"));

    let dir = match matches.value_of("dir") {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir()?,
    };
    let quota = match matches.value_of("quota") {
        Some(quota) => Some(Quota::new(quota.parse::<u64>().map_err(|_| {
            JkvsCliError::InvalidQuota {
                quota: quota.to_owned(),
            }
        })?)),
        None => None,
    };

    let mut store = SledStore::open(&dir)?;
    if let Some(quota) = quota {
        store = store.with_quota(quota);
    }

    debug!(log, "Opened store"; "dir" => %dir.display(), "quota" => quota.map(Quota::limit));
    let storage = TypedStorage::new(store, log);

    match matches.subcommand() {
        ("get", Some(command_matches)) => get(&storage, command_matches),
        ("set", Some(command_matches)) => set(&storage, command_matches),
        ("rm", Some(command_matches)) => rm(&storage, command_matches),
        (cmd, _) => Err(JkvsCliError::UnknownCommand {
            command: cmd.to_string(),
        }
        .into()),
    }
}

fn get(storage: &TypedStorage<SledStore>, matches: &ArgMatches<'_>) -> jkvs::Result<()> {
    let key = matches.value_of("key").ok_or(JkvsCliError::UnexpectedArgs)?;

    match storage.get_item::<Value>(key)? {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("Key not found"),
    }
    Ok(())
}

fn set(storage: &TypedStorage<SledStore>, matches: &ArgMatches<'_>) -> jkvs::Result<()> {
    match (matches.value_of("key"), matches.value_of("value")) {
        (Some(key), Some(text)) => {
            let value: Value =
                serde_json::from_str(text).map_err(|_| JkvsCliError::InvalidJson {
                    text: text.to_owned(),
                })?;
            storage.set_item(key, &value)
        }
        _ => Err(JkvsCliError::UnexpectedArgs.into()),
    }
}

fn rm(storage: &TypedStorage<SledStore>, matches: &ArgMatches<'_>) -> jkvs::Result<()> {
    let key = matches.value_of("key").ok_or(JkvsCliError::UnexpectedArgs)?;

    storage.store().remove(key.to_owned())
}

fn logger(verbose: bool) -> slog::Logger {
    let decorator = slog_term::PlainSyncDecorator::new(std::io::stderr());
    let level = if verbose {
        slog::Level::Debug
    } else {
        slog::Level::Warning
    };
    let drain = slog_term::FullFormat::new(decorator)
        .build()
        .filter_level(level)
        .fuse();

    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

#[derive(Debug, failure::Fail)]
enum JkvsCliError {
    #[fail(display = "Unknown command: {}", command)]
    UnknownCommand { command: String },

    #[fail(display = "Unexpected CLI arguments")]
    UnexpectedArgs,

    #[fail(display = "Not valid JSON: {}", text)]
    InvalidJson { text: String },

    #[fail(display = "Quota must be a number of bytes, got: {}", quota)]
    InvalidQuota { quota: String },
}
