//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod config;

use std::time::Duration;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use config::{Config, LoggingFileRotation, LoggingFmtStyle};
use holo_northbound::codec::{self, EncodeMode};
use holo_northbound::decoder;
use holo_northbound::encoder;
use holo_northbound::session::tcp::TcpSession;
use holo_northbound::xml_tree::XmlElement;
use holo_northbound::{
    CrudService, EditOperation, Entity, Error, ValidationLevel, json,
};
use holo_yang::NETCONF_BASE_NS;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

#[derive(Clone, Copy, Debug)]
enum OutputFormat {
    Xml,
    Json,
}

fn init_tracing(config: &config::Logging) {
    // Enable logging to a file.
    let file = config.file.enabled.then(|| {
        let file_appender = match config.file.rotation {
            LoggingFileRotation::Never => {
                rolling::never(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Hourly => {
                rolling::hourly(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Daily => {
                rolling::daily(&config.file.dir, &config.file.name)
            }
        };

        let log_level_filter = LevelFilter::from_level(tracing::Level::TRACE);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_target(false)
            .with_thread_ids(config.file.fmt.show_thread_id)
            .with_file(config.file.fmt.show_source)
            .with_line_number(config.file.fmt.show_source)
            .with_ansi(config.file.fmt.colors);
        let layer = match config.file.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(log_level_filter)
    });

    // Enable logging to stdout.
    let stdout = config.stdout.enabled.then(|| {
        let log_level_filter = LevelFilter::from_level(tracing::Level::TRACE);
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(config.stdout.fmt.show_thread_id)
            .with_file(config.stdout.fmt.show_source)
            .with_line_number(config.stdout.fmt.show_source)
            .with_ansi(config.stdout.fmt.colors);
        let layer = match config.stdout.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(log_level_filter)
    });

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file)
        .with(stdout)
        .init();
}

// Returns an empty entity for the top-level node selected on the command
// line.
fn top_level_entity(
    matches: &ArgMatches<'_>,
) -> Result<Box<dyn Entity>, String> {
    let name = matches.value_of("node").unwrap_or("holo-sanity:runner");
    holo_models::top_level_entity(name)
        .ok_or_else(|| format!("unknown top-level node: {name}"))
}

// Reads an XML document holding the data to be edited.
//
// The document can either be a <config> or <data> element wrapping the
// top-level nodes, or a single top-level node.
fn load_data(path: &str) -> Result<XmlElement, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|error| format!("failed to read {path}: {error}"))?;
    let root = XmlElement::parse(&text)
        .map_err(|error| format!("failed to parse {path}: {error}"))?;
    if root.name == "config" || root.name == "data" {
        return Ok(root);
    }

    let mut data = XmlElement::new("data", Some(NETCONF_BASE_NS));
    data.children.push(root);
    Ok(data)
}

fn print_entity(
    entity: &dyn Entity,
    format: OutputFormat,
) -> Result<(), String> {
    let output = match format {
        OutputFormat::Xml => {
            let pairs =
                codec::encode(entity, EncodeMode::Data, ValidationLevel::None)
                    .and_then(|pairs| encoder::encode_data(&pairs));
            pairs.map_err(|error| report(error.into()))?
        }
        OutputFormat::Json => {
            let value = json::to_json(entity);
            serde_json::to_string_pretty(&value)
                .map_err(|error| error.to_string())?
        }
    };
    println!("{output}");
    Ok(())
}

fn read(
    service: &CrudService,
    session: &mut TcpSession,
    matches: &ArgMatches<'_>,
    all: bool,
) -> Result<(), String> {
    let format = match matches.value_of("format") {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Xml,
    };
    let mut filter = top_level_entity(matches)?;
    filter.read();
    let mut target = top_level_entity(matches)?;

    let found = service
        .read_into(session, &*filter, &mut *target, all)
        .map_err(report)?;
    match found {
        true => print_entity(&*target, format),
        false => {
            info!("no data found");
            Ok(())
        }
    }
}

fn edit(
    service: &CrudService,
    session: &mut TcpSession,
    matches: &ArgMatches<'_>,
) -> Result<(), String> {
    let operation = match matches.value_of("operation") {
        Some("create") => EditOperation::Create,
        Some("replace") => EditOperation::Replace,
        Some("delete") => EditOperation::Delete,
        Some("remove") => EditOperation::Remove,
        _ => EditOperation::Merge,
    };
    let data = load_data(matches.value_of("file").unwrap_or_default())?;

    let mut entity = top_level_entity(matches)?;
    let pairs = decoder::decode_data(&data, entity.schema())
        .map_err(|error| report(error.into()))?;
    codec::decode(&pairs, &mut *entity)
        .map_err(|error| report(error.into()))?;
    service
        .edit(session, &*entity, operation)
        .map_err(report)
}

fn run(
    service: &CrudService,
    session: &mut TcpSession,
    matches: &ArgMatches<'_>,
) -> Result<(), String> {
    match matches.subcommand() {
        ("get", Some(matches)) => read(service, session, matches, true),
        ("get-config", Some(matches)) => {
            read(service, session, matches, matches.is_present("all"))
        }
        ("edit", Some(matches)) => edit(service, session, matches),
        ("delete", Some(matches)) => {
            let mut entity = top_level_entity(matches)?;
            entity.read();
            service.delete(session, &*entity).map_err(report)
        }
        _ => Err("no operation specified".to_owned()),
    }
}

fn report(error: Error) -> String {
    error.log();
    match std::error::Error::source(&error) {
        Some(source) => format!("{error}: {source}"),
        None => error.to_string(),
    }
}

// ===== main =====

fn main() {
    let node = Arg::with_name("node")
        .long("node")
        .value_name("name")
        .help("Top-level node to operate on (defaults to holo-sanity:runner)");
    let format = Arg::with_name("format")
        .long("format")
        .value_name("format")
        .possible_values(&["xml", "json"])
        .default_value("xml")
        .help("Output format");

    // Parse command-line parameters.
    let matches = App::new("Holo NETCONF client")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Specify an alternative configuration file."),
        )
        .arg(
            Arg::with_name("address")
                .short("a")
                .long("address")
                .value_name("address")
                .help("Server address (overrides the configuration file)"),
        )
        .subcommand(
            SubCommand::with_name("get-config")
                .about("Retrieve configuration data")
                .arg(node.clone())
                .arg(format.clone())
                .arg(
                    Arg::with_name("all")
                        .long("all")
                        .help("Include state data"),
                ),
        )
        .subcommand(
            SubCommand::with_name("get")
                .about("Retrieve configuration and state data")
                .arg(node.clone())
                .arg(format),
        )
        .subcommand(
            SubCommand::with_name("edit")
                .about("Apply the data held in an XML file")
                .arg(node.clone())
                .arg(
                    Arg::with_name("operation")
                        .long("operation")
                        .value_name("operation")
                        .possible_values(&[
                            "create", "merge", "replace", "delete", "remove",
                        ])
                        .default_value("merge")
                        .help("Edit operation"),
                )
                .arg(Arg::with_name("file").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .about("Delete all data under the top-level node")
                .arg(node),
        )
        .get_matches();

    // Read configuration file.
    let mut config = match Config::load(matches.value_of("config")) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    if let Some(address) = matches.value_of("address") {
        config.session.address = address.to_owned();
    }

    // Initialize tracing.
    init_tracing(&config.logging);

    // Connect to the server.
    let timeout = Duration::from_secs(config.session.connect_timeout);
    let mut session = match TcpSession::connect(
        &config.session.address,
        config.session.framing,
        timeout,
    ) {
        Ok(session) => session,
        Err(error) => {
            error!(
                address = %config.session.address, %error,
                "failed to connect"
            );
            eprintln!("failed to connect: {error}");
            std::process::exit(1);
        }
    };
    for module in holo_models::MODULES {
        if !session.supports_module(module.namespace) {
            warn!(
                module = %module.name,
                "module not advertised by the server"
            );
        }
    }

    let service = CrudService::new(config.client);
    let result = run(&service, &mut session, &matches);
    if let Err(error) = service.close_session(&mut session) {
        error.log();
    }
    if let Err(error) = result {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
