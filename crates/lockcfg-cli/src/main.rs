// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! lockcfg CLI
//!
//! Terminal front end for per-door lock settings. Every command seeds the
//! local store from the remote endpoint first if nothing is stored yet.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod render;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use lockcfg_config_fs::FsSettingsBackend;
use lockcfg_core::{
    validate, validate_choice, Door, EditSession, EditState, LockConfigService, Parameter,
    ParameterShape, SettingsBackend,
};
use lockcfg_remote::{HttpConfigSource, DEFAULT_ENDPOINT};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "View and edit lock settings for both doors")]
struct Args {
    /// Remote endpoint serving the initial lock configuration
    #[arg(long, global = true, env = "LOCKCFG_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Directory holding the per-door settings files (defaults to the platform config dir)
    #[arg(long, global = true, env = "LOCKCFG_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the remote configuration unless settings are already stored
    Seed,
    /// List all parameters for both doors
    Show {
        /// Only show this door
        #[arg(long)]
        door: Option<Door>,
        /// Only show parameters whose name or value contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print one parameter with its choices or range
    Get {
        /// Parameter name (e.g. lockAngle)
        parameter: String,
        /// Door to read
        #[arg(long, default_value = "primary")]
        door: Door,
    },
    /// Validate and store a new value
    Set {
        /// Parameter name (e.g. lockAngle)
        parameter: String,
        /// New value
        value: String,
        /// Door to write (common parameters are written to both)
        #[arg(long, default_value = "primary")]
        door: Door,
    },
    /// Check a value without storing it
    Validate {
        /// Parameter name (e.g. lockAngle)
        parameter: String,
        /// Candidate value
        value: String,
        /// Door whose choices or range apply
        #[arg(long, default_value = "primary")]
        door: Door,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let backend = match &args.config_dir {
        Some(dir) => FsSettingsBackend::at(dir),
        None => FsSettingsBackend::new(),
    }
    .context("open settings directory")?;
    debug!(dir = %backend.base().display(), "using settings directory");
    let source = HttpConfigSource::new(args.endpoint.clone()).context("build http client")?;
    let service = LockConfigService::new(backend, source);

    service
        .ensure_seeded()
        .await
        .with_context(|| format!("seed lock settings from {}", args.endpoint))?;

    match args.cmd {
        Command::Seed => println!("lock settings ready"),
        Command::Show { door, filter } => show(&service, door, filter.as_deref())?,
        Command::Get { parameter, door } => get(&service, resolve(&parameter)?, door),
        Command::Set {
            parameter,
            value,
            door,
        } => set(&service, resolve(&parameter)?, &value, door)?,
        Command::Validate {
            parameter,
            value,
            door,
        } => check(&service, resolve(&parameter)?, &value, door)?,
    }

    Ok(())
}

fn resolve(name: &str) -> Result<Parameter> {
    Parameter::from_name(name).ok_or_else(|| {
        let known: Vec<_> = Parameter::ALL.iter().map(|p| p.name()).collect();
        anyhow!("unknown parameter {name:?} (known: {})", known.join(", "))
    })
}

fn show<B, R>(
    service: &LockConfigService<B, R>,
    door: Option<Door>,
    filter: Option<&str>,
) -> Result<()>
where
    B: SettingsBackend,
{
    let doors = door.map_or_else(|| Door::ALL.to_vec(), |d| vec![d]);
    let mut columns = Vec::with_capacity(doors.len());
    for door in &doors {
        columns.push(service.parameters(*door).context("read lock settings")?);
    }
    match render::parameter_table(&doors, &columns, filter) {
        Some(table) => println!("{table}"),
        None => println!("no parameters match"),
    }
    Ok(())
}

fn get<B, R>(service: &LockConfigService<B, R>, parameter: Parameter, door: Door)
where
    B: SettingsBackend,
{
    let name = parameter.name();
    println!(
        "{}",
        render::parameter_detail(
            parameter,
            door,
            &service.get_default_value(name, door),
            service.get_values(name, door).as_deref(),
            service.get_range(name, door),
            service.is_common(name),
        )
    );
}

fn set<B, R>(
    service: &LockConfigService<B, R>,
    parameter: Parameter,
    value: &str,
    door: Door,
) -> Result<()>
where
    B: SettingsBackend,
{
    let mut session = EditSession::open(service, parameter, door);
    session.begin()?;
    let state = session.submit(service, value)?.clone();
    match state {
        EditState::Saved => {
            let stored = service.get_default_value(parameter.name(), door);
            if session.is_common() {
                println!("{parameter} = {stored} (both doors)");
            } else {
                println!("{parameter} = {stored} ({door})");
            }
            Ok(())
        }
        EditState::Editing { error: Some(error) } => bail!("{parameter} on {door}: {error}"),
        state => bail!("{parameter} on {door}: edit ended in unexpected state {state:?}"),
    }
}

fn check<B, R>(
    service: &LockConfigService<B, R>,
    parameter: Parameter,
    value: &str,
    door: Door,
) -> Result<()>
where
    B: SettingsBackend,
{
    let name = parameter.name();
    let failure = match parameter.shape() {
        ParameterShape::Enumerated => service
            .get_values(name, door)
            .map(|values| validate_choice(value, &values)),
        ParameterShape::Ranged { .. } => service
            .get_range(name, door)
            .map(|range| validate(value, range)),
    }
    .ok_or_else(|| anyhow!("{door} door has no stored settings"))?;
    match failure {
        None => {
            println!("ok");
            Ok(())
        }
        Some(error) => bail!("{parameter} on {door}: {error}"),
    }
}
