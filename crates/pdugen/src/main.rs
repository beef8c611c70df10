//! pdugen - PDU Outlet Configuration Generator
//!
//! Reads the rack inventory, collects the device parameters and prints the
//! PDU command script on stdout.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use pdu_cfgmgr_common::defaults;
use pdu_gen::logging::init_logging;
use pdu_gen::{build_script, Inventory, PartialDeviceConfig, Prompter, ScriptVariant};
use pdu_types::{FabricVersion, Ipv4Address, PsuCount};

/// PDU outlet configuration script generator
#[derive(Parser, Debug)]
#[command(name = "pdugen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Hostname file: switches, a blank line, then servers
    #[arg(long, default_value = defaults::HOSTNAME_FILE)]
    hostnames: PathBuf,

    /// Port file laid out like the hostname file
    #[arg(long, default_value = defaults::PORT_FILE)]
    ports: PathBuf,

    /// YAML file with device parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// PDU name
    #[arg(short, long)]
    name: Option<String>,

    /// PDU management IP
    #[arg(long)]
    ip: Option<Ipv4Address>,

    /// Datacenter abbreviation
    #[arg(long)]
    dc_abbr: Option<String>,

    /// Datacenter ID
    #[arg(long)]
    dc_id: Option<u8>,

    /// Fabric version (v2/v3)
    #[arg(short, long)]
    fabric: Option<FabricVersion>,

    /// PSUs per server (2/4/6)
    #[arg(short, long)]
    psu_count: Option<PsuCount>,

    /// Script layout (fabric/legacy)
    #[arg(long)]
    variant: Option<ScriptVariant>,

    /// Domain of the syslog host
    #[arg(long)]
    syslog_domain: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> PartialDeviceConfig {
        PartialDeviceConfig {
            pdu_name: self.name.clone(),
            ip: self.ip,
            dc_abbr: self.dc_abbr.clone(),
            dc_id: self.dc_id,
            fabric: self.fabric,
            psu_count: self.psu_count,
            variant: self.variant,
            syslog_domain: self.syslog_domain.clone(),
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let inventory = Inventory::load(&args.hostnames, &args.ports)
        .context("Failed to load inventory")?;
    if inventory.is_empty() {
        anyhow::bail!(
            "No hosts found in {}; nothing to configure",
            args.hostnames.display()
        );
    }

    let file_config = match &args.config {
        Some(path) => PartialDeviceConfig::load(path)
            .with_context(|| format!("Failed to load device file {}", path.display()))?,
        None => PartialDeviceConfig::default(),
    };

    let mut prompter = Prompter::stdio();
    let config = file_config
        .merge(args.overrides())
        .resolve(&mut prompter)
        .context("Failed to resolve device parameters")?;

    let script = build_script(&config, &inventory).context("Failed to build PDU script")?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(script.render().as_bytes())
        .context("Failed to write script")?;
    stdout.flush().context("Failed to write script")?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("Starting pdugen");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("pdugen failed: {:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
