//! Full script assembly: header, outlet commands, footer.

use tracing::{info, instrument};

use pdu_cfgmgr_common::network::calculate_gateway;
use pdu_cfgmgr_common::PduCfgResult;
use pdu_types::Ipv4Netmask;

use crate::config::DeviceConfig;
use crate::inventory::Inventory;
use crate::outlet_mgr::OutletMgr;
use crate::template::{self, NetworkSettings, LEGACY_SUBNET};
use crate::types::{OutletPlan, ScriptVariant};

/// A complete PDU script, rendered only once every part has been built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigScript {
    pub header: Vec<String>,
    pub plan: OutletPlan,
    pub footer: Vec<String>,
}

impl ConfigScript {
    /// Renders the script, one command per line
    pub fn render(&self) -> String {
        let mut out = self
            .header
            .iter()
            .chain(&self.plan.commands)
            .chain(&self.footer)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        out
    }
}

/// Management network settings for the configured variant
pub fn network_settings(config: &DeviceConfig) -> PduCfgResult<NetworkSettings> {
    match config.variant {
        ScriptVariant::Fabric => {
            let subnet = config.fabric.subnet();
            let gateway = calculate_gateway(config.ip, subnet)?;
            Ok(NetworkSettings { gateway, subnet })
        }
        ScriptVariant::Legacy => Ok(NetworkSettings {
            gateway: template::legacy_gateway(config.dc_id),
            subnet: LEGACY_SUBNET.parse::<Ipv4Netmask>()?,
        }),
    }
}

/// Builds the script for one PDU pair
///
/// Any error (bad network parameters, malformed inventory) aborts before
/// anything is rendered.
#[instrument(skip_all, fields(pdu = %config.pdu_name))]
pub fn build_script(config: &DeviceConfig, inventory: &Inventory) -> PduCfgResult<ConfigScript> {
    let network = network_settings(config)?;
    let plan = OutletMgr::new(config.psu_count).plan(inventory)?;

    let header = match config.variant {
        ScriptVariant::Fabric => template::fabric_header(config, &network),
        ScriptVariant::Legacy => template::legacy_header(config, &network),
    };
    let footer = template::footer(config);

    info!(
        gateway = %network.gateway,
        subnet = %network.subnet,
        commands = plan.commands.len(),
        "Built PDU script"
    );
    Ok(ConfigScript {
        header,
        plan,
        footer,
    })
}
