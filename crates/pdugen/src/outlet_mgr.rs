//! OutletMgr - Core outlet assignment implementation

use tracing::{debug, info, instrument, warn};

use pdu_cfgmgr_common::command::{self, outlet_block};
use pdu_cfgmgr_common::{PduCfgError, PduCfgResult};
use pdu_types::{PsuCount, Side};

use crate::inventory::Inventory;
use crate::types::{OutletPlan, StaggerState};

/// Outlets used by a switch: one on each PDU side
const SWITCH_OUTLETS: u32 = 2;

/// OutletMgr turns an inventory into PDU outlet commands
///
/// Assignment flow:
/// 1. Switch pass: each switch gets the same outlet number on sides A and B
///    (PSU1 on A, PSU2 on B)
/// 2. Server pass: each server takes `psu_count / 2` outlet numbers and
///    spreads its PSUs across both sides (odd PSUs on A, even on B)
/// 3. Every host step carries the stagger state forward; delays grow once
///    more than four outlets are in use
pub struct OutletMgr {
    /// PSUs installed per server
    psu_count: PsuCount,
}

impl OutletMgr {
    /// Creates a new OutletMgr for servers with `psu_count` PSUs
    pub fn new(psu_count: PsuCount) -> Self {
        Self { psu_count }
    }

    /// Returns the configured PSU count
    pub fn psu_count(&self) -> PsuCount {
        self.psu_count
    }

    /// Emits the commands for one switch and advances the stagger state
    ///
    /// Layout: group, both names, both group memberships, then on-delay and
    /// extended on-delay for A followed by B.
    #[instrument(skip(self))]
    pub fn assign_switch(
        &self,
        host: &str,
        port: &str,
        state: StaggerState,
    ) -> (Vec<String>, StaggerState) {
        let mut commands = vec![command::create_group(host)];
        commands.extend(paired_outlet(host, port, state.delay));

        let next = state.with_outlets(SWITCH_OUTLETS).stepped();
        debug!(
            delay = state.delay,
            outlet_count = next.outlet_count,
            "Assigned switch"
        );
        (commands, next)
    }

    /// Emits the commands for one server and advances the stagger state
    ///
    /// `ports` must hold exactly `psu_count / 2` outlet numbers. All outlets
    /// of the server share the delay in effect when the server starts; the
    /// stagger check runs once after the whole server is assigned.
    #[instrument(skip(self))]
    pub fn assign_server(
        &self,
        host: &str,
        ports: &[String],
        state: StaggerState,
    ) -> PduCfgResult<(Vec<String>, StaggerState)> {
        let needed = self.psu_count.ports_per_server();
        if ports.len() < needed {
            return Err(PduCfgError::ports_exhausted(host, needed, ports.len()));
        }
        let ports = &ports[..needed];

        let mut commands = vec![command::create_group(host)];
        let delay = state.delay;

        match self.psu_count {
            PsuCount::Two => {
                commands.extend(paired_outlet(host, &ports[0], delay));
            }
            PsuCount::Four => {
                // All of side A first, then side B over the same ports
                for side in [Side::A, Side::B] {
                    for (pair, port) in (0u8..).zip(ports) {
                        commands.extend(outlet_block(
                            side,
                            port,
                            host,
                            side.psu_number(pair),
                            delay,
                        ));
                    }
                }
            }
            PsuCount::Six => {
                // A and B interleaved per port
                for (pair, port) in (0u8..).zip(ports) {
                    for side in [Side::A, Side::B] {
                        commands.extend(outlet_block(
                            side,
                            port,
                            host,
                            side.psu_number(pair),
                            delay,
                        ));
                    }
                }
            }
        }

        let next = state
            .with_outlets(self.psu_count.outlets_per_server())
            .stepped();
        debug!(
            delay,
            outlet_count = next.outlet_count,
            ports = ?ports,
            "Assigned server"
        );
        Ok((commands, next))
    }

    /// Assigns every host of the inventory in order
    ///
    /// Hostnames and ports are validated up front, and any shortage of ports
    /// aborts the whole plan so that no partial script is produced.
    #[instrument(skip(self, inventory))]
    pub fn plan(&self, inventory: &Inventory) -> PduCfgResult<OutletPlan> {
        validate_inventory(inventory)?;

        if inventory.switch_hosts.len() != inventory.switch_ports.len() {
            return Err(PduCfgError::section_mismatch(
                "switches",
                inventory.switch_hosts.len(),
                inventory.switch_ports.len(),
            ));
        }

        let (commands, stagger) = inventory
            .switch_hosts
            .iter()
            .zip(&inventory.switch_ports)
            .fold(
                (Vec::new(), StaggerState::new()),
                |(mut commands, state), (host, port)| {
                    let (emitted, next) = self.assign_switch(host, port, state);
                    commands.extend(emitted);
                    (commands, next)
                },
            );

        let mut chunks = inventory
            .server_ports
            .chunks(self.psu_count.ports_per_server());
        let (commands, stagger) = inventory.server_hosts.iter().try_fold(
            (commands, stagger),
            |(mut commands, state), host| {
                let ports = chunks.next().unwrap_or_default();
                let (emitted, next) = self.assign_server(host, ports, state)?;
                commands.extend(emitted);
                Ok::<_, PduCfgError>((commands, next))
            },
        )?;

        let unused: usize = chunks.map(<[String]>::len).sum();
        if unused > 0 {
            warn!(unused, "Server ports left over after assigning every server");
        }

        info!(
            switches = inventory.switch_hosts.len(),
            servers = inventory.server_hosts.len(),
            psu_count = %self.psu_count,
            commands = commands.len(),
            final_delay = stagger.delay,
            "Outlet plan complete"
        );
        Ok(OutletPlan { commands, stagger })
    }
}

/// Name, group and delay commands for a host using one outlet number on
/// both sides (PSU1 on A, PSU2 on B).
fn paired_outlet(host: &str, port: &str, delay: u32) -> Vec<String> {
    let mut commands = Vec::with_capacity(8);
    commands.push(command::outlet_name(Side::A, port, host, Side::A.psu_number(0)));
    commands.push(command::outlet_name(Side::B, port, host, Side::B.psu_number(0)));
    commands.push(command::outlet_to_group(Side::A, port, host));
    commands.push(command::outlet_to_group(Side::B, port, host));
    commands.extend(command::outlet_delays(Side::A, port, delay));
    commands.extend(command::outlet_delays(Side::B, port, delay));
    commands
}

fn validate_inventory(inventory: &Inventory) -> PduCfgResult<()> {
    for host in inventory
        .switch_hosts
        .iter()
        .chain(&inventory.server_hosts)
    {
        command::validate_hostname(host)?;
    }
    for port in inventory
        .switch_ports
        .iter()
        .chain(&inventory.server_ports)
    {
        command::validate_port(port)?;
    }
    Ok(())
}
