//! Type definitions for pdugen

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use pdu_cfgmgr_common::defaults::{DELAY_STEP, DELAY_THRESHOLD};
use pdu_cfgmgr_common::PduCfgError;

/// Power-on stagger accumulator threaded through outlet assignment.
///
/// Every assignment step takes the state by value and returns the next
/// one; nothing resets it between the switch and server passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaggerState {
    /// Delay (seconds) applied to the outlets of the next host
    pub delay: u32,

    /// Outlets assigned so far across both PDU sides
    pub outlet_count: u32,
}

impl StaggerState {
    /// Creates the initial state: no outlets, zero delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `outlets` newly assigned outlets
    pub fn with_outlets(self, outlets: u32) -> Self {
        Self {
            outlet_count: self.outlet_count + outlets,
            ..self
        }
    }

    /// Applies one stagger check: once more than four outlets are assigned
    /// and the count is even, the delay grows by one step
    pub fn stepped(self) -> Self {
        if self.outlet_count > DELAY_THRESHOLD && self.outlet_count % 2 == 0 {
            Self {
                delay: self.delay + DELAY_STEP,
                ..self
            }
        } else {
            self
        }
    }
}

/// Ordered outlet commands plus the stagger state after the last host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutletPlan {
    /// PDU commands, one per line
    pub commands: Vec<String>,

    /// Stagger state after every host has been assigned
    pub stagger: StaggerState,
}

impl OutletPlan {
    /// Final power-on delay value
    pub fn final_delay(&self) -> u32 {
        self.stagger.delay
    }
}

/// Script layout for the device header and footer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptVariant {
    /// Fabric-aware layout: computed gateway, banner, admin user, 2/4/6 PSU
    #[default]
    Fabric,

    /// Single-mode layout: fixed /16 management network, 6 PSU servers
    Legacy,
}

impl ScriptVariant {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScriptVariant::Fabric => "fabric",
            ScriptVariant::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ScriptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptVariant {
    type Err = PduCfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fabric" => Ok(ScriptVariant::Fabric),
            "legacy" => Ok(ScriptVariant::Legacy),
            other => Err(PduCfgError::invalid_config(
                "variant",
                format!("unknown script variant '{}' (expected fabric or legacy)", other),
            )),
        }
    }
}
