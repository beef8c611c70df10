//! Device configuration layering.
//!
//! Parameters come from, in increasing priority: a YAML device file,
//! command line flags, and interactive prompts for whatever is still
//! missing.
//!
//! ```yaml
//! pdu_name: pdu-r12a
//! ip: 10.14.3.20
//! dc_abbr: fra1
//! dc_id: 14
//! fabric: v3
//! psu_count: 4
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

use pdu_cfgmgr_common::command::validate_hostname;
use pdu_cfgmgr_common::defaults::SYSLOG_DOMAIN;
use pdu_cfgmgr_common::{PduCfgError, PduCfgResult};
use pdu_types::{FabricVersion, Ipv4Address, PsuCount};

use crate::prompt::Prompter;
use crate::types::ScriptVariant;

/// Fully resolved parameters of one PDU pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceConfig {
    /// PDU name, also used as SNMP sysname
    pub pdu_name: String,

    /// Management address of the PDU
    pub ip: Ipv4Address,

    /// Datacenter abbreviation (location and syslog host)
    pub dc_abbr: String,

    /// Datacenter ID, second octet of the datacenter's 10.x networks
    pub dc_id: u8,

    /// Fabric version (ignored by the legacy variant)
    pub fabric: FabricVersion,

    /// PSUs per server
    pub psu_count: PsuCount,

    /// Header/footer layout
    pub variant: ScriptVariant,

    /// Domain of the syslog host
    pub syslog_domain: String,
}

/// Device parameters that may still be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialDeviceConfig {
    pub pdu_name: Option<String>,
    pub ip: Option<Ipv4Address>,
    pub dc_abbr: Option<String>,
    pub dc_id: Option<u8>,
    pub fabric: Option<FabricVersion>,
    pub psu_count: Option<PsuCount>,
    pub variant: Option<ScriptVariant>,
    pub syslog_domain: Option<String>,
}

impl PartialDeviceConfig {
    /// Parses a YAML device file
    pub fn from_yaml_str(yaml: &str) -> PduCfgResult<Self> {
        // An empty document deserializes to unit, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| PduCfgError::invalid_config("config file", e.to_string()))
    }

    /// Reads and parses a YAML device file
    #[instrument]
    pub fn load(path: &Path) -> PduCfgResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| PduCfgError::input_file(path, e))?;
        let config = Self::from_yaml_str(&text)?;
        debug!(?config, "Loaded device file");
        Ok(config)
    }

    /// Overlays `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: PartialDeviceConfig) -> Self {
        Self {
            pdu_name: overrides.pdu_name.or(self.pdu_name),
            ip: overrides.ip.or(self.ip),
            dc_abbr: overrides.dc_abbr.or(self.dc_abbr),
            dc_id: overrides.dc_id.or(self.dc_id),
            fabric: overrides.fabric.or(self.fabric),
            psu_count: overrides.psu_count.or(self.psu_count),
            variant: overrides.variant.or(self.variant),
            syslog_domain: overrides.syslog_domain.or(self.syslog_domain),
        }
    }

    /// Fills every missing field by prompting, then validates the result
    ///
    /// The legacy variant always uses 6 PSU servers and no fabric choice,
    /// so neither is asked for.
    pub fn resolve<R: BufRead, W: Write>(
        self,
        prompter: &mut Prompter<R, W>,
    ) -> PduCfgResult<DeviceConfig> {
        let variant = self.variant.unwrap_or_default();

        let pdu_name = match self.pdu_name {
            Some(name) => check_token("PDU name", name)?,
            None => prompter.ask_until("Enter PDU name", |s| check_token("PDU name", s))?,
        };
        let ip = match self.ip {
            Some(ip) => ip,
            None => prompter.ask_until("Enter PDU IP", |s| Ok(s.parse::<Ipv4Address>()?))?,
        };
        let dc_abbr = match self.dc_abbr {
            Some(abbr) => check_token("DC abbreviation", abbr)?,
            None => prompter.ask_until("Enter DC abbreviation", |s| {
                check_token("DC abbreviation", s)
            })?,
        };
        let dc_id = match self.dc_id {
            Some(id) => id,
            None => prompter.ask_until("Enter DC ID", parse_dc_id)?,
        };

        let (fabric, psu_count) = match variant {
            ScriptVariant::Legacy => {
                if let Some(psu) = self.psu_count.filter(|p| *p != PsuCount::Six) {
                    return Err(PduCfgError::invalid_config(
                        "psu_count",
                        format!("legacy variant supports 6 PSU servers only, got {}", psu),
                    ));
                }
                (self.fabric.unwrap_or(FabricVersion::V2), PsuCount::Six)
            }
            ScriptVariant::Fabric => {
                let fabric = match self.fabric {
                    Some(fabric) => fabric,
                    None => {
                        let fabric = prompter
                            .ask_until("Enter fabric version (v2/v3)", |s| {
                                Ok(s.parse::<FabricVersion>()?)
                            })?;
                        prompter.say(&format!(
                            "✅ Selected Fabric Version: {} | Subnet: {}",
                            fabric.as_str().to_uppercase(),
                            fabric.subnet()
                        ))?;
                        fabric
                    }
                };
                let psu_count = match self.psu_count {
                    Some(psu) => psu,
                    None => prompter.ask_until("Enter number of PSUs per server (2/4/6)", |s| {
                        Ok(s.parse::<PsuCount>()?)
                    })?,
                };
                (fabric, psu_count)
            }
        };

        let syslog_domain = self
            .syslog_domain
            .unwrap_or_else(|| SYSLOG_DOMAIN.to_string());

        let config = DeviceConfig {
            pdu_name,
            ip,
            dc_abbr,
            dc_id,
            fabric,
            psu_count,
            variant,
            syslog_domain,
        };
        info!(
            pdu = %config.pdu_name,
            ip = %config.ip,
            dc = %config.dc_abbr,
            variant = %config.variant,
            fabric = %config.fabric,
            psu_count = %config.psu_count,
            "Resolved device configuration"
        );
        Ok(config)
    }
}

/// Names end up as bare CLI arguments, so they must be single tokens
fn check_token(field: &str, value: impl AsRef<str>) -> PduCfgResult<String> {
    let value = value.as_ref().trim();
    validate_hostname(value).map_err(|e| PduCfgError::invalid_config(field, e.to_string()))?;
    Ok(value.to_string())
}

fn parse_dc_id(answer: &str) -> PduCfgResult<u8> {
    answer.parse().map_err(|_| {
        PduCfgError::invalid_config(
            "DC ID",
            format!("'{}' is not a number between 0 and 255", answer),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn complete() -> PartialDeviceConfig {
        PartialDeviceConfig {
            pdu_name: Some("pdu-r12a".to_string()),
            ip: Some("10.14.3.20".parse().unwrap()),
            dc_abbr: Some("fra1".to_string()),
            dc_id: Some(14),
            fabric: Some(FabricVersion::V3),
            psu_count: Some(PsuCount::Four),
            variant: None,
            syslog_domain: None,
        }
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = "pdu_name: pdu-r12a\nip: 10.14.3.20\ndc_id: 14\nfabric: v3\npsu_count: 4\nvariant: fabric\n";
        let partial = PartialDeviceConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(partial.pdu_name.as_deref(), Some("pdu-r12a"));
        assert_eq!(partial.ip, Some("10.14.3.20".parse().unwrap()));
        assert_eq!(partial.dc_id, Some(14));
        assert_eq!(partial.fabric, Some(FabricVersion::V3));
        assert_eq!(partial.psu_count, Some(PsuCount::Four));
        assert_eq!(partial.variant, Some(ScriptVariant::Fabric));
        assert_eq!(partial.dc_abbr, None);
    }

    #[test]
    fn test_from_yaml_str_rejects_bad_values() {
        assert!(PartialDeviceConfig::from_yaml_str("psu_count: 3\n").is_err());
        assert!(PartialDeviceConfig::from_yaml_str("fabric: v9\n").is_err());
        assert!(PartialDeviceConfig::from_yaml_str("ip: 10.0.0\n").is_err());
        assert!(PartialDeviceConfig::from_yaml_str("colour: blue\n").is_err());
    }

    #[test]
    fn test_from_yaml_str_empty() {
        assert_eq!(
            PartialDeviceConfig::from_yaml_str("  \n").unwrap(),
            PartialDeviceConfig::default()
        );
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = complete();
        let overrides = PartialDeviceConfig {
            dc_id: Some(20),
            psu_count: Some(PsuCount::Two),
            ..Default::default()
        };
        let merged = base.merge(overrides);
        assert_eq!(merged.dc_id, Some(20));
        assert_eq!(merged.psu_count, Some(PsuCount::Two));
        assert_eq!(merged.pdu_name.as_deref(), Some("pdu-r12a"));
    }

    #[test]
    fn test_resolve_without_prompts() {
        let mut p = prompter("");
        let config = complete().resolve(&mut p).unwrap();
        assert_eq!(config.pdu_name, "pdu-r12a");
        assert_eq!(config.variant, ScriptVariant::Fabric);
        assert_eq!(config.syslog_domain, "linode.com");
        let (_, transcript) = p.into_inner();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_resolve_prompts_for_missing_fields() {
        let mut p = prompter("pdu-r1b\n10.7.0.9\nams2\nseven\n7\nv4\nV2\n6\n");
        let config = PartialDeviceConfig::default().resolve(&mut p).unwrap();

        assert_eq!(config.pdu_name, "pdu-r1b");
        assert_eq!(config.ip.to_string(), "10.7.0.9");
        assert_eq!(config.dc_abbr, "ams2");
        assert_eq!(config.dc_id, 7);
        assert_eq!(config.fabric, FabricVersion::V2);
        assert_eq!(config.psu_count, PsuCount::Six);

        let transcript = String::from_utf8(p.into_inner().1).unwrap();
        assert!(transcript.contains("✅ Selected Fabric Version: V2 | Subnet: 255.255.0.0"));
        assert_eq!(transcript.matches("❌").count(), 2);
    }

    #[test]
    fn test_resolve_legacy_skips_fabric_and_psu() {
        let partial = PartialDeviceConfig {
            variant: Some(ScriptVariant::Legacy),
            fabric: None,
            psu_count: None,
            ..complete()
        };
        let mut p = prompter("");
        let config = partial.resolve(&mut p).unwrap();
        assert_eq!(config.psu_count, PsuCount::Six);
        assert_eq!(config.variant, ScriptVariant::Legacy);
    }

    #[test]
    fn test_resolve_legacy_rejects_other_psu_counts() {
        let partial = PartialDeviceConfig {
            variant: Some(ScriptVariant::Legacy),
            psu_count: Some(PsuCount::Two),
            ..complete()
        };
        let err = partial.resolve(&mut prompter("")).unwrap_err();
        assert!(matches!(err, PduCfgError::InvalidConfig { .. }));
    }

    #[test]
    fn test_resolve_rejects_bad_name_from_file() {
        let partial = PartialDeviceConfig {
            pdu_name: Some("pdu r12a".to_string()),
            ..complete()
        };
        assert!(partial.resolve(&mut prompter("")).is_err());
    }
}
