pub mod resolver;

pub use resolver::{DeviceResolver, SmartctlResolver};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Interface hint attached to a scan entry before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceHint {
    Csmi,
    Unknown,
}

impl InterfaceHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceHint::Csmi => "csmi",
            InterfaceHint::Unknown => "unknown",
        }
    }
}

impl FromStr for InterfaceHint {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "csmi" => Ok(InterfaceHint::Csmi),
            "unknown" => Ok(InterfaceHint::Unknown),
            _ => Err(format!(
                "Invalid interface hint '{}'. Use 'csmi' or 'unknown'",
                value
            )),
        }
    }
}

/// Transport a resolved device was reached through.
///
/// Serialized as its `as_str` name, so `Other` renders as the raw smartctl
/// device type like every other variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Interface {
    Ata,
    Sata,
    Csmi,
    Scsi,
    Nvme,
    Usb,
    Other(String),
}

impl Interface {
    /// Maps a smartctl device type (`-d` value or `device.type`) to an interface.
    pub fn from_device_type(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        let base = value.split(',').next().unwrap_or_default();
        match base {
            "ata" => Interface::Ata,
            "sat" | "sata" => Interface::Sata,
            "csmi" => Interface::Csmi,
            "scsi" | "sas" => Interface::Scsi,
            "nvme" => Interface::Nvme,
            b if b.starts_with("usb") => Interface::Usb,
            _ => Interface::Other(value.clone()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Interface::Ata => "ata",
            Interface::Sata => "sata",
            Interface::Csmi => "csmi",
            Interface::Scsi => "scsi",
            Interface::Nvme => "nvme",
            Interface::Usb => "usb",
            Interface::Other(name) => name,
        }
    }

    /// Rank used when two views of one disk share a serial.
    ///
    /// A higher rank survives reconciliation and absorbs the lower-ranked
    /// record's name as its alias. `None` means the interface never takes
    /// part in serial matching.
    ///
    /// | interface  | rank |
    /// |------------|------|
    /// | csmi       | 2    |
    /// | ata, sata  | 1    |
    /// | others     | -    |
    pub fn dedup_priority(&self) -> Option<u8> {
        match self {
            Interface::Csmi => Some(2),
            Interface::Ata | Interface::Sata => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Interface {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Interface {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Interface::from_device_type(&value))
    }
}

/// One openable device reported by the bus scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub name: String,
    #[serde(rename = "interface")]
    pub interface_hint: Option<InterfaceHint>,
}

impl CandidateEntry {
    pub fn new(name: impl Into<String>, interface_hint: Option<InterfaceHint>) -> Self {
        Self {
            name: name.into(),
            interface_hint,
        }
    }

    pub fn device_path(&self) -> String {
        format!("/dev/{}", self.name)
    }
}

/// A fully resolved device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    pub interface: Interface,
    pub serial: Option<String>,
    /// Capacity in bytes. `None` for removable or optical media.
    pub capacity: Option<u64>,
    /// Name of a duplicate view of this disk dropped during reconciliation.
    pub alias_name: Option<String>,
    pub model: Option<String>,
}

impl DeviceRecord {
    pub fn new(name: impl Into<String>, interface: Interface) -> Self {
        Self {
            name: name.into(),
            interface,
            serial: None,
            capacity: None,
            alias_name: None,
            model: None,
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}
