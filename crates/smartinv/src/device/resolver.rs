use crate::device::{CandidateEntry, DeviceRecord, Interface, InterfaceHint};
use crate::error::{Result, SmartinvError};
use crate::util::process::run_command;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

/// Turns a scan entry into a full device record.
///
/// An `Err` drops the candidate from the inventory; it never aborts the build.
pub trait DeviceResolver {
    fn resolve(&self, entry: &CandidateEntry) -> Result<DeviceRecord>;
}

/// smartctl exit status bits that mean no usable identity data was produced:
/// bit 0 is a command line error, bit 1 a failed device open.
const FATAL_EXIT_BITS: i32 = 0b11;

/// Resolves devices with `smartctl --info --json`.
#[derive(Debug, Clone)]
pub struct SmartctlResolver {
    pub smartctl_path: PathBuf,
    pub timeout: Option<Duration>,
    /// Forces `-d <type>` on every query.
    pub device_type: Option<String>,
}

impl Default for SmartctlResolver {
    fn default() -> Self {
        Self {
            smartctl_path: PathBuf::from("smartctl"),
            timeout: None,
            device_type: None,
        }
    }
}

impl SmartctlResolver {
    pub fn new(smartctl_path: impl Into<PathBuf>) -> Self {
        Self {
            smartctl_path: smartctl_path.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_device_type(mut self, device_type: Option<String>) -> Self {
        self.device_type = device_type;
        self
    }
}

impl DeviceResolver for SmartctlResolver {
    fn resolve(&self, entry: &CandidateEntry) -> Result<DeviceRecord> {
        let mut cmd = Command::new(&self.smartctl_path);
        cmd.arg("--info").arg("--json");
        if let Some(device_type) = &self.device_type {
            cmd.arg("-d").arg(device_type);
        }
        cmd.arg(entry.device_path());

        let output = run_command("smartctl", cmd, None, self.timeout)?;

        if output.timed_out {
            return Err(SmartinvError::Timeout {
                device: entry.name.clone(),
                timeout: self.timeout.unwrap_or_default(),
            });
        }

        if output.exit_code < 0 || output.exit_code & FATAL_EXIT_BITS != 0 {
            return Err(SmartinvError::Resolution {
                device: entry.name.clone(),
                message: format!(
                    "smartctl exited with status {}: {}",
                    output.exit_code,
                    output.stderr.trim()
                ),
            });
        }

        parse_info_json(entry, &output.stdout)
    }
}

/// Builds a record from `smartctl --info --json` output.
///
/// A csmi hint always wins over the reported device type.
pub fn parse_info_json(entry: &CandidateEntry, json: &str) -> Result<DeviceRecord> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let interface = match entry.interface_hint {
        Some(InterfaceHint::Csmi) => Interface::Csmi,
        _ => value
            .pointer("/device/type")
            .and_then(|v| v.as_str())
            .or_else(|| value.pointer("/device/protocol").and_then(|v| v.as_str()))
            .map(Interface::from_device_type)
            .ok_or_else(|| SmartinvError::Resolution {
                device: entry.name.clone(),
                message: "smartctl did not report a device type".to_string(),
            })?,
    };

    let mut record = DeviceRecord::new(entry.name.clone(), interface);

    record.serial = non_empty_str(&value, "/serial_number");
    record.model = non_empty_str(&value, "/model_name")
        .or_else(|| non_empty_str(&value, "/scsi_model_name"));
    record.capacity = value
        .pointer("/user_capacity/bytes")
        .and_then(|v| v.as_u64())
        .or_else(|| value.pointer("/nvme_total_capacity").and_then(|v| v.as_u64()))
        .filter(|bytes| *bytes > 0);

    Ok(record)
}

fn non_empty_str(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
