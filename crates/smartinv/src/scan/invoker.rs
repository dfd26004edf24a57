use crate::error::Result;
use crate::util::process::run_command;
use std::path::PathBuf;
use std::process::Command;

/// Raw result of a bus scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ScanOutput {
    pub fn is_clean(&self) -> bool {
        self.exit_code == 0 && self.stderr.trim().is_empty()
    }
}

/// Enumerates openable storage devices.
pub trait DeviceScanner {
    /// Fails only when the scan could not be run at all.
    fn scan(&self) -> Result<ScanOutput>;
}

/// Runs `smartctl --scan-open`.
#[derive(Debug, Clone)]
pub struct SmartctlScanner {
    pub smartctl_path: PathBuf,
}

impl Default for SmartctlScanner {
    fn default() -> Self {
        Self::new("smartctl")
    }
}

impl SmartctlScanner {
    pub fn new(smartctl_path: impl Into<PathBuf>) -> Self {
        Self {
            smartctl_path: smartctl_path.into(),
        }
    }
}

impl DeviceScanner for SmartctlScanner {
    fn scan(&self) -> Result<ScanOutput> {
        let mut cmd = Command::new(&self.smartctl_path);
        cmd.arg("--scan-open");

        log::info!("Scanning devices with {}", self.smartctl_path.display());

        let output = run_command("smartctl", cmd, None, None)?;

        let scan = ScanOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
        };

        if !scan.is_clean() {
            log::warn!(
                "smartctl --scan-open exited with code {}: {}",
                scan.exit_code,
                scan.stderr.trim()
            );
        }

        Ok(scan)
    }
}
