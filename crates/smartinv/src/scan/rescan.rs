use crate::error::{Result, SmartinvError};
use crate::util::process::run_command;
use std::process::Command;

/// Forces the OS to re-enumerate storage busses before a scan.
pub trait BusRescan {
    fn rescan(&self) -> Result<()>;
}

/// Platform default: `diskpart rescan` on Windows, nothing elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformRescan;

impl PlatformRescan {
    /// Whether this platform needs a rescan before devices become visible.
    pub fn is_required() -> bool {
        cfg!(windows)
    }
}

impl BusRescan for PlatformRescan {
    fn rescan(&self) -> Result<()> {
        if !Self::is_required() {
            return Ok(());
        }

        log::info!("Rescanning storage busses with diskpart");

        let output = run_command("diskpart", Command::new("diskpart"), Some("rescan\nexit\n"), None)?;
        if !output.success {
            return Err(SmartinvError::ExternalTool {
                tool: "diskpart".to_string(),
                message: format!("rescan exited with code {}", output.exit_code),
            });
        }

        Ok(())
    }
}

/// Never rescans.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRescan;

impl BusRescan for NoRescan {
    fn rescan(&self) -> Result<()> {
        Ok(())
    }
}
