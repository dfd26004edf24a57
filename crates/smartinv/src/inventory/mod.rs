pub mod order;
pub mod reconcile;

pub use order::{sort_candidates, sort_devices};
pub use reconcile::{reconcile, removal_mask};

use crate::device::{CandidateEntry, DeviceRecord, DeviceResolver, SmartctlResolver};
use crate::error::{Result, SmartinvError};
use crate::scan::{parse_scan_output, BusRescan, DeviceScanner, PlatformRescan, SmartctlScanner};
use serde::Serialize;
use std::fmt;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Resolve every candidate into a `DeviceRecord`. When false only the
    /// simple list is collected.
    pub resolve_fully: bool,
    /// Resolve candidates on one scoped thread each.
    pub parallel: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            resolve_fully: true,
            parallel: false,
        }
    }
}

/// Deduplicated, name-ordered view of the storage devices on this host.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Inventory {
    devices: Vec<DeviceRecord>,
    simple_list: Vec<CandidateEntry>,
}

impl Inventory {
    /// Builds an inventory with the platform rescan and smartctl on `PATH`.
    pub fn build(resolve_fully: bool) -> Result<Self> {
        let options = BuildOptions {
            resolve_fully,
            ..BuildOptions::default()
        };
        Self::build_with(
            &options,
            &PlatformRescan,
            &SmartctlScanner::default(),
            &SmartctlResolver::default(),
        )
    }

    /// Builds an inventory from explicit collaborators.
    ///
    /// Only a scan that cannot be run fails the build. A failed rescan is
    /// logged, and devices that fail to resolve are left out.
    pub fn build_with<R>(
        options: &BuildOptions,
        rescan: &dyn BusRescan,
        scanner: &dyn DeviceScanner,
        resolver: &R,
    ) -> Result<Self>
    where
        R: DeviceResolver + Sync,
    {
        if let Err(e) = rescan.rescan() {
            log::warn!("Bus rescan failed, continuing with current device view: {}", e);
        }

        let scan = scanner.scan()?;
        let mut simple_list = parse_scan_output(&scan.stdout);

        log::info!("Scan found {} candidate devices", simple_list.len());

        let mut devices = if options.resolve_fully {
            let resolved = resolve_all(resolver, &simple_list, options.parallel);
            reconcile(resolved)
        } else {
            Vec::new()
        };

        sort_devices(&mut devices);
        sort_candidates(&mut simple_list);

        Ok(Self {
            devices,
            simple_list,
        })
    }

    pub fn from_parts(mut devices: Vec<DeviceRecord>, mut simple_list: Vec<CandidateEntry>) -> Self {
        sort_devices(&mut devices);
        sort_candidates(&mut simple_list);
        Self {
            devices,
            simple_list,
        }
    }

    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub fn simple_list(&self) -> &[CandidateEntry] {
        &self.simple_list
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.simple_list.is_empty()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<Inventory contents:")?;
        for device in &self.devices {
            write!(f, "{} ({})", device.name, device.interface)?;
            if let Some(alias) = &device.alias_name {
                write!(f, " alias {}", alias)?;
            }
            writeln!(f)?;
        }
        write!(f, ">")
    }
}

/// Resolves every entry, dropping the ones that fail. Output follows
/// entry order regardless of `parallel`.
pub fn resolve_all<R>(resolver: &R, entries: &[CandidateEntry], parallel: bool) -> Vec<DeviceRecord>
where
    R: DeviceResolver + Sync,
{
    let results: Vec<Result<DeviceRecord>> = if parallel {
        thread::scope(|scope| {
            let handles: Vec<_> = entries
                .iter()
                .map(|entry| scope.spawn(move || resolver.resolve(entry)))
                .collect();

            handles
                .into_iter()
                .zip(entries)
                .map(|(handle, entry)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(SmartinvError::Resolution {
                            device: entry.name.clone(),
                            message: "resolver panicked".to_string(),
                        })
                    })
                })
                .collect()
        })
    } else {
        entries.iter().map(|entry| resolver.resolve(entry)).collect()
    };

    entries
        .iter()
        .zip(results)
        .filter_map(|(entry, result)| match result {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Dropping device {}: {}", entry.name, e);
                None
            }
        })
        .collect()
}
