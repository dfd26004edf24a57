pub mod config;
pub mod device;
pub mod error;
pub mod inventory;
pub mod scan;
pub mod util;

pub use config::{Config, FileConfig, Overrides};
pub use device::{
    CandidateEntry, DeviceRecord, DeviceResolver, Interface, InterfaceHint, SmartctlResolver,
};
pub use error::{Result, SmartinvError};
pub use inventory::{reconcile, resolve_all, sort_candidates, sort_devices, BuildOptions, Inventory};
pub use scan::{
    parse_scan_output, BusRescan, DeviceScanner, NoRescan, PlatformRescan, ScanOutput,
    SmartctlScanner,
};
