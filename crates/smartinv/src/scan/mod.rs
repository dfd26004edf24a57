pub mod invoker;
pub mod parser;
pub mod rescan;

pub use invoker::{DeviceScanner, ScanOutput, SmartctlScanner};
pub use parser::{parse_scan_line, parse_scan_output, FAILURE_MARKER};
pub use rescan::{BusRescan, NoRescan, PlatformRescan};
