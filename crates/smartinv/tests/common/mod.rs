#![allow(dead_code)]

use smartinv_lib::{
    BusRescan, CandidateEntry, DeviceRecord, DeviceResolver, DeviceScanner, Interface, Result,
    ScanOutput, SmartinvError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const SCENARIO_SCAN: &str = "/dev/sda -d ata\n\
/dev/csmi0,0 -d csmi\n\
/dev/sr0 -d ata\n\
failed: could not open /dev/sdz\n";

/// Returns canned scan output.
pub struct ScriptedScanner {
    pub output: ScanOutput,
}

impl ScriptedScanner {
    pub fn new(stdout: &str) -> Self {
        Self {
            output: ScanOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: 0,
            },
        }
    }

    pub fn failing_with(stdout: &str, stderr: &str, exit_code: i32) -> Self {
        Self {
            output: ScanOutput {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                exit_code,
            },
        }
    }
}

impl DeviceScanner for ScriptedScanner {
    fn scan(&self) -> Result<ScanOutput> {
        Ok(self.output.clone())
    }
}

/// Behaves like a scanner whose binary cannot be launched.
pub struct UnlaunchableScanner;

impl DeviceScanner for UnlaunchableScanner {
    fn scan(&self) -> Result<ScanOutput> {
        Err(SmartinvError::ExternalTool {
            tool: "smartctl".to_string(),
            message: "No such file or directory".to_string(),
        })
    }
}

/// Resolves from a fixed table; unknown names fail to resolve.
#[derive(Default)]
pub struct MapResolver {
    pub records: HashMap<String, DeviceRecord>,
    pub calls: Mutex<Vec<String>>,
}

impl MapResolver {
    pub fn new(records: Vec<DeviceRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.name.clone(), r)).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl DeviceResolver for MapResolver {
    fn resolve(&self, entry: &CandidateEntry) -> Result<DeviceRecord> {
        self.calls.lock().unwrap().push(entry.name.clone());
        self.records
            .get(&entry.name)
            .cloned()
            .ok_or_else(|| SmartinvError::Resolution {
                device: entry.name.clone(),
                message: "cannot open device".to_string(),
            })
    }
}

#[derive(Default)]
pub struct CountingRescan {
    pub count: AtomicUsize,
    pub fail: bool,
}

impl CountingRescan {
    pub fn failing() -> Self {
        Self {
            count: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl BusRescan for CountingRescan {
    fn rescan(&self) -> Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SmartinvError::ExternalTool {
                tool: "diskpart".to_string(),
                message: "access denied".to_string(),
            });
        }
        Ok(())
    }
}

pub fn disk(
    name: &str,
    interface: Interface,
    serial: Option<&str>,
    capacity: Option<u64>,
) -> DeviceRecord {
    DeviceRecord {
        name: name.to_string(),
        interface,
        serial: serial.map(str::to_string),
        capacity,
        alias_name: None,
        model: None,
    }
}

pub fn scenario_resolver() -> MapResolver {
    MapResolver::new(vec![
        disk("sda", Interface::Ata, Some("S1"), Some(500)),
        disk("csmi0,0", Interface::Csmi, Some("S1"), Some(500)),
        disk("sr0", Interface::Ata, None, None),
    ])
}
