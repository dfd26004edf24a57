use crate::device::{CandidateEntry, DeviceRecord};

/// Stable lexical sort by device name.
pub fn sort_devices(devices: &mut [DeviceRecord]) {
    devices.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Stable lexical sort by device name.
pub fn sort_candidates(entries: &mut [CandidateEntry]) {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
}
