use crate::device::{CandidateEntry, InterfaceHint};

/// Marker smartctl prints for bus entries it could not open.
pub const FAILURE_MARKER: &str = "failed:";

const DEVICE_PREFIX: &str = "/dev/";
const CSMI_PREFIX: &str = "csmi";

/// Parses `smartctl --scan-open` output into candidate entries.
///
/// Empty lines, comment lines and lines carrying the failure marker are
/// skipped. Output order follows input order.
pub fn parse_scan_output(content: &str) -> Vec<CandidateEntry> {
    let mut entries = Vec::new();

    for line in content.lines() {
        if let Some(entry) = parse_scan_line(line) {
            entries.push(entry);
        }
    }

    entries
}

/// Parses a single scan line, returning `None` for lines that are skipped.
pub fn parse_scan_line(line: &str) -> Option<CandidateEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.contains(FAILURE_MARKER) {
        log::debug!("Skipping scan line: {:?}", line);
        return None;
    }

    let token = line.split_whitespace().next()?;
    let name = token.strip_prefix(DEVICE_PREFIX).unwrap_or(token);

    let interface_hint = if name.starts_with(CSMI_PREFIX) {
        Some(InterfaceHint::Csmi)
    } else {
        None
    };

    Some(CandidateEntry::new(name, interface_hint))
}
