use console::style;
use smartinv_lib::scan::parse_scan_line;
use smartinv_lib::util::format_bytes;
use smartinv_lib::{CandidateEntry, Config, DeviceResolver, InterfaceHint, Result, SmartctlResolver};

/// Builds the entry to query; an explicit hint beats the one inferred from the name.
fn candidate_for(name: &str, hint: Option<InterfaceHint>) -> CandidateEntry {
    let mut entry = parse_scan_line(name).unwrap_or_else(|| CandidateEntry::new(name, None));
    if hint.is_some() {
        entry.interface_hint = hint;
    }
    entry
}

pub fn handle_info_command(
    config: &Config,
    name: &str,
    hint: Option<InterfaceHint>,
    device_type: Option<String>,
    json: bool,
) -> Result<()> {
    let entry = candidate_for(name, hint);

    let resolver = SmartctlResolver::new(&config.smartctl_path)
        .with_timeout(config.timeout)
        .with_device_type(device_type);
    let record = resolver.resolve(&entry)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("\n{}", style(format!("Device: {}", record.name)).bold().cyan());
    println!("{}", style("─".repeat(50)).dim());

    println!("  Interface: {}", style(record.interface.as_str()).yellow());
    if let Some(model) = &record.model {
        println!("  Model: {}", model);
    }
    if let Some(serial) = &record.serial {
        println!("  Serial: {}", serial);
    }
    match record.capacity {
        Some(capacity) => println!("  Capacity: {}", format_bytes(capacity)),
        None => println!("  Capacity: {}", style("none (removable media)").dim()),
    }

    println!();
    Ok(())
}
