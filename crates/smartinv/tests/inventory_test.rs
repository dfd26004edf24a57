mod common;

use common::*;
use smartinv_lib::{
    parse_scan_output, BuildOptions, Interface, InterfaceHint, Inventory, NoRescan, SmartinvError,
};

fn full() -> BuildOptions {
    BuildOptions::default()
}

fn names(inventory: &Inventory) -> Vec<&str> {
    inventory.devices().iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn test_scenario_end_to_end() {
    let inventory = Inventory::build_with(
        &full(),
        &NoRescan,
        &ScriptedScanner::new(SCENARIO_SCAN),
        &scenario_resolver(),
    )
    .unwrap();

    assert_eq!(inventory.devices().len(), 1);
    let device = &inventory.devices()[0];
    assert_eq!(device.name, "csmi0,0");
    assert_eq!(device.interface, Interface::Csmi);
    assert_eq!(device.alias_name.as_deref(), Some("sda"));

    let simple: Vec<&str> = inventory.simple_list().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(simple, vec!["csmi0,0", "sda", "sr0"]);
    assert_eq!(inventory.simple_list()[0].interface_hint, Some(InterfaceHint::Csmi));
}

#[test]
fn test_parse_failed_line_and_well_formed_line() {
    let entries = parse_scan_output("/dev/sdb -d sat # failed: timeout\n\n/dev/sda -d ata\n");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "sda");
    assert_eq!(entries[0].interface_hint, None);
}

#[test]
fn test_simple_list_only_makes_no_resolver_calls() {
    let resolver = scenario_resolver();
    let options = BuildOptions {
        resolve_fully: false,
        parallel: false,
    };

    let inventory = Inventory::build_with(
        &options,
        &NoRescan,
        &ScriptedScanner::new(SCENARIO_SCAN),
        &resolver,
    )
    .unwrap();

    assert!(inventory.devices().is_empty());
    assert_eq!(inventory.simple_list().len(), 3);
    assert_eq!(resolver.call_count(), 0);
}

#[test]
fn test_unresolvable_device_dropped() {
    let scan = "/dev/sda -d sat\n/dev/sdb -d sat\n/dev/sdc -d sat\n";
    let resolver = MapResolver::new(vec![
        disk("sda", Interface::Sata, Some("A"), Some(100)),
        disk("sdc", Interface::Sata, Some("C"), Some(300)),
    ]);

    let inventory =
        Inventory::build_with(&full(), &NoRescan, &ScriptedScanner::new(scan), &resolver).unwrap();

    assert_eq!(names(&inventory), vec!["sda", "sdc"]);
    assert_eq!(inventory.simple_list().len(), 3);
    assert_eq!(resolver.call_count(), 3);
}

#[test]
fn test_unlaunchable_scanner_is_hard_error() {
    let err = Inventory::build_with(&full(), &NoRescan, &UnlaunchableScanner, &scenario_resolver())
        .unwrap_err();
    assert!(matches!(err, SmartinvError::ExternalTool { .. }));
}

#[test]
fn test_failed_scan_gives_empty_inventory() {
    let scanner = ScriptedScanner::failing_with("", "smartctl: permission denied", 2);
    let inventory =
        Inventory::build_with(&full(), &NoRescan, &scanner, &scenario_resolver()).unwrap();

    assert!(inventory.is_empty());
}

#[test]
fn test_rescan_runs_once_and_failure_is_not_fatal() {
    let rescan = CountingRescan::failing();
    let inventory = Inventory::build_with(
        &full(),
        &rescan,
        &ScriptedScanner::new(SCENARIO_SCAN),
        &scenario_resolver(),
    )
    .unwrap();

    assert_eq!(rescan.count(), 1);
    assert_eq!(inventory.devices().len(), 1);
}

#[test]
fn test_parallel_matches_sequential() {
    let scan = "/dev/sdd -d sat\n/dev/csmi0,1 -d csmi\n/dev/nvme0 -d nvme\n/dev/sdb -d sat\n\
/dev/csmi0,0 -d csmi\n/dev/sda -d ata\n/dev/sr0 -d scsi\n";
    let records = vec![
        disk("sda", Interface::Ata, Some("S1"), Some(500)),
        disk("sdb", Interface::Sata, Some("S2"), Some(1000)),
        disk("sdd", Interface::Sata, Some("S4"), Some(2000)),
        disk("csmi0,0", Interface::Csmi, Some("S1"), Some(500)),
        disk("csmi0,1", Interface::Csmi, Some("S2"), Some(1000)),
        disk("nvme0", Interface::Nvme, Some("N1"), Some(4000)),
        disk("sr0", Interface::Scsi, None, None),
    ];

    let sequential = Inventory::build_with(
        &full(),
        &NoRescan,
        &ScriptedScanner::new(scan),
        &MapResolver::new(records.clone()),
    )
    .unwrap();

    let parallel = Inventory::build_with(
        &BuildOptions {
            resolve_fully: true,
            parallel: true,
        },
        &NoRescan,
        &ScriptedScanner::new(scan),
        &MapResolver::new(records),
    )
    .unwrap();

    assert_eq!(sequential.devices(), parallel.devices());
    assert_eq!(names(&parallel), vec!["csmi0,0", "csmi0,1", "nvme0", "sdd"]);
    assert_eq!(parallel.devices()[0].alias_name.as_deref(), Some("sda"));
    assert_eq!(parallel.devices()[1].alias_name.as_deref(), Some("sdb"));
}

#[test]
fn test_inventory_json_shape() {
    let inventory = Inventory::build_with(
        &full(),
        &NoRescan,
        &ScriptedScanner::new(SCENARIO_SCAN),
        &scenario_resolver(),
    )
    .unwrap();

    let value = serde_json::to_value(&inventory).unwrap();
    assert_eq!(value["devices"][0]["name"], "csmi0,0");
    assert_eq!(value["devices"][0]["interface"], "csmi");
    assert_eq!(value["devices"][0]["alias_name"], "sda");
    assert_eq!(value["simple_list"][1]["interface"], serde_json::Value::Null);
}
