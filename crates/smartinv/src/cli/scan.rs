use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use smartinv_lib::{
    BuildOptions, Config, Inventory, PlatformRescan, Result, SmartctlResolver, SmartctlScanner,
};

pub fn handle_scan_command(config: &Config, json: bool) -> Result<()> {
    let options = BuildOptions {
        resolve_fully: false,
        parallel: false,
    };

    let inventory = Inventory::build_with(
        &options,
        &PlatformRescan,
        &SmartctlScanner::new(&config.smartctl_path),
        &SmartctlResolver::new(&config.smartctl_path),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(inventory.simple_list())?);
        return Ok(());
    }

    if inventory.simple_list().is_empty() {
        println!("{}", style("No devices reported by smartctl --scan-open").yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Interface").fg(Color::Cyan),
    ]);

    for entry in inventory.simple_list() {
        let hint = entry
            .interface_hint
            .map(|h| Cell::new(h.as_str()).fg(Color::Yellow))
            .unwrap_or_else(|| Cell::new("-").fg(Color::DarkGrey));
        table.add_row(vec![Cell::new(&entry.name).fg(Color::White), hint]);
    }

    println!("{}", table);
    Ok(())
}
