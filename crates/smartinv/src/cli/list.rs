use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use indicatif::ProgressBar;
use smartinv_lib::util::{create_spinner, format_bytes, or_dash};
use smartinv_lib::{
    BuildOptions, CandidateEntry, Config, DeviceRecord, DeviceResolver, Interface, Inventory,
    PlatformRescan, Result, SmartctlResolver, SmartctlScanner,
};

/// Ticks a spinner as each device is queried.
struct ProgressResolver<'a, R> {
    inner: R,
    spinner: &'a ProgressBar,
}

impl<R: DeviceResolver> DeviceResolver for ProgressResolver<'_, R> {
    fn resolve(&self, entry: &CandidateEntry) -> Result<DeviceRecord> {
        self.spinner.set_message(format!("Querying {}", entry.name));
        let result = self.inner.resolve(entry);
        self.spinner.inc(1);
        result
    }
}

pub fn handle_list_command(config: &Config, json: bool, quiet: bool) -> Result<()> {
    let spinner = create_spinner("Scanning devices", quiet || json);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let resolver = ProgressResolver {
        inner: SmartctlResolver::new(&config.smartctl_path).with_timeout(config.timeout),
        spinner: &spinner,
    };

    let options = BuildOptions {
        resolve_fully: true,
        parallel: config.parallel,
    };

    let result = Inventory::build_with(
        &options,
        &PlatformRescan,
        &SmartctlScanner::new(&config.smartctl_path),
        &resolver,
    );
    spinner.finish_and_clear();
    let inventory = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(inventory.devices())?);
        return Ok(());
    }

    if inventory.devices().is_empty() {
        println!("{}", style("No storage devices found").yellow());
        return Ok(());
    }

    println!("{}", device_table(inventory.devices()));

    if !quiet {
        println!(
            "{} {} devices ({} scanned)",
            style("✓").green(),
            inventory.devices().len(),
            inventory.simple_list().len()
        );
    }

    Ok(())
}

fn device_table(devices: &[DeviceRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Interface").fg(Color::Cyan),
        Cell::new("Model").fg(Color::Cyan),
        Cell::new("Serial").fg(Color::Cyan),
        Cell::new("Capacity").fg(Color::Cyan),
        Cell::new("Alias").fg(Color::Cyan),
    ]);

    for device in devices {
        let interface = match device.interface {
            Interface::Csmi => Cell::new(device.interface.as_str()).fg(Color::Yellow),
            _ => Cell::new(device.interface.as_str()),
        };

        table.add_row(vec![
            Cell::new(&device.name).fg(Color::White),
            interface,
            Cell::new(or_dash(device.model.as_deref())),
            Cell::new(or_dash(device.serial.as_deref())),
            Cell::new(device.capacity.map(format_bytes).unwrap_or_else(|| "-".to_string())),
            Cell::new(or_dash(device.alias_name.as_deref())),
        ]);
    }

    table
}
