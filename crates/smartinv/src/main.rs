mod cli;

use clap::Parser;
use smartinv_lib::Result;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    cli::init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::List {
            json,
            parallel,
            no_parallel,
            timeout,
        } => {
            let parallel = cli::flag_pair(*parallel, *no_parallel);
            let config = cli::load_config(&cli, *timeout, parallel)?;
            cli::list::handle_list_command(&config, *json, cli.quiet)
        }

        cli::Commands::Scan { json } => {
            let config = cli::load_config(&cli, None, None)?;
            cli::scan::handle_scan_command(&config, *json)
        }

        cli::Commands::Info {
            name,
            hint,
            device_type,
            json,
            timeout,
        } => {
            let config = cli::load_config(&cli, *timeout, None)?;
            cli::info::handle_info_command(&config, name, *hint, device_type.clone(), *json)
        }
    }
}
