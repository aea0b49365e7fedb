use anyhow::Context;
use clap::Parser;
use production_reporter::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result.context("Command failed"),
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for CTRL+C")?;
                anyhow::bail!("Interrupted by user")
            }
        }
    })
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Production Reporter - Factory Production KPIs and Reports");
    println!("=========================================================");
    println!();
    println!("Load a production CSV, filter it, and view KPIs, insights and");
    println!("recommendations as dashboard cards, report documents or exports.");
    println!();
    println!("USAGE:");
    println!("    production-reporter [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    dashboard   Show KPI cards, insights and filter options");
    println!("    report      Generate the report (document, json or summary)");
    println!("    export      Export the filtered rows as CSV");
    println!("    edit        Edit one cell and record it in the audit log");
    println!("    audit       Show the audit log, newest first");
    println!();
    println!("OPTIONS:");
    println!("    -r, --role <ROLE>    viewer, analyst or admin (default: viewer)");
    println!("    -u, --user <NAME>    User name for audit records and reports");
    println!("    -c, --config <FILE>  Configuration file (TOML)");
    println!("    -v, --verbose        Increase logging verbosity");
    println!("    -h, --help           Show help information");
    println!();
    println!("EXAMPLES:");
    println!("    # Dashboard for the last week of data:");
    println!("    production-reporter dashboard production.csv");
    println!();
    println!("    # Report document for shift A in March:");
    println!("    production-reporter --role analyst report production.csv \\");
    println!("        --from 2024-03-01 --to 2024-03-31 --shift A -o report.txt");
    println!();
    println!("    # Correct a waste figure:");
    println!("    production-reporter --role analyst --user dana edit production.csv \\");
    println!("        --row 12 --column Waste_Weight_kg --value 4.5");
    println!();
    println!("For detailed help on any command, use:");
    println!("    production-reporter <COMMAND> --help");
}
