//! Dashboard command implementation
//!
//! Prints the KPI cards, insights and top downtime reasons for the current
//! filters, followed by the filter options available in the date window.

use super::shared::{apply_filters, describe_range, open_session};
use crate::app::services::filter_engine::FilterOptions;
use crate::app::services::render::{KpiCardRenderer, RenderContext, ReportRenderer, format};
use crate::cli::args::{Args, DashboardArgs};
use crate::config::Config;
use crate::Result;
use colored::*;
use tracing::info;

pub async fn run_dashboard(args: &Args, dashboard_args: &DashboardArgs, config: &Config) -> Result<()> {
    let mut session = open_session(args, config, &dashboard_args.input).await?;
    apply_filters(&mut session, &dashboard_args.filters)?;

    let dashboard = session.dashboard()?;
    let payload = &dashboard.payload;
    info!("Dashboard covers {} rows", payload.coverage.rows);

    println!("{}", "Production Dashboard".bright_green().bold());
    println!(
        "Date range: {} | Rows: {}",
        describe_range(dashboard.filters.date_range).bright_white(),
        payload.coverage.rows.to_string().bright_white().bold()
    );
    println!();

    let cards = KpiCardRenderer.render(payload, &RenderContext::now(session.user()))?;
    print!("{}", cards);

    println!("\n{}", "Insights".bright_green().bold());
    for insight in &payload.insights {
        println!("  {} {}", "*".bright_yellow(), insight.message);
    }

    if !payload.top_downtime.is_empty() {
        println!("\n{}", "Top Downtime Reasons".bright_green().bold());
        for row in &payload.top_downtime {
            println!(
                "  {:<24} {} min",
                row.key,
                format::thousands(row.downtime_minutes).bright_white()
            );
        }
    }

    print_options(&dashboard.options);
    Ok(())
}

fn print_options(options: &FilterOptions) {
    println!("\n{}", "Filter Options".bright_green().bold());
    for (label, values) in [
        ("Shifts", &options.shifts),
        ("Products", &options.products),
        ("Operators", &options.operators),
        ("Downtime reasons", &options.downtime_reasons),
    ] {
        if values.is_empty() {
            println!("  {:<18} {}", label, "none".dimmed());
        } else {
            println!("  {:<18} {}", label, values.join(", "));
        }
    }
}
