//! Report command implementation
//!
//! Renders the report payload for the current filters as a paginated
//! document or JSON. The summary format describes the whole dataset.

use super::shared::{apply_filters, open_session, write_output};
use crate::app::services::render::{DocumentRenderer, JsonRenderer, RenderContext, ReportRenderer};
use crate::cli::args::{Args, ReportArgs, ReportFormat};
use crate::config::Config;
use crate::{Error, Result};
use tracing::{debug, info};

pub async fn run_report(args: &Args, report_args: &ReportArgs, config: &Config) -> Result<()> {
    if report_args.latin1 && report_args.format != ReportFormat::Document {
        return Err(Error::configuration(
            "--latin1 only applies to the document format",
        ));
    }

    let mut session = open_session(args, config, &report_args.input).await?;
    apply_filters(&mut session, &report_args.filters)?;
    let context = RenderContext::now(session.user());

    let bytes = match report_args.format {
        ReportFormat::Document => {
            let payload = session.report()?;
            let renderer = if report_args.latin1 {
                DocumentRenderer::latin1()
            } else {
                DocumentRenderer::new()
            };
            debug!("Rendering with {}", renderer.name());
            renderer.render_bytes(&payload, &context)?
        }
        ReportFormat::Json => {
            let payload = session.report()?;
            let mut text = JsonRenderer.render(&payload, &context)?;
            text.push('\n');
            text.into_bytes()
        }
        ReportFormat::Summary => {
            let mut text = session.assistant_summary()?;
            text.push('\n');
            text.into_bytes()
        }
    };

    info!("Rendered {:?} report ({} bytes)", report_args.format, bytes.len());
    write_output(report_args.output.as_deref(), &bytes).await
}
