use console::style;

use crate::backend::{Backend, HttpBackend, ReportFormat};
use crate::cli::commands::ReportArgs;
use crate::workflow::renderer;
use crate::workflow::report_view::{load_report, ReportView};
use crate::errors::ConsoleError;

pub async fn handle_report(args: ReportArgs, backend_url: &str) -> Result<(), ConsoleError> {
    let backend = HttpBackend::new(backend_url);

    let view = load_report(&backend, &args.session_id).await?;
    match view {
        ReportView::Ready(ref doc) if args.json => {
            println!("{}", serde_json::to_string_pretty(doc)?);
        }
        ReportView::Ready(_) => {
            let links: Vec<(String, String)> =
                [ReportFormat::Html, ReportFormat::Pdf, ReportFormat::Json]
                    .iter()
                    .map(|f| {
                        (
                            f.as_str().to_string(),
                            backend.report_url(&args.session_id, *f),
                        )
                    })
                    .collect();
            println!("{}", renderer::render_report(&view, &links));
        }
        ReportView::NotReady => {
            // Not an error: the scan may still be writing the artifact.
            println!(
                "{} Report for {} is not ready yet",
                style("…").yellow(),
                style(&args.session_id).cyan(),
            );
        }
    }
    Ok(())
}
