use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::backend::{Backend, HttpBackend, ReportFormat};
use crate::cli::commands::ScanArgs;
use crate::workflow::poller::{start_polling, POLL_INTERVAL};
use crate::workflow::{renderer, report_view, start_scan, ReportView};
use crate::errors::ConsoleError;
use crate::models::{ConfigField, ScanConfiguration, SessionStatus};

pub async fn handle_scan(args: ScanArgs, backend_url: &str) -> Result<(), ConsoleError> {
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(backend_url));

    // The form is always seeded from the live catalog so enum values stay
    // server-approved; CLI flags are edits on top of it.
    let catalog = backend.fetch_catalog().await?;
    let mut form = ScanConfiguration::initialize(&catalog);
    form = form.set_field(ConfigField::BaseUrl, &args.base_url, &catalog)?;

    let overrides: [(ConfigField, Option<&String>); 7] = [
        (ConfigField::Openapi, args.openapi.as_ref()),
        (ConfigField::TokenFile, args.token_file.as_ref()),
        (ConfigField::Preset, args.preset.as_ref()),
        (ConfigField::Timeout, args.timeout.as_ref()),
        (ConfigField::PublicPaths, args.public_paths.as_ref()),
        (ConfigField::ExploitDepth, args.exploit_depth.as_ref()),
        (ConfigField::LogLevel, args.log_level.as_ref()),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            form = form.set_field(field, value, &catalog)?;
        }
    }
    if let Some(n) = args.concurrency {
        form = form.set_field(ConfigField::Concurrency, &n.to_string(), &catalog)?;
    }
    if let Some(n) = args.max_exploit_ops {
        form = form.set_field(ConfigField::MaxExploitOps, &n.to_string(), &catalog)?;
    }

    let handle = start_scan(backend.as_ref(), &form).await?;
    println!(
        "{} Scan started: {}",
        style("▶").green().bold(),
        style(&handle.id).cyan(),
    );

    if !args.wait {
        return Ok(());
    }

    follow_until_done(backend.clone(), &handle.id).await?;

    match report_view::load_report(backend.as_ref(), &handle.id).await? {
        view @ ReportView::Ready(_) => {
            let links: Vec<(String, String)> =
                [ReportFormat::Html, ReportFormat::Pdf, ReportFormat::Json]
                    .iter()
                    .map(|f| (f.as_str().to_string(), backend.report_url(&handle.id, *f)))
                    .collect();
            println!("{}", renderer::render_report(&view, &links));
        }
        ReportView::NotReady => {
            println!("{}", renderer::render_report(&ReportView::NotReady, &[]));
        }
    }
    Ok(())
}

/// Poll at the standard interval until a terminal status shows up, driving a
/// spinner. The poller itself never self-stops; this caller cancels it.
async fn follow_until_done(backend: Arc<dyn Backend>, session_id: &str) -> Result<(), ConsoleError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .map_err(|e| ConsoleError::Internal(format!("Bad spinner template: {}", e)))?,
    );
    spinner.set_message("Waiting for progress...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let poller = start_polling(backend, session_id.to_string(), POLL_INTERVAL);
    let mut rx = poller.subscribe();
    let final_status = loop {
        if rx.changed().await.is_err() {
            break SessionStatus::Unknown;
        }
        let snapshot = rx.borrow().clone();
        if let Some(snap) = snapshot {
            let tail = snap.last_log_lines.last().cloned().unwrap_or_default();
            spinner.set_message(format!("{} | {}", snap.status, tail));
            if snap.status.is_terminal() {
                break snap.status;
            }
        }
    };
    poller.stop().await;

    match final_status {
        SessionStatus::Finished => spinner.finish_with_message("Scan finished"),
        status => spinner.finish_with_message(format!("Scan ended: {}", status)),
    }
    info!(session_id, status = %final_status, "Stopped monitoring");
    Ok(())
}
