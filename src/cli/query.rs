use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::backend::{Backend, HttpBackend};
use crate::cli::commands::QueryArgs;
use crate::workflow::poller::start_polling;
use crate::workflow::renderer;
use crate::errors::ConsoleError;
use crate::models::ScanSession;

pub async fn handle_query(args: QueryArgs, backend_url: &str) -> Result<(), ConsoleError> {
    info!(session_id = %args.session_id, "Querying session progress");
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(backend_url));

    if !args.follow {
        let snapshot = backend.fetch_progress(&args.session_id).await?;
        print_snapshot(&args, &snapshot)?;
        return Ok(());
    }

    let poller = start_polling(
        backend,
        args.session_id.clone(),
        Duration::from_millis(args.interval_ms),
    );
    let mut rx = poller.subscribe();
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow().clone();
        if let Some(snap) = snapshot {
            print_snapshot(&args, &snap)?;
            if snap.status.is_terminal() {
                break;
            }
        }
    }
    poller.stop().await;
    Ok(())
}

fn print_snapshot(args: &QueryArgs, snapshot: &ScanSession) -> Result<(), ConsoleError> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("{}", renderer::render_progress(&args.session_id, Some(snapshot)));
    }
    Ok(())
}
