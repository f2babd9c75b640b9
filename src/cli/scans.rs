use crate::backend::{Backend, HttpBackend};
use crate::workflow::renderer;
use crate::errors::ConsoleError;

pub async fn handle_scans(backend_url: &str) -> Result<(), ConsoleError> {
    let backend = HttpBackend::new(backend_url);
    let entries = backend.list_scans().await?;
    println!("{}", renderer::render_scan_list(&entries));
    Ok(())
}
