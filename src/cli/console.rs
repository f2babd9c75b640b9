use crate::errors::ConsoleError;
use crate::repl::ReplSession;

pub async fn handle_console(backend_url: &str) -> Result<(), ConsoleError> {
    ReplSession::new(backend_url).run().await
}
