use tracing::info;

use crate::backend::Backend;
use crate::errors::ConsoleError;
use crate::models::{ScanConfiguration, SessionHandle};

/// Validate and submit a configuration. Validation failures short-circuit
/// before any network traffic, and a rejected submission leaves the form
/// active for the caller to fix and retry. Switching the console into
/// monitoring mode is the caller's decision, not this function's.
pub async fn start_scan(
    backend: &dyn Backend,
    config: &ScanConfiguration,
) -> Result<SessionHandle, ConsoleError> {
    config.validate()?;
    let handle = backend.submit_scan(config).await?;
    info!(session_id = %handle.id, base_url = %config.base_url, "Scan started");
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::backend::testing::StubBackend;
    use crate::models::{Catalog, ConfigField};

    #[tokio::test]
    async fn test_invalid_form_never_reaches_the_network() {
        let backend = StubBackend::default();
        let config = ScanConfiguration::initialize(&Catalog::default());

        let err = start_scan(&backend, &config).await.unwrap_err();
        assert!(matches!(err, ConsoleError::MissingBaseUrl));
        assert_eq!(backend.submit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_submission_yields_session_handle() {
        let backend = StubBackend::default();
        let catalog = Catalog::default();
        let config = ScanConfiguration::initialize(&catalog)
            .set_field(ConfigField::BaseUrl, "https://x.test", &catalog)
            .unwrap();

        let handle = start_scan(&backend, &config).await.unwrap();
        assert_eq!(handle.id, "stub-1");
        assert_eq!(backend.submit_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            backend.submitted.lock().unwrap()[0].base_url,
            "https://x.test"
        );
    }

    #[tokio::test]
    async fn test_backend_rejection_surfaces_as_submission_error() {
        let backend = StubBackend {
            fail_submission: true,
            ..Default::default()
        };
        let catalog = Catalog::default();
        let config = ScanConfiguration::initialize(&catalog)
            .set_field(ConfigField::BaseUrl, "https://x.test", &catalog)
            .unwrap();

        let err = start_scan(&backend, &config).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Submission(_)));
    }
}
