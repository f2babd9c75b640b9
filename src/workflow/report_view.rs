use crate::backend::Backend;
use crate::errors::ConsoleError;
use crate::models::{Finding, ReportDocument};

/// Outcome of asking for a session's report. `NotReady` is a normal state
/// (the artifact does not exist until the scan writes it) and is distinct
/// from a transport failure, which surfaces as an error.
#[derive(Debug, Clone)]
pub enum ReportView {
    Ready(ReportDocument),
    NotReady,
}

pub async fn load_report(
    backend: &dyn Backend,
    session_id: &str,
) -> Result<ReportView, ConsoleError> {
    match backend.fetch_report(session_id).await? {
        Some(doc) => Ok(ReportView::Ready(doc)),
        None => Ok(ReportView::NotReady),
    }
}

/// Group findings by category, preserving first-seen category order and the
/// original finding order within each category. Findings with no category
/// (or an empty one) land under "Other".
pub fn group_by_category(doc: &ReportDocument) -> Vec<(String, Vec<&Finding>)> {
    let mut groups: Vec<(String, Vec<&Finding>)> = Vec::new();
    for finding in &doc.security {
        let key = finding
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("Other");
        match groups.iter_mut().find(|(name, _)| name == key) {
            Some((_, members)) => members.push(finding),
            None => groups.push((key.to_string(), vec![finding])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::backend::testing::StubBackend;

    fn finding(id: &str, category: Option<&str>) -> Finding {
        Finding {
            id: id.into(),
            category: category.map(|c| c.to_string()),
            severity: None,
            endpoint: None,
            method: None,
            description: None,
        }
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let doc = ReportDocument {
            meta: Default::default(),
            security: vec![
                finding("f1", Some("A")),
                finding("f2", Some("B")),
                finding("f3", Some("A")),
            ],
        };

        let groups = group_by_category(&doc);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "A");
        assert_eq!(groups[1].0, "B");
        let ids: Vec<&str> = groups[0].1.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f3"]);
        assert_eq!(groups[1].1[0].id, "f2");
    }

    #[test]
    fn test_missing_or_empty_category_becomes_other() {
        let doc = ReportDocument {
            meta: Default::default(),
            security: vec![finding("f1", None), finding("f2", Some(""))],
        };

        let groups = group_by_category(&doc);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Other");
        assert_eq!(groups[0].1.len(), 2);
    }

    #[tokio::test]
    async fn test_load_report_not_ready_is_not_an_error() {
        let backend = StubBackend::default();
        let view = load_report(&backend, "s-1").await.unwrap();
        assert!(matches!(view, ReportView::NotReady));
        assert_eq!(backend.report_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_report_ready() {
        let backend = StubBackend {
            report: Some(ReportDocument {
                meta: Default::default(),
                security: vec![finding("f1", Some("CORS"))],
            }),
            ..Default::default()
        };
        let view = load_report(&backend, "s-1").await.unwrap();
        match view {
            ReportView::Ready(doc) => assert_eq!(doc.security.len(), 1),
            ReportView::NotReady => panic!("expected a ready report"),
        }
    }
}
