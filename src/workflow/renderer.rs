use console::style;

use crate::models::{
    Catalog, ReportDocument, ScanConfiguration, ScanListEntry, ScanSession, Severity,
};
use crate::models::scan_config::join_csv;
use crate::utils::formatting::format_duration;

use super::help::help_rows;
use super::report_view::{group_by_category, ReportView};

/// Placeholder for any value the backend did not supply.
const DASH: &str = "—";

/// How many log lines the progress view shows at most.
const LOG_TAIL: usize = 20;

pub fn render_form(form: &ScanConfiguration, catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Scan configuration:").white().bold()));

    let base_url = if form.base_url.is_empty() {
        style(DASH).red().to_string()
    } else {
        style(&form.base_url).white().bold().to_string()
    };
    push_row(&mut out, "baseUrl", &base_url);
    push_row(&mut out, "openapi", &or_dash(&form.openapi));
    push_row(&mut out, "tokenFile", &or_dash(&form.token_file));
    push_row(&mut out, "preset", &choice(&form.preset, &catalog.presets));
    push_row(&mut out, "timeout", &or_dash(&form.timeout));
    push_row(&mut out, "concurrency", &opt_num(form.concurrency, "auto"));
    push_row(&mut out, "publicPaths", &or_dash(&join_csv(&form.public_paths)));
    push_row(&mut out, "allowCorsWildcardPublic", &flag(form.allow_cors_wildcard_public));
    push_row(&mut out, "exploitDepth", &choice(&form.exploit_depth, &catalog.exploit_depth));
    push_row(&mut out, "maxExploitOps", &opt_num(form.max_exploit_ops, DASH));
    push_row(&mut out, "safetySkipDelete", &flag(form.safety_skip_delete));
    push_row(&mut out, "discoverUndocumented", &flag(form.discover_undocumented));
    push_row(&mut out, "strictContract", &flag(form.strict_contract));
    push_row(&mut out, "logLevel", &choice(&form.log_level, &catalog.log_levels));

    if !catalog.servers.is_empty() {
        out.push_str(&format!("\n  {}\n", style("Available servers:").dim()));
        for (i, server) in catalog.servers.iter().enumerate() {
            out.push_str(&format!("    {} {}\n", style(format!("[{}]", i + 1)).cyan(), server));
        }
    }
    out
}

pub fn render_progress(session_id: &str, snapshot: Option<&ScanSession>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} {}\n\n",
        style("Progress for").white().bold(),
        style(session_id).cyan(),
    ));

    let snap = match snapshot {
        Some(s) => s,
        None => {
            out.push_str(&format!("  {}\n", style("Waiting for first snapshot...").dim()));
            return out;
        }
    };

    let status = match snap.status.as_str() {
        "running" => style("running").green().bold().to_string(),
        "finished" => style("finished").cyan().bold().to_string(),
        "failed" => style("failed").red().bold().to_string(),
        other => style(other).white().to_string(),
    };
    out.push_str(&format!(
        "  {} {}  {} {}\n",
        style("Status:").dim(),
        status,
        style("Elapsed:").dim(),
        style(format_duration(snap.elapsed_ms)).white(),
    ));

    let ready: Vec<&str> = snap
        .reports_exist
        .iter()
        .filter(|(_, exists)| **exists)
        .map(|(kind, _)| kind.as_str())
        .collect();
    if !ready.is_empty() {
        let mut ready = ready;
        ready.sort_unstable();
        out.push_str(&format!(
            "  {} {}\n",
            style("Artifacts:").dim(),
            style(ready.join(", ")).white(),
        ));
    }

    if !snap.last_log_lines.is_empty() {
        out.push('\n');
        let skip = snap.last_log_lines.len().saturating_sub(LOG_TAIL);
        for line in snap.last_log_lines.iter().skip(skip) {
            out.push_str(&format!("  {}\n", style(line).dim()));
        }
    }
    out
}

pub fn render_no_session() -> String {
    format!("\n  {}\n", style("No active scan").dim())
}

pub fn render_report(view: &ReportView, links: &[(String, String)]) -> String {
    let doc = match view {
        ReportView::Ready(doc) => doc,
        ReportView::NotReady => {
            return format!("\n  {}\n", style("Report is not ready yet").yellow());
        }
    };

    let mut out = String::new();
    out.push_str(&render_report_meta(doc));

    let groups = group_by_category(doc);
    if groups.is_empty() {
        out.push_str(&format!("\n  {}\n", style("No findings reported.").green()));
    }
    for (category, findings) in &groups {
        out.push_str(&format!("\n{}\n", style(category).white().bold()));
        for finding in findings {
            out.push_str(&format!(
                "  {} {:<7} {} {}\n",
                render_severity_badge(finding.severity),
                finding.method.as_deref().unwrap_or(DASH),
                style(finding.endpoint.as_deref().unwrap_or(DASH)).cyan(),
                finding.description.as_deref().unwrap_or(DASH),
            ));
        }
    }

    if !links.is_empty() {
        out.push_str(&format!("\n  {}\n", style("Downloads:").dim()));
        for (kind, url) in links {
            out.push_str(&format!("    {:<5} {}\n", style(kind).white(), style(url).dim()));
        }
    }
    out
}

fn render_report_meta(doc: &ReportDocument) -> String {
    let meta = &doc.meta;
    format!(
        "\n  {} {}  {} {}  {} {}  {} {}\n",
        style("Preset:").dim(),
        style(meta.preset.as_deref().unwrap_or(DASH)).white().bold(),
        style("OpenAPI:").dim(),
        style(meta.openapi_version.as_deref().unwrap_or(DASH)).white(),
        style("Endpoints:").dim(),
        style(
            meta.endpoints_scanned
                .map(|n| n.to_string())
                .unwrap_or_else(|| DASH.into())
        )
        .white(),
        style("Duration:").dim(),
        style(
            meta.duration_ms
                .map(format_duration)
                .unwrap_or_else(|| DASH.into())
        )
        .white(),
    )
}

pub fn render_severity_badge(severity: Option<Severity>) -> String {
    match severity {
        Some(Severity::Critical) => style(" CRITICAL ").on_red().white().bold().to_string(),
        Some(Severity::High) => style(" HIGH ").red().bold().to_string(),
        Some(Severity::Medium) => style(" MEDIUM ").yellow().bold().to_string(),
        Some(Severity::Low) => style(" LOW ").blue().to_string(),
        Some(Severity::Unknown) | None => style(format!(" {} ", DASH)).dim().to_string(),
    }
}

pub fn render_help_table(catalog: &Catalog) -> String {
    let rows = help_rows(catalog);
    if rows.is_empty() {
        return format!("\n  {}\n", style("No help text advertised by the backend.").dim());
    }
    let width = rows.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);
    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Scanner parameters:").white().bold()));
    for (flag, text) in &rows {
        out.push_str(&format!(
            "  {:<w$}  {}\n",
            style(flag).cyan(),
            style(text).dim(),
            w = width,
        ));
    }
    out
}

pub fn render_scan_list(entries: &[ScanListEntry]) -> String {
    if entries.is_empty() {
        return format!("\n  {}\n", style("No scans recorded yet.").dim());
    }
    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Known scans:").white().bold()));
    for entry in entries {
        let mut artifacts = Vec::new();
        if entry.report_html {
            artifacts.push("html");
        }
        if entry.report_pdf {
            artifacts.push("pdf");
        }
        if entry.report_json {
            artifacts.push("json");
        }
        let artifacts = if artifacts.is_empty() {
            DASH.to_string()
        } else {
            artifacts.join(", ")
        };
        out.push_str(&format!(
            "  {}  {}\n",
            style(&entry.id).cyan(),
            style(artifacts).dim(),
        ));
    }
    out
}

pub fn render_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let build_ts = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");
    format!(
        "\n  {} {}\n  {} {}\n  {} {}\n",
        style("Version:").dim(),
        style(version).white().bold(),
        style("Commit:").dim(),
        style(git_hash).white(),
        style("Built:").dim(),
        style(build_ts).white(),
    )
}

fn push_row(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("  {:<24} {}\n", style(name).cyan(), value));
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        style(DASH).dim().to_string()
    } else {
        style(value).white().to_string()
    }
}

fn choice(value: &str, options: &[String]) -> String {
    let rest: Vec<&str> = options
        .iter()
        .map(|o| o.as_str())
        .filter(|o| *o != value)
        .collect();
    if rest.is_empty() {
        or_dash(value)
    } else {
        format!("{} {}", or_dash(value), style(format!("({})", rest.join("|"))).dim())
    }
}

fn flag(on: bool) -> String {
    if on {
        style("on").green().to_string()
    } else {
        style("off").dim().to_string()
    }
}

fn opt_num(value: Option<u32>, fallback: &str) -> String {
    match value {
        Some(n) => style(n.to_string()).white().to_string(),
        None => style(fallback).dim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Finding, ReportMeta};

    #[test]
    fn test_report_meta_uses_placeholders() {
        let view = ReportView::Ready(ReportDocument::default());
        let rendered = console::strip_ansi_codes(&render_report(&view, &[])).to_string();
        // Four missing meta fields, four placeholders.
        assert!(rendered.matches(DASH).count() >= 4);
        assert!(rendered.contains("No findings reported."));
    }

    #[test]
    fn test_report_groups_appear_in_first_seen_order() {
        let doc = ReportDocument {
            meta: ReportMeta::default(),
            security: vec![
                Finding {
                    id: "f1".into(),
                    category: Some("CORS".into()),
                    severity: Some(Severity::High),
                    endpoint: Some("/pets".into()),
                    method: Some("GET".into()),
                    description: Some("Wildcard origin".into()),
                },
                Finding {
                    id: "f2".into(),
                    category: Some("Auth".into()),
                    severity: Some(Severity::Critical),
                    endpoint: Some("/admin".into()),
                    method: Some("POST".into()),
                    description: None,
                },
            ],
        };
        let rendered =
            console::strip_ansi_codes(&render_report(&ReportView::Ready(doc), &[])).to_string();
        let cors = rendered.find("CORS").unwrap();
        let auth = rendered.find("Auth").unwrap();
        assert!(cors < auth);
    }

    #[test]
    fn test_not_ready_renders_as_waiting_state() {
        let rendered = console::strip_ansi_codes(&render_report(&ReportView::NotReady, &[]))
            .to_string();
        assert!(rendered.contains("not ready"));
    }
}
