use std::sync::{Arc, Mutex};

use console::{style, Term};
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

use crate::backend::{Backend, HttpBackend, ReportFormat};
use crate::workflow::renderer;
use crate::workflow::{ConsoleContext, Tab};
use crate::errors::ConsoleError;
use crate::repl::banner;
use crate::repl::commands::{self, SlashCommand, COMMAND_HELP};
use crate::repl::completer::ReplHelper;
use crate::repl::progress::SnapshotPrinter;

/// The interactive console session: a readline loop whose slash commands
/// drive the tab state machine in `ConsoleContext`.
pub struct ReplSession {
    backend_url: String,
}

impl ReplSession {
    pub fn new(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.to_string(),
        }
    }

    pub async fn run(self) -> Result<(), ConsoleError> {
        banner::show_splash();

        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&self.backend_url));
        let mut ctx = ConsoleContext::new(backend);

        match ctx.load_catalog().await {
            Ok(()) => {
                if let (Some(form), Some(catalog)) = (ctx.form(), ctx.catalog()) {
                    println!("{}", renderer::render_form(form, catalog));
                }
            }
            Err(e) => {
                // No guessed defaults: the form stays unpopulated until a
                // /reload succeeds.
                println!(
                    "{} {}\n  {}",
                    style("✗").red(),
                    style(e).red(),
                    style("The form is unavailable. Fix the backend and run /reload.").dim(),
                );
            }
        }

        let config = Config::builder().auto_add_history(true).build();
        let mut editor = Editor::with_config(config)
            .map_err(|e| ConsoleError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper::default()));

        let printer = editor
            .create_external_printer()
            .map_err(|e| ConsoleError::Internal(format!("Failed to create printer: {}", e)))?;
        let printer = Arc::new(Mutex::new(printer));
        let mut printer_tasks = SnapshotPrinter::new();

        loop {
            let prompt_tab = ctx.tab().as_str().to_string();
            let readline = {
                // rustyline is blocking, so use spawn_blocking
                let result = tokio::task::spawn_blocking(move || {
                    let prompt = format!(
                        "{} {} ",
                        style(format!("[{}]", prompt_tab)).dim(),
                        style("defender>").cyan().bold(),
                    );
                    let result = editor.readline(&prompt);
                    (editor, result)
                })
                .await
                .map_err(|e| ConsoleError::Internal(format!("Readline task failed: {}", e)))?;

                editor = result.0;
                result.1
            };

            match readline {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match commands::parse_command(trimmed) {
                        Ok(SlashCommand::Exit) => break,
                        Ok(cmd) => {
                            self.handle_command(cmd, &mut ctx, &printer, &mut printer_tasks)
                                .await
                        }
                        Err(msg) => println!("{} {}", style("✗").red(), style(msg).red()),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{} Input error: {}", style("✗").red(), err);
                    break;
                }
            }
        }

        // Every exit path ends monitoring.
        printer_tasks.stop();
        ctx.shutdown().await;
        println!("{}", style("Goodbye.").dim());
        Ok(())
    }

    async fn handle_command<P>(
        &self,
        cmd: SlashCommand,
        ctx: &mut ConsoleContext,
        printer: &Arc<Mutex<P>>,
        tasks: &mut SnapshotPrinter,
    ) where
        P: rustyline::ExternalPrinter + Send + 'static,
    {
        match cmd {
            SlashCommand::Scan => {
                ctx.switch_tab(Tab::Scan).await;
                match (ctx.form(), ctx.catalog()) {
                    (Some(form), Some(catalog)) => {
                        println!("{}", renderer::render_form(form, catalog))
                    }
                    _ => println!("{}", catalog_missing()),
                }
            }

            SlashCommand::Set { field, value } => match ctx.edit_field(&field, &value) {
                Ok(()) => println!(
                    "  {} {} = {}",
                    style("✓").green(),
                    style(&field).cyan(),
                    if value.is_empty() { "(cleared)" } else { value.as_str() },
                ),
                Err(e) => println!("{} {}", style("✗").red(), style(e).red()),
            },

            SlashCommand::Use { index } => {
                let server = ctx
                    .catalog()
                    .and_then(|c| c.servers.get(index - 1))
                    .cloned();
                match server {
                    Some(server) => match ctx.edit_field("baseUrl", &server) {
                        Ok(()) => println!(
                            "  {} baseUrl = {}",
                            style("✓").green(),
                            style(server).white().bold(),
                        ),
                        Err(e) => println!("{} {}", style("✗").red(), style(e).red()),
                    },
                    None => println!(
                        "{} No server #{} in the catalog",
                        style("✗").red(),
                        index
                    ),
                }
            }

            SlashCommand::Start => match ctx.start_scan().await {
                Ok(handle) => {
                    println!(
                        "\n{} Scan started: {}\n",
                        style("▶").green().bold(),
                        style(&handle.id).cyan(),
                    );
                    // Submission succeeded, so the console (not the
                    // controller) moves to monitoring.
                    ctx.switch_tab(Tab::Progress).await;
                    self.attach_printer(ctx, printer, tasks);
                }
                Err(e) => println!("{} {}", style("✗").red(), style(e).red()),
            },

            SlashCommand::Progress => {
                // The view switches even without an active scan; the neutral
                // state shows on the progress tab itself.
                ctx.switch_tab(Tab::Progress).await;
                match ctx.session_id().map(str::to_string) {
                    None => println!("{}", renderer::render_no_session()),
                    Some(id) => {
                        println!(
                            "{}",
                            renderer::render_progress(&id, ctx.latest_snapshot().as_ref())
                        );
                        self.attach_printer(ctx, printer, tasks);
                    }
                }
            }

            SlashCommand::Report => {
                ctx.switch_tab(Tab::Report).await;
                match ctx.load_report().await {
                    Ok(None) => println!("{}", renderer::render_no_session()),
                    Ok(Some(view)) => {
                        let id = ctx.session_id().unwrap_or_default().to_string();
                        let links: Vec<(String, String)> =
                            [ReportFormat::Html, ReportFormat::Pdf, ReportFormat::Json]
                                .iter()
                                .map(|f| {
                                    (
                                        f.as_str().to_string(),
                                        ctx.backend().report_url(&id, *f),
                                    )
                                })
                                .collect();
                        println!("{}", renderer::render_report(&view, &links));
                    }
                    Err(e) => println!("{} {}", style("✗").red(), style(e).red()),
                }
            }

            SlashCommand::Help => {
                ctx.switch_tab(Tab::Help).await;
                match ctx.catalog() {
                    Some(catalog) => println!("{}", renderer::render_help_table(catalog)),
                    None => println!("{}", catalog_missing()),
                }
            }

            SlashCommand::Scans => match ctx.backend().list_scans().await {
                Ok(entries) => println!("{}", renderer::render_scan_list(&entries)),
                Err(e) => println!("{} {}", style("✗").red(), style(e).red()),
            },

            SlashCommand::Attach { session_id } => {
                ctx.set_session(Some(session_id.clone())).await;
                println!(
                    "  {} Monitoring {} (use /progress to watch)",
                    style("✓").green(),
                    style(session_id).cyan(),
                );
                if ctx.tab() == Tab::Progress {
                    self.attach_printer(ctx, printer, tasks);
                }
            }

            SlashCommand::Reload => match ctx.load_catalog().await {
                Ok(()) => {
                    println!("  {} Catalog reloaded", style("✓").green());
                    if let (Some(form), Some(catalog)) = (ctx.form(), ctx.catalog()) {
                        println!("{}", renderer::render_form(form, catalog));
                    }
                }
                Err(e) => println!("{} {}", style("✗").red(), style(e).red()),
            },

            SlashCommand::Commands => println!("{}", render_commands()),
            SlashCommand::Version => println!("{}", renderer::render_version()),
            SlashCommand::Clear => {
                let _ = Term::stdout().clear_screen();
            }
            SlashCommand::Exit => unreachable!("handled by the loop"),
        }
    }

    /// Route the active poller's snapshots to the external printer, one line
    /// each. `SnapshotPrinter` keeps a single task alive, so re-entering the
    /// progress view replaces the previous printer instead of stacking a
    /// second subscriber on the same channel.
    fn attach_printer<P>(
        &self,
        ctx: &ConsoleContext,
        printer: &Arc<Mutex<P>>,
        tasks: &mut SnapshotPrinter,
    ) where
        P: rustyline::ExternalPrinter + Send + 'static,
    {
        let rx = match ctx.subscribe_progress() {
            Some(rx) => rx,
            None => return,
        };
        let printer = printer.clone();
        tasks.respawn(rx, move |line| {
            if let Ok(mut p) = printer.lock() {
                let _ = p.print(line);
            }
        });
    }
}

fn catalog_missing() -> String {
    format!(
        "\n  {}\n",
        style("Catalog not loaded. Run /reload once the backend is reachable.").dim()
    )
}

fn render_commands() -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Available commands:").white().bold()));
    for cmd in COMMAND_HELP {
        out.push_str(&format!(
            "  {:<24} {}\n",
            style(cmd.usage).cyan(),
            style(cmd.description).dim(),
        ));
    }
    out
}
