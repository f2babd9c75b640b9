use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::models::ConfigField;
use crate::repl::commands::COMMAND_NAMES;

#[derive(Default)]
pub struct ReplHelper;

impl Helper for ReplHelper {}
impl Validator for ReplHelper {}
impl Highlighter for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let trimmed = line.trim();
        if !trimmed.starts_with('/') || trimmed.contains(' ') {
            return None;
        }
        for name in COMMAND_NAMES {
            if name.starts_with(trimmed) && *name != trimmed {
                return Some(name[trimmed.len()..].to_string());
            }
        }
        None
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();

        if !trimmed.starts_with('/') {
            return Ok((0, vec![]));
        }

        // Past the command name: /set completes form field names.
        if let Some(space_idx) = trimmed.find(' ') {
            let cmd = &trimmed[..space_idx];
            if cmd != "/set" {
                return Ok((pos, vec![]));
            }
            let arg_prefix = trimmed[space_idx..].trim_start();
            // Only the field name (first argument) completes.
            if arg_prefix.contains(' ') {
                return Ok((pos, vec![]));
            }
            let start = pos - arg_prefix.len();
            let candidates = ConfigField::ALL
                .iter()
                .map(|f| f.name())
                .filter(|name| name.starts_with(arg_prefix))
                .map(|name| Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                })
                .collect();
            return Ok((start, candidates));
        }

        let start = pos - trimmed.len();
        let candidates = COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(trimmed))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}
