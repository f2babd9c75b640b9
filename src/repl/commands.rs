/// All slash commands supported by the interactive console. The four tab
/// commands mirror the console views; the rest operate on the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Switch to the configuration form view.
    Scan,
    /// Switch to the progress view (starts live polling when a scan is active).
    Progress,
    /// Switch to the report view.
    Report,
    /// Switch to the parameter help view.
    Help,
    /// Edit one form field.
    Set { field: String, value: String },
    /// Pick a base URL from the advertised server list, 1-based.
    Use { index: usize },
    /// Submit the form and start monitoring the new session.
    Start,
    /// List scans known to the backend.
    Scans,
    /// Monitor an existing session by id.
    Attach { session_id: String },
    /// Re-fetch the configuration catalog.
    Reload,
    /// List slash commands.
    Commands,
    Version,
    Clear,
    Exit,
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "scan",
        usage: "/scan",
        description: "Show the scan configuration form",
    },
    CommandHelp {
        name: "set",
        usage: "/set <field> [value]",
        description: "Edit a form field by its camelCase name (empty value clears optional fields)",
    },
    CommandHelp {
        name: "use",
        usage: "/use <n>",
        description: "Pick the n-th advertised server as the base URL",
    },
    CommandHelp {
        name: "start",
        usage: "/start",
        description: "Submit the configuration and switch to the progress view",
    },
    CommandHelp {
        name: "progress",
        usage: "/progress",
        description: "Watch live progress of the active scan",
    },
    CommandHelp {
        name: "report",
        usage: "/report",
        description: "Show the report of the active scan, with download links",
    },
    CommandHelp {
        name: "scans",
        usage: "/scans",
        description: "List scans recorded by the backend",
    },
    CommandHelp {
        name: "attach",
        usage: "/attach <session-id>",
        description: "Monitor an existing session",
    },
    CommandHelp {
        name: "help",
        usage: "/help",
        description: "Show the scanner parameter reference from the backend",
    },
    CommandHelp {
        name: "reload",
        usage: "/reload",
        description: "Re-fetch the configuration catalog",
    },
    CommandHelp {
        name: "commands",
        usage: "/commands",
        description: "List these commands",
    },
    CommandHelp {
        name: "version",
        usage: "/version",
        description: "Show version and build info",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear",
        description: "Clear the terminal screen",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Quit the console",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/scan",
    "/set",
    "/use",
    "/start",
    "/progress",
    "/report",
    "/scans",
    "/attach",
    "/help",
    "/reload",
    "/commands",
    "/version",
    "/clear",
    "/exit",
];

/// Parse a raw input line into a SlashCommand, or return an error message.
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim();
    if !input.starts_with('/') {
        return Err("Commands must start with /. Type /commands for the list.".into());
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let cmd = parts[0];
    let args = &parts[1..];

    match cmd {
        "/scan" => Ok(SlashCommand::Scan),
        "/progress" => Ok(SlashCommand::Progress),
        "/report" => Ok(SlashCommand::Report),
        "/help" => Ok(SlashCommand::Help),
        "/set" => parse_set(args),
        "/use" => parse_use(args),
        "/start" => Ok(SlashCommand::Start),
        "/scans" => Ok(SlashCommand::Scans),
        "/attach" => match args.first() {
            Some(id) => Ok(SlashCommand::Attach {
                session_id: id.to_string(),
            }),
            None => Err("Usage: /attach <session-id>".into()),
        },
        "/reload" => Ok(SlashCommand::Reload),
        "/commands" => Ok(SlashCommand::Commands),
        "/version" => Ok(SlashCommand::Version),
        "/clear" => Ok(SlashCommand::Clear),
        "/exit" | "/quit" | "/q" => Ok(SlashCommand::Exit),
        other => Err(format!(
            "Unknown command: {}. Type /commands for the list.",
            other
        )),
    }
}

fn parse_set(args: &[&str]) -> Result<SlashCommand, String> {
    let field = match args.first() {
        Some(f) => f.to_string(),
        None => return Err("Usage: /set <field> [value]".into()),
    };
    // Everything after the field name is the value, spaces included, so
    // free-text fields like publicPaths can take "a, b, c".
    let value = args[1..].join(" ");
    Ok(SlashCommand::Set { field, value })
}

fn parse_use(args: &[&str]) -> Result<SlashCommand, String> {
    match args.first().map(|a| a.parse::<usize>()) {
        Some(Ok(index)) if index >= 1 => Ok(SlashCommand::Use { index }),
        _ => Err("Usage: /use <n> (1-based server index)".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_commands() {
        assert_eq!(parse_command("/scan").unwrap(), SlashCommand::Scan);
        assert_eq!(parse_command("/progress").unwrap(), SlashCommand::Progress);
        assert_eq!(parse_command("/report").unwrap(), SlashCommand::Report);
        assert_eq!(parse_command("/help").unwrap(), SlashCommand::Help);
    }

    #[test]
    fn test_set_joins_the_rest_of_the_line() {
        assert_eq!(
            parse_command("/set publicPaths /health, /docs").unwrap(),
            SlashCommand::Set {
                field: "publicPaths".into(),
                value: "/health, /docs".into(),
            }
        );
        assert_eq!(
            parse_command("/set concurrency").unwrap(),
            SlashCommand::Set {
                field: "concurrency".into(),
                value: String::new(),
            }
        );
        assert!(parse_command("/set").is_err());
    }

    #[test]
    fn test_use_requires_a_one_based_index() {
        assert_eq!(parse_command("/use 2").unwrap(), SlashCommand::Use { index: 2 });
        assert!(parse_command("/use 0").is_err());
        assert!(parse_command("/use x").is_err());
        assert!(parse_command("/use").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_command("/frobnicate").is_err());
        assert!(parse_command("hello").is_err());
    }
}
