#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Form,
    Run,
    Prompts,
    Doctor,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "form" => CliVerb::Form,
        "run" => CliVerb::Run,
        "prompts" => CliVerb::Prompts,
        "doctor" => CliVerb::Doctor,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  form                 Open the review form in the terminal".to_string(),
        "  run [<file>|-]       Review code from a file or stdin and print the result"
            .to_string(),
        "  prompts              Show the effective role prompt templates".to_string(),
        "  doctor               Check configuration and credentials".to_string(),
        String::new(),
        "Environment:".to_string(),
        "  GROQ_API_KEY                   completion service credential (required for reviews)"
            .to_string(),
        "  LANGCHAIN_API_KEY              tracing service credential".to_string(),
        "  LANGCHAIN_PROJECT_NAME         tracing project id".to_string(),
        "  PEERFLOW_HOME                  state root (default ~/.peerflow)".to_string(),
        "  PEERFLOW_COMPLETION_API_BASE   completion endpoint override".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = vec![
        "peerflow".to_string(),
        "Automated code peer review: coder drafts, peer critiques, manager documents and approves."
            .to_string(),
        String::new(),
    ];
    lines.extend(cli_help_lines());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_parse() {
        assert_eq!(parse_cli_verb("form"), CliVerb::Form);
        assert_eq!(parse_cli_verb("run"), CliVerb::Run);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("review"), CliVerb::Unknown);
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();
        for verb in ["form", "run", "prompts", "doctor"] {
            assert!(help.contains(&format!("  {verb}")), "missing {verb}");
        }
    }
}
