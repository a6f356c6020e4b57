use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod doctor;
pub mod prompts;
pub mod review;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Form => review::cmd_form(),
        CliVerb::Run => review::cmd_run(&args[1..]),
        CliVerb::Prompts => prompts::cmd_prompts(),
        CliVerb::Doctor => doctor::cmd_doctor(),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
