use crate::app::command_support::{build_runner, load_config};
use crate::review::{ReviewOutcome, ReviewRunner};
use crate::tui::form::{error_banner_text, run_review_form, validate_submission};
use std::fs;
use std::io::Read;

pub fn cmd_form() -> Result<String, String> {
    let config = load_config()?;
    let runner = build_runner(&config)?;
    run_review_form(runner)?;
    Ok("review form closed".to_string())
}

pub fn cmd_run(args: &[String]) -> Result<String, String> {
    if args.len() > 1 {
        return Err("usage: peerflow run [<file>|-]".to_string());
    }
    let source = args.first().map(String::as_str).unwrap_or("-");
    let code = read_source(source)?;
    let code = validate_submission(&code)?;

    let config = load_config()?;
    let runner = build_runner(&config)?;
    run_review(&runner, code)
}

fn read_source(source: &str) -> Result<String, String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read code from stdin: {e}"))?;
        return Ok(buf);
    }
    fs::read_to_string(source).map_err(|e| format!("failed to read code from {source}: {e}"))
}

/// Runs one review and renders the form result, or the form error banner.
pub fn run_review(runner: &ReviewRunner, code: &str) -> Result<String, String> {
    let code = validate_submission(code)?;
    runner
        .run(code)
        .map(|outcome| render_outcome(&outcome))
        .map_err(|err| error_banner_text(&err.to_string()))
}

fn render_outcome(outcome: &ReviewOutcome) -> String {
    let roles = outcome
        .roles()
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "status={}\nrun_id={}\nroles={roles}\n\n{}",
        outcome.state.step, outcome.run_id, outcome.state.code
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::PromptCatalog;
    use crate::provider::{CompletionClient, ProviderError};
    use crate::tui::form::EMPTY_INPUT_ERROR;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        calls: AtomicUsize,
        reply: &'static str,
    }

    impl CompletionClient for Counting {
        fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    #[test]
    fn blank_code_never_reaches_the_runner() {
        let client = Arc::new(Counting {
            calls: AtomicUsize::new(0),
            reply: "approved",
        });
        let runner = ReviewRunner::new(PromptCatalog::default(), client.clone());
        assert_eq!(run_review(&runner, " \n "), Err(EMPTY_INPUT_ERROR.to_string()));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn approved_run_renders_status_roles_and_code() {
        let client = Arc::new(Counting {
            calls: AtomicUsize::new(0),
            reply: "approved",
        });
        let runner = ReviewRunner::new(PromptCatalog::default(), client.clone());
        let output = run_review(&runner, "print('hi')").expect("review");
        assert!(output.starts_with("status=approved\nrun_id=review-"));
        assert!(output.contains("\nroles=coder,peer\n\n"));
        assert!(output.ends_with("\n\napproved"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }
}
