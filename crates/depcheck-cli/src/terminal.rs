//! Terminal prompts for the interactive resolver.

use dialoguer::{Confirm, Select};

use depcheck_core::component::ComponentType;
use depcheck_core::config::NonInteractivePolicy;
use depcheck_resolver::prompt::{InteractiveResolver, PolicyResolver};
use depcheck_util::errors::DepcheckError;
use depcheck_util::progress::{item_list, status_warn};

/// Asks the user through `dialoguer` when stdin is a terminal, and falls back
/// to the configured policy otherwise.
pub struct TerminalResolver {
    interactive: bool,
    fallback: PolicyResolver,
    prompt_error: Option<DepcheckError>,
}

impl TerminalResolver {
    pub fn new(policy: NonInteractivePolicy) -> Self {
        Self {
            interactive: atty::is(atty::Stream::Stdin),
            fallback: PolicyResolver::new(policy),
            prompt_error: None,
        }
    }

    /// The first prompt failure, if any. A failed prompt is answered as a decline.
    pub fn take_prompt_error(&mut self) -> Option<DepcheckError> {
        self.prompt_error.take()
    }

    fn confirm(&mut self, action: &str, names: &[String]) -> Option<bool> {
        if !self.interactive {
            return None;
        }
        let prompt = format!(
            "A component requires the following modifications to be {action}:\n{}\n\nDo you wish to continue?",
            item_list(names)
        );
        match Confirm::new().with_prompt(prompt).default(true).interact() {
            Ok(answer) => Some(answer),
            Err(e) => {
                self.record(e);
                Some(false)
            }
        }
    }

    fn record(&mut self, e: dialoguer::Error) {
        tracing::debug!(error = %e, "prompt failed");
        if self.prompt_error.is_none() {
            self.prompt_error = Some(DepcheckError::Prompt {
                message: e.to_string(),
            });
        }
    }
}

impl InteractiveResolver for TerminalResolver {
    fn confirm_enable(&mut self, names: &[String]) -> bool {
        self.confirm("enabled", names)
            .unwrap_or_else(|| self.fallback.confirm_enable(names))
    }

    fn confirm_disable(&mut self, names: &[String]) -> bool {
        self.confirm("disabled", names)
            .unwrap_or_else(|| self.fallback.confirm_disable(names))
    }

    fn choose_one(&mut self, kind: ComponentType, names: &[String]) -> Option<usize> {
        if !self.interactive {
            return self.fallback.choose_one(kind, names);
        }
        let prompt = format!(
            "The currently chosen {kind} is not compatible with your setup. Please select a compatible one."
        );
        match Select::new()
            .with_prompt(prompt)
            .items(names)
            .default(0)
            .interact_opt()
        {
            Ok(choice) => choice,
            Err(e) => {
                self.record(e);
                None
            }
        }
    }

    fn notify_failure(&mut self, message: &str) {
        status_warn("Warning", message);
    }
}
