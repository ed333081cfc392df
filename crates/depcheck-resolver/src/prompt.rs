//! The interactive side of resolution: confirmations and pick-one choices.

use depcheck_core::component::ComponentType;
use depcheck_core::config::NonInteractivePolicy;

/// Decisions the resolver cannot make on its own.
///
/// Every call blocks the resolution until an answer is returned. All lists
/// hold display names, not ids. Implementations must not start another
/// change on the manager from inside a callback.
pub trait InteractiveResolver {
    /// Ask whether the listed modifications may be enabled.
    fn confirm_enable(&mut self, names: &[String]) -> bool;

    /// Ask whether the listed modifications may be disabled.
    fn confirm_disable(&mut self, names: &[String]) -> bool;

    /// Ask for one of `names` as the new `kind`. `None` means no choice.
    fn choose_one(&mut self, kind: ComponentType, names: &[String]) -> Option<usize>;

    /// Tell the user why a change failed or was degraded.
    fn notify_failure(&mut self, message: &str);
}

/// Answers every prompt according to a fixed [`NonInteractivePolicy`].
#[derive(Debug, Clone, Default)]
pub struct PolicyResolver {
    policy: NonInteractivePolicy,
    failures: Vec<String>,
}

impl PolicyResolver {
    pub fn new(policy: NonInteractivePolicy) -> Self {
        Self {
            policy,
            failures: Vec::new(),
        }
    }

    /// Failure messages received so far.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn accepts(&self) -> bool {
        self.policy == NonInteractivePolicy::AcceptFirst
    }
}

impl InteractiveResolver for PolicyResolver {
    fn confirm_enable(&mut self, names: &[String]) -> bool {
        tracing::debug!(?names, accept = self.accepts(), "non-interactive enable");
        self.accepts()
    }

    fn confirm_disable(&mut self, names: &[String]) -> bool {
        tracing::debug!(?names, accept = self.accepts(), "non-interactive disable");
        self.accepts()
    }

    fn choose_one(&mut self, kind: ComponentType, names: &[String]) -> Option<usize> {
        tracing::debug!(%kind, ?names, "non-interactive choice");
        if self.accepts() && !names.is_empty() {
            Some(0)
        } else {
            None
        }
    }

    fn notify_failure(&mut self, message: &str) {
        tracing::warn!("{message}");
        self.failures.push(message.to_string());
    }
}
