#![allow(dead_code)]

use std::collections::VecDeque;

use depcheck_core::catalog::Catalog;
use depcheck_core::component::{ComponentRecord, ComponentType};
use depcheck_resolver::prompt::InteractiveResolver;

/// A single call made to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ConfirmEnable(Vec<String>),
    ConfirmDisable(Vec<String>),
    ChooseOne(ComponentType, Vec<String>),
    NotifyFailure(String),
}

/// Scripted resolver that records every call.
///
/// Confirmations return `confirm`. Choices are taken from the queue; once it
/// is empty the first entry is picked when confirming, and none otherwise.
#[derive(Debug, Default)]
pub struct RecordingResolver {
    pub calls: Vec<Call>,
    confirm: bool,
    choices: VecDeque<Option<usize>>,
}

impl RecordingResolver {
    pub fn accepting() -> Self {
        Self {
            confirm: true,
            ..Self::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn choosing(mut self, choices: impl IntoIterator<Item = Option<usize>>) -> Self {
        self.choices.extend(choices);
        self
    }

    /// Calls that asked the user for a decision, ignoring notifications.
    pub fn decisions(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::NotifyFailure(_)))
            .collect()
    }

    pub fn failures(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::NotifyFailure(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl InteractiveResolver for RecordingResolver {
    fn confirm_enable(&mut self, names: &[String]) -> bool {
        self.calls.push(Call::ConfirmEnable(names.to_vec()));
        self.confirm
    }

    fn confirm_disable(&mut self, names: &[String]) -> bool {
        self.calls.push(Call::ConfirmDisable(names.to_vec()));
        self.confirm
    }

    fn choose_one(&mut self, kind: ComponentType, names: &[String]) -> Option<usize> {
        self.calls.push(Call::ChooseOne(kind, names.to_vec()));
        match self.choices.pop_front() {
            Some(choice) => choice,
            None if self.confirm => Some(0),
            None => None,
        }
    }

    fn notify_failure(&mut self, message: &str) {
        self.calls.push(Call::NotifyFailure(message.to_string()));
    }
}

/// Resolver that fails the test on any call.
pub struct Untouchable;

impl InteractiveResolver for Untouchable {
    fn confirm_enable(&mut self, names: &[String]) -> bool {
        panic!("unexpected confirm_enable({names:?})")
    }

    fn confirm_disable(&mut self, names: &[String]) -> bool {
        panic!("unexpected confirm_disable({names:?})")
    }

    fn choose_one(&mut self, kind: ComponentType, names: &[String]) -> Option<usize> {
        panic!("unexpected choose_one({kind}, {names:?})")
    }

    fn notify_failure(&mut self, message: &str) {
        panic!("unexpected notify_failure({message:?})")
    }
}

/// Record whose display name equals its id.
pub fn rec(kind: ComponentType, id: &str) -> ComponentRecord {
    ComponentRecord::new(kind, id, id)
}

pub fn catalog(records: impl IntoIterator<Item = ComponentRecord>) -> Catalog {
    Catalog::from_records(records).unwrap()
}

pub fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
