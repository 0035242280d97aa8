//! In-memory stack API fake for tests
//!
//! Scripted describe/change-set answers plus a log of every mutating call,
//! so tests can assert both the outcome and exactly which remote commands
//! were issued.

use crate::api::{ChangeSetState, ParameterStore, StackApi, StackOutput};
use crate::error::Result;
use crate::request::DeploymentRequest;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Fake [`StackApi`] with scripted responses
pub(crate) struct FakeStackApi {
    /// Successive `stack_status` answers; the last entry repeats
    statuses: Mutex<Vec<Option<String>>>,
    /// Successive `change_set_state` answers; the last entry repeats
    change_set_states: Mutex<Vec<ChangeSetState>>,
    outputs: Vec<StackOutput>,
    calls: Mutex<Vec<String>>,
    describes: Mutex<usize>,
}

impl FakeStackApi {
    pub(crate) fn new() -> Self {
        Self {
            statuses: Mutex::new(Vec::new()),
            change_set_states: Mutex::new(Vec::new()),
            outputs: Vec::new(),
            calls: Mutex::new(Vec::new()),
            describes: Mutex::new(0),
        }
    }

    pub(crate) fn with_statuses(self, statuses: Vec<Option<&str>>) -> Self {
        *self.statuses.lock().unwrap() = statuses
            .into_iter()
            .map(|s| s.map(str::to_string))
            .collect();
        self
    }

    pub(crate) fn with_change_set_states(self, states: Vec<ChangeSetState>) -> Self {
        *self.change_set_states.lock().unwrap() = states;
        self
    }

    pub(crate) fn with_output(mut self, key: &str, value: &str) -> Self {
        self.outputs.push(StackOutput::new(key, value));
        self
    }

    /// Mutating calls issued so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `stack_status` calls issued so far.
    pub(crate) fn describe_count(&self) -> usize {
        *self.describes.lock().unwrap()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn next_status(&self) -> Option<String> {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.remove(0)
        } else {
            statuses.first().cloned().flatten()
        }
    }
}

#[async_trait]
impl StackApi for FakeStackApi {
    async fn stack_status(&self, _stack: &str) -> Result<Option<String>> {
        *self.describes.lock().unwrap() += 1;
        Ok(self.next_status())
    }

    async fn create_stack(&self, _request: &DeploymentRequest) -> Result<()> {
        self.record("create_stack");
        Ok(())
    }

    async fn delete_stack(&self, _stack: &str) -> Result<()> {
        self.record("delete_stack");
        Ok(())
    }

    async fn create_change_set(&self, _request: &DeploymentRequest, _name: &str) -> Result<()> {
        self.record("create_change_set");
        Ok(())
    }

    async fn change_set_state(&self, _stack: &str, _name: &str) -> Result<ChangeSetState> {
        let mut states = self.change_set_states.lock().unwrap();
        if states.len() > 1 {
            Ok(states.remove(0))
        } else {
            Ok(states.first().cloned().unwrap_or(ChangeSetState::Building))
        }
    }

    async fn execute_change_set(&self, _stack: &str, _name: &str) -> Result<()> {
        self.record("execute_change_set");
        Ok(())
    }

    async fn delete_change_set(&self, _stack: &str, _name: &str) -> Result<()> {
        self.record("delete_change_set");
        Ok(())
    }

    async fn stack_outputs(&self, _stack: &str) -> Result<Vec<StackOutput>> {
        Ok(self.outputs.clone())
    }
}

/// Fake [`ParameterStore`] backed by a map
pub(crate) struct FakeParameterStore {
    values: HashMap<String, String>,
}

impl FakeParameterStore {
    pub(crate) fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub(crate) fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl ParameterStore for FakeParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<Option<String>> {
        Ok(self.values.get(name).cloned())
    }
}
