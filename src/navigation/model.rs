use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// On-disk document
// ============================================================================

/// A directed, labeled transition between two UI states.
///
/// The label encodes the action that moves the UI from `from` to `to`,
/// e.g. `click_element(btn_ok)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Source state
    pub from: String,

    /// Destination state
    pub to: String,

    /// Action to perform, `command(args)`
    pub label: String,
}

/// Navigation model as written in YAML or JSON.
///
/// ```yaml
/// name: login flow
/// states: [start, login, home]
/// transitions:
///   - from: start
///     to: login
///     label: click_element(btn_sign_in)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared states; transition endpoints are added implicitly
    #[serde(default)]
    pub states: Vec<String>,

    #[serde(default)]
    pub transitions: Vec<Transition>,
}

// ============================================================================
// In-memory graph
// ============================================================================

/// Graph of UI states with labeled transitions.
///
/// States keep first-appearance order and each state's outgoing
/// transitions keep file order, so traversal is deterministic.
#[derive(Debug, Clone, Default)]
pub struct NavigationModel {
    name: Option<String>,
    states: Vec<String>,
    index: HashMap<String, usize>,
    transitions: Vec<Transition>,
    /// Transition indices leaving each state, by state index
    outgoing: Vec<Vec<usize>>,
}

impl NavigationModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: ModelDocument) -> Self {
        let mut model = NavigationModel {
            name: document.name,
            ..Self::default()
        };
        for state in &document.states {
            model.add_state(state);
        }
        for transition in document.transitions {
            model.add_transition(&transition.from, &transition.to, &transition.label);
        }
        model
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        let document: ModelDocument = serde_yaml::from_str(text)?;
        Ok(Self::from_document(document))
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let document: ModelDocument = serde_json::from_str(text)?;
        Ok(Self::from_document(document))
    }

    /// Add a state if it is not present yet. Returns its index.
    pub fn add_state(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.states.len();
        self.states.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.outgoing.push(Vec::new());
        i
    }

    /// Record a transition, adding both endpoints as states.
    pub fn add_transition(&mut self, from: &str, to: &str, label: &str) {
        let from_index = self.add_state(from);
        self.add_state(to);
        self.outgoing[from_index].push(self.transitions.len());
        self.transitions.push(Transition {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
        });
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Transitions leaving `state`, in declaration order.
    pub fn outgoing(&self, state: &str) -> impl Iterator<Item = &Transition> {
        self.index
            .get(state)
            .map(|&i| self.outgoing[i].as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&t| &self.transitions[t])
    }

    /// Label of the first transition declared from `from` to `to`.
    pub fn label(&self, from: &str, to: &str) -> Option<&str> {
        self.outgoing(from)
            .find(|t| t.to == to)
            .map(|t| t.label.as_str())
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}
