use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::error::{NavigatorError, Result};

use super::model::NavigationModel;

/// Hop distances and breadth-first predecessors from one start state.
#[derive(Debug, Clone, Default)]
pub struct ShortestPaths<'a> {
    pub distance: HashMap<&'a str, usize>,
    pub predecessor: HashMap<&'a str, &'a str>,
}

/// Single-source shortest paths by hop count.
///
/// Every transition weighs one, so a breadth-first walk is exact. Ties go
/// to the transition declared first.
pub fn shortest_paths<'a>(model: &'a NavigationModel, start: &str) -> ShortestPaths<'a> {
    let mut paths = ShortestPaths::default();
    let Some(origin) = model.states().iter().find(|s| s.as_str() == start) else {
        return paths;
    };

    let mut queue: VecDeque<&'a str> = VecDeque::new();
    paths.distance.insert(origin.as_str(), 0);
    queue.push_back(origin.as_str());

    while let Some(state) = queue.pop_front() {
        let next_distance = paths.distance[state] + 1;
        for transition in model.outgoing(state) {
            let to = transition.to.as_str();
            if paths.distance.contains_key(to) {
                continue;
            }
            paths.distance.insert(to, next_distance);
            paths.predecessor.insert(to, state);
            queue.push_back(to);
        }
    }

    paths
}

/// One hop of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub from: String,
    pub to: String,
    /// Transition label as stored in the model
    pub label: String,
}

/// Ordered transitions from `start` to `finish`, fewest hops first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathPlan {
    pub start: String,
    pub finish: String,
    pub steps: Vec<PlanStep>,
}

impl PathPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Plan the shortest route from `start` to `finish`.
///
/// `start == finish` gives an empty plan. An unknown `start` and an
/// unreachable `finish` are both not-found errors.
pub fn plan_path(model: &NavigationModel, start: &str, finish: &str) -> Result<PathPlan> {
    if !model.has_state(start) {
        return Err(NavigatorError::UnknownState(start.to_string()));
    }

    let paths = shortest_paths(model, start);
    if !paths.distance.contains_key(finish) {
        return Err(NavigatorError::UnreachableState {
            start: start.to_string(),
            finish: finish.to_string(),
        });
    }

    // Walk predecessors back from the finish, then flip.
    let mut hops = Vec::new();
    let mut current = finish;
    while let Some(&previous) = paths.predecessor.get(current) {
        hops.push((previous, current));
        current = previous;
    }
    hops.reverse();

    let steps = hops
        .into_iter()
        .map(|(from, to)| PlanStep {
            from: from.to_string(),
            to: to.to_string(),
            label: model.label(from, to).unwrap_or_default().to_string(),
        })
        .collect();

    Ok(PathPlan {
        start: start.to_string(),
        finish: finish.to_string(),
        steps,
    })
}
