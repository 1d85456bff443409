use serde::Serialize;

use crate::action::command::{Command, CommandOutput, Invocation};
use crate::action::descriptor::{ActionDescriptor, parse_action};
use crate::error::{NavigatorError, Result};
use crate::navigation::planner::{PathPlan, PlanStep};
use crate::repository::store::Repository;

/// Anything that can run a registry command, normally the `Connector`.
pub trait CommandSink {
    fn dispatch(&mut self, command: Command, invocation: &Invocation) -> Result<CommandOutput>;
}

/// A plan step with its label resolved, not yet executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAction {
    pub step: PlanStep,
    pub descriptor: ActionDescriptor,
}

/// Resolve every step of `plan` without executing anything.
pub fn describe_plan(plan: &PathPlan, repository: &Repository) -> Result<Vec<PlannedAction>> {
    plan.steps
        .iter()
        .map(|step| {
            Ok(PlannedAction {
                step: step.clone(),
                descriptor: parse_action(&step.label, repository)?,
            })
        })
        .collect()
}

/// Run the action of every step in order.
///
/// Stops at the first failing step; earlier steps are not undone. Returns
/// the number of steps executed.
pub fn execute_plan(
    plan: &PathPlan,
    repository: &Repository,
    sink: &mut dyn CommandSink,
) -> Result<usize> {
    for (i, step) in plan.steps.iter().enumerate() {
        let descriptor = parse_action(&step.label, repository)?;
        let command = Command::from_name(&descriptor.command)?;
        if !command.is_transition_action() {
            return Err(NavigatorError::invalid_argument(
                command.name(),
                "not allowed as a transition action",
            ));
        }

        tracing::info!(
            step = i + 1,
            of = plan.len(),
            from = %step.from,
            to = %step.to,
            %command,
            locator = %descriptor.locator,
            "executing transition"
        );

        let output = sink.dispatch(command, &Invocation::from_descriptor(&descriptor))?;
        if !output.is_success() {
            return Err(NavigatorError::Execution {
                command: command.name().to_string(),
                reason: format!("reported failure on {} -> {}", step.from, step.to),
            });
        }
    }

    Ok(plan.len())
}
