use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

use crate::action::command::{Command, CommandOutput, Invocation};
use crate::action::executor::{CommandSink, PlannedAction, describe_plan, execute_plan};
use crate::driver::AutomationDriver;
use crate::driver::error::DriverError;
use crate::driver::protocol::{DriverRequest, DriverResponse, ElementHandle, Location, MouseButton};
use crate::element::resolver::{ResolvedElement, resolve_element};
use crate::error::{NavigatorError, Result};
use crate::navigation::planner::plan_path;
use crate::navigation::session::NavigationSession;
use crate::repository::store::Repository;
use crate::trace::logger::TraceContext;
use crate::trace::trace::TraceEvent;
use crate::wait::poller::{Deadline, WaitPoller};

use super::process::{ProcessControl, ScriptOutput, SystemProcessControl, run_script};

/// Keys pressed by `clear_text`: select from end to start, then delete.
pub const CLEAR_TEXT_KEYS: &str = "{End}{Shift down}{Home}{Shift up}{Delete}";

/// Most arrow-key presses `select_by_index` will send.
pub const MAX_SELECT_STEPS: u64 = 10_000;

/// The command surface: every UI, process and navigation operation.
///
/// Owns the automation driver, the process table, the wait poller, the
/// trace context and the cached navigation model and repositories. One
/// `Connector` serves one caller at a time.
pub struct Connector {
    driver: Box<dyn AutomationDriver>,
    processes: Box<dyn ProcessControl>,
    poller: WaitPoller,
    trace: TraceContext,
    session: NavigationSession,
}

impl Connector {
    pub fn new(driver: Box<dyn AutomationDriver>) -> Self {
        Self {
            driver,
            processes: Box::new(SystemProcessControl),
            poller: WaitPoller::default(),
            trace: TraceContext::new(),
            session: NavigationSession::new(),
        }
    }

    pub fn with_process_control(mut self, processes: Box<dyn ProcessControl>) -> Self {
        self.processes = processes;
        self
    }

    pub fn with_poller(mut self, poller: WaitPoller) -> Self {
        self.poller = poller;
        self
    }

    pub fn with_trace(mut self, trace: TraceContext) -> Self {
        self.trace = trace;
        self
    }

    pub fn trace(&self) -> &TraceContext {
        &self.trace
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut NavigationSession {
        &mut self.session
    }

    fn resolve(&mut self, locator: &str) -> Result<ResolvedElement> {
        resolve_element(self.driver.as_mut(), locator, &self.trace)
    }

    fn act(&mut self, command: Command, request: &DriverRequest) -> Result<DriverResponse> {
        self.driver
            .send_ok(request)
            .map_err(|e| NavigatorError::driver(command.name(), e))
    }

    fn click_with(
        &mut self,
        command: Command,
        locator: &str,
        button: MouseButton,
        location: Option<Location>,
    ) -> Result<bool> {
        self.trace
            .debug(format_args!("{} {} at {:?}", command, locator, location));
        let element = self.resolve(locator)?;
        self.act(command, &DriverRequest::click(element.handle, button, location))?;
        Ok(true)
    }

    // ---- element commands ----

    pub fn click_element(&mut self, locator: &str, location: Option<Location>) -> Result<bool> {
        self.click_with(Command::ClickElement, locator, MouseButton::Left, location)
    }

    pub fn right_click_element(
        &mut self,
        locator: &str,
        location: Option<Location>,
    ) -> Result<bool> {
        self.click_with(Command::RightClickElement, locator, MouseButton::Right, location)
    }

    pub fn double_click_element(
        &mut self,
        locator: &str,
        location: Option<Location>,
    ) -> Result<bool> {
        self.trace
            .debug(format_args!("double click {} at {:?}", locator, location));
        let element = self.resolve(locator)?;
        self.act(
            Command::DoubleClickElement,
            &DriverRequest::DoubleClick {
                handle: element.handle,
                location,
            },
        )?;
        Ok(true)
    }

    /// Click the element unless it is already checked.
    pub fn check(&mut self, locator: &str) -> Result<bool> {
        self.set_checked(Command::Check, locator, true)
    }

    /// Click the element if it is checked.
    pub fn uncheck(&mut self, locator: &str) -> Result<bool> {
        self.set_checked(Command::Uncheck, locator, false)
    }

    fn set_checked(&mut self, command: Command, locator: &str, wanted: bool) -> Result<bool> {
        let element = self.resolve(locator)?;
        if !element.kind.capabilities().toggle {
            return Err(missing_capability(command, &element, "toggle"));
        }

        let value = read_attribute(self.driver.as_mut(), command, element.handle, "Checked")?;
        let checked = is_truthy(value.as_ref());
        self.trace
            .debug(format_args!("{} is checked: {}", locator, checked));

        if checked != wanted {
            self.act(command, &DriverRequest::click(element.handle, MouseButton::Left, None))?;
        }
        Ok(true)
    }

    pub fn clear_text(&mut self, locator: &str) -> Result<bool> {
        let element = self.resolve(locator)?;
        self.act(
            Command::ClearText,
            &DriverRequest::press_keys(element.handle, CLEAR_TEXT_KEYS),
        )?;
        Ok(true)
    }

    pub fn input_text(&mut self, locator: &str, text: &str) -> Result<bool> {
        self.trace.debug(format_args!("input text {}", text));
        let element = self.resolve(locator)?;
        self.act(Command::InputText, &DriverRequest::press_keys(element.handle, text))?;
        Ok(true)
    }

    /// Move the selection to `index` with arrow keys.
    ///
    /// Presses `{up}` once per step when the current index is at or past
    /// the target, `{down}` otherwise. Targets more than
    /// [`MAX_SELECT_STEPS`] away are rejected before any key is pressed.
    pub fn select_by_index(&mut self, locator: &str, index: i64) -> Result<bool> {
        let command = Command::SelectByIndex;
        let element = self.resolve(locator)?;
        if !element.kind.capabilities().select {
            return Err(missing_capability(command, &element, "select"));
        }

        let value = read_attribute(
            self.driver.as_mut(),
            command,
            element.handle,
            "SelectedItemIndex",
        )?;
        let text = value_text(value);
        let selected: i64 = text.trim().parse().map_err(|_| NavigatorError::Execution {
            command: command.name().to_string(),
            reason: format!("SelectedItemIndex is not a number: '{}'", text),
        })?;

        let diff = selected
            .checked_sub(index)
            .filter(|diff| diff.unsigned_abs() <= MAX_SELECT_STEPS)
            .ok_or_else(|| {
                NavigatorError::invalid_argument(
                    command.name(),
                    format!(
                        "index {} is more than {} steps from selected item {}",
                        index, MAX_SELECT_STEPS, selected
                    ),
                )
            })?;
        self.trace.debug(format_args!(
            "selected item {}, diff for keypress {}",
            selected, diff
        ));

        let key = if diff >= 0 { "{up}" } else { "{down}" };
        for _ in 0..diff.unsigned_abs() {
            self.act(command, &DriverRequest::press_keys(element.handle, key))?;
        }
        Ok(true)
    }

    /// Focus `locator` and press `keys`, without acquiring an element first.
    pub fn send_keys(&mut self, locator: &str, keys: &str) -> Result<bool> {
        self.trace.debug(format_args!("send keys {}", keys));
        self.act(Command::SendKeys, &DriverRequest::send_keys(locator, keys))?;
        Ok(true)
    }

    /// Focus the element and report whether it actually has focus.
    pub fn set_focus(&mut self, locator: &str) -> Result<bool> {
        let element = self.resolve(locator)?;
        let response = self.act(
            Command::SetFocus,
            &DriverRequest::Focus {
                handle: element.handle,
            },
        )?;
        response
            .focused
            .ok_or_else(|| missing_field(Command::SetFocus, "focused"))
    }

    pub fn get_element_attribute(&mut self, locator: &str, name: &str) -> Result<String> {
        let element = self.resolve(locator)?;
        let value = read_attribute(
            self.driver.as_mut(),
            Command::GetElementAttribute,
            element.handle,
            name,
        )?;
        Ok(value_text(value))
    }

    /// Cell texts, row by row.
    pub fn get_table(&mut self, locator: &str) -> Result<Vec<Vec<String>>> {
        let element = self.resolve(locator)?;
        if !element.kind.capabilities().table {
            return Err(missing_capability(Command::GetTable, &element, "table"));
        }

        let response = self.act(
            Command::GetTable,
            &DriverRequest::Table {
                handle: element.handle,
            },
        )?;
        response
            .rows
            .ok_or_else(|| missing_field(Command::GetTable, "rows"))
    }

    /// Hover over the element and turn the wheel `amount` notches.
    pub fn scroll(&mut self, locator: &str, amount: i32) -> Result<bool> {
        let element = self.resolve(locator)?;
        self.act(
            Command::Scroll,
            &DriverRequest::Scroll {
                handle: element.handle,
                amount,
            },
        )?;
        Ok(true)
    }

    /// Base64 image of the element.
    pub fn take_screenshot(&mut self, locator: &str) -> Result<String> {
        let element = self.resolve(locator)?;
        let response = self.act(
            Command::TakeScreenshot,
            &DriverRequest::Capture {
                handle: element.handle,
            },
        )?;
        response
            .image
            .ok_or_else(|| missing_field(Command::TakeScreenshot, "image"))
    }

    // ---- waits ----

    /// Ask the driver to wait up to `timeout_ms` for `locator` to exist.
    pub fn wait_for_element(&mut self, locator: &str, timeout_ms: u64) -> Result<bool> {
        let response = self.act(
            Command::WaitForElement,
            &DriverRequest::exists(locator, timeout_ms),
        )?;
        match response.exists {
            Some(true) => Ok(true),
            Some(false) => Err(NavigatorError::ElementMissing(locator.to_string())),
            None => Err(missing_field(Command::WaitForElement, "exists")),
        }
    }

    /// Poll until attribute `name` of `locator` reads `expected`.
    ///
    /// Comparison is on the attribute's text. The element is re-acquired
    /// on every poll.
    pub fn wait_for_element_attribute(
        &mut self,
        locator: &str,
        name: &str,
        expected: &str,
        timeout_ms: u64,
    ) -> Result<bool> {
        let Connector {
            driver,
            poller,
            trace,
            ..
        } = self;

        let what = format!("{} of {} to be '{}'", name, locator, expected);
        let outcome = poller.poll_until(&what, timeout_ms, Deadline::Reached, || {
            let element = resolve_element(&mut **driver, locator, trace)?;
            let value = read_attribute(
                &mut **driver,
                Command::WaitForElementAttribute,
                element.handle,
                name,
            )?;
            Ok(value_text(value) == expected)
        })?;

        trace.debug(format_args!(
            "{} after {} polls ({}s)",
            what, outcome.attempts, outcome.elapsed_secs
        ));
        Ok(true)
    }

    pub fn wait_for_process_to_start(&mut self, name: &str, timeout_ms: u64) -> Result<bool> {
        let Connector {
            processes,
            poller,
            trace,
            ..
        } = self;

        let what = format!("process {}", name);
        let outcome = poller.poll_until(&what, timeout_ms, Deadline::Exceeded, || {
            processes.is_running(name)
        })?;

        trace.debug(format_args!(
            "{} started after {} polls",
            name, outcome.attempts
        ));
        Ok(true)
    }

    // ---- processes and programs ----

    pub fn check_if_process_is_running(&mut self, name: &str) -> Result<bool> {
        self.processes.is_running(name)
    }

    pub fn kill_process(&mut self, name: &str) -> Result<bool> {
        let running = self.processes.is_running(name)?;
        self.trace
            .debug(format_args!("process {} is running: {}", name, running));
        if !running {
            return Err(NavigatorError::ProcessNotRunning(name.to_string()));
        }

        if self.processes.kill(name)? {
            Ok(true)
        } else {
            Err(NavigatorError::Execution {
                command: Command::KillProcess.name().to_string(),
                reason: format!("process {} was not terminated", name),
            })
        }
    }

    pub fn run_application(&mut self, path: &str) -> Result<bool> {
        self.trace.debug(format_args!("run application {}", path));
        self.act(
            Command::RunApplication,
            &DriverRequest::run_application(path, None),
        )?;
        Ok(true)
    }

    pub fn run_application_with_parameters(&mut self, path: &str, params: &str) -> Result<bool> {
        self.trace.debug(format_args!(
            "run application {} with parameters {}",
            path, params
        ));
        self.act(
            Command::RunApplicationWithParameters,
            &DriverRequest::run_application(path, Some(params)),
        )?;
        Ok(true)
    }

    pub fn run_script(&mut self, path: &str) -> Result<ScriptOutput> {
        self.trace.debug(format_args!("run script {}", path));
        run_script(path, None)
    }

    pub fn run_script_with_parameters(&mut self, path: &str, params: &str) -> Result<ScriptOutput> {
        self.trace
            .debug(format_args!("run script {} with params {}", path, params));
        run_script(path, Some(params))
    }

    pub fn start_debug(&mut self) {
        self.trace.set_debug(true);
    }

    pub fn stop_debug(&mut self) {
        self.trace.set_debug(false);
    }

    // ---- navigation ----

    /// Drive the application from `start` to `finish` along the shortest
    /// route of the model at `model`.
    ///
    /// Model and repository come from the session cache unless
    /// `force_reload` is set. Returns the number of transitions executed.
    pub fn navigate(
        &mut self,
        model: &Path,
        start: &str,
        finish: &str,
        repository: &Path,
        force_reload: bool,
    ) -> Result<usize> {
        if force_reload {
            self.session.reload(model)?;
        }

        let plan = plan_path(self.session.model(model)?, start, finish)?;
        let repository = self.session.repository(repository)?.clone();
        tracing::info!(start, finish, steps = plan.len(), "navigating");

        execute_plan(&plan, &repository, self)
    }

    /// The route `navigate` would take, with every label resolved.
    pub fn plan_navigation(
        &mut self,
        model: &Path,
        start: &str,
        finish: &str,
        repository: Option<&Path>,
    ) -> Result<Vec<PlannedAction>> {
        let plan = plan_path(self.session.model(model)?, start, finish)?;
        let empty = Repository::new();
        let repository = match repository {
            Some(path) => self.session.repository(path)?,
            None => &empty,
        };
        describe_plan(&plan, repository)
    }

    fn run(&mut self, command: Command, invocation: &Invocation) -> Result<CommandOutput> {
        if invocation.location.is_some() && !command.accepts_location() {
            return Err(NavigatorError::invalid_argument(
                command.name(),
                "does not take a location",
            ));
        }

        let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
        let location = invocation.location;

        use CommandOutput::{Flag, Script, Table, Text};
        let output = match (command, args.as_slice()) {
            (Command::ClickElement, [locator]) => Flag(self.click_element(locator, location)?),
            (Command::DoubleClickElement, [locator]) => {
                Flag(self.double_click_element(locator, location)?)
            }
            (Command::RightClickElement, [locator]) => {
                Flag(self.right_click_element(locator, location)?)
            }
            (Command::Check, [locator]) => Flag(self.check(locator)?),
            (Command::Uncheck, [locator]) => Flag(self.uncheck(locator)?),
            (Command::ClearText, [locator]) => Flag(self.clear_text(locator)?),
            (Command::InputText, [locator, text]) => Flag(self.input_text(locator, text)?),
            (Command::SelectByIndex, [locator, index]) => {
                let index = number(command, "index", index)?;
                Flag(self.select_by_index(locator, index)?)
            }
            (Command::SendKeys, [locator, keys]) => Flag(self.send_keys(locator, keys)?),
            (Command::SetFocus, [locator]) => Flag(self.set_focus(locator)?),
            (Command::GetElementAttribute, [locator, name]) => {
                Text(self.get_element_attribute(locator, name)?)
            }
            (Command::GetTable, [locator]) => Table(self.get_table(locator)?),
            (Command::Scroll, [locator, amount]) => {
                let amount = number(command, "amount", amount)?;
                Flag(self.scroll(locator, amount)?)
            }
            (Command::TakeScreenshot, [locator]) => Text(self.take_screenshot(locator)?),
            (Command::WaitForElement, [locator, timeout]) => {
                let timeout = number(command, "timeout", timeout)?;
                Flag(self.wait_for_element(locator, timeout)?)
            }
            (Command::WaitForElementAttribute, [locator, name, expected, timeout]) => {
                let timeout = number(command, "timeout", timeout)?;
                Flag(self.wait_for_element_attribute(locator, name, expected, timeout)?)
            }
            (Command::WaitForProcessToStart, [name, timeout]) => {
                let timeout = number(command, "timeout", timeout)?;
                Flag(self.wait_for_process_to_start(name, timeout)?)
            }
            (Command::CheckIfProcessIsRunning, [name]) => {
                Flag(self.check_if_process_is_running(name)?)
            }
            (Command::KillProcess, [name]) => Flag(self.kill_process(name)?),
            (Command::RunApplication, [path]) => Flag(self.run_application(path)?),
            (Command::RunApplicationWithParameters, [path, params]) => {
                Flag(self.run_application_with_parameters(path, params)?)
            }
            (Command::RunScript, [path]) => Script(self.run_script(path)?),
            (Command::RunScriptWithParameters, [path, params]) => {
                Script(self.run_script_with_parameters(path, params)?)
            }
            (Command::StartDebug, []) => {
                self.start_debug();
                Flag(true)
            }
            (Command::StopDebug, []) => {
                self.stop_debug();
                Flag(true)
            }
            (Command::Navigate, [model, start, finish, repository]) => {
                let steps = self.navigate(
                    Path::new(model),
                    start,
                    finish,
                    Path::new(repository),
                    false,
                )?;
                Text(steps.to_string())
            }
            (Command::Navigate, [model, start, finish, repository, force_reload]) => {
                let force_reload = flag(command, "force_reload", force_reload)?;
                let steps = self.navigate(
                    Path::new(model),
                    start,
                    finish,
                    Path::new(repository),
                    force_reload,
                )?;
                Text(steps.to_string())
            }
            _ => return Err(arity_error(command, args.len())),
        };

        Ok(output)
    }
}

impl CommandSink for Connector {
    /// Check the argument shape, run the command and record a trace event.
    fn dispatch(&mut self, command: Command, invocation: &Invocation) -> Result<CommandOutput> {
        let result = self.run(command, invocation);

        let mut event = TraceEvent::now(command.name());
        if let Some(target) = invocation.args.first() {
            event = event.with_target(target);
        }
        event = match &result {
            Ok(CommandOutput::Flag(flag)) => event.with_detail(flag),
            Ok(_) => event,
            Err(e) => event.with_error(e),
        };
        self.trace.record(&event);

        result
    }
}

fn read_attribute(
    driver: &mut dyn AutomationDriver,
    command: Command,
    handle: ElementHandle,
    name: &str,
) -> Result<Option<Value>> {
    let response = driver
        .send_ok(&DriverRequest::attribute(handle, name))
        .map_err(|e| NavigatorError::driver(command.name(), e))?;
    Ok(response.value)
}

/// Attribute text as the driver would print it; absent is empty.
fn value_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => {
            let text = text.trim();
            !(text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false"))
        }
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

fn missing_capability(
    command: Command,
    element: &ResolvedElement,
    capability: &str,
) -> NavigatorError {
    NavigatorError::invalid_argument(
        command.name(),
        format!(
            "{} at {} has no {} capability",
            element.kind, element.locator, capability
        ),
    )
}

fn missing_field(command: Command, field: &'static str) -> NavigatorError {
    NavigatorError::driver(
        command.name(),
        DriverError::MissingField {
            command: command.name().to_string(),
            field,
        },
    )
}

fn number<T: FromStr>(command: Command, what: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        NavigatorError::invalid_argument(
            command.name(),
            format!("{} must be a number, got '{}'", what, value),
        )
    })
}

fn flag(command: Command, what: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(NavigatorError::invalid_argument(
            command.name(),
            format!("{} must be true or false, got '{}'", what, value),
        )),
    }
}

fn arity_error(command: Command, given: usize) -> NavigatorError {
    let arity = command.arity();
    let expected = if arity.start() == arity.end() {
        arity.start().to_string()
    } else {
        format!("{} to {}", arity.start(), arity.end())
    };
    NavigatorError::invalid_argument(
        command.name(),
        format!("expects {} argument(s), got {}", expected, given),
    )
}
