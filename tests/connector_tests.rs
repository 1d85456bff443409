use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;
use ui_navigator::action::command::{Command, CommandOutput, Invocation};
use ui_navigator::action::executor::CommandSink;
use ui_navigator::connector::connector::{CLEAR_TEXT_KEYS, MAX_SELECT_STEPS};
use ui_navigator::driver::protocol::{
    DriverRequest, DriverResponse, ElementHandle, Location, MouseButton,
};
use ui_navigator::element::element_kind::ElementKind;
use ui_navigator::error::{ErrorKind, NavigatorError};
use ui_navigator::trace::logger::TraceContext;

use crate::common::fakes::{FakeProcesses, ScriptedDriver, accept_all};
use crate::common::utils::{LOGIN_MODEL, LOGIN_REPOSITORY, build_connector, fixture};

mod common;

const HANDLE: ElementHandle = ElementHandle(7);

/// Driver whose attribute reads answer `value`.
fn with_attribute(value: serde_json::Value) -> ScriptedDriver {
    let (driver, _) = ScriptedDriver::new(move |request| match request {
        DriverRequest::Attribute { .. } => Ok(DriverResponse::success().with_value(value.clone())),
        other => accept_all(other),
    });
    driver
}

fn clicks(log: &[DriverRequest]) -> usize {
    log.iter()
        .filter(|r| matches!(r, DriverRequest::Click { .. }))
        .count()
}

// ============================================================================
// Element commands
// ============================================================================

#[test]
fn click_acquires_then_clicks() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    assert!(connector.click_element("/form/button[@id='ok']", None).unwrap());
    assert_eq!(
        log.borrow().as_slice(),
        [
            DriverRequest::acquire(ElementKind::Button, "/form/button[@id='ok']"),
            DriverRequest::click(HANDLE, MouseButton::Left, None),
        ]
    );
}

#[test]
fn right_click_at_location() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());
    let location = Location { x: 3, y: 4 };

    connector.right_click_element("/button", Some(location)).unwrap();
    assert_eq!(
        log.borrow()[1],
        DriverRequest::click(HANDLE, MouseButton::Right, Some(location))
    );
}

#[test]
fn double_click_sends_double_click() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    connector.double_click_element("/listitem", None).unwrap();
    assert!(matches!(
        log.borrow()[1],
        DriverRequest::DoubleClick { handle: HANDLE, location: None }
    ));
}

#[test]
fn check_clicks_only_when_unchecked() {
    let (driver, log) = ScriptedDriver::new(|request| match request {
        DriverRequest::Attribute { name, .. } => {
            assert_eq!(name, "Checked");
            Ok(DriverResponse::success().with_value(false))
        }
        other => accept_all(other),
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    assert!(connector.check("/form/checkbox").unwrap());
    assert_eq!(clicks(&log.borrow()), 1);
}

#[test]
fn check_skips_click_when_already_checked() {
    let (driver, log) = ScriptedDriver::new(|request| match request {
        DriverRequest::Attribute { .. } => Ok(DriverResponse::success().with_value(true)),
        other => accept_all(other),
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    assert!(connector.check("/form/checkbox").unwrap());
    assert_eq!(clicks(&log.borrow()), 0);
}

#[test]
fn uncheck_clicks_when_checked_text_is_true() {
    let (driver, log) = ScriptedDriver::new(|request| match request {
        DriverRequest::Attribute { .. } => Ok(DriverResponse::success().with_value("True")),
        other => accept_all(other),
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    assert!(connector.uncheck("/form/radiobutton").unwrap());
    assert_eq!(clicks(&log.borrow()), 1);
}

#[test]
fn uncheck_leaves_unchecked_alone() {
    let (driver, log) = ScriptedDriver::new(|request| match request {
        DriverRequest::Attribute { .. } => Ok(DriverResponse::success().with_value("False")),
        other => accept_all(other),
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    assert!(connector.uncheck("/form/checkbox").unwrap());
    assert_eq!(clicks(&log.borrow()), 0);
}

#[test]
fn check_requires_toggle_capability() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector.check("/form/button").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(clicks(&log.borrow()), 0);
}

#[test]
fn clear_text_selects_all_and_deletes() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    connector.clear_text("/form/text").unwrap();
    assert_eq!(
        log.borrow()[1],
        DriverRequest::press_keys(HANDLE, "{End}{Shift down}{Home}{Shift up}{Delete}")
    );
    assert_eq!(CLEAR_TEXT_KEYS, "{End}{Shift down}{Home}{Shift up}{Delete}");
}

#[test]
fn input_text_presses_text() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    connector.input_text("/form/text", "hello").unwrap();
    assert_eq!(log.borrow()[1], DriverRequest::press_keys(HANDLE, "hello"));
}

fn select_presses(selected: i64, target: i64) -> Vec<String> {
    let (driver, log) = ScriptedDriver::new(move |request| match request {
        DriverRequest::Attribute { .. } => {
            Ok(DriverResponse::success().with_value(selected.to_string()))
        }
        other => accept_all(other),
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());
    connector.select_by_index("/form/combobox", target).unwrap();

    let presses = log
        .borrow()
        .iter()
        .filter_map(|r| match r {
            DriverRequest::PressKeys { keys, .. } => Some(keys.clone()),
            _ => None,
        })
        .collect();
    presses
}

#[test]
fn select_by_index_moves_up() {
    assert_eq!(select_presses(5, 2), vec!["{up}"; 3]);
}

#[test]
fn select_by_index_moves_down() {
    assert_eq!(select_presses(1, 4), vec!["{down}"; 3]);
}

#[test]
fn select_by_index_same_index_presses_nothing() {
    assert!(select_presses(2, 2).is_empty());
}

fn select_far_away(selected: &'static str, target: &str) -> (NavigatorError, usize) {
    let (driver, log) = ScriptedDriver::new(move |request| match request {
        DriverRequest::Attribute { .. } => Ok(DriverResponse::success().with_value(selected)),
        other => accept_all(other),
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector
        .dispatch(Command::SelectByIndex, &Invocation::new(["/form/combobox", target]))
        .unwrap_err();
    let presses = log
        .borrow()
        .iter()
        .filter(|r| matches!(r, DriverRequest::PressKeys { .. }))
        .count();
    (err, presses)
}

#[test]
fn select_by_index_rejects_overflowing_index() {
    let (err, presses) = select_far_away("5", &i64::MIN.to_string());
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(presses, 0);
}

#[test]
fn select_by_index_rejects_unreasonable_distance() {
    let (err, presses) = select_far_away("0", "9000000000000000000");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("steps from selected item 0"));
    assert_eq!(presses, 0);
}

#[test]
fn select_by_index_allows_distance_up_to_limit() {
    let presses = select_presses(0, MAX_SELECT_STEPS as i64);
    assert_eq!(presses.len() as u64, MAX_SELECT_STEPS);
    assert!(presses.iter().all(|keys| keys == "{down}"));
}

#[test]
fn select_by_index_requires_select_capability() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());
    let err = connector.select_by_index("/form/text", 1).unwrap_err();
    assert!(matches!(err, NavigatorError::InvalidArgument { .. }));
}

#[test]
fn send_keys_goes_straight_to_driver() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    connector.send_keys("/form/text", "{Enter}").unwrap();
    assert_eq!(
        log.borrow().as_slice(),
        [DriverRequest::send_keys("/form/text", "{Enter}")]
    );
}

#[test]
fn set_focus_reports_focus() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());
    assert!(connector.set_focus("/form/text").unwrap());
}

#[test]
fn attribute_values_become_text() {
    let (mut connector, _) = build_connector(with_attribute(json!(42)), FakeProcesses::default());
    assert_eq!(connector.get_element_attribute("/text", "Length").unwrap(), "42");

    let (mut connector, _) = build_connector(with_attribute(json!("abc")), FakeProcesses::default());
    assert_eq!(connector.get_element_attribute("/text", "Text").unwrap(), "abc");

    let (mut connector, _) = build_connector(with_attribute(json!(null)), FakeProcesses::default());
    assert_eq!(connector.get_element_attribute("/text", "Text").unwrap(), "");
}

#[test]
fn get_table_returns_rows() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let rows = connector.get_table("/window/table").unwrap();
    assert_eq!(rows[1], vec!["1", "Ada"]);
}

#[test]
fn get_table_rejects_non_table() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector.get_table("/window/cell").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn scroll_and_screenshot() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    connector.scroll("/list", -3).unwrap();
    assert_eq!(
        log.borrow()[1],
        DriverRequest::Scroll {
            handle: HANDLE,
            amount: -3
        }
    );
    assert_eq!(connector.take_screenshot("/list").unwrap(), "aW1n");
}

#[test]
fn driver_rejection_after_acquire_is_execution_error() {
    let (driver, _) = ScriptedDriver::new(|request| match request {
        DriverRequest::Click { .. } => Ok(DriverResponse::failure("window closed")),
        other => accept_all(other),
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector.click_element("/button", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Execution);
    assert!(err.to_string().contains("click_element"));
    assert!(err.to_string().contains("window closed"));
}

// ============================================================================
// Waits
// ============================================================================

#[test]
fn wait_for_element_passes_timeout_to_driver() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    assert!(connector.wait_for_element("/dialog", 2500).unwrap());
    assert_eq!(log.borrow()[0], DriverRequest::exists("/dialog", 2500));
}

#[test]
fn wait_for_missing_element_is_not_found() {
    let (driver, _) = ScriptedDriver::new(|_| {
        Ok(DriverResponse {
            exists: Some(false),
            ..DriverResponse::success()
        })
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector.wait_for_element("/dialog", 100).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("/dialog"));
}

#[test]
fn wait_for_attribute_polls_until_match() {
    let reads = Rc::new(Cell::new(0));
    let counter = Rc::clone(&reads);
    let (driver, _) = ScriptedDriver::new(move |request| match request {
        DriverRequest::Attribute { .. } => {
            counter.set(counter.get() + 1);
            let value = if counter.get() >= 3 { "Ready" } else { "Busy" };
            Ok(DriverResponse::success().with_value(value))
        }
        other => accept_all(other),
    });
    let (mut connector, sleeper) = build_connector(driver, FakeProcesses::default());

    assert!(
        connector
            .wait_for_element_attribute("/statusbar", "Text", "Ready", 10_000)
            .unwrap()
    );
    assert_eq!(reads.get(), 3);
    assert_eq!(sleeper.slept.borrow().len(), 2);
}

#[test]
fn wait_for_attribute_times_out() {
    let (mut connector, sleeper) =
        build_connector(with_attribute(json!("Busy")), FakeProcesses::default());

    let err = connector
        .wait_for_element_attribute("/statusbar", "Text", "Ready", 3000)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(sleeper.slept.borrow().len(), 2);
}

#[test]
fn wait_for_process_to_start_polls_process_table() {
    let processes = FakeProcesses::running(&["notepad.exe"]);
    processes.hidden_checks.set(2);
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, sleeper) = build_connector(driver, processes);

    assert!(connector.wait_for_process_to_start("notepad", 5000).unwrap());
    assert_eq!(sleeper.slept.borrow().len(), 2);
}

#[test]
fn wait_for_absent_process_times_out() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, sleeper) = build_connector(driver, FakeProcesses::default());

    let err = connector.wait_for_process_to_start("calc", 2000).unwrap_err();
    assert_eq!(err.to_string(), "timed out after 2s waiting for process calc");
    // polled at 0s, 1s and 2s
    assert_eq!(sleeper.slept.borrow().len(), 2);
}

// ============================================================================
// Processes
// ============================================================================

#[test]
fn process_running_check() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::running(&["calc.exe"]));

    assert!(connector.check_if_process_is_running("calc").unwrap());
    assert!(!connector.check_if_process_is_running("notepad").unwrap());
}

#[test]
fn kill_running_process() {
    let processes = FakeProcesses::running(&["calc.exe"]);
    let killed = Rc::clone(&processes.killed);
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, processes);

    assert!(connector.kill_process("calc.exe").unwrap());
    assert_eq!(killed.borrow().as_slice(), ["calc.exe"]);
}

#[test]
fn kill_absent_process_is_not_found() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector.kill_process("calc.exe").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "process calc.exe is not running");
}

#[test]
fn refused_kill_is_execution_error() {
    let processes = FakeProcesses {
        refuse_kill: true,
        ..FakeProcesses::running(&["calc.exe"])
    };
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, processes);

    assert_eq!(
        connector.kill_process("calc.exe").unwrap_err().kind(),
        ErrorKind::Execution
    );
}

#[test]
fn run_application_goes_through_driver() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    connector.run_application("notepad.exe").unwrap();
    connector
        .run_application_with_parameters("notepad.exe", "notes.txt")
        .unwrap();
    assert_eq!(
        log.borrow().as_slice(),
        [
            DriverRequest::run_application("notepad.exe", None),
            DriverRequest::run_application("notepad.exe", Some("notes.txt")),
        ]
    );
}

#[test]
fn missing_script_is_execution_error() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector
        .run_script("/nonexistent/ui-navigator/script.sh")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Execution);
}

#[cfg(unix)]
#[test]
fn run_script_captures_output() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let output = connector.run_script_with_parameters("/bin/echo", "hi").unwrap();
    assert_eq!(output.stdout, "hi\n");
    assert_eq!(output.stderr, "");
}

#[test]
fn debug_switch() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    connector.start_debug();
    assert!(connector.trace().is_debug());
    connector.stop_debug();
    assert!(!connector.trace().is_debug());
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn dispatch_parses_numeric_arguments() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let output = connector
        .dispatch(Command::WaitForElement, &Invocation::new(["/dialog", "1500"]))
        .unwrap();
    assert_eq!(output, CommandOutput::Flag(true));
    assert_eq!(log.borrow()[0], DriverRequest::exists("/dialog", 1500));
}

#[test]
fn dispatch_rejects_non_numeric_index() {
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector
        .dispatch(Command::SelectByIndex, &Invocation::new(["/combobox", "second"]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(log.borrow().is_empty());
}

#[test]
fn dispatch_checks_arity() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector
        .dispatch(Command::InputText, &Invocation::new(["/text"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid argument for input_text: expects 2 argument(s), got 1"
    );
}

#[test]
fn dispatch_rejects_location_outside_clicks() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let invocation = Invocation::new(["/text"]).with_location(Location { x: 1, y: 1 });
    assert!(connector.dispatch(Command::ClearText, &invocation).is_err());
}

#[test]
fn dispatch_returns_table_output() {
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let output = connector
        .dispatch(Command::GetTable, &Invocation::new(["/table"]))
        .unwrap();
    assert!(matches!(output, CommandOutput::Table(rows) if rows.len() == 2));
}

#[test]
fn dispatch_writes_trace_events() {
    let trace_path = fixture("dispatch_trace.jsonl", "");
    let (driver, _) = ScriptedDriver::accepting();
    let (connector, _) = build_connector(driver, FakeProcesses::default());
    let mut connector =
        connector.with_trace(TraceContext::new().with_file(trace_path.to_str().unwrap()));

    connector
        .dispatch(Command::ClickElement, &Invocation::new(["/button"]))
        .unwrap();
    connector
        .dispatch(Command::ClickElement, &Invocation::new(["/cedll"]))
        .unwrap_err();

    let content = std::fs::read_to_string(&trace_path).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["command"], "click_element");
    assert_eq!(events[0]["target"], "/button");
    assert_eq!(events[0]["outcome"], "ok");
    assert_eq!(events[1]["outcome"], "error");
    assert_eq!(events[1]["detail"], "unsupported element: cedll");
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn navigate_executes_every_step() {
    let model = fixture("connector_nav.yaml", LOGIN_MODEL);
    let repository = fixture("connector_nav.txt", LOGIN_REPOSITORY);
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let steps = connector
        .navigate(&model, "Start", "Settings", &repository, false)
        .unwrap();
    assert_eq!(steps, 3);
    assert_eq!(
        log.borrow().as_slice(),
        [
            DriverRequest::acquire(ElementKind::Button, "/form/button[@id='login']"),
            DriverRequest::click(HANDLE, MouseButton::Left, None),
            DriverRequest::send_keys("/form/text[@id='pw']", "{Enter}"),
            DriverRequest::acquire(ElementKind::MenuItem, "/menubar/menuitem[@text='Settings']"),
            DriverRequest::click(HANDLE, MouseButton::Left, Some(Location { x: 5, y: 5 })),
        ]
    );
}

#[test]
fn navigate_to_current_state_does_nothing() {
    let model = fixture("connector_nav_noop.yaml", LOGIN_MODEL);
    let repository = fixture("connector_nav_noop.txt", LOGIN_REPOSITORY);
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    assert_eq!(
        connector
            .navigate(&model, "Home", "Home", &repository, false)
            .unwrap(),
        0
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn navigate_stops_at_first_failure() {
    let model = fixture("connector_nav_fail.yaml", LOGIN_MODEL);
    let repository = fixture("connector_nav_fail.txt", LOGIN_REPOSITORY);
    let (driver, log) = ScriptedDriver::new(|request| match request {
        DriverRequest::SendKeys { .. } => Ok(DriverResponse::failure("keyboard locked")),
        other => accept_all(other),
    });
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector
        .navigate(&model, "Start", "Settings", &repository, false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Execution);
    // the settings step never ran
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn navigate_unreachable_runs_nothing() {
    let model = fixture("connector_nav_unreach.yaml", LOGIN_MODEL);
    let repository = fixture("connector_nav_unreach.txt", LOGIN_REPOSITORY);
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let err = connector
        .navigate(&model, "Settings", "Start", &repository, false)
        .unwrap_err();
    assert_eq!(err.to_string(), "unreachable state: Start from Settings");
    assert!(log.borrow().is_empty());
}

#[test]
fn force_reload_rereads_model() {
    let model = fixture("connector_reload.yaml", LOGIN_MODEL);
    let repository = fixture("connector_reload.txt", LOGIN_REPOSITORY);
    let (driver, _) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    connector
        .navigate(&model, "Start", "Login", &repository, false)
        .unwrap();
    std::fs::write(
        &model,
        "transitions: [{from: Start, to: Done, label: click_element(btn_login)}]",
    )
    .unwrap();

    assert!(
        connector
            .navigate(&model, "Start", "Done", &repository, false)
            .is_err()
    );
    assert_eq!(
        connector
            .navigate(&model, "Start", "Done", &repository, true)
            .unwrap(),
        1
    );
}

#[test]
fn plan_navigation_resolves_without_executing() {
    let model = fixture("connector_plan.yaml", LOGIN_MODEL);
    let repository = fixture("connector_plan.txt", LOGIN_REPOSITORY);
    let (driver, log) = ScriptedDriver::accepting();
    let (mut connector, _) = build_connector(driver, FakeProcesses::default());

    let actions = connector
        .plan_navigation(&model, "Start", "Home", Some(repository.as_path()))
        .unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1].descriptor.command, "send_keys");
    assert_eq!(actions[1].descriptor.locator, "/form/text[@id='pw']");
    assert!(log.borrow().is_empty());
}
