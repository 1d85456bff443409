use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use serde_json::Value;
use ui_navigator::connector::process::ProcessControl;
use ui_navigator::driver::AutomationDriver;
use ui_navigator::driver::error::DriverError;
use ui_navigator::driver::protocol::{DriverRequest, DriverResponse};
use ui_navigator::error::Result;
use ui_navigator::wait::poller::Sleeper;

pub type RequestLog = Rc<RefCell<Vec<DriverRequest>>>;

type Responder = Box<dyn FnMut(&DriverRequest) -> std::result::Result<DriverResponse, DriverError>>;

/// In-memory driver answering from a closure and logging every request.
pub struct ScriptedDriver {
    respond: Responder,
    log: RequestLog,
}

impl ScriptedDriver {
    pub fn new<F>(respond: F) -> (Self, RequestLog)
    where
        F: FnMut(&DriverRequest) -> std::result::Result<DriverResponse, DriverError> + 'static,
    {
        let log = RequestLog::default();
        let driver = ScriptedDriver {
            respond: Box::new(respond),
            log: Rc::clone(&log),
        };
        (driver, log)
    }

    /// A driver that accepts everything, see [`accept_all`].
    pub fn accepting() -> (Self, RequestLog) {
        Self::new(accept_all)
    }
}

impl AutomationDriver for ScriptedDriver {
    fn send(&mut self, request: &DriverRequest) -> std::result::Result<DriverResponse, DriverError> {
        self.log.borrow_mut().push(request.clone());
        (self.respond)(request)
    }
}

/// Every element exists, is focused and has empty attributes.
pub fn accept_all(request: &DriverRequest) -> std::result::Result<DriverResponse, DriverError> {
    let response = DriverResponse::success();
    Ok(match request {
        DriverRequest::Acquire { .. } => response.with_handle(7),
        DriverRequest::Attribute { .. } => response.with_value(Value::Null),
        DriverRequest::Focus { .. } => DriverResponse {
            focused: Some(true),
            ..response
        },
        DriverRequest::Exists { .. } => DriverResponse {
            exists: Some(true),
            ..response
        },
        DriverRequest::Table { .. } => DriverResponse {
            rows: Some(vec![
                vec!["id".into(), "name".into()],
                vec!["1".into(), "Ada".into()],
            ]),
            ..response
        },
        DriverRequest::Capture { .. } => DriverResponse {
            image: Some("aW1n".into()),
            ..response
        },
        _ => response,
    })
}

/// Records requested sleeps instead of blocking.
#[derive(Clone, Default)]
pub struct FakeSleeper {
    pub slept: Rc<RefCell<Vec<Duration>>>,
}

impl Sleeper for FakeSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

/// Process table with a fixed set of names.
#[derive(Default)]
pub struct FakeProcesses {
    pub running: Vec<String>,
    /// `is_running` reports false this many times before looking at `running`
    pub hidden_checks: Cell<u32>,
    pub refuse_kill: bool,
    pub killed: Rc<RefCell<Vec<String>>>,
}

impl FakeProcesses {
    pub fn running(names: &[&str]) -> Self {
        Self {
            running: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl ProcessControl for FakeProcesses {
    fn is_running(&self, name: &str) -> Result<bool> {
        let hidden = self.hidden_checks.get();
        if hidden > 0 {
            self.hidden_checks.set(hidden - 1);
            return Ok(false);
        }
        Ok(self.running.iter().any(|p| p.contains(name)))
    }

    fn kill(&self, name: &str) -> Result<bool> {
        if self.refuse_kill {
            return Ok(false);
        }
        self.killed.borrow_mut().push(name.to_string());
        Ok(true)
    }
}
