use std::path::PathBuf;

use ui_navigator::connector::connector::Connector;
use ui_navigator::wait::poller::WaitPoller;

use super::fakes::{FakeProcesses, FakeSleeper, ScriptedDriver};

/// Write `contents` to a per-process temp file and return its path.
pub fn fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ui-navigator-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

/// Connector over a scripted driver that never really sleeps.
pub fn build_connector(driver: ScriptedDriver, processes: FakeProcesses) -> (Connector, FakeSleeper) {
    let sleeper = FakeSleeper::default();
    let connector = Connector::new(Box::new(driver))
        .with_process_control(Box::new(processes))
        .with_poller(WaitPoller::with_sleeper(1, Box::new(sleeper.clone())));
    (connector, sleeper)
}

pub const LOGIN_MODEL: &str = r#"
name: login
transitions:
  - from: Start
    to: Login
    label: click_element(btn_login)
  - from: Login
    to: Home
    label: send_keys(txt_password, {Enter})
  - from: Home
    to: Settings
    label: click_element(menu_settings, location='5,5')
"#;

pub const LOGIN_REPOSITORY: &str = "\
btn_login = /form/button[@id='login']
txt_password = /form/text[@id='pw']
menu_settings = /menubar/menuitem[@text='Settings']
";
