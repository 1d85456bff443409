use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::Serialize;

use crate::action::descriptor::{ActionDescriptor, SecondaryArg};
use crate::connector::process::ScriptOutput;
use crate::driver::protocol::Location;
use crate::error::NavigatorError;

macro_rules! commands {
    ($( $variant:ident => $name:literal, )+) => {
        /// Every operation the command surface exposes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Command {
            $( $variant, )+
        }

        impl Command {
            pub const ALL: &'static [Command] = &[ $( Command::$variant, )+ ];

            pub fn name(self) -> &'static str {
                match self {
                    $( Command::$variant => $name, )+
                }
            }
        }
    };
}

commands! {
    ClickElement => "click_element",
    DoubleClickElement => "double_click_element",
    RightClickElement => "right_click_element",
    Check => "check",
    Uncheck => "uncheck",
    ClearText => "clear_text",
    InputText => "input_text",
    SelectByIndex => "select_by_index",
    SendKeys => "send_keys",
    SetFocus => "set_focus",
    GetElementAttribute => "get_element_attribute",
    GetTable => "get_table",
    Scroll => "scroll",
    TakeScreenshot => "take_screenshot",
    WaitForElement => "wait_for_element",
    WaitForElementAttribute => "wait_for_element_attribute",
    WaitForProcessToStart => "wait_for_process_to_start",
    CheckIfProcessIsRunning => "check_if_process_is_running",
    KillProcess => "kill_process",
    RunApplication => "run_application",
    RunApplicationWithParameters => "run_application_with_parameters",
    RunScript => "run_script",
    RunScriptWithParameters => "run_script_with_parameters",
    StartDebug => "start_debug",
    StopDebug => "stop_debug",
    Navigate => "navigate",
}

impl Command {
    pub fn from_name(name: &str) -> Result<Command, NavigatorError> {
        Command::ALL
            .iter()
            .copied()
            .find(|command| command.name() == name)
            .ok_or_else(|| NavigatorError::UnknownCommand(name.to_string()))
    }

    /// Whether an edge label may name this command.
    ///
    /// Navigation cannot recurse into another navigation.
    pub fn is_transition_action(self) -> bool {
        !matches!(self, Command::Navigate)
    }

    /// Accepted number of positional arguments.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Command::StartDebug | Command::StopDebug => 0..=0,
            Command::ClickElement
            | Command::DoubleClickElement
            | Command::RightClickElement
            | Command::Check
            | Command::Uncheck
            | Command::ClearText
            | Command::SetFocus
            | Command::GetTable
            | Command::TakeScreenshot
            | Command::CheckIfProcessIsRunning
            | Command::KillProcess
            | Command::RunApplication
            | Command::RunScript => 1..=1,
            Command::InputText
            | Command::SelectByIndex
            | Command::SendKeys
            | Command::GetElementAttribute
            | Command::Scroll
            | Command::WaitForElement
            | Command::WaitForProcessToStart
            | Command::RunApplicationWithParameters
            | Command::RunScriptWithParameters => 2..=2,
            Command::WaitForElementAttribute => 4..=4,
            // model, start, finish, repository, force_reload
            Command::Navigate => 4..=5,
        }
    }

    /// Only the click family takes a `location=` offset.
    pub fn accepts_location(self) -> bool {
        matches!(
            self,
            Command::ClickElement | Command::DoubleClickElement | Command::RightClickElement
        )
    }
}

impl FromStr for Command {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::from_name(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Positional arguments plus the optional `location=` keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub location: Option<Location>,
}

impl Invocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// `command(locator)`, `command(locator, keys)` or
    /// `command(locator, location=x,y)`.
    pub fn from_descriptor(descriptor: &ActionDescriptor) -> Self {
        let locator = descriptor.locator.clone();
        match &descriptor.secondary {
            None => Invocation::new([locator]),
            Some(SecondaryArg::KeySequence(keys)) => Invocation::new([locator, keys.clone()]),
            Some(SecondaryArg::Location(location)) => {
                Invocation::new([locator]).with_location(*location)
            }
        }
    }
}

/// What a command hands back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Flag(bool),
    Text(String),
    Table(Vec<Vec<String>>),
    Script(ScriptOutput),
}

impl CommandOutput {
    /// Only an explicit `false` counts as failure.
    pub fn is_success(&self) -> bool {
        !matches!(self, CommandOutput::Flag(false))
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Flag(flag) => write!(f, "{}", flag),
            CommandOutput::Text(text) => f.write_str(text),
            CommandOutput::Table(rows) => {
                for row in rows {
                    writeln!(f, "{}", row.join("\t"))?;
                }
                Ok(())
            }
            CommandOutput::Script(output) => {
                write!(f, "stdout:\n{}\nstderr:\n{}", output.stdout, output.stderr)
            }
        }
    }
}
