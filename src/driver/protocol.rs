use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::element_kind::ElementKind;

/// Opaque id the driver hands out for an acquired element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
}

/// Click offset from an element's top-left corner, written `"x,y"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("location must be 'x,y', got '{}'", s))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| format!("location must be 'x,y', got '{}'", s))
        };
        Ok(Location {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Request sent to the automation driver (one JSON line).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DriverRequest {
    Acquire {
        kind: ElementKind,
        locator: String,
    },
    Click {
        handle: ElementHandle,
        button: MouseButton,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    DoubleClick {
        handle: ElementHandle,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    PressKeys {
        handle: ElementHandle,
        keys: String,
    },
    Focus {
        handle: ElementHandle,
    },
    Attribute {
        handle: ElementHandle,
        name: String,
    },
    Table {
        handle: ElementHandle,
    },
    Scroll {
        handle: ElementHandle,
        amount: i32,
    },
    Capture {
        handle: ElementHandle,
    },
    /// Focus whatever `locator` points at, then press `keys`
    SendKeys {
        locator: String,
        keys: String,
    },
    Exists {
        locator: String,
        timeout_ms: u64,
    },
    RunApplication {
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        args: Option<String>,
    },
    Quit,
}

impl DriverRequest {
    pub fn acquire(kind: ElementKind, locator: &str) -> Self {
        DriverRequest::Acquire {
            kind,
            locator: locator.to_string(),
        }
    }

    pub fn click(handle: ElementHandle, button: MouseButton, location: Option<Location>) -> Self {
        DriverRequest::Click {
            handle,
            button,
            location,
        }
    }

    pub fn press_keys(handle: ElementHandle, keys: &str) -> Self {
        DriverRequest::PressKeys {
            handle,
            keys: keys.to_string(),
        }
    }

    pub fn attribute(handle: ElementHandle, name: &str) -> Self {
        DriverRequest::Attribute {
            handle,
            name: name.to_string(),
        }
    }

    pub fn send_keys(locator: &str, keys: &str) -> Self {
        DriverRequest::SendKeys {
            locator: locator.to_string(),
            keys: keys.to_string(),
        }
    }

    pub fn exists(locator: &str, timeout_ms: u64) -> Self {
        DriverRequest::Exists {
            locator: locator.to_string(),
            timeout_ms,
        }
    }

    pub fn run_application(path: &str, args: Option<&str>) -> Self {
        DriverRequest::RunApplication {
            path: path.to_string(),
            args: args.map(str::to_string),
        }
    }

    /// Wire name of the request, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DriverRequest::Acquire { .. } => "acquire",
            DriverRequest::Click { .. } => "click",
            DriverRequest::DoubleClick { .. } => "double_click",
            DriverRequest::PressKeys { .. } => "press_keys",
            DriverRequest::Focus { .. } => "focus",
            DriverRequest::Attribute { .. } => "attribute",
            DriverRequest::Table { .. } => "table",
            DriverRequest::Scroll { .. } => "scroll",
            DriverRequest::Capture { .. } => "capture",
            DriverRequest::SendKeys { .. } => "send_keys",
            DriverRequest::Exists { .. } => "exists",
            DriverRequest::RunApplication { .. } => "run_application",
            DriverRequest::Quit => "quit",
        }
    }
}

/// Response received from the automation driver (one JSON line).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<ElementHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

impl DriverResponse {
    pub fn success() -> Self {
        DriverResponse {
            ok: true,
            ..Default::default()
        }
    }

    pub fn failure(error: &str) -> Self {
        DriverResponse {
            ok: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }

    pub fn with_handle(mut self, handle: u64) -> Self {
        self.handle = Some(ElementHandle(handle));
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}
