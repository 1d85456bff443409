pub mod error;
pub mod http;
pub mod process;
pub mod protocol;

use self::error::DriverError;
use self::protocol::{DriverRequest, DriverResponse};

/// The UI-automation backend that performs the actual clicks and keystrokes.
pub trait AutomationDriver {
    /// Send a request and read the response.
    fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, DriverError>;

    /// Send a request and verify the driver reported success.
    fn send_ok(&mut self, request: &DriverRequest) -> Result<DriverResponse, DriverError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(DriverError::Rejected {
                command: request.name().into(),
                error: response.error.unwrap_or_else(|| "unknown error".into()),
            });
        }
        Ok(response)
    }
}

impl<D: AutomationDriver + ?Sized> AutomationDriver for Box<D> {
    fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, DriverError> {
        (**self).send(request)
    }
}
