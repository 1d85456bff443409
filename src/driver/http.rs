use super::AutomationDriver;
use super::error::DriverError;
use super::protocol::{DriverRequest, DriverResponse};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11000/driver";

/// A driver reachable over HTTP: every request is POSTed as JSON and the
/// body of the reply is the response.
pub struct HttpDriver {
    pub endpoint: String,
    client: reqwest::blocking::Client,
}

impl Default for HttpDriver {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl HttpDriver {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl AutomationDriver for HttpDriver {
    fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, DriverError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| DriverError::Http(format!("{} to {}: {}", request.name(), self.endpoint, e)))?;

        response
            .json::<DriverResponse>()
            .map_err(|e| DriverError::Http(format!("invalid {} response: {}", request.name(), e)))
    }
}
