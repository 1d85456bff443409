use crate::driver::AutomationDriver;
use crate::driver::error::DriverError;
use crate::driver::protocol::{DriverRequest, ElementHandle};
use crate::element::element_kind::ElementKind;
use crate::element::type_resolver::resolve_kind;
use crate::error::{NavigatorError, Result};
use crate::trace::logger::TraceContext;

/// Acquisition attempts before an element is declared missing.
pub const MAX_ACQUIRE_ATTEMPTS: u32 = 3;

/// A live element the driver has handed out a handle for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedElement {
    pub kind: ElementKind,
    pub locator: String,
    pub handle: ElementHandle,
}

/// Resolve `locator` to a live element through the driver.
pub fn resolve_element(
    driver: &mut dyn AutomationDriver,
    locator: &str,
    trace: &TraceContext,
) -> Result<ResolvedElement> {
    acquire_with_retry(locator, trace, |kind, locator| {
        let response = driver.send_ok(&DriverRequest::acquire(kind, locator))?;
        response.handle.ok_or_else(|| DriverError::MissingField {
            command: "acquire".into(),
            field: "handle",
        })
    })
}

/// Classify `locator`, then call `acquire` until it yields a handle.
///
/// An invalid locator fails at once. Acquisition failures are taken to be
/// rendering races and retried immediately, [`MAX_ACQUIRE_ATTEMPTS`] times
/// in total.
pub fn acquire_with_retry<F>(
    locator: &str,
    trace: &TraceContext,
    mut acquire: F,
) -> Result<ResolvedElement>
where
    F: FnMut(ElementKind, &str) -> std::result::Result<ElementHandle, DriverError>,
{
    let kind = resolve_kind(locator)?;

    for attempt in 1..=MAX_ACQUIRE_ATTEMPTS {
        match acquire(kind, locator) {
            Ok(handle) => {
                trace.debug(format_args!("element {} at {} is {:?}", kind, locator, handle));
                return Ok(ResolvedElement {
                    kind,
                    locator: locator.to_string(),
                    handle,
                });
            }
            Err(e) => {
                tracing::warn!(%kind, locator, attempt, error = %e, "element not acquired");
            }
        }
    }

    Err(NavigatorError::ElementNotFound {
        kind,
        locator: locator.to_string(),
        attempts: MAX_ACQUIRE_ATTEMPTS,
    })
}
