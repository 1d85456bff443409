use std::path::Path;

use crate::action::descriptor::{ActionDescriptor, SecondaryArg};
use crate::action::executor::describe_plan;
use crate::cli::config::{AppConfig, DriverConfig, DriverKind};
use crate::connector::connector::Connector;
use crate::driver::AutomationDriver;
use crate::driver::error::DriverError;
use crate::driver::http::HttpDriver;
use crate::driver::process::ProcessDriver;
use crate::element::element_kind::ElementKind;
use crate::element::type_resolver::resolve_kind;
use crate::navigation::planner::plan_path;
use crate::navigation::session::NavigationSession;
use crate::repository::store::Repository;
use crate::trace::logger::TraceContext;
use crate::wait::poller::WaitPoller;

// ============================================================================
// plan subcommand
// ============================================================================

/// Print the route from `from` to `to` with every label resolved.
pub fn cmd_plan(
    model: &str,
    from: &str,
    to: &str,
    repository: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = NavigationSession::new();
    let plan = plan_path(session.model(Path::new(model))?, from, to)?;
    let fingerprint = session
        .loaded()
        .map(|loaded| loaded.fingerprint.clone())
        .unwrap_or_default();

    let repository = match repository {
        Some(path) => session.repository(Path::new(path))?.clone(),
        None => Repository::new(),
    };
    let actions = describe_plan(&plan, &repository)?;

    println!(
        "{} -> {}: {} step(s) (model {})",
        plan.start,
        plan.finish,
        plan.len(),
        short_fingerprint(&fingerprint)
    );
    for (i, action) in actions.iter().enumerate() {
        println!(
            "  {}. {} -> {}  {}",
            i + 1,
            action.step.from,
            action.step.to,
            action.step.label
        );
        println!("       {}", format_descriptor(&action.descriptor));
    }

    Ok(())
}

// ============================================================================
// navigate subcommand
// ============================================================================

/// Drive the application along the planned route. Returns the number of
/// transitions executed.
pub fn cmd_navigate(
    config: &AppConfig,
    trace: TraceContext,
    model: &str,
    from: &str,
    to: &str,
    repository: &str,
    force_reload: bool,
) -> Result<usize, Box<dyn std::error::Error>> {
    let driver = build_driver(&config.driver)?;
    let mut connector = Connector::new(driver)
        .with_poller(WaitPoller::new(config.wait.poll_interval_secs))
        .with_trace(trace);

    let steps = connector.navigate(
        Path::new(model),
        from,
        to,
        Path::new(repository),
        force_reload,
    )?;

    println!("Reached {} from {} in {} step(s)", to, from, steps);
    Ok(steps)
}

// ============================================================================
// kind subcommand
// ============================================================================

pub fn cmd_kind(locator: &str) -> Result<ElementKind, Box<dyn std::error::Error>> {
    let kind = resolve_kind(locator)?;
    let caps = kind.capabilities();
    println!(
        "{} (toggle: {}, select: {}, table: {})",
        kind, caps.toggle, caps.select, caps.table
    );
    Ok(kind)
}

// ============================================================================
// Helpers
// ============================================================================

/// Connect to the automation driver named in the config.
pub fn build_driver(config: &DriverConfig) -> Result<Box<dyn AutomationDriver>, DriverError> {
    match config.kind {
        DriverKind::Process => {
            let driver = ProcessDriver::launch(&config.program, &config.args)?;
            Ok(Box::new(driver))
        }
        DriverKind::Http => Ok(Box::new(HttpDriver::new(&config.endpoint))),
    }
}

/// Trace context from CLI flags, falling back to the config file.
pub fn build_trace(config: &AppConfig, trace_file: Option<&str>, debug: bool) -> TraceContext {
    let mut trace = TraceContext::new().with_debug(debug || config.trace.debug);
    if let Some(path) = trace_file.or(config.trace.path.as_deref()) {
        trace = trace.with_file(path);
    }
    trace
}

pub fn format_descriptor(descriptor: &ActionDescriptor) -> String {
    match &descriptor.secondary {
        None => format!("{} {}", descriptor.command, descriptor.locator),
        Some(SecondaryArg::KeySequence(keys)) => {
            format!("{} {} keys={}", descriptor.command, descriptor.locator, keys)
        }
        Some(SecondaryArg::Location(location)) => {
            format!(
                "{} {} location={}",
                descriptor.command, descriptor.locator, location
            )
        }
    }
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}
