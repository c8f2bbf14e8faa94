// Interception Registry - the collaborator boundary
// The harness never reaches into mocking internals; it consumes the collaborator
// through two narrow contracts: register a stub for a named capability, and clear
// all interception state. Side effects are global and capability-type-scoped.
//
// The original's reflection-based mock-target discovery is replaced here by
// explicit, type-safe binding: `StubRegistry::bind_mock` constructs the mock
// instance directly, so there is no runtime field scanning to fail.

use anyhow::Result;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::types::{ArgumentClass, MockedInterface, ReturnClass};

/// Name of the single capability this harness intercepts.
pub const MOCKED_INTERFACE: &str = "MockedInterface";

// Process-wide interception state. The registry owns all synchronization; callers
// treat it as a single critical resource mutated by register/clear operations.
static BOUND_TARGETS: Lazy<DashMap<&'static str, ()>> = Lazy::new(DashMap::new);
static REGISTERED_STUBS: Lazy<DashMap<&'static str, StubEntry>> = Lazy::new(DashMap::new);
static RECORDED_CALLS: Lazy<Mutex<Vec<RecordedCall>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Errors at the registry boundary. These are fatal to a run and propagate
/// unmodified; the harness performs no retries.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("capability '{0}' has no bound mock target; bind a mock before registering stubs")]
    TargetNotBound(&'static str),
}

/// Argument matcher for a registered stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgMatcher {
    /// Matches every invocation regardless of argument.
    Any,
    /// Matches only the structurally equal argument.
    Exact(ArgumentClass),
}

impl ArgMatcher {
    pub fn matches(&self, arg: &ArgumentClass) -> bool {
        match self {
            ArgMatcher::Any => true,
            ArgMatcher::Exact(expected) => expected == arg,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StubEntry {
    matcher: ArgMatcher,
    value: ReturnClass,
}

/// One observed invocation of a mocked capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedCall {
    pub capability: &'static str,
    pub argument: ArgumentClass,
}

/// The narrow contract the harness consumes from the interception collaborator.
pub trait InterceptionRegistry {
    /// Install a global override: calls to `capability` matching `matcher` produce
    /// `value` instead of running original logic. Type-scoped, not instance-scoped.
    fn register_stub(
        &self,
        capability: &'static str,
        matcher: ArgMatcher,
        value: ReturnClass,
    ) -> Result<()>;

    /// Unregister every mock in the process. Idempotent.
    fn clear_all_registered_mocks(&self) -> Result<()>;

    /// Discard every recorded invocation. Idempotent.
    fn reset_all_recorded_calls(&self) -> Result<()>;
}

/// In-process implementation of the interception collaborator.
///
/// All state lives in process-wide tables, mirroring the global registry of the
/// mocking engines this harness exists to diagnose.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubRegistry;

impl StubRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Construct and bind a mock instance for the capability.
    ///
    /// Binding must precede stub registration; registering against an unbound
    /// capability is the "target not a valid mock" failure class.
    pub fn bind_mock(&self) -> MockedInterfaceMock {
        BOUND_TARGETS.insert(MOCKED_INTERFACE, ());
        debug!(capability = MOCKED_INTERFACE, "bound mock target");
        MockedInterfaceMock {
            capability: MOCKED_INTERFACE,
        }
    }

    /// Snapshot of every recorded mock invocation, in call order.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        RECORDED_CALLS.lock().clone()
    }
}

impl InterceptionRegistry for StubRegistry {
    fn register_stub(
        &self,
        capability: &'static str,
        matcher: ArgMatcher,
        value: ReturnClass,
    ) -> Result<()> {
        if !BOUND_TARGETS.contains_key(capability) {
            return Err(RegistryError::TargetNotBound(capability).into());
        }
        REGISTERED_STUBS.insert(capability, StubEntry { matcher, value });
        debug!(capability, ?matcher, "registered stub");
        Ok(())
    }

    fn clear_all_registered_mocks(&self) -> Result<()> {
        REGISTERED_STUBS.clear();
        BOUND_TARGETS.clear();
        debug!("cleared all registered mocks");
        Ok(())
    }

    fn reset_all_recorded_calls(&self) -> Result<()> {
        RECORDED_CALLS.lock().clear();
        debug!("reset all recorded calls");
        Ok(())
    }
}

/// A bound mock instance of the capability.
///
/// Strict-mock semantics: an invocation with no matching stub is a contract
/// violation and panics with the capability name, mirroring the collaborator's
/// native failure. The harness itself never invokes the capability during
/// measurement, so this path is only reachable from code exercising the mock.
#[derive(Debug, Clone, Copy)]
pub struct MockedInterfaceMock {
    capability: &'static str,
}

impl MockedInterfaceMock {
    pub fn capability_name(&self) -> &'static str {
        self.capability
    }
}

impl MockedInterface for MockedInterfaceMock {
    fn function(&self, arg: ArgumentClass) -> ReturnClass {
        RECORDED_CALLS.lock().push(RecordedCall {
            capability: self.capability,
            argument: arg,
        });
        match REGISTERED_STUBS.get(self.capability) {
            Some(entry) if entry.matcher.matches(&arg) => entry.value,
            _ => panic!(
                "no matching stub registered for {}::function({:?})",
                self.capability, arg
            ),
        }
    }
}
