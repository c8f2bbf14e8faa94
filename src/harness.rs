// Benchmark Harness - the four-phase timing protocol
// Measures raw field-access cost before mocking, after mocking, and after the
// attempt to clear all mock state. The run is strictly linear: any collaborator
// failure aborts it; nothing is retried or masked, because the whole point is to
// observe the uncontrolled state.

use anyhow::{Context, Result};
use std::hint::black_box;
use std::time::Instant;
use tracing::debug;

use crate::environment::Environment;
use crate::registry::{ArgMatcher, InterceptionRegistry, MockedInterfaceMock, StubRegistry};
use crate::types::{
    ArgumentClass, EntityLabel, FieldProbe, PhaseLabel, ReturnClass, TimingSample,
};

/// Fixed cycle count for cross-phase comparability.
pub const DEFAULT_CYCLES: u32 = 10_000;

/// Linear run state. No branching, no cancellation: a run executes to completion
/// or aborts entirely on collaborator failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    BaselineMeasured,
    MockInstalled,
    PostMockMeasured,
    MockCleared,
    PostClearMeasured,
    Done,
}

/// All samples produced by one complete run, in protocol order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub samples: Vec<TimingSample>,
}

/// Orchestrates the timing protocol around the global interception-state change.
pub struct BenchmarkHarness<E: Environment> {
    environment: E,
    registry: StubRegistry,
    cycles: u32,
    state: RunState,
}

impl<E: Environment> BenchmarkHarness<E> {
    /// Harness with the protocol's fixed cycle count.
    pub fn new(environment: E) -> Self {
        Self::with_cycles(environment, DEFAULT_CYCLES)
    }

    /// Harness with an explicit per-run cycle count. A single run always uses one
    /// value across every phase; there is no per-phase override.
    pub fn with_cycles(environment: E, cycles: u32) -> Self {
        Self {
            environment,
            registry: StubRegistry::new(),
            cycles,
            state: RunState::Init,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Time `cycles` iterations of reading every field of `entity`.
    ///
    /// The reads go through `black_box` so the loop cannot be optimized away: the
    /// accessed values feed no observable computation, and the measured quantity is
    /// the raw cost of member access repeated `cycles` times on a monotonic clock.
    pub fn run_phase<P: FieldProbe>(
        &self,
        entity: &P,
        label: EntityLabel,
        phase: PhaseLabel,
    ) -> TimingSample {
        let start = Instant::now();
        for _ in 0..self.cycles {
            black_box(entity.first());
            black_box(entity.second());
        }
        TimingSample {
            entity: label,
            phase,
            duration: start.elapsed(),
            cycles: self.cycles,
        }
    }

    /// Register the total override on the capability: any argument produces the
    /// fixed `ReturnClass(10, 10)`. The side effect is global to the collaborator's
    /// registry, not limited to the mock instance.
    pub fn install_capability_mock(&self, mock: &MockedInterfaceMock) -> Result<()> {
        self.registry
            .register_stub(
                mock.capability_name(),
                ArgMatcher::Any,
                ReturnClass::new(10, 10),
            )
            .context("failed to install capability mock")
    }

    /// Unregister everything and discard recorded call state. Expected, but per the
    /// defect under demonstration not guaranteed, to restore unintercepted behavior.
    pub fn clear_all_mock_state(&self) -> Result<()> {
        self.registry
            .clear_all_registered_mocks()
            .context("failed to clear registered mocks")?;
        self.registry
            .reset_all_recorded_calls()
            .context("failed to reset recorded calls")
    }

    /// Execute the full protocol once, reporting each sample as it is produced.
    ///
    /// Sequence: fresh entities, baseline measurement for both, mock install,
    /// post-install measurement for both, global clear, fresh `ReturnClass`,
    /// post-clear measurement. Exactly five samples, strictly in this order.
    pub fn run(&mut self) -> Result<RunReport> {
        let mut samples = Vec::with_capacity(5);

        // Neither entity is mocked yet, as it should be.
        let a = ReturnClass::new(10, 10);
        let b = ArgumentClass::new(10, 10);

        samples.push(self.measure(&a, EntityLabel::ReturnClass, PhaseLabel::BeforeMock));
        samples.push(self.measure(&b, EntityLabel::ArgumentClass, PhaseLabel::BeforeMock));
        self.state = RunState::BaselineMeasured;

        let mock = self.registry.bind_mock();
        self.install_capability_mock(&mock)?;
        // Now ReturnClass is reachable from a mocked return path.
        self.state = RunState::MockInstalled;

        samples.push(self.measure(&a, EntityLabel::ReturnClass, PhaseLabel::AfterMock));
        samples.push(self.measure(&b, EntityLabel::ArgumentClass, PhaseLabel::AfterMock));
        self.state = RunState::PostMockMeasured;

        self.clear_all_mock_state()?;
        self.state = RunState::MockCleared;

        // Whether this fresh instance behaves like baseline is the open empirical
        // question the harness exists to surface.
        let a = ReturnClass::new(10, 10);
        samples.push(self.measure(&a, EntityLabel::ReturnClass, PhaseLabel::AfterClear));
        self.state = RunState::PostClearMeasured;

        self.state = RunState::Done;
        debug!(environment = self.environment.name(), "run complete");
        Ok(RunReport { samples })
    }

    fn measure<P: FieldProbe>(
        &self,
        entity: &P,
        label: EntityLabel,
        phase: PhaseLabel,
    ) -> TimingSample {
        let sample = self.run_phase(entity, label, phase);
        self.environment.report(&sample);
        sample
    }
}
