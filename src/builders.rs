// Builder Patterns
// Fluent construction for the harness with sensible defaults and validation at
// build time.

use anyhow::{ensure, Result};

use crate::environment::{ConsoleEnvironment, Environment};
use crate::harness::{BenchmarkHarness, DEFAULT_CYCLES};

/// Fluent builder for a [`BenchmarkHarness`].
///
/// Defaults to the console environment and the protocol's fixed cycle count of
/// 10,000. Tests may lower the cycle count; a built harness still uses a single
/// value across every phase of a run.
pub struct HarnessBuilder<E: Environment> {
    environment: E,
    cycles: Option<u32>,
}

impl HarnessBuilder<ConsoleEnvironment> {
    pub fn new() -> Self {
        Self {
            environment: ConsoleEnvironment,
            cycles: None,
        }
    }
}

impl Default for HarnessBuilder<ConsoleEnvironment> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> HarnessBuilder<E> {
    /// Replace the reporting environment.
    pub fn environment<E2: Environment>(self, environment: E2) -> HarnessBuilder<E2> {
        HarnessBuilder {
            environment,
            cycles: self.cycles,
        }
    }

    /// Override the per-run cycle count.
    pub fn cycles(mut self, cycles: u32) -> Self {
        self.cycles = Some(cycles);
        self
    }

    /// Validate and construct the harness.
    pub fn build(self) -> Result<BenchmarkHarness<E>> {
        let cycles = self.cycles.unwrap_or(DEFAULT_CYCLES);
        ensure!(cycles > 0, "cycle count must be positive, got {cycles}");
        Ok(BenchmarkHarness::with_cycles(self.environment, cycles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::RunState;

    #[test]
    fn builds_with_protocol_defaults() {
        let harness = HarnessBuilder::new().build().unwrap();
        assert_eq!(harness.cycles(), DEFAULT_CYCLES);
        assert_eq!(harness.state(), RunState::Init);
    }

    #[test]
    fn rejects_zero_cycles() {
        assert!(HarnessBuilder::new().cycles(0).build().is_err());
    }

    #[test]
    fn accepts_cycle_override() {
        let harness = HarnessBuilder::new().cycles(100).build().unwrap();
        assert_eq!(harness.cycles(), 100);
    }
}
