// Harness Protocol Tests
// End-to-end coverage of the four-phase timing protocol. The harness is
// observational: these tests assert that labeled, positive durations are produced
// in protocol order, never that any phase meets a timing threshold.

use anyhow::Result;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use mockslow::{
    ArgumentClass, BenchmarkHarness, CapturingEnvironment, EntityLabel, FieldProbe,
    HarnessBuilder, PhaseLabel, ReturnClass, RunState, StubRegistry,
};

// The stub registry is process-global; tests in this binary take the lock so
// their install/clear sequences do not interleave.
static REGISTRY_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

// Keep test runtimes small; the protocol is cycle-count-agnostic as long as one
// value is used for the whole run.
const TEST_CYCLES: u32 = 1_000;

fn test_harness() -> BenchmarkHarness<CapturingEnvironment> {
    HarnessBuilder::new()
        .environment(CapturingEnvironment::new())
        .cycles(TEST_CYCLES)
        .build()
        .expect("test harness construction")
}

#[test]
fn baseline_phase_produces_positive_durations_for_both_entities() {
    let harness = test_harness();
    let a = ReturnClass::new(10, 10);
    let b = ArgumentClass::new(10, 10);

    let sample_a = harness.run_phase(&a, EntityLabel::ReturnClass, PhaseLabel::BeforeMock);
    let sample_b = harness.run_phase(&b, EntityLabel::ArgumentClass, PhaseLabel::BeforeMock);

    assert!(sample_a.duration.as_nanos() > 0);
    assert!(sample_b.duration.as_nanos() > 0);
    assert_eq!(sample_a.cycles, TEST_CYCLES);
    assert_eq!(sample_b.cycles, TEST_CYCLES);
}

#[test]
fn measurement_after_install_still_produces_positive_durations() -> Result<()> {
    let _guard = REGISTRY_LOCK.lock();
    let harness = test_harness();
    let registry = StubRegistry::new();

    let a = ReturnClass::new(10, 10);
    let b = ArgumentClass::new(10, 10);

    let mock = registry.bind_mock();
    harness.install_capability_mock(&mock)?;

    // Whether ArgumentClass now measures slower than baseline is the open
    // empirical question; only the existence of a measurement is asserted.
    let sample_a = harness.run_phase(&a, EntityLabel::ReturnClass, PhaseLabel::AfterMock);
    let sample_b = harness.run_phase(&b, EntityLabel::ArgumentClass, PhaseLabel::AfterMock);
    assert!(sample_a.duration.as_nanos() > 0);
    assert!(sample_b.duration.as_nanos() > 0);

    harness.clear_all_mock_state()?;
    Ok(())
}

#[test]
fn fresh_return_entity_is_usable_after_install_then_clear() -> Result<()> {
    let _guard = REGISTRY_LOCK.lock();
    let harness = test_harness();
    let registry = StubRegistry::new();

    let mock = registry.bind_mock();
    harness.install_capability_mock(&mock)?;
    harness.clear_all_mock_state()?;

    // No proxy artifact may leak into normal object lifecycle.
    let a = ReturnClass::new(10, 10);
    assert_eq!(a.first(), 10);
    assert_eq!(a.second(), 10);

    let sample = harness.run_phase(&a, EntityLabel::ReturnClass, PhaseLabel::AfterClear);
    assert!(sample.duration.as_nanos() > 0);
    Ok(())
}

#[test]
fn clearing_all_mock_state_is_idempotent() -> Result<()> {
    let _guard = REGISTRY_LOCK.lock();
    let harness = test_harness();

    harness.clear_all_mock_state()?;
    harness.clear_all_mock_state()?;
    Ok(())
}

#[test]
fn full_run_emits_five_samples_in_protocol_order() -> Result<()> {
    let _guard = REGISTRY_LOCK.lock();
    let mut harness = test_harness();

    let report = harness.run()?;
    assert_eq!(harness.state(), RunState::Done);

    let expected = [
        (EntityLabel::ReturnClass, PhaseLabel::BeforeMock),
        (EntityLabel::ArgumentClass, PhaseLabel::BeforeMock),
        (EntityLabel::ReturnClass, PhaseLabel::AfterMock),
        (EntityLabel::ArgumentClass, PhaseLabel::AfterMock),
        (EntityLabel::ReturnClass, PhaseLabel::AfterClear),
    ];
    let actual: Vec<_> = report
        .samples
        .iter()
        .map(|s| (s.entity, s.phase))
        .collect();
    assert_eq!(actual, expected.to_vec());

    for sample in &report.samples {
        assert!(sample.duration.as_nanos() > 0);
        assert_eq!(sample.cycles, TEST_CYCLES);
    }

    // Every sample was reported through the environment as it was produced.
    assert_eq!(harness.environment().samples(), report.samples);
    Ok(())
}

#[test]
fn report_lines_carry_entity_and_phase_labels() -> Result<()> {
    let _guard = REGISTRY_LOCK.lock();
    let mut harness = test_harness();

    let report = harness.run()?;
    let lines: Vec<_> = report.samples.iter().map(|s| s.report_line()).collect();

    assert!(lines[0].starts_with("Testing ReturnClass before mocking took "));
    assert!(lines[1].starts_with("Testing ArgumentClass before mocking took "));
    assert!(lines[2].starts_with("Testing ReturnClass after mocking took "));
    assert!(lines[3].starts_with("Testing ArgumentClass after mocking took "));
    assert!(lines[4].starts_with("Testing ReturnClass after attempt to clear mocking took "));

    for (line, sample) in lines.iter().zip(&report.samples) {
        assert!(line.ends_with(&sample.duration.as_nanos().to_string()));
    }
    Ok(())
}

#[test]
fn consecutive_runs_start_from_a_clean_registry() -> Result<()> {
    let _guard = REGISTRY_LOCK.lock();

    let mut first = test_harness();
    first.run()?;

    // The previous run's teardown cleared global state; a second run must not
    // observe leftover registration.
    let mut second = test_harness();
    let report = second.run()?;
    assert_eq!(report.samples.len(), 5);
    assert_eq!(second.state(), RunState::Done);
    Ok(())
}
