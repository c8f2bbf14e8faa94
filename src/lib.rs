// Mockslow - a minimal mock-contamination regression demonstration
// Root library module

pub mod builders;
pub mod environment;
pub mod harness;
pub mod observability;
pub mod registry;
pub mod types;

// Re-export key types
pub use observability::{
    init_logging, init_logging_with_level, metrics_recorded, record_metric, MetricType,
};

pub use types::{
    ArgumentClass, EntityLabel, FieldProbe, MockedInterface, PhaseLabel, ReturnClass,
    TimingSample,
};

pub use registry::{
    ArgMatcher, InterceptionRegistry, MockedInterfaceMock, RecordedCall, RegistryError,
    StubRegistry, MOCKED_INTERFACE,
};

pub use harness::{BenchmarkHarness, RunReport, RunState, DEFAULT_CYCLES};

pub use environment::{
    CapturingEnvironment, ConsoleEnvironment, Environment, JsonLinesEnvironment,
    TracingEnvironment,
};

pub use builders::HarnessBuilder;
