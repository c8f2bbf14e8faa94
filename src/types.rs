// Fixture Types - value entities, capability seam, and timing sample
// These types carry no hidden state: two integers in, two integers stored,
// structural equality throughout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The entity produced by the mocked capability's return path.
///
/// This is the positive probe: it is never mocked directly, but because it is the
/// return type of a mocked method, its field-access cost is expected to change once
/// the capability stub is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReturnClass {
    pub first: i32,
    pub second: i32,
}

impl ReturnClass {
    /// Create a new instance; the fields are stored verbatim.
    pub fn new(first: i32, second: i32) -> Self {
        Self { first, second }
    }
}

/// The entity only ever passed *into* the mocked capability.
///
/// This is the negative control: it is structurally unrelated to the mocked
/// capability's return path, so its field-access cost must be phase-invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgumentClass {
    pub first: i32,
    pub second: i32,
}

impl ArgumentClass {
    /// Create a new instance; the fields are stored verbatim.
    pub fn new(first: i32, second: i32) -> Self {
        Self { first, second }
    }
}

/// The only capability under interception.
///
/// Never invoked during measurement; only its existence as a mock matters for the
/// contamination effect the harness demonstrates.
pub trait MockedInterface: Send + Sync {
    fn function(&self, arg: ArgumentClass) -> ReturnClass;
}

/// Accessor seam for the timing loop.
///
/// Both fixture entities expose their two fields through this trait so a single
/// `run_phase` loop serves both without duplicating the measurement code.
pub trait FieldProbe {
    fn first(&self) -> i32;
    fn second(&self) -> i32;
}

impl FieldProbe for ReturnClass {
    fn first(&self) -> i32 {
        self.first
    }

    fn second(&self) -> i32 {
        self.second
    }
}

impl FieldProbe for ArgumentClass {
    fn first(&self) -> i32 {
        self.first
    }

    fn second(&self) -> i32 {
        self.second
    }
}

/// Which entity a timing sample measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    ReturnClass,
    ArgumentClass,
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::ReturnClass => write!(f, "ReturnClass"),
            EntityLabel::ArgumentClass => write!(f, "ArgumentClass"),
        }
    }
}

/// Which phase of the protocol a timing sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseLabel {
    BeforeMock,
    AfterMock,
    AfterClear,
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseLabel::BeforeMock => write!(f, "before mocking"),
            PhaseLabel::AfterMock => write!(f, "after mocking"),
            PhaseLabel::AfterClear => write!(f, "after attempt to clear mocking"),
        }
    }
}

/// One labeled timing measurement, produced per phase and reported immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSample {
    pub entity: EntityLabel,
    pub phase: PhaseLabel,
    pub duration: Duration,
    pub cycles: u32,
}

impl TimingSample {
    /// The line-oriented report format, one line per measured phase.
    pub fn report_line(&self) -> String {
        format!(
            "Testing {} {} took {}",
            self.entity,
            self.phase,
            self.duration.as_nanos()
        )
    }
}
