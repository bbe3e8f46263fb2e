use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How hard a violation should weigh in the caller's accept/reject decision.
/// Any violation at all makes a result invalid; severity is for triage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational-grade breach
    Low,
    /// Worth investigating
    Medium,
    /// Strong evidence of a broken or tampered pack
    High,
    /// Unambiguous integrity failure
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Machine-readable category of a violation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Same pack content resubmitted inside the duplicate-cache window
    DuplicatePackDetected,
    /// Card rarity inconsistent with its declared slot rule
    InvalidRarityDistribution,
    /// Rarity combination that the declared process cannot plausibly produce
    ImpossiblePack,
    /// Rarity score far outside the observed population
    StatisticalAnomaly,
    /// Repeated card identities inside a single pack
    LowEntropy,
    /// Holo flag contradicts the holo type
    HoloMismatch,
    /// Structurally degenerate pack (no cards, wrong card count)
    MalformedPack,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::DuplicatePackDetected => "duplicate_pack_detected",
            ViolationKind::InvalidRarityDistribution => "invalid_rarity_distribution",
            ViolationKind::ImpossiblePack => "impossible_pack",
            ViolationKind::StatisticalAnomaly => "statistical_anomaly",
            ViolationKind::LowEntropy => "low_entropy",
            ViolationKind::HoloMismatch => "holo_mismatch",
            ViolationKind::MalformedPack => "malformed_pack",
        }
    }
}

/// Machine-readable category of a warning.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Legal but unusually lucky pull, telemetry only
    RarePull,
    /// Rarity score in the monitoring band above the population mean
    StatisticalAnomaly,
    /// In-pack identity entropy below the configured fraction of maximum
    LowEntropy,
}

impl WarningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningKind::RarePull => "rare_pull",
            WarningKind::StatisticalAnomaly => "statistical_anomaly",
            WarningKind::LowEntropy => "low_entropy",
        }
    }
}

/// A hard failure: the pack must not be accepted while any of these stand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Category tag
    pub kind: ViolationKind,
    /// Triage severity
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// Structured evidence for audit tooling
    pub details: Value,
}

impl Violation {
    pub fn new(kind: ViolationKind, severity: Severity, message: String, details: Value) -> Self {
        Self {
            kind,
            severity,
            message,
            details,
        }
    }
}

/// A soft flag: never blocks acceptance on its own, feeds monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Category tag
    pub kind: WarningKind,
    /// Human-readable description
    pub message: String,
    /// Structured evidence for audit tooling
    pub details: Value,
}

impl Warning {
    pub fn new(kind: WarningKind, message: String, details: Value) -> Self {
        Self {
            kind,
            message,
            details,
        }
    }
}

/// Aggregate verdict of one validation run. `valid` is false exactly when
/// `violations` is non-empty; `confidence` summarizes evidentiary weight
/// in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
    pub confidence: f64,
}

impl ValidationResult {
    /// A clean pass: no violations, no warnings, confidence 1.
    pub fn pass() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
            warnings: Vec::new(),
            confidence: 1.0,
        }
    }

    /// A failed check: confidence 0.
    pub fn fail(violations: Vec<Violation>) -> Self {
        Self {
            valid: false,
            violations,
            warnings: Vec::new(),
            confidence: 0.0,
        }
    }

    /// Builds a result from collected violations and warnings; validity and
    /// confidence follow from whether any violation is present.
    pub fn from_parts(violations: Vec<Violation>, warnings: Vec<Warning>) -> Self {
        let valid = violations.is_empty();
        Self {
            valid,
            violations,
            warnings,
            confidence: if valid { 1.0 } else { 0.0 },
        }
    }

    /// Valid and warning-free.
    pub fn is_clean(&self) -> bool {
        self.valid && self.warnings.is_empty()
    }
}

/// Renders a verdict for log lines and operator tooling: a pass/fail header
/// with the confidence percentage, then violation and warning blocks only
/// when non-empty.
pub fn format_validation_result(result: &ValidationResult) -> String {
    let (glyph, verdict) = if result.valid {
        ("✓", "PASSED")
    } else {
        ("✗", "REJECTED")
    };
    let mut out = format!(
        "{} {} (confidence {:.1}%)\n",
        glyph,
        verdict,
        result.confidence * 100.0
    );
    if !result.violations.is_empty() {
        out.push_str(&format!("Violations ({}):\n", result.violations.len()));
        for v in &result.violations {
            out.push_str(&format!("  [{}] {}\n", v.severity.as_str(), v.message));
        }
    }
    if !result.warnings.is_empty() {
        out.push_str(&format!("Warnings ({}):\n", result.warnings.len()));
        for w in &result.warnings {
            out.push_str(&format!("  ⚠ {}\n", w.message));
        }
    }
    out
}
