//! Triage rule engine.
//!
//! Maps a structured symptom report to a discrete urgency level with a
//! human-readable rationale. The rule table is ordered and first-match-wins:
//! rules are checked in exactly the sequence below and the first rule whose
//! condition holds determines the output.
//!
//! The evaluator is a pure, total function. For every well-typed
//! [`PatientReport`] it returns exactly one [`TriageDecision`]; it never
//! fails and never returns an unrecognised level. All input validation
//! happens at the boundary before a report reaches `evaluate`.

use navigator_types::SymptomText;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::{NavigatorError, NavigatorResult};

/// Canonical red-flag phrase set.
///
/// A symptom phrase matching any of these, case-insensitively and as a
/// substring, unconditionally forces the highest urgency level. There is one
/// definition shared by every evaluation path; the legacy deployment carried
/// a reduced copy in its degraded evaluator, which let the same report triage
/// differently depending on which copy answered.
pub const RED_FLAG_PHRASES: [&str; 6] = [
    "chest pain",
    "shortness of breath",
    "loss of consciousness",
    "severe abdominal pain",
    "uncontrolled bleeding",
    "sudden severe headache",
];

static RED_FLAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = RED_FLAG_PHRASES.join("|");
    Regex::new(&format!("(?i)({alternation})")).expect("red-flag pattern is a valid regex")
});

/// Reported symptom severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl std::str::FromStr for Severity {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            other => Err(NavigatorError::InvalidInput(format!(
                "unknown severity: {other}"
            ))),
        }
    }
}

/// How long the symptoms have been present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomDuration {
    Hours,
    Days,
    Weeks,
}

impl std::str::FromStr for SymptomDuration {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hours" => Ok(SymptomDuration::Hours),
            "days" => Ok(SymptomDuration::Days),
            "weeks" => Ok(SymptomDuration::Weeks),
            other => Err(NavigatorError::InvalidInput(format!(
                "unknown duration: {other}"
            ))),
        }
    }
}

/// Care level produced by triage.
///
/// `Specialty` is a valid level for provider routing but is never produced by
/// [`evaluate`]; it is reachable only through external paths (for example a
/// caller that already knows the patient needs a specialist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageLevel {
    Emergency,
    Urgent,
    Primary,
    Specialty,
}

impl TriageLevel {
    /// Maps a care level to the keyword used when querying the provider
    /// directory. Total and deterministic.
    pub fn provider_keyword(&self) -> &'static str {
        match self {
            TriageLevel::Emergency => "ER",
            TriageLevel::Urgent => "Urgent Care",
            TriageLevel::Primary => "Primary Care",
            TriageLevel::Specialty => "Specialty",
        }
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TriageLevel::Emergency => "emergency",
            TriageLevel::Urgent => "urgent",
            TriageLevel::Primary => "primary",
            TriageLevel::Specialty => "specialty",
        };
        write!(f, "{s}")
    }
}

/// Structured symptom report, constructed by the caller.
///
/// `sex`, `insurance`, `zip` and `selected_region` are opaque to the
/// evaluator; they are carried through for downstream provider search only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientReport {
    /// Ordered free-text symptom phrases. May be empty; blank entries are
    /// rejected at deserialization.
    #[serde(default)]
    pub symptoms: Vec<SymptomText>,
    pub severity: Severity,
    pub duration: SymptomDuration,
    pub age: u32,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub insurance: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default, rename = "selectedRegion")]
    pub selected_region: String,
}

impl PatientReport {
    /// Parses a report from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::Deserialization` for malformed JSON or a
    /// report that fails field validation (unknown enum value, blank symptom
    /// entry, negative age).
    pub fn from_json(json: &str) -> NavigatorResult<Self> {
        serde_json::from_str(json).map_err(NavigatorError::Deserialization)
    }

    /// Serializes the report back to JSON.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::Serialization` if encoding fails.
    pub fn to_json(&self) -> NavigatorResult<String> {
        serde_json::to_string(self).map_err(NavigatorError::Serialization)
    }
}

/// Triage output: a care level plus the rationale of the rule that fired.
///
/// The rationale is display-only and never drives control flow, but it
/// deterministically corresponds to the matched rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageDecision {
    pub level: TriageLevel,
    pub rationale: String,
}

impl TriageDecision {
    fn new(level: TriageLevel, rationale: &str) -> Self {
        Self {
            level,
            rationale: rationale.to_string(),
        }
    }
}

/// Evaluates a report against the ordered rule table.
///
/// Rules, first match wins:
/// 1. any red-flag symptom phrase -> emergency
/// 2. severe severity -> emergency
/// 3. moderate severity, present for hours -> urgent
/// 4. mild severity, present for hours -> urgent
/// 5. age 65+, severity not mild -> urgent
/// 6. otherwise -> primary care
pub fn evaluate(report: &PatientReport) -> TriageDecision {
    if report
        .symptoms
        .iter()
        .any(|s| RED_FLAG_PATTERN.is_match(s.as_str()))
    {
        return TriageDecision::new(TriageLevel::Emergency, "Red-flag symptom detected");
    }

    if report.severity == Severity::Severe {
        return TriageDecision::new(TriageLevel::Emergency, "High severity reported");
    }

    if report.severity == Severity::Moderate && report.duration == SymptomDuration::Hours {
        return TriageDecision::new(TriageLevel::Urgent, "Moderate and recent");
    }

    if report.severity == Severity::Mild && report.duration == SymptomDuration::Hours {
        return TriageDecision::new(TriageLevel::Urgent, "Mild but recent");
    }

    if report.age >= 65 && report.severity != Severity::Mild {
        return TriageDecision::new(TriageLevel::Urgent, "Older adult with concerns");
    }

    TriageDecision::new(TriageLevel::Primary, "Routine primary care recommended")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(symptoms: &[&str], severity: Severity, duration: SymptomDuration, age: u32) -> PatientReport {
        PatientReport {
            symptoms: symptoms
                .iter()
                .map(|s| SymptomText::new(s).unwrap())
                .collect(),
            severity,
            duration,
            age,
            sex: String::new(),
            insurance: String::new(),
            zip: String::new(),
            selected_region: String::new(),
        }
    }

    #[test]
    fn test_red_flag_forces_emergency_regardless_of_other_fields() {
        for phrase in RED_FLAG_PHRASES {
            let r = report(&[phrase], Severity::Mild, SymptomDuration::Weeks, 30);
            let decision = evaluate(&r);
            assert_eq!(decision.level, TriageLevel::Emergency, "phrase: {phrase}");
            assert_eq!(decision.rationale, "Red-flag symptom detected");
        }
    }

    #[test]
    fn test_red_flag_match_is_case_insensitive() {
        let r = report(&["CHEST PAIN"], Severity::Mild, SymptomDuration::Weeks, 30);
        assert_eq!(evaluate(&r).level, TriageLevel::Emergency);
    }

    #[test]
    fn test_red_flag_matches_as_substring() {
        let r = report(
            &["sudden Chest Pain when climbing stairs"],
            Severity::Mild,
            SymptomDuration::Weeks,
            30,
        );
        assert_eq!(evaluate(&r).level, TriageLevel::Emergency);
    }

    #[test]
    fn test_red_flag_short_circuits_later_rules() {
        // Mild severity would match rule 4; the red flag must win.
        let r = report(&["chest pain"], Severity::Mild, SymptomDuration::Hours, 30);
        let decision = evaluate(&r);
        assert_eq!(decision.level, TriageLevel::Emergency);
        assert_eq!(decision.rationale, "Red-flag symptom detected");
    }

    #[test]
    fn test_severe_is_emergency_even_with_no_symptoms() {
        let r = report(&[], Severity::Severe, SymptomDuration::Weeks, 30);
        let decision = evaluate(&r);
        assert_eq!(decision.level, TriageLevel::Emergency);
        assert_eq!(decision.rationale, "High severity reported");
    }

    #[test]
    fn test_moderate_and_recent_is_urgent() {
        let r = report(&["wrist pain"], Severity::Moderate, SymptomDuration::Hours, 30);
        let decision = evaluate(&r);
        assert_eq!(decision.level, TriageLevel::Urgent);
        assert_eq!(decision.rationale, "Moderate and recent");
    }

    #[test]
    fn test_mild_and_recent_is_urgent() {
        let r = report(&["wrist pain"], Severity::Mild, SymptomDuration::Hours, 30);
        let decision = evaluate(&r);
        assert_eq!(decision.level, TriageLevel::Urgent);
        assert_eq!(decision.rationale, "Mild but recent");
    }

    #[test]
    fn test_older_adult_with_non_trivial_severity_is_urgent() {
        let r = report(&["dizziness"], Severity::Moderate, SymptomDuration::Weeks, 70);
        let decision = evaluate(&r);
        assert_eq!(decision.level, TriageLevel::Urgent);
        assert_eq!(decision.rationale, "Older adult with concerns");
    }

    #[test]
    fn test_mild_exempts_the_age_rule() {
        let r = report(&["dizziness"], Severity::Mild, SymptomDuration::Weeks, 70);
        let decision = evaluate(&r);
        assert_eq!(decision.level, TriageLevel::Primary);
        assert_eq!(decision.rationale, "Routine primary care recommended");
    }

    #[test]
    fn test_default_is_primary_care() {
        let r = report(&["wrist pain"], Severity::Mild, SymptomDuration::Weeks, 30);
        let decision = evaluate(&r);
        assert_eq!(decision.level, TriageLevel::Primary);
        assert_eq!(decision.rationale, "Routine primary care recommended");
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let r = report(&["headache"], Severity::Moderate, SymptomDuration::Days, 40);
        assert_eq!(evaluate(&r), evaluate(&r));
    }

    #[test]
    fn test_evaluator_never_produces_specialty() {
        let severities = [Severity::Mild, Severity::Moderate, Severity::Severe];
        let durations = [
            SymptomDuration::Hours,
            SymptomDuration::Days,
            SymptomDuration::Weeks,
        ];
        for severity in severities {
            for duration in durations {
                for age in [10, 64, 65, 90] {
                    let r = report(&["chest pain", "dizziness"], severity, duration, age);
                    assert_ne!(evaluate(&r).level, TriageLevel::Specialty);
                    let r = report(&[], severity, duration, age);
                    assert_ne!(evaluate(&r).level, TriageLevel::Specialty);
                }
            }
        }
    }

    #[test]
    fn test_provider_keyword_mapping_is_total() {
        assert_eq!(TriageLevel::Emergency.provider_keyword(), "ER");
        assert_eq!(TriageLevel::Urgent.provider_keyword(), "Urgent Care");
        assert_eq!(TriageLevel::Primary.provider_keyword(), "Primary Care");
        assert_eq!(TriageLevel::Specialty.provider_keyword(), "Specialty");
    }

    #[test]
    fn test_report_from_json_rejects_unknown_severity() {
        let json = r#"{"symptoms":[],"severity":"awful","duration":"hours","age":30}"#;
        let result = PatientReport::from_json(json);
        assert!(matches!(result, Err(NavigatorError::Deserialization(_))));
    }

    #[test]
    fn test_report_from_json_rejects_negative_age() {
        let json = r#"{"symptoms":[],"severity":"mild","duration":"hours","age":-5}"#;
        assert!(PatientReport::from_json(json).is_err());
    }

    #[test]
    fn test_report_from_json_accepts_wire_payload() {
        let json = r#"{
            "symptoms": ["Chest pain", "Palpitations"],
            "severity": "moderate",
            "duration": "hours",
            "age": 52,
            "sex": "f",
            "insurance": "Aetna",
            "zip": "90401",
            "selectedRegion": "chest"
        }"#;
        let report = PatientReport::from_json(json).unwrap();
        assert_eq!(report.symptoms.len(), 2);
        assert_eq!(report.selected_region, "chest");
        assert_eq!(evaluate(&report).level, TriageLevel::Emergency);
    }

    #[test]
    fn test_severity_and_duration_from_str() {
        assert_eq!(" Severe ".parse::<Severity>().unwrap(), Severity::Severe);
        assert_eq!(
            "hours".parse::<SymptomDuration>().unwrap(),
            SymptomDuration::Hours
        );
        assert!("forever".parse::<SymptomDuration>().is_err());
    }
}
