//! Content document validation.
//!
//! Reports problems that would make records unusable or silently dropped by
//! the resolver and the quiz engine. Nothing here rejects content; callers
//! decide what to do with the warnings.

use std::collections::HashSet;

use crate::model::{normalize_key, Drug, ScenarioQuestion, Tier};

/// A warning from content validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The record ID (if applicable).
    pub record_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(record_id: &str, message: impl Into<String>) -> Self {
        Self {
            record_id: (!record_id.is_empty()).then(|| record_id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate one medication document.
pub fn validate_drugs(drugs: &[Drug]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for drug in drugs {
        let key = normalize_key(&drug.name.generic);
        if key.is_empty() {
            warnings.push(ValidationWarning::new(&drug.id, "generic name is empty"));
        } else if !seen.insert(key) {
            warnings.push(ValidationWarning::new(
                &drug.id,
                format!("duplicate generic name: {}", drug.name.generic.trim()),
            ));
        }
    }

    for drug in drugs {
        let has_quizzable_field = !drug.class.trim().is_empty()
            || drug.dosing.adult.is_some()
            || drug.dosing.pediatric.is_some()
            || !drug.indications.is_empty()
            || !drug.contraindications.is_empty();
        if !has_quizzable_field {
            warnings.push(ValidationWarning::new(
                &drug.id,
                "no class, dosing, indications or contraindications to quiz on",
            ));
        }
    }

    warnings
}

/// Validate one scenario question document.
pub fn validate_scenarios(questions: &[ScenarioQuestion]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::new(&q.id, format!("duplicate question ID: {}", q.id)));
        }
    }

    for q in questions {
        if q.choices.is_empty() {
            warnings.push(ValidationWarning::new(&q.id, "choices are empty"));
        } else if !q.choices.contains(&q.correct_answer) {
            warnings.push(ValidationWarning::new(
                &q.id,
                format!("correct answer '{}' is not one of the choices", q.correct_answer),
            ));
        }
    }

    for q in questions {
        if !q.is_multiple_choice() {
            warnings.push(ValidationWarning::new(
                &q.id,
                format!("question type '{}' is not used by quizzes", q.question_type),
            ));
        }
        if q.scope.iter().all(|s| s.parse::<Tier>().is_err()) {
            warnings.push(ValidationWarning::new(&q.id, "not tagged for any known tier"));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{drug, full_drug, scenario};

    #[test]
    fn clean_content_has_no_warnings() {
        assert!(validate_drugs(&[full_drug("aspirin"), full_drug("glucose")]).is_empty());
        assert!(validate_scenarios(&[scenario("q1", &["EMT"], &["a", "b"], "a")]).is_empty());
    }

    #[test]
    fn duplicate_and_empty_names() {
        let warnings = validate_drugs(&[
            full_drug("Aspirin"),
            full_drug(" aspirin"),
            full_drug("  "),
        ]);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("empty")));
    }

    #[test]
    fn unquizzable_drug() {
        let warnings = validate_drugs(&[drug("water")]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].record_id.as_deref(), Some("water"));
    }

    #[test]
    fn scenario_problems() {
        let mut essay = scenario("q3", &["RN"], &["a"], "a");
        essay.question_type = "essay".into();
        let warnings = validate_scenarios(&[
            scenario("q1", &["EMT"], &["a", "b"], "c"),
            scenario("q1", &["EMT"], &[], "a"),
            essay,
            scenario("q4", &["janitor"], &["a"], "a"),
        ]);
        let messages: Vec<_> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("duplicate question ID")));
        assert!(messages.iter().any(|m| m.contains("not one of the choices")));
        assert!(messages.iter().any(|m| m.contains("choices are empty")));
        assert!(messages.iter().any(|m| m.contains("'essay'")));
        assert!(messages.iter().any(|m| m.contains("any known tier")));
    }
}
