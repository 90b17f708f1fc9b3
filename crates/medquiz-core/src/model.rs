//! Core data model types for medquiz.
//!
//! These are the content records fetched from the content store (drugs and
//! pre-authored scenario questions) plus the credential tiers that scope them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Question type tag consumed by the scenario quiz.
pub const MULTIPLE_CHOICE: &str = "multiple-choice";

/// Normalize a generic drug name into its deduplication key.
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// A medication record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    /// Unique identifier within its partition.
    #[serde(default)]
    pub id: String,
    /// Tier tags this record is written for.
    #[serde(default)]
    pub scope: Vec<String>,
    /// Generic name and brand aliases.
    pub name: DrugName,
    /// Pharmacological class.
    #[serde(default)]
    pub class: String,
    /// Free-text mechanism of action.
    #[serde(default)]
    pub mechanism: String,
    #[serde(default)]
    pub indications: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub dosing: Dosing,
    /// Administration routes (e.g. "IV", "IM").
    #[serde(default)]
    pub routes: Vec<String>,
}

impl Drug {
    /// Deduplication key: trimmed, lowercased generic name.
    pub fn key(&self) -> String {
        normalize_key(&self.name.generic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugName {
    pub generic: String,
    /// Brand aliases in display order.
    #[serde(default)]
    pub brand: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosing {
    #[serde(default)]
    pub adult: Option<String>,
    #[serde(default)]
    pub pediatric: Option<String>,
}

/// A pre-authored critical-thinking question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioQuestion {
    pub id: String,
    #[serde(default)]
    pub scope: Vec<String>,
    /// Identifier of the drug this question is about.
    #[serde(default)]
    pub drug_id: String,
    /// Only [`MULTIPLE_CHOICE`] questions are used by the quiz engine.
    #[serde(default)]
    pub question_type: String,
    pub question: String,
    pub choices: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub clinical_pearl: String,
}

impl ScenarioQuestion {
    pub fn is_multiple_choice(&self) -> bool {
        self.question_type == MULTIPLE_CHOICE
    }

    /// Whether this question is tagged for `tier`.
    pub fn is_tagged_for(&self, tier: Tier) -> bool {
        self.scope.iter().any(|s| s.parse::<Tier>().ok() == Some(tier))
    }
}

/// Credential level gating which content a user may see.
///
/// Deserializes through [`FromStr`], so config and stored values accept the
/// same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Tier {
    #[serde(rename = "EMT")]
    Emt,
    #[serde(rename = "AEMT")]
    Aemt,
    Paramedic,
    #[serde(rename = "RN")]
    Rn,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Emt, Tier::Aemt, Tier::Paramedic, Tier::Rn];

    /// Partitions this tier inherits, lowest privilege first.
    pub fn partitions(self) -> &'static [Partition] {
        const ORDER: [Partition; 4] = [
            Partition::Emt,
            Partition::Aemt,
            Partition::Paramedic,
            Partition::Rn,
        ];
        match self {
            Tier::Emt => &ORDER[..1],
            Tier::Aemt => &ORDER[..2],
            Tier::Paramedic => &ORDER[..3],
            Tier::Rn => &ORDER[..],
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Emt => write!(f, "EMT"),
            Tier::Aemt => write!(f, "AEMT"),
            Tier::Paramedic => write!(f, "Paramedic"),
            Tier::Rn => write!(f, "RN"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emt" => Ok(Tier::Emt),
            "aemt" => Ok(Tier::Aemt),
            "paramedic" | "medic" => Ok(Tier::Paramedic),
            "rn" | "nurse" => Ok(Tier::Rn),
            other => Err(format!("unknown tier: {other}")),
        }
    }
}

impl TryFrom<String> for Tier {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One scope-specific content partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Emt,
    Aemt,
    Paramedic,
    Rn,
}

impl Partition {
    pub const ALL: [Partition; 4] = [
        Partition::Emt,
        Partition::Aemt,
        Partition::Paramedic,
        Partition::Rn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Partition::Emt => "emt",
            Partition::Aemt => "aemt",
            Partition::Paramedic => "paramedic",
            Partition::Rn => "rn",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_display_and_parse() {
        assert_eq!(Tier::Emt.to_string(), "EMT");
        assert_eq!(Tier::Paramedic.to_string(), "Paramedic");
        assert_eq!("aemt".parse::<Tier>().unwrap(), Tier::Aemt);
        assert_eq!(" RN ".parse::<Tier>().unwrap(), Tier::Rn);
        assert_eq!("PARAMEDIC".parse::<Tier>().unwrap(), Tier::Paramedic);
        assert!("doctor".parse::<Tier>().is_err());
    }

    #[test]
    fn tier_deserializes_like_from_str() {
        let tiers: Vec<Tier> =
            serde_json::from_str(r#"["EMT", "paramedic", "Nurse", "aemt"]"#).unwrap();
        assert_eq!(tiers, [Tier::Emt, Tier::Paramedic, Tier::Rn, Tier::Aemt]);
        assert_eq!(serde_json::to_string(&Tier::Rn).unwrap(), "\"RN\"");
        assert!(serde_json::from_str::<Tier>("\"surgeon\"").is_err());
    }

    #[test]
    fn inheritance_is_monotonic() {
        for pair in Tier::ALL.windows(2) {
            let lower = pair[0].partitions();
            let higher = pair[1].partitions();
            assert!(higher.len() == lower.len() + 1);
            assert_eq!(&higher[..lower.len()], lower);
        }
        assert_eq!(Tier::Emt.partitions(), &[Partition::Emt]);
        assert_eq!(Tier::Rn.partitions().last(), Some(&Partition::Rn));
    }

    #[test]
    fn drug_deserializes_with_defaults() {
        let json = r#"{"name": {"generic": "  Epinephrine "}}"#;
        let drug: Drug = serde_json::from_str(json).unwrap();
        assert_eq!(drug.key(), "epinephrine");
        assert!(drug.indications.is_empty());
        assert!(drug.dosing.adult.is_none());
    }

    #[test]
    fn scenario_question_camel_case() {
        let json = r#"{
            "id": "q1",
            "scope": ["rn"],
            "drugId": "epi",
            "questionType": "multiple-choice",
            "question": "Which route?",
            "choices": ["IM", "PO"],
            "correctAnswer": "IM",
            "clinicalPearl": "Lateral thigh."
        }"#;
        let q: ScenarioQuestion = serde_json::from_str(json).unwrap();
        assert!(q.is_multiple_choice());
        assert!(q.is_tagged_for(Tier::Rn));
        assert!(!q.is_tagged_for(Tier::Emt));
        assert_eq!(q.clinical_pearl, "Lateral thigh.");
        assert!(q.rationale.is_empty());
    }
}
