//! Fixture builders shared by unit tests.

use crate::model::{Dosing, Drug, DrugName, ScenarioQuestion, MULTIPLE_CHOICE};

pub fn drug(generic: &str) -> Drug {
    Drug {
        id: generic.trim().to_lowercase(),
        scope: vec![],
        name: DrugName {
            generic: generic.into(),
            brand: vec![],
        },
        class: String::new(),
        mechanism: String::new(),
        indications: vec![],
        contraindications: vec![],
        dosing: Dosing::default(),
        routes: vec![],
    }
}

/// A drug with every quizzable field populated from its name.
pub fn full_drug(generic: &str) -> Drug {
    let ind_1 = format!("{generic} ind 1");
    let ind_2 = format!("{generic} ind 2");
    let contra = format!("{generic} contra");
    drug(generic)
        .with_class(&format!("{generic} class"))
        .with_doses(&format!("{generic} adult"), &format!("{generic} peds"))
        .with_indications(&[ind_1.as_str(), ind_2.as_str()])
        .with_contraindications(&[contra.as_str()])
}

pub fn scenario(id: &str, scope: &[&str], choices: &[&str], correct: &str) -> ScenarioQuestion {
    ScenarioQuestion {
        id: id.into(),
        scope: scope.iter().map(|s| s.to_string()).collect(),
        drug_id: String::new(),
        question_type: MULTIPLE_CHOICE.into(),
        question: format!("Question {id}?"),
        choices: choices.iter().map(|s| s.to_string()).collect(),
        correct_answer: correct.into(),
        rationale: format!("Because {correct}."),
        clinical_pearl: format!("Pearl for {id}."),
    }
}

impl Drug {
    pub fn with_class(mut self, class: &str) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_doses(mut self, adult: &str, pediatric: &str) -> Self {
        self.dosing = Dosing {
            adult: Some(adult.into()),
            pediatric: Some(pediatric.into()),
        };
        self
    }

    pub fn with_indications(mut self, items: &[&str]) -> Self {
        self.indications = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_contraindications(mut self, items: &[&str]) -> Self {
        self.contraindications = items.iter().map(|s| s.to_string()).collect();
        self
    }
}
