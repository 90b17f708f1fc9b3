//! Multiple-choice question synthesis from drug records.
//!
//! A question asks about one field of a target drug. The correct answer is
//! that drug's value; the two distractors are the same field drawn from other
//! drugs in the pool. When the pool cannot supply two distinct distractors the
//! remaining slots are padded with [`NOT_APPLICABLE`], so every question has
//! exactly three choices.
//!
//! All randomness comes from the caller's RNG. Pass a seeded `StdRng` to get
//! the same question twice.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Drug;

/// Padding used when too few distractors are found.
pub const NOT_APPLICABLE: &str = "Not applicable";

/// Correct answer used when the target drug has no value for the field.
pub const MISSING_VALUE: &str = "N/A";

/// Padding used instead of [`NOT_APPLICABLE`] when that is the correct answer.
pub const NONE_OF_THE_ABOVE: &str = "None of the above";

/// Distractors per question.
pub const DISTRACTOR_COUNT: usize = 2;

/// The field a generated question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionTemplate {
    AdultDose,
    PediatricDose,
    DrugClass,
    Indication,
    Contraindication,
}

impl QuestionTemplate {
    pub const ALL: [QuestionTemplate; 5] = [
        QuestionTemplate::AdultDose,
        QuestionTemplate::PediatricDose,
        QuestionTemplate::DrugClass,
        QuestionTemplate::Indication,
        QuestionTemplate::Contraindication,
    ];

    /// Question text for `drug`.
    pub fn prompt(self, drug: &Drug) -> String {
        let name = &drug.name.generic;
        match self {
            QuestionTemplate::AdultDose => format!("What is the adult dose of {name}?"),
            QuestionTemplate::PediatricDose => format!("What is the pediatric dose of {name}?"),
            QuestionTemplate::DrugClass => format!("What class of medication is {name}?"),
            QuestionTemplate::Indication => {
                format!("Which of the following is an indication for {name}?")
            }
            QuestionTemplate::Contraindication => {
                format!("Which of the following is a contraindication for {name}?")
            }
        }
    }

    /// This template's value on `drug`, or `None` if the field is empty.
    ///
    /// List fields yield one entry picked uniformly at random.
    pub fn extract<R: Rng + ?Sized>(self, drug: &Drug, rng: &mut R) -> Option<String> {
        let value = match self {
            QuestionTemplate::AdultDose => drug.dosing.adult.as_deref(),
            QuestionTemplate::PediatricDose => drug.dosing.pediatric.as_deref(),
            QuestionTemplate::DrugClass => Some(drug.class.as_str()),
            QuestionTemplate::Indication => drug.indications.choose(rng).map(String::as_str),
            QuestionTemplate::Contraindication => {
                drug.contraindications.choose(rng).map(String::as_str)
            }
        };
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

impl fmt::Display for QuestionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionTemplate::AdultDose => write!(f, "adult-dose"),
            QuestionTemplate::PediatricDose => write!(f, "pediatric-dose"),
            QuestionTemplate::DrugClass => write!(f, "class"),
            QuestionTemplate::Indication => write!(f, "indication"),
            QuestionTemplate::Contraindication => write!(f, "contraindication"),
        }
    }
}

/// A question synthesized at quiz time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub template: QuestionTemplate,
    pub prompt: String,
    pub correct_answer: String,
    pub distractors: [String; DISTRACTOR_COUNT],
    /// Correct answer and distractors in display order.
    pub choices: Vec<String>,
}

/// Generate a question about `target` using a uniformly chosen template.
///
/// `pool` is the full resolved drug list and may include `target` itself.
pub fn generate<R: Rng + ?Sized>(target: &Drug, pool: &[Drug], rng: &mut R) -> GeneratedQuestion {
    let template = QuestionTemplate::ALL[rng.gen_range(0..QuestionTemplate::ALL.len())];
    generate_with_template(target, pool, template, rng)
}

/// Generate a question about `target` for a fixed template.
pub fn generate_with_template<R: Rng + ?Sized>(
    target: &Drug,
    pool: &[Drug],
    template: QuestionTemplate,
    rng: &mut R,
) -> GeneratedQuestion {
    let correct_answer = template
        .extract(target, rng)
        .unwrap_or_else(|| MISSING_VALUE.to_string());

    let filler = if correct_answer == NOT_APPLICABLE {
        NONE_OF_THE_ABOVE
    } else {
        NOT_APPLICABLE
    };

    // Sample with replacement, at most one draw per pool entry. A value equal
    // to the filler would duplicate the padding, so it never counts as found.
    let target_key = target.key();
    let mut found: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    for _ in 0..pool.len() {
        if found.len() == DISTRACTOR_COUNT {
            break;
        }
        let candidate = &pool[rng.gen_range(0..pool.len())];
        if candidate.key() == target_key {
            continue;
        }
        let Some(value) = template.extract(candidate, rng) else {
            continue;
        };
        if value != correct_answer && value != filler && !found.contains(&value) {
            found.push(value);
        }
    }

    if found.len() < DISTRACTOR_COUNT {
        tracing::debug!(
            "only {} distractor(s) for {} of '{}', padding",
            found.len(),
            template,
            target.name.generic
        );
    }
    found.resize(DISTRACTOR_COUNT, filler.to_string());

    let distractors = [found[0].clone(), found[1].clone()];
    let mut choices = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    choices.push(correct_answer.clone());
    choices.extend(distractors.iter().cloned());
    choices.shuffle(rng);

    GeneratedQuestion {
        template,
        prompt: template.prompt(target),
        correct_answer,
        distractors,
        choices,
    }
}
