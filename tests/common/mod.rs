#![allow(dead_code)]

use traitforge::model::{Answer, Archetype, Question};

/// Builds a question from `(trait, score)` lists, one list per answer.
pub fn question(prompt: &str, answers: &[&[(&str, f64)]]) -> Question {
    let answers = answers
        .iter()
        .enumerate()
        .map(|(i, scores)| {
            scores
                .iter()
                .fold(Answer::new(&format!("{} #{}", prompt, i)), |a, (t, v)| {
                    a.with_score(t, *v)
                })
        })
        .collect();
    Question::new(prompt, answers)
}

/// A small unbalanced bank over Pace/Risk/Social.
pub fn sample_bank() -> Vec<Question> {
    vec![
        question(
            "How do you start a new game?",
            &[
                &[("Pace", 5.0), ("Risk", 2.0)],
                &[("Pace", 1.0)],
                &[("Social", 4.0), ("Risk", 0.0)],
            ],
        ),
        question(
            "A rival challenges you",
            &[&[("Risk", 4.0), ("Social", 1.0)], &[("Risk", -1.0)], &[]],
        ),
        question(
            "Your team needs a plan",
            &[
                &[("Social", 3.0), ("Pace", 2.0)],
                &[("Social", -2.0), ("Pace", 4.0)],
            ],
        ),
        question(
            "The map is unexplored",
            &[
                &[("Risk", 3.0), ("Pace", 3.0)],
                &[("Risk", 1.0), ("Pace", 0.0)],
                &[("Risk", -3.0), ("Social", 2.0)],
                &[("Pace", -1.0)],
            ],
        ),
    ]
}

pub fn sample_archetypes() -> Vec<Archetype> {
    vec![
        Archetype::new(
            "Rusher",
            "Fast and fearless",
            &[("Pace", 100.0), ("Risk", 80.0), ("Social", -20.0)],
        ),
        Archetype::new(
            "Diplomat",
            "Talks first",
            &[("Pace", -30.0), ("Risk", -40.0), ("Social", 100.0)],
        ),
        Archetype::new(
            "Turtle",
            "Slow and safe",
            &[("Pace", -100.0), ("Risk", -90.0), ("Social", 0.0)],
        ),
        Archetype::new("Wildcard", "Anything goes", &[("Risk", 100.0)]),
        Archetype::new("Drifter", "Goes with the flow", &[]),
    ]
}
