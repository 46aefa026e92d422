mod common;

use common::{question, sample_archetypes, sample_bank};
use rstest::rstest;
use traitforge::config::{Config, FingerprintScale, MatchParams, Metric};
use traitforge::error::TraitForgeError;
use traitforge::model::{Answer, Archetype, Question, SkewMap};
use traitforge::scorer::matcher::{classify, fingerprint_vector, rank};
use traitforge::scorer::normalize::normalize_score;
use traitforge::scorer::range::calculate_ranges;
use traitforge::scorer::{MatchOutcome, RankedMatch, ScoreRange, ScoringEngine};
use traitforge::traits::{TraitSet, TraitVector};

fn cosine_config() -> Config {
    let mut config = Config::default();
    config.matching.metric = Metric::Cosine;
    config
}

fn euclid_config() -> Config {
    let mut config = Config::default();
    config.matching.metric = Metric::Euclidean;
    config
}

fn ranked(scores: &[(&str, f64)]) -> Vec<RankedMatch> {
    scores
        .iter()
        .map(|(n, s)| RankedMatch {
            name: n.to_string(),
            score: *s,
            description: String::new(),
        })
        .collect()
}

// --- RANGE ---

#[test]
fn test_range_includes_implicit_zero() {
    // Question B leaves T unset on one answer, so its minimum is 0, not 1.
    let bank = vec![
        question("A", &[&[("T", -3.0)], &[("T", 0.0)], &[("T", 2.0)]]),
        question("B", &[&[("T", 1.0)], &[("T", 4.0)], &[("U", 1.0)]]),
    ];
    let traits = TraitSet::from_questions(&bank);
    let ranges = calculate_ranges(&bank, &traits);
    let t = traits.index_of("T").unwrap();
    assert_eq!(ranges[t], ScoreRange { min: -3.0, max: 6.0 });
}

#[test]
fn test_range_rounds_sum_to_two_decimals() {
    let bank: Vec<Question> = (0..3)
        .map(|i| question(&format!("q{}", i), &[&[("T", 0.1)], &[("T", -0.2)]]))
        .collect();
    let ranges = calculate_ranges(&bank, &TraitSet::from_names(["T"]));
    assert_eq!(ranges[0], ScoreRange { min: -0.6, max: 0.3 });
}

// --- NORMALIZER ---

#[rstest]
#[case(0.0, -33.0)]
#[case(-3.0, -100.0)]
#[case(6.0, 100.0)]
#[case(1.5, 0.0)]
#[case(3.0, 33.0)]
fn test_normalize_against_range(#[case] raw: f64, #[case] expected: f64) {
    let range = ScoreRange { min: -3.0, max: 6.0 };
    assert_eq!(normalize_score(raw, range), expected);
}

// --- MATCHER ---

#[test]
fn test_distance_ranks_exact_match_first() {
    let traits = TraitSet::from_names(["A", "B"]);
    let archetypes = vec![
        Archetype::new("Y", "", &[("A", 100.0), ("B", 100.0)]),
        Archetype::new("X", "", &[("A", 0.0), ("B", 0.0)]),
    ];
    let fps: Vec<TraitVector> = archetypes
        .iter()
        .map(|a| fingerprint_vector(a, &traits, FingerprintScale::Signed))
        .collect();
    let user = TraitVector::from_values(vec![0.0, 0.0]);
    let ranking = rank(&user, &archetypes, &fps, Metric::Euclidean);
    assert_eq!(ranking[0].name, "X");
    assert_eq!(ranking[0].score, 0.0);
    assert!((ranking[1].score - 20_000f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_cosine_ranks_aligned_first() {
    let traits = TraitSet::from_names(["A", "B"]);
    let archetypes = vec![
        Archetype::new("Y", "", &[("A", -100.0), ("B", 0.0)]),
        Archetype::new("X", "", &[("A", 100.0), ("B", 0.0)]),
    ];
    let fps: Vec<TraitVector> = archetypes
        .iter()
        .map(|a| fingerprint_vector(a, &traits, FingerprintScale::Signed))
        .collect();
    let user = TraitVector::from_values(vec![100.0, 0.0]);
    let ranking = rank(&user, &archetypes, &fps, Metric::Cosine);
    assert_eq!(ranking[0].name, "X");
    assert!((ranking[0].score - 1.0).abs() < 1e-12);
    assert!((ranking[1].score + 1.0).abs() < 1e-12);
}

#[rstest]
#[case(0.90, 0.86, true)]
#[case(0.90, 0.80, false)]
#[case(0.50, 0.50, true)]
#[case(0.0, 0.0, false)]
fn test_tie_detection(#[case] top: f64, #[case] second: f64, #[case] hybrid: bool) {
    let params = MatchParams::default();
    let ranking = ranked(&[("A", top), ("B", second), ("C", 0.1), ("D", 0.05), ("E", 0.0), ("F", -0.1)]);
    let outcome = classify(&ranking, &params);
    assert_eq!(outcome.is_hybrid(), hybrid);
    if hybrid {
        assert_eq!(
            outcome,
            MatchOutcome::Hybrid {
                primary: ("A".to_string(), "B".to_string()),
                secondaries: vec!["C".to_string(), "D".to_string(), "E".to_string()],
            }
        );
    } else {
        assert_eq!(outcome.secondaries(), ["B", "C", "D"]);
    }
}

#[test]
fn test_distance_metric_never_reports_tie() {
    let params = MatchParams {
        metric: Metric::Euclidean,
        ..Default::default()
    };
    let outcome = classify(&ranked(&[("A", 10.0), ("B", 10.0)]), &params);
    assert_eq!(
        outcome,
        MatchOutcome::Single {
            primary: "A".to_string(),
            secondaries: vec!["B".to_string()],
        }
    );
}

#[test]
fn test_empty_archetypes_yield_empty_outcome() {
    let engine = ScoringEngine::new(sample_bank(), vec![], &cosine_config());
    let report = engine.evaluate(&engine.traits().zeros(), &SkewMap::new()).unwrap();
    assert!(report.ranking.is_empty());
    assert_eq!(report.outcome, MatchOutcome::Empty);
}

// --- SKEW ---

#[test]
fn test_skew_flips_close_match_but_not_profile() {
    // Both ranges are -100..100, so the profile equals the raw totals.
    let bank = vec![question(
        "q",
        &[&[("A", 100.0), ("B", 100.0)], &[("A", -100.0), ("B", -100.0)]],
    )];
    let archetypes = vec![
        Archetype::new("X", "", &[("A", 100.0), ("B", 0.0)]),
        Archetype::new("Y", "", &[("A", 0.0), ("B", 100.0)]),
    ];
    let engine = ScoringEngine::new(bank, archetypes, &cosine_config());
    let raw = TraitVector::from_values(vec![100.0, 90.0]);

    let plain = engine.evaluate(&raw, &SkewMap::new()).unwrap();
    assert_eq!(plain.profile["A"], 100.0);
    assert_eq!(plain.profile["B"], 90.0);
    assert_eq!(plain.ranking[0].name, "X");

    let mut skew = SkewMap::new();
    skew.insert("Y".to_string(), 5);
    let skewed = engine.evaluate(&raw, &skew).unwrap();
    assert_eq!(skewed.ranking[0].name, "Y");
    assert_eq!(skewed.profile, plain.profile);
}

// --- ENGINE ---

#[test]
fn test_engine_discovers_traits_from_archetypes_too() {
    let mut archetypes = sample_archetypes();
    archetypes.push(Archetype::new("Lucky", "", &[("Luck", 100.0)]));
    let engine = ScoringEngine::new(sample_bank(), archetypes, &cosine_config());
    assert_eq!(engine.traits().names(), ["Luck", "Pace", "Risk", "Social"]);
    let luck = engine.traits().index_of("Luck").unwrap();
    assert!(engine.ranges()[luck].is_unrangeable());
}

#[test]
fn test_replace_questions_recomputes_ranges() {
    let mut engine = ScoringEngine::new(sample_bank(), sample_archetypes(), &euclid_config());
    let before = engine.ranges().to_vec();

    engine.replace_questions(vec![question("only", &[&[("Pace", 10.0)], &[("Risk", -10.0)]])]);
    let after = engine.ranges();
    assert_ne!(before, after);

    let pace = engine.traits().index_of("Pace").unwrap();
    assert_eq!(after[pace], ScoreRange { min: 0.0, max: 10.0 });
}

#[test]
fn test_evaluate_rejects_wrong_length_vector() {
    let engine = ScoringEngine::new(sample_bank(), sample_archetypes(), &cosine_config());
    let err = engine
        .evaluate(&TraitVector::zeros(1), &SkewMap::new())
        .unwrap_err();
    assert!(matches!(err, TraitForgeError::FieldCount { expected: 3, found: 1 }));
}

#[test]
fn test_shared_code_reproduces_report() {
    let engine = ScoringEngine::new(sample_bank(), sample_archetypes(), &euclid_config());
    let mut session = traitforge::session::QuizSession::in_order(
        engine.questions().len(),
        engine.traits().clone(),
    );
    for pick in [0, 0, 1, 0] {
        session.select_answer(engine.questions(), pick).unwrap();
    }
    let live = engine.evaluate_session(&session).unwrap();
    let shared = engine.evaluate_code(&live.code).unwrap();

    assert_eq!(shared.profile, live.profile);
    assert_eq!(shared.raw, live.raw);
    assert_eq!(live.raw["Pace"], 5.0 + 4.0 + 3.0);
    assert_eq!(live.code, "12_9_-1");
}

#[test]
fn test_code_from_other_trait_set_fails() {
    let engine = ScoringEngine::new(sample_bank(), sample_archetypes(), &cosine_config());
    let err = engine.evaluate_code("1_2_3_4").unwrap_err();
    assert!(matches!(err, TraitForgeError::FieldCount { expected: 3, found: 4 }));
}

#[test]
fn test_likert_fingerprints_match_signed_equivalent() {
    let bank = sample_bank();
    let signed = vec![Archetype::new("S", "", &[("Pace", 100.0), ("Risk", -50.0)])];
    let likert = vec![Archetype::new("S", "", &[("Pace", 5.0), ("Risk", 2.0), ("Social", 3.0)])];

    let mut cfg = euclid_config();
    let a = ScoringEngine::new(bank.clone(), signed, &cfg);
    cfg.matching.fingerprint_scale = FingerprintScale::Likert;
    let b = ScoringEngine::new(bank, likert, &cfg);

    let raw = TraitVector::from_values(vec![3.0, 1.0, 0.0]);
    let ra = a.evaluate(&raw, &SkewMap::new()).unwrap();
    let rb = b.evaluate(&raw, &SkewMap::new()).unwrap();
    assert!((ra.ranking[0].score - rb.ranking[0].score).abs() < 1e-9);
}

#[test]
fn test_answer_skew_flows_through_session() {
    let bank = vec![Question::new(
        "q",
        vec![
            Answer::new("a").with_score("A", 1.0).with_skew("Y", 4),
            Answer::new("b").with_score("A", -1.0),
        ],
    )];
    let archetypes = vec![
        Archetype::new("X", "", &[("A", 100.0)]),
        Archetype::new("Y", "", &[("A", 50.0)]),
    ];
    let engine = ScoringEngine::new(bank, archetypes, &euclid_config());
    let mut session = engine.start_session(Some(1));
    session.select_answer(engine.questions(), 0).unwrap();
    assert_eq!(session.skew()["Y"], 4);

    // Profile A = 100; skewed to 100 + 50 * 4 * 0.05 = 110.
    let report = engine.evaluate_session(&session).unwrap();
    assert_eq!(report.profile["A"], 100.0);
    assert_eq!(report.ranking[0].name, "X");
    assert!((report.ranking[0].score - 10.0).abs() < 1e-9);
}

#[test]
fn test_engine_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ScoringEngine>();
}
