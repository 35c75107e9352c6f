// SPDX-License-Identifier: Apache-2.0

//! End-to-end flows over the public API: the catalog scenarios from the
//! product's search bar, plus the file-backed payload path the CLI uses.

use std::io::Write;

use faceta::{
    best_matches, compute_alive_options, compute_stats, highlighted_parts, AliveOption, Catalog,
    CatalogPayload, Facet, MemoryHistoryStore, HistoryStore, NewAnswer, Selection,
    SessionNavigator,
};

fn combo(
    inst: &str,
    year: u16,
    spec: &str,
    area: &str,
    topic: &str,
    n: u32,
) -> faceta::Combination {
    faceta::Combination {
        institution: inst.to_owned(),
        year,
        specialty: spec.to_owned(),
        area: area.to_owned(),
        topic: topic.to_owned(),
        question_count: n,
    }
}

fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        combo("ENARE", 2023, "Cardiologia", "Clínica Médica", "Arritmias", 5),
        combo("USP", 2023, "Cardiologia", "Clínica Médica", "Arritmias", 3),
    ])
    .unwrap()
}

#[test]
fn empty_query_no_selection_orders_by_count() {
    let view = compute_alive_options(&sample_catalog(), &Selection::default(), "");
    assert_eq!(
        view.institutions,
        vec![
            AliveOption { value: "ENARE".into(), count: 5, score: 0 },
            AliveOption { value: "USP".into(), count: 3, score: 0 },
        ]
    );
    assert_eq!(view.total_count, 8);
}

#[test]
fn query_excludes_unmatched_institution() {
    let view = compute_alive_options(&sample_catalog(), &Selection::default(), "enare");
    assert_eq!(
        view.institutions,
        vec![AliveOption { value: "ENARE".into(), count: 5, score: 100 }]
    );
    assert_eq!(view.total_count, 5);
}

#[test]
fn pinned_institution_keeps_siblings_alive() {
    let selection = Selection {
        institution: Some("USP".to_owned()),
        ..Selection::default()
    };
    let view = compute_alive_options(&sample_catalog(), &selection, "");

    assert_eq!(
        view.specialties,
        vec![AliveOption { value: "Cardiologia".into(), count: 3, score: 0 }]
    );
    assert_eq!(view.total_count, 3);

    let institutions: Vec<&str> = view.institutions.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(institutions, vec!["ENARE", "USP"]);
}

#[test]
fn levenshtein_typo_scenario() {
    assert_eq!(faceta::levenshtein_distance("cardiologia", "cardiologa"), 1);
    assert!(faceta::fuzzy_match("Cardiologia", "cardiologa"));
}

#[test]
fn typing_then_picking_an_intent() {
    let catalog = Catalog::new(vec![
        combo("ENARE", 2023, "Cardiologia", "Clínica Médica", "Arritmias", 5),
        combo("ENARE", 2023, "Nefrologia", "Clínica Médica", "Litíase", 4),
        combo("USP", 2022, "Cardiologia", "Clínica Médica", "Valvopatias", 3),
    ])
    .unwrap();

    // User types a partial word
    let view = compute_alive_options(&catalog, &Selection::default(), "cardio");
    let best = best_matches(&view, 3);
    assert_eq!(best[0].facet, Facet::Specialty);
    assert_eq!(best[0].value, "Cardiologia");

    // Clicking the suggestion pins it and clears the query
    let mut selection = Selection::default();
    selection.pin(best[0].facet, &best[0].value);
    let view = compute_alive_options(&catalog, &selection, "");
    assert_eq!(view.total_count, 8);
    let topics: Vec<&str> = view.topics.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(topics, vec!["Arritmias", "Valvopatias"]);
}

#[test]
fn highlight_matches_what_the_query_matched() {
    let parts = highlighted_parts("Clínica Médica", "clinica med");
    let highlighted: String = parts
        .iter()
        .filter(|p| p.highlighted)
        .map(|p| p.text.as_str())
        .collect();
    assert_eq!(highlighted, "ClínicaMéd");
    let rebuilt: String = parts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(rebuilt, "Clínica Médica");
}

#[test]
fn payload_file_roundtrip() {
    let payload = CatalogPayload {
        combinations: sample_catalog().combinations().to_vec(),
        stats: None,
    };
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&payload).unwrap()).unwrap();

    let raw = std::fs::read_to_string(file.path()).unwrap();
    let parsed: CatalogPayload = serde_json::from_str(&raw).unwrap();
    let catalog = Catalog::from_payload(parsed).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.stats().total_questions, 8);
}

#[test]
fn session_walks_the_filtered_list() {
    let mut nav = SessionNavigator::new();
    let filtered: Vec<String> = vec!["q1".into(), "q2".into()];

    nav.advance(&filtered);
    nav.advance(&filtered);
    assert_eq!(nav.retreat(), Some("q1"));
    assert_eq!(nav.advance(&filtered), faceta::Advance::Revisit("q2".into()));
    assert_eq!(nav.advance(&filtered), faceta::Advance::NeedsRefetch);
}

#[test]
fn answering_builds_stats() {
    use chrono::{NaiveDate, TimeZone, Utc};

    let mut store = MemoryHistoryStore::new();
    for (q, correct) in [("q1", true), ("q2", false), ("q3", true)] {
        store.append(NewAnswer {
            user_id: "u1".to_owned(),
            question_id: q.to_owned(),
            selected_answer: 2,
            is_correct: correct,
            answered_at: Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap(),
            time_spent_seconds: Some(45),
            area: Some("Clínica Médica".to_owned()),
            institution: Some("ENARE".to_owned()),
        });
    }

    let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
    let stats = compute_stats(&store.for_user("u1"), today, 7);
    assert_eq!(stats.total_answered, 3);
    assert_eq!(stats.total_correct, 2);
    assert_eq!(stats.streak_days, 1);
    assert_eq!(stats.by_institution.get("ENARE").unwrap().total, 3);
}
