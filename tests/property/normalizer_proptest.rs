//! Property-based tests for the AI response extractor and validator
//!
//! Uses proptest to generate model replies and verify the normalizer's
//! guarantees hold for all of them.

use proptest::prelude::*;
use serde_json::{json, Value};
use uuid::Uuid;

use planner::backend::ai::extract::{extract_json, strip_fences};
use planner::backend::ai::schema::validate_response;
use planner::backend::ai::{AiError, ResponseKind};
use planner::shared::Source;

fn reply_with_activity(date: &str) -> Value {
    json!({
        "type": "activity",
        "message": "ok",
        "warnings": [],
        "activities": [{"title": "Gym", "type": "task", "date": date, "status": "pending"}],
        "notes": []
    })
}

fn note(title: &str) -> Value {
    json!({"title": title, "content": "isi catatan"})
}

proptest! {
    #[test]
    fn test_fences_do_not_change_parsed_value(
        message in "[a-zA-Z0-9 .,!?]{1,40}",
        warnings in prop::collection::vec("[a-z ]{0,20}", 0..4),
        tag in prop::sample::select(vec!["", "json", "JSON"]),
        lead in "[ \n\t]{0,3}",
        trail in "[ \n\t]{0,3}",
    ) {
        let plain = json!({
            "type": "none",
            "message": message,
            "warnings": warnings,
            "activities": [],
            "notes": []
        })
        .to_string();
        let fenced = format!("{}```{}\n{}\n```{}", lead, tag, plain, trail);

        prop_assert_eq!(extract_json(&fenced).unwrap(), extract_json(&plain).unwrap());
    }

    #[test]
    fn test_strip_fences_leaves_plain_json_alone(text in "\\{[a-z0-9\":, ]{0,30}\\}") {
        prop_assert_eq!(strip_fences(&text), text.as_str());
    }

    #[test]
    fn test_well_formed_dates_are_kept_verbatim(
        year in 0u32..10000,
        month in 0u32..100,
        day in 0u32..100,
    ) {
        let date = format!("{:04}-{:02}-{:02}", year, month, day);
        let validated = validate_response(&reply_with_activity(&date)).unwrap();
        prop_assert_eq!(&validated.activities[0].date, &date);
    }

    #[test]
    fn test_malformed_dates_are_rejected_at_their_path(date in "[a-zA-Z /]{1,12}") {
        let err = validate_response(&reply_with_activity(&date)).unwrap_err();
        match err {
            AiError::Schema(violations) => {
                let paths: Vec<&str> = violations.paths().collect();
                prop_assert_eq!(paths, vec!["activities[0].date"]);
            }
            other => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_every_draft_is_stamped(titles in prop::collection::vec("[A-Za-z]{1,10}", 0..6)) {
        let reply = json!({
            "type": "note",
            "message": "ok",
            "warnings": [],
            "activities": [],
            "notes": titles.iter().map(|t| note(t)).collect::<Vec<_>>()
        });
        let user_id = Uuid::new_v4();

        let response = validate_response(&reply).unwrap().stamp(user_id);

        prop_assert_eq!(response.kind, ResponseKind::Note);
        prop_assert_eq!(response.notes.len(), titles.len());
        for (stamped, title) in response.notes.iter().zip(&titles) {
            prop_assert_eq!(stamped.source, Source::Ai);
            prop_assert_eq!(stamped.user_id, user_id);
            prop_assert_eq!(&stamped.draft.title, title);
            prop_assert!(!stamped.draft.is_pinned);
        }
    }

    #[test]
    fn test_non_object_roots_are_rejected(value in prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,10}".prop_map(Value::from),
        Just(Value::Null),
        Just(json!([])),
    ]) {
        let err = validate_response(&value).unwrap_err();
        match err {
            AiError::Schema(violations) => {
                prop_assert_eq!(violations.first().map(|v| v.path.as_str()), Some("(root)"));
            }
            other => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }
}
