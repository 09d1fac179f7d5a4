mod common;

use chrono::Utc;
use common::{record, ts};
use feedback_stats_be::models::{FeedbackRecord, NewFeedback, Rating, RecordError};
use std::collections::HashMap;
use uuid::Uuid;

fn stored(fields: &[(&str, &str)]) -> HashMap<String, String> {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn submission(rating: i64, comments: &str) -> NewFeedback {
    NewFeedback {
        name: None,
        email: None,
        rating: rating.into(),
        comments: comments.into(),
        owner_id: None,
        survey_id: None,
    }
}

#[test]
fn test_rating_bounds() {
    assert!(Rating::try_from(1i64).is_ok());
    assert!(Rating::try_from(5u8).is_ok());
    assert_eq!(Rating::try_from(0i64), Err(RecordError::RatingOutOfRange(0)));
    assert_eq!(Rating::try_from(6i64), Err(RecordError::RatingOutOfRange(6)));
    assert_eq!("4.0".parse::<Rating>().map(Rating::value), Ok(4));
    assert!(matches!(
        "4.5".parse::<Rating>(),
        Err(RecordError::InvalidRating(_))
    ));
    assert!(matches!(
        "great".parse::<Rating>(),
        Err(RecordError::InvalidRating(_))
    ));
}

#[test]
fn test_decode_canonical_fields() {
    let id = Uuid::new_v4();
    let data = stored(&[
        ("id", &id.to_string()),
        ("name", "Ada"),
        ("email", "ada@example.com"),
        ("rating", "4"),
        ("comments", "Quick and friendly"),
        ("createdAt", "2024-01-01T10:00:00Z"),
        ("ownerId", "cafe-1"),
        ("surveyId", "survey-9"),
    ]);

    let decoded = FeedbackRecord::from_storage(&data).unwrap();
    assert_eq!(decoded.id, Some(id));
    assert_eq!(decoded.name.as_deref(), Some("Ada"));
    assert_eq!(decoded.rating.value(), 4);
    assert_eq!(decoded.created_at, ts("2024-01-01T10:00:00Z"));
    assert_eq!(decoded.owner_id.as_deref(), Some("cafe-1"));
    assert_eq!(decoded.survey_id.as_deref(), Some("survey-9"));
}

#[test]
fn test_decode_legacy_field_names() {
    let data = stored(&[
        ("rating", "2"),
        ("comments", "Cold food"),
        ("createdAt", "1704103200000"),
        ("owner_id", "cafe-legacy"),
        ("survey_id", "survey-legacy"),
    ]);

    let decoded = FeedbackRecord::from_storage(&data).unwrap();
    assert_eq!(decoded.id, None);
    assert_eq!(decoded.owner_id.as_deref(), Some("cafe-legacy"));
    assert_eq!(decoded.survey_id.as_deref(), Some("survey-legacy"));
    assert_eq!(decoded.created_at, ts("2024-01-01T10:00:00Z"));
}

#[test]
fn test_canonical_name_wins_over_legacy() {
    let data = stored(&[
        ("rating", "3"),
        ("comments", "Fine"),
        ("createdAt", "2024-01-01T10:00:00Z"),
        ("ownerId", "new-owner"),
        ("owner_id", "old-owner"),
    ]);

    let decoded = FeedbackRecord::from_storage(&data).unwrap();
    assert_eq!(decoded.owner_id.as_deref(), Some("new-owner"));
}

#[test]
fn test_decode_rejects_malformed_records() {
    let missing_rating = stored(&[("comments", "x"), ("createdAt", "2024-01-01T10:00:00Z")]);
    assert_eq!(
        FeedbackRecord::from_storage(&missing_rating),
        Err(RecordError::MissingField("rating"))
    );

    let out_of_range = stored(&[
        ("rating", "9"),
        ("comments", "x"),
        ("createdAt", "2024-01-01T10:00:00Z"),
    ]);
    assert_eq!(
        FeedbackRecord::from_storage(&out_of_range),
        Err(RecordError::RatingOutOfRange(9))
    );

    let bad_timestamp = stored(&[
        ("rating", "3"),
        ("comments", "x"),
        ("createdAt", "yesterday"),
    ]);
    assert!(matches!(
        FeedbackRecord::from_storage(&bad_timestamp),
        Err(RecordError::InvalidTimestamp(_))
    ));

    let blank_comments = stored(&[
        ("rating", "3"),
        ("comments", "   "),
        ("createdAt", "2024-01-01T10:00:00Z"),
    ]);
    assert_eq!(
        FeedbackRecord::from_storage(&blank_comments),
        Err(RecordError::MissingField("comments"))
    );
}

#[test]
fn test_storage_uses_canonical_names() {
    let mut original = record(5, "2024-01-01T10:00:00Z");
    original.id = Some(Uuid::new_v4());
    original.owner_id = Some("cafe-1".into());
    original.survey_id = Some("survey-9".into());

    let fields = original.to_storage();
    let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
    assert!(keys.contains(&"ownerId"));
    assert!(keys.contains(&"surveyId"));
    assert!(!keys.contains(&"owner_id"));
    assert!(!keys.contains(&"name"));

    let data: HashMap<String, String> = fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    assert_eq!(FeedbackRecord::from_storage(&data).unwrap(), original);
}

#[test]
fn test_json_accepts_legacy_and_writes_canonical() {
    let decoded: FeedbackRecord = serde_json::from_value(serde_json::json!({
        "rating": 4,
        "comments": "Nice",
        "createdAt": "2024-01-01T10:00:00Z",
        "owner_id": "cafe-1",
    }))
    .unwrap();
    assert_eq!(decoded.owner_id.as_deref(), Some("cafe-1"));

    let json = serde_json::to_value(&decoded).unwrap();
    assert_eq!(json["ownerId"], "cafe-1");
    assert!(json.get("owner_id").is_none());
    assert!(json.get("id").is_none());

    let invalid = serde_json::from_value::<FeedbackRecord>(serde_json::json!({
        "rating": 0,
        "comments": "Nice",
        "createdAt": "2024-01-01T10:00:00Z",
    }));
    assert!(invalid.is_err());
}

#[test]
fn test_submission_validation() {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let accepted = NewFeedback {
        name: Some("  ".into()),
        email: Some(" ada@example.com ".into()),
        owner_id: Some("cafe-1".into()),
        ..submission(5, "  Lovely  ")
    }
    .into_record(id, now)
    .unwrap();
    assert_eq!(accepted.id, Some(id));
    assert_eq!(accepted.created_at, now);
    assert_eq!(accepted.comments, "Lovely");
    assert_eq!(accepted.name, None);
    assert_eq!(accepted.email.as_deref(), Some("ada@example.com"));

    assert_eq!(
        submission(0, "Bad").into_record(id, now),
        Err(RecordError::RatingOutOfRange(0))
    );
    assert_eq!(
        submission(3, "  ").into_record(id, now),
        Err(RecordError::EmptyComments)
    );
    assert!(matches!(
        NewFeedback {
            email: Some("not-an-email".into()),
            ..submission(3, "Ok")
        }
        .into_record(id, now),
        Err(RecordError::InvalidEmail(_))
    ));
}

#[test]
fn test_json_rejects_blank_comments() {
    for comments in ["", "   "] {
        let decoded = serde_json::from_value::<FeedbackRecord>(serde_json::json!({
            "rating": 3,
            "comments": comments,
            "createdAt": "2024-01-01T10:00:00Z",
        }));
        assert!(decoded.is_err(), "accepted comments {comments:?}");
    }
}

#[test]
fn test_integral_double_ratings_on_both_boundaries() {
    let from_json: FeedbackRecord = serde_json::from_value(serde_json::json!({
        "rating": 4.0,
        "comments": "Nice",
        "createdAt": "2024-01-01T10:00:00Z",
    }))
    .unwrap();
    assert_eq!(from_json.rating.value(), 4);

    let from_storage = FeedbackRecord::from_storage(&stored(&[
        ("rating", "4.0"),
        ("comments", "Nice"),
        ("createdAt", "2024-01-01T10:00:00Z"),
    ]))
    .unwrap();
    assert_eq!(from_storage, from_json);

    assert!(
        serde_json::from_value::<FeedbackRecord>(serde_json::json!({
            "rating": 4.5,
            "comments": "Nice",
            "createdAt": "2024-01-01T10:00:00Z",
        }))
        .is_err()
    );
    assert!(matches!(
        FeedbackRecord::from_storage(&stored(&[
            ("rating", "4.5"),
            ("comments", "Nice"),
            ("createdAt", "2024-01-01T10:00:00Z"),
        ])),
        Err(RecordError::InvalidRating(_))
    ));

    let submitted: NewFeedback =
        serde_json::from_value(serde_json::json!({ "rating": 5.0, "comments": "Great" })).unwrap();
    let saved = submitted.into_record(Uuid::new_v4(), Utc::now()).unwrap();
    assert_eq!(saved.rating.value(), 5);
}
