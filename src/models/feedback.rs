use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),

    #[error("rating is not an integer: {0}")]
    InvalidRating(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("comments must not be empty")]
    EmptyComments,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// A star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRating", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RecordError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(RecordError::RatingOutOfRange(value))
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = RecordError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::try_from(value as i64)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A rating as clients send it. Some clients persisted ratings as doubles
/// (`4.0`); those are accepted when the value is integral.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Int(i64),
    Float(f64),
}

impl From<i64> for RawRating {
    fn from(value: i64) -> Self {
        RawRating::Int(value)
    }
}

impl TryFrom<RawRating> for Rating {
    type Error = RecordError;

    fn try_from(raw: RawRating) -> Result<Self, Self::Error> {
        match raw {
            RawRating::Int(value) => Rating::try_from(value),
            RawRating::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                Rating::try_from(value as i64)
            }
            RawRating::Float(value) => Err(RecordError::InvalidRating(value.to_string())),
        }
    }
}

impl std::str::FromStr for Rating {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let raw = match s.parse::<i64>() {
            Ok(value) => RawRating::Int(value),
            Err(_) => s
                .parse::<f64>()
                .map(RawRating::Float)
                .map_err(|_| RecordError::InvalidRating(s.to_string()))?,
        };
        Rating::try_from(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub rating: Rating,
    #[serde(deserialize_with = "non_blank")]
    pub comments: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "owner_id")]
    pub owner_id: Option<String>,
    #[serde(default, alias = "survey_id")]
    pub survey_id: Option<String>,
}

impl FeedbackRecord {
    /// UTC calendar day the record was submitted on.
    pub fn created_day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Decodes a record from its stored string map.
    ///
    /// Older documents spell the owner and survey links `owner_id` and
    /// `survey_id`; both are accepted here, the camelCase field wins when a
    /// document carries both.
    pub fn from_storage(data: &HashMap<String, String>) -> Result<Self, RecordError> {
        let id = match field(data, "id", None) {
            Some(raw) => {
                Some(Uuid::parse_str(raw).map_err(|_| RecordError::InvalidId(raw.to_string()))?)
            }
            None => None,
        };

        let rating = field(data, "rating", None)
            .ok_or(RecordError::MissingField("rating"))?
            .parse::<Rating>()?;

        let comments = field(data, "comments", None)
            .ok_or(RecordError::MissingField("comments"))?
            .to_string();

        let created_at = parse_timestamp(
            field(data, "createdAt", Some("created_at"))
                .ok_or(RecordError::MissingField("createdAt"))?,
        )?;

        Ok(FeedbackRecord {
            id,
            name: field(data, "name", None).map(str::to_string),
            email: field(data, "email", None).map(str::to_string),
            rating,
            comments,
            created_at,
            owner_id: field(data, "ownerId", Some("owner_id")).map(str::to_string),
            survey_id: field(data, "surveyId", Some("survey_id")).map(str::to_string),
        })
    }

    /// Encodes the record with canonical field names only.
    pub fn to_storage(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(8);
        if let Some(id) = self.id {
            fields.push(("id", id.to_string()));
        }
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(email) = &self.email {
            fields.push(("email", email.clone()));
        }
        fields.push(("rating", self.rating.value().to_string()));
        fields.push(("comments", self.comments.clone()));
        fields.push(("createdAt", self.created_at.to_rfc3339()));
        if let Some(owner_id) = &self.owner_id {
            fields.push(("ownerId", owner_id.clone()));
        }
        if let Some(survey_id) = &self.survey_id {
            fields.push(("surveyId", survey_id.clone()));
        }
        fields
    }
}

fn non_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::custom(RecordError::EmptyComments));
    }
    Ok(value)
}

fn field<'a>(
    data: &'a HashMap<String, String>,
    canonical: &str,
    legacy: Option<&str>,
) -> Option<&'a str> {
    let non_empty = |key: &str| {
        data.get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    };
    non_empty(canonical).or_else(|| legacy.and_then(non_empty))
}

/// Accepts RFC 3339 strings and integer epoch milliseconds.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| RecordError::InvalidTimestamp(raw.to_string()))
}

/// Submission payload, before the store assigns an id and timestamp.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub rating: RawRating,
    pub comments: String,
    #[serde(default, alias = "owner_id")]
    pub owner_id: Option<String>,
    #[serde(default, alias = "survey_id")]
    pub survey_id: Option<String>,
}

impl NewFeedback {
    pub fn into_record(
        self,
        id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Result<FeedbackRecord, RecordError> {
        let rating = Rating::try_from(self.rating)?;

        let comments = self.comments.trim().to_string();
        if comments.is_empty() {
            return Err(RecordError::EmptyComments);
        }

        let email = normalize(self.email);
        if let Some(email) = &email {
            if !email.contains('@') {
                return Err(RecordError::InvalidEmail(email.clone()));
            }
        }

        Ok(FeedbackRecord {
            id: Some(id),
            name: normalize(self.name),
            email,
            rating,
            comments,
            created_at,
            owner_id: normalize(self.owner_id),
            survey_id: normalize(self.survey_id),
        })
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
