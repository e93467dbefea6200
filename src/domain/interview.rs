//! Interview domain entity and related types.
//!
//! Interviews are stored as loosely-typed documents. Decoding is lossless:
//! well-known fields with the expected type land in typed struct fields,
//! everything else is kept verbatim in `extra` and written back unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::value::{Document, Value};
use crate::config::{
    FIELD_COMPANY, FIELD_CONTACT_PHONE, FIELD_CONTACT_TELEGRAM, FIELD_CONTACT_WHATSAPP,
    FIELD_CREATED_AT, FIELD_HR_NAME, FIELD_ID, FIELD_RESULT, FIELD_SALARY_FROM, FIELD_SALARY_TO,
    FIELD_STAGES, FIELD_VACANCY_LINK, RESERVED_FIELDS, RESULT_OFFER, RESULT_REFUSAL,
    STAGE_FIELD_DATE, STAGE_FIELD_DESCRIPTION, STAGE_FIELD_NAME,
};
use crate::errors::{AppError, AppResult};

/// Outcome category of an interview.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum InterviewResult {
    #[default]
    Refusal,
    Offer,
    /// Any other stored value, preserved as written
    Other(String),
}

impl InterviewResult {
    pub fn as_str(&self) -> &str {
        match self {
            InterviewResult::Refusal => RESULT_REFUSAL,
            InterviewResult::Offer => RESULT_OFFER,
            InterviewResult::Other(s) => s,
        }
    }
}

impl From<&str> for InterviewResult {
    fn from(s: &str) -> Self {
        match s {
            RESULT_REFUSAL => InterviewResult::Refusal,
            RESULT_OFFER => InterviewResult::Offer,
            other => InterviewResult::Other(other.to_string()),
        }
    }
}

impl FromStr for InterviewResult {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("result must not be empty"));
        }
        Ok(InterviewResult::from(trimmed))
    }
}

impl fmt::Display for InterviewResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&InterviewResult> for Value {
    fn from(result: &InterviewResult) -> Self {
        Value::String(result.as_str().to_string())
    }
}

/// Date of a stage after reading it back from storage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageDate {
    /// A point in time, normalized from the provider timestamp
    At(DateTime<Utc>),
    /// A stored value that was not a timestamp, passed through unchanged
    Unrecognized(Value),
}

impl StageDate {
    /// Normalize a stored value. Provider timestamps become plain dates;
    /// anything else, including out-of-range timestamps, is kept as is.
    fn from_stored(value: Value) -> Self {
        match value {
            Value::Timestamp(ts) => match ts.to_datetime() {
                Some(at) => StageDate::At(at),
                None => StageDate::Unrecognized(value),
            },
            other => StageDate::Unrecognized(other),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            StageDate::At(at) => Value::from(*at),
            StageDate::Unrecognized(v) => v.clone(),
        }
    }
}

impl From<DateTime<Utc>> for StageDate {
    fn from(at: DateTime<Utc>) -> Self {
        StageDate::At(at)
    }
}

/// One round of an interview (phone screen, onsite, ...).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stage {
    pub name: Option<String>,
    pub date: Option<StageDate>,
    pub description: Option<String>,
    pub extra: Document,
}

impl Stage {
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: Some(name.into()),
            date: Some(StageDate::At(date)),
            ..Default::default()
        }
    }

    fn from_fields(mut fields: Document) -> Self {
        Self {
            name: take_string(&mut fields, STAGE_FIELD_NAME),
            date: fields.remove(STAGE_FIELD_DATE).map(StageDate::from_stored),
            description: take_string(&mut fields, STAGE_FIELD_DESCRIPTION),
            extra: fields,
        }
    }

    fn to_value(&self) -> Value {
        let mut fields = self.extra.clone();
        put(&mut fields, STAGE_FIELD_NAME, self.name.clone().map(Value::from));
        put(&mut fields, STAGE_FIELD_DATE, self.date.as_ref().map(StageDate::to_value));
        put(&mut fields, STAGE_FIELD_DESCRIPTION, self.description.clone().map(Value::from));
        Value::Map(fields)
    }
}

/// Interview as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Interview {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub result: Option<InterviewResult>,
    pub company: Option<String>,
    pub vacancy_link: Option<String>,
    pub hr_name: Option<String>,
    pub contact_telegram: Option<String>,
    pub contact_whatsapp: Option<String>,
    pub contact_phone: Option<String>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub stages: Vec<Stage>,
    pub extra: Document,
}

impl Interview {
    /// Decode a stored document, normalizing every stage date.
    pub fn from_document(mut fields: Document) -> AppResult<Self> {
        let id = take_string(&mut fields, FIELD_ID)
            .ok_or_else(|| AppError::malformed("missing string field `id`"))?;

        let created_at = match fields.remove(FIELD_CREATED_AT) {
            Some(Value::Timestamp(ts)) => ts
                .to_datetime()
                .ok_or_else(|| AppError::malformed(format!("`createdAt` out of range in {}", id)))?,
            _ => {
                return Err(AppError::malformed(format!(
                    "missing timestamp field `createdAt` in {}",
                    id
                )))
            }
        };

        // Stages decode only when every entry is a map; otherwise the whole
        // value stays in `extra` untouched.
        let stages = match fields.remove(FIELD_STAGES) {
            Some(Value::Array(items)) if items.iter().all(|item| item.as_map().is_some()) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Map(stage) => Some(Stage::from_fields(stage)),
                    _ => None,
                })
                .collect(),
            Some(other) => {
                fields.insert(FIELD_STAGES.to_string(), other);
                Vec::new()
            }
            None => Vec::new(),
        };

        Ok(Self {
            id,
            created_at,
            result: take_string(&mut fields, FIELD_RESULT).map(|s| InterviewResult::from(s.as_str())),
            company: take_string(&mut fields, FIELD_COMPANY),
            vacancy_link: take_string(&mut fields, FIELD_VACANCY_LINK),
            hr_name: take_string(&mut fields, FIELD_HR_NAME),
            contact_telegram: take_string(&mut fields, FIELD_CONTACT_TELEGRAM),
            contact_whatsapp: take_string(&mut fields, FIELD_CONTACT_WHATSAPP),
            contact_phone: take_string(&mut fields, FIELD_CONTACT_PHONE),
            salary_from: take_i64(&mut fields, FIELD_SALARY_FROM),
            salary_to: take_i64(&mut fields, FIELD_SALARY_TO),
            stages,
            extra: fields,
        })
    }

    /// Encode back into the stored shape.
    pub fn to_document(&self) -> Document {
        let mut fields = self.extra.clone();
        fields.insert(FIELD_ID.to_string(), Value::from(self.id.clone()));
        fields.insert(FIELD_CREATED_AT.to_string(), Value::from(self.created_at));
        if !self.stages.is_empty() {
            fields.insert(
                FIELD_STAGES.to_string(),
                Value::Array(self.stages.iter().map(Stage::to_value).collect()),
            );
        }
        put(&mut fields, FIELD_RESULT, self.result.as_ref().map(Value::from));
        encode_common(
            &mut fields,
            CommonFields {
                company: self.company.clone(),
                vacancy_link: self.vacancy_link.clone(),
                hr_name: self.hr_name.clone(),
                contact_telegram: self.contact_telegram.clone(),
                contact_whatsapp: self.contact_whatsapp.clone(),
                contact_phone: self.contact_phone.clone(),
                salary_from: self.salary_from,
                salary_to: self.salary_to,
            },
        );
        fields
    }

    /// Plain JSON rendering for display.
    pub fn to_json(&self) -> serde_json::Value {
        Value::Map(self.to_document()).to_json()
    }
}

/// Caller-supplied interview data: everything except `id` and `createdAt`.
///
/// `None` marks an absent field. Absent fields are stripped before the
/// payload reaches storage; an explicit `Value::Null` is kept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterviewFields {
    pub company: Option<String>,
    pub vacancy_link: Option<String>,
    pub hr_name: Option<String>,
    pub contact_telegram: Option<String>,
    pub contact_whatsapp: Option<String>,
    pub contact_phone: Option<String>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub stages: Option<Vec<Stage>>,
    pub result: Option<InterviewResult>,
    pub extra: BTreeMap<String, Option<Value>>,
}

impl InterviewFields {
    /// Strip absent fields and encode the rest.
    ///
    /// `id` and `createdAt` keys in `extra` are dropped; typed fields win
    /// over `extra` entries with the same name.
    pub fn into_document(self) -> Document {
        let mut fields: Document = self
            .extra
            .into_iter()
            .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();

        put(
            &mut fields,
            FIELD_STAGES,
            self.stages
                .map(|stages| Value::Array(stages.iter().map(Stage::to_value).collect())),
        );
        put(&mut fields, FIELD_RESULT, self.result.as_ref().map(Value::from));
        encode_common(
            &mut fields,
            CommonFields {
                company: self.company,
                vacancy_link: self.vacancy_link,
                hr_name: self.hr_name,
                contact_telegram: self.contact_telegram,
                contact_whatsapp: self.contact_whatsapp,
                contact_phone: self.contact_phone,
                salary_from: self.salary_from,
                salary_to: self.salary_to,
            },
        );
        fields
    }
}

/// A loaded interview turned back into an editable payload.
impl From<Interview> for InterviewFields {
    fn from(interview: Interview) -> Self {
        Self {
            company: interview.company,
            vacancy_link: interview.vacancy_link,
            hr_name: interview.hr_name,
            contact_telegram: interview.contact_telegram,
            contact_whatsapp: interview.contact_whatsapp,
            contact_phone: interview.contact_phone,
            salary_from: interview.salary_from,
            salary_to: interview.salary_to,
            stages: Some(interview.stages),
            result: interview.result,
            extra: interview
                .extra
                .into_iter()
                .map(|(k, v)| (k, Some(v)))
                .collect(),
        }
    }
}

struct CommonFields {
    company: Option<String>,
    vacancy_link: Option<String>,
    hr_name: Option<String>,
    contact_telegram: Option<String>,
    contact_whatsapp: Option<String>,
    contact_phone: Option<String>,
    salary_from: Option<i64>,
    salary_to: Option<i64>,
}

fn encode_common(fields: &mut Document, common: CommonFields) {
    put(fields, FIELD_COMPANY, common.company.map(Value::from));
    put(fields, FIELD_VACANCY_LINK, common.vacancy_link.map(Value::from));
    put(fields, FIELD_HR_NAME, common.hr_name.map(Value::from));
    put(fields, FIELD_CONTACT_TELEGRAM, common.contact_telegram.map(Value::from));
    put(fields, FIELD_CONTACT_WHATSAPP, common.contact_whatsapp.map(Value::from));
    put(fields, FIELD_CONTACT_PHONE, common.contact_phone.map(Value::from));
    put(fields, FIELD_SALARY_FROM, common.salary_from.map(Value::from));
    put(fields, FIELD_SALARY_TO, common.salary_to.map(Value::from));
}

fn put(fields: &mut Document, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        fields.insert(key.to_string(), value);
    }
}

/// Remove `key` when it holds a string; other types stay in place.
fn take_string(fields: &mut Document, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            fields.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

fn take_i64(fields: &mut Document, key: &str) -> Option<i64> {
    match fields.remove(key) {
        Some(Value::Integer(n)) => Some(n),
        Some(other) => {
            fields.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::Timestamp;
    use chrono::TimeZone;

    fn stored_interview() -> Document {
        let mut stage = Document::new();
        stage.insert("name".into(), Value::from("phone screen"));
        stage.insert("date".into(), Value::Timestamp(Timestamp::new(1_714_557_600, 0)));

        let mut doc = Document::new();
        doc.insert("id".into(), Value::from("abc"));
        doc.insert("createdAt".into(), Value::Timestamp(Timestamp::new(1_700_000_000, 5)));
        doc.insert("result".into(), Value::from("Offer"));
        doc.insert("company".into(), Value::from("Acme"));
        doc.insert("salaryFrom".into(), Value::from("negotiable"));
        doc.insert("stages".into(), Value::Array(vec![Value::Map(stage)]));
        doc.insert("title".into(), Value::from("Backend engineer"));
        doc
    }

    #[test]
    fn test_result_parsing() {
        assert_eq!(InterviewResult::from("Refusal"), InterviewResult::Refusal);
        assert_eq!(InterviewResult::from("Offer"), InterviewResult::Offer);
        assert_eq!(
            InterviewResult::from("Pending"),
            InterviewResult::Other("Pending".into())
        );
        assert!("  ".parse::<InterviewResult>().is_err());
        assert_eq!(InterviewResult::default().to_string(), "Refusal");
    }

    #[test]
    fn test_decode_normalizes_stage_dates() {
        let interview = Interview::from_document(stored_interview()).unwrap();

        assert_eq!(interview.id, "abc");
        assert_eq!(interview.result, Some(InterviewResult::Offer));
        assert_eq!(interview.company.as_deref(), Some("Acme"));
        assert_eq!(interview.stages.len(), 1);
        assert_eq!(
            interview.stages[0].date,
            Some(StageDate::At(Utc.timestamp_opt(1_714_557_600, 0).unwrap()))
        );
    }

    #[test]
    fn test_decode_keeps_unexpected_types_in_extra() {
        let interview = Interview::from_document(stored_interview()).unwrap();

        assert_eq!(interview.salary_from, None);
        assert_eq!(interview.extra.get("salaryFrom"), Some(&Value::from("negotiable")));
        assert_eq!(interview.extra.get("title"), Some(&Value::from("Backend engineer")));
    }

    #[test]
    fn test_non_timestamp_stage_date_passes_through() {
        let mut stage = Document::new();
        stage.insert("date".into(), Value::from("next week"));
        let mut doc = stored_interview();
        doc.insert("stages".into(), Value::Array(vec![Value::Map(stage), Value::Map(Document::new())]));

        let interview = Interview::from_document(doc).unwrap();
        assert_eq!(
            interview.stages[0].date,
            Some(StageDate::Unrecognized(Value::from("next week")))
        );
        assert_eq!(interview.stages[1].date, None);
    }

    #[test]
    fn test_non_map_stage_entries_pass_through() {
        let stages = Value::Array(vec![
            Value::from("phone screen"),
            Value::Map(Document::new()),
        ]);
        let mut doc = stored_interview();
        doc.insert("stages".into(), stages.clone());

        let interview = Interview::from_document(doc.clone()).unwrap();
        assert!(interview.stages.is_empty());
        assert_eq!(interview.extra.get("stages"), Some(&stages));
        assert_eq!(interview.to_document(), doc);
    }

    #[test]
    fn test_out_of_range_stage_date_passes_through() {
        let far = Value::Timestamp(Timestamp::new(i64::MAX, 0));
        let mut stage = Document::new();
        stage.insert("date".into(), far.clone());
        let mut doc = stored_interview();
        doc.insert("stages".into(), Value::Array(vec![Value::Map(stage)]));

        let interview = Interview::from_document(doc).unwrap();
        assert_eq!(interview.stages[0].date, Some(StageDate::Unrecognized(far)));
    }

    #[test]
    fn test_decode_requires_created_at() {
        let mut doc = stored_interview();
        doc.remove("createdAt");
        let err = Interview::from_document(doc).unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(_)));
    }

    #[test]
    fn test_encode_round_trips_stored_document() {
        let doc = stored_interview();
        let interview = Interview::from_document(doc.clone()).unwrap();
        assert_eq!(interview.to_document(), doc);
    }

    #[test]
    fn test_fields_strip_absent_values() {
        let mut extra = BTreeMap::new();
        extra.insert("notes".to_string(), None);
        extra.insert("referral".to_string(), Some(Value::Null));
        let fields = InterviewFields {
            company: Some("Acme".into()),
            hr_name: None,
            extra,
            ..Default::default()
        };

        let doc = fields.into_document();
        assert_eq!(doc.get("company"), Some(&Value::from("Acme")));
        assert!(!doc.contains_key("hrName"));
        assert!(!doc.contains_key("notes"));
        assert!(!doc.contains_key("stages"));
        assert_eq!(doc.get("referral"), Some(&Value::Null));
    }

    #[test]
    fn test_fields_drop_reserved_keys() {
        let mut extra = BTreeMap::new();
        extra.insert("id".to_string(), Some(Value::from("forged")));
        extra.insert("createdAt".to_string(), Some(Value::Integer(0)));
        let doc = InterviewFields { extra, ..Default::default() }.into_document();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_stage_dates_are_written_as_timestamps() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let fields = InterviewFields {
            stages: Some(vec![Stage::new("onsite", at)]),
            ..Default::default()
        };

        let doc = fields.into_document();
        let stage = doc["stages"].as_array().unwrap()[0].as_map().unwrap();
        assert_eq!(stage["date"], Value::Timestamp(Timestamp::from_datetime(at)));
        assert_eq!(stage["name"], Value::from("onsite"));
    }
}
