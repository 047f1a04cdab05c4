use chrono::{DateTime, Utc};
use portfolio_core_contact_contracts::ContactPage;
use portfolio_models::{
    contact::{ContactId, ContactRecord, ContactSubmission, SubmissionField},
    pagination::PageMeta,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Contact form body. Fields are kept as raw json values so that missing
/// fields and fields of the wrong type can be told apart.
#[derive(Debug, Default, Deserialize)]
pub struct ApiContactSubmission {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: submission_field(value.name),
            email: submission_field(value.email),
            phone: submission_field(value.phone),
            message: submission_field(value.message),
        }
    }
}

/// Falsy json values (`null`, `false`, `0` and `""`) count as missing.
fn submission_field(value: Option<Value>) -> SubmissionField {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => SubmissionField::Missing,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => SubmissionField::Missing,
        Some(Value::String(s)) if s.is_empty() => SubmissionField::Missing,
        Some(Value::String(s)) => SubmissionField::Text(s),
        Some(_) => SubmissionField::NotAString,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactSubmitted {
    pub success: bool,
    pub message: &'static str,
    pub contact_id: ContactId,
}

impl From<ContactId> for ApiContactSubmitted {
    fn from(contact_id: ContactId) -> Self {
        Self {
            success: true,
            message: "Message sent successfully",
            contact_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactRecord {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactRecord> for ApiContactRecord {
    fn from(value: ContactRecord) -> Self {
        Self {
            id: value.id,
            name: value.name.into_inner(),
            email: value.email.into_inner(),
            phone: value.phone.into_inner(),
            message: value.message.into_inner(),
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactPage {
    pub data: Vec<ApiContactRecord>,
    pub meta: ApiPageMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl From<ContactPage> for ApiContactPage {
    fn from(value: ContactPage) -> Self {
        let PageMeta {
            page,
            limit,
            total,
            total_pages,
        } = value.meta;

        Self {
            data: value.records.into_iter().map(Into::into).collect(),
            meta: ApiPageMeta {
                page: *page,
                limit: *limit,
                total,
                total_pages,
            },
        }
    }
}

/// Raw pagination query parameters, parsed leniently later on.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApiPageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ApiPageQuery {
    /// Picks the parameters out of the decoded query string. A repeated key
    /// keeps its first value and unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |mut query, (key, value)| {
                let slot = match key.as_str() {
                    "page" => &mut query.page,
                    "limit" => &mut query.limit,
                    _ => return query,
                };
                slot.get_or_insert(value);
                query
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn falsy_values_are_missing() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(submission_field(Some(value)), SubmissionField::Missing);
        }
        assert_eq!(submission_field(None), SubmissionField::Missing);
    }

    #[test]
    fn truthy_non_strings() {
        for value in [json!(true), json!(42), json!(["a"]), json!({"a": 1})] {
            assert_eq!(submission_field(Some(value)), SubmissionField::NotAString);
        }
    }

    #[test]
    fn strings_are_kept_verbatim() {
        assert_eq!(
            submission_field(Some(json!("  hi "))),
            SubmissionField::Text("  hi ".into())
        );
    }

    #[test]
    fn record_uses_camel_case() {
        let record = portfolio_demo::contact::ALICE.clone();
        let id = record.id;

        let value = serde_json::to_value(ApiContactRecord::from(record)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": id.to_string(),
                "name": "Alice Example",
                "email": "alice@example.com",
                "phone": "0123456789",
                "message": "Hi! I would love to talk about a freelance project.",
                "createdAt": "2024-01-01T09:00:00Z",
            })
        );
    }

    #[test]
    fn page_query_first_value_wins() {
        let pairs = [("limit", "5"), ("page", "1"), ("page", "2"), ("sort", "x")]
            .map(|(k, v)| (k.to_owned(), v.to_owned()));

        let query = ApiPageQuery::from_pairs(pairs);

        assert_eq!(
            query,
            ApiPageQuery {
                page: Some("1".into()),
                limit: Some("5".into()),
            }
        );
    }
}
