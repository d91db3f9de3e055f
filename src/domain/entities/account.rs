//! Dashboard user accounts and the audit trail they leave behind.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::form::{
    email_value, text_value, Editable, FormError, FormField, FormMode, FormValues,
};
use crate::domain::entities::record::{
    deserialize_record_key, first_key, name_sort_options, Column, Named, Record, RecordId,
};
use crate::domain::list_filter::SortOption;

pub const MIN_PASSWORD_LEN: usize = 6;

pub const USER_ROLES: [&str; 3] = ["admin", "staff", "viewer"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAccountDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Named for UserAccount {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for UserAccount {
    const COLLECTION: &'static str = "users";
    const TITLE: &'static str = "Users";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        format!("{} {}", self.name, self.email)
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        let mut options = name_sort_options();
        options.push(SortOption {
            key: "role",
            label: "Role",
            compare: |a: &Self, b: &Self| a.role.cmp(&b.role),
        });
        options
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                header: "Name",
                cell: |u: &Self| u.name.clone(),
            },
            Column {
                header: "Email",
                cell: |u: &Self| u.email.clone(),
            },
            Column {
                header: "Role",
                cell: |u: &Self| u.role.clone(),
            },
        ]
    }
}

const USER_FIELDS: [FormField; 4] = [
    FormField::optional("name", "Name"),
    FormField::required("email", "Email"),
    FormField::required("role", "Role"),
    FormField::required("password", "Password")
        .secret()
        .create_only(),
];

impl Editable for UserAccount {
    type Draft = UserAccountDraft;

    fn form_fields() -> Vec<FormField> {
        USER_FIELDS.to_vec()
    }

    fn to_form(&self) -> FormValues {
        FormValues::from([
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("role".to_string(), self.role.clone()),
        ])
    }

    fn draft_from_form(values: &FormValues, mode: FormMode) -> Result<UserAccountDraft, FormError> {
        let role = text_value(values, &USER_FIELDS[2])?.to_lowercase();
        if !USER_ROLES.contains(&role.as_str()) {
            return Err(FormError::Invalid {
                label: USER_FIELDS[2].label,
                reason: "expected admin, staff or viewer",
            });
        }

        let password = match mode {
            FormMode::Create => {
                let password = text_value(values, &USER_FIELDS[3])?;
                if password.chars().count() < MIN_PASSWORD_LEN {
                    return Err(FormError::Invalid {
                        label: USER_FIELDS[3].label,
                        reason: "must be at least 6 characters",
                    });
                }
                Some(password)
            }
            FormMode::Edit => None,
        };

        Ok(UserAccountDraft {
            name: text_value(values, &USER_FIELDS[0])?,
            email: email_value(values, &USER_FIELDS[1])?,
            role,
            password,
        })
    }
}

/// One entry of the server-side audit trail. Read-only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    #[serde(flatten, deserialize_with = "deserialize_actor")]
    pub actor: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub entity: String,
    #[serde(flatten, deserialize_with = "deserialize_created_at")]
    pub created_at: String,
}

fn deserialize_actor<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(first_key(deserializer, &["actor", "user", "userEmail"])?.unwrap_or_default())
}

fn deserialize_created_at<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(first_key(deserializer, &["createdAt", "created_at", "timestamp"])?.unwrap_or_default())
}

/// Epoch seconds of an RFC 3339 or `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}

/// Short display form; unparseable input is shown as-is.
pub fn format_timestamp(text: &str) -> String {
    match parse_timestamp(text).and_then(|secs| DateTime::from_timestamp(secs, 0)) {
        Some(utc) => utc.format("%Y-%m-%d %H:%M").to_string(),
        None => text.to_string(),
    }
}

fn compare_created(a: &AuditLog, b: &AuditLog) -> std::cmp::Ordering {
    match (parse_timestamp(&a.created_at), parse_timestamp(&b.created_at)) {
        (Some(left), Some(right)) => left.cmp(&right),
        _ => a.created_at.cmp(&b.created_at),
    }
}

impl Record for AuditLog {
    const COLLECTION: &'static str = "logs";
    const TITLE: &'static str = "Audit logs";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        format!("{} {} {}", self.actor, self.action, self.entity)
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        vec![
            SortOption {
                key: "newest",
                label: "Newest first",
                compare: |a: &Self, b: &Self| compare_created(b, a),
            },
            SortOption {
                key: "oldest",
                label: "Oldest first",
                compare: compare_created,
            },
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                header: "When",
                cell: |l: &Self| format_timestamp(&l.created_at),
            },
            Column {
                header: "User",
                cell: |l: &Self| l.actor.clone(),
            },
            Column {
                header: "Action",
                cell: |l: &Self| l.action.clone(),
            },
            Column {
                header: "Entity",
                cell: |l: &Self| l.entity.clone(),
            },
        ]
    }
}
