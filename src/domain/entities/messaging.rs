//! Canned chatbot replies and the keyword block-list.

use serde::{Deserialize, Serialize};

use crate::domain::entities::form::{text_value, Editable, FormError, FormField, FormMode, FormValues};
use crate::domain::entities::record::{
    deserialize_record_key, locale_cmp, Column, Record, RecordId,
};
use crate::domain::list_filter::SortOption;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultReply {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultReplyDraft {
    pub question: String,
    pub answer: String,
}

impl Record for DefaultReply {
    const COLLECTION: &'static str = "default-replies";
    const TITLE: &'static str = "Default replies";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        self.question.clone()
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        vec![
            SortOption {
                key: "questionAsc",
                label: "Question (A-Z)",
                compare: |a: &Self, b: &Self| locale_cmp(&a.question, &b.question),
            },
            SortOption {
                key: "questionDesc",
                label: "Question (Z-A)",
                compare: |a: &Self, b: &Self| locale_cmp(&b.question, &a.question),
            },
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                header: "Question",
                cell: |r: &Self| r.question.clone(),
            },
            Column {
                header: "Answer",
                cell: |r: &Self| r.answer.clone(),
            },
        ]
    }
}

const REPLY_FIELDS: [FormField; 2] = [
    FormField::required("question", "Question"),
    FormField::required("answer", "Answer"),
];

impl Editable for DefaultReply {
    type Draft = DefaultReplyDraft;

    fn form_fields() -> Vec<FormField> {
        REPLY_FIELDS.to_vec()
    }

    fn to_form(&self) -> FormValues {
        FormValues::from([
            ("question".to_string(), self.question.clone()),
            ("answer".to_string(), self.answer.clone()),
        ])
    }

    fn draft_from_form(
        values: &FormValues,
        _mode: FormMode,
    ) -> Result<DefaultReplyDraft, FormError> {
        Ok(DefaultReplyDraft {
            question: text_value(values, &REPLY_FIELDS[0])?,
            answer: text_value(values, &REPLY_FIELDS[1])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForbiddenKeyword {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    #[serde(alias = "word")]
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForbiddenKeywordDraft {
    pub keyword: String,
}

impl Record for ForbiddenKeyword {
    const COLLECTION: &'static str = "forbidden-keywords";
    const TITLE: &'static str = "Forbidden keywords";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        self.keyword.clone()
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        vec![
            SortOption {
                key: "keywordAsc",
                label: "Keyword (A-Z)",
                compare: |a: &Self, b: &Self| locale_cmp(&a.keyword, &b.keyword),
            },
            SortOption {
                key: "keywordDesc",
                label: "Keyword (Z-A)",
                compare: |a: &Self, b: &Self| locale_cmp(&b.keyword, &a.keyword),
            },
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![Column {
            header: "Keyword",
            cell: |k: &Self| k.keyword.clone(),
        }]
    }
}

const KEYWORD_FIELD: FormField = FormField::required("keyword", "Keyword");

impl Editable for ForbiddenKeyword {
    type Draft = ForbiddenKeywordDraft;

    fn form_fields() -> Vec<FormField> {
        vec![KEYWORD_FIELD]
    }

    fn to_form(&self) -> FormValues {
        FormValues::from([("keyword".to_string(), self.keyword.clone())])
    }

    fn draft_from_form(
        values: &FormValues,
        _mode: FormMode,
    ) -> Result<ForbiddenKeywordDraft, FormError> {
        let keyword = text_value(values, &KEYWORD_FIELD)?;
        if keyword.split_whitespace().count() > 1 {
            return Err(FormError::Invalid {
                label: KEYWORD_FIELD.label,
                reason: "must be a single word",
            });
        }
        Ok(ForbiddenKeywordDraft {
            keyword: keyword.to_lowercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_is_lowercased_and_single_word() {
        let ok = FormValues::from([("keyword".to_string(), " Cheat ".to_string())]);
        let draft = ForbiddenKeyword::draft_from_form(&ok, FormMode::Create)
            .expect("single word should validate");
        assert_eq!(draft.keyword, "cheat");

        let phrase = FormValues::from([("keyword".to_string(), "copy paste".to_string())]);
        assert!(ForbiddenKeyword::draft_from_form(&phrase, FormMode::Create).is_err());
    }

    #[test]
    fn reply_requires_both_fields() {
        let values = FormValues::from([
            ("question".to_string(), "Opening hours?".to_string()),
            ("answer".to_string(), String::new()),
        ]);
        assert_eq!(
            DefaultReply::draft_from_form(&values, FormMode::Create),
            Err(FormError::Missing("Answer"))
        );
    }
}
