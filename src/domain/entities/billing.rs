use serde::{Deserialize, Serialize};

use crate::domain::entities::form::{
    number_value, text_value, whole_number_value, Editable, FormError, FormField, FormMode,
    FormValues,
};
use crate::domain::entities::record::{
    deserialize_record_key, locale_cmp, Column, Record, RecordId,
};
use crate::domain::list_filter::SortOption;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    #[serde(alias = "name", alias = "plan_name")]
    pub plan_name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default, alias = "duration_days")]
    pub duration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlanDraft {
    pub plan_name: String,
    pub price: f64,
    pub currency: String,
    pub duration_days: u32,
}

/// `1234.5` -> `1,234.50`.
pub fn format_price(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

impl Record for PricingPlan {
    const COLLECTION: &'static str = "pricing";
    const TITLE: &'static str = "Pricing";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        self.plan_name.clone()
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        vec![
            SortOption {
                key: "nameAsc",
                label: "Plan (A-Z)",
                compare: |a: &Self, b: &Self| locale_cmp(&a.plan_name, &b.plan_name),
            },
            SortOption {
                key: "nameDesc",
                label: "Plan (Z-A)",
                compare: |a: &Self, b: &Self| locale_cmp(&b.plan_name, &a.plan_name),
            },
            SortOption {
                key: "priceAsc",
                label: "Price (low to high)",
                compare: |a: &Self, b: &Self| a.price.total_cmp(&b.price),
            },
            SortOption {
                key: "priceDesc",
                label: "Price (high to low)",
                compare: |a: &Self, b: &Self| b.price.total_cmp(&a.price),
            },
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                header: "Plan",
                cell: |p: &Self| p.plan_name.clone(),
            },
            Column {
                header: "Price",
                cell: |p: &Self| format_price(p.price),
            },
            Column {
                header: "Currency",
                cell: |p: &Self| p.currency.clone(),
            },
            Column {
                header: "Days",
                cell: |p: &Self| p.duration_days.to_string(),
            },
        ]
    }
}

const PRICING_FIELDS: [FormField; 4] = [
    FormField::required("planName", "Plan"),
    FormField::required("price", "Price"),
    FormField::optional("currency", "Currency"),
    FormField::required("durationDays", "Duration (days)"),
];

impl Editable for PricingPlan {
    type Draft = PricingPlanDraft;

    fn form_fields() -> Vec<FormField> {
        PRICING_FIELDS.to_vec()
    }

    fn to_form(&self) -> FormValues {
        FormValues::from([
            ("planName".to_string(), self.plan_name.clone()),
            ("price".to_string(), self.price.to_string()),
            ("currency".to_string(), self.currency.clone()),
            ("durationDays".to_string(), self.duration_days.to_string()),
        ])
    }

    fn draft_from_form(
        values: &FormValues,
        _mode: FormMode,
    ) -> Result<PricingPlanDraft, FormError> {
        let price = number_value(values, &PRICING_FIELDS[1])?;
        if price < 0.0 {
            return Err(FormError::Invalid {
                label: PRICING_FIELDS[1].label,
                reason: "cannot be negative",
            });
        }
        let currency = text_value(values, &PRICING_FIELDS[2])?;
        Ok(PricingPlanDraft {
            plan_name: text_value(values, &PRICING_FIELDS[0])?,
            price,
            currency: if currency.is_empty() {
                "USD".to_string()
            } else {
                currency.to_uppercase()
            },
            duration_days: whole_number_value(values, &PRICING_FIELDS[3])?,
        })
    }
}
