//! Schools and the classes, teachers and students that belong to them.

use serde::{Deserialize, Serialize};

use crate::domain::entities::form::{
    email_value, link_value, text_value, Editable, FormError, FormField, FormMode, FormValues,
};
use crate::domain::entities::record::{
    deserialize_record_key, locale_cmp, name_sort_options, Column, Named, Record, RecordId,
};
use crate::domain::list_filter::SortOption;

fn id_text(id: &Option<RecordId>) -> String {
    id.as_ref().map(|id| id.0.clone()).unwrap_or_default()
}

fn form_values<const N: usize>(pairs: [(&str, String); N]) -> FormValues {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDraft {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl Named for School {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for School {
    const COLLECTION: &'static str = "schools";
    const TITLE: &'static str = "Schools";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        self.name.clone()
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        name_sort_options()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                header: "Name",
                cell: |s: &Self| s.name.clone(),
            },
            Column {
                header: "Address",
                cell: |s: &Self| s.address.clone(),
            },
            Column {
                header: "Email",
                cell: |s: &Self| s.email.clone(),
            },
            Column {
                header: "Phone",
                cell: |s: &Self| s.phone.clone(),
            },
        ]
    }
}

const SCHOOL_FIELDS: [FormField; 4] = [
    FormField::required("name", "Name"),
    FormField::optional("address", "Address"),
    FormField::optional("email", "Email"),
    FormField::optional("phone", "Phone"),
];

impl Editable for School {
    type Draft = SchoolDraft;

    fn form_fields() -> Vec<FormField> {
        SCHOOL_FIELDS.to_vec()
    }

    fn to_form(&self) -> FormValues {
        form_values([
            ("name", self.name.clone()),
            ("address", self.address.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
        ])
    }

    fn draft_from_form(values: &FormValues, _mode: FormMode) -> Result<SchoolDraft, FormError> {
        Ok(SchoolDraft {
            name: text_value(values, &SCHOOL_FIELDS[0])?,
            address: text_value(values, &SCHOOL_FIELDS[1])?,
            email: email_value(values, &SCHOOL_FIELDS[2])?,
            phone: text_value(values, &SCHOOL_FIELDS[3])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default, alias = "school_id")]
    pub school_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDraft {
    pub name: String,
    pub grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Option<String>>,
}

impl Named for Class {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Class {
    const COLLECTION: &'static str = "classes";
    const TITLE: &'static str = "Classes";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        self.name.clone()
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        let mut options = name_sort_options();
        options.push(SortOption {
            key: "grade",
            label: "Grade",
            compare: |a: &Class, b: &Class| {
                locale_cmp(&a.grade, &b.grade)
            },
        });
        options
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                header: "Name",
                cell: |c: &Self| c.name.clone(),
            },
            Column {
                header: "Grade",
                cell: |c: &Self| c.grade.clone(),
            },
            Column {
                header: "School",
                cell: |c: &Self| id_text(&c.school_id),
            },
        ]
    }
}

const CLASS_FIELDS: [FormField; 3] = [
    FormField::required("name", "Name"),
    FormField::optional("grade", "Grade"),
    FormField::optional("schoolId", "School ID"),
];

impl Editable for Class {
    type Draft = ClassDraft;

    fn form_fields() -> Vec<FormField> {
        CLASS_FIELDS.to_vec()
    }

    fn to_form(&self) -> FormValues {
        form_values([
            ("name", self.name.clone()),
            ("grade", self.grade.clone()),
            ("schoolId", id_text(&self.school_id)),
        ])
    }

    fn draft_from_form(values: &FormValues, mode: FormMode) -> Result<ClassDraft, FormError> {
        Ok(ClassDraft {
            name: text_value(values, &CLASS_FIELDS[0])?,
            grade: text_value(values, &CLASS_FIELDS[1])?,
            school_id: link_value(values, "schoolId", mode),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, alias = "school_id")]
    pub school_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Option<String>>,
}

impl Named for Teacher {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Teacher {
    const COLLECTION: &'static str = "teachers";
    const TITLE: &'static str = "Teachers";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        format!("{} {}", self.name, self.email)
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        let mut options = name_sort_options();
        options.push(SortOption {
            key: "subject",
            label: "Subject",
            compare: |a: &Teacher, b: &Teacher| {
                locale_cmp(&a.subject, &b.subject)
            },
        });
        options
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                header: "Name",
                cell: |t: &Self| t.name.clone(),
            },
            Column {
                header: "Email",
                cell: |t: &Self| t.email.clone(),
            },
            Column {
                header: "Phone",
                cell: |t: &Self| t.phone.clone(),
            },
            Column {
                header: "Subject",
                cell: |t: &Self| t.subject.clone(),
            },
            Column {
                header: "School",
                cell: |t: &Self| id_text(&t.school_id),
            },
        ]
    }
}

const TEACHER_FIELDS: [FormField; 5] = [
    FormField::required("name", "Name"),
    FormField::required("email", "Email"),
    FormField::optional("phone", "Phone"),
    FormField::optional("subject", "Subject"),
    FormField::optional("schoolId", "School ID"),
];

impl Editable for Teacher {
    type Draft = TeacherDraft;

    fn form_fields() -> Vec<FormField> {
        TEACHER_FIELDS.to_vec()
    }

    fn to_form(&self) -> FormValues {
        form_values([
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("subject", self.subject.clone()),
            ("schoolId", id_text(&self.school_id)),
        ])
    }

    fn draft_from_form(values: &FormValues, mode: FormMode) -> Result<TeacherDraft, FormError> {
        Ok(TeacherDraft {
            name: text_value(values, &TEACHER_FIELDS[0])?,
            email: email_value(values, &TEACHER_FIELDS[1])?,
            phone: text_value(values, &TEACHER_FIELDS[2])?,
            subject: text_value(values, &TEACHER_FIELDS[3])?,
            school_id: link_value(values, "schoolId", mode),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(flatten, deserialize_with = "deserialize_record_key")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "class_id")]
    pub class_id: Option<RecordId>,
    #[serde(default, alias = "school_id")]
    pub school_id: Option<RecordId>,
    #[serde(default, alias = "parent_phone")]
    pub parent_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Option<String>>,
    pub parent_phone: String,
}

impl Named for Student {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Student {
    const COLLECTION: &'static str = "students";
    const TITLE: &'static str = "Students";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_field(&self) -> String {
        format!("{} {}", self.name, self.email)
    }

    fn sort_options() -> Vec<SortOption<Self>> {
        name_sort_options()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column {
                header: "Name",
                cell: |s: &Self| s.name.clone(),
            },
            Column {
                header: "Email",
                cell: |s: &Self| s.email.clone(),
            },
            Column {
                header: "Class",
                cell: |s: &Self| id_text(&s.class_id),
            },
            Column {
                header: "School",
                cell: |s: &Self| id_text(&s.school_id),
            },
            Column {
                header: "Parent phone",
                cell: |s: &Self| s.parent_phone.clone(),
            },
        ]
    }
}

const STUDENT_FIELDS: [FormField; 5] = [
    FormField::required("name", "Name"),
    FormField::optional("email", "Email"),
    FormField::optional("classId", "Class ID"),
    FormField::optional("schoolId", "School ID"),
    FormField::optional("parentPhone", "Parent phone"),
];

impl Editable for Student {
    type Draft = StudentDraft;

    fn form_fields() -> Vec<FormField> {
        STUDENT_FIELDS.to_vec()
    }

    fn to_form(&self) -> FormValues {
        form_values([
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("classId", id_text(&self.class_id)),
            ("schoolId", id_text(&self.school_id)),
            ("parentPhone", self.parent_phone.clone()),
        ])
    }

    fn draft_from_form(values: &FormValues, mode: FormMode) -> Result<StudentDraft, FormError> {
        Ok(StudentDraft {
            name: text_value(values, &STUDENT_FIELDS[0])?,
            email: email_value(values, &STUDENT_FIELDS[1])?,
            class_id: link_value(values, "classId", mode),
            school_id: link_value(values, "schoolId", mode),
            parent_phone: text_value(values, &STUDENT_FIELDS[4])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_decodes_mongo_style_id_and_missing_fields() {
        let school: School = serde_json::from_str(r#"{"_id":"s1","name":"North High"}"#)
            .expect("school should decode");

        assert_eq!(school.id, RecordId::from("s1"));
        assert_eq!(school.address, "");
    }

    #[test]
    fn student_round_trips_through_the_form() {
        let student: Student = serde_json::from_str(
            r#"{"id":3,"name":"Lina","email":"lina@x.org","classId":12,"parentPhone":"555"}"#,
        )
        .expect("student should decode");

        let draft = Student::draft_from_form(&student.to_form(), FormMode::Edit)
            .expect("draft should validate");

        assert_eq!(draft.class_id, Some(Some("12".to_string())));
        let body = serde_json::to_value(&draft).expect("draft should serialize");
        assert_eq!(body["parentPhone"], "555");
        assert_eq!(body["classId"], "12");
    }

    #[test]
    fn school_decodes_when_both_id_keys_are_present() {
        let schools: Vec<School> = serde_json::from_str(
            r#"[{"_id":"s1","id":"s1","name":"North High"},{"_id":"m2","name":"South"}]"#,
        )
        .expect("schools should decode");

        assert_eq!(schools[0].id, RecordId::from("s1"));
        assert_eq!(schools[1].id, RecordId::from("m2"));
    }

    #[test]
    fn id_key_wins_over_mongo_key() {
        let class: Class =
            serde_json::from_str(r#"{"_id":"abc","id":7,"name":"7B","schoolId":"s1"}"#)
                .expect("class should decode");

        assert_eq!(class.id, RecordId::from("7"));
        assert_eq!(class.school_id, Some(RecordId::from("s1")));
    }

    #[test]
    fn record_without_any_id_is_rejected() {
        assert!(serde_json::from_str::<School>(r#"{"name":"Nameless"}"#).is_err());
    }

    #[test]
    fn clearing_a_link_on_edit_sends_null() {
        let student: Student = serde_json::from_str(
            r#"{"id":3,"name":"Lina","classId":12,"schoolId":"s1","parentPhone":"555"}"#,
        )
        .expect("student should decode");
        let mut values = student.to_form();
        values.insert("classId".to_string(), "  ".to_string());

        let draft =
            Student::draft_from_form(&values, FormMode::Edit).expect("draft should validate");
        let body = serde_json::to_value(&draft).expect("draft should serialize");

        assert!(body["classId"].is_null());
        assert!(body.as_object().is_some_and(|map| map.contains_key("classId")));
        assert_eq!(body["schoolId"], "s1");
    }

    #[test]
    fn blank_link_on_create_is_left_out() {
        let mut values = Class::form_fields()
            .iter()
            .map(|field| (field.key.to_string(), String::new()))
            .collect::<FormValues>();
        values.insert("name".to_string(), "7B".to_string());

        let draft =
            Class::draft_from_form(&values, FormMode::Create).expect("draft should validate");
        let body = serde_json::to_value(&draft).expect("draft should serialize");

        assert!(body.get("schoolId").is_none());
    }

    #[test]
    fn teacher_requires_a_valid_email() {
        let mut values = Teacher::form_fields()
            .iter()
            .map(|field| (field.key.to_string(), String::new()))
            .collect::<FormValues>();
        values.insert("name".to_string(), "Ms. Park".to_string());
        values.insert("email".to_string(), "park".to_string());

        assert!(matches!(
            Teacher::draft_from_form(&values, FormMode::Create),
            Err(FormError::Invalid { label: "Email", .. })
        ));
    }

    #[test]
    fn teacher_search_covers_name_and_email() {
        let teacher: Teacher =
            serde_json::from_str(r#"{"id":1,"name":"Ms. Park","email":"park@school.org"}"#)
                .expect("teacher should decode");

        assert!(teacher.search_field().contains("park@school.org"));
    }
}
