use std::marker::PhantomData;
use std::path::Path;

use serde::Deserialize;

use crate::domain::entities::directory::Student;
use crate::domain::entities::form::Editable;
use crate::domain::entities::record::{Record, RecordId};
use crate::infra::http::client::{ApiClient, ApiError};

/// REST access to one collection, typed by the record it serves.
pub struct CrudService<R> {
    api: ApiClient,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _record: PhantomData,
        }
    }
}

pub fn item_path(collection: &str, id: &RecordId) -> String {
    format!("{collection}/{id}")
}

impl<R: Record> CrudService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _record: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let records: Vec<R> = self.api.get_json(R::COLLECTION).await?;
        log::debug!("loaded {} {}", records.len(), R::COLLECTION);
        Ok(records)
    }
}

impl<R: Editable> CrudService<R> {
    pub async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        self.api.post_json(R::COLLECTION, draft).await
    }

    pub async fn update(&self, id: &RecordId, draft: &R::Draft) -> Result<R, ApiError> {
        self.api
            .put_json(&item_path(R::COLLECTION, id), draft)
            .await
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        self.api.delete(&item_path(R::COLLECTION, id)).await?;
        log::info!("deleted {} {id}", R::COLLECTION);
        Ok(())
    }
}

/// Server reply to a roster upload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    #[serde(default, alias = "inserted", alias = "count")]
    pub imported: usize,
    #[serde(default)]
    pub skipped: usize,
    #[serde(default)]
    pub message: Option<String>,
}

impl ImportSummary {
    pub fn describe(&self) -> String {
        match &self.message {
            Some(message) if !message.trim().is_empty() => message.trim().to_string(),
            _ if self.skipped > 0 => {
                format!("Imported {} students, skipped {}", self.imported, self.skipped)
            }
            _ => format!("Imported {} students", self.imported),
        }
    }
}

pub type StudentService = CrudService<Student>;

pub const STUDENT_IMPORT_PATH: &str = "students/import";

impl StudentService {
    /// Uploads an Excel or CSV roster; the server does the parsing.
    pub async fn import_file(&self, file_path: &Path) -> Result<ImportSummary, ApiError> {
        let summary: ImportSummary = self
            .api
            .upload_file(STUDENT_IMPORT_PATH, file_path)
            .await?;
        log::info!(
            "imported {} students from {}",
            summary.imported,
            file_path.display()
        );
        Ok(summary)
    }
}
