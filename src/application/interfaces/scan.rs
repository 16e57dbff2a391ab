use crate::application::headers::CallbackOptions;
use crate::error::AppError;
use crate::model::multipart::MultipartFile;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// Interface for the Copyleaks scan API
///
/// Every method returns the raw JSON of the response. Failures, including non-2xx
/// responses, are reported through the `Result`.
#[async_trait]
pub trait ScanService: Send + Sync {
    /// Logs in and stores the returned access token
    async fn login(&self, email: &str, api_key: &str) -> Result<Value, AppError>;

    /// Starts a process scanning the content at a public URL
    async fn create_by_url(&self, url: &str, options: &CallbackOptions)
    -> Result<Value, AppError>;

    /// Starts a process scanning a file read from disk
    ///
    /// # Arguments
    /// * `path` - File to upload
    /// * `language` - Language code of the content, sent as the `language` query parameter
    /// * `options` - Callback options
    async fn create_by_file(
        &self,
        path: &Path,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError>;

    /// Starts a process scanning an in-memory file
    async fn create_by_file_content(
        &self,
        file: &MultipartFile,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError>;

    /// Starts a process scanning plain text
    async fn create_by_text(&self, text: &str, options: &CallbackOptions)
    -> Result<Value, AppError>;

    /// Starts a process scanning the text recognised in an image read from disk
    async fn create_by_ocr(
        &self,
        path: &Path,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError>;

    /// Starts a process scanning the text recognised in an in-memory image
    async fn create_by_ocr_content(
        &self,
        file: &MultipartFile,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError>;

    /// Gets the progress of a process
    async fn status(&self, process_id: &str) -> Result<Value, AppError>;

    /// Gets the results of a completed process
    async fn result(&self, process_id: &str) -> Result<Value, AppError>;

    /// Deletes a completed process
    async fn delete(&self, process_id: &str) -> Result<Value, AppError>;

    /// Lists the active processes
    async fn list(&self) -> Result<Value, AppError>;

    /// Gets the remaining credits
    async fn count_credits(&self) -> Result<Value, AppError>;

    /// Lists the languages supported by OCR scans
    async fn languages_list(&self) -> Result<Value, AppError>;

    /// Lists the supported file types
    async fn supported_file_types(&self) -> Result<Value, AppError>;
}
