use crate::domain::model::{IngestResult, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    /// Size in bytes, or `None` when nothing exists at `path`.
    fn file_size(&self, path: &str) -> Result<Option<u64>>;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_files(&self) -> &[String];
    fn report_path(&self) -> &str;
}

pub trait Pipeline {
    fn extract(&self) -> Result<IngestResult>;
    fn transform(&self, data: IngestResult) -> Result<TransformResult>;
    fn load(&self, result: &TransformResult) -> Result<String>;
}
