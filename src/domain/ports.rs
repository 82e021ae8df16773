use crate::domain::model::{LexiconShape, OutputFormat, SourceText, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 單一詞頻表的處理設定
pub trait ConfigProvider: Send + Sync {
    /// 輸出檔名的主檔名
    fn source_name(&self) -> String;
    fn input_path(&self) -> &str;
    fn shape(&self) -> LexiconShape;
    /// 覆寫預設的標頭行數
    fn header_lines(&self) -> Option<usize>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
    fn compress(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceText>;
    async fn transform(&self, source: SourceText) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
