use crate::core::{ConfigProvider, Pipeline, SourceText, Storage, TransformResult};
use crate::domain::services;
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

/// 讀取一個詞頻表檔案、解析後寫出所需格式
pub struct LexiconPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> LexiconPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, file_name: &str) -> String {
        Path::new(self.config.output_path())
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }

    fn bundle(&self, result: &TransformResult) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for format in self.config.output_formats() {
            let file_name = format!("{}.{}", result.name, format.extension());
            zip.start_file(file_name, SimpleFileOptions::default())?;
            zip.write_all(result.output_for(*format).as_bytes())?;
        }

        let manifest = BundleManifest {
            name: &result.name,
            shape: self.config.shape().as_str(),
            entries: result.lexicon.len(),
            formats: self
                .config
                .output_formats()
                .iter()
                .map(|format| format.extension())
                .collect(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        zip.start_file("manifest.json", SimpleFileOptions::default())?;
        zip.write_all(serde_json::to_string_pretty(&manifest)?.as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[derive(Debug, Serialize)]
struct BundleManifest<'a> {
    name: &'a str,
    shape: &'static str,
    entries: usize,
    formats: Vec<&'static str>,
    created_at: String,
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LexiconPipeline<S, C> {
    async fn extract(&self) -> Result<SourceText> {
        let path = self.config.input_path();
        tracing::debug!("Reading lexicon source: {}", path);

        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path);

        let text = String::from_utf8(bytes).map_err(|e| EtlError::EncodingError {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        Ok(SourceText {
            name: self.config.source_name(),
            shape: self.config.shape(),
            text,
        })
    }

    async fn transform(&self, source: SourceText) -> Result<TransformResult> {
        services::transform_source(source, self.config.header_lines())
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        if self.config.compress() {
            let zip_data = self.bundle(&result)?;
            let output_path = self.output_file(&format!("{}.zip", result.name));

            tracing::debug!("Writing ZIP file ({} bytes) to {}", zip_data.len(), output_path);
            self.storage.write_file(&output_path, &zip_data).await?;
            return Ok(output_path);
        }

        for format in self.config.output_formats() {
            let output_path = self.output_file(&format!("{}.{}", result.name, format.extension()));
            let data = result.output_for(*format);

            tracing::debug!("Writing {} ({} bytes)", output_path, data.len());
            self.storage.write_file(&output_path, data.as_bytes()).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LexiconShape, OutputFormat};
    use std::collections::HashMap;
    use std::io::Read;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const CHINESE_SOURCE: &str = "Routledge\nFrequency\nDictionary\nof Chinese\n\
        1\t的\t\t/de/\t(1)\tpart\tof\t她的书。Her book.\t4.5|0.9|12.0\n\
        2\t我\t\t/wo/\t(1)\tpron\tI\t我很好。I am fine.\t3.1|0.8|9.7|S\n";

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, data: &[u8]) {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.put(path, data).await;
            Ok(())
        }
    }

    struct MockConfig {
        formats: Vec<OutputFormat>,
        compress: bool,
    }

    impl ConfigProvider for MockConfig {
        fn source_name(&self) -> String {
            "chinese".to_string()
        }

        fn input_path(&self) -> &str {
            "chinese.txt"
        }

        fn shape(&self) -> LexiconShape {
            LexiconShape::Chinese
        }

        fn header_lines(&self) -> Option<usize> {
            None
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_formats(&self) -> &[OutputFormat] {
            &self.formats
        }

        fn compress(&self) -> bool {
            self.compress
        }
    }

    fn pipeline(formats: Vec<OutputFormat>, compress: bool) -> (MockStorage, LexiconPipeline<MockStorage, MockConfig>) {
        let storage = MockStorage::default();
        let pipeline = LexiconPipeline::new(storage.clone(), MockConfig { formats, compress });
        (storage, pipeline)
    }

    #[tokio::test]
    async fn test_extract_rejects_non_utf8() {
        let (storage, pipeline) = pipeline(vec![OutputFormat::Csv], false);
        storage.put("chinese.txt", &[0xff, 0xfe, 0x00]).await;

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::EncodingError { .. }));
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_io_error() {
        let (_storage, pipeline) = pipeline(vec![OutputFormat::Csv], false);
        assert!(matches!(
            pipeline.extract().await,
            Err(EtlError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_full_run_writes_each_format() {
        let (storage, pipeline) = pipeline(vec![OutputFormat::Csv, OutputFormat::Json], false);
        storage.put("chinese.txt", CHINESE_SOURCE.as_bytes()).await;

        let source = pipeline.extract().await.unwrap();
        let result = pipeline.transform(source).await.unwrap();
        assert_eq!(result.lexicon.len(), 2);

        let output = pipeline.load(result).await.unwrap();
        assert_eq!(output, "out");

        let csv = storage.get_file("out/chinese.csv").await.unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("I am fine."));
        assert!(storage.get_file("out/chinese.json").await.is_some());
        assert!(storage.get_file("out/chinese.tsv").await.is_none());
    }

    #[tokio::test]
    async fn test_compressed_load_bundles_formats_and_manifest() {
        let (storage, pipeline) = pipeline(vec![OutputFormat::Csv, OutputFormat::Tsv], true);
        storage.put("chinese.txt", CHINESE_SOURCE.as_bytes()).await;

        let source = pipeline.extract().await.unwrap();
        let result = pipeline.transform(source).await.unwrap();
        let output = pipeline.load(result).await.unwrap();
        assert_eq!(output, "out/chinese.zip");

        let zip_data = storage.get_file("out/chinese.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 3);
        assert!(archive.by_name("chinese.csv").is_ok());
        assert!(archive.by_name("chinese.tsv").is_ok());

        let mut manifest = String::new();
        archive
            .by_name("manifest.json")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(manifest["entries"], 2);
        assert_eq!(manifest["shape"], "chinese");
    }
}
