use crate::core::Pipeline;
use crate::domain::services;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 一次 ETL 執行的結果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlReport {
    pub output_path: String,
    pub entry_count: usize,
    pub preview: Vec<String>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    preview_count: usize,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            preview_count: 0,
        }
    }

    /// 在報告中附上前 n 筆詞條的摘要
    pub fn with_preview(mut self, count: usize) -> Self {
        self.preview_count = count;
        self
    }

    pub async fn run(&self) -> Result<EtlReport> {
        tracing::info!("🚀 Starting ETL process");
        self.monitor.log_stats("Start");

        tracing::info!("📥 Extracting lexicon source...");
        let source = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} ({} bytes, {})", source.name, source.text.len(), source.shape);
        self.monitor.log_stats("Extract");

        tracing::info!("🔄 Parsing entries...");
        let result = self.pipeline.transform(source).await?;
        let entry_count = result.lexicon.len();
        let preview = services::preview_lines(&result.lexicon, self.preview_count);
        tracing::info!("🔄 Parsed {} entries from {}", entry_count, result.name);
        self.monitor.log_stats("Transform");

        tracing::info!("💾 Writing outputs...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("💾 Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(EtlReport {
            output_path,
            entry_count,
            preview,
        })
    }
}
