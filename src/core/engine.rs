use crate::core::Pipeline;
use crate::utils::error::Result;
use std::io::Write;

pub struct ToolEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ToolEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load once, then flushes `out`.
    pub fn run(&self, out: &mut dyn Write) -> Result<()> {
        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract()?;

        tracing::debug!("Transforming data...");
        let result = self.pipeline.transform(raw_data)?;

        tracing::debug!("Writing output...");
        let outcome = self.pipeline.load(result, out);

        // 錯誤路徑也要 flush 已緩衝的輸出
        let flushed = out.flush();
        outcome?;
        flushed?;
        Ok(())
    }
}
