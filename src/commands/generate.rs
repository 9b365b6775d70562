//! Generate static files

use anyhow::Result;
use std::sync::Arc;

use crate::content::ContentSource;
use crate::generator::{GenerateReport, Generator};
use crate::Blog;

/// Generate the list page and every known post page
pub async fn run(blog: &Blog, source: Arc<dyn ContentSource>) -> Result<GenerateReport> {
    let start = std::time::Instant::now();

    let generator = Generator::new(blog, source)?;
    let report = generator.generate().await?;

    if !report.skipped.is_empty() {
        tracing::warn!(
            "{} posts could not be generated and will render on demand: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} post pages in {:.2}s",
        report.post_pages,
        duration.as_secs_f64()
    );

    Ok(report)
}
