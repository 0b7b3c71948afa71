use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;
use serde::Serialize;

use crate::ai::metrics::episode_metrics::EpisodeRecord;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Streams one CSV row per finished episode
pub struct CsvExporter {
    path: PathBuf,
    writer: Writer<File>,
    rows: usize,
}

impl CsvExporter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
        }
        let writer = Writer::from_path(&path)
            .with_context(|| format!("failed to create metrics file {}", path.display()))?;
        Ok(Self { path, writer, rows: 0 })
    }

    pub fn write_episode(&mut self, record: &EpisodeRecord) -> Result<()> {
        self.write_row(record)
    }

    pub fn write_row<T: Serialize>(&mut self, row: &T) -> Result<()> {
        let _timing = logging::start_timing("csv_write_row", OperationCategory::FileIO { subcategory: FileIOType::MetricsExport });
        self.writer
            .serialize(row)
            .with_context(|| format!("failed to write row to {}", self.path.display()))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))?;
        Ok(self.path)
    }
}

/// Directory name for one training run, e.g. `20261019_142501`
pub fn run_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_rows_round_through_csv() {
        let path = std::env::temp_dir().join(format!("qbreakout_csv_export_{}.csv", std::process::id()));
        let mut exporter = CsvExporter::create(&path).unwrap();
        for episode in 1..=3 {
            exporter
                .write_episode(&EpisodeRecord {
                    episode,
                    score: episode as u32 * 10,
                    steps: 100,
                    total_reward: 1.5,
                    epsilon: 0.1,
                    cleared: false,
                })
                .unwrap();
        }
        assert_eq!(exporter.rows(), 3);
        let path = exporter.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("episode,score,steps,total_reward,epsilon,cleared"));
        assert_eq!(lines.next(), Some("1,10,100,1.5,0.1,false"));
        assert_eq!(text.lines().count(), 4);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_run_timestamp_shape() {
        let stamp = run_timestamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
    }
}
