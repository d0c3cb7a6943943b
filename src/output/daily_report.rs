// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/output/daily_report.rs - 按拍摄日期分文件的压缩日报
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::{
  collections::BTreeMap,
  fs::File,
  io::{BufWriter, Write},
  path::{Path, PathBuf},
};

use chrono::NaiveDate;
use flate2::{Compression, write::GzEncoder};
use tracing::{debug, info};

use crate::{
  FromPath,
  aggregate::AggregatedRecord,
  model::ModelKind,
  output::{OutputError, Report, write_csv},
};

const REPORT_PREFIX: &str = "cctv-report-v2";

/// 日报输出目录，文件位于 `<directory>/<model>/` 下
#[derive(Debug, Clone)]
pub struct DailyReportOutput {
  directory: PathBuf,
}

impl FromPath for DailyReportOutput {
  type Error = OutputError;

  fn from_path(path: &Path) -> Result<Self, Self::Error> {
    Ok(DailyReportOutput {
      directory: path.to_path_buf(),
    })
  }
}

impl DailyReportOutput {
  pub fn directory(&self) -> &Path {
    &self.directory
  }

  /// 例如 `daily_reports/yolo/cctv-report-v2-yolo-20230510.csv.gz`
  pub fn report_path(&self, model: ModelKind, day: NaiveDate) -> PathBuf {
    self.directory.join(model.name()).join(format!(
      "{}-{}-{}.csv.gz",
      REPORT_PREFIX,
      model.name(),
      day.format("%Y%m%d")
    ))
  }

  fn write_day(
    &self,
    path: &Path,
    model: ModelKind,
    records: &[&AggregatedRecord],
  ) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let encoder = write_csv(encoder, model, records.iter().copied())?;
    encoder.finish()?.flush()?;
    Ok(())
  }
}

/// 按拍摄时间的自然日（报表时区）分组，保持组内顺序
pub fn partition_by_day(
  records: &[AggregatedRecord],
) -> BTreeMap<NaiveDate, Vec<&AggregatedRecord>> {
  let mut days: BTreeMap<NaiveDate, Vec<&AggregatedRecord>> = BTreeMap::new();
  for record in records {
    days
      .entry(record.image_capt.date_naive())
      .or_default()
      .push(record);
  }
  days
}

impl Report for DailyReportOutput {
  type Error = OutputError;

  fn write_report(
    &self,
    model: ModelKind,
    records: &[AggregatedRecord],
  ) -> Result<Vec<PathBuf>, Self::Error> {
    let days = partition_by_day(records);
    if days.is_empty() {
      info!("没有可写出的记录");
      return Ok(Vec::new());
    }

    std::fs::create_dir_all(self.directory.join(model.name()))?;

    let mut written = Vec::with_capacity(days.len());
    for (day, rows) in days {
      let path = self.report_path(model, day);
      self.write_day(&path, model, &rows)?;
      debug!("{} 共 {} 行", day, rows.len());
      info!("写出日报: {}", path.display());
      written.push(path);
    }
    Ok(written)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{REPORT_TIMEZONE, normalize::Warnings};
  use chrono::TimeZone;

  fn record(day: u32, hour: u32) -> AggregatedRecord {
    let capt = REPORT_TIMEZONE
      .with_ymd_and_hms(2023, 5, day, hour, 0, 0)
      .unwrap();
    AggregatedRecord {
      image_proc: capt,
      image_capt: capt,
      camera_ref: "A13".to_string(),
      model: ModelKind::Yolo,
      counts: vec![0; 8].into_boxed_slice(),
      warnings: Some(Warnings::new("0")),
    }
  }

  #[test]
  fn report_path_follows_naming_pattern() {
    let output = DailyReportOutput::from_path(Path::new("daily_reports")).unwrap();
    let day = NaiveDate::from_ymd_opt(2023, 5, 10).unwrap();
    assert_eq!(
      output.report_path(ModelKind::Tf2, day),
      PathBuf::from("daily_reports/tf2/cctv-report-v2-tf2-20230510.csv.gz")
    );
  }

  #[test]
  fn partitions_by_london_calendar_day() {
    // 11 日 00:00 BST 即 UTC 10 日 23:00，按伦敦时间归入 11 日
    let records = vec![record(10, 23), record(11, 0), record(10, 1)];
    let days = partition_by_day(&records);
    assert_eq!(days.len(), 2);

    let tenth = &days[&NaiveDate::from_ymd_opt(2023, 5, 10).unwrap()];
    assert_eq!(tenth.len(), 2);
    assert_eq!(tenth[0].image_capt, records[0].image_capt);
    assert_eq!(tenth[1].image_capt, records[2].image_capt);
  }

  #[test]
  fn no_records_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = DailyReportOutput::from_path(dir.path()).unwrap();
    let written = output.write_report(ModelKind::Yolo, &[]).unwrap();
    assert!(written.is_empty());
    assert!(!dir.path().join("yolo").exists());
  }
}
