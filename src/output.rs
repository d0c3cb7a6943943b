// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/output.rs - 报表输出定义
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

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::{TIMESTAMP_FORMAT, aggregate::AggregatedRecord, model::ModelKind};

pub trait Report: Sized {
  type Error;
  /// 写出报表，返回写出的文件路径
  fn write_report(
    &self,
    model: ModelKind,
    records: &[AggregatedRecord],
  ) -> Result<Vec<PathBuf>, Self::Error>;
}

mod combined_report;
pub use self::combined_report::CombinedReportOutput;

mod daily_report;
pub use self::daily_report::{DailyReportOutput, partition_by_day};

#[derive(Error, Debug)]
pub enum OutputError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("CSV 写入错误: {0}")]
  CsvError(#[from] csv::Error),
}

pub enum OutputWrapper {
  DailyReport(DailyReportOutput),
  CombinedReport(CombinedReportOutput),
}

impl Report for OutputWrapper {
  type Error = OutputError;

  fn write_report(
    &self,
    model: ModelKind,
    records: &[AggregatedRecord],
  ) -> Result<Vec<PathBuf>, Self::Error> {
    match self {
      OutputWrapper::DailyReport(output) => output.write_report(model, records),
      OutputWrapper::CombinedReport(output) => output.write_report(model, records),
    }
  }
}

impl<O: Report<Error = OutputError>> Report for Vec<O> {
  type Error = OutputError;

  fn write_report(
    &self,
    model: ModelKind,
    records: &[AggregatedRecord],
  ) -> Result<Vec<PathBuf>, Self::Error> {
    let mut written = Vec::new();
    for output in self {
      written.extend(output.write_report(model, records)?);
    }
    Ok(written)
  }
}

/// 报表列：image_proc, image_capt, camera_ref, model_name, <类别>, warnings
pub fn header(model: ModelKind) -> Vec<&'static str> {
  let mut columns = vec!["image_proc", "image_capt", "camera_ref", "model_name"];
  columns.extend_from_slice(model.classes());
  columns.push("warnings");
  columns
}

fn row(record: &AggregatedRecord) -> Vec<String> {
  let mut cells = Vec::with_capacity(record.counts.len() + 5);
  cells.push(record.image_proc.format(TIMESTAMP_FORMAT).to_string());
  cells.push(record.image_capt.format(TIMESTAMP_FORMAT).to_string());
  cells.push(record.camera_ref.clone());
  cells.push(record.model.name().to_string());
  cells.extend(record.counts.iter().map(u32::to_string));
  cells.push(
    record
      .warnings
      .as_ref()
      .map(|w| w.as_str().to_string())
      .unwrap_or_default(),
  );
  cells
}

/// 写出表头与所有行，返回底层写入器
fn write_csv<'a, W, I>(inner: W, model: ModelKind, records: I) -> Result<W, OutputError>
where
  W: Write,
  I: IntoIterator<Item = &'a AggregatedRecord>,
{
  let mut writer = csv::Writer::from_writer(inner);
  writer.write_record(header(model))?;
  for record in records {
    writer.write_record(row(record))?;
  }
  writer.into_inner().map_err(|e| OutputError::from(e.into_error()))
}
