// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/task.rs - 批处理任务
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

use std::path::PathBuf;

use tracing::info;

use crate::{
  aggregate::{AggregatedRecord, aggregate},
  dedup::{DedupStats, resolve},
  input::{CsvFileInput, RawRow},
  model::ModelKind,
  normalize::{NormalizeError, NormalizeStats, normalize},
  output::Report,
  placeholder::{merge, split},
};

pub trait Task<I, O>: Sized {
  type Error;
  fn run_task(self, input: I, output: O) -> Result<TaskSummary, Self::Error>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskSummary {
  pub normalize: NormalizeStats,
  pub detections: usize,
  pub placeholders: usize,
  pub dedup: DedupStats,
  pub files: Vec<PathBuf>,
}

/// 清洗、聚合并去重，得到排好序的报表行
pub fn build_report(
  rows: Vec<RawRow>,
  model: ModelKind,
) -> Result<(Vec<AggregatedRecord>, TaskSummary), NormalizeError> {
  let (records, normalize_stats) = normalize(rows)?;
  let (detections, placeholders) = split(records);

  let mut summary = TaskSummary {
    normalize: normalize_stats,
    detections: detections.len(),
    placeholders: placeholders.len(),
    ..Default::default()
  };

  let aggregated = aggregate(detections, model);
  let merged = merge(placeholders, aggregated, model);
  let (records, dedup_stats) = resolve(merged);
  summary.dedup = dedup_stats;

  Ok((records, summary))
}

#[derive(Debug, Clone, Copy)]
pub struct DailyReportTask {
  model: ModelKind,
}

impl DailyReportTask {
  pub fn new(model: ModelKind) -> Self {
    DailyReportTask { model }
  }

  pub fn model(&self) -> ModelKind {
    self.model
  }
}

impl<RE: std::error::Error + Sync + Send + 'static, O: Report<Error = RE>> Task<CsvFileInput, O>
  for DailyReportTask
{
  type Error = anyhow::Error;

  fn run_task(self, input: CsvFileInput, output: O) -> Result<TaskSummary, Self::Error> {
    info!("开始任务, 模型: {}", self.model);
    let now = std::time::Instant::now();

    let (records, mut summary) = build_report(input.into_rows(), self.model)?;
    info!("报表共 {} 行, 处理耗时: {:.2?}", records.len(), now.elapsed());

    summary.files = output.write_report(self.model, &records)?;
    info!(
      "写出 {} 个文件, 总耗时: {:.2?}",
      summary.files.len(),
      now.elapsed()
    );

    Ok(summary)
  }
}
