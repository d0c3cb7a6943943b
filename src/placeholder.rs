// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/placeholder.rs - 无检测结果图像的处理
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

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::{
  aggregate::{AggregatedRecord, Detection, ImageKey},
  model::ModelKind,
  normalize::{NormalizedRecord, Observation, Warnings},
};

/// 没有检测到目标的图像，不参与分组计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
  pub image_proc: DateTime<Tz>,
  pub image_capt: DateTime<Tz>,
  pub camera_ref: String,
  pub warnings: Option<Warnings>,
}

impl Placeholder {
  /// 所有类别计数为 0 的报表行
  pub fn into_record(self, model: ModelKind) -> AggregatedRecord {
    AggregatedRecord {
      image_proc: self.image_proc,
      image_capt: self.image_capt,
      camera_ref: self.camera_ref,
      model,
      counts: vec![0; model.classes().len()].into_boxed_slice(),
      warnings: self.warnings,
    }
  }
}

/// 将记录分为检测与占位两类；缺少类别或 warnings 的记录都是占位
pub fn split(records: Vec<NormalizedRecord>) -> (Vec<Detection>, Vec<Placeholder>) {
  let mut detections = Vec::with_capacity(records.len());
  let mut placeholders = Vec::new();

  for record in records {
    match (record.observation, record.warnings) {
      (Observation::Detected(class_name), Some(warnings)) => detections.push(Detection {
        key: ImageKey {
          image_proc: record.image_proc,
          image_capt: record.image_capt,
          camera_ref: record.camera_ref,
          warnings,
        },
        class_name,
      }),
      (_, warnings) => placeholders.push(Placeholder {
        image_proc: record.image_proc,
        image_capt: record.image_capt,
        camera_ref: record.camera_ref,
        warnings,
      }),
    }
  }

  debug!(
    "检测记录 {} 条, 无检测图像 {} 条",
    detections.len(),
    placeholders.len()
  );
  (detections, placeholders)
}

/// 占位行在前、聚合行在后拼接
pub fn merge(
  placeholders: Vec<Placeholder>,
  aggregated: Vec<AggregatedRecord>,
  model: ModelKind,
) -> Vec<AggregatedRecord> {
  let mut merged = Vec::with_capacity(placeholders.len() + aggregated.len());
  merged.extend(placeholders.into_iter().map(|p| p.into_record(model)));
  merged.extend(aggregated);
  merged
}
