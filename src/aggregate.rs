// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/aggregate.rs - 按图像统计各类别检测数量
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

use std::collections::{BTreeMap, BTreeSet};

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::{model::ModelKind, normalize::Warnings};

/// 一张图像的分组键，字段顺序即排序顺序
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageKey {
  pub image_proc: DateTime<Tz>,
  pub image_capt: DateTime<Tz>,
  pub camera_ref: String,
  pub warnings: Warnings,
}

/// 一次目标检测
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
  pub key: ImageKey,
  pub class_name: String,
}

/// 报表中的一行：一张图像上各类别的检测数量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRecord {
  pub image_proc: DateTime<Tz>,
  pub image_capt: DateTime<Tz>,
  pub camera_ref: String,
  pub model: ModelKind,
  /// 与 `model.classes()` 一一对应
  pub counts: Box<[u32]>,
  pub warnings: Option<Warnings>,
}

impl AggregatedRecord {
  /// 类别计数与 warnings 之和，为 0 表示该图像没有任何检测
  pub fn total(&self) -> f64 {
    let counts: f64 = self.counts.iter().map(|&c| f64::from(c)).sum();
    counts + self.warnings.as_ref().map_or(0.0, Warnings::value)
  }

  pub fn count(&self, class_name: &str) -> Option<u32> {
    self
      .model
      .classes()
      .iter()
      .position(|c| *c == class_name)
      .map(|i| self.counts[i])
  }
}

/// 分组计数后的透视表，列仅包含实际出现过的类别
#[derive(Debug, Clone, Default)]
pub struct PivotTable {
  columns: Vec<String>,
  rows: Vec<(ImageKey, Vec<u32>)>,
}

impl PivotTable {
  pub fn from_detections(detections: Vec<Detection>) -> Self {
    let mut groups: BTreeMap<(ImageKey, String), u32> = BTreeMap::new();
    for detection in detections {
      *groups
        .entry((detection.key, detection.class_name))
        .or_default() += 1;
    }

    let columns: Vec<String> = groups
      .keys()
      .map(|(_, class_name)| class_name.clone())
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect();

    let mut images: BTreeMap<ImageKey, Vec<u32>> = BTreeMap::new();
    for ((key, class_name), count) in groups {
      let cells = images
        .entry(key)
        .or_insert_with(|| vec![0; columns.len()]);
      if let Ok(index) = columns.binary_search(&class_name) {
        cells[index] = count;
      }
    }

    PivotTable {
      columns,
      rows: images.into_iter().collect(),
    }
  }

  pub fn columns(&self) -> &[String] {
    &self.columns
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// 词表中有但透视表中没有的类别
  pub fn missing_columns(&self, model: ModelKind) -> Vec<&'static str> {
    model
      .classes()
      .iter()
      .copied()
      .filter(|class| !self.columns.iter().any(|c| c == class))
      .collect()
  }

  /// 补齐缺失类别（全部为 0），并按词表顺序输出
  pub fn reconcile(mut self, model: ModelKind) -> Vec<AggregatedRecord> {
    let missing = self.missing_columns(model);
    if !missing.is_empty() {
      debug!("补齐未出现的类别: {:?}", missing);
      for class in missing {
        self.columns.push(class.to_string());
        for (_, cells) in self.rows.iter_mut() {
          cells.push(0);
        }
      }
    }

    let unknown: Vec<&String> = self
      .columns
      .iter()
      .filter(|c| !model.classes().contains(&c.as_str()))
      .collect();
    if !unknown.is_empty() {
      warn!("模型 {} 的词表不包含以下类别，已忽略: {:?}", model, unknown);
    }

    let projection: Vec<usize> = model
      .classes()
      .iter()
      .filter_map(|class| self.columns.iter().position(|c| c == class))
      .collect();

    self
      .rows
      .into_iter()
      .map(|(key, cells)| AggregatedRecord {
        image_proc: key.image_proc,
        image_capt: key.image_capt,
        camera_ref: key.camera_ref,
        model,
        counts: projection.iter().map(|&i| cells[i]).collect(),
        warnings: Some(key.warnings),
      })
      .collect()
  }
}

/// 统计每张图像上各类别的数量
pub fn aggregate(detections: Vec<Detection>, model: ModelKind) -> Vec<AggregatedRecord> {
  let detection_count = detections.len();
  let table = PivotTable::from_detections(detections);
  info!(
    "聚合完成: {} 条检测 -> {} 张图像, 出现类别 {:?}",
    detection_count,
    table.len(),
    table.columns()
  );
  table.reconcile(model)
}
