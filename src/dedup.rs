// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/dedup.rs - 重复图像记录的消解
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

use std::collections::{HashMap, HashSet};

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::info;

use crate::aggregate::AggregatedRecord;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
  pub same_total: usize,
  pub empty_duplicates: usize,
  pub rows_kept: usize,
}

/// 同一张图像可能既有占位行又有检测行（例如重复处理），按以下顺序消解：
///
/// 1. (image_capt, camera_ref, total) 相同的行只保留第一行；
/// 2. (image_capt, camera_ref) 仍有多行时，删除其中 total 为 0 的行；
/// 3. 按 (image_proc, image_capt, camera_ref) 稳定排序。
///
/// 第 1 步之后同一图像最多剩一行 total 为 0，因此第 2 步不会删光一张图像的所有行。
pub fn resolve(records: Vec<AggregatedRecord>) -> (Vec<AggregatedRecord>, DedupStats) {
  let mut stats = DedupStats::default();
  let input_len = records.len();

  let mut seen: HashSet<(DateTime<Tz>, String, u64)> = HashSet::with_capacity(input_len);
  let records: Vec<AggregatedRecord> = records
    .into_iter()
    .filter(|r| seen.insert((r.image_capt, r.camera_ref.clone(), total_key(r))))
    .collect();
  stats.same_total = input_len - records.len();

  let mut per_image: HashMap<(DateTime<Tz>, String), usize> = HashMap::new();
  for record in &records {
    *per_image
      .entry((record.image_capt, record.camera_ref.clone()))
      .or_default() += 1;
  }
  let deduped_len = records.len();
  let mut records: Vec<AggregatedRecord> = records
    .into_iter()
    .filter(|r| {
      let shared = per_image
        .get(&(r.image_capt, r.camera_ref.clone()))
        .is_some_and(|&n| n >= 2);
      !(shared && r.total() == 0.0)
    })
    .collect();
  stats.empty_duplicates = deduped_len - records.len();

  records.sort_by(|a, b| {
    (a.image_proc, a.image_capt, &a.camera_ref).cmp(&(b.image_proc, b.image_capt, &b.camera_ref))
  });

  stats.rows_kept = records.len();
  info!(
    "去重完成: 同总数重复 {} 行, 空检测重复 {} 行, 保留 {} 行",
    stats.same_total, stats.empty_duplicates, stats.rows_kept
  );
  (records, stats)
}

/// 总数的可哈希表示，-0.0 与 0.0 视为相同
fn total_key(record: &AggregatedRecord) -> u64 {
  (record.total() + 0.0).to_bits()
}
