// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter};

pub const CACHE_HITS_TOTAL: &str = "hookstore_cache_hits_total";
pub const CACHE_MISSES_TOTAL: &str = "hookstore_cache_misses_total";
pub const CACHE_INVALIDATIONS_TOTAL: &str = "hookstore_cache_invalidations_total";
pub const CACHE_INVALIDATION_FAILURES_TOTAL: &str = "hookstore_cache_invalidation_failures_total";

/// 注册指标描述
///
/// 导出器（例如 Prometheus）由宿主应用安装，未安装时记录操作为空操作。
pub fn describe_metrics() {
    describe_counter!(CACHE_HITS_TOTAL, "Total number of query cache hits");
    describe_counter!(CACHE_MISSES_TOTAL, "Total number of query cache misses");
    describe_counter!(
        CACHE_INVALIDATIONS_TOTAL,
        "Total number of cache entries removed by write-triggered invalidation"
    );
    describe_counter!(
        CACHE_INVALIDATION_FAILURES_TOTAL,
        "Total number of failed bulk cache invalidations"
    );
}

pub fn record_cache_hit(document_type: &'static str) {
    counter!(CACHE_HITS_TOTAL, "document" => document_type).increment(1);
}

pub fn record_cache_miss(document_type: &'static str) {
    counter!(CACHE_MISSES_TOTAL, "document" => document_type).increment(1);
}

pub fn record_invalidation(document_type: &'static str, removed: u64) {
    counter!(CACHE_INVALIDATIONS_TOTAL, "document" => document_type).increment(removed);
}

pub fn record_invalidation_failure(document_type: &'static str) {
    counter!(CACHE_INVALIDATION_FAILURES_TOTAL, "document" => document_type).increment(1);
}
