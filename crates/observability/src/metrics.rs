//! 零流指标收集模块
//!
//! 基于 NullRunRecord 收集和统计每次零流计算的运行指标。

use std::collections::HashMap;

use contracts::NullStreamError;
use metrics::{counter, gauge, histogram};

/// 单次零流计算的结果记录
///
/// 管线每完成一次计算就生成一条记录, 供指标导出与聚合统计使用。
#[derive(Debug, Clone, Default)]
pub struct NullRunRecord {
    /// 运行序号 (多次运行时从 0 递增)
    pub run_index: u64,
    /// 每通道样本数
    pub samples: usize,
    /// Gursel-Tinto 系数 eta
    pub eta: f64,
    /// Gursel-Tinto 系数 xi
    pub xi: f64,
    /// 天线响应行列式
    pub denominator: f64,
    /// 网络零流 RMS
    pub network_rms: f64,
    /// 三角台址零流 RMS
    pub et_rms: f64,
    /// 注入信号 RMS (三通道合成)
    pub injected_rms: f64,
}

impl NullRunRecord {
    /// 网络零流抑制比 (零流 RMS / 注入 RMS)
    pub fn network_suppression(&self) -> Option<f64> {
        (self.injected_rms > 0.0).then(|| self.network_rms / self.injected_rms)
    }

    /// 三角台址零流抑制比
    pub fn et_suppression(&self) -> Option<f64> {
        (self.injected_rms > 0.0).then(|| self.et_rms / self.injected_rms)
    }
}

/// 从 NullRunRecord 记录指标
///
/// 每次管线跑完一个场景时调用此函数来记录指标。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_run_metrics;
///
/// let record = run_scenario(&blueprint)?;
/// record_run_metrics(&record);
/// ```
pub fn record_run_metrics(record: &NullRunRecord) {
    // 运行计数器
    counter!("nullstream_runs_total").increment(1);

    // 最近一次运行的系数
    gauge!("nullstream_last_eta").set(record.eta);
    gauge!("nullstream_last_xi").set(record.xi);
    gauge!("nullstream_last_denominator").set(record.denominator);

    // 零流残差
    gauge!("nullstream_network_rms").set(record.network_rms);
    gauge!("nullstream_et_rms").set(record.et_rms);
    histogram!("nullstream_network_rms_hist").record(record.network_rms);
    histogram!("nullstream_et_rms_hist").record(record.et_rms);

    // 抑制比 (有注入时才有意义)
    if let Some(suppression) = record.network_suppression() {
        gauge!("nullstream_network_suppression").set(suppression);
        histogram!("nullstream_network_suppression_hist").record(suppression);
    }
    if let Some(suppression) = record.et_suppression() {
        gauge!("nullstream_et_suppression").set(suppression);
        histogram!("nullstream_et_suppression_hist").record(suppression);
    }
}

/// 记录一次失败, 按错误类别打标签
pub fn record_failure(error: &NullStreamError) {
    counter!(
        "nullstream_failures_total",
        "kind" => error.kind()
    )
    .increment(1);
}

/// 记录一条探测器通道的生成
pub fn record_channel_built(detector: &str, samples: usize) {
    counter!(
        "nullstream_channels_built_total",
        "detector" => detector.to_string()
    )
    .increment(1);
    gauge!(
        "nullstream_channel_samples",
        "detector" => detector.to_string()
    )
    .set(samples as f64);
}

/// 记录单次运行耗时
pub fn record_run_duration_ms(duration_ms: f64) {
    histogram!("nullstream_run_duration_ms").record(duration_ms);
}

/// 零流指标聚合器
///
/// 在内存中聚合多次运行的指标, 便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct NullMetricsAggregator {
    /// 总运行次数
    pub total_runs: u64,

    /// 总失败次数
    pub total_failures: u64,

    /// 网络零流 RMS 统计
    pub network_rms_stats: RunningStats,

    /// 三角台址零流 RMS 统计
    pub et_rms_stats: RunningStats,

    /// 网络零流抑制比统计
    pub network_suppression_stats: RunningStats,

    /// 三角台址零流抑制比统计
    pub et_suppression_stats: RunningStats,

    /// 天线响应行列式统计
    pub denominator_stats: RunningStats,

    /// 各失败类别计数
    pub failure_counts: HashMap<String, u64>,
}

impl NullMetricsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, record: &NullRunRecord) {
        self.total_runs += 1;
        self.network_rms_stats.push(record.network_rms);
        self.et_rms_stats.push(record.et_rms);
        self.denominator_stats.push(record.denominator);

        if let Some(suppression) = record.network_suppression() {
            self.network_suppression_stats.push(suppression);
        }
        if let Some(suppression) = record.et_suppression() {
            self.et_suppression_stats.push(suppression);
        }
    }

    /// 记录一次失败
    pub fn record_failure(&mut self, error: &NullStreamError) {
        self.total_failures += 1;
        *self
            .failure_counts
            .entry(error.kind().to_string())
            .or_insert(0) += 1;
    }

    /// 生成摘要报告
    pub fn summary(&self) -> MetricsSummary {
        let attempts = self.total_runs + self.total_failures;
        MetricsSummary {
            total_runs: self.total_runs,
            total_failures: self.total_failures,
            failure_rate: if attempts > 0 {
                self.total_failures as f64 / attempts as f64 * 100.0
            } else {
                0.0
            },
            network_rms: StatsSummary::from(&self.network_rms_stats),
            et_rms: StatsSummary::from(&self.et_rms_stats),
            network_suppression: StatsSummary::from(&self.network_suppression_stats),
            et_suppression: StatsSummary::from(&self.et_suppression_stats),
            denominator: StatsSummary::from(&self.denominator_stats),
            failure_counts: self.failure_counts.clone(),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 指标摘要
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_runs: u64,
    pub total_failures: u64,
    pub failure_rate: f64,
    pub network_rms: StatsSummary,
    pub et_rms: StatsSummary,
    pub network_suppression: StatsSummary,
    pub et_suppression: StatsSummary,
    pub denominator: StatsSummary,
    pub failure_counts: HashMap<String, u64>,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Null Stream Metrics Summary ===")?;
        writeln!(f, "Completed runs: {}", self.total_runs)?;
        writeln!(
            f,
            "Failed runs: {} ({:.2}%)",
            self.total_failures, self.failure_rate
        )?;
        writeln!(f, "Network null RMS: {}", self.network_rms)?;
        writeln!(f, "ET null RMS: {}", self.et_rms)?;
        writeln!(f, "Network suppression: {}", self.network_suppression)?;
        writeln!(f, "ET suppression: {}", self.et_suppression)?;
        writeln!(f, "Denominator: {}", self.denominator)?;

        if !self.failure_counts.is_empty() {
            writeln!(f, "Failure counts:")?;
            for (kind, count) in &self.failure_counts {
                writeln!(f, "  {}: {}", kind, count)?;
            }
        }

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub rms: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
            rms: stats.rms(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3e}, max={:.3e}, mean={:.3e}, std={:.3e} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
///
/// 除均值方差外同时维护平方和, 用于残差序列的 RMS 统计。
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    sum_squares: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum_squares += value * value;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 均方根
    pub fn rms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.sum_squares / self.count as f64).sqrt()
        }
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }
}
