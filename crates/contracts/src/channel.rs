//! 探测器应变通道契约。
//!
//! 引擎的输入是按参考顺序排列的三条 [`DetectorChannel`],
//! 编号 0 为参考探测器,其 `delay` 必须为 0。

use serde::{Deserialize, Serialize};

use crate::error::NullStreamError;

/// 单台探测器的应变通道。
///
/// `strain` 与 `time` 一一对应,均位于探测器自身的采样网格上;
/// `delay` 为该探测器相对参考探测器的几何到达时差(秒),
/// `f_plus` / `f_cross` 为源方向上的天线响应。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorChannel {
    /// 应变采样序列
    pub strain: Vec<f64>,
    /// 每个样本的 GPS 时间戳(秒),要求严格递增
    pub time: Vec<f64>,
    /// 相对参考探测器的到达时差(秒),参考通道取 0
    pub delay: f64,
    /// 天线响应系数 F+
    pub f_plus: f64,
    /// 天线响应系数 F×
    pub f_cross: f64,
}

impl DetectorChannel {
    pub fn new(strain: Vec<f64>, time: Vec<f64>, delay: f64, f_plus: f64, f_cross: f64) -> Self {
        Self {
            strain,
            time,
            delay,
            f_plus,
            f_cross,
        }
    }

    /// 样本数
    pub fn samples(&self) -> usize {
        self.strain.len()
    }

    /// 构造期校验,`index` 仅用于错误信息定位。
    pub fn validate(&self, index: usize) -> Result<(), NullStreamError> {
        if self.strain.is_empty() {
            return Err(NullStreamError::invalid_input(format!(
                "detector {index}: strain channel is empty"
            )));
        }
        if self.strain.len() != self.time.len() {
            return Err(NullStreamError::invalid_input(format!(
                "detector {index}: strain has {} samples but time has {}",
                self.strain.len(),
                self.time.len()
            )));
        }
        if !self.delay.is_finite() {
            return Err(NullStreamError::invalid_input(format!(
                "detector {index}: delay is not finite"
            )));
        }
        if !self.f_plus.is_finite() || !self.f_cross.is_finite() {
            return Err(NullStreamError::invalid_input(format!(
                "detector {index}: antenna response is not finite"
            )));
        }
        for pair in self.time.windows(2) {
            if !(pair[0] < pair[1]) {
                return Err(NullStreamError::invalid_input(format!(
                    "detector {index}: time axis is not strictly increasing"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_channel() -> DetectorChannel {
        DetectorChannel::new(vec![0.0, 1.0, 0.0], vec![0.0, 1.0, 2.0], 0.0, 0.6, -0.2)
    }

    #[test]
    fn test_valid_channel_passes() {
        assert!(make_channel().validate(0).is_ok());
    }

    #[test]
    fn test_empty_channel_rejected() {
        let mut ch = make_channel();
        ch.strain.clear();
        ch.time.clear();
        let err = ch.validate(1).unwrap_err();
        assert!(err.to_string().contains("detector 1"), "got: {err}");
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut ch = make_channel();
        ch.time.pop();
        assert!(ch.validate(0).is_err());
    }

    #[test]
    fn test_non_monotonic_time_rejected() {
        let mut ch = make_channel();
        ch.time[2] = 1.0;
        let err = ch.validate(2).unwrap_err();
        assert!(
            err.to_string().contains("strictly increasing"),
            "got: {err}"
        );
    }

    #[test]
    fn test_nan_time_rejected() {
        let mut ch = make_channel();
        ch.time[1] = f64::NAN;
        assert!(ch.validate(0).is_err());
    }

    #[test]
    fn test_non_finite_antenna_rejected() {
        let mut ch = make_channel();
        ch.f_cross = f64::INFINITY;
        assert!(ch.validate(0).is_err());
    }
}
