//! # Null Engine
//!
//! 三探测器引力波零流引擎。
//!
//! 功能:
//! - 由三台探测器的天线响应求解 Gürsel–Tinto 组合系数
//! - 将各通道按到达时差平移并重采样到参考时间轴
//! - 构造天依赖的网络零流与天无关的 ET 零流
//! - 全部派生量惰性计算、一次缓存,重复访问不重算
//!
//! ## 使用示例
//!
//! ```ignore
//! use contracts::{DetectorChannel, NullStreamConfig};
//! use null_engine::NullStreamEngine;
//!
//! let channels: [DetectorChannel; 3] = load_event()?;
//! let mut engine = NullStreamEngine::new(channels, NullStreamConfig::default())?;
//!
//! let coeffs = engine.coefficients()?;
//! let null = engine.network_null_stream()?;
//! println!("eta = {}, xi = {}, rms over {} samples", coeffs.eta, coeffs.xi, null.len());
//! ```

mod coeffs;
mod engine;
mod interp;

pub use coeffs::{solve, GurselTintoCoefficients};
pub use engine::{EngineStats, NullStreamEngine};
pub use interp::LinearInterpolant;
