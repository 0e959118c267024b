//! 场景蓝图定义。
//!
//! 蓝图是一份可序列化的场景描述,分为六个段落:
//! `[scenario]` 元信息、`[network]` 探测器网络、`[sky]` 源方向、
//! `[injection]` 注入波形、`[sampling]` 采样网格、`[engine]` 引擎调参。
//! 所有字段均有默认值,空文档即为一个合法场景。
//!
//! 结构性下界(正数、非负)由 `validator` 派生规则描述,
//! 跨字段的语义规则在 `config_loader::validator` 中实现。

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::NullStreamConfig;
use crate::error::NullStreamError;

/// 蓝图格式版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 顶层场景蓝图
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct ScenarioBlueprint {
    #[serde(default)]
    pub version: ConfigVersion,
    #[serde(default)]
    pub scenario: ScenarioInfo,
    #[serde(default)]
    #[validate(nested)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub sky: SkyConfig,
    #[serde(default)]
    #[validate(nested)]
    pub injection: InjectionConfig,
    #[serde(default)]
    #[validate(nested)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    #[validate(nested)]
    pub engine: EngineConfig,
}

/// 场景元信息
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// 网络预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkPreset {
    /// 等边三角形网络:同址三台,臂方位两两相差 120°
    #[default]
    Triangle,
    /// 由 `sites` 显式给出三个台址
    Custom,
}

/// 探测器网络段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NetworkConfig {
    #[serde(default)]
    pub preset: NetworkPreset,
    /// 臂长(米),仅作场景描述,长波近似下不参与响应计算
    #[serde(default = "default_arm_length_m")]
    #[validate(range(exclusive_min = 0.0))]
    pub arm_length_m: f64,
    /// 台址纬度(度)
    #[serde(default)]
    pub latitude_deg: f64,
    /// 台址经度(度)
    #[serde(default)]
    pub longitude_deg: f64,
    /// 台址海拔(米)
    #[serde(default)]
    pub elevation_m: f64,
    /// 首台 x 臂方位角(度,自北顺时针)
    #[serde(default)]
    pub orientation_deg: f64,
    /// `preset = "custom"` 时的显式台址列表,必须恰好三个
    #[serde(default)]
    pub sites: Vec<SiteSpec>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            preset: NetworkPreset::Triangle,
            arm_length_m: default_arm_length_m(),
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            elevation_m: 0.0,
            orientation_deg: 0.0,
            sites: Vec::new(),
        }
    }
}

/// 单个台址描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSpec {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub elevation_m: f64,
    /// x 臂方位角(度,自北顺时针)
    pub x_azimuth_deg: f64,
    /// y 臂方位角(度,自北顺时针)
    pub y_azimuth_deg: f64,
    #[serde(default)]
    pub x_tilt_deg: f64,
    #[serde(default)]
    pub y_tilt_deg: f64,
}

/// 源方向与偏振段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyConfig {
    /// 赤经(弧度)
    #[serde(default)]
    pub ra_rad: f64,
    /// 赤纬(弧度)
    #[serde(default)]
    pub dec_rad: f64,
    /// 偏振角(弧度)
    #[serde(default)]
    pub psi_rad: f64,
    /// 天线响应与时差的参考 GPS 时刻(秒)
    #[serde(default = "default_gps_time")]
    pub gps_time: f64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            ra_rad: 0.0,
            dec_rad: 0.0,
            psi_rad: 0.0,
            gps_time: default_gps_time(),
        }
    }
}

/// 注入波形种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformKind {
    /// 正弦-高斯短爆发,h+ 为余弦相位,h× 为正弦相位
    #[default]
    SineGaussian,
    /// 单样本脉冲,仅 h+ 分量
    Impulse,
}

/// 注入段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct InjectionConfig {
    #[serde(default)]
    pub kind: WaveformKind,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// 波形中心相对采样段起点的偏移(秒)
    #[serde(default = "default_center_s")]
    pub center_s: f64,
    #[serde(default = "default_frequency_hz")]
    #[validate(range(exclusive_min = 0.0))]
    pub frequency_hz: f64,
    /// 品质因子,τ = q / (√2 π f)
    #[serde(default = "default_q")]
    #[validate(range(exclusive_min = 0.0))]
    pub q: f64,
    /// 加性高斯白噪声标准差,0 表示无噪声
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub noise_sigma: f64,
    /// 噪声种子,缺省时每次运行随机抽取
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            kind: WaveformKind::SineGaussian,
            amplitude: default_amplitude(),
            center_s: default_center_s(),
            frequency_hz: default_frequency_hz(),
            q: default_q(),
            noise_sigma: 0.0,
            seed: None,
        }
    }
}

/// 采样段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SamplingConfig {
    #[serde(default = "default_rate_hz")]
    #[validate(range(exclusive_min = 0.0))]
    pub rate_hz: f64,
    #[serde(default = "default_duration_s")]
    #[validate(range(exclusive_min = 0.0))]
    pub duration_s: f64,
    /// 采样段起点 GPS 时刻(秒)
    #[serde(default = "default_start_gps")]
    pub start_gps: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
            duration_s: default_duration_s(),
            start_gps: default_start_gps(),
        }
    }
}

/// 引擎调参段,字段含义见 [`NullStreamConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    #[serde(default = "default_singular_epsilon")]
    #[validate(range(exclusive_min = 0.0))]
    pub singular_epsilon: f64,
    #[serde(default = "default_warn_epsilon")]
    #[validate(range(exclusive_min = 0.0))]
    pub warn_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            singular_epsilon: default_singular_epsilon(),
            warn_epsilon: default_warn_epsilon(),
        }
    }
}

fn default_arm_length_m() -> f64 {
    10_000.0
}

fn default_gps_time() -> f64 {
    1_400_000_000.0
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_center_s() -> f64 {
    2.0
}

fn default_frequency_hz() -> f64 {
    100.0
}

fn default_q() -> f64 {
    8.9
}

fn default_rate_hz() -> f64 {
    4096.0
}

fn default_duration_s() -> f64 {
    4.0
}

fn default_start_gps() -> f64 {
    1_400_000_000.0
}

fn default_singular_epsilon() -> f64 {
    1e-12
}

fn default_warn_epsilon() -> f64 {
    1e-3
}

impl ScenarioBlueprint {
    /// 派生引擎运行配置
    pub fn to_engine_config(&self) -> NullStreamConfig {
        NullStreamConfig {
            singular_epsilon: self.engine.singular_epsilon,
            warn_epsilon: self.engine.warn_epsilon,
        }
    }

    /// 解析网络段为三个具体台址。
    ///
    /// 三角形预设在同一台址生成三台,x 臂方位依次旋转 120°,
    /// y 臂相对各自 x 臂偏 60°。
    pub fn site_specs(&self) -> Result<Vec<SiteSpec>, NullStreamError> {
        match self.network.preset {
            NetworkPreset::Triangle => {
                let net = &self.network;
                Ok((0..3)
                    .map(|k| {
                        let x_azimuth = net.orientation_deg + 120.0 * k as f64;
                        SiteSpec {
                            name: format!("E{}", k + 1),
                            latitude_deg: net.latitude_deg,
                            longitude_deg: net.longitude_deg,
                            elevation_m: net.elevation_m,
                            x_azimuth_deg: x_azimuth,
                            y_azimuth_deg: x_azimuth + 60.0,
                            x_tilt_deg: 0.0,
                            y_tilt_deg: 0.0,
                        }
                    })
                    .collect())
            }
            NetworkPreset::Custom => {
                if self.network.sites.len() != 3 {
                    return Err(NullStreamError::config_validation(
                        "network.sites",
                        format!(
                            "custom preset requires exactly 3 sites, got {}",
                            self.network.sites.len()
                        ),
                    ));
                }
                Ok(self.network.sites.clone())
            }
        }
    }

    /// 采样段样本数
    pub fn segment_samples(&self) -> usize {
        (self.sampling.rate_hz * self.sampling.duration_s).round() as usize
    }

    /// 注入中心的绝对 GPS 时刻
    pub fn injection_center_gps(&self) -> f64 {
        self.sampling.start_gps + self.injection.center_s
    }
}
