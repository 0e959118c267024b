//! 场景配置解析
//!
//! 支持 TOML 和 JSON 两种格式, 解析失败时保留底层错误作为 source。

use contracts::{NullStreamError, ScenarioBlueprint};

/// 支持的配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// 根据文件扩展名判定格式, 不区分大小写
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 按指定格式解析场景蓝图
pub fn parse(content: &str, format: ConfigFormat) -> Result<ScenarioBlueprint, NullStreamError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

fn parse_toml(content: &str) -> Result<ScenarioBlueprint, NullStreamError> {
    toml::from_str(content).map_err(|error| {
        NullStreamError::config_parse_with_source("invalid TOML scenario", Box::new(error))
    })
}

fn parse_json(content: &str) -> Result<ScenarioBlueprint, NullStreamError> {
    serde_json::from_str(content).map_err(|error| {
        NullStreamError::config_parse_with_source("invalid JSON scenario", Box::new(error))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{NetworkPreset, WaveformKind};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("JSON"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }

    #[test]
    fn test_parse_toml_scenario() {
        let content = r#"
            [scenario]
            name = "triangle-demo"

            [network]
            preset = "triangle"
            latitude_deg = 43.6

            [injection]
            kind = "sine_gaussian"
            frequency_hz = 250.0
        "#;

        let blueprint = parse(content, ConfigFormat::Toml).unwrap();
        assert_eq!(blueprint.scenario.name, "triangle-demo");
        assert_eq!(blueprint.network.preset, NetworkPreset::Triangle);
        assert_eq!(blueprint.network.latitude_deg, 43.6);
        assert_eq!(blueprint.injection.kind, WaveformKind::SineGaussian);
        assert_eq!(blueprint.injection.frequency_hz, 250.0);
        // 未出现的字段取默认值
        assert_eq!(blueprint.sampling.rate_hz, 4096.0);
    }

    #[test]
    fn test_parse_json_scenario() {
        let content = r#"{
            "scenario": { "name": "impulse-demo" },
            "injection": { "kind": "impulse", "amplitude": 2.5 }
        }"#;

        let blueprint = parse(content, ConfigFormat::Json).unwrap();
        assert_eq!(blueprint.scenario.name, "impulse-demo");
        assert_eq!(blueprint.injection.kind, WaveformKind::Impulse);
        assert_eq!(blueprint.injection.amplitude, 2.5);
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let error = parse("injection = not valid toml", ConfigFormat::Toml).unwrap_err();
        match error {
            NullStreamError::ConfigParse { message, source } => {
                assert!(message.contains("TOML"));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
