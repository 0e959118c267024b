//! 场景语义校验
//!
//! 先执行结构校验 (字段范围), 再执行跨字段的语义规则。遇到第一个
//! 错误立即返回, 保证报错顺序稳定。

use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;

use contracts::{NetworkPreset, NullStreamError, ScenarioBlueprint};
use validator::Validate;

/// 校验完整的场景蓝图
pub fn validate(blueprint: &ScenarioBlueprint) -> Result<(), NullStreamError> {
    validate_structure(blueprint)?;
    validate_network(blueprint)?;
    validate_sky(blueprint)?;
    validate_injection(blueprint)?;
    validate_engine(blueprint)?;
    Ok(())
}

/// 结构校验: 各字段的取值范围由派生规则描述
fn validate_structure(blueprint: &ScenarioBlueprint) -> Result<(), NullStreamError> {
    blueprint
        .validate()
        .map_err(|errors| NullStreamError::config_validation("scenario", errors.to_string()))
}

fn validate_network(blueprint: &ScenarioBlueprint) -> Result<(), NullStreamError> {
    let network = &blueprint.network;

    if !(-90.0..=90.0).contains(&network.latitude_deg) {
        return Err(NullStreamError::config_validation(
            "network.latitude_deg",
            format!("latitude {} out of range [-90, 90]", network.latitude_deg),
        ));
    }

    if network.preset == NetworkPreset::Custom {
        if network.sites.len() != 3 {
            return Err(NullStreamError::config_validation(
                "network.sites",
                format!("custom network requires exactly 3 sites, got {}", network.sites.len()),
            ));
        }

        let mut names = HashSet::new();
        for (index, site) in network.sites.iter().enumerate() {
            if !(-90.0..=90.0).contains(&site.latitude_deg) {
                return Err(NullStreamError::config_validation(
                    format!("network.sites[{index}].latitude_deg"),
                    format!("latitude {} out of range [-90, 90]", site.latitude_deg),
                ));
            }
            if !names.insert(site.name.as_str()) {
                return Err(NullStreamError::config_validation(
                    "network.sites",
                    format!("duplicate site name `{}`", site.name),
                ));
            }
        }
    }

    Ok(())
}

fn validate_sky(blueprint: &ScenarioBlueprint) -> Result<(), NullStreamError> {
    let sky = &blueprint.sky;

    if !sky.ra_rad.is_finite() || !sky.psi_rad.is_finite() {
        return Err(NullStreamError::config_validation(
            "sky",
            "sky angles must be finite",
        ));
    }
    if !(-FRAC_PI_2..=FRAC_PI_2).contains(&sky.dec_rad) {
        return Err(NullStreamError::config_validation(
            "sky.dec_rad",
            format!("declination {} out of range [-pi/2, pi/2]", sky.dec_rad),
        ));
    }
    if !sky.gps_time.is_finite() {
        return Err(NullStreamError::config_validation(
            "sky.gps_time",
            "GPS time must be finite",
        ));
    }

    Ok(())
}

fn validate_injection(blueprint: &ScenarioBlueprint) -> Result<(), NullStreamError> {
    let injection = &blueprint.injection;

    if !injection.amplitude.is_finite() {
        return Err(NullStreamError::config_validation(
            "injection.amplitude",
            "amplitude must be finite",
        ));
    }
    if !injection.center_s.is_finite() || injection.center_s < 0.0 {
        return Err(NullStreamError::config_validation(
            "injection.center_s",
            format!("injection center {} must be a non-negative offset", injection.center_s),
        ));
    }

    Ok(())
}

fn validate_engine(blueprint: &ScenarioBlueprint) -> Result<(), NullStreamError> {
    let engine = &blueprint.engine;

    if engine.warn_epsilon < engine.singular_epsilon {
        return Err(NullStreamError::config_validation(
            "engine.warn_epsilon",
            format!(
                "warn threshold {:e} must be at least the singular threshold {:e}",
                engine.warn_epsilon, engine.singular_epsilon
            ),
        ));
    }

    Ok(())
}
