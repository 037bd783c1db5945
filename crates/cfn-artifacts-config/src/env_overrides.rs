use super::{LogFormat, RuntimeConfig, TemplateFormat};
use anyhow::{Context, Result};

pub const ENV_PREFIX: &str = "CFN_ARTIFACTS_";

/// Abstraction over environment-variable lookups so tests can supply their
/// own source of overrides.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides to the runtime config.
pub fn apply_env_overrides<E: EnvSource>(config: &mut RuntimeConfig, env: &E) -> Result<()> {
    // AWS client configuration
    if let Some(region) = get_env_string(env, "REGION") {
        config.aws.region = Some(region);
    }
    if let Some(profile) = get_env_string(env, "PROFILE") {
        config.aws.profile = Some(profile);
    }
    if let Some(endpoint) = get_env_string(env, "ENDPOINT_URL") {
        config.aws.endpoint_url = Some(endpoint);
    }

    // Logging
    if let Some(level) = get_env_string(env, "LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = get_env_string(env, "LOG_FORMAT") {
        config.log.format = format
            .parse::<LogFormat>()
            .with_context(|| format!("Invalid {}LOG_FORMAT value", ENV_PREFIX))?;
    }

    // Output
    if let Some(format) = get_env_string(env, "TEMPLATE_FORMAT") {
        config.output.template_format = format
            .parse::<TemplateFormat>()
            .with_context(|| format!("Invalid {}TEMPLATE_FORMAT value", ENV_PREFIX))?;
    }

    Ok(())
}

fn get_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|v| !v.is_empty())
}
