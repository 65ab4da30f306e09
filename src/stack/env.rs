// ABOUTME: Environment passed to compose and stack deploy commands.
// ABOUTME: Image references, the version variant and profile variables, in that order.

use crate::config::ImageRefs;
use crate::profile::Profile;

pub const STACK_VERSION_VARIANT: &str = "STACK_VERSION_VARIANT";

/// Ordered KEY=VALUE pairs. A repeated key keeps its first position and
/// takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.vars.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.vars.push((key, value)),
        }
        self
    }

    pub fn with_envs<I>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .fold(self, |builder, (key, value)| builder.with_env(key, value))
    }

    pub fn build(self) -> Vec<(String, String)> {
        self.vars
    }
}

/// `8x` for 8.0 and later, `default` otherwise (including unparsable versions).
pub fn stack_variant_as_env(version: &str) -> (String, String) {
    let major = version
        .trim_start_matches('v')
        .split(['.', '-'])
        .next()
        .and_then(|m| m.parse::<u64>().ok());
    let variant = match major {
        Some(major) if major >= 8 => "8x",
        _ => "default",
    };
    (STACK_VERSION_VARIANT.to_string(), variant.to_string())
}

pub fn deployment_env(images: &ImageRefs, version: &str, profile: &Profile) -> Vec<(String, String)> {
    let (variant_key, variant) = stack_variant_as_env(version);
    EnvBuilder::new()
        .with_envs(images.as_env())
        .with_env(variant_key, variant)
        .with_envs(profile.compose_env_vars())
        .build()
}
