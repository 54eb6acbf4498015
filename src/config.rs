use crate::selection::{BitRateMode, ChannelMode, EncodeOptions, OutputFormat};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    default: Profile,
    #[serde(default)]
    profile: HashMap<String, Profile>,
}

#[derive(Debug, Deserialize, Default, Clone)]
struct Profile {
    format: Option<String>,
    bit_depth: Option<u32>,
    channel_mode: Option<String>,
    bit_rate_mode: Option<String>,
    bit_rate: Option<u32>,
    vbr_quality: Option<u8>,
    use_quality: Option<bool>,
    quality: Option<u8>,
    server: Option<String>,
}

/// Encode defaults resolved from the config file; CLI flags overlay these.
#[derive(Debug, Default, Clone)]
pub struct Defaults {
    pub format: Option<OutputFormat>,
    pub bit_rate_mode: Option<BitRateMode>,
    pub use_quality: Option<bool>,
    pub options: EncodeOptions,
    pub server: Option<String>,
}

pub fn load_defaults(path: Option<&Path>, profile: Option<&str>) -> Result<Option<Defaults>> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    if !config_path.exists() {
        return if path.is_some() {
            anyhow::bail!("config file not found: {}", config_path.display())
        } else {
            Ok(None)
        };
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("read {}", config_path.display()))?;
    let parsed: ConfigFile =
        toml::from_str(&contents).with_context(|| format!("parse {}", config_path.display()))?;

    let mut defaults = Defaults::default();
    apply_profile(&parsed.default, &mut defaults)?;

    if let Some(name) = profile {
        if let Some(profile) = parsed.profile.get(name) {
            apply_profile(profile, &mut defaults)?;
        } else {
            anyhow::bail!("profile not found in config: {}", name);
        }
    }

    Ok(Some(defaults))
}

fn apply_profile(profile: &Profile, defaults: &mut Defaults) -> Result<()> {
    if let Some(value) = profile.format.as_deref() {
        defaults.format = Some(parse_format(value)?);
    }
    if let Some(value) = profile.bit_depth {
        defaults.options.bit_depth = Some(value);
    }
    if let Some(value) = profile.channel_mode.as_deref() {
        defaults.options.channel_mode = Some(parse_channel_mode(value)?);
    }
    if let Some(value) = profile.bit_rate_mode.as_deref() {
        defaults.bit_rate_mode = Some(parse_bit_rate_mode(value)?);
    }
    if let Some(value) = profile.bit_rate {
        defaults.options.bit_rate = Some(value);
    }
    if let Some(value) = profile.vbr_quality {
        defaults.options.vbr_quality = Some(value);
    }
    if let Some(value) = profile.use_quality {
        defaults.use_quality = Some(value);
    }
    if let Some(value) = profile.quality {
        defaults.options.quality = Some(value);
    }
    if let Some(value) = profile.server.as_deref() {
        defaults.server = Some(value.to_string());
    }
    Ok(())
}

pub fn parse_format(value: &str) -> Result<OutputFormat> {
    OutputFormat::from_id(&value.to_ascii_lowercase())
        .with_context(|| format!("invalid format: {} (expected wav or mp3)", value))
}

pub fn parse_bit_rate_mode(value: &str) -> Result<BitRateMode> {
    BitRateMode::from_id(&value.to_ascii_lowercase())
        .with_context(|| format!("invalid bit rate mode: {} (expected cbr, abr or vbr)", value))
}

pub fn parse_channel_mode(value: &str) -> Result<ChannelMode> {
    ChannelMode::from_id(&value.to_ascii_lowercase()).with_context(|| {
        format!(
            "invalid channel mode: {} (expected joint-stereo, stereo or mono)",
            value
        )
    })
}

fn default_config_path() -> Result<PathBuf> {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => {
            let home = std::env::var("HOME").context("HOME not set")?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(base.join("encx").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn profile_values_override_defaults() {
        let file = write_config(
            r#"
            [default]
            format = "mp3"
            bit_rate_mode = "cbr"
            bit_rate = 192

            [profile.podcast]
            bit_rate_mode = "vbr"
            vbr_quality = 4
            channel_mode = "mono"
            "#,
        );

        let defaults = load_defaults(Some(file.path()), Some("podcast"))
            .unwrap()
            .unwrap();
        assert_eq!(defaults.format, Some(OutputFormat::Mp3));
        assert_eq!(defaults.bit_rate_mode, Some(BitRateMode::Vbr));
        assert_eq!(defaults.options.bit_rate, Some(192));
        assert_eq!(defaults.options.vbr_quality, Some(4));
        assert_eq!(defaults.options.channel_mode, Some(ChannelMode::Mono));
    }

    #[test]
    fn rejects_unknown_identifiers() {
        let file = write_config("[default]\nformat = \"ogg\"\n");
        assert!(load_defaults(Some(file.path()), None).is_err());
    }

    #[test]
    fn rejects_missing_profile() {
        let file = write_config("[default]\nformat = \"wav\"\n");
        assert!(load_defaults(Some(file.path()), Some("nope")).is_err());
    }
}
