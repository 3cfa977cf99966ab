// Author: Dustin Pilgrim
// License: MIT

use rune_cfg::RuneConfig;

use xdpi_core::Backend;

use crate::cli::Format;
use crate::paths::default_config_path;

#[derive(Debug, Clone)]
pub struct XdpiConfig {
    pub backend: Backend,
    pub format: Format,
    /// Extra environment variables to report next to the built-in list.
    pub environment: Vec<String>,
}

impl Default for XdpiConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Both,
            format: Format::Text,
            environment: Vec::new(),
        }
    }
}

pub fn load() -> Result<XdpiConfig, String> {
    let path = default_config_path();

    if !path.exists() {
        return Ok(XdpiConfig::default());
    }

    let rc = RuneConfig::from_file(&path).map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<XdpiConfig, String> {
    let mut cfg = XdpiConfig::default();

    if !rc.has("xdpi") {
        return Ok(cfg);
    }

    if let Some(s) = rc
        .get_optional::<String>("xdpi.backend")
        .map_err(|e| format!("config error at xdpi.backend: {e}"))?
    {
        cfg.backend = parse_backend(&s).map_err(|e| format!("config error at xdpi.backend: {e}"))?;
    }

    if let Some(s) = rc
        .get_optional::<String>("xdpi.format")
        .map_err(|e| format!("config error at xdpi.format: {e}"))?
    {
        cfg.format = parse_format(&s).map_err(|e| format!("config error at xdpi.format: {e}"))?;
    }

    // comma separated, e.g. "MY_TOOLKIT_SCALE, OTHER_DPI"
    if let Some(s) = rc
        .get_optional::<String>("xdpi.environment")
        .map_err(|e| format!("config error at xdpi.environment: {e}"))?
    {
        cfg.environment = parse_name_list(&s);
    }

    Ok(cfg)
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    match s.trim().to_lowercase().as_str() {
        "sync" => Ok(Backend::Sync),
        "batched" => Ok(Backend::Batched),
        "both" => Ok(Backend::Both),
        other => Err(format!("expected sync|batched|both, got \"{other}\"")),
    }
}

fn parse_format(s: &str) -> Result<Format, String> {
    match s.trim().to_lowercase().as_str() {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        other => Err(format!("expected text|json, got \"{other}\"")),
    }
}

fn parse_name_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!(parse_backend("sync"), Ok(Backend::Sync));
        assert_eq!(parse_backend(" Batched "), Ok(Backend::Batched));
        assert_eq!(parse_backend("BOTH"), Ok(Backend::Both));
        assert!(parse_backend("xlib").is_err());
    }

    #[test]
    fn format_names() {
        assert_eq!(parse_format("json"), Ok(Format::Json));
        assert_eq!(parse_format("Text"), Ok(Format::Text));
        assert!(parse_format("yaml").is_err());
    }

    #[test]
    fn name_list_skips_blanks() {
        assert_eq!(
            parse_name_list("FOO_SCALE, ,BAR_DPI,"),
            vec!["FOO_SCALE".to_string(), "BAR_DPI".to_string()]
        );
        assert!(parse_name_list("").is_empty());
    }

    #[test]
    fn defaults() {
        let cfg = XdpiConfig::default();
        assert_eq!(cfg.backend, Backend::Both);
        assert_eq!(cfg.format, Format::Text);
    }
}
