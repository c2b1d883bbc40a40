use std::path::PathBuf;

use crate::error::ConfigError;

/// Static defaults shared by the GUI, examples and tests.
#[derive(Debug, Clone, Copy)]
pub struct PreviewDefaults {
    pub window_title: &'static str,
    pub window_size: [f32; 2],
    pub log_filter: &'static str,
    pub log_env_var: &'static str,
    pub font_env_var: &'static str,
}

pub const PREVIEW_DEFAULTS: PreviewDefaults = PreviewDefaults {
    window_title: "Funnel Preview",
    window_size: [1100.0, 1000.0],
    log_filter: "info",
    log_env_var: "FUNNEL_PREVIEW_LOG",
    font_env_var: "FUNNEL_PREVIEW_FONT",
};

pub const USAGE: &str = "Usage:\n\
    funnel-preview-gui [FILE.json] [--log FILTER] [--font PATH]\n\
    \n\
    FILE.json      funnel data to open on startup\n\
    --log FILTER   tracing filter directives (env: FUNNEL_PREVIEW_LOG, default: info)\n\
    --font PATH    extra font used as fallback for CJK text (env: FUNNEL_PREVIEW_FONT)\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Funnel file uploaded at startup.
    pub initial_file: Option<PathBuf>,
    pub log_filter: String,
    pub font_path: Option<PathBuf>,
    pub show_help: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            initial_file: None,
            log_filter: PREVIEW_DEFAULTS.log_filter.to_string(),
            font_path: None,
            show_help: false,
        }
    }
}

impl PreviewConfig {
    /// Build from process arguments (without the program name) and the environment.
    pub fn from_args_and_env<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Self::from_parts(args, |key| std::env::var(key).ok())
    }

    /// Environment values are applied first; flags override them.
    pub fn from_parts<I, E>(args: I, env: E) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(filter) = env(PREVIEW_DEFAULTS.log_env_var).filter(|v| !v.trim().is_empty()) {
            cfg.log_filter = filter;
        }
        if let Some(font) = env(PREVIEW_DEFAULTS.font_env_var).filter(|v| !v.trim().is_empty()) {
            cfg.font_path = Some(PathBuf::from(font));
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => cfg.show_help = true,
                "--log" => cfg.log_filter = args.next().ok_or_else(|| missing("--log"))?,
                "--font" => {
                    let path = args.next().ok_or_else(|| missing("--font"))?;
                    cfg.font_path = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => {
                    return Err(ConfigError::UnknownArgument(flag.to_string()));
                }
                path => {
                    if let Some(first) = &cfg.initial_file {
                        return Err(ConfigError::ExtraPositional {
                            first: first.display().to_string(),
                            second: path.to_string(),
                        });
                    }
                    cfg.initial_file = Some(PathBuf::from(path));
                }
            }
        }
        Ok(cfg)
    }
}

fn missing(flag: &str) -> ConfigError {
    ConfigError::MissingValue {
        flag: flag.to_string(),
    }
}
