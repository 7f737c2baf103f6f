//! Layered settings: command line, then TOML config file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

use invguard_diff::DEFAULT_SET_LIKE_KEYS;
use invguard_gate::Limits;

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "inventory_semantic_guard.toml";

/// Settings that may appear in the config file.
///
/// Keys may sit at the top level or inside an `[inventory_guard]` table.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ConfigKeys {
    pub current: Option<PathBuf>,
    pub new: Option<PathBuf>,
    pub max_host_change_pct: Option<f64>,
    pub max_var_change_pct: Option<f64>,
    pub max_host_change_abs: Option<u64>,
    pub max_var_change_abs: Option<u64>,
    pub ignore_key_regex: Option<Vec<String>>,
    pub set_like_key_regex: Option<Vec<String>>,
    pub json_out: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl ConfigKeys {
    /// Fill every unset key from `fallback`.
    fn or(self, fallback: ConfigKeys) -> ConfigKeys {
        ConfigKeys {
            current: self.current.or(fallback.current),
            new: self.new.or(fallback.new),
            max_host_change_pct: self.max_host_change_pct.or(fallback.max_host_change_pct),
            max_var_change_pct: self.max_var_change_pct.or(fallback.max_var_change_pct),
            max_host_change_abs: self.max_host_change_abs.or(fallback.max_host_change_abs),
            max_var_change_abs: self.max_var_change_abs.or(fallback.max_var_change_abs),
            ignore_key_regex: self.ignore_key_regex.or(fallback.ignore_key_regex),
            set_like_key_regex: self.set_like_key_regex.or(fallback.set_like_key_regex),
            json_out: self.json_out.or(fallback.json_out),
            report: self.report.or(fallback.report),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(flatten)]
    top: ConfigKeys,
    #[serde(default)]
    inventory_guard: Option<ConfigKeys>,
}

/// Parse config file text. Top-level keys win over the `[inventory_guard]` table.
pub fn parse_config(text: &str) -> anyhow::Result<ConfigKeys> {
    let file: ConfigFile = toml::from_str(text)?;
    Ok(file.top.or(file.inventory_guard.unwrap_or_default()))
}

/// Load the config file.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
/// `cwd` is used if present; otherwise no config applies.
pub fn load_config(path: Option<&Path>, cwd: &Path) -> anyhow::Result<ConfigKeys> {
    let path = match path {
        Some(p) if !p.is_file() => bail!("Config not found: {}", p.display()),
        Some(p) => p.to_path_buf(),
        None => {
            let p = cwd.join(DEFAULT_CONFIG_FILE);
            if !p.is_file() {
                return Ok(ConfigKeys::default());
            }
            p
        }
    };
    tracing::info!(path = %path.display(), "loading config file");
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Built-in defaults, applied when neither the command line nor the config
/// file sets a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Defaults {
    pub limits: Limits,
    pub set_like_key_regex: Vec<String>,
}

impl Defaults {
    pub fn builtin() -> Self {
        Self {
            limits: Limits::default(),
            set_like_key_regex: DEFAULT_SET_LIKE_KEYS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Fully merged settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub current: PathBuf,
    pub new: PathBuf,
    pub limits: Limits,
    pub set_like_key_regex: Vec<String>,
    pub json_out: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl Settings {
    /// Merge with precedence: explicit CLI flag > config file > defaults.
    pub fn resolve(cli: &Cli, file: ConfigKeys, defaults: &Defaults) -> anyhow::Result<Self> {
        let non_empty = |v: &Vec<String>| (!v.is_empty()).then(|| v.clone());

        let Some(current) = cli.current.clone().or(file.current) else {
            bail!("--current is required (CLI or TOML)");
        };
        let Some(new) = cli.new.clone().or(file.new) else {
            bail!("--new is required (CLI or TOML)");
        };

        let limits = Limits {
            max_host_change_pct: cli
                .max_host_change_pct
                .or(file.max_host_change_pct)
                .unwrap_or(defaults.limits.max_host_change_pct),
            max_var_change_pct: cli
                .max_var_change_pct
                .or(file.max_var_change_pct)
                .unwrap_or(defaults.limits.max_var_change_pct),
            max_host_change_abs: cli
                .max_host_change_abs
                .or(file.max_host_change_abs)
                .unwrap_or(defaults.limits.max_host_change_abs),
            max_var_change_abs: cli
                .max_var_change_abs
                .or(file.max_var_change_abs)
                .unwrap_or(defaults.limits.max_var_change_abs),
            ignored_key_regex: non_empty(&cli.ignore_key_regex)
                .or(file.ignore_key_regex)
                .unwrap_or_else(|| defaults.limits.ignored_key_regex.clone()),
        };
        limits.validate()?;

        Ok(Self {
            current,
            new,
            limits,
            set_like_key_regex: non_empty(&cli.set_like_key_regex)
                .or(file.set_like_key_regex)
                .unwrap_or_else(|| defaults.set_like_key_regex.clone()),
            json_out: cli.json_out.clone().or(file.json_out),
            report: cli.report.clone().or(file.report),
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["inventory-guard"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flat_and_table_keys() {
        let keys = parse_config(
            r#"
            current = "cur.yml"
            max_var_change_pct = 7

            [inventory_guard]
            new = "new.yml"
            max_var_change_pct = 1.5
            ignore_key_regex = ["^build_id$"]
            "#,
        )
        .unwrap();
        assert_eq!(keys.current, Some(PathBuf::from("cur.yml")));
        assert_eq!(keys.new, Some(PathBuf::from("new.yml")));
        assert_eq!(keys.max_var_change_pct, Some(7.0));
        assert_eq!(keys.ignore_key_regex, Some(vec!["^build_id$".to_string()]));
    }

    #[test]
    fn unknown_keys_ignored() {
        let keys = parse_config("something_else = true\n").unwrap();
        assert_eq!(keys, ConfigKeys::default());
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_config("max_host_change_abs = \"lots\"").is_err());
    }

    #[test]
    fn defaults_apply_when_nothing_set() {
        let s = Settings::resolve(
            &cli(&["-c", "a.yml", "-n", "b.yml"]),
            ConfigKeys::default(),
            &Defaults::builtin(),
        )
        .unwrap();
        assert_eq!(s.limits, Limits::default());
        assert_eq!(s.set_like_key_regex, vec!["^foreman_host_collections$"]);
        assert!(s.json_out.is_none());
    }

    #[test]
    fn cli_beats_config_beats_defaults() {
        let file = ConfigKeys {
            current: Some("from-file.yml".into()),
            new: Some("new-from-file.yml".into()),
            max_host_change_pct: Some(20.0),
            max_var_change_pct: Some(9.0),
            ignore_key_regex: Some(vec!["file".into()]),
            ..ConfigKeys::default()
        };
        let s = Settings::resolve(
            &cli(&["-c", "cli.yml", "--max-host-change-pct", "1", "--ignore-key-regex", "cli"]),
            file,
            &Defaults::builtin(),
        )
        .unwrap();
        assert_eq!(s.current, PathBuf::from("cli.yml"));
        assert_eq!(s.new, PathBuf::from("new-from-file.yml"));
        assert_eq!(s.limits.max_host_change_pct, 1.0);
        assert_eq!(s.limits.max_var_change_pct, 9.0);
        assert_eq!(s.limits.max_host_change_abs, 0);
        assert_eq!(s.limits.ignored_key_regex, vec!["cli"]);
    }

    #[test]
    fn missing_paths_are_errors() {
        let err = Settings::resolve(&cli(&["-n", "b.yml"]), ConfigKeys::default(), &Defaults::builtin())
            .unwrap_err();
        assert!(err.to_string().contains("--current is required"));

        let err = Settings::resolve(&cli(&["-c", "a.yml"]), ConfigKeys::default(), &Defaults::builtin())
            .unwrap_err();
        assert!(err.to_string().contains("--new is required"));
    }

    #[test]
    fn negative_pct_is_rejected() {
        let file = ConfigKeys {
            max_host_change_pct: Some(-5.0),
            ..ConfigKeys::default()
        };
        assert!(Settings::resolve(&cli(&["-c", "a", "-n", "b"]), file, &Defaults::builtin()).is_err());
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Config not found"));
    }

    #[test]
    fn default_config_discovered_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(None, dir.path()).unwrap(), ConfigKeys::default());

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "max_host_change_abs = 4\n").unwrap();
        let keys = load_config(None, dir.path()).unwrap();
        assert_eq!(keys.max_host_change_abs, Some(4));
    }
}
