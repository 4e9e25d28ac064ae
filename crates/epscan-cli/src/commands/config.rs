//! Config command - inspect and edit the settings file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Subcommand};
use console::style;
use rust_decimal::Decimal;

use epscan_core::EpscanConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show every setting
    Show {
        /// Print the settings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a settings file holding the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one setting or a whole section (e.g. "batch.jobs", "document")
    Get { key: String },

    /// Change one setting (lists are comma-separated, e.g. "htm,html")
    Set { key: Key, value: String },

    /// Show the settings file location
    Path,
}

/// A single editable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    LookaheadChars,
    Extensions,
    SkipScriptAndStyle,
    Jobs,
    Tolerance,
}

impl Key {
    const ALL: [Key; 5] = [
        Key::LookaheadChars,
        Key::Extensions,
        Key::SkipScriptAndStyle,
        Key::Jobs,
        Key::Tolerance,
    ];

    fn name(self) -> &'static str {
        match self {
            Key::LookaheadChars => "extraction.lookahead_chars",
            Key::Extensions => "document.extensions",
            Key::SkipScriptAndStyle => "document.skip_script_and_style",
            Key::Jobs => "batch.jobs",
            Key::Tolerance => "check.tolerance",
        }
    }

    fn section(self) -> &'static str {
        self.name().split('.').next().unwrap_or_default()
    }

    fn value(self, config: &EpscanConfig) -> String {
        match self {
            Key::LookaheadChars => config.extraction.lookahead_chars.to_string(),
            Key::Extensions => config.document.extensions.join(","),
            Key::SkipScriptAndStyle => config.document.skip_script_and_style.to_string(),
            Key::Jobs => config.batch.jobs.to_string(),
            Key::Tolerance => config.check.tolerance.to_string(),
        }
    }

    fn apply(self, config: &mut EpscanConfig, raw: &str) -> anyhow::Result<()> {
        match self {
            Key::LookaheadChars => config.extraction.lookahead_chars = self.parse(raw)?,
            Key::Extensions => config.document.extensions = parse_extensions(raw),
            Key::SkipScriptAndStyle => config.document.skip_script_and_style = self.parse(raw)?,
            Key::Jobs => config.batch.jobs = self.parse(raw)?,
            Key::Tolerance => config.check.tolerance = self.parse::<Decimal>(raw)?,
        }
        Ok(())
    }

    fn parse<T>(self, raw: &str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        raw.trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value {:?} for {}: {}", raw, self, e))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .into_iter()
            .find(|key| key.name() == s.trim())
            .ok_or_else(|| {
                let known: Vec<_> = Key::ALL.iter().map(|k| k.name()).collect();
                format!("unknown key {:?}, expected one of: {}", s, known.join(", "))
            })
    }
}

/// `.HTM, html` -> `["htm", "html"]`
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map_or_else(default_config_path, PathBuf::from);

    match args.command {
        ConfigCommand::Show { json } => show_config(&path, json),
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

/// Default configuration location, `<config_dir>/epscan/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("epscan")
        .join("config.json")
}

/// The settings file, or the defaults when it does not exist yet.
fn load(path: &Path) -> anyhow::Result<EpscanConfig> {
    if path.exists() {
        Ok(EpscanConfig::from_file(path)?)
    } else {
        Ok(EpscanConfig::default())
    }
}

fn settings_lines(config: &EpscanConfig, section: Option<&str>) -> Vec<String> {
    Key::ALL
        .into_iter()
        .filter(|key| section.is_none_or(|s| key.section() == s))
        .map(|key| format!("{:<32} {}", key.name(), key.value(config)))
        .collect()
}

fn show_config(path: &Path, json: bool) -> anyhow::Result<()> {
    let config = load(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if path.exists() {
        println!("{} Settings from {}", style("ℹ").blue(), path.display());
    } else {
        println!(
            "{} No settings file at {}, showing defaults.",
            style("ℹ").blue(),
            path.display()
        );
    }
    for line in settings_lines(&config, None) {
        println!("  {}", line);
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = EpscanConfig::default();
    config.save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    for line in settings_lines(&config, None) {
        println!("  {}", line);
    }

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = load(path)?;

    match key.parse::<Key>() {
        Ok(key) => println!("{}", key.value(&config)),
        Err(unknown) => {
            let lines = settings_lines(&config, Some(key.trim()));
            if lines.is_empty() {
                anyhow::bail!(unknown);
            }
            for line in lines {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn set_config(path: &Path, key: Key, value: &str) -> anyhow::Result<()> {
    let mut config = load(path)?;
    key.apply(&mut config, value)?;
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        key.value(&config)
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'epscan config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_path() {
        let path = default_config_path();
        assert!(path.ends_with("epscan/config.json"));
    }

    #[test]
    fn test_every_key_parses_from_its_name() {
        for key in Key::ALL {
            assert_eq!(key.name().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = "extraction.window".parse::<Key>().unwrap_err();
        assert!(err.contains("extraction.lookahead_chars"));
        assert!("extraction".parse::<Key>().is_err());
    }

    #[test]
    fn test_apply_typed_values() {
        let mut config = EpscanConfig::default();
        Key::LookaheadChars.apply(&mut config, "250").unwrap();
        Key::Extensions.apply(&mut config, ".HTM, txt,").unwrap();
        Key::SkipScriptAndStyle.apply(&mut config, "false").unwrap();
        Key::Tolerance.apply(&mut config, "0.01").unwrap();

        assert_eq!(config.extraction.lookahead_chars, 250);
        assert_eq!(config.document.extensions, vec!["htm", "txt"]);
        assert!(!config.document.skip_script_and_style);
        assert_eq!(Key::Tolerance.value(&config), "0.01");
    }

    #[test]
    fn test_apply_rejects_wrong_type() {
        let mut config = EpscanConfig::default();
        assert!(Key::Jobs.apply(&mut config, "many").is_err());
        assert!(Key::SkipScriptAndStyle.apply(&mut config, "maybe").is_err());
        assert_eq!(config.batch.jobs, 4);
    }

    #[test]
    fn test_settings_lines_by_section() {
        let lines = settings_lines(&EpscanConfig::default(), Some("document"));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("document.extensions"));
        assert!(lines[0].ends_with("htm,html,txt"));
    }

    #[test]
    fn test_set_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        set_config(&path, Key::Jobs, "8").unwrap();
        assert_eq!(load(&path).unwrap().batch.jobs, 8);

        assert!(set_config(&path, Key::Jobs, "0").is_err());
        assert_eq!(load(&path).unwrap().batch.jobs, 8);
    }
}
