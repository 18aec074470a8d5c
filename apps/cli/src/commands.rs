use std::io::Write;

use anyhow::Context;
use clap::Subcommand;
use localset_core::{SettingValue, SettingsServiceTrait};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a setting as stored, without language resolution
    Raw { key: String },

    /// Print one field of a setting, resolved for the active language
    Field { key: String, name: String },

    /// Print every entry of a multi-item setting, one JSON object per line
    Items { key: String },

    /// Store a value under a key, replacing any previous value
    Set {
        key: String,
        value: String,

        /// Parse VALUE as JSON instead of storing it as text
        #[arg(long)]
        json: bool,
    },

    /// List stored keys
    Keys,
}

pub fn run(
    service: &dyn SettingsServiceTrait,
    language: Option<&str>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Raw { key } => {
            let accessor = service.setting(Some(key.as_str()), language)?;
            writeln!(out, "{}", accessor.to_value())?;
        }
        Command::Field { key, name } => {
            let accessor = service.setting(Some(key.as_str()), language)?;
            match accessor.field_str(&name) {
                Some(value) => writeln!(out, "{}", value)?,
                None => tracing::warn!("Field '{}' of '{}' is not set", name, key),
            }
        }
        Command::Items { key } => {
            let accessor = service.setting(Some(key.as_str()), language)?;
            accessor.try_each(|item, _| -> anyhow::Result<()> {
                writeln!(out, "{}", serde_json::to_string(&item)?)?;
                Ok(())
            })?;
        }
        Command::Set { key, value, json } => {
            let data = if json {
                serde_json::from_str::<SettingValue>(&value)
                    .with_context(|| format!("VALUE for '{}' is not valid JSON", key))?
            } else {
                SettingValue::from(value)
            };
            service.setting(Some(key.as_str()), language)?.save(data)?;
            tracing::info!("Saved setting '{}'", key);
        }
        Command::Keys => {
            for key in service.keys()? {
                writeln!(out, "{}", key)?;
            }
        }
    }
    Ok(())
}
