use crate::config::toml_config::TomlConfig;
use crate::config::{Settings, SettingsOverrides};
use crate::domain::model::Quantity;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "small-inventory")]
#[command(about = "A small inventory tracker with JSON file persistence")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Inventory JSON file (default: inventory.json)
    #[arg(long)]
    pub data_file: Option<String>,

    /// Append-only diagnostic log (default: inventory.log)
    #[arg(long)]
    pub log_file: Option<String>,

    /// Low-stock threshold (default: 5)
    #[arg(long)]
    pub threshold: Option<Quantity>,

    #[arg(short, long, help = "Also print diagnostics to stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the built-in demonstration sequence (replaces the data file with demo stock)
    Demo,
    /// Add stock for an item
    Add { item: String, quantity: Quantity },
    /// Remove stock for an item, deleting it when depleted
    Remove { item: String, quantity: Quantity },
    /// Print the stored quantity of an item
    Get { item: String },
    /// List items below the low-stock threshold
    LowStock {
        #[arg(long)]
        threshold: Option<Quantity>,
    },
    /// Print every item and its quantity
    Report,
}

impl CliConfig {
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Demo)
    }

    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            data_file: self.data_file.clone(),
            log_file: self.log_file.clone(),
            low_stock_threshold: self.threshold,
            verbose: self.verbose,
        }
    }

    /// Reads the TOML file if one was named and merges the command line over it.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(Settings::resolve(self.overrides(), &file))
    }
}
