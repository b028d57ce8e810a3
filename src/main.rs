use clap::Parser;
use small_inventory::app::commands;
use small_inventory::utils::{logger, validation::Validate};
use small_inventory::{CliConfig, Command};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 解析並驗證配置
    let settings = match config.settings().and_then(|s| s.validate().map(|()| s)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(Path::new(&settings.log_file), &settings.log_level, settings.verbose)?;
    tracing::info!("Starting small-inventory");
    tracing::debug!("Resolved settings: {:?}", settings);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match config.selected_command() {
        Command::Demo => commands::run_demo(&settings, &mut out),
        Command::Add { item, quantity } => commands::run_add(&settings, &item, quantity, &mut out),
        Command::Remove { item, quantity } => {
            commands::run_remove(&settings, &item, quantity, &mut out)
        }
        Command::Get { item } => commands::run_get(&settings, &item, &mut out),
        Command::LowStock { threshold } => commands::run_low_stock(&settings, threshold, &mut out),
        Command::Report => commands::run_report(&settings, &mut out),
    };

    if let Err(e) = result {
        tracing::error!("❌ Command failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!("Program executed successfully");
    Ok(())
}
