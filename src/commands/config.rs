use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::info;
use unit_price_compare::config::Config;

/// Execute the config show command
///
/// Displays the effective configuration after file and environment overrides
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this prints a summary
pub fn validate(path: &Path, cfg: &Config) -> Result<()> {
    info!(path = %path.display(), "Configuration validated");

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}", "Source".cyan(), describe_source(path));
    println!("  {}: {}", "Decimals".cyan(), cfg.display.decimals);
    println!("  {}: {}", "Unit Label".cyan(), cfg.display.unit_label);
    println!("  {}: {}", "Log Level".cyan(), cfg.logging.level);
    println!("  {}: {:?}", "Log Format".cyan(), cfg.logging.format);
    println!("  {}: {}", "Log File".cyan(), cfg.logging.file.display());

    Ok(())
}

fn describe_source(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    }
}
