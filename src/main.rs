use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;

use formforge::catalog::Catalog;
use formforge::compose::compose;
use formforge::model::PanelConfig;
use formforge::registry::Registry;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compose the form-builder control panel from a panel configuration", long_about = None)]
struct Cli {
    /// Panel configuration JSON file; omit to compose the built-in defaults
    #[arg(value_name = "CONFIG_FILE")]
    config_file: Option<String>,

    /// Builder instance id used to scope control-group element ids
    #[arg(long, default_value = "fb-1")]
    panel_id: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config_file {
        Some(file) => {
            let path = Utf8PathBuf::from(&file);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path))?;
            serde_json::from_str::<PanelConfig>(&text)
                .with_context(|| format!("Failed to parse panel configuration {}", path))?
        }
        None => PanelConfig::default(),
    };

    let catalog = Catalog::build(config)?;
    let mut registry = Registry::new();
    let composed = compose(&catalog, &cli.panel_id, &mut registry);

    let json = serde_json::to_string_pretty(&composed)?;
    println!("{}", json);
    Ok(())
}
