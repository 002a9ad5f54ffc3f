use anyhow::{Context, bail};
use cfgutil::Value;
use cfgutil::config::loader::ConfigLoader;
use cfgutil::observability::init_tracing;
use cfgutil::services::create_normalizer;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load cfgutil.yaml")?;
    ConfigLoader::validate(&config)?;

    let _guard = init_tracing(&config.app_name, &config.logging)?;

    let mut args = std::env::args().skip(1);
    let Some(file) = args.next() else {
        bail!("usage: cfgutil <file> [path]");
    };
    let path = args.next().unwrap_or_default();

    let normalizer = create_normalizer(config.normalizer.clone());
    let Some(node) = normalizer.load_from_file(&file) else {
        bail!("could not load configuration from '{}'", file);
    };
    info!(file = %file, keys = node.len(), "Configuration loaded");

    // Re-root the requested subtree so it prints as a whole document
    let subtree = normalizer.to_flat_map(Some(&node), &path);
    let section = normalizer.to_section(Value::Mapping(subtree))?;
    print!("{}", normalizer.to_text(&section));

    Ok(())
}
