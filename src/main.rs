use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Parser;

use maskfield::cli::CliArgs;
use maskfield::config::{MaskConfig, MaskPresets};
use maskfield::engine;
use maskfield::slot;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let _guard = maskfield::tracing::init();

    let presets = match &args.presets {
        Some(path) => MaskPresets::load(path)?,
        None => MaskPresets::load_or_builtin(),
    };

    if args.list_presets {
        for (name, config) in &presets.masks {
            println!("{:<16} {:?} (placeholder {:?})", name, config.pattern, config.placeholder);
        }
        return Ok(());
    }

    let config = resolve_mask(&args, &presets)?;
    let input = read_input(&args)?;

    let slots = slot::compile(&config.pattern);
    let result = engine::reconcile(&input, &slots, config.placeholder);

    let output = if args.unmasked {
        result.buffer.unmasked_text()
    } else if args.no_placeholders {
        result.buffer.text_without_placeholders()
    } else {
        result.buffer.raw_text()
    };
    println!("{}", output);

    Ok(())
}

fn resolve_mask(args: &CliArgs, presets: &MaskPresets) -> Result<MaskConfig> {
    if let Some(pattern) = &args.mask {
        return Ok(MaskConfig::new(pattern, args.placeholder));
    }
    if let Some(name) = &args.preset {
        return presets
            .get(name)
            .cloned()
            .with_context(|| format!("unknown preset {:?} (try --list-presets)", name));
    }
    bail!("either --mask or --preset is required");
}

fn read_input(args: &CliArgs) -> Result<String> {
    match &args.input {
        Some(text) => Ok(text.clone()),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            Ok(buf.trim_end_matches('\n').to_string())
        }
    }
}
