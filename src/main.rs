use fontcast::{EngineSettings, SettingsError};
use std::env;
use std::process::ExitCode;

/// Checks that every font a settings file refers to can be loaded.
fn main() -> Result<ExitCode, SettingsError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Checks that the fonts named in a fontcast settings file load.");
        eprintln!();
        eprintln!("Usage: {} <path/to/settings.json>", args[0]);
        return Ok(ExitCode::FAILURE);
    }

    let settings = EngineSettings::from_path(&args[1])?;
    let fonts = settings.referenced_fonts();
    println!("Asset root: {}", settings.resolved_asset_root().display());

    let engine = settings.build_engine();
    if fonts.is_empty() {
        println!("No fonts configured.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut failed = 0;
    for source in &fonts {
        match engine.cache().get_or_load(source) {
            Ok(font) => println!(
                "ok    {} ({})",
                source,
                font.family().unwrap_or("unknown family")
            ),
            Err(e) => {
                failed += 1;
                println!("FAIL  {}: {}", source, e);
            }
        }
    }

    println!("{} of {} fonts loaded", fonts.len() - failed, fonts.len());
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
