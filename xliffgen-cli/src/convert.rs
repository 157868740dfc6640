use std::path::Path;

use xliffgen::{ConversionSummary, Target, convert};

use crate::config::CliConfig;

/// Runs one conversion and prints the status lines.
pub fn run_convert_command(
    target: Target,
    input_dir: &Path,
    output_dir: &Path,
    constants_path: &Path,
    config_path: Option<&Path>,
) -> Result<ConversionSummary, String> {
    if !input_dir.is_dir() {
        return Err(format!(
            "Raw translations directory does not exist: {}",
            input_dir.display()
        ));
    }

    let config = CliConfig::load(config_path)?;
    let options = config.convert_options();

    let summary = convert(target, input_dir, output_dir, constants_path, &options)
        .map_err(|e| e.to_string())?;

    println!(
        "✅ Static strings written to {}",
        summary.constants_path.display()
    );
    println!(
        "✅ Converted {} locale(s) for {} into {} file(s)",
        summary.locales.len(),
        target,
        summary.files.len()
    );
    Ok(summary)
}
