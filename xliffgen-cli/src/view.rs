use std::path::Path;

use xliffgen::{ReadOptions, Target, TranslationValue, XliffDocument};

const PREVIEW_CHARS: usize = 50;

fn preview(value: &str, full: bool) -> String {
    if full || value.chars().count() <= PREVIEW_CHARS {
        value.to_string()
    } else {
        let truncated: String = value.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", truncated)
    }
}

/// Parses one document the way `target` would and prints its entries.
pub fn run_view_command(input: &Path, target: Option<Target>, full: bool) -> Result<(), String> {
    let options = target.map(|t| t.read_options()).unwrap_or_else(ReadOptions::new);
    let document = XliffDocument::read_from(input, options).map_err(|e| e.to_string())?;
    print_view(&document, full);
    Ok(())
}

/// Print the parsed translations of a document.
pub fn print_view(document: &XliffDocument, full: bool) {
    println!("✅ Found {} translation(s)", document.translations.len());
    if let Some(language) = &document.target_language {
        println!("Target language: {}", language);
    }

    for (i, (resname, value)) in document.translations.iter().enumerate() {
        println!("\n  Entry {}: {}", i + 1, resname);
        match value {
            TranslationValue::Simple(text) => {
                println!("    Type: Simple");
                println!("    Value: {}", preview(text, full));
            }
            TranslationValue::Plural(forms) => {
                println!("    Type: Plural");
                for (category, text) in forms.iter() {
                    println!("      {}: {}", category, preview(text, full));
                }
            }
        }
    }
}
