use std::fs;
use std::path::Path;

use fp_story::Story;

pub fn run(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| format!("cannot create directory: {e}"))?;
    }
    fs::write(path, Story::sample_json())
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created story '{}'", path.display());
    println!();
    println!("Get started:");
    println!("  # Edit the pages, choices and narration clips");
    println!("  fablepath check {}     # Look for problems", path.display());
    println!("  fablepath outline {}   # See where each page leads", path.display());
    println!("  fablepath play {}      # Read it in the terminal", path.display());

    Ok(())
}
