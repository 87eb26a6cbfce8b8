//! JSON import/export for categories.
//! A category file holds one `{name, cards}` object so vocabularies can be
//! shared between machines.

use crate::models::Category;
use std::fs::File;
use std::io::{Read, Write};

/// Exports a category to a JSON file at the specified path.
pub fn export_json_to_path(category: &Category, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json_string = serde_json::to_string_pretty(category)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a category from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(filename: &str) -> Result<Category, Box<dyn std::error::Error>> {
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let category: Category = serde_json::from_str(&contents)?;

    println!("Category '{}' imported from '{}'", category.name, filename);
    Ok(category)
}
