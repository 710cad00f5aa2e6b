//! Conversion between the multi-line ingredient text a user types and the
//! ordered list persisted in the `ingredients` column.

/// Split `text` on line breaks, trim every line and drop the empty ones.
///
/// Order is preserved. A trailing `\r` from Windows line endings is removed by
/// the trim.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a stored ingredient list back into editable text, one per line.
pub fn join_ingredients(ingredients: &[String]) -> String {
    ingredients.join("\n")
}
