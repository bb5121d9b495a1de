/// Reduces a facility name to its comparison key: lowercase ASCII letters and
/// digits only.
///
/// Feeds spell the same plant differently ("Ashbridges Bay",
/// "ashbridges_BAY!!", "AshbridgesBay"), so names are only ever compared
/// through this key. Applying it twice yields the same key.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
