//! Text filter for the timezone picker.

/// Visibility of every item for a search query.
///
/// An item is visible when its upper-cased text contains the upper-cased
/// query; an empty query shows every item.
pub fn filter_timezones<S: AsRef<str>>(query: &str, items: &[S]) -> Vec<bool> {
    let needle = query.to_uppercase();
    items
        .iter()
        .map(|item| item.as_ref().to_uppercase().contains(&needle))
        .collect()
}

/// Items visible for a search query, in their original order.
pub fn visible_timezones<'a, S: AsRef<str>>(query: &str, items: &'a [S]) -> Vec<&'a str> {
    items
        .iter()
        .zip(filter_timezones(query, items))
        .filter_map(|(item, visible)| visible.then_some(item.as_ref()))
        .collect()
}
