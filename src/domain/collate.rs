//! Name Collation
//!
//! Sort keys for user-entered names. Place names and tags are typed or
//! extracted in whatever script the place uses, so a trip board can hold
//! "北京烤鸭" next to "Brooklyn Bridge". Sorting Chinese characters by their
//! pinyin files such entries among their Latin neighbours ("beijing..."
//! before "brooklyn...") instead of after every Latin name, which is where
//! plain code-point order would put them.

use pinyin::ToPinyin;

use super::location::Location;

/// Lowercased sort key with Han characters spelled out in pinyin
pub fn collate_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for c in text.chars() {
        match c.to_pinyin() {
            Some(p) => key.push_str(p.plain()),
            None => key.extend(c.to_lowercase()),
        }
    }
    key
}

/// Sort by collation key, ties broken by the raw text
pub fn sort_names(names: &mut [String]) {
    names.sort_by_cached_key(|name| (collate_key(name), name.clone()));
}

/// Every tag used by any of the locations, once, in collation order
pub fn distinct_tags<'a, I>(locations: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut tags: Vec<String> = Vec::new();
    for loc in locations {
        for tag in &loc.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    sort_names(&mut tags);
    tags
}
