use crate::date_format::{DateFormat, DateStyle};
use crate::interval::Interval;
use crate::interval_set::MultiInterval;
use std::collections::HashMap;
use std::hash::Hash;

/// Combines all intervals with the same key into one [`MultiInterval`].
///
/// Returns one entry per distinct key, in the order the keys were first seen.
pub fn group_and_simplify<K>(
    items: impl IntoIterator<Item = (K, Interval)>,
) -> Vec<(K, MultiInterval)>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<Interval>)> = Vec::new();
    for (key, interval) in items {
        let i = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[i].1.push(interval);
    }

    tracing::trace!(keys = groups.len(), "Simplifying grouped intervals");
    groups.into_iter().map(|(key, intervals)| (key, MultiInterval::from(intervals))).collect()
}

/// Like [`group_and_simplify`], with each key's intervals rendered and joined by `", "`.
pub fn format_grouped<K>(items: impl IntoIterator<Item = (K, Interval)>) -> Vec<(K, String)>
where
    K: Eq + Hash + Clone,
{
    format_grouped_with(items, &DateStyle::default())
}

pub fn format_grouped_with<K>(
    items: impl IntoIterator<Item = (K, Interval)>,
    fmt: &impl DateFormat,
) -> Vec<(K, String)>
where
    K: Eq + Hash + Clone,
{
    group_and_simplify(items)
        .into_iter()
        .map(|(key, multi)| (key, multi.format_with(fmt)))
        .collect()
}
