//! Subset-sum search fixtures.

use rewind_search::SearchContext;

/// Returns a search body picking, for each item in order, whether to keep
/// it, and accepting the picks whose sum is `target`.
///
/// Items are kept before they are skipped, so the first subset found is the
/// one that keeps the most leading items.
pub fn subset_sum_body(
    items: Vec<i64>,
    target: i64,
) -> impl Fn(&mut SearchContext<Vec<i64>>) -> Vec<i64> + Send + Sync + 'static {
    move |ctx| {
        let mut picked = Vec::new();
        let mut total = 0;
        for &item in &items {
            if ctx.choose_bool() {
                picked.push(item);
                total += item;
            }
        }
        ctx.require(total == target);
        picked
    }
}

/// Counts the subsets of `items` summing to `target` by brute force.
pub fn count_subsets(items: &[i64], target: i64) -> usize {
    (0u64..1 << items.len())
        .filter(|mask| {
            let sum: i64 = items
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, item)| item)
                .sum();
            sum == target
        })
        .count()
}
