use super::Dressing;

/// Canonicalize, sort and deduplicate accepted dressings.
///
/// The result only depends on the multiset of inputs, never on their order,
/// so candidates checked concurrently can be collected in any order.
pub fn finalize<I>(accepted: I) -> Vec<Dressing>
where
    I: IntoIterator<Item = Dressing>,
{
    let mut dressings: Vec<Dressing> = accepted
        .into_iter()
        .filter(|d| !d.is_empty())
        .map(|d| Dressing::new(d.cloths))
        .collect();

    dressings.sort();
    dressings.dedup();
    dressings
}
