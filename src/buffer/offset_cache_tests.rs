use super::*;

#[test]
fn records_only_on_stride_boundaries() {
    let mut cache = OffsetCache::new(4);
    cache.record(0, 0);
    cache.record(2, 10);
    cache.record(4, 20);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.nearest_at_or_before(3), Some((0, 0)));
    assert_eq!(cache.nearest_at_or_before(4), Some((4, 20)));
}

#[test]
fn invalidation_drops_entries_at_or_past_edit_point() {
    let mut cache = OffsetCache::new(1);
    cache.record(0, 0);
    cache.record(5, 5);
    cache.record(10, 10);
    cache.invalidate_from(5);
    assert_eq!(cache.nearest_at_or_before(10), Some((0, 0)));
}
