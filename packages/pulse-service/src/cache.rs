use std::sync::Mutex;

use time::{Duration, OffsetDateTime};

/// A single-slot TTL cache for a computed aggregate.
///
/// Owned by the service instance rather than living in process globals, so
/// tests get isolated slots and multi-instance deployments do not share
/// state through a module. Concurrent writers race benignly: the value is
/// idempotent within the window, so last-write-wins is fine.
pub struct TtlCache<T> {
	ttl: Duration,
	slot: Mutex<Option<CacheEntry<T>>>,
}

struct CacheEntry<T> {
	value: T,
	stored_at: OffsetDateTime,
}

impl<T> TtlCache<T>
where
	T: Clone,
{
	pub fn new(ttl: Duration) -> Self {
		Self { ttl, slot: Mutex::new(None) }
	}

	/// Returns the stored value and its timestamp regardless of freshness;
	/// callers that care about staleness check [`Self::is_valid`] first.
	pub fn get(&self) -> Option<(T, OffsetDateTime)> {
		self.lock().as_ref().map(|entry| (entry.value.clone(), entry.stored_at))
	}

	pub fn set(&self, value: T) {
		*self.lock() = Some(CacheEntry { value, stored_at: OffsetDateTime::now_utc() });
	}

	pub fn clear(&self) {
		*self.lock() = None;
	}

	pub fn is_valid(&self) -> bool {
		self.lock()
			.as_ref()
			.map(|entry| OffsetDateTime::now_utc() - entry.stored_at < self.ttl)
			.unwrap_or(false)
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Option<CacheEntry<T>>> {
		self.slot.lock().unwrap_or_else(|err| err.into_inner())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_empty_and_invalid() {
		let cache: TtlCache<u64> = TtlCache::new(Duration::seconds(60));

		assert!(cache.get().is_none());
		assert!(!cache.is_valid());
	}

	#[test]
	fn set_then_get_round_trips_within_ttl() {
		let cache = TtlCache::new(Duration::seconds(60));

		cache.set(7_u64);

		assert!(cache.is_valid());

		let (value, stored_at) = cache.get().expect("slot must be filled");
		assert_eq!(value, 7);
		assert!(OffsetDateTime::now_utc() - stored_at < Duration::seconds(60));
	}

	#[test]
	fn zero_ttl_entries_are_never_valid_but_still_readable() {
		let cache = TtlCache::new(Duration::ZERO);

		cache.set(7_u64);

		assert!(!cache.is_valid());
		// Stale values remain retrievable for the fetch-failure fallback.
		assert!(cache.get().is_some());
	}

	#[test]
	fn clear_empties_the_slot() {
		let cache = TtlCache::new(Duration::seconds(60));

		cache.set(7_u64);
		cache.clear();

		assert!(cache.get().is_none());
		assert!(!cache.is_valid());
	}

	#[test]
	fn last_write_wins() {
		let cache = TtlCache::new(Duration::seconds(60));

		cache.set(1_u64);
		cache.set(2_u64);

		assert_eq!(cache.get().expect("slot must be filled").0, 2);
	}
}
