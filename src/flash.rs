//! Flash-shaped storage for carrying a failed submission's data and errors
//! back to the next render of the same form.
//!
//! The engine defines only the read/write shape; how entries persist between
//! requests belongs to the host (session, cookie, ...). [`MemoryFlash`] is an
//! in-process implementation for tests and single-process apps.

use crate::data::{ErrorMap, FormData};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a failed submission leaves behind, keyed by form identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashEntry {
	pub data: FormData,
	pub errors: ErrorMap,
}

impl FlashEntry {
	pub fn new(data: FormData, errors: ErrorMap) -> Self {
		Self { data, errors }
	}
}

/// One-shot store keyed by form identity. `take` consumes the entry so a
/// reload after the redirect renders clean.
pub trait FlashStore {
	fn put(&mut self, form_id: &str, entry: FlashEntry);

	fn take(&mut self, form_id: &str) -> Option<FlashEntry>;
}

/// HashMap-backed flash store.
#[derive(Debug, Clone, Default)]
pub struct MemoryFlash {
	entries: HashMap<String, FlashEntry>,
}

impl MemoryFlash {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FlashStore for MemoryFlash {
	fn put(&mut self, form_id: &str, entry: FlashEntry) {
		self.entries.insert(form_id.to_string(), entry);
	}

	fn take(&mut self, form_id: &str) -> Option<FlashEntry> {
		self.entries.remove(form_id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_take_consumes_entry() {
		let mut flash = MemoryFlash::new();
		let entry = FlashEntry::new(
			FormData::from_pairs([("name", json!(""))]),
			ErrorMap::from([("name".to_string(), vec!["name cannot be blank!".to_string()])]),
		);
		flash.put("user-form", entry.clone());

		assert_eq!(flash.take("user-form"), Some(entry));
		assert_eq!(flash.take("user-form"), None);
	}

	#[test]
	fn test_entries_are_keyed_by_form_identity() {
		let mut flash = MemoryFlash::new();
		flash.put("a", FlashEntry::default());
		assert!(flash.take("b").is_none());
		assert!(flash.take("a").is_some());
	}

	#[test]
	fn test_entry_round_trips_through_serde() {
		let entry = FlashEntry::new(
			FormData::from_pairs([(":age", json!("10"))]),
			ErrorMap::new(),
		);
		let json = serde_json::to_string(&entry).unwrap();
		let back: FlashEntry = serde_json::from_str(&json).unwrap();
		assert_eq!(back.data.get("age"), Some(&json!("10")));
	}
}
