//! tests/common/harness.rs
use bedflow::{Bed, BedManager, MemoryBedStore};
use std::sync::{Arc, Once};

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "bedflow=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// A manager over a fresh in-memory store, with one bed per number.
pub struct Ward {
    pub manager: BedManager<MemoryBedStore>,
    pub beds: Vec<Bed>,
}

impl Ward {
    pub async fn new(numbers: &[&str]) -> Self {
        init_tracing();
        let manager = BedManager::new(Arc::new(MemoryBedStore::new()));
        let mut beds = Vec::with_capacity(numbers.len());
        for number in numbers {
            beds.push(manager.provision(number).await.unwrap());
        }
        Self { manager, beds }
    }

    /// A ward of `count` beds named `prefix-000`, `prefix-001`, ...
    pub async fn numbered(prefix: &str, count: usize) -> Self {
        let numbers: Vec<String> = (0..count).map(|i| format!("{prefix}-{i:03}")).collect();
        let refs: Vec<&str> = numbers.iter().map(String::as_str).collect();
        Self::new(&refs).await
    }
}

/// Panics if any bed violates the occupancy invariant.
pub fn assert_consistent(beds: &[Bed]) {
    for bed in beds {
        assert!(
            bed.is_consistent(),
            "bed {} is inconsistent: {:?}",
            bed.bed_number(),
            bed
        );
    }
}
