//! Store domain - Sorted-set and counter abstraction

mod repository;

pub use repository::KeyValueStore;

#[cfg(test)]
pub use repository::mock::MockStore;
