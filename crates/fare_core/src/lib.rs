pub mod breakdown;
pub mod pricing;
pub mod profile;
pub mod quotes;
pub mod routing;
pub mod schedule;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
