//! Brand Health Service
//!
//! Concurrent source aggregation, the per-source timeout guard and scoring.

pub mod aggregator;
pub mod guard;
pub mod scorer;

pub use aggregator::{
	AggregatorService, AggregatorServiceError, AggregatorTrait, SourceDefinition,
};
pub use guard::{guard, guard_with_outcome, GuardOutcome};
pub use scorer::Scorer;
