//! Core adapter trait for source implementations

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Adapter, AdapterResult, SourceRuntimeConfig};
use crate::sources::{SourceKind, SourcePayload};
use crate::term::QueryTerm;

/// Interface every data source adapter implements
///
/// Adapters are immutable after construction and may be called from many
/// requests at once. Credentials and endpoints arrive through the runtime
/// configuration; adapters never read the process environment.
#[async_trait]
pub trait SourceAdapter: Send + Sync + Debug {
	/// Get adapter configuration information
	fn adapter_info(&self) -> &Adapter;

	/// Source this adapter serves
	fn kind(&self) -> SourceKind;

	/// Fetch and normalize the source's data for a term
	///
	/// Adapters that own a degraded shape (an empty series, a zero-valued
	/// score) return it as `Ok`; other failures are returned as `Err` and
	/// mark the source unavailable.
	async fn fetch(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
	) -> AdapterResult<SourcePayload>;

	/// Get adapter ID
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Get human-readable name for this adapter
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Get adapter version
	fn version(&self) -> &str {
		&self.adapter_info().version
	}
}
