pub mod actor;
pub mod chunk;
pub mod order;
pub mod record;
pub mod tier;
pub mod time_serde;

pub use actor::{Actor, Role, UnitId};
pub use chunk::{ChunkedQuery, PlanError, chunk_width, plan_queries};
pub use order::OrderPolicy;
pub use record::{Record, RecordKey};
pub use tier::{CapabilityTier, ScopeKind, ScopeSpec, UnitScope, resolve_scopes};
