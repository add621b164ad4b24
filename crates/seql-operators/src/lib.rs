#![forbid(unsafe_code)]
//! seql-operators: pull-based (Volcano/iterator model) operators.
//!
//! Design intent:
//! - Every operator implements `Node`: `open` once, then `next` until `Ok(None)`.
//! - Streaming operators (scan, selects, project, union, zip, inspect) hold at
//!   most one in-flight row. Blocking operators (cross, intersect, order,
//!   hash join) materialize one input at `open`; distinct grows its seen set
//!   as it pulls.
//! - Plans are trees: a node exclusively owns its children as `BoxedNode`.
//! - Execution is synchronous; a pull on the root recursively pulls children.

pub mod explain;
pub mod traits;

pub mod filter;
pub mod inspect;
pub mod project;
pub mod scan;
pub mod union;
pub mod zip;

pub mod cross;
pub mod distinct;
pub mod intersect;
pub mod join;
pub mod sort;

pub use explain::explain;
pub use traits::{drain, BoxedNode, Lifecycle, Node, OpError, Phase};

pub use cross::Cross;
pub use distinct::Distinct;
pub use filter::{ConstantSelect, EqualsSelect};
pub use inspect::{Inspect, RowSink};
pub use intersect::Intersect;
pub use join::HashJoin;
pub use project::Project;
pub use scan::Scan;
pub use sort::Order;
pub use union::Union;
pub use zip::Zip;
