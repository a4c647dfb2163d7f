//! Doctor directory core.
//!
//! # Data Flow
//! ```text
//! remote JSON array
//!     → source.rs (single GET, failure → empty list)
//!     → normalize.rs (raw record → Doctor, per-field defaults)
//!     → session.rs (Loading → Ready, owns FilterState)
//!
//! On every filter change:
//!     FilterState (replaced wholesale)
//!     → filter.rs (search → consultation → speciality → stable sort)
//!     → suggest.rs (≤ 3 matching names)
//!     → query.rs (canonical query string for the URL)
//! ```
//!
//! # Design Decisions
//! - Engine, codec and suggestions are pure functions over immutable values
//! - No stage rejects input; malformed data degrades to defaults
//! - Doctors are never mutated after normalization

pub mod catalog;
pub mod doctor;
pub mod filter;
pub mod normalize;
pub mod query;
pub mod session;
pub mod source;
pub mod suggest;

pub use doctor::{ConsultationType, Doctor};
pub use filter::{apply, ConsultationFilter, FilterState, FilterUpdate, SortKey, SortOrder};
pub use normalize::{normalize, FallbackLog};
pub use query::{decode, decode_query, encode, encode_query};
pub use session::{DirectoryState, LoadOutcome, Session};
pub use source::{DoctorSource, HttpDoctorSource, SourceError, SourceResult};
pub use suggest::{suggestions, SUGGESTION_LIMIT};
