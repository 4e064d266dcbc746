//! Audit trail for dispatched hook events
//!
//! Every dispatched payload can be recorded to one or more sinks for
//! after-the-fact inspection of what the agent did and what was decided.

pub mod emitter;

pub use emitter::{AuditEmitter, AuditRecord};
