//! Knowledge base: submission offices and certificate metadata.
//!
//! | Piece            | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | `CertificateKind`| closed set of certificate types, display names, triggers  |
//! | `Office`         | building, floor, room, hours, contact, handled kinds      |
//! | `CertificateMeta`| deadlines, requirements, processing times, fees           |
//! | `Helpdesk`       | general support contact                                   |
//!
//! The knowledge base is immutable once built and is injected into the resolver.

mod bootstrap;
mod catalog;
mod office;
mod store;

pub use catalog::CertificateKind;
pub use office::{Coordinates, Office};
pub use store::{CertificateMeta, Helpdesk, KnowledgeBase, MetaField};
