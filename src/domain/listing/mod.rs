pub mod endpoint;
pub mod entity;
pub mod invariants;
pub mod request;

pub use endpoint::{EndpointSpec, PayloadShape, ResolutionPolicy};
pub use entity::{Candidate, ItemImages, ItemType, Page, PageCursor, RawItem, ResolvedItem};
pub use invariants::validate_list_request;
pub use request::{AccessMode, InterestStatus, ListKind, ListRequest, WorksSort};
