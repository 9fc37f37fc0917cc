//! Core types shared by the query builder, the patch composer and the gateway.

mod novel;
mod outcome;
mod pagination;

pub use novel::{
    CollectionKey, Document, NovelField, NovelFields, PUBLIC_DATE_FORMAT, parse_public_date,
};
pub use outcome::{Outcome, WriteResult};
pub use pagination::{DEFAULT_PAGE_SIZE, PageRequest};
