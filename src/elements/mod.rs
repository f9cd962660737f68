//! Value types flowing through table extraction.
//!
//! Inputs ([`TextElement`], [`Ruling`], [`Page`]) come from the external page
//! decoder; intermediates ([`TextRun`], [`TextLine`]) are built fresh per
//! extraction; [`Table`] is the output handed to callers and writers. All of
//! them are page-scoped values with no back-references to their container.

mod page;
mod ruling;
mod table;
mod text;

pub use page::Page;
pub use ruling::{Orientation, Ruling};
pub use table::{ExtractionMethod, Table, TableCell};
pub use text::{TextElement, TextLine, TextRun};
