//! Frontend-facing glue shared by the collection frontends: settings and the
//! filtered collection view.

pub mod settings;
pub mod view;

pub use view::{CollectionView, ViewError};
