// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod actions;
pub mod datasets;
pub mod dynamic;
pub mod filter;
pub mod ids;
pub mod model;
pub mod paging;
pub mod record;
pub mod selection;
pub mod sort;
pub mod state;
pub mod view;

pub use actions::*;
pub use filter::Facet;
pub use ids::*;
pub use model::*;
pub use record::*;
pub use selection::*;
pub use state::*;
pub use view::{DerivedView, HeaderCell, RenderedRow};
