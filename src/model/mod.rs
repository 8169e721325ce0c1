//! Sandbox org records, managed by the actors in [`crate::opportunity_actor`], [`crate::quote_actor`],
//! [`crate::line_group_actor`] and [`crate::quote_line_actor`].

pub mod ids;
pub mod line_group;
pub mod opportunity;
pub mod quote;
pub mod quote_line;

pub use ids::*;
pub use line_group::*;
pub use opportunity::*;
pub use quote::*;
pub use quote_line::*;
