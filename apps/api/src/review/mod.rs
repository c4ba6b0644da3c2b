// Resume review: completeness scoring over the editor's sections.

pub mod completeness;
pub mod handlers;
