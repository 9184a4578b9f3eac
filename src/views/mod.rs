// Gateway module for views - pure content-to-markup functions
// Callers go through these re-exports, never the private submodules

mod markup;
mod pages;

pub use markup::{code_block, escape_inline, escape_link};
pub use pages::{
    contact_zone, home, profile, profile_fields, projects, skills, ContactZone, SKILLS,
};
