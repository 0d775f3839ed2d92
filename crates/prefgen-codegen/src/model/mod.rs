//! Resolved, immutable description of the code to generate
//!
//! Built bottom-up in a single pass: [`root::build`] validates the declaration
//! and drives [`group::build`] for every group, which drives
//! [`preference::build`] for every preference. Failures are reported into the
//! shared [`Diagnostics`] sink; the failing element is dropped and its siblings
//! are still validated.

pub mod group;
pub mod preference;
pub mod root;

pub use group::GroupModel;
pub use preference::{Accessors, PreferenceModel};
pub use root::RootModel;

use crate::diagnostics::Diagnostics;
use crate::universe::TypeUniverse;

/// State shared by the builders of one pass.
pub struct BuildContext<'a> {
    pub universe: &'a TypeUniverse,
    pub diagnostics: &'a mut Diagnostics,
    pub fluent: bool,
    pub editor: bool,
}
