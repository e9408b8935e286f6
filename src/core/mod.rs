// Public modules
pub mod case;
pub mod defaults;
pub mod error;
pub mod grouping;
pub mod lexicon;
pub mod materialize;
pub mod placeholder;
pub mod prompt;
pub mod replacement;
pub mod resolver;
pub mod scaffold;
pub mod template;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use case::{Variant, VariantSet};
pub use error::{Error, ErrorCode, Result};
pub use materialize::MaterializeReport;
pub use replacement::ReplacementMap;
pub use resolver::TemplateResolver;
pub use scaffold::{Prompter, ScaffoldReport, ScaffoldRequest};
