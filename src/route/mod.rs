//! Route resolution and identifier naming

mod camel;
mod naming;
mod resolver;

pub use camel::camel_case;
pub use naming::{derive_identifier, strip_route_prefix};
pub use resolver::{ResolvedRoute, RouteResolver};

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix marking a dynamic segment in a route template (`:id`)
pub const DYNAMIC_MARKER: char = ':';

/// Characters a single dynamic segment value (or marker name) may contain
pub const SEGMENT_CHARS: &str = r"[0-9A-Za-z_.\-]+";

/// Name used for numeric segments when no template matches
pub const INFERRED_ID_NAME: &str = "id";

/// Word delimiters fed to [`camel_case`] when naming routes
pub const WORD_DELIMITERS: &[char] = &['-', '_'];

/// A dynamic marker with its name captured (`:container-name` -> `container-name`)
pub(crate) static DYNAMIC_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{DYNAMIC_MARKER}({SEGMENT_CHARS})")).expect("dynamic segment regex")
});

/// A run of literal word characters
pub(crate) static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(SEGMENT_CHARS).expect("word regex"));
