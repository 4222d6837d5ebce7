mod comments;
mod header;
mod locator;
mod params;
mod source;

pub use comments::{mask_literals, strip_comments};
pub use header::{
    extract_imports, extract_package, parse_type_variables, ImportTable, TypeVariable, UNKNOWN_CLASS,
};
pub use locator::{is_keyword, is_primitive, DeclarationLocator, RawHeader, JAVA_KEYWORDS, PRIMITIVE_TYPES};
pub use params::{parse_parameters, ParameterError, RawParameter};
pub use source::{LineIndex, SourceUnit};

pub(crate) use locator::collapse_whitespace;
