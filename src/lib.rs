mod assemble;
mod error;
mod format;
mod generate;
mod listing;
mod methods;
mod parsing;
mod signature;

pub use assemble::DEFAULT_TEMPLATE;
pub use error::{FormatError, GenerateError, ParseError, RenderError, TemplateError};
pub use format::{default_formatter, Formatter, GoimportsFormatter, PassthroughFormatter};
pub use generate::{generate_interface, GenerateOptions};
pub use parsing::{get_parser, parse_dir, GoFile, GoPackage};
