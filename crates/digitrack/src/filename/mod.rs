//! Parsing of structured scan filenames of the form
//! `Title-Author-Year[-Stage]`, where underscores stand in for spaces.

pub mod classifier;
pub mod script;
pub mod tokenizer;

pub use classifier::{classify, ParsedFileName, UNKNOWN_SENTINEL};
pub use script::{is_secondary_script, parse_and_translate, BilingualFields};
pub use tokenizer::{strip_extension, tokenize};
