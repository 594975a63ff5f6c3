use serde::Serialize;

use crate::error::CatalogError;

use super::tokenizer::{strip_extension, tokenize};

/// Arabic block, which carries the Sindhi alphabet.
const SECONDARY_SCRIPT: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

/// Returns true when `text` contains at least one character of the
/// secondary (Sindhi) script.
pub fn is_secondary_script(text: &str) -> bool {
    text.chars().any(|c| SECONDARY_SCRIPT.contains(&c))
}

/// Title and author routed into parallel English/Sindhi slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BilingualFields {
    pub title_english: String,
    pub title_sindhi: String,
    pub author_english: String,
    pub author_sindhi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Splits a file name and buckets its title and author by script.
///
/// Nothing is translated: each fragment lands in exactly one of its two
/// slots and the other stays empty.
pub fn parse_and_translate(file_name: &str) -> Result<BilingualFields, CatalogError> {
    if file_name.trim().is_empty() {
        return Err(CatalogError::Validation("File name is required".to_string()));
    }

    let tokens = tokenize(file_name);
    let token = |idx: usize| tokens.get(idx).map(String::as_str).filter(|t| !t.is_empty());

    let title = token(0)
        .map(str::to_string)
        .unwrap_or_else(|| strip_extension(file_name).to_string());
    let author = token(1).unwrap_or_default();

    let mut fields = BilingualFields {
        year: token(2).map(str::to_string),
        ..Default::default()
    };

    if is_secondary_script(&title) {
        fields.title_sindhi = title;
    } else {
        fields.title_english = title;
    }

    if !author.is_empty() {
        if is_secondary_script(author) {
            fields.author_sindhi = author.to_string();
        } else {
            fields.author_english = author.to_string();
        }
    }

    Ok(fields)
}
