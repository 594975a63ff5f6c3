use serde::Serialize;

use crate::catalog::Stage;

use super::tokenizer::{strip_extension, tokenize, FIELD_DELIMITER};

/// Marker stored in author and year fields whose value could not be
/// determined. Compared by exact equality elsewhere, so the literal must not
/// change.
pub const UNKNOWN_SENTINEL: &str = "اڻڄاتل";

/// Fields recovered from a structured file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFileName {
    pub book_name: String,
    pub author_name: String,
    pub year: String,
    /// Stage label taken from the fourth token, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

impl ParsedFileName {
    pub fn author_known(&self) -> bool {
        self.author_name != UNKNOWN_SENTINEL
    }

    pub fn year_known(&self) -> bool {
        self.year != UNKNOWN_SENTINEL
    }

    /// Rebuilds a `Book-Author-Year` file name, with spaces written back
    /// as underscores.
    pub fn to_file_name(&self) -> String {
        [&self.book_name, &self.author_name, &self.year]
            .iter()
            .map(|field| field.replace(' ', "_"))
            .collect::<Vec<_>>()
            .join(&FIELD_DELIMITER.to_string())
    }
}

/// Classifies the tokens of a file name into book, author, year and stage.
///
/// Positional rules:
/// - token 0 is the book name, falling back to the cleaned input when empty;
/// - token 1 is the year when it is all digits (author stays unknown),
///   otherwise the author;
/// - token 2 overwrites the year when it is all digits;
/// - token 3, when non-empty, names the pipeline stage.
pub fn classify(raw: &str) -> ParsedFileName {
    let tokens = tokenize(raw);
    let token = |idx: usize| tokens.get(idx).map(String::as_str).filter(|t| !t.is_empty());

    let book_name = match token(0) {
        Some(book) => book.to_string(),
        None => strip_extension(raw).trim().to_string(),
    };

    let mut author_name = UNKNOWN_SENTINEL.to_string();
    let mut year = UNKNOWN_SENTINEL.to_string();

    if let Some(second) = token(1) {
        if is_all_digits(second) {
            year = second.to_string();
        } else {
            author_name = second.to_string();
        }
    }

    if let Some(third) = token(2) {
        if is_all_digits(third) {
            year = third.to_string();
        }
    }

    let stage = token(3).and_then(Stage::from_label);

    ParsedFileName {
        book_name,
        author_name,
        year,
        stage,
    }
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClassifyCase {
        name: &'static str,
        input: &'static str,
        book: &'static str,
        author: &'static str,
        year: &'static str,
    }

    const CASES: &[ClassifyCase] = &[
        ClassifyCase {
            name: "book_author_year",
            input: "A-B-1999",
            book: "A",
            author: "B",
            year: "1999",
        },
        ClassifyCase {
            name: "numeric_second_token_is_year",
            input: "A-1999",
            book: "A",
            author: UNKNOWN_SENTINEL,
            year: "1999",
        },
        ClassifyCase {
            name: "no_delimiter",
            input: "SingleTitle",
            book: "SingleTitle",
            author: UNKNOWN_SENTINEL,
            year: UNKNOWN_SENTINEL,
        },
        ClassifyCase {
            name: "noise_after_year_does_not_overwrite",
            input: "A-1999-noise",
            book: "A",
            author: UNKNOWN_SENTINEL,
            year: "1999",
        },
        ClassifyCase {
            name: "non_numeric_third_token_ignored",
            input: "Book-Author-draft",
            book: "Book",
            author: "Author",
            year: UNKNOWN_SENTINEL,
        },
        ClassifyCase {
            name: "third_token_overwrites_numeric_second",
            input: "Book-1990-2001",
            book: "Book",
            author: UNKNOWN_SENTINEL,
            year: "2001",
        },
        ClassifyCase {
            name: "underscores_become_spaces",
            input: "Shah_Jo_Risalo-Shah_Abdul_Latif-1866.pdf",
            book: "Shah Jo Risalo",
            author: "Shah Abdul Latif",
            year: "1866",
        },
        ClassifyCase {
            name: "empty_book_token_falls_back_to_input",
            input: "-Author-2000",
            book: "-Author-2000",
            author: "Author",
            year: "2000",
        },
        ClassifyCase {
            name: "empty_author_token_stays_unknown",
            input: "Book--2000",
            book: "Book",
            author: UNKNOWN_SENTINEL,
            year: "2000",
        },
        ClassifyCase {
            name: "secondary_script_fields",
            input: "شاهه_جو_رسالو-شاهه_لطيف-1866",
            book: "شاهه جو رسالو",
            author: "شاهه لطيف",
            year: "1866",
        },
    ];

    #[test]
    fn test_classify_table() {
        for case in CASES {
            let parsed = classify(case.input);
            assert_eq!(parsed.book_name, case.book, "case '{}': book", case.name);
            assert_eq!(parsed.author_name, case.author, "case '{}': author", case.name);
            assert_eq!(parsed.year, case.year, "case '{}': year", case.name);
        }
    }

    #[test]
    fn test_fourth_token_sets_stage() {
        let parsed = classify("Kitab_Jo_Naam-Lekhak_Jo_Naam-2005-Scanning");
        assert_eq!(parsed.book_name, "Kitab Jo Naam");
        assert_eq!(parsed.author_name, "Lekhak Jo Naam");
        assert_eq!(parsed.year, "2005");
        assert_eq!(parsed.stage, Some(Stage::Scanning));
    }

    #[test]
    fn test_stage_never_read_from_earlier_tokens() {
        assert_eq!(classify("Scanning-Completed-2001").stage, None);
        assert_eq!(classify("Book-Author-2001").stage, None);
    }

    #[test]
    fn test_empty_fourth_token_leaves_stage_unset() {
        assert_eq!(classify("Book-Author-2001-").stage, None);
    }

    #[test]
    fn test_tokens_beyond_fourth_are_ignored() {
        let parsed = classify("Book-Author-2001-org-extra-1999");
        assert_eq!(parsed.year, "2001");
        assert_eq!(parsed.stage, Some(Stage::Custom("org".to_string())));
    }

    #[test]
    fn test_reconstructed_name_classifies_identically() {
        for input in [
            "Kitab_Jo_Naam-Lekhak-2005",
            "A-1999",
            "SingleTitle",
            "Book-Author-draft",
            "شاهه_جو_رسالو-شاهه_لطيف-1866",
        ] {
            let first = classify(input);
            let second = classify(&first.to_file_name());
            assert_eq!(first.book_name, second.book_name, "input '{}'", input);
            assert_eq!(first.author_name, second.author_name, "input '{}'", input);
            assert_eq!(first.year, second.year, "input '{}'", input);
        }
    }

    #[test]
    fn test_known_flags() {
        let parsed = classify("A-1999");
        assert!(!parsed.author_known());
        assert!(parsed.year_known());
    }
}
