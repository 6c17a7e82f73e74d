use convert_case::{Boundary, Case, Casing};

fn is_upper(grapheme: &str) -> bool {
    grapheme.chars().next().is_some_and(char::is_uppercase)
}

fn upper_upper(graphemes: &[&str]) -> bool {
    graphemes.len() > 1 && is_upper(graphemes[0]) && is_upper(graphemes[1])
}

/// Split before every uppercase letter that follows a letter or digit
const UPPER_UPPER: Boundary = Boundary::Custom {
    condition: upper_upper,
    start: 1,
    len: 0,
};

const SNAKE_BOUNDARIES: [Boundary; 3] = [Boundary::LowerUpper, Boundary::DigitUpper, UPPER_UPPER];

/// Convert snake_case to camelCase
pub fn to_camel_case(s: &str) -> String {
    s.to_case(Case::Camel)
}

/// Convert PascalCase to snake_case, digits stay attached to the preceding word
pub fn pascal_to_snake(s: &str) -> String {
    s.set_boundaries(&SNAKE_BOUNDARIES).to_case(Case::Snake)
}

/// Convert snake_case to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Lowercase the first character and keep the rest as is
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prose of a documented entity split for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doc {
    /// Single line summary
    pub summary: Option<String>,
    /// Long form text following the summary
    pub description: Option<String>,
}

impl Doc {
    /// Build from the schema's `summary` and `description` attributes.
    ///
    /// Without an explicit summary, the first paragraph of the description
    /// becomes the summary and the remainder the description.
    pub fn of(summary: Option<&str>, description: Option<&str>) -> Self {
        let summary = summary
            .map(|s| normalize_indent(s).join(" "))
            .filter(|s| !s.is_empty());
        match summary {
            Some(summary) => Doc {
                summary: Some(summary),
                description: description
                    .map(|d| normalize_indent(d).join("\n"))
                    .filter(|d| !d.is_empty()),
            },
            None => description.map(split_doc).unwrap_or_default(),
        }
    }
}

/// Split a free-form doc block at its first blank line
pub fn split_doc(text: &str) -> Doc {
    let lines = normalize_indent(text);
    let split = lines
        .iter()
        .position(|line| line.is_empty())
        .unwrap_or(lines.len());

    let summary = lines[..split].join(" ");
    let rest = trim_blank_lines(&lines[split..]).join("\n");

    Doc {
        summary: Some(summary).filter(|s| !s.is_empty()),
        description: Some(rest).filter(|s| !s.is_empty()),
    }
}

/// Strip the minimum common indentation and surrounding blank lines
pub fn normalize_indent(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let stripped: Vec<String> = lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or("").to_string())
        .collect();

    trim_blank_lines(&stripped).to_vec()
}

fn trim_blank_lines(lines: &[String]) -> &[String] {
    let start = lines
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map(|i| i + 1)
        .unwrap_or(start);
    &lines[start..end]
}
