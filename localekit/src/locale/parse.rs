//! Total, validation-free decomposition of locale tags.
//!
//! Decomposition never fails: any string, including malformed ones, splits
//! into the five logical segments deterministically. Unrecognised segments
//! (variants, over-long subtags) are ignored rather than rejected so that
//! callers can wrap arbitrary user input cheaply and defer judgement to the
//! containment and ordering operations.

/// Separator between subtags.
pub(super) const SEPARATOR: char = '-';

/// Parsed segments of one textual tag.
#[derive(Debug)]
pub(super) struct LocaleParts {
    pub(super) language: String,
    pub(super) script: String,
    pub(super) region: String,
    pub(super) extensions: Vec<(String, String)>,
    pub(super) private_use: String,
}

fn is_script(segment: &str) -> bool {
    segment.len() == 4 && segment.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_region(segment: &str) -> bool {
    (2..=3).contains(&segment.len()) && segment.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_marker(segment: &str, marker: char) -> bool {
    let mut chars = segment.chars();
    chars.next().is_some_and(|c| c.eq_ignore_ascii_case(&marker)) && chars.next().is_none()
}

/// Splits the extension block into key/value pairs.
///
/// A segment of at most two characters opens a new key; longer segments are
/// joined into the value of the most recent key.
fn parse_extensions(segments: &[&str]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut index = 0;
    while index < segments.len() {
        let key = segments[index];
        index += 1;
        let mut values = Vec::new();
        while index < segments.len() && segments[index].len() > 2 {
            values.push(segments[index]);
            index += 1;
        }
        pairs.push((key.to_owned(), values.join("-")));
    }
    pairs
}

/// Decomposes `raw` into its logical segments.
pub(super) fn parse(raw: &str) -> LocaleParts {
    let mut segments = raw.split(SEPARATOR);
    let language = segments.next().unwrap_or_default().to_owned();

    let rest: Vec<&str> = segments.collect();
    let mut script = String::new();
    let mut region = String::new();
    let mut extension_block: Vec<&str> = Vec::new();
    let mut private_block: Vec<&str> = Vec::new();

    #[derive(PartialEq)]
    enum Block {
        Base,
        Extension,
        Private,
    }
    let mut block = Block::Base;

    for segment in rest {
        match block {
            Block::Base => {
                if is_marker(segment, 'u') {
                    block = Block::Extension;
                } else if is_marker(segment, 'x') {
                    block = Block::Private;
                } else if script.is_empty() && is_script(segment) {
                    script = segment.to_owned();
                } else if region.is_empty() && is_region(segment) {
                    region = segment.to_owned();
                }
                // Anything else (variants, malformed subtags) is ignored.
            }
            Block::Extension => {
                if is_marker(segment, 'x') {
                    block = Block::Private;
                } else {
                    extension_block.push(segment);
                }
            }
            Block::Private => private_block.push(segment),
        }
    }

    LocaleParts {
        language,
        script,
        region,
        extensions: parse_extensions(&extension_block),
        private_use: private_block.join("-"),
    }
}
