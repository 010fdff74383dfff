use crate::{
    ast::{Biblio, Entry},
    Error, ErrorKind,
};

use super::{Compose, Format, Parse};

use std::collections::HashMap;

use biblatex::{Bibliography, Chunk, Chunks};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

/// A type wrapper around [`String`] to represent a `BibTex` format string.
#[derive(Debug)]
pub struct BibTex(String);

static ENTRY_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*@").expect("entry start pattern is valid"));

impl Format for BibTex {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "BibTex"
    }
}

impl Parse for BibTex {
    /// Parses every `@`-entry on its own so that entries sharing a citation key in the same source
    /// are all kept, a whole source parse would only keep the last one.
    fn parse(self) -> Result<Biblio, Error> {
        let blocks = split_blocks(&self.0);

        let strings = blocks
            .iter()
            .filter(|block| block_kind(block) == "string")
            .copied()
            .collect::<String>();

        let mut biblio = Biblio::default();
        for block in blocks {
            match block_kind(block).as_str() {
                "string" | "comment" | "preamble" => {
                    trace!("skipping @{} block", block_kind(block));
                }
                _ => {
                    for entry in parse_block(&strings, block)? {
                        biblio.insert(entry);
                    }
                }
            }
        }

        debug!("parsed {} BibTeX entries", biblio.len());
        Ok(biblio)
    }
}

impl Compose for BibTex {
    /// Composes entries sorted by citation key with fields sorted by name.
    fn compose(biblio: &Biblio) -> Result<Self, Error> {
        let mut entries = biblio.entries().iter().collect::<Vec<_>>();
        entries.sort_by(|a, b| a.cite().cmp(b.cite()));

        let bib = entries
            .into_iter()
            .map(compose_entry)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Self(bib))
    }
}

/// Splits `src` at every line starting with `@` outside of braces, so an `@` at the start of a
/// line inside a field value stays in its entry.
fn split_blocks(src: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut depth = 0_usize;
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        if depth == 0 {
            if let Some(m) = ENTRY_START.find(line) {
                starts.push(offset + m.end() - 1);
            }
        }
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(src.len());
            &src[start..end]
        })
        .collect()
}

/// The lower case entry type of a block, e.g. `article` for `@Article{...`.
fn block_kind(block: &str) -> String {
    block
        .trim_start_matches('@')
        .chars()
        .take_while(|c| !matches!(c, '{' | '(') && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn parse_block(strings: &str, block: &str) -> Result<Vec<Entry>, Error> {
    let src = format!("{strings}{block}");

    let raw = raw_values(block);

    Bibliography::parse(&src)
        .filter(|b| b.len() != 0)
        .map(|b| {
            b.into_iter()
                .map(|parsed| {
                    let mut entry = Entry::from(parsed);
                    for (name, value) in &raw {
                        if entry.contains_field(name) {
                            entry.set_field(name, value.as_str());
                        }
                    }
                    entry
                })
                .collect()
        })
        .ok_or_else(|| {
            let first_line = block.lines().next().unwrap_or_default().trim();
            Error::new(
                ErrorKind::Deserialize,
                format!("Unable to parse the BibTeX entry starting with '{first_line}'"),
            )
        })
}

/// The values of a block that are a single braced or quoted string, exactly as written.
///
/// biblatex resolves LaTeX inside values (`\&` becomes `&`, math and commands are dropped) so
/// these values are taken from the source instead. Values built from `@string` macros or `#`
/// concatenation are left to biblatex.
fn raw_values(block: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    let Some(open) = block.find(['{', '(']) else {
        return values;
    };
    let close = if block[open..].starts_with('(') { ')' } else { '}' };
    let Some(key_end) = block[open..].find(',') else {
        return values;
    };

    let mut rest = &block[open + key_end + 1..];
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        let Some(eq) = rest.find('=') else { break };
        let name = rest[..eq].trim();
        if name.is_empty() || name.contains(['{', '}', '(', ')', '"']) {
            break;
        }

        let value = &rest[eq + 1..];
        let end = value_end(value, close);
        if let Some(raw) = delimited(value[..end].trim()) {
            values.insert(name.to_lowercase(), raw.to_owned());
        }
        rest = &value[end..];
        if rest.starts_with(close) {
            break;
        }
    }
    values
}

/// Index of the `,` or closing delimiter ending the value expression at the start of `value`.
fn value_end(value: &str, close: char) -> usize {
    let mut depth = 0_usize;
    let mut quoted = false;
    for (i, c) in value.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '"' if depth == 0 => quoted = !quoted,
            c if depth == 0 && !quoted && (c == ',' || c == close) => return i,
            _ => {}
        }
    }
    value.len()
}

/// The inside of `{...}` or `"..."` when `expr` is exactly one such string.
fn delimited(expr: &str) -> Option<&str> {
    let (inner, quoted) = match expr.chars().next()? {
        '{' => (expr.strip_prefix('{')?.strip_suffix('}')?, false),
        '"' => (expr.strip_prefix('"')?.strip_suffix('"')?, true),
        _ => return None,
    };

    // `{a} # {b}` starts and ends with braces too, its inside is not balanced
    let mut depth = 0_usize;
    for c in inner.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.checked_sub(1)?,
            '"' if quoted && depth == 0 => return None,
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

fn compose_entry(entry: &Entry) -> String {
    format!(
        "@{}{{{},\n{}}}\n",
        entry.kind(),
        entry.cite(),
        compose_fields(entry)
    )
}

fn compose_fields(entry: &Entry) -> String {
    let mut fields = entry.fields().iter().collect::<Vec<_>>();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    fields
        .into_iter()
        .map(|field| format!("    {} = {{{}}},\n", field.name, field.value))
        .collect()
}

impl From<biblatex::Entry> for Entry {
    fn from(entry: biblatex::Entry) -> Self {
        // Deconstruct to avoid cloning
        let biblatex::Entry {
            key: cite,
            entry_type,
            fields,
        } = entry;

        let mut fields = fields.into_iter().collect::<Vec<_>>();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        fields.into_iter().fold(
            Entry::new(cite, &entry_type.to_string()),
            |entry, (name, value)| entry.with_field(&name, chunks_to_string(value)),
        )
    }
}

/// Flattens biblatex chunks back into a field value, verbatim chunks are wrapped in braces again
/// so the value keeps its protected substrings.
fn chunks_to_string(chunks: Chunks) -> String {
    // Check last character for an escape and if found then start merging using `merge_escaped`
    fn verbatim_chunk_merge(verbatim_str: &mut String, chunks: &mut impl Iterator<Item = Chunk>) {
        if verbatim_str.ends_with('/') {
            merge_escaped(verbatim_str, chunks);
        }
    }

    // biblatex splits a verbatim section at a '/' so "{(HTTP/1.1)}" arrives as
    // [Verbatim("(HTTP/"), Normal("1"), Verbatim("."), Normal("1"), Verbatim(")")].
    // Everything up to and including the verbatim chunk after the second normal chunk belongs
    // to the same verbatim section.
    fn merge_escaped(dest: &mut String, chunks: &mut impl Iterator<Item = Chunk>) {
        let mut normal_count = 0;
        while let Some(chunk) = chunks.next() {
            match chunk {
                Chunk::Normal(s) => {
                    normal_count += 1;
                    dest.push_str(&s);
                }
                Chunk::Verbatim(mut s) => {
                    verbatim_chunk_merge(&mut s, chunks);
                    dest.push_str(&s);
                    if normal_count == 2 {
                        return;
                    }
                }
            }
        }
    }

    let mut value = String::new();
    let mut chunk_iter = chunks.into_iter();
    while let Some(chunk) = chunk_iter.next() {
        match chunk {
            Chunk::Verbatim(mut s) => {
                verbatim_chunk_merge(&mut s, &mut chunk_iter);
                value.push('{');
                value.push_str(&s);
                value.push('}');
            }
            Chunk::Normal(s) => value.push_str(&s),
        }
    }
    value
}
