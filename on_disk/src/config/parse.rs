use std::{fmt::Write, str::Lines};

use gitlayout_core::repo::ConfigError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Section {
    pub name: String,
    pub subsection: Option<String>,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(name: &str, subsection: Option<&str>) -> Self {
        Section {
            name: name.to_ascii_lowercase(),
            subsection: subsection.map(str::to_string),
            entries: Vec::new(),
        }
    }

    pub fn matches(&self, name: &str, subsection: Option<&str>) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.subsection.as_deref() == subsection
    }
}

/// A `key = value` line. A key with no `=` has no value, which git
/// reads as boolean true.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    pub key: String,
    pub value: Option<String>,
}

pub(crate) fn parse(text: &str) -> Result<Vec<Section>, ConfigError> {
    let mut sections: Vec<Section> = Vec::new();
    let mut lines = text.lines();
    let mut line = 0;

    while let Some(raw) = lines.next() {
        line += 1;

        let trimmed = raw.trim_start();
        if is_blank_or_comment(trimmed) {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('[') {
            let (section, rest) = parse_section_header(header, line)?;
            if !is_blank_or_comment(rest.trim_start()) {
                return Err(ConfigError::BadSectionHeader { line });
            }
            sections.push(section);
            continue;
        }

        let section = match sections.last_mut() {
            Some(section) => section,
            None => return Err(ConfigError::MissingSectionHeader { line }),
        };

        let key_len = trimmed
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or_else(|| trimmed.len());
        let (key, rest) = trimmed.split_at(key_len);
        if !key.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(ConfigError::BadKey { line });
        }

        let rest = rest.trim_start();
        let value = if is_blank_or_comment(rest) {
            None
        } else if let Some(value) = rest.strip_prefix('=') {
            Some(parse_value(value.trim_start(), &mut lines, &mut line)?)
        } else {
            return Err(ConfigError::BadKey { line });
        };

        section.entries.push(Entry {
            key: key.to_ascii_lowercase(),
            value,
        });
    }

    Ok(sections)
}

fn is_blank_or_comment(s: &str) -> bool {
    s.is_empty() || s.starts_with('#') || s.starts_with(';')
}

// `header` is everything after the opening `[`. Returns the section and
// whatever follows the closing `]`.
fn parse_section_header(header: &str, line: usize) -> Result<(Section, &str), ConfigError> {
    let name_len = header
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '.'))
        .unwrap_or_else(|| header.len());
    let (name, rest) = header.split_at(name_len);
    if name.is_empty() {
        return Err(ConfigError::BadSectionHeader { line });
    }

    if let Some(rest) = rest.strip_prefix(']') {
        return Ok((Section::new(name, None), rest));
    }

    let quoted = match rest.trim_start().strip_prefix('"') {
        Some(quoted) if rest.starts_with(char::is_whitespace) => quoted,
        _ => return Err(ConfigError::BadSectionHeader { line }),
    };

    let mut subsection = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => subsection.push(escaped),
                None => break,
            },
            '"' => {
                let after = &quoted[i + 1..];
                return match after.strip_prefix(']') {
                    Some(rest) => Ok((Section::new(name, Some(&subsection)), rest)),
                    None => Err(ConfigError::BadSectionHeader { line }),
                };
            }
            c => subsection.push(c),
        }
    }

    Err(ConfigError::BadSectionHeader { line })
}

// Whitespace outside quotes is collapsed into the value only when more
// content follows it, so leading and trailing blanks disappear.
fn parse_value<'a>(
    mut rest: &'a str,
    lines: &mut Lines<'a>,
    line: &mut usize,
) -> Result<String, ConfigError> {
    let mut value = String::new();
    let mut pending = String::new();
    let mut quoted = false;

    'lines: loop {
        let mut chars = rest.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    let escaped = match chars.next() {
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('b') => '\x08',
                        Some(escape) => {
                            return Err(ConfigError::BadEscape {
                                line: *line,
                                escape,
                            })
                        }
                        None => match lines.next() {
                            Some(next) => {
                                *line += 1;
                                rest = next;
                                continue 'lines;
                            }
                            None => break 'lines,
                        },
                    };
                    push_value_char(&mut value, &mut pending, escaped);
                }
                '"' => quoted = !quoted,
                '#' | ';' if !quoted => break 'lines,
                c if !quoted && c.is_whitespace() => pending.push(c),
                c => push_value_char(&mut value, &mut pending, c),
            }
        }
        break;
    }

    if quoted {
        Err(ConfigError::UnterminatedQuote { line: *line })
    } else {
        Ok(value)
    }
}

fn push_value_char(value: &mut String, pending: &mut String, c: char) {
    if !value.is_empty() {
        value.push_str(pending);
    }
    pending.clear();
    value.push(c);
}

pub(crate) fn serialize(sections: &[Section]) -> String {
    let mut out = String::new();

    for section in sections {
        // Writing to a String can't fail.
        let _ = match &section.subsection {
            Some(subsection) => writeln!(
                out,
                "[{} \"{}\"]",
                section.name,
                subsection.replace('\\', "\\\\").replace('"', "\\\"")
            ),
            None => writeln!(out, "[{}]", section.name),
        };

        for entry in &section.entries {
            let _ = match &entry.value {
                Some(value) => writeln!(out, "\t{} = {}", entry.key, quote_value(value)),
                None => writeln!(out, "\t{}", entry.key),
            };
        }
    }

    out
}

fn quote_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains(|c: char| c == '#' || c == ';');

    let mut out = String::with_capacity(value.len() + 2);
    if needs_quotes {
        out.push('"');
    }

    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\x08' => out.push_str("\\b"),
            c => out.push(c),
        }
    }

    if needs_quotes {
        out.push('"');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: Option<&str>) -> Entry {
        Entry {
            key: key.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn init_config() {
        let text = "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n\tlogallrefupdates = true\n";
        let sections = parse(text).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "core");
        assert_eq!(sections[0].subsection, None);
        assert_eq!(
            sections[0].entries,
            vec![
                entry("repositoryformatversion", Some("0")),
                entry("filemode", Some("true")),
                entry("bare", Some("false")),
                entry("logallrefupdates", Some("true")),
            ]
        );

        assert_eq!(serialize(&sections), text);
    }

    #[test]
    fn comments_and_blank_lines() {
        let text = "# leading comment\n\n; another\n[core] # trailing\n  bare = true ; why not\n";
        let sections = parse(text).unwrap();
        assert_eq!(sections[0].entries, vec![entry("bare", Some("true"))]);
    }

    #[test]
    fn subsection_and_case() {
        let sections = parse("[Remote \"Origin\"]\n\tURL = x\n").unwrap();
        assert_eq!(sections[0].name, "remote");
        assert_eq!(sections[0].subsection.as_deref(), Some("Origin"));
        assert!(sections[0].matches("REMOTE", Some("Origin")));
        assert!(!sections[0].matches("remote", Some("origin")));
        assert_eq!(sections[0].entries, vec![entry("url", Some("x"))]);
    }

    #[test]
    fn key_without_value() {
        let sections = parse("[core]\n\tbare\n").unwrap();
        assert_eq!(sections[0].entries, vec![entry("bare", None)]);
    }

    #[test]
    fn quoted_value_keeps_whitespace() {
        let sections = parse("[core]\n\tworktree = \"  /a b \" # c\n").unwrap();
        assert_eq!(sections[0].entries, vec![entry("worktree", Some("  /a b "))]);
    }

    #[test]
    fn internal_whitespace_preserved() {
        let sections = parse("[x]\n\ty = a   b\t\n").unwrap();
        assert_eq!(sections[0].entries, vec![entry("y", Some("a   b"))]);
    }

    #[test]
    fn escapes() {
        let sections = parse("[x]\n\ty = \"a\\\"b\\\\c\\td\\n\"\n").unwrap();
        assert_eq!(sections[0].entries, vec![entry("y", Some("a\"b\\c\td\n"))]);
    }

    #[test]
    fn continuation_line() {
        let sections = parse("[x]\n\ty = abc\\\ndef\n\tz = 1\n").unwrap();
        assert_eq!(
            sections[0].entries,
            vec![entry("y", Some("abcdef")), entry("z", Some("1"))]
        );
    }

    #[test]
    fn error_entry_before_section() {
        let err = parse("\nbare = true\n").unwrap_err();
        if let ConfigError::MissingSectionHeader { line } = err {
            assert_eq!(line, 2);
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn error_bad_section_header() {
        for text in &["[core\n", "[]\n", "[core \"x]\n", "[core\"x\"]\n", "[core] bare\n"] {
            let err = parse(text).unwrap_err();
            if let ConfigError::BadSectionHeader { line } = err {
                assert_eq!(line, 1);
            } else {
                panic!("wrong error for {:?}: {:?}", text, err);
            }
        }
    }

    #[test]
    fn error_bad_key() {
        for text in &["[core]\n\t1bare = true\n", "[core]\n\tba_re = true\n"] {
            let err = parse(text).unwrap_err();
            if let ConfigError::BadKey { line } = err {
                assert_eq!(line, 2);
            } else {
                panic!("wrong error for {:?}: {:?}", text, err);
            }
        }
    }

    #[test]
    fn error_unterminated_quote() {
        let err = parse("[core]\n\tworktree = \"/a\n").unwrap_err();
        if let ConfigError::UnterminatedQuote { line } = err {
            assert_eq!(line, 2);
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn error_bad_escape() {
        let err = parse("[core]\n\n\tworktree = a\\qb\n").unwrap_err();
        if let ConfigError::BadEscape { line, escape } = err {
            assert_eq!(line, 3);
            assert_eq!(escape, 'q');
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn serialize_quotes_when_needed() {
        let mut section = Section::new("core", None);
        section.entries.push(entry("worktree", Some(" /a#b ")));
        section.entries.push(entry("empty", Some("")));
        section.entries.push(entry("flag", None));

        let text = serialize(&[section.clone()]);
        assert_eq!(
            text,
            "[core]\n\tworktree = \" /a#b \"\n\tempty = \"\"\n\tflag\n"
        );
        assert_eq!(parse(&text).unwrap(), vec![section]);
    }

    #[test]
    fn serialize_subsection_escapes() {
        let section = Section::new("remote", Some("a\"b"));
        let text = serialize(&[section.clone()]);
        assert_eq!(text, "[remote \"a\\\"b\"]\n");
        assert_eq!(parse(&text).unwrap(), vec![section]);
    }
}
