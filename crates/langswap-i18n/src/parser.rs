//! Parsing of `key=value` resource files into language records.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{I18nError, I18nResult};
use crate::record::LanguageRecord;

/// Derives the language code from a resource path: its file name without
/// the final extension.
pub fn language_code(path: &Path) -> I18nResult<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| I18nError::InvalidFileName {
            path: path.to_path_buf(),
        })
}

/// Reads and parses one resource file.
///
/// The whole file is rejected on the first malformed line, so a partially
/// parsed record is never returned.
pub fn parse(path: &Path) -> I18nResult<LanguageRecord> {
    let code = language_code(path)?;
    let content = fs::read_to_string(path).map_err(|source| I18nError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_content(&code, &content, path)
}

/// Parses resource text already in memory. `path` is only used in errors.
///
/// A leading byte order mark is dropped.
pub fn parse_content(code: &str, content: &str, path: &Path) -> I18nResult<LanguageRecord> {
    let mut translations = HashMap::new();
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    for (index, line) in content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(I18nError::MalformedLine {
                path: path.to_path_buf(),
                line_number: index + 1,
                line: line.to_string(),
            });
        };
        translations.insert(key.to_string(), value.to_string());
    }

    Ok(LanguageRecord::new(code, translations))
}
