use std::collections::BTreeMap;
use std::path::Path;

/// Loads a `.spindle.env` file (shell-style `KEY=value` format).
///
/// `.spindle.env` holds secrets and machine-local values (repository
/// credentials, publish tokens). Values are available via `${env:VAR}`
/// interpolation in `Spindle.toml`.
pub fn load_env_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path).map_err(spindle_util::errors::SpindleError::Io)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(map)
}

/// Interpolate `${env:VAR}` references in a string.
///
/// Looks up values first from the provided `env_overrides` map (populated
/// from `.spindle.env`), then falls back to actual process environment
/// variables. Unknown variables become empty strings.
pub fn interpolate(input: &str, env_overrides: &BTreeMap<String, String>) -> String {
    let mut result = input.to_string();
    while let Some(start) = result.find("${env:") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let key = &result[start + 6..end];
        let value = env_overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .unwrap_or_default();
        result.replace_range(start..=end, &value);
    }
    result
}

/// Substitute `${key}` project-property references in a string.
///
/// Unlike environment interpolation, an unknown key is an error: a dependency
/// coordinate or resource template naming a property no manifest defines is a
/// descriptor bug. Values are inserted literally, with no recursive expansion.
pub fn substitute(input: &str, properties: &BTreeMap<String, String>) -> Result<String, String> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            return Err(format!("unterminated property reference in '{input}'"));
        };
        let end = start + len;
        result.push_str(&rest[..start]);
        let key = &rest[start + 2..end];
        match properties.get(key) {
            Some(value) => result.push_str(value),
            None => return Err(format!("unknown property '{key}'")),
        }
        rest = &rest[end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}

/// Merge member properties over workspace-root properties (member wins).
pub fn merged(
    root: &BTreeMap<String, String>,
    member: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut out = root.clone();
    for (key, value) in member {
        out.insert(key.clone(), value.clone());
    }
    out
}
