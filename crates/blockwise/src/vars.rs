//! Placeholder substitution over raw block text.
//!
//! Runs before tokenizing, over the whole text: `{name}` is replaced with the
//! mapped value; `{{` and `}}` produce literal braces.

use std::collections::HashMap;

use crate::error::{BlockError, Result};

/// Substitute `{name}` placeholders in `text` from `variables`.
///
/// # Errors
///
/// [`BlockError::UndefinedVariable`] when a placeholder names a variable that
/// is not in the map, or when a placeholder is never closed.
pub fn substitute(text: &str, variables: &HashMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(BlockError::UndefinedVariable(name)),
                    }
                }
                match variables.get(&name) {
                    Some(value) => out.push_str(value),
                    None => return Err(BlockError::UndefinedVariable(name)),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_placeholders() {
        let result = substitute("Hello {name}, it is {day}", &vars(&[("name", "Ada"), ("day", "Friday")]));
        assert_eq!(result.unwrap(), "Hello Ada, it is Friday");
    }

    #[test]
    fn test_no_placeholders_passthrough() {
        let result = substitute("plain text", &vars(&[]));
        assert_eq!(result.unwrap(), "plain text");
    }

    #[test]
    fn test_undefined_variable_names_it() {
        let err = substitute("Hello {name}", &vars(&[])).unwrap_err();
        assert_eq!(err, BlockError::UndefinedVariable("name".to_string()));
    }

    #[test]
    fn test_escaped_braces() {
        let result = substitute("a {{literal}} and {x}", &vars(&[("x", "y")]));
        assert_eq!(result.unwrap(), "a {literal} and y");
    }

    #[test]
    fn test_unclosed_placeholder_fails() {
        assert!(substitute("broken {name", &vars(&[("name", "x")])).is_err());
    }

    #[test]
    fn test_same_variable_used_twice() {
        let result = substitute("{x} and {x}", &vars(&[("x", "y")]));
        assert_eq!(result.unwrap(), "y and y");
    }
}
