//! Variable interpolation for script templates.
//!
//! Templates use `${variable}` placeholders.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - a `$` not followed by `{` is kept as-is, so shell text such as
//!   `$?`, `$$` or `$PATH` passes through untouched

use crate::config::schema::InstallerConfig;
use crate::error::{BootstrapError, Result};
use crate::shell::PlatformProfile;
use std::collections::{BTreeSet, HashMap};

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing ${var} interpolations.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    current_literal.push('$');
                    while let Some(c) = chars.next() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push_str("$$");
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                while let Some(c) = chars.next_if(|c| *c != '}') {
                    var_name.push(c);
                }
                // Closing brace (absent if the template is truncated)
                chars.next();

                segments.push(Segment::Variable(var_name.trim().to_string()));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all variable names from an interpolated string, sorted.
pub fn extract_variables(input: &str) -> BTreeSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Variables available to templates.
#[derive(Debug, Default, Clone)]
pub struct InterpolationContext {
    vars: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create a context with only the built-in version variable.
    pub fn new() -> Self {
        let mut ctx = Self::default();
        ctx.set("bootstrap_version", env!("CARGO_PKG_VERSION"));
        ctx
    }

    /// Build the standard context for rendering installer scripts.
    ///
    /// Both platform flavours are always present so a single context can
    /// render `install.sh` and `install.bat` alike. Explicit interpreter
    /// overrides in the config apply to both.
    pub fn from_config(config: &InstallerConfig) -> Self {
        let mut ctx = Self::new();
        for profile in [PlatformProfile::Posix, PlatformProfile::Windows] {
            let python = config
                .interpreter
                .as_deref()
                .unwrap_or_else(|| profile.interpreter());
            let pip = config
                .package_installer
                .as_deref()
                .unwrap_or_else(|| profile.package_installer());
            ctx.set(&format!("python_{}", profile), python);
            ctx.set(&format!("pip_{}", profile), pip);
        }
        ctx.set("app_name", &config.app_name);
        ctx.set("node_name", &config.node_name);
        ctx.set("manifest", &config.manifest);
        ctx.set("node_program", &config.node_program);
        ctx.set("node_port", &config.node_port.to_string());
        ctx.set("api_flag", &config.api_flag);
        ctx.set("api_url", &config.api_url());
        ctx.set("api_port", &config.api_port.to_string());
        ctx.set("min_python", &config.min_python);
        ctx
    }

    /// Define or replace a variable.
    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Resolve all variables in `input`.
///
/// `template` names the source in error messages.
///
/// # Errors
///
/// Returns `TemplateError` listing every variable missing from the context.
pub fn resolve_string(
    template: &str,
    input: &str,
    context: &InterpolationContext,
) -> Result<String> {
    let segments = parse_interpolation(input);
    let mut result = String::with_capacity(input.len());
    let mut missing = BTreeSet::new();

    for segment in segments {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => match context.resolve(&name) {
                Some(value) => result.push_str(value),
                None => {
                    missing.insert(name);
                }
            },
        }
    }

    if missing.is_empty() {
        Ok(result)
    } else {
        let names: Vec<String> = missing.into_iter().map(|n| format!("${{{}}}", n)).collect();
        Err(BootstrapError::TemplateError {
            template: template.to_string(),
            message: format!("Unresolved variable(s): {}", names.join(", ")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literal_only() {
        let result = parse_interpolation("hello world");
        assert_eq!(result, vec![Segment::Literal("hello world".to_string())]);
    }

    #[test]
    fn parse_variable_with_surrounding_text() {
        let result = parse_interpolation("port ${node_port}!");
        assert_eq!(
            result,
            vec![
                Segment::Literal("port ".to_string()),
                Segment::Variable("node_port".to_string()),
                Segment::Literal("!".to_string()),
            ]
        );
    }

    #[test]
    fn parse_escaped_dollar_brace() {
        let result = parse_interpolation("$${NOT_INTERPOLATED}");
        assert_eq!(
            result,
            vec![Segment::Literal("${NOT_INTERPOLATED}".to_string())]
        );
    }

    #[test]
    fn shell_dollar_forms_pass_through() {
        let result = parse_interpolation("if [ $? -ne 0 ]; then echo $HOME; fi");
        assert_eq!(
            result,
            vec![Segment::Literal(
                "if [ $? -ne 0 ]; then echo $HOME; fi".to_string()
            )]
        );
    }

    #[test]
    fn double_dollar_without_brace_is_kept() {
        let ctx = InterpolationContext::new();
        let out = resolve_string("inline", "echo $$ pid; echo $$$${x}", &ctx).unwrap();
        assert_eq!(out, "echo $$ pid; echo $$${x}");
    }

    #[test]
    fn parse_adjacent_variables() {
        let result = parse_interpolation("${a}${b}");
        assert_eq!(
            result,
            vec![
                Segment::Variable("a".to_string()),
                Segment::Variable("b".to_string()),
            ]
        );
    }

    #[test]
    fn extract_variables_is_sorted_and_unique() {
        let vars = extract_variables("${b} ${a} ${b}");
        assert_eq!(vars.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn resolve_from_config_context() {
        let ctx = InterpolationContext::from_config(&InstallerConfig::default());
        let out = resolve_string(
            "inline",
            "${python_posix} ${node_program} ${node_port} ${api_flag}",
            &ctx,
        )
        .unwrap();
        assert_eq!(out, "python3 node.py 5000 --api");
    }

    #[test]
    fn windows_variables_use_unversioned_names() {
        let ctx = InterpolationContext::from_config(&InstallerConfig::default());
        assert_eq!(ctx.resolve("python_windows"), Some("python"));
        assert_eq!(ctx.resolve("pip_windows"), Some("pip"));
    }

    #[test]
    fn interpreter_override_applies_to_both_profiles() {
        let config = InstallerConfig {
            interpreter: Some("py".to_string()),
            ..Default::default()
        };
        let ctx = InterpolationContext::from_config(&config);
        assert_eq!(ctx.resolve("python_windows"), Some("py"));
        assert_eq!(ctx.resolve("python_posix"), Some("py"));
    }

    #[test]
    fn unresolved_variables_are_reported_together() {
        let ctx = InterpolationContext::new();
        let err = resolve_string("install.sh", "${x} ${y}", &ctx).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("install.sh"));
        assert!(msg.contains("${x}"));
        assert!(msg.contains("${y}"));
    }
}
