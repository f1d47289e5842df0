//! Configuration validation engine.
//!
//! Validates configuration files against the known schema, detects
//! unknown/misspelled fields, and reports settings that will make the relay
//! misbehave at runtime.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use secrecy::ExposeSecret;

use crate::{
    env_subst::substitute_env_with, loader::apply_env_overrides_with, schema::RelayConfig,
};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "unknown-field", "type-error", "missing-value",
    /// "invalid-value", "security", "file-ref"
    pub category: &'static str,
    /// Dotted path, e.g. "form.url"
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        category: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a configuration file.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<PathBuf>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

// ── Schema tree for unknown-field detection ─────────────────────────────────

enum KnownKeys {
    Struct(HashMap<&'static str, KnownKeys>),
    Array,
    Leaf,
}

/// Mirrors every field in `schema.rs`.
fn build_schema_map() -> KnownKeys {
    use KnownKeys::{Array, Leaf, Struct};

    Struct(HashMap::from([
        (
            "discord",
            Struct(HashMap::from([
                ("token", Leaf),
                ("channel_id", Leaf),
                ("command_prefix", Leaf),
                ("user_allowlist", Array),
                ("admin_allowlist", Array),
            ])),
        ),
        (
            "form",
            Struct(HashMap::from([
                ("url", Leaf),
                (
                    "fields",
                    Struct(HashMap::from([
                        ("reason", Leaf),
                        ("amount", Leaf),
                        ("deadline", Leaf),
                        ("note", Leaf),
                    ])),
                ),
            ])),
        ),
        ("storage", Struct(HashMap::from([("channel_file", Leaf)]))),
    ]))
}

// ── Levenshtein distance ────────────────────────────────────────────────────

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_chars.len()]
}

/// Closest candidate within `max_distance` edits, if any.
fn suggest<'a>(needle: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&c| (c, levenshtein(needle, c)))
        .filter(|&(_, d)| d > 0 && d <= max_distance)
        .min_by_key(|&(_, d)| d)
        .map(|(c, _)| c)
}

// ── Core validation ─────────────────────────────────────────────────────────

/// Validate a config file at the given path, or the discovered config file
/// when `path` is `None`.
#[must_use]
pub fn validate(path: Option<&Path>) -> ValidationResult {
    validate_with(path, |name| std::env::var(name).ok())
}

fn validate_with(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> ValidationResult {
    let config_path = path
        .map(Path::to_path_buf)
        .or_else(crate::loader::find_config_file);

    let Some(actual_path) = config_path else {
        let mut config = RelayConfig::default();
        apply_env_overrides_with(&mut config, &lookup);
        let mut diagnostics = vec![Diagnostic::new(
            Severity::Info,
            "file-ref",
            "",
            "no config file found; using defaults",
        )];
        diagnostics.extend(validate_config(&config));
        return ValidationResult {
            diagnostics,
            config_path: None,
        };
    };

    let is_toml = actual_path
        .extension()
        .and_then(|e| e.to_str())
        .is_none_or(|e| e == "toml");

    let mut result = if is_toml {
        match std::fs::read_to_string(&actual_path) {
            Ok(content) => validate_toml_str_with(&content, &lookup),
            Err(e) => ValidationResult {
                diagnostics: vec![Diagnostic::new(
                    Severity::Error,
                    "syntax",
                    "",
                    format!("failed to read config file: {e}"),
                )],
                config_path: None,
            },
        }
    } else {
        match crate::loader::load_config(&actual_path) {
            Ok(mut config) => {
                apply_env_overrides_with(&mut config, &lookup);
                let mut diagnostics = vec![Diagnostic::new(
                    Severity::Info,
                    "file-ref",
                    "",
                    "unknown-field checks only run on TOML files",
                )];
                diagnostics.extend(validate_config(&config));
                ValidationResult {
                    diagnostics,
                    config_path: None,
                }
            },
            Err(e) => ValidationResult {
                diagnostics: vec![Diagnostic::new(
                    Severity::Error,
                    "syntax",
                    "",
                    e.to_string(),
                )],
                config_path: None,
            },
        }
    };
    result.config_path = Some(actual_path);
    result
}

/// Validate TOML text without touching the file system.
///
/// Semantic checks run on the text after `${ENV}` substitution and
/// environment overrides from the process environment, as the relay would
/// see it at startup.
#[must_use]
pub fn validate_toml_str(toml_str: &str) -> ValidationResult {
    validate_toml_str_with(toml_str, |name| std::env::var(name).ok())
}

/// Same as [`validate_toml_str`] with a custom environment lookup.
pub(crate) fn validate_toml_str_with(
    toml_str: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> ValidationResult {
    let mut diagnostics = Vec::new();

    // 1. Syntax
    let toml_value: toml::Value = match toml::from_str(toml_str) {
        Ok(v) => v,
        Err(e) => {
            diagnostics.push(Diagnostic::new(
                Severity::Error,
                "syntax",
                "",
                format!("TOML syntax error: {e}"),
            ));
            return ValidationResult {
                diagnostics,
                config_path: None,
            };
        },
    };

    // 2. Unknown fields
    check_unknown_fields(&toml_value, &build_schema_map(), "", &mut diagnostics);

    // 3. Token written inline rather than pulled from the environment
    if let Some(token) = toml_value
        .get("discord")
        .and_then(|d| d.get("token"))
        .and_then(|t| t.as_str())
        && !token.trim().is_empty()
        && !token.contains("${")
    {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "security",
            "discord.token",
            "token is stored in plain text; prefer \"${DISCORD_TOKEN}\"",
        ));
    }

    // 4. Type check + semantic checks on the effective config
    match toml::from_str::<RelayConfig>(&substitute_env_with(toml_str, &lookup)) {
        Ok(mut config) => {
            apply_env_overrides_with(&mut config, &lookup);
            diagnostics.extend(validate_config(&config));
        },
        Err(e) => diagnostics.push(Diagnostic::new(
            Severity::Error,
            "type-error",
            "",
            format!("type error: {e}"),
        )),
    }

    ValidationResult {
        diagnostics,
        config_path: None,
    }
}

/// Semantic checks on an already-loaded config.
#[must_use]
pub fn validate_config(config: &RelayConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if !config.discord.has_token() {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "missing-value",
            "discord.token",
            "no bot token; set DISCORD_TOKEN or discord.token",
        ));
    }

    if config.discord.command_prefix.trim().is_empty() {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "invalid-value",
            "discord.command_prefix",
            "command prefix must not be empty",
        ));
    }

    if let Some(id) = &config.discord.channel_id
        && (id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()))
    {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "invalid-value",
            "discord.channel_id",
            format!("\"{id}\" does not look like a Discord channel ID"),
        ));
    }

    match config.form.url.as_deref().map(str::trim) {
        None | Some("") => diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "missing-value",
            "form.url",
            "no form URL; every submission will fail (set FORM_URL or form.url)",
        )),
        Some(raw) => match url::Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {},
            Ok(url) => diagnostics.push(Diagnostic::new(
                Severity::Error,
                "invalid-value",
                "form.url",
                format!("unsupported scheme \"{}\" (expected http or https)", url.scheme()),
            )),
            Err(e) => diagnostics.push(Diagnostic::new(
                Severity::Error,
                "invalid-value",
                "form.url",
                format!("invalid URL: {e}"),
            )),
        },
    }

    let fields = &config.form.fields;
    let ids = [
        ("reason", fields.reason.trim()),
        ("amount", fields.amount.trim()),
        ("deadline", fields.deadline.trim()),
        ("note", fields.note.trim()),
    ];
    for (i, (name, id)) in ids.iter().enumerate() {
        let path = format!("form.fields.{name}");
        if id.is_empty() {
            diagnostics.push(Diagnostic::new(
                Severity::Error,
                "invalid-value",
                path,
                "form-field identifier must not be empty",
            ));
        } else if let Some((other, _)) = ids[..i].iter().find(|(_, prev)| prev == id) {
            diagnostics.push(Diagnostic::new(
                Severity::Error,
                "invalid-value",
                path,
                format!("identifier \"{id}\" is already used by form.fields.{other}"),
            ));
        }
    }

    diagnostics
}

fn check_unknown_fields(
    value: &toml::Value,
    schema: &KnownKeys,
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let (toml::Value::Table(table), KnownKeys::Struct(fields)) = (value, schema) else {
        // Leaf, array, or type mismatch: type errors are reported later.
        return;
    };

    let known_keys: Vec<&str> = fields.keys().copied().collect();
    for (key, child_value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        if let Some(child_schema) = fields.get(key.as_str()) {
            check_unknown_fields(child_value, child_schema, &path, diagnostics);
            continue;
        }
        let level = if prefix.is_empty() {
            "at top level "
        } else {
            ""
        };
        let msg = match suggest(key, &known_keys, 3) {
            Some(s) => format!("unknown field {level}(did you mean \"{s}\"?)"),
            None => format!("unknown field {level}"),
        };
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "unknown-field",
            path,
            msg.trim(),
        ));
    }
}
