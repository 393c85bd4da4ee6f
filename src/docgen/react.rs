//! react-docgen compatible extractor
//!
//! Understands the common component shapes: `export default class|function`,
//! a named class/function/arrow component exported by `export default Name`
//! or `module.exports = Name`, plus `propTypes`/`defaultProps` objects either
//! assigned as `Name.propTypes = {...}` or declared as `static` class fields.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use super::scan::{
    compact, find_matching, preceding_doc_block, split_top_level, strip_comments,
    take_leading_doc,
};
use super::{DocExtractor, DocInfo, ExtractError};
use crate::models::{DefaultValue, PropInfo, PropType, Props};

const IDENT: &str = r"[A-Za-z_$][\w$]*";

static EXPORT_DEFAULT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*export\s+default\s+(?:async\s+)?(?:class|function)\b\s*\*?\s*({IDENT})?"
    ))
    .expect("static regex")
});

static EXPORT_DEFAULT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*(?:export\s+default|module\.exports\s*=)\s+(?:(?:React\.)?(?:memo|forwardRef)\(\s*)?({IDENT})\s*\)?\s*;?[ \t]*$"
    ))
    .expect("static regex")
});

static EXPORT_DEFAULT_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*(?:export\s+default|module\.exports\s*=)\s+({IDENT}(?:\.{IDENT})*\s*\([^\n;]*\))\s*;?[ \t]*$"
    ))
    .expect("static regex")
});

static EXPORTED_NAMED_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*export\s+(?:(?:class|(?:async\s+)?function)\s+([A-Z][\w$]*)|(?:const|let|var)\s+([A-Z][\w$]*)\s*=([^\n]*))"
    ))
    .expect("static regex")
});

static COMPUTED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{IDENT}(?:\.{IDENT})*$")).expect("static regex")
});

static COMPONENT_INITIALIZER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(?:\(|async\b|function\b|{IDENT}\s*=>|(?:React\.)?(?:memo|forwardRef|createClass)\(|createReactClass\()"
    ))
    .expect("static regex")
});

/// Primitive `PropTypes.*` validators
const SIMPLE_TYPES: &[&str] = &[
    "any", "array", "bool", "func", "number", "object", "string", "symbol", "node", "element",
    "elementType",
];

/// Extractor for React components written with `prop-types`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactDocgen;

impl ReactDocgen {
    pub fn new() -> Self {
        Self
    }
}

impl DocExtractor for ReactDocgen {
    fn extract(&self, source: &str) -> Result<DocInfo, ExtractError> {
        let definition = find_definition(source)?;
        let description = preceding_doc_block(source, definition.start).unwrap_or_default();

        let mut props = Props::new();
        let name = definition.name.as_deref();

        if let Some(body) = assigned_object(source, name, "propTypes")? {
            for segment in split_object(body, "propTypes")? {
                let (doc, code) = take_leading_doc(segment);
                let Some((key, value)) = split_key(code) else {
                    continue;
                };
                let (prop_type, required) = parse_validator(value)?;
                props.insert(
                    key,
                    PropInfo {
                        prop_type: Some(prop_type),
                        required,
                        description: doc.unwrap_or_default(),
                        default_value: None,
                    },
                );
            }
        }

        if let Some(body) = assigned_object(source, name, "defaultProps")? {
            for segment in split_object(body, "defaultProps")? {
                let (_, code) = take_leading_doc(segment);
                let Some((key, value)) = split_key(code) else {
                    continue;
                };
                let raw = strip_comments(value).trim().to_string();
                let default_value = DefaultValue {
                    computed: is_computed(&raw),
                    value: raw,
                };
                match props.get_mut(&key) {
                    Some(info) => info.default_value = Some(default_value),
                    None => props.insert(
                        key,
                        PropInfo {
                            default_value: Some(default_value),
                            ..PropInfo::default()
                        },
                    ),
                }
            }
        }

        Ok(DocInfo {
            description: Some(description),
            props,
        })
    }
}

/// Where the component is declared and what it is called
#[derive(Debug, Clone, PartialEq, Eq)]
struct Definition {
    name: Option<String>,
    start: usize,
}

fn find_definition(source: &str) -> Result<Definition, ExtractError> {
    if let Some(caps) = EXPORT_DEFAULT_DECL.captures(source) {
        let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);
        // `export default class extends Base` is anonymous
        let name = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|name| *name != "extends")
            .map(str::to_string);
        return Ok(Definition { name, start: whole });
    }

    if let Some(caps) = EXPORT_DEFAULT_NAME.captures(source) {
        let name = &caps[1];
        return declaration_of(source, name)?.ok_or(ExtractError::NoComponentDefinition);
    }

    // Higher-order components: `withStyles(styles)(Button)`, `connect(m)(Button)`
    if let Some(caps) = EXPORT_DEFAULT_CALL.captures(source) {
        if let Some(name) = wrapped_identifier(&caps[1]) {
            return declaration_of(source, name)?.ok_or(ExtractError::NoComponentDefinition);
        }
    }

    let mut found = Vec::new();
    for caps in EXPORTED_NAMED_DECL.captures_iter(source) {
        let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
        if let Some(name) = caps.get(1) {
            found.push(Definition {
                name: Some(name.as_str().to_string()),
                start,
            });
        } else if let (Some(name), Some(init)) = (caps.get(2), caps.get(3)) {
            if COMPONENT_INITIALIZER.is_match(init.as_str()) {
                found.push(Definition {
                    name: Some(name.as_str().to_string()),
                    start,
                });
            }
        }
    }
    match found.len() {
        0 => Err(ExtractError::NoComponentDefinition),
        1 => Ok(found.remove(0)),
        _ => Err(ExtractError::MultipleDefinitions),
    }
}

/// Innermost identifier passed to a wrapper call chain.
///
/// `withRouter(connect(m)(Button))` yields `Button`; a chain whose last
/// argument is not a bare identifier yields `None`.
fn wrapped_identifier(call: &str) -> Option<&str> {
    let inner = call.trim_end_matches(|c: char| c == ')' || c.is_whitespace());
    let is_ident_char = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    let start = match inner.rfind(|c: char| !is_ident_char(c)) {
        Some(i) => i + inner[i..].chars().next().map_or(1, char::len_utf8),
        None => return None,
    };
    let ident = &inner[start..];
    let first = ident.chars().next()?;
    if first.is_ascii_digit() || !inner[..start].trim_end().ends_with('(') {
        return None;
    }
    Some(ident)
}

/// Locate the class, function or component-valued binding called `name`.
fn declaration_of(source: &str, name: &str) -> Result<Option<Definition>, ExtractError> {
    let name_re = regex::escape(name);
    let re = Regex::new(&format!(
        r"(?m)^[ \t]*(?:export\s+)?(?:class\s+{name_re}\b|(?:async\s+)?function\s*\*?\s*{name_re}\s*\(|(?:const|let|var)\s+{name_re}\s*=([^\n]*))"
    ))
    .map_err(|e| ExtractError::Other(e.to_string()))?;

    for caps in re.captures_iter(source) {
        if let Some(init) = caps.get(1) {
            if !COMPONENT_INITIALIZER.is_match(init.as_str()) {
                continue;
            }
        }
        return Ok(Some(Definition {
            name: Some(name.to_string()),
            start: caps.get(0).map(|m| m.start()).unwrap_or(0),
        }));
    }
    Ok(None)
}

/// Body of the object literal assigned to `Name.<field>` or `static <field>`.
fn assigned_object<'a>(
    source: &'a str,
    name: Option<&str>,
    field: &str,
) -> Result<Option<&'a str>, ExtractError> {
    let mut patterns = Vec::new();
    if let Some(name) = name {
        patterns.push(format!(
            r"\b{}\.{}\s*=\s*\{{",
            regex::escape(name),
            regex::escape(field)
        ));
    }
    patterns.push(format!(r"\bstatic\s+{}\s*=\s*\{{", regex::escape(field)));

    for pattern in patterns {
        let re = Regex::new(&pattern).map_err(|e| ExtractError::Other(e.to_string()))?;
        if let Some(m) = re.find(source) {
            let open = m.end() - 1;
            let close = find_matching(source, open).ok_or_else(|| ExtractError::Unbalanced {
                object: field.to_string(),
            })?;
            return Ok(Some(&source[open + 1..close]));
        }
    }
    Ok(None)
}

fn split_object<'a>(body: &'a str, field: &str) -> Result<Vec<&'a str>, ExtractError> {
    split_top_level(body).ok_or_else(|| ExtractError::Unbalanced {
        object: field.to_string(),
    })
}

/// Split `key: value`, unquoting the key. Spreads and shorthand yield `None`.
fn split_key(code: &str) -> Option<(String, &str)> {
    let code = code.trim();
    if code.starts_with("...") {
        return None;
    }
    let quote = code.chars().next().filter(|c| *c == '\'' || *c == '"');
    if let Some(quote) = quote {
        let end = code[1..].find(quote)? + 1;
        let key = code[1..end].to_string();
        let rest = code[end + 1..].trim_start().strip_prefix(':')?;
        return Some((key, rest.trim()));
    }
    let colon = code.find(':')?;
    let key = code[..colon].trim();
    if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return None;
    }
    Some((key.to_string(), code[colon + 1..].trim()))
}

/// Parse a `PropTypes.*` validator expression into a type and required flag.
fn parse_validator(value: &str) -> Result<(PropType, bool), ExtractError> {
    let expr = compact(value);
    let (expr, required) = match expr.strip_suffix(".isRequired") {
        Some(rest) => (rest.to_string(), true),
        None => (expr, false),
    };
    Ok((parse_type(&expr)?, required))
}

fn parse_type(expr: &str) -> Result<PropType, ExtractError> {
    let Some(validator) = expr
        .strip_prefix("React.PropTypes.")
        .or_else(|| expr.strip_prefix("PropTypes."))
    else {
        return Ok(custom(expr));
    };

    if SIMPLE_TYPES.contains(&validator) {
        return Ok(PropType::named(validator));
    }

    let Some(paren) = validator.find('(') else {
        return Ok(custom(expr));
    };
    if !validator.ends_with(')') || find_matching(validator, paren) != Some(validator.len() - 1)
    {
        return Ok(custom(expr));
    }
    let func = &validator[..paren];
    let args = &validator[paren + 1..validator.len() - 1];

    let value = match func {
        "oneOf" => match array_items(args) {
            Some(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| json!({ "value": item, "computed": is_computed(item) }))
                    .collect(),
            ),
            None => Value::String(args.to_string()),
        },
        "oneOfType" => match array_items(args) {
            Some(items) => {
                let mut types = Vec::new();
                for item in items {
                    types.push(type_to_value(&parse_type(item)?)?);
                }
                Value::Array(types)
            }
            None => Value::String(args.to_string()),
        },
        "arrayOf" | "objectOf" => type_to_value(&parse_type(args)?)?,
        "instanceOf" => Value::String(args.to_string()),
        "shape" | "exact" => match shape_fields(args)? {
            Some(fields) => Value::Object(fields),
            None => Value::String(args.to_string()),
        },
        _ => return Ok(custom(expr)),
    };

    let name = match func {
        "oneOf" => "enum",
        "oneOfType" => "union",
        other => other,
    };
    Ok(PropType {
        name: name.to_string(),
        value: Some(value),
        raw: Some(expr.to_string()),
    })
}

fn custom(expr: &str) -> PropType {
    PropType {
        name: "custom".to_string(),
        value: None,
        raw: Some(expr.to_string()),
    }
}

fn array_items(args: &str) -> Option<Vec<&str>> {
    let inner = args.strip_prefix('[')?.strip_suffix(']')?;
    let items = split_top_level(inner)?;
    Some(items.into_iter().map(str::trim).collect())
}

fn shape_fields(args: &str) -> Result<Option<Map<String, Value>>, ExtractError> {
    let Some(inner) = args.strip_prefix('{').and_then(|a| a.strip_suffix('}')) else {
        return Ok(None);
    };
    let Some(segments) = split_top_level(inner) else {
        return Ok(None);
    };
    let mut fields = Map::new();
    for segment in segments {
        let (doc, code) = take_leading_doc(segment);
        let Some((key, value)) = split_key(code) else {
            continue;
        };
        let (prop_type, required) = parse_validator(value)?;
        let mut field = type_to_value(&prop_type)?;
        if let Value::Object(obj) = &mut field {
            obj.insert("required".to_string(), Value::Bool(required));
            if let Some(doc) = doc {
                obj.insert("description".to_string(), Value::String(doc));
            }
        }
        fields.insert(key, field);
    }
    Ok(Some(fields))
}

fn type_to_value(prop_type: &PropType) -> Result<Value, ExtractError> {
    serde_json::to_value(prop_type).map_err(|e| ExtractError::Other(e.to_string()))
}

fn is_computed(value: &str) -> bool {
    !matches!(value, "true" | "false" | "null") && COMPUTED_VALUE.is_match(value)
}
