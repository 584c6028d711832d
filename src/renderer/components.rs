use crate::config::VisibilityMode;
use crate::error::{DumpError, DumpResult};
use crate::renderer::traits::RenderContext;
use crate::value::{FieldVisibility, Inspect, Value};

/// Short, path-free name of `T`, e.g. `Vec<String>` for
/// `alloc::vec::Vec<alloc::string::String>`
pub fn type_name<T: ?Sized>() -> String {
    TypeNameHelper::shorten(std::any::type_name::<T>())
}

/// Helper for rendering type names
pub struct TypeNameHelper;

impl TypeNameHelper {
    /// Strips module paths from every path segment in a full type name
    pub fn shorten(full: &str) -> String {
        let mut output = String::with_capacity(full.len());
        let mut path = String::new();

        for c in full.chars() {
            if Self::is_delimiter(c) {
                output.push_str(Self::last_segment(&path));
                path.clear();
                output.push(c);
            } else {
                path.push(c);
            }
        }
        output.push_str(Self::last_segment(&path));
        output
    }

    fn is_delimiter(c: char) -> bool {
        matches!(
            c,
            '<' | '>' | ',' | ' ' | '[' | ']' | '(' | ')' | ';' | '&' | '*' | '='
        )
    }

    fn last_segment(path: &str) -> &str {
        path.rsplit("::").next().unwrap_or(path)
    }
}

/// Helper for record field marker lines
pub struct FieldNameRenderer;

impl FieldNameRenderer {
    /// The bracketed marker, or `None` when the field is hidden in this mode
    pub fn marker(name: &str, visibility: FieldVisibility, mode: VisibilityMode) -> Option<String> {
        match (visibility, mode) {
            (FieldVisibility::Exported, _) => Some(format!("[{}] =>", name)),
            (FieldVisibility::Unexported, VisibilityMode::CopyPrivate) => {
                Some(format!("[{}:unexported] =>", name))
            }
            (FieldVisibility::Unexported, VisibilityMode::SkipPrivate) => None,
        }
    }
}

/// Helper for the one-line plain text of map keys.
///
/// This is a default textual conversion, not a structured render: records
/// become `{a b}`, sequences `[a b]`, strings print unquoted. It still obeys
/// the visibility mode, the depth limit and the cycle guard of `context`.
pub struct KeyTextRenderer;

impl KeyTextRenderer {
    pub fn key_text(key: &dyn Inspect, context: &RenderContext<'_>) -> DumpResult<String> {
        if let Some(limit) = context.config.max_depth {
            if context.depth > limit {
                return Err(DumpError::DepthLimit { limit });
            }
        }

        let mut text = Ok(String::new());
        key.inspect(&mut |value| text = Self::plain(&value, context));
        text
    }

    fn plain(value: &Value<'_>, context: &RenderContext<'_>) -> DumpResult<String> {
        let text = match value {
            Value::Bool(b) => b.to_string(),
            Value::Int(int) => int.to_string(),
            Value::Float(float) => float.to_string(),
            Value::Complex(complex) => complex.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Record(record) => {
                let inner = context.nested();
                let parts = record
                    .fields
                    .iter()
                    .filter(|f| {
                        f.visibility == FieldVisibility::Exported
                            || context.config.visibility == VisibilityMode::CopyPrivate
                    })
                    .map(|f| Self::key_text(f.value, &inner))
                    .collect::<DumpResult<Vec<_>>>()?;
                format!("{{{}}}", parts.join(" "))
            }
            Value::Sequence(seq) => {
                let inner = context.nested();
                let parts = seq
                    .elements
                    .iter()
                    .map(|e| Self::key_text(*e, &inner))
                    .collect::<DumpResult<Vec<_>>>()?;
                format!("[{}]", parts.join(" "))
            }
            Value::Map(map) => {
                let inner = context.nested();
                let parts = map
                    .entries
                    .iter()
                    .map(|(k, v)| {
                        Ok(format!(
                            "{}:{}",
                            Self::key_text(*k, &inner)?,
                            Self::key_text(*v, &inner)?
                        ))
                    })
                    .collect::<DumpResult<Vec<_>>>()?;
                format!("map[{}]", parts.join(" "))
            }
            Value::Reference(reference) => {
                let key = reference.key();
                if context.config.cycle_guard && context.is_open(&key) {
                    return Ok("<cycle>".to_string());
                }
                let open = context.open_reference(key);
                return Self::key_text(reference.target, &context.entering(&open));
            }
            Value::Nil(_) => "<nil>".to_string(),
            Value::Channel(channel) => channel.description.clone(),
            Value::Unsupported(type_name) => type_name.clone(),
        };
        Ok(text)
    }
}
