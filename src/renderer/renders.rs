use tracing::{trace, warn};

use crate::config::UnsupportedPolicy;
use crate::error::{DumpError, DumpResult};
use crate::renderer::components::*;
use crate::renderer::traits::*;
use crate::value::*;

/// Renders whatever `value` hands to its visitor at `context.depth`
pub fn render_inspect(value: &dyn Inspect, context: &RenderContext<'_>) -> DumpResult<String> {
    let mut rendered = Ok(String::new());
    value.inspect(&mut |v| rendered = v.render(context));
    rendered
}

impl Render for Value<'_> {
    fn render(&self, context: &RenderContext<'_>) -> DumpResult<String> {
        if let Some(limit) = context.config.max_depth {
            if context.depth > limit {
                return Err(DumpError::DepthLimit { limit });
            }
        }

        trace!(kind = ?self.kind(), depth = context.depth, "rendering value");

        let indent = context.indent();
        match self {
            Value::Bool(b) => Ok(format!("{}(bool) {}", indent, b)),
            Value::Int(int) => Ok(format!("{}({}) {}", indent, int.type_name(), int)),
            Value::Float(float) => Ok(format!("{}({}) {}", indent, float.type_name(), float)),
            Value::Complex(complex) => Ok(format!(
                "{}({}) {}",
                indent,
                complex.type_name(),
                complex
            )),
            // Raw text, byte length: control characters pass through as-is
            Value::Str(s) => Ok(format!("{}(string: {}) \"{}\"", indent, s.len(), s)),
            Value::Record(record) => record.render(context),
            Value::Sequence(sequence) => sequence.render(context),
            Value::Map(map) => map.render(context),
            Value::Reference(reference) => reference.render(context),
            Value::Nil(type_name) => Ok(format!("{}({}) <nil>", indent, type_name)),
            Value::Channel(channel) => channel.render(context),
            Value::Unsupported(type_name) => match context.config.unsupported {
                UnsupportedPolicy::Fail => Err(DumpError::unsupported(type_name.clone())),
                UnsupportedPolicy::Omit => {
                    warn!(type_name = %type_name, "omitting value of unsupported kind");
                    Ok(String::new())
                }
            },
        }
    }
}

impl Record<'_> {
    /// Renders the record, marking the type name when reached through a reference
    pub fn render_through(
        &self,
        context: &RenderContext<'_>,
        via_reference: bool,
    ) -> DumpResult<String> {
        let mut output = String::new();
        let indent = context.indent();
        let field_context = context.nested();
        let field_indent = field_context.indent();

        // Open curly brace
        let marker = if via_reference { "*" } else { "" };
        output.push_str(&format!("{}record({}{}) {{\n", indent, marker, self.type_name));

        // Fields in declaration order
        for field in &self.fields {
            let Some(name) =
                FieldNameRenderer::marker(&field.name, field.visibility, context.config.visibility)
            else {
                continue;
            };
            output.push_str(&format!("{}{}\n", field_indent, name));
            output.push_str(&render_inspect(field.value, &field_context)?);
            output.push('\n');
        }

        // Close curly brace
        output.push_str(&format!("{}}}", indent));
        Ok(output)
    }
}

impl Render for Record<'_> {
    fn render(&self, context: &RenderContext<'_>) -> DumpResult<String> {
        self.render_through(context, false)
    }
}

impl Render for Sequence<'_> {
    fn render(&self, context: &RenderContext<'_>) -> DumpResult<String> {
        let mut output = String::new();
        let indent = context.indent();
        let element_context = context.nested();
        let element_indent = element_context.indent();

        output.push_str(&format!(
            "{}sequence({}: {}: {}) {{\n",
            indent, self.element_type, self.len, self.capacity
        ));

        for (i, element) in self.elements.iter().enumerate() {
            output.push_str(&format!("{}[{}] =>\n", element_indent, i));
            output.push_str(&render_inspect(*element, &element_context)?);
            output.push('\n');
        }

        output.push_str(&format!("{}}}", indent));
        Ok(output)
    }
}

impl Render for Map<'_> {
    fn render(&self, context: &RenderContext<'_>) -> DumpResult<String> {
        let mut output = String::new();
        let indent = context.indent();
        let entry_context = context.nested();
        let entry_indent = entry_context.indent();

        output.push_str(&format!(
            "{}map[{}]{}{{\n",
            indent, self.key_type, self.value_type
        ));

        // Entries come in the storage's own iteration order
        for (key, value) in &self.entries {
            output.push_str(&format!(
                "{}[{}] =>\n",
                entry_indent,
                KeyTextRenderer::key_text(*key, &entry_context)?
            ));
            output.push_str(&render_inspect(*value, &entry_context)?);
            output.push('\n');
        }

        output.push_str(&format!("{}}}", indent));
        Ok(output)
    }
}

impl Render for Reference<'_> {
    fn render(&self, context: &RenderContext<'_>) -> DumpResult<String> {
        let key = self.key();
        if context.config.cycle_guard && context.is_open(&key) {
            warn!(type_name = %self.type_name, depth = context.depth, "truncating reference cycle");
            return Ok(format!("{}({}) <cycle>", context.indent(), self.type_name));
        }

        let open = context.open_reference(key);
        let inner_context = context.entering(&open);

        // Dereferencing does not add a nesting level
        let mut rendered = Ok(String::new());
        self.target.inspect(&mut |value| {
            rendered = match &value {
                Value::Record(record) => record.render_through(&inner_context, true),
                other => other.render(&inner_context),
            };
        });
        rendered
    }
}

impl Render for Channel {
    fn render(&self, context: &RenderContext<'_>) -> DumpResult<String> {
        let capacity = match self.capacity {
            Some(capacity) => capacity.to_string(),
            None => "unbounded".to_string(),
        };
        Ok(format!(
            "{}({}: {}: {}) {}",
            context.indent(),
            self.type_name,
            self.len,
            capacity,
            self.description
        ))
    }
}
