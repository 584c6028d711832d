//! Bridge from `serde_json` documents into inspectable values.

use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::renderer::components::type_name;
use crate::value::inspect::{Inspect, Visit};
use crate::value::types::{Float, Integer, Map, Value};

impl Inspect for JsonValue {
    fn inspect(&self, visit: &mut Visit<'_>) {
        match self {
            JsonValue::Null => visit(Value::Nil(type_name::<Self>())),
            JsonValue::Bool(b) => visit(Value::Bool(*b)),
            JsonValue::Number(number) => number.inspect(visit),
            JsonValue::String(s) => visit(Value::Str(s)),
            JsonValue::Array(elements) => elements.inspect(visit),
            JsonValue::Object(object) => object.inspect(visit),
        }
    }
}

impl Inspect for Number {
    fn inspect(&self, visit: &mut Visit<'_>) {
        if let Some(i) = self.as_i64() {
            visit(Value::Int(Integer::I64(i)));
        } else if let Some(u) = self.as_u64() {
            visit(Value::Int(Integer::U64(u)));
        } else if let Some(f) = self.as_f64() {
            visit(Value::Float(Float::F64(f)));
        } else {
            visit(Value::Unsupported(type_name::<Self>()));
        }
    }
}

impl Inspect for JsonMap<String, JsonValue> {
    fn inspect(&self, visit: &mut Visit<'_>) {
        let entries = self
            .iter()
            .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
            .collect();
        visit(Value::Map(Map::new(
            type_name::<String>(),
            type_name::<JsonValue>(),
            entries,
        )));
    }
}
