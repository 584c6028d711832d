use std::borrow::Cow;
use std::fmt;

use crate::value::inspect::Inspect;

/// Coarse runtime category of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    SignedInt,
    UnsignedInt,
    Float,
    Complex,
    Str,
    Record,
    Sequence,
    Map,
    Reference,
    Channel,
    Unsupported,
}

/// One inspected value, borrowing its nested parts from the inspected object
pub enum Value<'a> {
    Bool(bool),
    Int(Integer),
    Float(Float),
    Complex(ComplexNumber),
    Str(&'a str),
    Record(Record<'a>),
    Sequence(Sequence<'a>),
    Map(Map<'a>),
    Reference(Reference<'a>),
    /// Empty reference; carries the type name of the reference itself
    Nil(String),
    Channel(Channel),
    /// Carries the type name of the value that could not be rendered
    Unsupported(String),
}

impl Value<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(int) if int.is_signed() => Kind::SignedInt,
            Value::Int(_) => Kind::UnsignedInt,
            Value::Float(_) => Kind::Float,
            Value::Complex(_) => Kind::Complex,
            Value::Str(_) => Kind::Str,
            Value::Record(_) => Kind::Record,
            Value::Sequence(_) => Kind::Sequence,
            Value::Map(_) => Kind::Map,
            Value::Reference(_) | Value::Nil(_) => Kind::Reference,
            Value::Channel(_) => Kind::Channel,
            Value::Unsupported(_) => Kind::Unsupported,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
}

impl Integer {
    pub fn type_name(&self) -> &'static str {
        match self {
            Integer::I8(_) => "i8",
            Integer::I16(_) => "i16",
            Integer::I32(_) => "i32",
            Integer::I64(_) => "i64",
            Integer::I128(_) => "i128",
            Integer::Isize(_) => "isize",
            Integer::U8(_) => "u8",
            Integer::U16(_) => "u16",
            Integer::U32(_) => "u32",
            Integer::U64(_) => "u64",
            Integer::U128(_) => "u128",
            Integer::Usize(_) => "usize",
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Integer::I8(_)
                | Integer::I16(_)
                | Integer::I32(_)
                | Integer::I64(_)
                | Integer::I128(_)
                | Integer::Isize(_)
        )
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::I8(v) => write!(f, "{}", v),
            Integer::I16(v) => write!(f, "{}", v),
            Integer::I32(v) => write!(f, "{}", v),
            Integer::I64(v) => write!(f, "{}", v),
            Integer::I128(v) => write!(f, "{}", v),
            Integer::Isize(v) => write!(f, "{}", v),
            Integer::U8(v) => write!(f, "{}", v),
            Integer::U16(v) => write!(f, "{}", v),
            Integer::U32(v) => write!(f, "{}", v),
            Integer::U64(v) => write!(f, "{}", v),
            Integer::U128(v) => write!(f, "{}", v),
            Integer::Usize(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    pub fn type_name(&self) -> &'static str {
        match self {
            Float::F32(_) => "f32",
            Float::F64(_) => "f64",
        }
    }
}

// `Display` for floats is already the shortest round-trip decimal and never
// switches to exponent notation.
impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Float::F32(v) => write!(f, "{}", v),
            Float::F64(v) => write!(f, "{}", v),
        }
    }
}

/// A complex number as a real/imaginary pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComplexNumber {
    C32(Complex<f32>),
    C64(Complex<f64>),
}

impl ComplexNumber {
    pub fn type_name(&self) -> &'static str {
        match self {
            ComplexNumber::C32(_) => "Complex<f32>",
            ComplexNumber::C64(_) => "Complex<f64>",
        }
    }
}

impl fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a strictly positive imaginary part gets an explicit `+`;
        // otherwise the number's own sign (if any) follows the real part.
        match self {
            ComplexNumber::C32(c) => {
                let sign = if c.im > 0.0 { "+" } else { "" };
                write!(f, "({}{}{}i)", c.re, sign, c.im)
            }
            ComplexNumber::C64(c) => {
                let sign = if c.im > 0.0 { "+" } else { "" };
                write!(f, "({}{}{}i)", c.re, sign, c.im)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVisibility {
    Exported,
    Unexported,
}

pub struct Field<'a> {
    pub name: Cow<'static, str>,
    pub visibility: FieldVisibility,
    pub value: &'a dyn Inspect,
}

/// A struct-like value with named fields in declaration order
pub struct Record<'a> {
    pub type_name: String,
    pub fields: Vec<Field<'a>>,
}

impl<'a> Record<'a> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds an externally visible field
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, value: &'a dyn Inspect) -> Self {
        self.fields.push(Field {
            name: name.into(),
            visibility: FieldVisibility::Exported,
            value,
        });
        self
    }

    /// Adds an access-restricted field
    pub fn private_field(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: &'a dyn Inspect,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            visibility: FieldVisibility::Unexported,
            value,
        });
        self
    }
}

pub struct Sequence<'a> {
    pub element_type: String,
    pub len: usize,
    pub capacity: usize,
    pub elements: Vec<&'a dyn Inspect>,
}

impl<'a> Sequence<'a> {
    /// A sequence whose storage has no capacity distinct from its length
    pub fn new(element_type: impl Into<String>, elements: Vec<&'a dyn Inspect>) -> Self {
        let len = elements.len();
        Self::with_capacity(element_type, len, elements)
    }

    pub fn with_capacity(
        element_type: impl Into<String>,
        capacity: usize,
        elements: Vec<&'a dyn Inspect>,
    ) -> Self {
        Self {
            element_type: element_type.into(),
            len: elements.len(),
            capacity,
            elements,
        }
    }
}

pub struct Map<'a> {
    pub key_type: String,
    pub value_type: String,
    pub entries: Vec<(&'a dyn Inspect, &'a dyn Inspect)>,
}

impl<'a> Map<'a> {
    pub fn new(
        key_type: impl Into<String>,
        value_type: impl Into<String>,
        entries: Vec<(&'a dyn Inspect, &'a dyn Inspect)>,
    ) -> Self {
        Self {
            key_type: key_type.into(),
            value_type: value_type.into(),
            entries,
        }
    }
}

/// Identity of a reference: the pointee address plus the pointee type name.
///
/// The type name keeps a struct and its first field apart even though they
/// share an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    pub address: usize,
    pub pointee_type: String,
}

/// A pointer-like value with an identity
pub struct Reference<'a> {
    pub type_name: String,
    pub pointee_type: String,
    pub address: usize,
    pub target: &'a dyn Inspect,
}

impl<'a> Reference<'a> {
    pub fn new(
        type_name: impl Into<String>,
        pointee_type: impl Into<String>,
        address: usize,
        target: &'a dyn Inspect,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            pointee_type: pointee_type.into(),
            address,
            target,
        }
    }

    pub fn key(&self) -> ReferenceKey {
        ReferenceKey {
            address: self.address,
            pointee_type: self.pointee_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub type_name: String,
    pub len: usize,
    /// `None` for unbounded channels
    pub capacity: Option<usize>,
    pub description: String,
}
