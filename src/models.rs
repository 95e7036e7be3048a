use ndarray::{ArrayD, ArrayViewD};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Value type of a `val` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int,
    Float,
    Str,
    Bool,
}

/// Element type of a `csv` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayType {
    Float32,
    Uint8,
}

/// Declared kind of a field together with its subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "subtype", rename_all = "lowercase")]
pub enum FieldType {
    /// `val` fields hold one scalar per record.
    #[serde(rename = "val")]
    Scalar(ScalarType),
    /// `csv` fields hold a dense N-dimensional array per record.
    #[serde(rename = "csv")]
    Array(ArrayType),
}

impl FromStr for ScalarType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "int" => Ok(ScalarType::Int),
            "float" => Ok(ScalarType::Float),
            "str" => Ok(ScalarType::Str),
            "bool" => Ok(ScalarType::Bool),
            other => Err(format!("unknown val subtype '{}'", other)),
        }
    }
}

impl FromStr for ArrayType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "float32" | "np.float32" => Ok(ArrayType::Float32),
            "uint8" | "np.uint8" => Ok(ArrayType::Uint8),
            other => Err(format!("unknown csv subtype '{}'", other)),
        }
    }
}

impl FieldType {
    /// Build a field type from the `kind` and subtype tokens of a header line.
    pub fn from_tags(kind: &str, subtype: &str) -> std::result::Result<Self, String> {
        match kind {
            "val" => subtype.parse().map(FieldType::Scalar),
            "csv" => subtype.parse().map(FieldType::Array),
            other => Err(format!("unknown field kind '{}'", other)),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Str => "str",
            ScalarType::Bool => "bool",
        };
        f.write_str(tag)
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayType::Float32 => f.write_str("float32"),
            ArrayType::Uint8 => f.write_str("uint8"),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(t) => write!(f, "val,{}", t),
            FieldType::Array(t) => write!(f, "csv,{}", t),
        }
    }
}

/// One field declared in the `###` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Zero-based position of the declaration within the header.
    pub position: usize,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType, position: usize) -> Self {
        Self {
            name: name.into(),
            field_type,
            position,
        }
    }

    /// Offset of this field's data line from the `---` line opening a record.
    pub fn line_offset(&self) -> usize {
        self.position + 1
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Float32Array(ArrayD<f32>),
    Uint8Array(ArrayD<u8>),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float32_array(&self) -> Option<&ArrayD<f32>> {
        match self {
            Value::Float32Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_uint8_array(&self) -> Option<&ArrayD<u8>> {
        match self {
            Value::Uint8Array(a) => Some(a),
            _ => None,
        }
    }

    /// Shape of an array value, `None` for scalars.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Value::Float32Array(a) => Some(a.shape()),
            Value::Uint8Array(a) => Some(a.shape()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Float32Array(_) => "float32[]",
            Value::Uint8Array(_) => "uint8[]",
        }
    }
}

/// Label written in place of a non-finite float, which JSON cannot represent.
fn non_finite_label(v: f64) -> &'static str {
    if v.is_nan() {
        "NaN"
    } else if v > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

/// Array element serialization.
trait Element: Copy {
    fn serialize_item<S: Serializer>(self, serializer: S) -> Result<S::Ok, S::Error>;
}

impl Element for f32 {
    fn serialize_item<S: Serializer>(self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_finite() {
            serializer.serialize_f32(self)
        } else {
            serializer.serialize_str(non_finite_label(self.into()))
        }
    }
}

impl Element for u8 {
    fn serialize_item<S: Serializer>(self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self)
    }
}

struct Item<T>(T);

impl<T: Element> Serialize for Item<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize_item(serializer)
    }
}

/// Serializes an array view as nested sequences following its shape.
struct Nested<'a, T>(ArrayViewD<'a, T>);

impl<T: Element> Serialize for Nested<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.ndim() <= 1 {
            return serializer.collect_seq(self.0.iter().map(|&v| Item(v)));
        }
        let mut seq = serializer.serialize_seq(Some(self.0.len_of(ndarray::Axis(0))))?;
        for sub in self.0.outer_iter() {
            seq.serialize_element(&Nested(sub))?;
        }
        seq.end()
    }
}

/// Non-finite floats serialize as the strings `"NaN"`, `"inf"` and `"-inf"`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            Value::Float(v) => serializer.serialize_str(non_finite_label(*v)),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Float32Array(a) => Nested(a.view()).serialize(serializer),
            Value::Uint8Array(a) => Nested(a.view()).serialize(serializer),
        }
    }
}

/// One decoded record: field names mapped to values, in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any earlier value stored under the same name.
    pub fn insert(&mut self, name: String, value: Value) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
