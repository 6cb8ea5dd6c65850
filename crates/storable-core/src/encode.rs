//! JSON encoding for stored values
//!
//! Values are serialized through `Encoder`, a `Serializer` that builds an
//! untyped JSON tree while the value's own `Serialize` impl runs. It records
//! every object-like node in a [`CircularReplacer`] and refuses to nest deeper
//! than [`MAX_DEPTH`], so a value whose `Serialize` impl walks a reference
//! cycle fails with an error instead of exhausting the stack.

use serde::ser::{
    self, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use serde_json::{Error, Map, Value};
use std::any::type_name;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// Deepest nesting of serializer calls accepted for one value
///
/// Anything written within this bound also stays within the parser's
/// recursion limit, so it can be read back.
pub const MAX_DEPTH: usize = 128;

/// Serialize `value` to the text that is handed to the host primitive
pub fn encode_value<T>(value: &T) -> Result<String, Error>
where
    T: Serialize + ?Sized,
{
    let (tree, _) = encode_tree(value)?;
    serde_json::to_string(&tree)
}

fn encode_tree<T>(value: &T) -> Result<(Value, CircularReplacer), Error>
where
    T: Serialize + ?Sized,
{
    let state = EncodeState::default();
    let tree = Encoder { state: &state }.descend(value)?;
    Ok((tree, state.replacer.into_inner()))
}

/// Tracks object-like nodes visited while encoding one value
///
/// Nodes are recorded by identity (address plus Rust type) as the encoder
/// finishes them. A node seen a second time is passed through as is; nothing
/// is ever substituted, so a cycle is only cut short by the depth bound.
#[derive(Debug, Default)]
pub struct CircularReplacer {
    seen: HashSet<(usize, &'static str)>,
}

impl CircularReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node`; returns false if it was already recorded
    pub fn record<T: ?Sized>(&mut self, node: &T) -> bool {
        let address = node as *const T as *const () as usize;
        self.seen.insert((address, type_name::<T>()))
    }

    /// Number of distinct object-like nodes recorded so far
    pub fn tracked(&self) -> usize {
        self.seen.len()
    }
}

#[derive(Default)]
struct EncodeState {
    depth: Cell<usize>,
    replacer: RefCell<CircularReplacer>,
}

/// Serializer producing a `serde_json::Value` under a depth bound
#[derive(Clone, Copy)]
struct Encoder<'a> {
    state: &'a EncodeState,
}

impl Encoder<'_> {
    /// Serialize one nested value, one level deeper than the caller
    fn descend<T>(self, value: &T) -> Result<Value, Error>
    where
        T: Serialize + ?Sized,
    {
        let depth = self.state.depth.get();
        if depth >= MAX_DEPTH {
            return Err(ser::Error::custom(format!(
                "value nests deeper than {} levels",
                MAX_DEPTH
            )));
        }

        self.state.depth.set(depth + 1);
        let result = value.serialize(self);
        self.state.depth.set(depth);

        let tree = result?;
        if matches!(tree, Value::Array(_) | Value::Object(_)) {
            self.state.replacer.borrow_mut().record(value);
        }
        Ok(tree)
    }
}

/// Wrap `inner` as `{variant: inner}` for enum variants
fn tag(variant: Option<&'static str>, inner: Value) -> Value {
    match variant {
        None => inner,
        Some(name) => {
            let mut map = Map::new();
            map.insert(name.to_owned(), inner);
            Value::Object(map)
        }
    }
}

/// JSON object keys are strings; numbers and booleans are written as text
fn object_key(key: Value) -> Result<String, Error> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ser::Error::custom("key must be a string")),
    }
}

impl<'a> Serializer for Encoder<'a> {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SeqEncoder<'a>;
    type SerializeTuple = SeqEncoder<'a>;
    type SerializeTupleStruct = SeqEncoder<'a>;
    type SerializeTupleVariant = SeqEncoder<'a>;
    type SerializeMap = MapEncoder<'a>;
    type SerializeStruct = MapEncoder<'a>;
    type SerializeStructVariant = MapEncoder<'a>;

    fn serialize_bool(self, v: bool) -> Result<Value, Error> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, Error> {
        serde_json::value::Serializer.serialize_i128(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, Error> {
        serde_json::value::Serializer.serialize_u128(v)
    }

    // Non-finite floats become null
    fn serialize_f32(self, v: f32) -> Result<Value, Error> {
        serde_json::value::Serializer.serialize_f32(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Error> {
        serde_json::value::Serializer.serialize_f64(v)
    }

    fn serialize_char(self, v: char) -> Result<Value, Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Error> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, Error> {
        Ok(Value::Array(v.iter().map(|b| Value::from(*b)).collect()))
    }

    fn serialize_none(self) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, Error>
    where
        T: Serialize + ?Sized,
    {
        self.descend(value)
    }

    fn serialize_unit(self) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, Error> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value, Error>
    where
        T: Serialize + ?Sized,
    {
        self.descend(value)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, Error>
    where
        T: Serialize + ?Sized,
    {
        Ok(tag(Some(variant), self.descend(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqEncoder<'a>, Error> {
        Ok(SeqEncoder::new(self, len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqEncoder<'a>, Error> {
        Ok(SeqEncoder::new(self, len, None))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqEncoder<'a>, Error> {
        Ok(SeqEncoder::new(self, len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqEncoder<'a>, Error> {
        Ok(SeqEncoder::new(self, len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapEncoder<'a>, Error> {
        Ok(MapEncoder::new(self, None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<MapEncoder<'a>, Error> {
        Ok(MapEncoder::new(self, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<MapEncoder<'a>, Error> {
        Ok(MapEncoder::new(self, Some(variant)))
    }
}

struct SeqEncoder<'a> {
    encoder: Encoder<'a>,
    items: Vec<Value>,
    variant: Option<&'static str>,
}

impl<'a> SeqEncoder<'a> {
    fn new(encoder: Encoder<'a>, capacity: usize, variant: Option<&'static str>) -> Self {
        Self {
            encoder,
            items: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let item = self.encoder.descend(value)?;
        self.items.push(item);
        Ok(())
    }

    fn finish(self) -> Result<Value, Error> {
        Ok(tag(self.variant, Value::Array(self.items)))
    }
}

impl SerializeSeq for SeqEncoder<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value, Error> {
        self.finish()
    }
}

impl SerializeTuple for SeqEncoder<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value, Error> {
        self.finish()
    }
}

impl SerializeTupleStruct for SeqEncoder<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value, Error> {
        self.finish()
    }
}

impl SerializeTupleVariant for SeqEncoder<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value, Error> {
        self.finish()
    }
}

struct MapEncoder<'a> {
    encoder: Encoder<'a>,
    map: Map<String, Value>,
    pending_key: Option<String>,
    variant: Option<&'static str>,
}

impl<'a> MapEncoder<'a> {
    fn new(encoder: Encoder<'a>, variant: Option<&'static str>) -> Self {
        Self {
            encoder,
            map: Map::new(),
            pending_key: None,
            variant,
        }
    }

    fn insert<T>(&mut self, key: String, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let item = self.encoder.descend(value)?;
        self.map.insert(key, item);
        Ok(())
    }

    fn finish(self) -> Result<Value, Error> {
        Ok(tag(self.variant, Value::Object(self.map)))
    }
}

impl SerializeMap for MapEncoder<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let key = self.encoder.descend(key)?;
        self.pending_key = Some(object_key(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let key = self.pending_key.take().ok_or_else(|| {
            <Error as ser::Error>::custom("map value serialized before its key")
        })?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Value, Error> {
        self.finish()
    }
}

impl SerializeStruct for MapEncoder<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Value, Error> {
        self.finish()
    }
}

impl SerializeStructVariant for MapEncoder<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Value, Error> {
        self.finish()
    }
}

/// JavaScript-style truthiness of a decoded value
///
/// `null`, `false`, `0` and the empty string are falsy; arrays and objects
/// are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
