//! Helpers for projecting serializable values to and from JSON.
//!
//! Typed getters validate the JSON type of a value and fail with [Error::JsonType] (or
//! [Error::MissingKey] for absent object members) instead of substituting defaults.

use crate::{Error, Serializable};
use serde_json::Value;

/// Parses a JSON document.
pub fn parse(text: &str) -> Result<Value, Error> {
    Ok(serde_json::from_str(text)?)
}

/// Returns the name of the JSON type of `value`.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(false) => "False",
        Value::Bool(true) => "True",
        Value::Object(_) => "Object",
        Value::Array(_) => "Array",
        Value::String(_) => "String",
        Value::Number(_) => "Number",
    }
}

fn mismatch(expected: &'static str, value: &Value) -> Error {
    Error::JsonType {
        expected,
        found: type_name(value),
    }
}

/// Returns true if `value` is an object with a member named `key`.
pub fn has_member(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|object| object.contains_key(key))
}

/// Returns the member `key` of a JSON object.
pub fn get_json_value<'a>(value: &'a Value, key: &str) -> Result<&'a Value, Error> {
    let object = value.as_object().ok_or_else(|| mismatch("object", value))?;
    object
        .get(key)
        .ok_or_else(|| Error::MissingKey(key.to_string()))
}

pub fn get_json_string(value: &Value) -> Result<&str, Error> {
    value.as_str().ok_or_else(|| mismatch("string", value))
}

pub fn get_json_string_key<'a>(value: &'a Value, key: &str) -> Result<&'a str, Error> {
    get_json_string(get_json_value(value, key)?)
}

pub fn get_json_bool(value: &Value) -> Result<bool, Error> {
    value.as_bool().ok_or_else(|| mismatch("bool", value))
}

pub fn get_json_bool_key(value: &Value, key: &str) -> Result<bool, Error> {
    get_json_bool(get_json_value(value, key)?)
}

pub fn get_json_u64(value: &Value) -> Result<u64, Error> {
    value.as_u64().ok_or_else(|| mismatch("u64", value))
}

pub fn get_json_u64_key(value: &Value, key: &str) -> Result<u64, Error> {
    get_json_u64(get_json_value(value, key)?)
}

pub fn get_json_u32(value: &Value) -> Result<u32, Error> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| mismatch("u32", value))
}

pub fn get_json_u32_key(value: &Value, key: &str) -> Result<u32, Error> {
    get_json_u32(get_json_value(value, key)?)
}

pub fn get_json_i64(value: &Value) -> Result<i64, Error> {
    value.as_i64().ok_or_else(|| mismatch("i64", value))
}

pub fn get_json_i64_key(value: &Value, key: &str) -> Result<i64, Error> {
    get_json_i64(get_json_value(value, key)?)
}

pub fn get_json_array(value: &Value) -> Result<&Vec<Value>, Error> {
    value.as_array().ok_or_else(|| mismatch("array", value))
}

pub fn get_json_array_key<'a>(value: &'a Value, key: &str) -> Result<&'a Vec<Value>, Error> {
    get_json_array(get_json_value(value, key)?)
}

/// Projects each value into a JSON array.
pub fn to_json_vec<T: Serializable>(values: &[T]) -> Value {
    Value::Array(values.iter().map(Serializable::to_json).collect())
}

/// Loads each element of a JSON array.
pub fn from_json_vec<T: Serializable>(value: &Value) -> Result<Vec<T>, Error> {
    get_json_array(value)?.iter().map(T::from_json).collect()
}

/// Projects nested lists into a JSON array of arrays.
pub fn to_json_vec_vec<T: Serializable>(values: &[Vec<T>]) -> Value {
    Value::Array(values.iter().map(|inner| to_json_vec(inner)).collect())
}

/// Loads a JSON array of arrays.
pub fn from_json_vec_vec<T: Serializable>(value: &Value) -> Result<Vec<Vec<T>>, Error> {
    get_json_array(value)?.iter().map(from_json_vec).collect()
}
