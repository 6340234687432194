//! JavaScript value ↔ `ExternalValue` marshaling
//!
//! Buffers are copied in both directions, never shared with the JS heap.
//! Object fields keep the order `Object.keys` reports. Symbols, functions,
//! externals and BigInts have no `ExternalValue` counterpart and are
//! rejected.

use cvbridge_core::{ExternalObject, ExternalValue};
use napi::{Env, JsBuffer, JsObject, JsString, JsUnknown, Status, ValueType};

/// Convert a JS value into an `ExternalValue`
pub fn js_to_external(value: JsUnknown) -> napi::Result<ExternalValue> {
    match value.get_type()? {
        ValueType::Undefined => Ok(ExternalValue::Undefined),
        ValueType::Null => Ok(ExternalValue::Null),
        ValueType::Boolean => Ok(ExternalValue::Bool(value.coerce_to_bool()?.get_value()?)),
        ValueType::Number => Ok(ExternalValue::Number(value.coerce_to_number()?.get_double()?)),
        ValueType::String => Ok(ExternalValue::String(
            value.coerce_to_string()?.into_utf8()?.into_owned()?,
        )),
        ValueType::Object => object_to_external(value),
        other => Err(napi::Error::new(
            Status::InvalidArg,
            format!("cannot pass a JS {:?} value to a native function", other),
        )),
    }
}

fn object_to_external(value: JsUnknown) -> napi::Result<ExternalValue> {
    if value.is_buffer()? {
        // SAFETY: is_buffer checked above
        let buffer: JsBuffer = unsafe { value.cast() };
        return Ok(ExternalValue::Buffer(buffer.into_value()?.to_vec()));
    }

    // SAFETY: get_type reported Object
    let object: JsObject = unsafe { value.cast() };

    if object.is_array()? {
        let len = object.get_array_length()?;
        let mut items = Vec::with_capacity(len as usize);
        for index in 0..len {
            items.push(js_to_external(object.get_element::<JsUnknown>(index)?)?);
        }
        return Ok(ExternalValue::Array(items));
    }

    let names = object.get_property_names()?;
    let len = names.get_array_length()?;
    let mut fields = ExternalObject::with_capacity(len as usize);
    for index in 0..len {
        let key = names.get_element::<JsString>(index)?.into_utf8()?.into_owned()?;
        let field = object.get_named_property::<JsUnknown>(&key)?;
        fields.insert(key, js_to_external(field)?);
    }
    Ok(ExternalValue::Object(fields))
}

/// Build the JS value for an `ExternalValue`
pub fn external_to_js(env: &Env, value: &ExternalValue) -> napi::Result<JsUnknown> {
    match value {
        ExternalValue::Undefined => Ok(env.get_undefined()?.into_unknown()),
        ExternalValue::Null => Ok(env.get_null()?.into_unknown()),
        ExternalValue::Bool(b) => Ok(env.get_boolean(*b)?.into_unknown()),
        ExternalValue::Number(n) => Ok(env.create_double(*n)?.into_unknown()),
        ExternalValue::String(s) => Ok(env.create_string(s)?.into_unknown()),
        ExternalValue::Array(items) => {
            let mut array = env.create_array_with_length(items.len())?;
            for (index, item) in items.iter().enumerate() {
                array.set_element(index as u32, external_to_js(env, item)?)?;
            }
            Ok(array.into_unknown())
        }
        ExternalValue::Object(fields) => {
            let mut object = env.create_object()?;
            for (key, field) in fields.iter() {
                object.set_named_property(key, external_to_js(env, field)?)?;
            }
            Ok(object.into_unknown())
        }
        ExternalValue::Buffer(bytes) => Ok(env
            .create_buffer_with_data(bytes.clone())?
            .into_raw()
            .into_unknown()),
    }
}
