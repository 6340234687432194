//! Positional call arguments
//!
//! Handlers check the argument list up front and reject it with
//! `Error::TypeError` before converting anything:
//!
//! ```
//! use cvbridge_core::{CallArgs, ExternalValue};
//!
//! let args = CallArgs::from(vec![ExternalValue::from("in.png")]);
//! const EXPECTED: &str = "expected a filename string";
//! args.require(1, EXPECTED).unwrap();
//! assert_eq!(args.expect_string(0, EXPECTED).unwrap(), "in.png");
//! assert_eq!(args.number_or(1, 1.0), 1.0);
//! ```

use crate::convert::TypeConverter;
use crate::error::{Error, Result};
use crate::value::ExternalValue;

static UNDEFINED: ExternalValue = ExternalValue::Undefined;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    values: Vec<ExternalValue>,
}

impl CallArgs {
    pub fn new(values: Vec<ExternalValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument at `index`, `Undefined` past the end
    pub fn get(&self, index: usize) -> &ExternalValue {
        self.values.get(index).unwrap_or(&UNDEFINED)
    }

    /// Fail unless at least `min` arguments were passed
    pub fn require(&self, min: usize, expectation: &str) -> Result<()> {
        if self.values.len() < min {
            return Err(Error::TypeError(expectation.to_string()));
        }
        Ok(())
    }

    pub fn expect_object(&self, index: usize, expectation: &str) -> Result<&ExternalValue> {
        let value = self.get(index);
        if !value.is_object() {
            return Err(Error::TypeError(expectation.to_string()));
        }
        Ok(value)
    }

    pub fn expect_string(&self, index: usize, expectation: &str) -> Result<&str> {
        self.get(index)
            .as_str()
            .ok_or_else(|| Error::TypeError(expectation.to_string()))
    }

    pub fn expect_number(&self, index: usize, expectation: &str) -> Result<f64> {
        self.get(index)
            .as_f64()
            .ok_or_else(|| Error::TypeError(expectation.to_string()))
    }

    /// Numeric argument, or `default` when absent or not a number
    pub fn number_or(&self, index: usize, default: f64) -> f64 {
        self.get(index).as_f64().unwrap_or(default)
    }

    /// Convert the argument at `index`; failures name the argument position
    pub fn convert<T: TypeConverter>(&self, index: usize) -> Result<T> {
        T::from_external(self.get(index)).map_err(|e| e.within(format!("argument {}", index)))
    }
}

impl From<Vec<ExternalValue>> for CallArgs {
    fn from(values: Vec<ExternalValue>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<ExternalValue> for CallArgs {
    fn from_iter<I: IntoIterator<Item = ExternalValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
