use std::{fmt::Debug, path::Path};

use bytes::Bytes;

use crate::{
    codes_message::{CodesMessage, DynamicKeyType},
    errors::CodesError,
    intermediate_bindings::{
        codes_get_message, codes_set_bytes, codes_set_double, codes_set_double_array,
        codes_set_long, codes_set_long_array, codes_set_string, codes_set_string_array,
        codes_write_message,
    },
};

/// Provides GRIB key writing capabilites. Implemented by [`CodesMessage`] for all possible key types.
///
/// The ecCodes function is selected by the type of written value,
/// not by the type the key had before.
pub trait KeyWrite<T> {
    /// Writes key with given name and value to [`CodesMessage`] overwriting existing value, unless
    /// the key is read-only. This function directly calls ecCodes ensuring only type and memory safety.
    ///
    /// # Example
    ///
    /// ```no_run
    ///  # use grib_message::{BufMessage, KeyWrite};
    ///  # fn main() -> anyhow::Result<()> {
    ///  let mut message = BufMessage::new_from_sample("regular_ll_sfc_grib2")?;
    ///  message.write_key("level", 850)?.write_key("shortName", "t")?;
    ///  # Ok(())
    ///  # }
    /// ```
    ///
    /// # Errors
    ///
    /// This function will return [`CodesInternal`](crate::errors::CodesInternal) if ecCodes fails to write the key.
    fn write_key(&mut self, name: &str, value: T) -> Result<&mut Self, CodesError>;
}

macro_rules! impl_key_write {
    ($ec_func:ident, $gen_type:ty) => {
        impl<P: Debug> KeyWrite<$gen_type> for CodesMessage<P> {
            fn write_key(&mut self, name: &str, value: $gen_type) -> Result<&mut Self, CodesError> {
                unsafe {
                    $ec_func(self.live_handle()?, name, value)?;
                }
                Ok(self)
            }
        }
    };
}

impl_key_write!(codes_set_long, i64);
impl_key_write!(codes_set_double, f64);
impl_key_write!(codes_set_long_array, &[i64]);
impl_key_write!(codes_set_double_array, &[f64]);
impl_key_write!(codes_set_bytes, &[u8]);
impl_key_write!(codes_set_string, &str);
impl_key_write!(codes_set_string_array, &[&str]);
impl_key_write!(codes_set_string_array, &[String]);

impl<P: Debug> KeyWrite<&String> for CodesMessage<P> {
    fn write_key(&mut self, name: &str, value: &String) -> Result<&mut Self, CodesError> {
        self.write_key(name, value.as_str())
    }
}

impl<P: Debug> CodesMessage<P> {
    /// Writes a [`DynamicKeyType`] value to the key with given name.
    ///
    /// The ecCodes function is chosen only by the variant of `value`.
    /// A [`Grid`](DynamicKeyType::Grid) is flattened back to the order in which the message stores it
    /// (see [`GridOrientation`](crate::GridOrientation)) and written as a double array.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) if ecCodes fails to write the key.
    ///
    /// Returns [`CodesError::ShapeMismatch`] when a grid does not match the message grid.
    pub fn write_key_dynamic(
        &mut self,
        name: &str,
        value: &DynamicKeyType,
    ) -> Result<&mut Self, CodesError> {
        match value {
            DynamicKeyType::Int(v) => self.write_key(name, *v),
            DynamicKeyType::Float(v) => self.write_key(name, *v),
            DynamicKeyType::Str(v) => self.write_key(name, v.as_str()),
            DynamicKeyType::Bytes(v) => self.write_key(name, v.as_slice()),
            DynamicKeyType::FloatArray(v) => self.write_key(name, v.as_slice()),
            DynamicKeyType::IntArray(v) => self.write_key(name, v.as_slice()),
            DynamicKeyType::Grid(grid) => {
                let flat = self.grid_orientation()?.flatten(grid)?;
                self.write_key(name, flat.as_slice())
            }
        }
    }

    /// Returns a copy of the coded message.
    ///
    /// The bytes can be used to construct a new message with
    /// [`new_from_bytes()`](crate::RefMessage::new_from_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes fails to encode the message.
    pub fn to_raw_bytes(&self) -> Result<Bytes, CodesError> {
        unsafe { codes_get_message(self.live_handle()?) }
    }

    /// Writes the message to a file at provided path.
    ///
    /// `mode` is passed to ecCodes as-is and follows `fopen()` mode strings,
    /// eg. `"w"` to overwrite the file or `"a"` to append the message at its end
    /// (useful when writing mutiple messages to one file).
    ///
    /// # Example
    ///
    /// ```no_run
    ///  # use grib_message::{BufMessage, KeyWrite};
    ///  # fn main() -> anyhow::Result<()> {
    ///  let mut message = BufMessage::new_from_sample("regular_ll_sfc_grib2")?;
    ///  message.write_to_file("./surface.grib", "w")?;
    ///
    ///  message.write_key("level", 2)?;
    ///  message.write_to_file("./surface.grib", "a")?;
    ///  # Ok(())
    ///  # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::NonUtf8Path`] when the path cannot be passed to ecCodes.
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal)
    /// when internal ecCodes function returns non-zero code.
    pub fn write_to_file<Q: AsRef<Path>>(&self, file_path: Q, mode: &str) -> Result<(), CodesError> {
        let file_path = file_path
            .as_ref()
            .to_str()
            .ok_or(CodesError::NonUtf8Path)?;

        unsafe { codes_write_message(self.live_handle()?, file_path, mode) }
    }
}
