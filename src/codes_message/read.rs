use std::fmt::Debug;

use ndarray::Array2;

use crate::{
    codes_message::CodesMessage,
    errors::CodesError,
    intermediate_bindings::{
        codes_get_bytes, codes_get_double, codes_get_double_array, codes_get_long,
        codes_get_long_array, codes_get_native_type, codes_get_size, codes_get_string,
    },
};

/// Capacity of the buffer used to read string keys.
/// Values that do not fit make ecCodes return
/// [`CodesBufferTooSmall`](crate::errors::CodesInternal::CodesBufferTooSmall).
pub const TEXT_BUFFER_CAPACITY: usize = 1024;

/// Capacity of the buffer used to read bytes keys.
pub const BYTES_BUFFER_CAPACITY: usize = 1024;

/// Native type of a key as reported by ecCodes.
///
/// Resolved again on every access, the same key can have a different type
/// in a different message.
#[derive(Copy, Eq, PartialEq, Clone, Ord, PartialOrd, Hash, Debug)]
pub enum NativeKeyType {
    #[allow(missing_docs)]
    Integer,
    #[allow(missing_docs)]
    Real,
    #[allow(missing_docs)]
    Text,
    #[allow(missing_docs)]
    Bytes,
    /// Key is present but has no value
    Missing,
    /// Undefined, section and label keys
    Unsupported,
}

impl NativeKeyType {
    pub(crate) fn from_raw(raw_type: i32) -> Self {
        let Ok(raw_type) = u32::try_from(raw_type) else {
            return NativeKeyType::Unsupported;
        };

        match raw_type {
            eccodes_sys::CODES_TYPE_LONG => NativeKeyType::Integer,
            eccodes_sys::CODES_TYPE_DOUBLE => NativeKeyType::Real,
            eccodes_sys::CODES_TYPE_STRING => NativeKeyType::Text,
            eccodes_sys::CODES_TYPE_BYTES => NativeKeyType::Bytes,
            eccodes_sys::CODES_TYPE_MISSING => NativeKeyType::Missing,
            _ => NativeKeyType::Unsupported,
        }
    }
}

/// Enum representing the value of a key read with [`read_key_dynamic()`](CodesMessage::read_key_dynamic)
/// and written with [`write_key_dynamic()`](CodesMessage::write_key_dynamic).
///
/// Messages inside GRIB files can contain arbitrary keys set by the file author.
/// The type of a given key is only known at runtime (after being checked).
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum DynamicKeyType {
    Float(f64),
    Int(i64),
    FloatArray(Vec<f64>),
    IntArray(Vec<i64>),
    /// Data values reshaped into a 2D grid, only returned for the `values` key
    Grid(Array2<f64>),
    Str(String),
    Bytes(Vec<u8>),
}

/// Provides GRIB key reading capabilites with static types.
pub trait KeyRead<T> {
    /// Tries to read a key of given name from [`CodesMessage`]. This function checks if key native type
    /// matches the requested type (ie. you cannot read integer as string, or array as a number).
    ///
    /// # Example
    ///
    /// ```no_run
    ///  # use grib_message::{BufMessage, KeyRead};
    ///  # fn main() -> anyhow::Result<()> {
    ///  let message = BufMessage::new_from_sample("regular_ll_sfc_grib2")?;
    ///  let ni: i64 = message.read_key("Ni")?;
    ///  let short_name: String = message.read_key("shortName")?;
    ///  # Ok(())
    ///  # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`WrongRequestedKeySize`](CodesError::WrongRequestedKeySize) when trying to read array as integer.
    ///
    /// Returns [`WrongRequestedKeyType`](CodesError::WrongRequestedKeyType) when trying to read key in non-native type.
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when one of internal ecCodes functions to read the key fails.
    fn read_key(&self, name: &str) -> Result<T, CodesError>;

    /// Skips all the checks provided by [`read_key()`](KeyRead::read_key) and directly calls ecCodes,
    /// which may convert between types.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes fails to read the key.
    fn read_key_unchecked(&self, name: &str) -> Result<T, CodesError>;
}

macro_rules! impl_key_read {
    ($ec_func:ident, $key_type:expr, $gen_type:ty, scalar) => {
        impl<P: Debug> KeyRead<$gen_type> for CodesMessage<P> {
            fn read_key_unchecked(&self, name: &str) -> Result<$gen_type, CodesError> {
                unsafe { $ec_func(self.live_handle()?, name) }
            }

            fn read_key(&self, name: &str) -> Result<$gen_type, CodesError> {
                if self.native_type(name)? != $key_type {
                    return Err(CodesError::WrongRequestedKeyType);
                }

                if self.key_size(name)? != 1 {
                    return Err(CodesError::WrongRequestedKeySize);
                }

                self.read_key_unchecked(name)
            }
        }
    };
    ($ec_func:ident, $key_type:expr, $gen_type:ty) => {
        impl<P: Debug> KeyRead<$gen_type> for CodesMessage<P> {
            fn read_key_unchecked(&self, name: &str) -> Result<$gen_type, CodesError> {
                unsafe { $ec_func(self.live_handle()?, name) }
            }

            fn read_key(&self, name: &str) -> Result<$gen_type, CodesError> {
                if self.native_type(name)? != $key_type {
                    return Err(CodesError::WrongRequestedKeyType);
                }

                self.read_key_unchecked(name)
            }
        }
    };
}

impl_key_read!(codes_get_long, NativeKeyType::Integer, i64, scalar);
impl_key_read!(codes_get_double, NativeKeyType::Real, f64, scalar);
impl_key_read!(codes_get_string, NativeKeyType::Text, String);
impl_key_read!(codes_get_bytes, NativeKeyType::Bytes, Vec<u8>);
impl_key_read!(codes_get_long_array, NativeKeyType::Integer, Vec<i64>);
impl_key_read!(codes_get_double_array, NativeKeyType::Real, Vec<f64>);

impl<P: Debug> CodesMessage<P> {
    /// Returns the native type of the key as reported by ecCodes.
    ///
    /// # Errors
    ///
    /// Returns [`CodesNotFound`](crate::errors::CodesInternal::CodesNotFound)
    /// when a key of given name has not been found in the message.
    pub fn native_type(&self, name: &str) -> Result<NativeKeyType, CodesError> {
        unsafe { codes_get_native_type(self.live_handle()?, name) }
    }

    /// Returns the number of elements of the key.
    ///
    /// # Errors
    ///
    /// Returns [`CodesNotFound`](crate::errors::CodesInternal::CodesNotFound)
    /// when a key of given name has not been found in the message.
    pub fn key_size(&self, name: &str) -> Result<usize, CodesError> {
        unsafe { codes_get_size(self.live_handle()?, name) }
    }

    /// Reads a key in its native type and returns it as [`DynamicKeyType`].
    ///
    /// Keys with exactly one element are returned as scalars, all other sizes
    /// (including zero) as arrays. The `values` key is the only exception:
    /// it is always reshaped into [`DynamicKeyType::Grid`] using the orientation
    /// described by [`GridOrientation`](crate::GridOrientation).
    /// Integer arrays are never reshaped.
    ///
    /// String and bytes keys are read into buffers of [`TEXT_BUFFER_CAPACITY`] and
    /// [`BYTES_BUFFER_CAPACITY`] bytes. Longer values are reported as an error,
    /// never truncated.
    ///
    /// # Example
    ///
    /// ```no_run
    ///  # use grib_message::{BufMessage, DynamicKeyType};
    ///  # fn main() -> anyhow::Result<()> {
    ///  let message = BufMessage::new_from_sample("regular_ll_sfc_grib2")?;
    ///
    ///  if let DynamicKeyType::Grid(values) = message.read_key_dynamic("values")? {
    ///      println!("grid of shape {:?}", values.shape());
    ///  }
    ///  # Ok(())
    ///  # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CodesNotFound`](crate::errors::CodesInternal::CodesNotFound)
    /// when a key of given name has not been found in the message.
    ///
    /// Returns [`CodesError::UnsupportedKeyType`] when the key has missing or unsupported native type.
    ///
    /// Returns [`CodesError::ShapeMismatch`] when the `values` key does not fit the `Ni * Nj` grid.
    ///
    /// Returns [`CodesError::Utf8`] when the string returned by ecCodes is not valid UTF-8.
    pub fn read_key_dynamic(&self, name: &str) -> Result<DynamicKeyType, CodesError> {
        let handle = self.live_handle()?;
        let native_type = self.native_type(name)?;

        let value = match native_type {
            NativeKeyType::Text => DynamicKeyType::Str(unsafe { codes_get_string(handle, name)? }),
            NativeKeyType::Real => {
                if name == "values" {
                    let values = unsafe { codes_get_double_array(handle, name)? };
                    let orientation = self.grid_orientation()?;

                    DynamicKeyType::Grid(orientation.reshape(values)?)
                } else if self.key_size(name)? == 1 {
                    DynamicKeyType::Float(unsafe { codes_get_double(handle, name)? })
                } else {
                    DynamicKeyType::FloatArray(unsafe { codes_get_double_array(handle, name)? })
                }
            }
            NativeKeyType::Integer => {
                if self.key_size(name)? == 1 {
                    DynamicKeyType::Int(unsafe { codes_get_long(handle, name)? })
                } else {
                    DynamicKeyType::IntArray(unsafe { codes_get_long_array(handle, name)? })
                }
            }
            NativeKeyType::Bytes => DynamicKeyType::Bytes(unsafe { codes_get_bytes(handle, name)? }),
            NativeKeyType::Missing | NativeKeyType::Unsupported => {
                return Err(CodesError::UnsupportedKeyType {
                    key: name.to_owned(),
                    native_type,
                })
            }
        };

        Ok(value)
    }

    /// Checks whether a key can be read from the message.
    ///
    /// Any failure while reading is reported as absence, so a key that exists
    /// but cannot be read (eg. unsupported type) also returns `false`.
    #[must_use]
    pub fn has_key(&self, name: &str) -> bool {
        self.read_key_dynamic(name).is_ok()
    }
}
