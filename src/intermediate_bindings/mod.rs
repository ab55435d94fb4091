#![allow(non_camel_case_types)]

//!Module containing intermediate (type) bindings to ecCodes functions.
//!
//!These bindings convert Rust types to correct C types
//!correctly represent data as pointers and utilize some other functions
//!to make ecCodes usage safer and easier,
//!but they are unsafe as they operate on raw `codes_handle`.
//!
//!Every status code returned by ecCodes goes through [`error_code_to_result`].

mod codes_get;
mod codes_handle;
mod codes_index;
mod codes_set;
mod codes_write;

use num_traits::FromPrimitive;

use crate::errors::{CodesError, CodesInternal};

pub use codes_get::{
    codes_get_bytes, codes_get_double, codes_get_double_array, codes_get_long,
    codes_get_long_array, codes_get_message, codes_get_native_type, codes_get_size,
    codes_get_string, codes_grib_get_data,
};
pub use codes_handle::{
    codes_grib_handle_new_from_multi_message, codes_grib_handle_new_from_samples,
    codes_handle_clone, codes_handle_delete, codes_handle_new_from_file,
    codes_handle_new_from_index, codes_handle_new_from_message,
};
pub use codes_index::{
    codes_index_add_file, codes_index_delete, codes_index_new, codes_index_read,
    codes_index_select_double, codes_index_select_long, codes_index_select_string,
};
pub use codes_set::{
    codes_set_bytes, codes_set_double, codes_set_double_array, codes_set_long,
    codes_set_long_array, codes_set_string, codes_set_string_array,
};
pub use codes_write::codes_write_message;

/// Status returned by ecCodes when there are no more messages in the index.
pub const CODES_END_OF_INDEX: i32 = CodesInternal::CodesEndOfIndex as i32;

/// Status returned by ecCodes when there are no more messages in the file.
pub const CODES_END_OF_FILE: i32 = CodesInternal::CodesEndOfFile as i32;

/// Converts status code returned by ecCodes into `Result`.
/// Codes not present in [`CodesInternal`] are returned as [`CodesError::UnrecognizedStatus`].
pub fn error_code_to_result(error_code: i32) -> Result<(), CodesError> {
    if error_code == 0 {
        return Ok(());
    }

    match CodesInternal::from_i32(error_code) {
        Some(err) => Err(err.into()),
        None => Err(CodesError::UnrecognizedStatus(error_code)),
    }
}

#[cfg(test)]
mod tests {
    use super::error_code_to_result;
    use crate::errors::{CodesError, CodesInternal};

    #[test]
    fn success_is_ok() {
        assert!(error_code_to_result(0).is_ok());
    }

    #[test]
    fn known_status() {
        match error_code_to_result(-3) {
            Err(CodesError::Internal(CodesInternal::CodesBufferTooSmall)) => (),
            other => panic!("Incorrect result: {other:?}"),
        }
    }

    #[test]
    fn unknown_status() {
        match error_code_to_result(-9999) {
            Err(CodesError::UnrecognizedStatus(-9999)) => (),
            other => panic!("Incorrect result: {other:?}"),
        }
    }
}
