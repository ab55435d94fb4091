#![allow(non_camel_case_types)]
#![allow(clippy::module_name_repetitions)]

use std::{
    ffi::CString,
    ptr::{self},
    slice,
};

use bytes::Bytes;
use eccodes_sys::codes_handle;
use libc::{c_char, c_void};

use crate::{
    codes_message::{NativeKeyType, BYTES_BUFFER_CAPACITY, TEXT_BUFFER_CAPACITY},
    errors::CodesError,
    pointer_guard,
};

use super::error_code_to_result;

pub unsafe fn codes_get_native_type(
    handle: *mut codes_handle,
    key: &str,
) -> Result<NativeKeyType, CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;
    let mut key_type: i32 = 0;

    let error_code = eccodes_sys::codes_get_native_type(handle, key.as_ptr(), &mut key_type);
    error_code_to_result(error_code)?;

    Ok(NativeKeyType::from_raw(key_type))
}

pub unsafe fn codes_get_size(handle: *mut codes_handle, key: &str) -> Result<usize, CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;
    let mut key_size: usize = 0;

    let error_code = eccodes_sys::codes_get_size(handle, key.as_ptr(), &mut key_size);
    error_code_to_result(error_code)?;

    Ok(key_size)
}

pub unsafe fn codes_get_long(handle: *mut codes_handle, key: &str) -> Result<i64, CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;
    let mut key_value: i64 = 0;

    let error_code = eccodes_sys::codes_get_long(handle, key.as_ptr(), &mut key_value);
    error_code_to_result(error_code)?;

    Ok(key_value)
}

pub unsafe fn codes_get_double(handle: *mut codes_handle, key: &str) -> Result<f64, CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;
    let mut key_value: f64 = 0.0;

    let error_code = eccodes_sys::codes_get_double(handle, key.as_ptr(), &mut key_value);
    error_code_to_result(error_code)?;

    Ok(key_value)
}

pub unsafe fn codes_get_double_array(
    handle: *mut codes_handle,
    key: &str,
) -> Result<Vec<f64>, CodesError> {
    pointer_guard::non_null!(handle);

    let mut key_size = codes_get_size(handle, key)?;
    let key = CString::new(key)?;

    let mut key_values: Vec<f64> = vec![0.0; key_size];

    let error_code = eccodes_sys::codes_get_double_array(
        handle,
        key.as_ptr(),
        key_values.as_mut_ptr(),
        &mut key_size,
    );
    error_code_to_result(error_code)?;

    key_values.truncate(key_size);

    Ok(key_values)
}

pub unsafe fn codes_get_long_array(
    handle: *mut codes_handle,
    key: &str,
) -> Result<Vec<i64>, CodesError> {
    pointer_guard::non_null!(handle);

    let mut key_size = codes_get_size(handle, key)?;
    let key = CString::new(key)?;

    let mut key_values: Vec<i64> = vec![0; key_size];

    let error_code = eccodes_sys::codes_get_long_array(
        handle,
        key.as_ptr(),
        key_values.as_mut_ptr(),
        &mut key_size,
    );
    error_code_to_result(error_code)?;

    key_values.truncate(key_size);

    Ok(key_values)
}

/// Reads the string into a buffer of [`TEXT_BUFFER_CAPACITY`] bytes.
/// Longer values make ecCodes return `CODES_BUFFER_TOO_SMALL`.
pub unsafe fn codes_get_string(handle: *mut codes_handle, key: &str) -> Result<String, CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;

    let mut key_length: usize = TEXT_BUFFER_CAPACITY;
    let mut key_message: Vec<u8> = vec![0; TEXT_BUFFER_CAPACITY];

    let error_code = eccodes_sys::codes_get_string(
        handle,
        key.as_ptr(),
        key_message.as_mut_ptr().cast::<c_char>(),
        &mut key_length,
    );
    error_code_to_result(error_code)?;

    key_message.truncate(key_length);
    trim_nul_padding(&mut key_message);

    Ok(String::from_utf8(key_message)?)
}

/// Reads the bytes into a buffer of [`BYTES_BUFFER_CAPACITY`] bytes
/// and returns only the length reported by ecCodes.
pub unsafe fn codes_get_bytes(handle: *mut codes_handle, key: &str) -> Result<Vec<u8>, CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;

    let mut key_length: usize = BYTES_BUFFER_CAPACITY;
    let mut buffer: Vec<u8> = vec![0; BYTES_BUFFER_CAPACITY];

    let error_code = eccodes_sys::codes_get_bytes(
        handle,
        key.as_ptr(),
        buffer.as_mut_ptr(),
        &mut key_length,
    );
    error_code_to_result(error_code)?;

    buffer.truncate(key_length);

    Ok(buffer)
}

/// Copies the coded message out of the handle.
pub unsafe fn codes_get_message(handle: *mut codes_handle) -> Result<Bytes, CodesError> {
    pointer_guard::non_null!(handle);

    let mut message_ptr: *const c_void = ptr::null();
    let mut message_size: usize = 0;

    let error_code = eccodes_sys::codes_get_message(handle, &mut message_ptr, &mut message_size);
    error_code_to_result(error_code)?;

    pointer_guard::non_null!(message_ptr);

    // owned by the handle, invalidated by the next write
    let message = slice::from_raw_parts(message_ptr.cast::<u8>(), message_size);

    Ok(Bytes::copy_from_slice(message))
}

/// Returns `(latitudes, longitudes, values)` of `number_of_points` length.
pub unsafe fn codes_grib_get_data(
    handle: *mut codes_handle,
    number_of_points: usize,
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), CodesError> {
    pointer_guard::non_null!(handle);

    let mut latitudes: Vec<f64> = vec![0.0; number_of_points];
    let mut longitudes: Vec<f64> = vec![0.0; number_of_points];
    let mut values: Vec<f64> = vec![0.0; number_of_points];

    let error_code = eccodes_sys::codes_grib_get_data(
        handle,
        latitudes.as_mut_ptr(),
        longitudes.as_mut_ptr(),
        values.as_mut_ptr(),
    );
    error_code_to_result(error_code)?;

    Ok((latitudes, longitudes, values))
}

fn trim_nul_padding(buffer: &mut Vec<u8>) {
    while buffer.last() == Some(&0) {
        buffer.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::trim_nul_padding;

    #[test]
    fn trailing_nuls_are_trimmed() {
        let mut buffer = b"msl\0\0\0".to_vec();
        trim_nul_padding(&mut buffer);
        assert_eq!(buffer, b"msl");

        let mut buffer = b"2t".to_vec();
        trim_nul_padding(&mut buffer);
        assert_eq!(buffer, b"2t");

        let mut buffer = b"\0\0".to_vec();
        trim_nul_padding(&mut buffer);
        assert!(buffer.is_empty());
    }
}
