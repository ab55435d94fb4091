#![allow(non_camel_case_types)]
#![allow(clippy::module_name_repetitions)]

use std::ffi::CString;

use eccodes_sys::codes_handle;
use libc::c_char;

use crate::{errors::CodesError, pointer_guard};

use super::error_code_to_result;

pub unsafe fn codes_set_long(
    handle: *mut codes_handle,
    key: &str,
    value: i64,
) -> Result<(), CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;

    let error_code = eccodes_sys::codes_set_long(handle, key.as_ptr(), value);
    error_code_to_result(error_code)
}

pub unsafe fn codes_set_double(
    handle: *mut codes_handle,
    key: &str,
    value: f64,
) -> Result<(), CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;

    let error_code = eccodes_sys::codes_set_double(handle, key.as_ptr(), value);
    error_code_to_result(error_code)
}

pub unsafe fn codes_set_long_array(
    handle: *mut codes_handle,
    key: &str,
    values: &[i64],
) -> Result<(), CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;

    let error_code = eccodes_sys::codes_set_long_array(
        handle,
        key.as_ptr(),
        values.as_ptr(),
        values.len(),
    );
    error_code_to_result(error_code)
}

pub unsafe fn codes_set_double_array(
    handle: *mut codes_handle,
    key: &str,
    values: &[f64],
) -> Result<(), CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;

    let error_code = eccodes_sys::codes_set_double_array(
        handle,
        key.as_ptr(),
        values.as_ptr(),
        values.len(),
    );
    error_code_to_result(error_code)
}

pub unsafe fn codes_set_string(
    handle: *mut codes_handle,
    key: &str,
    value: &str,
) -> Result<(), CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;
    let mut length = value.len();
    let value = CString::new(value)?;

    let error_code =
        eccodes_sys::codes_set_string(handle, key.as_ptr(), value.as_ptr(), &mut length);
    error_code_to_result(error_code)
}

pub unsafe fn codes_set_string_array<S: AsRef<str>>(
    handle: *mut codes_handle,
    key: &str,
    values: &[S],
) -> Result<(), CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;

    // CStrings must stay alive until ecCodes returns
    let values = values
        .iter()
        .map(|v| CString::new(v.as_ref()))
        .collect::<Result<Vec<CString>, _>>()?;
    let mut value_pointers: Vec<*const c_char> = values.iter().map(|v| v.as_ptr()).collect();

    let error_code = eccodes_sys::codes_set_string_array(
        handle,
        key.as_ptr(),
        value_pointers.as_mut_ptr(),
        value_pointers.len(),
    );
    error_code_to_result(error_code)
}

pub unsafe fn codes_set_bytes(
    handle: *mut codes_handle,
    key: &str,
    values: &[u8],
) -> Result<(), CodesError> {
    pointer_guard::non_null!(handle);

    let key = CString::new(key)?;

    let mut length = values.len();

    let error_code =
        eccodes_sys::codes_set_bytes(handle, key.as_ptr(), values.as_ptr(), &mut length);
    error_code_to_result(error_code)
}
