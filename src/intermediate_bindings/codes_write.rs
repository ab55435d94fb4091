#![allow(clippy::module_name_repetitions)]

use std::ffi::CString;

use eccodes_sys::codes_handle;

use crate::{errors::CodesError, pointer_guard};

use super::error_code_to_result;

/// `mode` is passed to `fopen()` inside ecCodes as-is.
pub unsafe fn codes_write_message(
    handle: *mut codes_handle,
    file_path: &str,
    mode: &str,
) -> Result<(), CodesError> {
    pointer_guard::non_null!(handle);

    let file_path = CString::new(file_path)?;
    let mode = CString::new(mode)?;

    let error_code = eccodes_sys::codes_write_message(handle, file_path.as_ptr(), mode.as_ptr());
    error_code_to_result(error_code)
}
