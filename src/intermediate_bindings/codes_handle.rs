use std::{
    ffi::CString,
    ptr::{self},
};

use eccodes_sys::{codes_context, codes_handle, codes_index};
use libc::{c_void, FILE};

use crate::{codes_file::ProductKind, errors::CodesError, pointer_guard};

use super::{
    codes_index::index_lock, error_code_to_result, CODES_END_OF_FILE, CODES_END_OF_INDEX,
};

#[cfg(target_os = "macos")]
type _SYS_IO_FILE = eccodes_sys::__sFILE;

#[cfg(not(target_os = "macos"))]
type _SYS_IO_FILE = eccodes_sys::_IO_FILE;

/// Returns null pointer when there are no more messages in the file.
pub unsafe fn codes_handle_new_from_file(
    file_pointer: *mut FILE,
    product_kind: ProductKind,
) -> Result<*mut codes_handle, CodesError> {
    pointer_guard::non_null!(file_pointer);

    let context: *mut codes_context = ptr::null_mut(); //default context

    let mut error_code: i32 = 0;

    let file_handle = eccodes_sys::codes_handle_new_from_file(
        context,
        file_pointer.cast::<_SYS_IO_FILE>(),
        product_kind as u32,
        &mut error_code,
    );

    if error_code == CODES_END_OF_FILE {
        return Ok(ptr::null_mut());
    }

    error_code_to_result(error_code)?;

    Ok(file_handle)
}

/// Returns null pointer when there are no more messages in the index.
pub unsafe fn codes_handle_new_from_index(
    index: *mut codes_index,
) -> Result<*mut codes_handle, CodesError> {
    pointer_guard::non_null!(index);

    let mut error_code: i32 = 0;

    let _g = index_lock();
    let handle = eccodes_sys::codes_handle_new_from_index(index, &mut error_code);

    // end of index is also indicated by a null pointer, which is handled upstream
    if error_code == CODES_END_OF_INDEX {
        return Ok(ptr::null_mut());
    }

    error_code_to_result(error_code)?;

    Ok(handle)
}

/// The handle does not copy the data, so `data` must outlive it.
pub unsafe fn codes_handle_new_from_message(data: &[u8]) -> Result<*mut codes_handle, CodesError> {
    let data_ptr = data.as_ptr().cast::<c_void>();
    pointer_guard::non_null!(data_ptr);

    let context: *mut codes_context = ptr::null_mut(); //default context

    let handle = eccodes_sys::codes_handle_new_from_message(context, data_ptr, data.len());

    Ok(handle)
}

/// The handle does not copy the data, so all `blocks` must outlive it.
pub unsafe fn codes_grib_handle_new_from_multi_message(
    blocks: &[&[u8]],
) -> Result<*mut codes_handle, CodesError> {
    let context: *mut codes_context = ptr::null_mut(); //default context

    let mut block_pointers: Vec<*mut c_void> = blocks
        .iter()
        .map(|block| block.as_ptr().cast_mut().cast::<c_void>())
        .collect();
    let mut block_lengths: Vec<usize> = blocks.iter().map(|block| block.len()).collect();

    for block_pointer in &block_pointers {
        pointer_guard::non_null!(*block_pointer);
    }

    let mut error_code: i32 = 0;

    let handle = eccodes_sys::codes_grib_handle_new_from_multi_message(
        context,
        block_pointers.as_mut_ptr(),
        block_lengths.as_mut_ptr(),
        &mut error_code,
    );

    error_code_to_result(error_code)?;

    Ok(handle)
}

pub unsafe fn codes_grib_handle_new_from_samples(
    sample_name: &str,
) -> Result<*mut codes_handle, CodesError> {
    let context: *mut codes_context = ptr::null_mut(); //default context
    let sample_name = CString::new(sample_name)?;

    let handle = eccodes_sys::codes_grib_handle_new_from_samples(context, sample_name.as_ptr());

    Ok(handle)
}

/// Deleting a null handle is a no-op.
pub unsafe fn codes_handle_delete(handle: *mut codes_handle) -> Result<(), CodesError> {
    if handle.is_null() {
        return Ok(());
    }

    let error_code = eccodes_sys::codes_handle_delete(handle);
    error_code_to_result(error_code)
}

/// Returns null pointer when ecCodes fails to clone the handle.
pub unsafe fn codes_handle_clone(
    source_handle: *mut codes_handle,
) -> Result<*mut codes_handle, CodesError> {
    pointer_guard::non_null!(source_handle);

    let clone_handle = eccodes_sys::codes_handle_clone(source_handle);

    Ok(clone_handle)
}
