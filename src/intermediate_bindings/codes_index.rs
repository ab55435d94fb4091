#![allow(non_camel_case_types)]
#![allow(clippy::module_name_repetitions)]

use eccodes_sys::{codes_context, codes_index, CODES_LOCK};
use std::{
    ffi::CString,
    ptr,
    sync::{MutexGuard, PoisonError},
};

use crate::{errors::CodesError, pointer_guard};

use super::error_code_to_result;

// all index functions are safeguarded by the lock exported by eccodes-sys
// because there are random errors appearing when using the index functions concurrently
pub(super) fn index_lock() -> MutexGuard<'static, ()> {
    // the guarded data is (), so a poisoned lock is still usable
    CODES_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

pub unsafe fn codes_index_new(keys: &str) -> Result<*mut codes_index, CodesError> {
    let context: *mut codes_context = ptr::null_mut(); //default context
    let mut error_code: i32 = 0;
    let keys = CString::new(keys)?;

    let _g = index_lock();
    let index = eccodes_sys::codes_index_new(context, keys.as_ptr(), &mut error_code);
    error_code_to_result(error_code)?;

    Ok(index)
}

pub unsafe fn codes_index_read(filename: &str) -> Result<*mut codes_index, CodesError> {
    let filename = CString::new(filename)?;
    let context: *mut codes_context = ptr::null_mut(); //default context
    let mut error_code: i32 = 0;

    let _g = index_lock();
    let index = eccodes_sys::codes_index_read(context, filename.as_ptr(), &mut error_code);
    error_code_to_result(error_code)?;

    Ok(index)
}

pub unsafe fn codes_index_delete(index: *mut codes_index) {
    if index.is_null() {
        return;
    }

    let _g = index_lock();
    eccodes_sys::codes_index_delete(index);
}

pub unsafe fn codes_index_add_file(
    index: *mut codes_index,
    filename: &str,
) -> Result<(), CodesError> {
    pointer_guard::non_null!(index);

    let filename = CString::new(filename)?;

    let _g = index_lock();
    let error_code = eccodes_sys::codes_index_add_file(index, filename.as_ptr());
    error_code_to_result(error_code)
}

pub unsafe fn codes_index_select_long(
    index: *mut codes_index,
    key: &str,
    value: i64,
) -> Result<(), CodesError> {
    pointer_guard::non_null!(index);

    let key = CString::new(key)?;

    let _g = index_lock();
    let error_code = eccodes_sys::codes_index_select_long(index, key.as_ptr(), value);
    error_code_to_result(error_code)
}

pub unsafe fn codes_index_select_double(
    index: *mut codes_index,
    key: &str,
    value: f64,
) -> Result<(), CodesError> {
    pointer_guard::non_null!(index);

    let key = CString::new(key)?;

    let _g = index_lock();
    let error_code = eccodes_sys::codes_index_select_double(index, key.as_ptr(), value);
    error_code_to_result(error_code)
}

pub unsafe fn codes_index_select_string(
    index: *mut codes_index,
    key: &str,
    value: &str,
) -> Result<(), CodesError> {
    pointer_guard::non_null!(index);

    let key = CString::new(key)?;
    let value = CString::new(value)?;

    let _g = index_lock();
    let error_code = eccodes_sys::codes_index_select_string(index, key.as_ptr(), value.as_ptr());
    error_code_to_result(error_code)
}

#[cfg(test)]
mod tests {
    use std::{sync::TryLockError, thread};

    use eccodes_sys::CODES_LOCK;

    use super::{codes_index_delete, codes_index_new, index_lock};

    #[test]
    fn index_lock_is_shared_with_eccodes_sys() {
        let guard = index_lock();
        assert!(matches!(
            CODES_LOCK.try_lock(),
            Err(TryLockError::WouldBlock)
        ));
        drop(guard);
    }

    #[test]
    fn poisoned_lock_still_guards_index() -> anyhow::Result<()> {
        let poisoner = thread::spawn(|| {
            let _g = index_lock();
            panic!("poisoning the lock");
        });
        assert!(poisoner.join().is_err());

        drop(index_lock());

        unsafe {
            let index = codes_index_new("shortName,level")?;
            assert!(!index.is_null());
            codes_index_delete(index);
        }

        Ok(())
    }
}
