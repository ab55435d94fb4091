//! Definition of `CodesMessage` and its associated functions
//! used for reading and writing data of a single GRIB message

mod clone;
mod construct;
mod grid;
mod missing;
mod read;
mod write;

pub use grid::{GridData, GridOrientation};
pub use missing::DEFAULT_MISSING_VALUE;
pub use read::{DynamicKeyType, KeyRead, NativeKeyType, BYTES_BUFFER_CAPACITY, TEXT_BUFFER_CAPACITY};
pub use write::KeyWrite;

use eccodes_sys::codes_handle;
use log::error;
use std::{fmt::Debug, marker::PhantomData, ptr::null_mut};

use crate::{errors::CodesError, intermediate_bindings::codes_handle_delete, pointer_guard};

/// Structure that provides access to the data contained in a single GRIB message.
///
/// The message exclusively owns one ecCodes handle. The parent marker `P` describes
/// what that handle depends on:
///
/// - [`BufMessage`] owns all of its data. It is created from [`CodesFile`](crate::CodesFile),
///   [`CodesIndex`](crate::CodesIndex), an ecCodes sample or by [`try_clone()`](CodesMessage::try_clone).
/// - [`RefMessage`] aliases a caller-owned byte buffer, so it cannot outlive that buffer.
///   It is created with [`new_from_bytes()`](RefMessage::new_from_bytes)
///   or [`new_from_multi_bytes()`](RefMessage::new_from_multi_bytes).
///
/// Keys can be read with static types using [`read_key()`](KeyRead::read_key) or with
/// [`DynamicKeyType`] using [`read_key_dynamic()`](CodesMessage::read_key_dynamic),
/// and modified with [`write_key()`](KeyWrite::write_key) or
/// [`write_key_dynamic()`](CodesMessage::write_key_dynamic).
/// Key type and size are resolved again on every access.
///
/// The handle is released when the message is dropped. To release it early and
/// observe errors use [`release()`](CodesMessage::release).
/// Errors encountered in destructor are reported via [`log`].
///
/// The message is `Send` but not `Sync`: ecCodes handles are not safe for
/// concurrent access, so reads and writes on one message must stay on one thread at a time.
#[derive(Debug)]
pub struct CodesMessage<P: Debug> {
    pub(crate) _parent: P,
    pub(crate) message_handle: *mut codes_handle,
}

// `PhantomData` is needed only for lifetime restriction
// and we tightly control how `CodesMessage` is created.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd)]
#[doc(hidden)]
pub struct RefParent<'a>(PhantomData<&'a [u8]>);

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd)]
#[doc(hidden)]
pub struct BufParent();

/// [`CodesMessage`] that aliases a byte buffer borrowed for `'a`.
pub type RefMessage<'a> = CodesMessage<RefParent<'a>>;

/// [`CodesMessage`] that owns all of its data.
pub type BufMessage = CodesMessage<BufParent>;

unsafe impl<P: Debug + Send> Send for CodesMessage<P> {}

impl RefMessage<'_> {
    pub(crate) const fn new(handle: *mut codes_handle) -> Self {
        RefMessage {
            _parent: RefParent(PhantomData),
            message_handle: handle,
        }
    }
}

impl BufMessage {
    pub(crate) const fn new(handle: *mut codes_handle) -> Self {
        BufMessage {
            _parent: BufParent(),
            message_handle: handle,
        }
    }
}

impl<P: Debug> CodesMessage<P> {
    /// Releases the ecCodes handle before the message goes out of scope.
    ///
    /// Consuming the message makes any later use a compile-time error.
    /// Dropping the message without calling this function releases the handle as well,
    /// but errors are then only logged.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes fails to delete the handle.
    /// The handle is considered released regardless.
    pub fn release(mut self) -> Result<(), CodesError> {
        self.release_handle()
    }

    /// Deletes the handle if it is still live and clears the pointer.
    /// Calling it on an already released message is a no-op.
    pub(crate) fn release_handle(&mut self) -> Result<(), CodesError> {
        let handle = self.message_handle;
        self.message_handle = null_mut();

        unsafe { codes_handle_delete(handle) }
    }

    /// Returns the handle if it has not been released.
    pub(crate) fn live_handle(&self) -> Result<*mut codes_handle, CodesError> {
        pointer_guard::non_null!(self.message_handle, CodesError::UseAfterRelease);
        Ok(self.message_handle)
    }
}

impl<P: Debug> Drop for CodesMessage<P> {
    /// Executes the destructor for this type.
    /// This method calls destructor functions from ecCodes library.
    /// In some edge cases these functions can return non-zero code.
    /// In such case the pointer is still cleared, but memory leaks can occur.
    ///
    /// If any function called in the destructor returns an error it will appear in log.
    ///
    /// Technical note: delete functions in ecCodes can only fail with [`CodesInternalError`](crate::errors::CodesInternal::CodesInternalError)
    /// when other functions corrupt the inner memory of pointer, in that case memory leak is possible.
    /// In case of corrupt pointer segmentation fault will occur.
    ///
    /// The destructor never panics.
    fn drop(&mut self) {
        self.release_handle()
            .unwrap_or_else(|error| report_release_error(&error));
    }
}

fn report_release_error(error: &CodesError) {
    error!("codes_handle_delete() returned an error: {:?}", error);
}
