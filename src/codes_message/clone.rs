use std::fmt::Debug;

use log::trace;

use crate::{
    codes_message::{BufMessage, CodesMessage},
    errors::CodesError,
    intermediate_bindings::codes_handle_clone,
};

impl<P: Debug> CodesMessage<P> {
    /// Creates an independent copy of the message with its own handle.
    ///
    /// The copy owns all of its data, so it can outlive the source (and the buffer
    /// a [`RefMessage`](crate::RefMessage) was created from). Writing to one of them
    /// never changes the other.
    ///
    /// **Be careful of the memory overhead!** This function reads the whole message into memory,
    /// which can be of a significant size for big grids.
    ///
    /// Returns `Ok(None)` when ecCodes cannot clone the handle.
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::UseAfterRelease`] when called on a released message.
    pub fn try_clone(&self) -> Result<Option<BufMessage>, CodesError> {
        let clone_handle = unsafe { codes_handle_clone(self.live_handle()?)? };

        if clone_handle.is_null() {
            trace!("codes_handle_clone() returned null");
            return Ok(None);
        }

        Ok(Some(BufMessage::new(clone_handle)))
    }
}
