//! Constructors of `CodesMessage` from bytes, samples, files and indexes

use std::fmt::Debug;

use log::{debug, trace};

use crate::{
    codes_file::CodesFile,
    codes_index::CodesIndex,
    codes_message::{BufMessage, RefMessage},
    errors::CodesError,
    intermediate_bindings::{
        codes_grib_handle_new_from_multi_message, codes_grib_handle_new_from_samples,
        codes_handle_new_from_file, codes_handle_new_from_index, codes_handle_new_from_message,
    },
};

impl<'a> RefMessage<'a> {
    /// Constructs the message from a byte buffer containing one coded message.
    ///
    /// The data is not copied, so the message borrows the buffer for its whole lifetime.
    ///
    /// # Example
    ///
    /// ```no_run
    ///  # use grib_message::RefMessage;
    ///  # fn main() -> anyhow::Result<()> {
    ///  let data = std::fs::read("./surface.grib")?;
    ///  let message = RefMessage::new_from_bytes(&data)?;
    ///  let _level = message.read_key_dynamic("level")?;
    ///  # Ok(())
    ///  # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::InvalidMessage`] when ecCodes cannot decode the buffer.
    pub fn new_from_bytes(data: &'a [u8]) -> Result<RefMessage<'a>, CodesError> {
        let handle = unsafe { codes_handle_new_from_message(data)? };

        if handle.is_null() {
            return Err(CodesError::InvalidMessage);
        }

        debug!("Created message from {} bytes", data.len());

        Ok(RefMessage::new(handle))
    }

    /// Constructs a GRIB message from a list of byte blocks that together form one message.
    ///
    /// The blocks are passed to ecCodes in the given order. None of them is copied,
    /// so the message borrows all of them.
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::InvalidMessage`] when the list is empty or ecCodes cannot decode it.
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes reports a decoding error.
    pub fn new_from_multi_bytes(blocks: &'a [&'a [u8]]) -> Result<RefMessage<'a>, CodesError> {
        if blocks.is_empty() {
            return Err(CodesError::InvalidMessage);
        }

        let handle = unsafe { codes_grib_handle_new_from_multi_message(blocks)? };

        if handle.is_null() {
            return Err(CodesError::InvalidMessage);
        }

        debug!("Created message from {} blocks", blocks.len());

        Ok(RefMessage::new(handle))
    }
}

impl BufMessage {
    /// Constructs the message from an ecCodes GRIB sample, eg. `"regular_ll_sfc_grib2"`.
    ///
    /// Samples are looked up in the ecCodes samples directory.
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::InvalidMessage`] when there is no sample with given name.
    pub fn new_from_sample(name: &str) -> Result<BufMessage, CodesError> {
        let handle = unsafe { codes_grib_handle_new_from_samples(name)? };

        if handle.is_null() {
            return Err(CodesError::InvalidMessage);
        }

        debug!("Created message from sample {name}");

        Ok(BufMessage::new(handle))
    }

    /// Reads the next message from the file.
    ///
    /// Returns `Ok(None)` when there are no more messages. The position of the file
    /// is incremented on every call, also when the read fails.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes fails to read the message.
    pub fn new_from_codes_file<D: Debug>(
        codes_file: &mut CodesFile<D>,
    ) -> Result<Option<BufMessage>, CodesError> {
        codes_file.position += 1;

        let handle =
            unsafe { codes_handle_new_from_file(codes_file.pointer, codes_file.product_kind)? };

        if handle.is_null() {
            trace!("No more messages in file after {} reads", codes_file.position);
            return Ok(None);
        }

        Ok(Some(BufMessage::new(handle)))
    }

    /// Takes the next message matching the current selection of the index.
    ///
    /// Returns `Ok(None)` when all matching messages have been taken.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes fails to read the message.
    pub fn new_from_codes_index(index: &mut CodesIndex) -> Result<Option<BufMessage>, CodesError> {
        let handle = unsafe { codes_handle_new_from_index(index.pointer)? };

        if handle.is_null() {
            trace!("No more messages in index");
            return Ok(None);
        }

        Ok(Some(BufMessage::new(handle)))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{errors::CodesError, BufMessage, DynamicKeyType, KeyWrite, RefMessage};

    const SAMPLE: &str = "regular_ll_sfc_grib2";

    #[test]
    fn bytes_round_trip() -> Result<()> {
        let mut source = BufMessage::new_from_sample(SAMPLE)?;
        source.write_key("level", 700)?;
        let data = source.to_raw_bytes()?;

        let msg = RefMessage::new_from_bytes(&data)?;

        assert_eq!(msg.to_raw_bytes()?, data);
        assert_eq!(msg.read_key_dynamic("level")?, DynamicKeyType::Int(700));

        Ok(())
    }

    #[test]
    fn multi_bytes_single_block() -> Result<()> {
        let data = BufMessage::new_from_sample(SAMPLE)?.to_raw_bytes()?;
        let blocks: [&[u8]; 1] = [&data];

        let msg = RefMessage::new_from_multi_bytes(&blocks)?;

        assert_eq!(
            msg.read_key_dynamic("shortName")?,
            BufMessage::new_from_sample(SAMPLE)?.read_key_dynamic("shortName")?
        );

        Ok(())
    }

    #[test]
    fn empty_multi_bytes() {
        let blocks: [&[u8]; 0] = [];

        assert!(matches!(
            RefMessage::new_from_multi_bytes(&blocks),
            Err(CodesError::InvalidMessage)
        ));
    }

    #[test]
    fn invalid_bytes() {
        let data = b"definitely not a GRIB message".to_vec();

        assert!(matches!(
            RefMessage::new_from_bytes(&data),
            Err(CodesError::InvalidMessage)
        ));
    }

    #[test]
    fn unknown_sample() {
        assert!(matches!(
            BufMessage::new_from_sample("no_such_sample_grib9"),
            Err(CodesError::InvalidMessage)
        ));
    }
}
