//! Definition of `CodesIndex` and associated functions
//! used for selecting messages from GRIB files by key values

use crate::{
    codes_message::BufMessage,
    errors::CodesError,
    intermediate_bindings::{
        codes_index_add_file, codes_index_delete, codes_index_new, codes_index_read,
        codes_index_select_double, codes_index_select_long, codes_index_select_string,
    },
};
use eccodes_sys::codes_index;
use fallible_iterator::FallibleIterator;
use log::trace;
use std::path::Path;

/// Cursor over messages selected from an ecCodes index.
///
/// The index is created either from a list of keys with [`new_from_keys()`](CodesIndex::new_from_keys)
/// (and then filled with [`add_grib_file()`](CodesIndex::add_grib_file))
/// or read from an index file with [`read_from_file()`](CodesIndex::read_from_file).
///
/// Before taking messages a value has to be selected for every key of the index with [`Select`].
/// Messages matching the selection are returned one by one as [`BufMessage`]
/// by [`BufMessage::new_from_codes_index()`] or [`message_iter()`](CodesIndex::message_iter).
///
/// All calls to ecCodes index functions are serialized with a global lock,
/// because they are not reentrant.
///
/// ## Example
///
/// ```no_run
/// # use grib_message::{CodesIndex, FallibleIterator, Select};
/// # use std::path::Path;
/// # fn main() -> anyhow::Result<()> {
/// let mut index = CodesIndex::new_from_keys(&["shortName", "level"])?
///     .add_grib_file(Path::new("./levels.grib"))?
///     .select("shortName", "t")?
///     .select("level", 850)?;
///
/// while let Some(msg) = index.message_iter().next()? {
///     let _values = msg.read_key_dynamic("values")?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CodesIndex {
    pub(crate) pointer: *mut codes_index,
}

/// Selection of a key value in [`CodesIndex`].
///
/// Selecting a new value of a key resets the cursor to the first matching message.
pub trait Select<T> {
    /// Selects messages with `key` equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when the key is not part of the index.
    fn select(self, key: &str, value: T) -> Result<CodesIndex, CodesError>;
}

impl CodesIndex {
    /// Creates an empty index on the given keys.
    ///
    /// The type of a key can be specified with a suffix, eg. `"level:l"`.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes fails to create the index.
    pub fn new_from_keys(keys: &[&str]) -> Result<CodesIndex, CodesError> {
        let keys = keys.join(",");

        let pointer = unsafe { codes_index_new(&keys)? };
        trace!("Created index on keys {keys}");

        Ok(CodesIndex { pointer })
    }

    /// Reads an index previously saved to a file.
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::NonUtf8Path`] when the path cannot be passed to ecCodes.
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes fails to read the index.
    pub fn read_from_file(index_file_path: &Path) -> Result<CodesIndex, CodesError> {
        let file_path = index_file_path.to_str().ok_or(CodesError::NonUtf8Path)?;

        let pointer = unsafe { codes_index_read(file_path)? };

        Ok(CodesIndex { pointer })
    }

    /// Indexes all messages of the GRIB file at given path.
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::NonUtf8Path`] when the path cannot be passed to ecCodes.
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when ecCodes fails to read the file.
    pub fn add_grib_file(self, grib_file_path: &Path) -> Result<CodesIndex, CodesError> {
        let file_path = grib_file_path.to_str().ok_or(CodesError::NonUtf8Path)?;

        unsafe {
            codes_index_add_file(self.pointer, file_path)?;
        }
        trace!("Added {file_path} to index");

        Ok(self)
    }

    /// Generates [`IndexMessageIter`] over the messages matching current selection.
    pub fn message_iter(&mut self) -> IndexMessageIter<'_> {
        IndexMessageIter { index: self }
    }
}

impl Select<i64> for CodesIndex {
    fn select(self, key: &str, value: i64) -> Result<CodesIndex, CodesError> {
        unsafe {
            codes_index_select_long(self.pointer, key, value)?;
        }
        Ok(self)
    }
}

impl Select<f64> for CodesIndex {
    fn select(self, key: &str, value: f64) -> Result<CodesIndex, CodesError> {
        unsafe {
            codes_index_select_double(self.pointer, key, value)?;
        }
        Ok(self)
    }
}

impl Select<&str> for CodesIndex {
    fn select(self, key: &str, value: &str) -> Result<CodesIndex, CodesError> {
        unsafe {
            codes_index_select_string(self.pointer, key, value)?;
        }
        Ok(self)
    }
}

impl Drop for CodesIndex {
    fn drop(&mut self) {
        unsafe {
            codes_index_delete(self.pointer);
        }
        self.pointer = std::ptr::null_mut();
    }
}

/// Iterator over messages in [`CodesIndex`] matching the current selection.
///
/// Returned [`BufMessage`]s do not borrow the index.
#[derive(Debug)]
pub struct IndexMessageIter<'a> {
    index: &'a mut CodesIndex,
}

impl FallibleIterator for IndexMessageIter<'_> {
    type Item = BufMessage;
    type Error = CodesError;

    fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        BufMessage::new_from_codes_index(self.index)
    }
}
