//! Definition and constructors of `CodesFile`
//! used for reading GRIB messages one after another

use crate::{errors::CodesError, pointer_guard};
use eccodes_sys::ProductKind_PRODUCT_GRIB;
use errno::errno;
use libc::{c_char, c_void, size_t, FILE};
use log::trace;
use std::{
    fmt::Debug,
    fs::{File, OpenOptions},
    os::unix::prelude::AsRawFd,
    path::Path,
};

pub use iterator::MessageIter;

mod iterator;

const READ_MODE: &[u8] = b"r\0";

/// Cursor over the messages of a GRIB file or in-memory buffer.
///
/// It can be constructed from:
///
/// - File path using [`new_from_file()`](CodesFile::new_from_file)
/// - Memory buffer using [`new_from_memory()`](CodesFile::new_from_memory)
///
/// ecCodes reads the `FILE` stream sequentially, each time returning a handle
/// to the next message. Every message is returned as an owned [`BufMessage`](crate::BufMessage),
/// either with [`BufMessage::new_from_codes_file()`](crate::BufMessage::new_from_codes_file)
/// or with [`message_iter()`](CodesFile::message_iter).
///
/// [`position()`](CodesFile::position) counts read attempts, including the
/// ones that failed or found no more messages.
#[derive(Debug)]
pub struct CodesFile<D: Debug> {
    pub(crate) pointer: *mut FILE,
    pub(crate) product_kind: ProductKind,
    pub(crate) position: usize,
    _data: D,
}

/// Kind of product (file type) inside handled file.
/// Used to indicate to ecCodes how it should decode/encode messages.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ProductKind {
    #[allow(missing_docs)]
    GRIB = ProductKind_PRODUCT_GRIB as isize,
}

impl<D: Debug> CodesFile<D> {
    /// Number of read attempts made so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl CodesFile<File> {
    /// Opens file at given [`Path`] as selected [`ProductKind`] and contructs `CodesFile`.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// # use grib_message::{ProductKind, CodesFile};
    /// # fn main() -> anyhow::Result<()> {
    /// let file = CodesFile::new_from_file("./surface.grib", ProductKind::GRIB)?;
    ///  # Ok(())
    ///  # }
    /// ```
    ///
    /// The function opens [`File`] at the provided path and uses
    /// [`fdopen()`](https://man7.org/linux/man-pages/man3/fdopen.3.html)
    /// to associate its descriptor with a `FILE` stream.
    /// The [`File`] is kept inside `CodesFile` and closed when it is dropped.
    ///
    /// ## Errors
    ///
    /// Returns [`CodesError::FileHandlingInterrupted`] with [`io::Error`](std::io::Error)
    /// when the file cannot be opened.
    ///
    /// Returns [`CodesError::LibcNonZero`] with [`errno`](errno::Errno) information
    /// when the stream cannot be created from the file descriptor.
    pub fn new_from_file<P: AsRef<Path>>(
        file_path: P,
        product_kind: ProductKind,
    ) -> Result<Self, CodesError> {
        let file = OpenOptions::new().read(true).open(file_path.as_ref())?;
        let file_pointer = open_with_fdopen(&file)?;

        trace!("Opened {} as a codes file", file_path.as_ref().display());

        Ok(Self {
            pointer: file_pointer,
            product_kind,
            position: 0,
            _data: file,
        })
    }
}

impl CodesFile<Vec<u8>> {
    /// Opens data in provided buffer as selected [`ProductKind`] and contructs `CodesFile`.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// # use grib_message::{ProductKind, CodesFile};
    /// # fn main() -> anyhow::Result<()> {
    /// let data = std::fs::read("./surface.grib")?;
    /// let file = CodesFile::new_from_memory(data, ProductKind::GRIB)?;
    ///  # Ok(())
    ///  # }
    /// ```
    ///
    /// The function associates the buffer with a `FILE` stream
    /// using [`fmemopen()`](https://man7.org/linux/man-pages/man3/fmemopen.3.html).
    /// `CodesFile` takes the ownership of the buffer, which is dropped together with it.
    ///
    /// ## Errors
    ///
    /// Returns [`CodesError::LibcNonZero`] with [`errno`](errno::Errno) information
    /// when the stream cannot be created.
    pub fn new_from_memory(file_data: Vec<u8>, product_kind: ProductKind) -> Result<Self, CodesError> {
        let file_pointer = open_with_fmemopen(&file_data)?;

        trace!("Opened {} bytes as a codes file", file_data.len());

        Ok(Self {
            pointer: file_pointer,
            product_kind,
            position: 0,
            _data: file_data,
        })
    }
}

fn open_with_fdopen(file: &File) -> Result<*mut FILE, CodesError> {
    let file_ptr = unsafe { libc::fdopen(file.as_raw_fd(), READ_MODE.as_ptr().cast::<c_char>()) };

    if file_ptr.is_null() {
        let error_val = errno();
        return Err(CodesError::LibcNonZero(error_val.0, error_val));
    }

    Ok(file_ptr)
}

fn open_with_fmemopen(file_data: &[u8]) -> Result<*mut FILE, CodesError> {
    let file_data_ptr = file_data.as_ptr().cast_mut().cast::<c_void>();
    pointer_guard::non_null!(file_data_ptr);

    let file_ptr = unsafe {
        libc::fmemopen(
            file_data_ptr,
            file_data.len() as size_t,
            READ_MODE.as_ptr().cast::<c_char>(),
        )
    };

    if file_ptr.is_null() {
        let error_val = errno();
        return Err(CodesError::LibcNonZero(error_val.0, error_val));
    }

    Ok(file_ptr)
}
