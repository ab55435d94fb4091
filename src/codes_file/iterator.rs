use fallible_iterator::FallibleIterator;

use crate::{codes_file::CodesFile, codes_message::BufMessage, errors::CodesError};
use std::fmt::Debug;

/// Iterator over messages in [`CodesFile`] returning owned [`BufMessage`]s.
///
/// This structure implements [`FallibleIterator`], so `FallibleIterator` must be in scope
/// to call [`next()`](FallibleIterator::next). Returned messages do not borrow the file,
/// so they can be kept (or moved to another thread) after the file is dropped.
///
/// ## Example
///
/// ```no_run
/// use grib_message::{CodesFile, FallibleIterator, ProductKind};
/// #
/// # fn main() -> anyhow::Result<()> {
/// let mut file = CodesFile::new_from_file("./surface.grib", ProductKind::GRIB)?;
///
/// let messages: Vec<_> = file.message_iter().collect()?;
/// drop(file);
///
/// for msg in &messages {
///     let _name = msg.read_key_dynamic("shortName")?;
/// }
/// #     Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MessageIter<'a, D: Debug> {
    codes_file: &'a mut CodesFile<D>,
}

impl<D: Debug> CodesFile<D> {
    /// Generates [`MessageIter`] over the remaining messages of the file.
    pub fn message_iter(&mut self) -> MessageIter<'_, D> {
        MessageIter { codes_file: self }
    }
}

impl<D: Debug> FallibleIterator for MessageIter<'_, D> {
    type Item = BufMessage;
    type Error = CodesError;

    /// # Errors
    ///
    /// The method will return [`CodesInternal`](crate::errors::CodesInternal)
    /// when internal ecCodes function returns non-zero code.
    fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        BufMessage::new_from_codes_file(self.codes_file)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        codes_file::{CodesFile, ProductKind},
        BufMessage, DynamicKeyType, FallibleIterator, KeyWrite,
    };
    use anyhow::Result;
    use std::fs::remove_file;

    fn write_levels(file_name: &str, levels: &[i64]) -> Result<std::path::PathBuf> {
        let file_path = std::env::temp_dir().join(file_name);

        for (i, level) in levels.iter().enumerate() {
            let mut msg = BufMessage::new_from_sample("regular_ll_sfc_grib2")?;
            msg.write_key("level", *level)?;
            msg.write_to_file(&file_path, if i == 0 { "w" } else { "a" })?;
        }

        Ok(file_path)
    }

    #[test]
    fn iterator_collected() -> Result<()> {
        let levels = [1000, 925, 850, 700];
        let file_path = write_levels("grib_message_iterator_collected.grib", &levels)?;

        let mut codes_file = CodesFile::new_from_file(&file_path, ProductKind::GRIB)?;
        let messages: Vec<BufMessage> = codes_file.message_iter().collect()?;
        drop(codes_file);

        assert_eq!(messages.len(), levels.len());
        for (msg, level) in messages.iter().zip(levels) {
            assert_eq!(msg.read_key_dynamic("level")?, DynamicKeyType::Int(level));
        }

        remove_file(&file_path)?;

        Ok(())
    }

    #[test]
    fn iterator_beyond_none() -> Result<()> {
        let file_path = write_levels("grib_message_iterator_beyond_none.grib", &[500, 250])?;

        let mut codes_file = CodesFile::new_from_file(&file_path, ProductKind::GRIB)?;
        let mut mgen = codes_file.message_iter();

        assert!(mgen.next()?.is_some());
        assert!(mgen.next()?.is_some());

        assert!(mgen.next()?.is_none());
        assert!(mgen.next()?.is_none());

        assert_eq!(codes_file.position(), 4);

        remove_file(&file_path)?;

        Ok(())
    }

    #[test]
    fn iterator_filter() -> Result<()> {
        let file_path = write_levels("grib_message_iterator_filter.grib", &[1000, 850, 500])?;

        let mut codes_file = CodesFile::new_from_file(&file_path, ProductKind::GRIB)?;
        let selected: Vec<BufMessage> = codes_file
            .message_iter()
            .filter(|msg| Ok(msg.read_key_dynamic("level")? == DynamicKeyType::Int(850)))
            .collect()?;

        assert_eq!(selected.len(), 1);

        remove_file(&file_path)?;

        Ok(())
    }
}
