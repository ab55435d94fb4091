//! Definition of errors returned by this crate

use errno::Errno;
use thiserror::Error;

use crate::NativeKeyType;

/// Errors returned by the all functions in the crate.
#[derive(Error, Debug)]
pub enum CodesError {
    /// Returned when ecCodes function returns a non-zero status code
    /// that is present in the status table.
    #[error("ecCodes function returned status {}: {0}", .0.code())]
    Internal(#[from] CodesInternal),

    /// Returned when ecCodes function returns a status code
    /// that is not present in the status table.
    #[error("ecCodes function returned unrecognized status {0}")]
    UnrecognizedStatus(i32),

    /// ecCodes returned a null handle for data that should contain a message.
    #[error("Invalid message, ecCodes could not create a handle from provided data")]
    InvalidMessage,

    /// Returned when the requested key resolves to a native type
    /// that cannot be represented by [`DynamicKeyType`](crate::DynamicKeyType).
    #[error("Key {key} has native type {native_type:?} which is not supported")]
    UnsupportedKeyType {
        /// Name of the requested key
        key: String,
        /// Native type reported by ecCodes
        native_type: NativeKeyType,
    },

    /// Returned when the number of elements does not match `Ni * Nj`.
    #[error("Array of length {len} cannot be reshaped into a grid with Ni = {ni} and Nj = {nj}")]
    ShapeMismatch {
        /// Length of the flat array
        len: usize,
        /// Number of points along a parallel
        ni: usize,
        /// Number of points along a meridian
        nj: usize,
    },

    /// Returned when `Ni`, `Nj` or `numberOfPoints` has a negative value.
    #[error("Grid dimension {key} has negative value {value}")]
    NegativeGridDimension {
        /// Name of the dimension key
        key: &'static str,
        /// Value read from the message
        value: i64,
    },

    /// Returned when an accessor is called on a message whose handle was already released.
    #[error("Message handle has already been released")]
    UseAfterRelease,

    /// Null pointer encountered where a valid pointer was required.
    #[error("Null pointer encountered")]
    NullPtr,

    /// Returned by [`KeyRead::read_key()`](crate::KeyRead::read_key) when the native type
    /// of the key does not match the requested type.
    #[error("The native type of key does not match the requested type")]
    WrongRequestedKeyType,

    /// Returned by [`KeyRead::read_key()`](crate::KeyRead::read_key) when a scalar
    /// is requested for an array key.
    #[error("The size of key does not match the requested type")]
    WrongRequestedKeySize,

    /// Returned when a key name, value or path contains an interior nul byte.
    #[error("String contains an interior nul byte")]
    NulChar(#[from] std::ffi::NulError),

    /// Returned when a string returned by ecCodes is not valid UTF-8.
    #[error("String returned by ecCodes is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Returned when a file path cannot be passed to ecCodes as UTF-8 string.
    #[error("Path is not valid UTF-8")]
    NonUtf8Path,

    /// Returned when the file could not be opened or read.
    #[error("Error occured while opening the file: {0}")]
    FileHandlingInterrupted(#[from] std::io::Error),

    /// Returned when libc function returns non-zero code or null pointer.
    #[error("libc function failed with code {0}: {1}")]
    LibcNonZero(i32, Errno),
}

/// Status codes of ecCodes functions together with their messages.
///
/// The numeric code can be retrieved with [`code()`](CodesInternal::code)
/// and the message is the [`Display`](std::fmt::Display) of the variant.
#[derive(Copy, Eq, PartialEq, Clone, Ord, PartialOrd, Hash, Error, Debug, num_derive::FromPrimitive)]
#[allow(missing_docs)]
pub enum CodesInternal {
    #[error("No error")]
    CodesSuccess = 0,
    #[error("End of resource reached")]
    CodesEndOfFile = -1,
    #[error("Internal error")]
    CodesInternalError = -2,
    #[error("Passed buffer is too small")]
    CodesBufferTooSmall = -3,
    #[error("Function not yet implemented")]
    CodesNotImplemented = -4,
    #[error("Missing 7777 at end of message")]
    Codes7777NotFound = -5,
    #[error("Passed array is too small")]
    CodesArrayTooSmall = -6,
    #[error("File not found")]
    CodesFileNotFound = -7,
    #[error("Code not found in code table")]
    CodesCodeNotFoundInTable = -8,
    #[error("Array size mismatch")]
    CodesWrongArraySize = -9,
    #[error("Key/value not found")]
    CodesNotFound = -10,
    #[error("Input output problem")]
    CodesIoProblem = -11,
    #[error("Message invalid")]
    CodesInvalidMessage = -12,
    #[error("Decoding invalid")]
    CodesDecodingError = -13,
    #[error("Encoding invalid")]
    CodesEncodingError = -14,
    #[error("Code cannot unpack because of string too small")]
    CodesNoMoreInSet = -15,
    #[error("Problem with calculation of geographic attributes")]
    CodesGeocalculusProblem = -16,
    #[error("Memory allocation error")]
    CodesOutOfMemory = -17,
    #[error("Value is read only")]
    CodesReadOnly = -18,
    #[error("Invalid argument")]
    CodesInvalidArgument = -19,
    #[error("Null handle")]
    CodesNullHandle = -20,
    #[error("Invalid section number")]
    CodesInvalidSectionNumber = -21,
    #[error("Value cannot be missing")]
    CodesValueCannotBeMissing = -22,
    #[error("Wrong message length")]
    CodesWrongLength = -23,
    #[error("Invalid key type")]
    CodesInvalidType = -24,
    #[error("Unable to set step")]
    CodesWrongStep = -25,
    #[error("Wrong units for step (step must be integer)")]
    CodesWrongStepUnit = -26,
    #[error("Invalid file id")]
    CodesInvalidFile = -27,
    #[error("Invalid grib id")]
    CodesInvalidGrib = -28,
    #[error("Invalid index id")]
    CodesInvalidIndex = -29,
    #[error("Invalid iterator id")]
    CodesInvalidIterator = -30,
    #[error("Invalid keys iterator id")]
    CodesInvalidKeysIterator = -31,
    #[error("Invalid nearest id")]
    CodesInvalidNearest = -32,
    #[error("Invalid order by")]
    CodesInvalidOrderby = -33,
    #[error("Missing a key from the fieldset")]
    CodesMissingKey = -34,
    #[error("The point is out of the grid area")]
    CodesOutOfArea = -35,
    #[error("Concept no match")]
    CodesConceptNoMatch = -36,
    #[error("Hash array no match")]
    CodesHashArrayNoMatch = -37,
    #[error("Definitions files not found")]
    CodesNoDefinitions = -38,
    #[error("Wrong type while packing")]
    CodesWrongType = -39,
    #[error("End of resource")]
    CodesEnd = -40,
    #[error("Unable to code a field without values")]
    CodesNoValues = -41,
    #[error("Grid description is wrong or inconsistent")]
    CodesWrongGrid = -42,
    #[error("End of index reached")]
    CodesEndOfIndex = -43,
    #[error("Null index")]
    CodesNullIndex = -44,
    #[error("End of resource reached when reading message")]
    CodesPrematureEndOfFile = -45,
    #[error("An internal array is too small")]
    CodesInternalArrayTooSmall = -46,
    #[error("Message is too large for the current architecture")]
    CodesMessageTooLarge = -47,
    #[error("Constant field")]
    CodesConstantField = -48,
    #[error("Switch unable to find a matching case")]
    CodesSwitchNoMatch = -49,
    #[error("Underflow")]
    CodesUnderflow = -50,
    #[error("Message malformed")]
    CodesMessageMalformed = -51,
    #[error("Index is corrupted")]
    CodesCorruptedIndex = -52,
    #[error("Invalid number of bits per value")]
    CodesInvalidBpv = -53,
    #[error("Edition of two messages is different")]
    CodesDifferentEdition = -54,
    #[error("Value is different")]
    CodesValueDifferent = -55,
    #[error("Invalid key value")]
    CodesInvalidKeyValue = -56,
    #[error("String is smaller than requested")]
    CodesStringTooSmall = -57,
    #[error("Wrong type conversion")]
    CodesWrongConversion = -58,
    #[error("Missing BUFR table entry for descriptor")]
    CodesMissingBufrEntry = -59,
    #[error("Null pointer")]
    CodesNullPointer = -60,
    #[error("Attribute is already present, cannot add")]
    CodesAttributeClash = -61,
    #[error("Too many attributes. Increase MAX_ACCESSOR_ATTRIBUTES")]
    CodesTooManyAttributes = -62,
    #[error("Attribute not found.")]
    CodesAttributeNotFound = -63,
    #[error("Edition not supported.")]
    CodesUnsupportedEdition = -64,
    #[error("Value out of coding range")]
    CodesOutOfRange = -65,
    #[error("Size of bitmap is incorrect")]
    CodesWrongBitmapSize = -66,
    #[error("Functionality not enabled")]
    CodesFunctionalityNotEnabled = -67,
    #[error("Value mismatch")]
    CodesValueMismatch = -68,
    #[error("Double values are different")]
    CodesDoubleValueMismatch = -69,
    #[error("Long values are different")]
    CodesLongValueMismatch = -70,
    #[error("Byte values are different")]
    CodesByteValueMismatch = -71,
    #[error("String values are different")]
    CodesStringValueMismatch = -72,
    #[error("Offset mismatch")]
    CodesOffsetMismatch = -73,
    #[error("Count mismatch")]
    CodesCountMismatch = -74,
    #[error("Name mismatch")]
    CodesNameMismatch = -75,
    #[error("Type mismatch")]
    CodesTypeMismatch = -76,
    #[error("Type and value mismatch")]
    CodesTypeAndValueMismatch = -77,
    #[error("Unable to compare accessors")]
    CodesUnableToCompareAccessors = -78,
    #[error("Assertion failure")]
    CodesAssertionFailure = -79,
}

impl CodesInternal {
    /// Numeric status code as returned by ecCodes.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::{CodesError, CodesInternal};
    use num_traits::FromPrimitive;

    #[test]
    fn status_table_lookup() {
        let status: CodesInternal = FromPrimitive::from_i32(-10).unwrap();
        assert_eq!(status, CodesInternal::CodesNotFound);
        assert_eq!(status.code(), -10);
        assert_eq!(status.to_string(), "Key/value not found");

        let end_of_index: CodesInternal = FromPrimitive::from_i32(-43).unwrap();
        assert_eq!(end_of_index, CodesInternal::CodesEndOfIndex);

        let unknown: Option<CodesInternal> = FromPrimitive::from_i32(-1000);
        assert!(unknown.is_none());
    }

    #[test]
    fn internal_error_carries_code_and_message() {
        let err = CodesError::from(CodesInternal::CodesReadOnly);
        assert_eq!(
            err.to_string(),
            "ecCodes function returned status -18: Value is read only"
        );
    }
}
