// Single-argument form: the pointer must never be null.
// Two-argument form: a null pointer is returned as the given error.
macro_rules! non_null {
    ($ptr:expr) => {
        if $ptr.is_null() {
            debug_assert!(false, "Null pointer encountered");
            return Err(CodesError::NullPtr);
        }
    };
    ($ptr:expr, $err:expr) => {
        if $ptr.is_null() {
            return Err($err);
        }
    };
}
pub(crate) use non_null;
