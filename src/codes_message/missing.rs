use std::fmt::Debug;

use ndarray::Array2;

use crate::{
    codes_message::{CodesMessage, DynamicKeyType},
    errors::CodesError,
};

/// Missing value used when the message has no `missingValue` key.
pub const DEFAULT_MISSING_VALUE: f64 = 1e30;

impl<P: Debug> CodesMessage<P> {
    /// Returns the value marking missing data in this message.
    ///
    /// That is the `missingValue` key if it is present, otherwise [`DEFAULT_MISSING_VALUE`].
    /// The value is read on every call.
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::UnsupportedKeyType`] when `missingValue` is present
    /// but is not a single number.
    pub fn missing_value(&self) -> Result<f64, CodesError> {
        const KEY: &str = "missingValue";

        if !self.has_key(KEY) {
            return Ok(DEFAULT_MISSING_VALUE);
        }

        match self.read_key_dynamic(KEY)? {
            DynamicKeyType::Float(value) => Ok(value),
            #[allow(clippy::cast_precision_loss)]
            DynamicKeyType::Int(value) => Ok(value as f64),
            _ => Err(CodesError::UnsupportedKeyType {
                key: KEY.to_owned(),
                native_type: self.native_type(KEY)?,
            }),
        }
    }

    /// Returns the `values` grid with every cell equal to [`missing_value()`](CodesMessage::missing_value)
    /// replaced by `None`.
    ///
    /// Cells are compared with exact equality. The returned grid has the same shape
    /// as the `values` grid returned by [`read_key_dynamic()`](CodesMessage::read_key_dynamic).
    ///
    /// # Errors
    ///
    /// Returns the same errors as reading the `values` key and [`missing_value()`](CodesMessage::missing_value).
    pub fn masked_values(&self) -> Result<Array2<Option<f64>>, CodesError> {
        let values = match self.read_key_dynamic("values")? {
            DynamicKeyType::Grid(values) => values,
            _ => {
                return Err(CodesError::UnsupportedKeyType {
                    key: "values".to_owned(),
                    native_type: self.native_type("values")?,
                })
            }
        };

        let missing_value = self.missing_value()?;

        Ok(mask_grid(&values, missing_value))
    }
}

#[allow(clippy::float_cmp)]
fn mask_grid(values: &Array2<f64>, missing_value: f64) -> Array2<Option<f64>> {
    values.map(|&v| if v == missing_value { None } else { Some(v) })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use ndarray::arr2;

    use super::{mask_grid, DEFAULT_MISSING_VALUE};
    use crate::{BufMessage, DynamicKeyType, KeyWrite};

    #[test]
    fn exact_equality_masking() {
        let values = arr2(&[[1.0, 1e30], [1e30 + 1e15, 2.0]]);
        let masked = mask_grid(&values, 1e30);

        assert_eq!(masked.dim(), values.dim());
        assert_eq!(masked[[0, 0]], Some(1.0));
        assert_eq!(masked[[0, 1]], None);
        assert_eq!(masked[[1, 0]], Some(1e30 + 1e15));
        assert_eq!(masked[[1, 1]], Some(2.0));
    }

    #[test]
    fn missing_value_of_message() -> Result<()> {
        let msg = BufMessage::new_from_sample("regular_ll_sfc_grib2")?;

        let missing_value = msg.missing_value()?;

        if !msg.has_key("missingValue") {
            assert_eq!(missing_value.to_bits(), DEFAULT_MISSING_VALUE.to_bits());
        }

        Ok(())
    }

    #[test]
    fn masked_values_mark_missing_cells() -> Result<()> {
        let mut msg = BufMessage::new_from_sample("regular_ll_sfc_grib2")?;
        let missing_value = msg.missing_value()?;

        let orientation = msg.grid_orientation()?;
        let (rows, cols) = orientation.shape();
        let mut grid = ndarray::Array2::<f64>::from_elem((rows, cols), 280.0);
        grid[[0, 0]] = missing_value;
        grid[[rows - 1, cols - 1]] = missing_value;

        msg.write_key("bitsPerValue", 16)?;
        msg.write_key("bitmapPresent", 1)?;
        msg.write_key("missingValue", missing_value)?;
        msg.write_key_dynamic("values", &DynamicKeyType::Grid(grid))?;

        let DynamicKeyType::Grid(values) = msg.read_key_dynamic("values")? else {
            panic!("values key is not a grid");
        };
        let masked = msg.masked_values()?;

        assert_eq!(masked.dim(), values.dim());

        #[allow(clippy::float_cmp)]
        for (mask, value) in masked.iter().zip(values.iter()) {
            if *value == missing_value {
                assert!(mask.is_none());
            } else {
                assert_eq!(*mask, Some(*value));
            }
        }

        assert!(masked[[0, 0]].is_none());
        assert!(masked[[rows - 1, cols - 1]].is_none());
        assert_eq!(masked.iter().filter(|m| m.is_none()).count(), 2);

        Ok(())
    }
}
