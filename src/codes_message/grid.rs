//! Reshaping of flat GRIB arrays into 2D grids

use std::fmt::Debug;

use ndarray::{Array2, ShapeBuilder};

use crate::{
    codes_message::{CodesMessage, KeyRead},
    errors::CodesError,
    intermediate_bindings::codes_grib_get_data,
};

/// Struct returned by [`CodesMessage::grid_data()`].
/// The arrays are collocated, meaning that `longitudes[[i, j]]` and `latitudes[[i, j]]`
/// are the coordinates of `values[[i, j]]`.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct GridData {
    /// Longitudes in degrees
    pub longitudes: Array2<f64>,
    /// Latitudes in degrees
    pub latitudes: Array2<f64>,
    /// Values in native GRIB units
    pub values: Array2<f64>,
}

/// Layout of the flat arrays stored in the message, read from
/// `Ni`, `Nj` and `jPointsAreConsecutive` keys.
///
/// When `jPointsAreConsecutive` is non-zero the flat array is read in column-major
/// order into a grid of shape `(Nj, Ni)`, otherwise in row-major order into
/// a grid of shape `(Ni, Nj)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GridOrientation {
    /// Number of points along a parallel
    pub ni: usize,
    /// Number of points along a meridian
    pub nj: usize,
    /// Whether consecutive points vary along the `Nj` axis
    pub j_points_consecutive: bool,
}

impl GridOrientation {
    /// Reads the orientation from the message.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when any of the keys cannot be read
    /// and [`CodesError::NegativeGridDimension`] when `Ni` or `Nj` is negative.
    pub fn from_message<P: Debug>(message: &CodesMessage<P>) -> Result<Self, CodesError> {
        let ni = grid_dimension(message, "Ni")?;
        let nj = grid_dimension(message, "Nj")?;
        let j_points_consecutive: i64 = message.read_key("jPointsAreConsecutive")?;

        Ok(GridOrientation {
            ni,
            nj,
            j_points_consecutive: j_points_consecutive != 0,
        })
    }

    /// Shape of the grid produced by [`reshape()`](GridOrientation::reshape).
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        if self.j_points_consecutive {
            (self.nj, self.ni)
        } else {
            (self.ni, self.nj)
        }
    }

    /// Reshapes flat array into a 2D grid.
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::ShapeMismatch`] when the array length is not `Ni * Nj`.
    pub fn reshape(&self, flat: Vec<f64>) -> Result<Array2<f64>, CodesError> {
        self.check_len(flat.len())?;

        let grid = if self.j_points_consecutive {
            Array2::from_shape_vec(self.shape().f(), flat)
        } else {
            Array2::from_shape_vec(self.shape(), flat)
        };

        grid.map_err(|_| self.mismatch(self.ni * self.nj))
    }

    /// Inverse of [`reshape()`](GridOrientation::reshape): returns the grid in the order
    /// in which it is stored in the message.
    ///
    /// # Errors
    ///
    /// Returns [`CodesError::ShapeMismatch`] when the grid shape differs from [`shape()`](GridOrientation::shape).
    pub fn flatten(&self, grid: &Array2<f64>) -> Result<Vec<f64>, CodesError> {
        if grid.dim() != self.shape() {
            return Err(self.mismatch(grid.len()));
        }

        if self.j_points_consecutive {
            Ok(grid.t().iter().copied().collect())
        } else {
            Ok(grid.iter().copied().collect())
        }
    }

    fn check_len(&self, len: usize) -> Result<(), CodesError> {
        match self.ni.checked_mul(self.nj) {
            Some(expected) if expected == len => Ok(()),
            _ => Err(self.mismatch(len)),
        }
    }

    fn mismatch(&self, len: usize) -> CodesError {
        CodesError::ShapeMismatch {
            len,
            ni: self.ni,
            nj: self.nj,
        }
    }
}

fn grid_dimension<P: Debug>(
    message: &CodesMessage<P>,
    key: &'static str,
) -> Result<usize, CodesError> {
    let value: i64 = message.read_key(key)?;
    usize::try_from(value).map_err(|_| CodesError::NegativeGridDimension { key, value })
}

impl<P: Debug> CodesMessage<P> {
    /// Reads the [`GridOrientation`] of this message.
    ///
    /// # Errors
    ///
    /// See [`GridOrientation::from_message()`].
    pub fn grid_orientation(&self) -> Result<GridOrientation, CodesError> {
        GridOrientation::from_message(self)
    }

    /// Returns longitudes, latitudes and values of all gridpoints as 2D grids.
    ///
    /// The data is extracted with a single ecCodes call (independent of the `values` key)
    /// and all three arrays are reshaped with the same [`GridOrientation`],
    /// so they stay spatially aligned.
    ///
    /// # Errors
    ///
    /// Returns [`CodesInternal`](crate::errors::CodesInternal) when the extraction fails
    /// or required keys (`numberOfPoints`, `Ni`, `Nj`, `jPointsAreConsecutive`) cannot be read.
    ///
    /// Returns [`CodesError::ShapeMismatch`] when `numberOfPoints` is not `Ni * Nj`.
    pub fn grid_data(&self) -> Result<GridData, CodesError> {
        let handle = self.live_handle()?;
        let number_of_points = grid_dimension(self, "numberOfPoints")?;
        let orientation = self.grid_orientation()?;

        let (latitudes, longitudes, values) =
            unsafe { codes_grib_get_data(handle, number_of_points)? };

        Ok(GridData {
            longitudes: orientation.reshape(longitudes)?,
            latitudes: orientation.reshape(latitudes)?,
            values: orientation.reshape(values)?,
        })
    }
}
