//!# Safe access to single GRIB messages through ecCodes
//!
//!This crate wraps the ecCodes C library behind [`CodesMessage`], a value that exclusively owns
//!one ecCodes handle. All key access goes through that value: reads and writes are checked
//!against the native type reported by ecCodes, gridded data is returned as [`ndarray::Array2`]
//!and the handle is released exactly once, either by [`release()`](CodesMessage::release)
//!or when the message is dropped.
//!
//![ecCodes](https://confluence.ecmwf.int/display/ECC/ecCodes+Home) is an open-source library
//!for reading and writing GRIB and BUFR files developed by [European Centre for Medium-Range Weather Forecasts](https://www.ecmwf.int/).
//!
//!## Usage
//!
//!### Creating messages
//!
//!A message comes in two flavours, distinguished by what its handle depends on:
//!
//!- [`BufMessage`] owns all of its data. It is read from a [`CodesFile`] or a [`CodesIndex`],
//!  created from an ecCodes sample with [`new_from_sample()`](BufMessage::new_from_sample)
//!  or copied with [`try_clone()`](CodesMessage::try_clone).
//!- [`RefMessage`] borrows a byte buffer for its whole lifetime. It is created with
//!  [`new_from_bytes()`](RefMessage::new_from_bytes) or
//!  [`new_from_multi_bytes()`](RefMessage::new_from_multi_bytes).
//!
//!Running out of messages in a file or an index is not an error: the constructors return `Ok(None)`.
//!
//!### Reading and writing keys
//!
//!Keys can be read as [`DynamicKeyType`] with [`read_key_dynamic()`](CodesMessage::read_key_dynamic),
//!or with a static type using [`KeyRead`]. The `values` key is always returned as a 2D grid
//!shaped by [`GridOrientation`]. Keys are written with [`KeyWrite`] or
//![`write_key_dynamic()`](CodesMessage::write_key_dynamic).
//!
//!### Example
//!
//!```no_run
//!# use grib_message::{CodesFile, DynamicKeyType, FallibleIterator, KeyRead, KeyWrite, ProductKind};
//!# fn main() -> anyhow::Result<()> {
//!let mut file = CodesFile::new_from_file("./surface.grib", ProductKind::GRIB)?;
//!
//!while let Some(mut msg) = file.message_iter().next()? {
//!    if !msg.has_key("shortName") {
//!        continue;
//!    }
//!
//!    let short_name: String = msg.read_key("shortName")?;
//!
//!    if let DynamicKeyType::Grid(values) = msg.read_key_dynamic("values")? {
//!        println!("{short_name}: grid of shape {:?}", values.dim());
//!    }
//!
//!    // cells equal to the missing value are None
//!    let _masked = msg.masked_values()?;
//!
//!    msg.write_key("level", 2)?;
//!    msg.write_to_file("./modified.grib", "a")?;
//!}
//!# Ok(())
//!# }
//!```
//!
//!### Threads
//!
//![`CodesMessage`] is `Send` but not `Sync`. A message can be moved to another thread,
//!but it cannot be shared, because ecCodes handles are not safe for concurrent access.
//!
//!### ecCodes installation
//!
//!This crate uses [eccodes-sys](https://crates.io/crates/eccodes-sys) with default options to link ecCodes.
//!Check `eccodes-sys` website for more details on how it links the library.
//!
//!The reccomended way to install ecCodes on your computer is using your package manager.
//!For example, on Ubuntu you can use `apt-get`:
//!
//!```bash
//!$ sudo apt-get install libeccodes-dev
//!```
//!
//!Tests and benchmarks use GRIB samples distributed with ecCodes,
//!so the samples directory must be installed as well.
//!
//!### Features
//!
//!- `docs` - builds the crate without linking ecCodes, particularly useful when building the documentation
//!on [docs.rs](https://docs.rs/). For more details check documentation of [eccodes-sys](https://crates.io/crates/eccodes-sys).

pub mod codes_file;
pub mod codes_index;
pub mod codes_message;
pub mod errors;
mod intermediate_bindings;
mod pointer_guard;

pub use codes_file::{CodesFile, MessageIter, ProductKind};
pub use codes_index::{CodesIndex, IndexMessageIter, Select};
pub use codes_message::{
    BufMessage, CodesMessage, DynamicKeyType, GridData, GridOrientation, KeyRead, KeyWrite,
    NativeKeyType, RefMessage, BYTES_BUFFER_CAPACITY, DEFAULT_MISSING_VALUE,
    TEXT_BUFFER_CAPACITY,
};
pub use errors::CodesError;
pub use fallible_iterator::FallibleIterator;
