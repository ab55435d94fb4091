use std::thread;

use anyhow::{Context, Result};
use grib_message::{
    errors::CodesInternal, BufMessage, CodesError, DynamicKeyType, GridOrientation, KeyRead,
    KeyWrite, RefMessage, DEFAULT_MISSING_VALUE,
};

const SAMPLE: &str = "regular_ll_sfc_grib2";

#[test]
fn serialized_clone_round_trip() -> Result<()> {
    let mut msg = BufMessage::new_from_sample(SAMPLE)?;
    msg.write_key("level", 300)?;

    let clone = msg.try_clone()?.context("clone is none")?;
    let data = clone.to_raw_bytes()?;
    let decoded = RefMessage::new_from_bytes(&data)?;

    assert_eq!(decoded.to_raw_bytes()?, msg.to_raw_bytes()?);

    Ok(())
}

#[test]
fn clone_independent_under_mutation() -> Result<()> {
    let msg = BufMessage::new_from_sample(SAMPLE)?;
    let mut clone = msg.try_clone()?.context("clone is none")?;

    clone.write_key("level", 123)?;
    clone.write_key("centre", "cnmc")?;

    assert_ne!(msg.read_key_dynamic("level")?, DynamicKeyType::Int(123));
    assert_eq!(clone.read_key_dynamic("level")?, DynamicKeyType::Int(123));
    assert_ne!(msg.read_key_dynamic("centre")?, clone.read_key_dynamic("centre")?);

    Ok(())
}

#[test]
fn integer_set_get() -> Result<()> {
    let mut msg = BufMessage::new_from_sample(SAMPLE)?;

    for level in [0, 2, 850, 1000] {
        msg.write_key("level", level)?;
        assert_eq!(KeyRead::<i64>::read_key(&msg, "level")?, level);
        assert_eq!(msg.read_key_dynamic("level")?, DynamicKeyType::Int(level));
    }

    Ok(())
}

#[test]
fn nonexistent_key() -> Result<()> {
    let msg = BufMessage::new_from_sample(SAMPLE)?;

    assert!(!msg.has_key("nonexistentKey12345"));
    assert!(msg.has_key("shortName"));

    match msg.read_key_dynamic("nonexistentKey12345") {
        Err(CodesError::Internal(CodesInternal::CodesNotFound)) => (),
        other => panic!("Incorrect result: {other:?}"),
    }

    Ok(())
}

#[test]
fn values_grid_and_mask_shapes() -> Result<()> {
    let msg = BufMessage::new_from_sample(SAMPLE)?;
    let orientation = GridOrientation::from_message(&msg)?;

    let DynamicKeyType::Grid(values) = msg.read_key_dynamic("values")? else {
        panic!("values key is not a grid");
    };
    let masked = msg.masked_values()?;

    assert_eq!(values.dim(), orientation.shape());
    assert_eq!(masked.dim(), values.dim());

    let missing_value = msg.missing_value()?;
    let expected_none = values.iter().filter(|v| v.to_bits() == missing_value.to_bits()).count();
    assert_eq!(masked.iter().filter(|m| m.is_none()).count(), expected_none);

    Ok(())
}

#[test]
fn default_missing_value() {
    float_cmp::assert_approx_eq!(f64, DEFAULT_MISSING_VALUE, 1e30, ulps = 0);
}

#[test]
fn message_moves_between_threads() -> Result<()> {
    let mut handles = vec![];

    for level in [1000, 850, 500, 250] {
        let mut msg = BufMessage::new_from_sample(SAMPLE)?;
        msg.write_key("level", level)?;

        handles.push(thread::spawn(move || -> Result<i64> {
            for _ in 0..10 {
                let _ = msg.read_key_dynamic("values")?;
            }
            Ok(msg.read_key("level")?)
        }));
    }

    let mut levels = vec![];
    for handle in handles {
        levels.push(handle.join().map_err(|_| anyhow::anyhow!("thread panicked"))??);
    }

    assert_eq!(levels, vec![1000, 850, 500, 250]);

    Ok(())
}

#[test]
fn lifecycle_logs_no_errors() -> Result<()> {
    testing_logger::setup();

    {
        let msg = BufMessage::new_from_sample(SAMPLE)?;
        let data = msg.to_raw_bytes()?;
        let ref_msg = RefMessage::new_from_bytes(&data)?;
        let _ = ref_msg.read_key_dynamic("shortName")?;
        ref_msg.release()?;
    }

    testing_logger::validate(|captured_logs| {
        assert!(captured_logs
            .iter()
            .all(|log| log.level > log::Level::Warn));
    });

    Ok(())
}
