use std::{
    fs::remove_file,
    path::{Path, PathBuf},
    thread,
};

use anyhow::{Context, Result};
use grib_message::{
    BufMessage, CodesFile, CodesIndex, DynamicKeyType, FallibleIterator, KeyRead, KeyWrite,
    ProductKind, Select,
};
use rand::Rng;

const LEVELS: [i64; 4] = [1000, 850, 500, 250];

fn write_levels(file_name: &str) -> Result<PathBuf> {
    let file_path = std::env::temp_dir().join(file_name);

    for (i, level) in LEVELS.iter().enumerate() {
        let mut msg = BufMessage::new_from_sample("regular_ll_sfc_grib2")?;
        msg.write_key("level", *level)?;
        msg.write_to_file(&file_path, if i == 0 { "w" } else { "a" })?;
    }

    Ok(file_path)
}

fn level_index(file_path: &Path, short_name: &str, level: i64) -> Result<CodesIndex> {
    Ok(CodesIndex::new_from_keys(&["shortName", "level"])?
        .add_grib_file(file_path)?
        .select("shortName", short_name)?
        .select("level", level)?)
}

#[test]
fn index_matches_file() -> Result<()> {
    let file_path = write_levels("grib_message_index_matches_file.grib")?;

    let mut codes_file = CodesFile::new_from_file(&file_path, ProductKind::GRIB)?;
    let from_file: Vec<BufMessage> = codes_file.message_iter().collect()?;
    let short_name: String = from_file[0].read_key("shortName")?;

    for msg in &from_file {
        let level: i64 = msg.read_key("level")?;
        let mut index = level_index(&file_path, &short_name, level)?;

        let from_index = index.message_iter().next()?.context("no message in index")?;
        assert_eq!(from_index.to_raw_bytes()?, msg.to_raw_bytes()?);
        assert!(index.message_iter().next()?.is_none());
    }

    remove_file(&file_path)?;

    Ok(())
}

#[test]
fn index_selection_not_found() -> Result<()> {
    let file_path = write_levels("grib_message_index_not_found.grib")?;
    let short_name: String =
        BufMessage::new_from_sample("regular_ll_sfc_grib2")?.read_key("shortName")?;

    let mut index = level_index(&file_path, &short_name, 1)?;

    assert!(BufMessage::new_from_codes_index(&mut index)?.is_none());
    assert!(index.message_iter().next()?.is_none());

    remove_file(&file_path)?;

    Ok(())
}

#[test]
fn index_from_many_threads() -> Result<()> {
    let file_path = write_levels("grib_message_index_threads.grib")?;
    let short_name: String =
        BufMessage::new_from_sample("regular_ll_sfc_grib2")?.read_key("shortName")?;

    let mut handles = vec![];

    for _ in 0..8 {
        let file_path = file_path.clone();
        let short_name = short_name.clone();

        handles.push(thread::spawn(move || -> Result<()> {
            let mut rng = rand::thread_rng();

            for _ in 0..10 {
                let level = LEVELS[rng.gen_range(0..LEVELS.len())];
                let mut index = level_index(&file_path, &short_name, level)?;

                let msg = index.message_iter().next()?.context("no message in index")?;
                assert_eq!(msg.read_key_dynamic("level")?, DynamicKeyType::Int(level));
            }

            Ok(())
        }));
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("thread panicked"))??;
    }

    remove_file(&file_path)?;

    Ok(())
}
