use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use data_encoding::HEXLOWER;
use rand::Rng;
use text_row_sort::row::Row;

pub fn setup() {
    let results_dir_path = PathBuf::from_str("./target/results/").unwrap();

    if !results_dir_path.exists() {
        fs::create_dir_all(&results_dir_path).unwrap_or_else(|_|
            panic!("Failed to create results directory: {:?}", results_dir_path)
        );
    }
}

#[allow(dead_code)]
pub fn read_lines(path: PathBuf) -> Result<Vec<String>, anyhow::Error> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().map(|x| x.unwrap()).collect();
    Ok(lines)
}

#[allow(dead_code)]
pub fn temp_file_name(dir: &str) -> PathBuf {
    let mut result = PathBuf::from(dir);
    let name = HEXLOWER.encode(&rand::random::<[u8; 16]>());
    result.push(name);
    result
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, lines: &[&str]) -> Result<PathBuf, anyhow::Error> {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content)?;
    Ok(path)
}

#[allow(dead_code)]
pub fn rows(values: &[&[&str]]) -> Vec<Row> {
    values.iter().map(|fields| Row::from(fields.to_vec())).collect()
}

/// Random two column lines: a key made of `key_len` lowercase letters and a unique id
#[allow(dead_code)]
pub fn random_lines(count: usize, key_len: usize, id_prefix: &str) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let key: String = (0..key_len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect();
            format!("{key},{id_prefix}{i}")
        })
        .collect()
}

#[allow(dead_code)]
pub fn sorted_multiset(rows: &[Row]) -> Vec<Row> {
    let mut rows = rows.to_vec();
    rows.sort();
    rows
}
