use std::path::PathBuf;

use text_row_sort::algorithm::Algorithm;
use text_row_sort::order::Order;
use text_row_sort::row::Row;
use text_row_sort::sort::Sort;
use text_row_sort::source::Source;

mod common;

#[test]
fn test_directory_sort() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    common::write_file(dir.path(), "first.csv", &["f,1", "b,2"])?;
    common::write_file(dir.path(), "second.csv", &["d,3", "a,4"])?;
    common::write_file(dir.path(), "third.csv", &["e,5", "c,6"])?;

    let mut text_row_sort = Sort::new(Source::Directory(dir.path().to_path_buf()));
    text_row_sort.with_tasks(3);
    let sorted = text_row_sort.sort()?;

    assert_eq!(
        sorted,
        common::rows(&[&["a", "4"], &["b", "2"], &["c", "6"], &["d", "3"], &["e", "5"], &["f", "1"]])
    );
    Ok(())
}

#[test]
fn test_directory_tree_sort() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    common::write_file(dir.path(), "first.csv", &["f,1", "b,2"])?;
    common::write_file(dir.path(), "second.csv", &["d,3", "a,4"])?;
    common::write_file(dir.path(), "third.csv", &["e,5", "c,6"])?;

    let mut text_row_sort = Sort::new(Source::Directory(dir.path().to_path_buf()));
    text_row_sort.with_algorithm(Algorithm::Tree);
    text_row_sort.with_field(1);
    let sorted = text_row_sort.sort()?;

    let ids: Vec<&str> = sorted.iter().map(|row| row.field(1).unwrap()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    Ok(())
}

#[test]
fn test_many_files_few_workers() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let mut expected = Vec::new();
    for file in 0..20 {
        let lines = common::random_lines(50, 6, &format!("{file}-"));
        let lines: Vec<&str> = lines.iter().map(|line| line.as_str()).collect();
        common::write_file(dir.path(), &format!("part-{file:02}.csv"), &lines)?;
        expected.extend(lines.iter().map(|line| Row::parse(line, ',')));
    }

    for tasks in [1, 2, 7] {
        let mut text_row_sort = Sort::new(Source::Directory(dir.path().to_path_buf()));
        text_row_sort.with_tasks(tasks);
        text_row_sort.with_order(Order::Desc);
        let sorted = text_row_sort.sort()?;

        assert_eq!(sorted.len(), 1000);
        assert_eq!(common::sorted_multiset(&sorted), common::sorted_multiset(&expected));
        assert!(sorted.windows(2).all(|pair| pair[0].field(0) >= pair[1].field(0)));
    }
    Ok(())
}

#[test]
fn test_line_order_within_file_survives_merge() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    // all keys equal, the stable comparison sort keeps arrival order
    let lines: Vec<String> = (0..200).map(|i| format!("same,{i:04}")).collect();
    let lines: Vec<&str> = lines.iter().map(|line| line.as_str()).collect();
    common::write_file(dir.path(), "only.csv", &lines)?;
    common::write_file(dir.path(), "other.csv", &["same,x", "same,y"])?;

    let mut text_row_sort = Sort::new(Source::Directory(dir.path().to_path_buf()));
    text_row_sort.with_channel_capacity(16);
    let sorted = text_row_sort.sort()?;

    let numbered: Vec<&str> = sorted
        .iter()
        .map(|row| row.field(1).unwrap())
        .filter(|id| id.len() == 4)
        .collect();
    assert_eq!(numbered.len(), 200);
    assert!(numbered.windows(2).all(|pair| pair[0] < pair[1]));
    Ok(())
}

#[test]
fn test_empty_directory() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let sorted = Sort::new(Source::Directory(dir.path().to_path_buf())).sort()?;
    assert!(sorted.is_empty());
    Ok(())
}

#[test]
fn test_directory_with_empty_files() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("empty.csv"), "")?;
    common::write_file(dir.path(), "blank-first.csv", &["", "z,1"])?;
    let mut text_row_sort = Sort::new(Source::Directory(dir.path().to_path_buf()));
    text_row_sort.with_algorithm(Algorithm::Tree);
    assert!(text_row_sort.sort()?.is_empty());
    Ok(())
}

#[test]
fn test_missing_directory() {
    let text_row_sort = Sort::new(Source::Directory(PathBuf::from("./target/no-such-directory")));
    let error = text_row_sort.sort().unwrap_err();
    assert!(error.to_string().contains("no-such-directory"));
}
