use pretty_assertions::assert_eq;
use simkit_source::{FileScanner, LineCounter, SourceNormalizer};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn setup_tree() -> TempDir {
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("src/hardware/cpu")).unwrap();
    fs::create_dir_all(root.join("src/headers")).unwrap();
    fs::write(
        root.join("src/hardware/cpu/isa.c"),
        "#include<stdio.h>\n#include<headers/cpu.h>\n   \nvoid isa() {}\n",
    )
    .unwrap();
    fs::write(
        root.join("src/headers/cpu.h"),
        "#ifndef CPU_H\n#define CPU_H\n#endif",
    )
    .unwrap();
    fs::write(root.join("README.md"), "   \n").unwrap();
    temp
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn count_total_is_sum_and_order_non_increasing() {
    let temp = setup_tree();
    let scanner = FileScanner::new(temp.path());

    let report = LineCounter::new(&scanner).count().expect("count");

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].path, PathBuf::from("src/hardware/cpu/isa.c"));
    assert_eq!(report.records[0].lines, 4);
    assert_eq!(report.records[1].lines, 3);
    assert_eq!(
        report.total,
        report.records.iter().map(|r| r.lines).sum::<usize>()
    );
    assert!(report
        .records
        .windows(2)
        .all(|pair| pair[0].lines >= pair[1].lines));
}

#[test]
fn format_rewrites_in_place_and_is_idempotent() {
    let temp = setup_tree();
    let root = temp.path();
    let scanner = FileScanner::new(root);
    let normalizer = SourceNormalizer::default();

    let first = normalizer.format(&scanner).expect("first pass");
    assert_eq!(first.rewritten, vec![PathBuf::from("src/hardware/cpu/isa.c")]);
    assert_eq!(first.unchanged, 1);
    assert!(first.skipped.is_empty());
    assert_eq!(
        read(root, "src/hardware/cpu/isa.c"),
        "#include <stdio.h>\n#include \"headers/cpu.h\"\n\nvoid isa() {}\n"
    );
    // not a source file
    assert_eq!(read(root, "README.md"), "   \n");

    let after_first = read(root, "src/hardware/cpu/isa.c");
    let second = normalizer.format(&scanner).expect("second pass");
    assert!(second.rewritten.is_empty());
    assert_eq!(second.unchanged, 2);
    assert_eq!(read(root, "src/hardware/cpu/isa.c"), after_first);
}

#[test]
fn undecodable_file_is_skipped_and_others_still_formatted() {
    let temp = setup_tree();
    let root = temp.path();
    let latin = b"#include<stdio.h>\n// caf\xe9\n   \n".to_vec();
    fs::write(root.join("src/bad.c"), &latin).unwrap();

    let report = SourceNormalizer::default()
        .format(&FileScanner::new(root))
        .expect("format");

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, PathBuf::from("src/bad.c"));
    assert_eq!(fs::read(root.join("src/bad.c")).unwrap(), latin);
    assert_eq!(
        read(root, "src/hardware/cpu/isa.c"),
        "#include <stdio.h>\n#include \"headers/cpu.h\"\n\nvoid isa() {}\n"
    );
}
