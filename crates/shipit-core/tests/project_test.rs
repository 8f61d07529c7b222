use shipit_core::{ArchiveSource, Error, Pipeline, Project, Result, TerminalSelector, OUTPUT_FILE};
use shipit_testing::assertions::{assert_zip_entry, assert_zip_names};
use shipit_testing::fixtures::{create_project, write_config};
use shipit_testing::helpers::{files_in, report_names, SharedBuffer};
use shipit_testing::TestDir;
use std::fs;
use std::io::Read;
use tempfile::TempDir;

fn zip_bytes(project: &mut Project) -> Vec<u8> {
    let mut bytes = Vec::new();
    project.zip().unwrap().read_to_end(&mut bytes).unwrap();
    bytes
}

#[test]
fn test_zip_packs_project_files() {
    let test_dir = TestDir::new().unwrap();
    create_project(&test_dir).unwrap();

    let mut project = Project::open(test_dir.path()).unwrap();
    let bytes = zip_bytes(&mut project);

    assert_zip_names(
        &bytes,
        &["index.html", "dist/bundle.js", "src/app.js", "README.md"],
    )
    .unwrap();
    assert_zip_entry(&bytes, "src/app.js", b"console.log('hello')").unwrap();
}

#[test]
fn test_zip_is_reproducible() {
    let test_dir = TestDir::new().unwrap();
    create_project(&test_dir).unwrap();

    let mut project = Project::open(test_dir.path()).unwrap();
    let first = zip_bytes(&mut project);
    let second = zip_bytes(&mut project);

    let archive = zip::ZipArchive::new(std::io::Cursor::new(first)).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(second)).unwrap();
    let names_again: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert_eq!(names, names_again);
}

#[test]
fn test_config_ignore_patterns() {
    let test_dir = TestDir::new().unwrap();
    create_project(&test_dir).unwrap();
    write_config(
        &test_dir,
        r#"
        [archive]
        ignore = ["*.md", "dist", ".git/**"]
        "#,
    )
    .unwrap();

    let mut project = Project::open(test_dir.path()).unwrap();
    let bytes = zip_bytes(&mut project);

    assert_zip_names(&bytes, &["index.html", "src/app.js", "shipit.toml"]).unwrap();
}

#[test]
fn test_invalid_config_fails_open() {
    let test_dir = TestDir::new().unwrap();
    write_config(&test_dir, "[archive]\ncompression_level = \"high\"\n").unwrap();

    let err = Project::open(test_dir.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_store_level_packs_uncompressed_sizes() {
    let test_dir = TestDir::new().unwrap();
    create_project(&test_dir).unwrap();
    write_config(&test_dir, "[archive]\ncompression_level = 0\n").unwrap();

    let mut project = Project::open(test_dir.path()).unwrap();
    let bytes = zip_bytes(&mut project);

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let bundle = archive.by_name("dist/bundle.js").unwrap();
    assert_eq!(bundle.compression(), zip::CompressionMethod::Stored);
    assert_eq!(bundle.size(), 64 * 1024);
    assert_eq!(bundle.compressed_size(), 64 * 1024);
}

#[test]
fn test_deflate_levels_compress_entries() {
    for level in [1, 9] {
        let test_dir = TestDir::new().unwrap();
        create_project(&test_dir).unwrap();
        write_config(&test_dir, &format!("[archive]\ncompression_level = {}\n", level)).unwrap();

        let mut project = Project::open(test_dir.path()).unwrap();
        let bytes = zip_bytes(&mut project);

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let bundle = archive.by_name("dist/bundle.js").unwrap();
        assert_eq!(bundle.compression(), zip::CompressionMethod::Deflated);
        assert!(bundle.compressed_size() < bundle.size());
    }
}

#[cfg(unix)]
#[test]
fn test_build_runs_hooks_in_project_dir() {
    let test_dir = TestDir::new().unwrap();
    create_project(&test_dir).unwrap();
    write_config(
        &test_dir,
        r#"
        [build]
        hooks = ["mkdir -p gen", "echo built > gen/stamp.txt"]
        "#,
    )
    .unwrap();

    let mut project = Project::open(test_dir.path()).unwrap();
    project.build().unwrap();

    let bytes = zip_bytes(&mut project);
    assert_zip_entry(&bytes, "gen/stamp.txt", b"built\n").unwrap();
}

#[cfg(unix)]
#[test]
fn test_failing_hook_stops_build() {
    let test_dir = TestDir::new().unwrap();
    write_config(
        &test_dir,
        r#"
        [build]
        hooks = ["exit 3", "touch never.txt"]
        "#,
    )
    .unwrap();

    let mut project = Project::open(test_dir.path()).unwrap();
    let err = project.build().unwrap_err();

    match err {
        Error::Hook { command, status } => {
            assert_eq!(command, "exit 3");
            assert!(status.contains('3'));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!test_dir.path().join("never.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_skipped() {
    let test_dir = TestDir::new().unwrap();
    let target = test_dir.create_file("real.txt", b"real").unwrap();
    std::os::unix::fs::symlink(&target, test_dir.path().join("link.txt")).unwrap();

    let mut project = Project::open(test_dir.path()).unwrap();
    let bytes = zip_bytes(&mut project);

    assert_zip_names(&bytes, &["real.txt"]).unwrap();
}

#[test]
fn test_pipeline_reports_project_breakdown() {
    let test_dir = TestDir::new().unwrap();
    create_project(&test_dir).unwrap();

    let project = Project::open(test_dir.path()).unwrap();
    let sink = SharedBuffer::new();

    let mut report_out = Vec::new();
    let summary = Pipeline::new(project, || -> Result<SharedBuffer> { Ok(sink.clone()) })
        .size_report(true)
        .run(&mut report_out)
        .unwrap();

    assert_eq!(summary.bytes_written, sink.len() as u64);

    let report = summary.report.unwrap();
    assert_eq!(report.excluded().unwrap().name, "dist/bundle.js");

    let text = String::from_utf8(report_out).unwrap();
    let names = report_names(&text);
    assert_eq!(names.first().map(String::as_str), Some("index.html"));
    assert_eq!(names.len(), 3);
    assert!(!names.iter().any(|n| n == "dist/bundle.js"));
}

#[test]
fn test_pipeline_writes_output_file_when_interactive() {
    let test_dir = TestDir::new().unwrap();
    create_project(&test_dir).unwrap();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join(OUTPUT_FILE);

    let project = Project::open(test_dir.path()).unwrap();
    Pipeline::new(project, TerminalSelector::with_path(true, &out))
        .run(&mut Vec::<u8>::new())
        .unwrap();

    assert_eq!(files_in(out_dir.path()), vec![OUTPUT_FILE.to_string()]);
    let bytes = fs::read(&out).unwrap();
    assert_zip_names(
        &bytes,
        &["index.html", "dist/bundle.js", "src/app.js", "README.md"],
    )
    .unwrap();
}
