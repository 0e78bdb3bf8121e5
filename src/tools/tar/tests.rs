// nise-rs: Director-less BOSH Release Installer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{TarOperation, TarTool, absolute};
use std::path::Path;

#[test]
fn test_tar_builder_defaults() {
    let tool = TarTool::new();
    assert_eq!(tool.operation, TarOperation::Extract);
    assert!(tool.archive_required().is_err());
    assert!(tool.directory_required().is_err());
}

#[test]
fn test_absolute_keeps_absolute_paths() {
    assert_eq!(
        absolute(Path::new("/tmp/out.tar.gz")).expect("absolute"),
        Path::new("/tmp/out.tar.gz")
    );
    assert!(absolute(Path::new("out.tar.gz")).expect("cwd").is_absolute());
}

#[tokio::test]
async fn test_tar_pack_then_extract() {
    let src = tempfile::tempdir().expect("tempdir");
    let dst = tempfile::tempdir().expect("tempdir");
    let out = tempfile::tempdir().expect("tempdir");

    std::fs::create_dir_all(src.path().join("nested")).expect("mkdir");
    std::fs::write(src.path().join("top.txt"), "top\n").expect("write");
    std::fs::write(src.path().join("nested/inner.txt"), "inner\n").expect("write");

    let archive = out.path().join("bundle.tar.gz");
    TarTool::new()
        .pack_op()
        .directory(src.path())
        .archive(&archive)
        .run()
        .await
        .expect("pack");
    assert!(archive.is_file());

    TarTool::new()
        .extract_op()
        .archive(&archive)
        .directory(dst.path().join("unpacked"))
        .run()
        .await
        .expect("extract");

    let unpacked = dst.path().join("unpacked");
    assert_eq!(
        std::fs::read_to_string(unpacked.join("top.txt")).expect("read"),
        "top\n"
    );
    assert_eq!(
        std::fs::read_to_string(unpacked.join("nested/inner.txt")).expect("read"),
        "inner\n"
    );
}

#[tokio::test]
async fn test_tar_extract_missing_archive_fails() {
    let dst = tempfile::tempdir().expect("tempdir");
    let result = TarTool::new()
        .archive(dst.path().join("missing.tgz"))
        .directory(dst.path())
        .run()
        .await;
    assert!(result.is_err());
}
