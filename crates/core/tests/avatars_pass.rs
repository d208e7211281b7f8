// crates/core/tests/avatars_pass.rs

use std::fs;
use std::path::Path;

use addrbook_core::avatars::{generate_avatars, output_filename, variants_for_stem, AVATAR_SIZE};
use image::{Rgba, RgbaImage};
use tempfile::tempdir;

const RAW: &str = "0:83dfd552e63729b472fcbcc8c45ebcc6691702558b68ec7527e1ba403a0f31a8";
const BOUNCEABLE: &str = "EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2N";
const NON_BOUNCEABLE: &str = "UQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqEBI";

fn write_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255])).save(path).expect("save png");
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read output dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn raw_named_avatar_yields_three_square_variants() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("avatars");
    let output = tmp.path().join("build").join("avatars");
    fs::create_dir_all(&input).unwrap();
    write_png(&input.join(format!("{RAW}.png")), 320, 120);

    let report = generate_avatars(&input, &output, 2);
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.written, 3);

    let mut expected: Vec<String> =
        [RAW, BOUNCEABLE, NON_BOUNCEABLE].iter().map(|v| output_filename(v)).collect();
    expected.sort();
    assert_eq!(sorted_names(&output), expected);

    for name in expected {
        let img = image::open(output.join(&name)).expect("decode output");
        assert_eq!((img.width(), img.height()), (AVATAR_SIZE, AVATAR_SIZE), "{name}");
    }
}

#[test]
fn bad_files_are_skipped_without_failing_the_pass() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("avatars");
    let output = tmp.path().join("out");
    fs::create_dir_all(&input).unwrap();

    write_png(&input.join(format!("{BOUNCEABLE}.png")), 64, 64);
    write_png(&input.join("not-an-address.png"), 64, 64);
    fs::write(input.join(format!("{}.jpg", "0:".to_string() + &"ab".repeat(32))), b"garbage")
        .unwrap();
    fs::write(input.join("readme.txt"), "ignored").unwrap();

    let report = generate_avatars(&input, &output, 0);
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.written, 3);
}

#[test]
fn second_spelling_of_same_address_is_skipped() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("avatars");
    let output = tmp.path().join("out");
    fs::create_dir_all(&input).unwrap();

    // Sorted listing puts the raw spelling ("0:...") before "EQ...".
    write_png(&input.join(format!("{RAW}.png")), 32, 32);
    write_png(&input.join(format!("{BOUNCEABLE}.webp.png")), 32, 32);
    write_png(&input.join(format!("{BOUNCEABLE}.png")), 48, 48);

    let report = generate_avatars(&input, &output, 1);
    assert_eq!(report.processed, 1);
    // One duplicate spelling plus one stem that is not an address.
    assert_eq!(report.skipped, 2);
    assert_eq!(sorted_names(&output).len(), 3);
}

#[test]
fn missing_input_dir_is_an_empty_pass() {
    let tmp = tempdir().expect("tempdir");
    let report = generate_avatars(&tmp.path().join("nope"), &tmp.path().join("out"), 0);
    assert_eq!(report, Default::default());
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn rerun_is_idempotent() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("avatars");
    let output = tmp.path().join("out");
    fs::create_dir_all(&input).unwrap();
    write_png(&input.join(format!("{NON_BOUNCEABLE}.PNG")), 10, 30);

    let first = generate_avatars(&input, &output, 0);
    let second = generate_avatars(&input, &output, 0);
    assert_eq!(first, second);
    assert_eq!(sorted_names(&output).len(), 3);
}

#[test]
fn any_spelling_maps_to_same_variants() {
    let a = variants_for_stem(RAW).unwrap();
    let b = variants_for_stem(BOUNCEABLE).unwrap();
    let c = variants_for_stem(NON_BOUNCEABLE).unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[cfg(unix)]
#[test]
fn symlinked_avatar_is_rendered() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("avatars");
    let output = tmp.path().join("out");
    fs::create_dir_all(&input).unwrap();
    let real = tmp.path().join("logo.png");
    write_png(&real, 64, 64);
    std::os::unix::fs::symlink(&real, input.join(format!("{BOUNCEABLE}.png"))).unwrap();

    let report = generate_avatars(&input, &output, 1);
    assert_eq!(report.processed, 1);
    assert_eq!(report.written, 3);
}
