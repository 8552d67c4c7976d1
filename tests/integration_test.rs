use image::ColorType;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs `generate-icons` with no size flag and asserts that exactly the three
/// default icons are written, each square and 24-bit RGB.
#[test]
fn test_default_icon_generation() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let output = run_generate_icons(&["-o", output_dir.to_str().unwrap()]);
    assert_success(&output, "generate-icons");

    let mut names: Vec<String> = std::fs::read_dir(&output_dir)
        .expect("Output directory should exist")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["icon128.png", "icon16.png", "icon32.png"]);

    for size in [16, 32, 128] {
        let icon = image::open(output_dir.join(format!("icon{size}.png")))
            .expect("Failed to load generated icon");
        assert_eq!(icon.width(), size, "icon{size}.png width");
        assert_eq!(icon.height(), size, "icon{size}.png height");
        assert_eq!(icon.color(), ColorType::Rgb8, "icon{size}.png should have no alpha");

        // Corners keep the brand background
        assert_eq!(icon.to_rgb8().get_pixel(0, 0).0, [0x4A, 0x90, 0xE2]);
    }
}

#[test]
fn test_custom_sizes_and_colors() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("custom");

    let output = run_generate_icons(&[
        "--sizes",
        "48,96",
        "--background",
        "#000",
        "-o",
        output_dir.to_str().unwrap(),
    ]);
    assert_success(&output, "generate-icons --sizes 48,96");

    for size in [48, 96] {
        let icon = image::open(output_dir.join(format!("icon{size}.png")))
            .expect("Failed to load generated icon");
        assert_eq!((icon.width(), icon.height()), (size, size));
        assert_eq!(icon.to_rgb8().get_pixel(0, 0).0, [0, 0, 0]);
    }
    assert!(!output_dir.join("icon16.png").exists());
}

/// A directory squatting on `icon32.png` makes that save fail; the run must
/// stop there with exit code 1.
#[test]
fn test_save_failure_aborts_with_exit_code_1() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");
    std::fs::create_dir_all(output_dir.join("icon32.png")).unwrap();

    let output = run_generate_icons(&["-o", output_dir.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output_dir.join("icon16.png").is_file());
    assert!(!output_dir.join("icon128.png").exists(), "batch should stop at the failure");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failed to generate icon32.png"), "stdout: {stdout}");
}

#[test]
fn test_invalid_color_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = run_generate_icons(&[
        "--color",
        "nope",
        "-o",
        temp_dir.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
}

fn run_generate_icons(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to run generate-icons")
}

fn assert_success(output: &Output, what: &str) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("{what} failed");
    }
}

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_generate-icons"))
}
