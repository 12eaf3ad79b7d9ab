use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "maze-walker"])
        .status()
        .expect("failed to invoke cargo check for maze-walker CLI binary");

    assert!(
        status.success(),
        "cargo check --bin maze-walker should succeed"
    );
}

#[test]
fn dry_run_exits_successfully() {
    let output = Command::new(env!("CARGO_BIN_EXE_maze-walker"))
        .args([
            "--dry-run",
            "--tiles-x",
            "6",
            "--tiles-y",
            "4",
            "--seed",
            "17",
            "--window-width",
            "320",
            "--window-height",
            "160",
        ])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch maze-walker");

    assert!(
        output.status.success(),
        "dry run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn zero_tile_count_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_maze-walker"))
        .args(["--dry-run", "--tiles-x", "0"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch maze-walker");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tiles_x"));
}

#[test]
fn zero_window_width_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_maze-walker"))
        .args(["--dry-run", "--window-width", "0"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch maze-walker");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("window.width"));
}
