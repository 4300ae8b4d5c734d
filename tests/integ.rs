use assert_cmd::prelude::*;
use predicate::str::contains;
use predicates::prelude::*;
use std::ffi;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[test]
fn basic_build() {
    let dist = integ_test_dir("basic").join("dist");
    let _ = fs::remove_dir_all(&dist);

    tscmake_command("basic", &["--once", "minecraft"])
        .assert()
        .success()
        .stdout(contains("Compiled a.ts"))
        .stdout(contains("Compiled b.ts"));

    assert!(dist.join("a.js").is_file());
    assert!(dist.join("b.js").is_file());
    assert!(dist.join("vue.js").is_file());
    assert!(dist.join("loader1.js").is_file());
    assert_eq!(
        fs::read_to_string(dist.join("index.html")).unwrap(),
        "<html>minecraft</html>\n"
    );
    assert!(dist.join("textures/dirt.png").is_file());
}

#[test]
fn static_assets_overwrite_stale_output() {
    let dist = integ_test_dir("overwrite").join("dist");
    let _ = fs::remove_dir_all(&dist);
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("index.html"), "stale").unwrap();

    tscmake_command("overwrite", &["--once"]).assert().success();

    assert_eq!(
        fs::read_to_string(dist.join("index.html")).unwrap(),
        "<html>fresh</html>\n"
    );
}

#[test]
fn repeated_build_is_idempotent() {
    let dist = integ_test_dir("idempotent").join("dist");
    let _ = fs::remove_dir_all(&dist);

    tscmake_command("idempotent", &["--once"]).assert().success();
    let first = fs::read_to_string(dist.join("index.html")).unwrap();

    tscmake_command("idempotent", &["--once"]).assert().success();
    let second = fs::read_to_string(dist.join("index.html")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_static_dir_aborts_before_spawning_the_compiler() {
    let dist = integ_test_dir("missing_static_dir").join("dist");
    let _ = fs::remove_dir_all(&dist);

    tscmake_command("missing_static_dir", &["--once"])
        .assert()
        .failure()
        .stderr(contains("does not exist"));

    // The stand-in compiler would have created the output directory.
    assert!(!dist.exists());
}

#[test]
fn unknown_target() {
    tscmake_command("basic", &["--once", "raytracer"])
        .assert()
        .failure()
        .stderr(contains("Invalid targets: raytracer"));
}

#[test]
fn invalid_config_file() {
    tscmake_command("invalid_config", &["--once"])
        .assert()
        .failure()
        .stderr(contains("Invalid format"));
}

#[test]
fn compiler_exit_code_propagates() {
    tscmake_command("failing_compiler", &["--once"])
        .assert()
        .failure()
        .code(3);
}

#[test]
#[cfg(unix)]
fn termination_signal_stops_watch_compilers() {
    use std::time::{Duration, Instant};

    let dist = integ_test_dir("watch").join("dist");
    let _ = fs::remove_dir_all(&dist);

    let mut orchestrator = tscmake_command("watch", &["app"]).spawn().unwrap();

    // The stand-in compiler records its pid once it is up.
    let pid_file = dist.join("compiler.pid");
    let deadline = Instant::now() + Duration::from_secs(10);
    while !pid_file.is_file() {
        assert!(
            Instant::now() < deadline,
            "stand-in compiler never started"
        );
        std::thread::sleep(Duration::from_millis(50));
    }
    let compiler_pid = fs::read_to_string(&pid_file).unwrap().trim().to_string();

    Command::new("kill")
        .arg(orchestrator.id().to_string())
        .status()
        .unwrap();

    let status = orchestrator.wait().unwrap();
    assert!(status.success());

    let compiler_alive = Command::new("kill")
        .args(&["-0", &compiler_pid])
        .status()
        .unwrap();
    assert!(!compiler_alive.success(), "compiler process was left behind");
}

#[test]
fn missing_compiler_is_fatal() {
    tscmake_command("missing_compiler", &["--once"])
        .assert()
        .failure()
        .stderr(contains("Failed to start compiler"));
}

fn integ_test_dir(name: &str) -> PathBuf {
    Path::new("tests/integ").join(name)
}

fn tscmake_command<I, S>(integ_test_dir_name: &str, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<ffi::OsStr>,
{
    let mut cmd = Command::cargo_bin("tscmake").unwrap();
    cmd.arg("-p")
        .arg(format!("tests/integ/{}", integ_test_dir_name))
        .args(args);
    cmd
}
