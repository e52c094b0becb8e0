//! Integration tests for the quantum-bootstrap binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".quantum");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("installer.yml"), config).unwrap();
    temp
}

fn node_sources(root: &Path) {
    fs::create_dir_all(root.join("core")).unwrap();
    fs::create_dir_all(root.join("network")).unwrap();
    fs::write(root.join("core/blockchain.py"), "class Blockchain: pass\n").unwrap();
    fs::write(root.join("network/peer.py"), "class Peer: pass\n").unwrap();
    fs::write(root.join("node.py"), "print('node')\n").unwrap();
    fs::write(root.join("requirements.txt"), "ecdsa\nbase58\n").unwrap();
}

fn bin() -> Command {
    let mut cmd = Command::new(cargo_bin("quantum-bootstrap"));
    cmd.env_remove("RUST_LOG");
    cmd
}

const MISSING_PYTHON: &str = "interpreter: quantum-bootstrap-test-no-such-python\n";

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = bin();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Cross-platform installer"))
        .stdout(predicate::str::contains("package"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = bin();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn install_dry_run_lists_invocations() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["install", "--dry-run", "--platform", "posix"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("would run: python3 --version"))
        .stdout(predicate::str::contains(
            "would run: pip3 install -r requirements.txt",
        ))
        .stdout(predicate::str::contains(
            "would run: python3 node.py 5000 --api",
        ));
    Ok(())
}

#[test]
fn install_dry_run_windows_profile() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = bin();
    cmd.args(["install", "--dry-run", "--platform", "windows", "--project"]);
    cmd.arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("would run: pip install -r requirements.txt"));
    Ok(())
}

#[test]
fn default_command_is_install() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MISSING_PYTHON);
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "ERROR: Python not found. Please install Python 3.7 or later.",
        ));
    Ok(())
}

#[test]
fn missing_interpreter_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MISSING_PYTHON);
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["install", "--non-interactive"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("not found"))
        .stdout(predicate::str::contains("Installing dependencies").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn failing_dependency_install_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("interpreter: \"true\"\npackage_installer: \"false\"\n");
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["install", "--no-pause"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Installing dependencies..."))
        .stderr(predicate::str::contains("ERROR: Failed to install dependencies."))
        .stdout(predicate::str::contains("Installation complete!").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn successful_install_announces_and_launches() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("interpreter: \"true\"\npackage_installer: \"true\"\n");
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.arg("install");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Installation complete!"))
        .stdout(predicate::str::contains("Starting Quantum node on port 5000..."))
        .stdout(predicate::str::contains(
            "API will be available at http://localhost:8545",
        ));
    Ok(())
}

#[cfg(unix)]
#[test]
fn status_lines_keep_their_fixed_text() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("interpreter: \"true\"\npackage_installer: \"true\"\n");
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["install", "--non-interactive"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\nInstallation complete!\n"))
        .stdout(predicate::str::contains("✓ Installation complete!").not());

    let failing = setup_project(MISSING_PYTHON);
    let mut cmd = bin();
    cmd.current_dir(failing.path());
    cmd.args(["install", "--non-interactive"]);
    cmd.assert().code(1).stderr(predicate::str::is_match(
        "(?m)^ERROR: Python not found\\. Please install Python 3\\.7 or later\\.$",
    )?);
    Ok(())
}

#[cfg(unix)]
#[test]
fn verbose_flag_echoes_commands() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("interpreter: \"true\"\npackage_installer: \"true\"\n");
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["--verbose", "install", "--non-interactive"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("$ true install -r requirements.txt"))
        .stdout(predicate::str::contains("$ true node.py 5000 --api"));

    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["install", "--non-interactive"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("$ true").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn node_exit_status_is_mirrored() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new()?;
    let fake = temp.path().join("fake-python");
    fs::write(
        &fake,
        "#!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then echo 'Python 3.11.2'; exit 0; fi\n\
         echo \"$@\" > launched.txt\n\
         exit 4\n",
    )?;
    fs::set_permissions(&fake, fs::Permissions::from_mode(0o755))?;
    let config = format!(
        "interpreter: \"{}\"\npackage_installer: \"true\"\n",
        fake.display()
    );
    fs::create_dir_all(temp.path().join(".quantum"))?;
    fs::write(temp.path().join(".quantum/installer.yml"), config)?;

    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.arg("install");
    cmd.assert()
        .code(4)
        .stdout(predicate::str::contains("Found Python 3.11.2"));

    let launched = fs::read_to_string(temp.path().join("launched.txt"))?;
    assert_eq!(launched.trim(), "node.py 5000 --api");
    Ok(())
}

#[test]
fn malformed_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("node_port: [not, a, port]\n");
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["install", "--dry-run"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn explicit_config_must_exist() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["--config", "missing.yml", "install", "--dry-run"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn config_overrides_port() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("node_port: 6000\napi_port: 9000\n");
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["install", "--dry-run", "--platform", "posix"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("python3 node.py 6000 --api"));
    Ok(())
}

#[test]
fn scripts_prints_shell_installer() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["scripts", "install.sh"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("#!/bin/bash"))
        .stdout(predicate::str::contains("pip3 install -r requirements.txt"));
    Ok(())
}

#[test]
fn scripts_out_writes_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["scripts", "--out", "dist"]);
    cmd.assert().success();

    assert!(temp.path().join("dist/install.sh").is_file());
    assert!(temp.path().join("dist/install.bat").is_file());
    let readme = fs::read_to_string(temp.path().join("dist/README.txt"))?;
    assert!(readme.contains("QUANTUM BLOCKCHAIN WALLET v1.0"));
    Ok(())
}

#[test]
fn package_creates_archive() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    node_sources(temp.path());
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.arg("package");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Package created:"))
        .stdout(predicate::str::contains("Quantum_Wallet_v1.0.zip"))
        .stdout(predicate::str::contains("Size: 0.00 MB"))
        .stdout(predicate::str::contains("Location:"));

    assert!(temp.path().join("Quantum_Wallet_v1.0.zip").is_file());
    assert!(!temp.path().join("Quantum_Wallet_v1.0").exists());
    Ok(())
}

#[test]
fn package_without_sources_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.arg("package");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Package source missing"));
    Ok(())
}

#[test]
fn doctor_json_reports_missing_interpreter() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MISSING_PYTHON);
    let mut cmd = bin();
    cmd.current_dir(temp.path());
    cmd.args(["doctor", "--json"]);
    let output = cmd.assert().code(1).get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["interpreter"]["found"], false);
    assert_eq!(report["ready"], false);
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = bin();
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("quantum-bootstrap"));
    Ok(())
}
