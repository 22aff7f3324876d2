//! End-to-end runs of the `venvboot` binary against a stub interpreter.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard};

static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

const STUB: &str = r#"#!/bin/sh
echo "interpreter $*" >> '@LOG@'
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
mkdir -p "$3/bin"
printf '# activate\n' > "$3/bin/activate"
cat > "$3/bin/python" <<'PYEOF'
#!/bin/sh
echo "python $*" >> '@LOG@'
echo "pip chatter on stdout"
exit 0
PYEOF
chmod +x "$3/bin/python"
fi
exit 0
"#;

struct Sandbox {
    _tmp: tempfile::TempDir,
    home: PathBuf,
    project: PathBuf,
    log: PathBuf,
    stub: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let project = tmp.path().join("project");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("setup.py"), "from setuptools import setup\nsetup()\n").unwrap();
        let log = tmp.path().join("calls.log");
        let stub = tmp.path().join("python3-stub");
        std::fs::write(&stub, STUB.replace("@LOG@", &log.to_string_lossy())).unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self {
            _tmp: tmp,
            home,
            project,
            log,
            stub,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_venvboot"))
            .args(args)
            .current_dir(&self.project)
            .env("HOME", &self.home)
            .env("VENVBOOT_PYTHON", &self.stub)
            .env("SHELL", "/bin/bash")
            .env_remove("PYTHON")
            .env_remove("RUST_LOG")
            .env("VENVBOOT_PROJECT_DIR", &self.project)
            .output()
            .unwrap()
    }

    fn env_dir(&self) -> PathBuf {
        self.home.join(".virtualenvs").join("synthpops")
    }

    fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}

fn entry_point(env_dir: &Path) -> PathBuf {
    env_dir.join("bin").join("activate")
}

#[test]
fn first_run_bootstraps_and_second_run_only_activates() {
    let _guard = serial();
    let sb = Sandbox::new();

    let first = sb.run(&[]);
    assert!(first.status.success(), "stderr: {}", text(&first.stderr));
    assert_eq!(
        text(&first.stdout),
        format!(". '{}'\n", entry_point(&sb.env_dir()).display())
    );
    let stderr = text(&first.stderr);
    assert!(stderr.contains("creating virtual environment"));
    assert!(stderr.contains("in editable mode"));
    assert!(stderr.contains("activated virtual environment"));
    assert!(stderr.contains("pip chatter on stdout"));
    let calls = sb.calls();
    assert_eq!(calls.len(), 3, "calls: {:?}", calls);
    assert!(calls[2].ends_with(&format!("-e {}", sb.project.display())));

    let second = sb.run(&["activate"]);
    assert!(second.status.success());
    assert_eq!(text(&second.stdout), text(&first.stdout));
    let stderr = text(&second.stderr);
    assert!(!stderr.contains("creating"));
    assert!(stderr.contains("activated virtual environment"));
    assert_eq!(sb.calls(), calls);
}

#[test]
fn missing_environment_fails_without_output() {
    let _guard = serial();
    let sb = Sandbox::new();
    std::fs::create_dir_all(sb.env_dir()).unwrap();

    let out = sb.run(&[]);

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(text(&out.stderr).contains("virtual environment not found"));
}

#[test]
fn fish_shell_gets_fish_syntax() {
    let _guard = serial();
    let sb = Sandbox::new();

    let out = sb.run(&["activate", "--shell", "fish"]);

    assert!(out.status.success(), "stderr: {}", text(&out.stderr));
    assert!(text(&out.stdout).contains("set -gx VIRTUAL_ENV"));
}

#[test]
fn path_status_and_remove() {
    let _guard = serial();
    let sb = Sandbox::new();

    let path = sb.run(&["path"]);
    assert_eq!(text(&path.stdout).trim(), sb.env_dir().display().to_string());

    assert!(sb.run(&[]).status.success());
    let status = text(&sb.run(&["status"]).stdout);
    assert!(status.contains("exists:            yes"));
    assert!(status.contains("(override)"));

    let declined = sb.run(&["remove"]);
    assert!(declined.status.success());
    assert!(text(&declined.stderr).contains("venvboot: cancelled"));
    assert!(sb.env_dir().exists());

    assert!(sb.run(&["remove", "--force"]).status.success());
    assert!(!sb.env_dir().exists());
}
