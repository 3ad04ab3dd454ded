use log::debug;
use subprocess::{Exec, Redirection};

/// Maps a machine name (`uname -m`) to the docker architecture name.
pub fn docker_arch(machine: &str) -> String {
    match machine {
        "x86_64" => "amd64".to_string(),
        "aarch64" => "arm64".to_string(),
        other => other.to_string(),
    }
}

// uname reports the running kernel, which may differ from the build target
// of this binary (e.g. under emulation).
fn host_machine() -> String {
    let uname = Exec::cmd("uname")
        .arg("-m")
        .stdout(Redirection::Pipe)
        .stderr(Redirection::Pipe)
        .capture();
    match uname {
        Ok(data) if data.success() => data.stdout_str().trim().to_string(),
        _ => {
            debug!("uname -m unavailable, using the build target architecture");
            std::env::consts::ARCH.to_string()
        }
    }
}

pub fn host_arch() -> String {
    docker_arch(&host_machine())
}
