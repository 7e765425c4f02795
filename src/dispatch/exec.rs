//! External-process execution context and job, per the environment and
//! remote-shell-template contract of the command dispatcher.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;

use crate::job_manager::{CancellationSignal, Job, JobMessage};

#[derive(Debug, Clone)]
pub struct ExecCtx {
    pub dir: String,
    pub cmd: String,
    pub arg: Vec<String>,
    pub stdin: Option<Vec<u8>>,
    pub extra_env: HashMap<String, String>,
    /// `None` means run locally; `Some(host)` means run over the remote
    /// shell template.
    pub remote_host: Option<String>,
    pub shell_template: String,
}

impl ExecCtx {
    pub fn new(dir: impl Into<String>, cmd: impl Into<String>, arg: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            cmd: cmd.into(),
            arg,
            stdin: None,
            extra_env: HashMap::new(),
            remote_host: None,
            shell_template: default_shell_template(),
        }
    }
}

pub fn default_shell_template() -> String {
    "sh -c $'cd \"{Dir}\" && {Cmd} {Args}'".to_string()
}

/// Substitute `{Dir}`, `{Cmd}`, `{Args}` into the shell template,
/// single-quote-escaping `{Cmd}` and `{Args}` so embedded quotes in the
/// command or its arguments can't break out of the `$'...'` wrapper.
pub fn expand_shell_template(template: &str, dir: &str, cmd: &str, args: &[String]) -> String {
    let joined_args = args.iter().map(|a| shell_escape(a)).collect::<Vec<_>>().join(" ");
    template
        .replace("{Dir}", dir)
        .replace("{Cmd}", &shell_escape(cmd))
        .replace("{Args}", &joined_args)
}

fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Build the environment variables every external command is invoked
/// with, per the design's `ANVIL_*` contract.
pub fn build_env(
    win_id: usize,
    global_path: &str,
    local_path: &str,
    global_dir: &str,
    local_dir: &str,
    anvil_dir: &str,
    cfg_dir: &str,
    api_port: u16,
    api_sess: &str,
    user_env: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut env = HashMap::new();
    env.insert("ANVIL_WIN_ID".into(), win_id.to_string());
    env.insert("ANVIL_WIN_GLOBAL_PATH".into(), global_path.into());
    env.insert("ANVIL_WIN_LOCAL_PATH".into(), local_path.into());
    env.insert("ANVIL_WIN_GLOBAL_DIR".into(), global_dir.into());
    env.insert("ANVIL_WIN_LOCAL_DIR".into(), local_dir.into());
    env.insert("ANVIL_DIR".into(), anvil_dir.into());
    env.insert("ANVIL_CFG_DIR".into(), cfg_dir.into());
    env.insert("ANVIL_API_PORT".into(), api_port.to_string());
    env.insert("ANVIL_API_SESS".into(), api_sess.into());
    if let Some(file_name) = std::path::Path::new(local_path).file_name() {
        env.insert("f".into(), file_name.to_string_lossy().into_owned());
    }
    env.insert("b".into(), local_path.into());
    env.insert("d".into(), local_dir.into());
    for (k, v) in user_env {
        env.insert(k.clone(), v.clone());
    }
    env
}

/// Exit status as captured into the command history, after translating
/// signalled exits to the exit-137 convention used on the local side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitRecord {
    pub code: i32,
    pub killed_by_signal: bool,
}

impl ExitRecord {
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                let _ = signal;
                return Self { code: 137, killed_by_signal: true };
            }
        }
        Self { code: status.code().unwrap_or(-1), killed_by_signal: false }
    }
}

/// Runs `ctx.cmd`/`ctx.arg` as a [`Job`], streaming stdout chunks as
/// `Progress` messages (first chunk is a SET, later chunks are APPENDs
/// per the pipe semantics — the job itself doesn't know which; that's
/// the caller's interpretation of chunk order) and finishing with the
/// translated exit status.
#[derive(Debug)]
pub struct ExternalCommandJob {
    pub ctx: ExecCtx,
    pub silent: bool,
}

impl Job for ExternalCommandJob {
    fn run(self: Box<Self>, id: usize, sender: Sender<JobMessage>, signal: CancellationSignal) {
        let mut command = Command::new(&self.ctx.cmd);
        command
            .args(&self.ctx.arg)
            .current_dir(&self.ctx.dir)
            .envs(&self.ctx.extra_env)
            .stdin(if self.ctx.stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = match command.spawn() {
            Ok(c) => c,
            Err(e) => {
                let _ = sender.send(JobMessage::Error(id, e.to_string()));
                return;
            }
        };

        if let (Some(stdin_data), Some(mut stdin)) = (self.ctx.stdin.as_ref(), child.stdin.take()) {
            let _ = stdin.write_all(stdin_data);
        }

        if let Some(mut stdout) = child.stdout.take() {
            let mut buf = [0u8; 4096];
            loop {
                if signal.is_cancelled() {
                    let _ = child.kill();
                    let _ = sender.send(JobMessage::Cancelled(id));
                    return;
                }
                match stdout.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                        if sender.send(JobMessage::Progress(id, 0, chunk)).is_err() {
                            return;
                        }
                    }
                    Err(_) => break,
                }
            }
        }

        let mut stderr_text = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_string(&mut stderr_text);
        }

        match child.wait() {
            Ok(status) => {
                let exit = ExitRecord::from_status(status);
                if exit.code == 0 {
                    let _ = sender.send(JobMessage::Finished(id, self.silent));
                } else {
                    let _ = sender.send(JobMessage::Error(id, format!("exit {}: {}", exit.code, stderr_text)));
                }
            }
            Err(e) => {
                let _ = sender.send(JobMessage::Error(id, e.to_string()));
            }
        }
    }

    fn is_silent(&self) -> bool {
        self.silent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitution_escapes_args() {
        let expanded = expand_shell_template(&default_shell_template(), "/tmp/x", "echo", &vec!["it's".to_string()]);
        assert!(expanded.contains("cd \"/tmp/x\""));
        assert!(expanded.contains(r"'it'\''s'"));
    }

    #[test]
    fn build_env_sets_window_and_api_vars() {
        let env = build_env(3, "/g/path", "path", "/g/dir", "dir", "/anvil", "/cfg", 8080, "sess1", &HashMap::new());
        assert_eq!(env.get("ANVIL_WIN_ID").unwrap(), "3");
        assert_eq!(env.get("ANVIL_API_PORT").unwrap(), "8080");
        assert_eq!(env.get("ANVIL_API_SESS").unwrap(), "sess1");
    }
}
