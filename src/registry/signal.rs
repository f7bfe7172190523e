//! Low-level signal delivery and liveness probes.
//!
//! Helpers are spawned as process-group leaders, so termination targets the
//! group `-pid` and falls back to the single pid when no group exists.

use std::io;
use std::time::Duration;

use log::debug;

use crate::error::TerminateError;

/// How often to re-probe liveness while waiting out the grace period.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Probe whether `pid` is still running without delivering a signal.
///
/// EPERM means the process exists but belongs to another user, which still
/// counts as running.
pub(crate) fn is_running(pid: u32) -> bool {
    let rc = unsafe { libc::kill(pid as i32, 0) };
    if rc == 0 {
        return true;
    }
    io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

fn send_signal(pid: i32, signal: libc::c_int) -> io::Result<()> {
    let rc = unsafe { libc::kill(pid, signal) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

/// Signal the process group of `pid`, falling back to the pid alone when
/// the helper is not a group leader.
fn signal_tree(pid: u32, signal: libc::c_int) -> io::Result<()> {
    match send_signal(-(pid as i32), signal) {
        Ok(()) => Ok(()),
        Err(err) if err.raw_os_error() == Some(libc::ESRCH) => send_signal(pid as i32, signal),
        Err(err) => Err(err),
    }
}

fn map_signal_error(pid: u32, err: io::Error) -> TerminateError {
    if err.raw_os_error() == Some(libc::EPERM) {
        TerminateError::NotPermitted { pid }
    } else {
        TerminateError::Signal { pid, source: err }
    }
}

/// Terminate `pid` and its process group: SIGTERM, a bounded grace wait,
/// then SIGKILL. Returns `Ok` once the process is gone; a process that
/// disappears between the probe and the signal counts as gone.
pub(crate) async fn terminate_tree(pid: u32, grace: Duration) -> Result<(), TerminateError> {
    match signal_tree(pid, libc::SIGTERM) {
        Ok(()) => {}
        Err(err) if err.raw_os_error() == Some(libc::ESRCH) => return Ok(()),
        Err(err) => return Err(map_signal_error(pid, err)),
    }

    let deadline = tokio::time::Instant::now() + grace;
    while tokio::time::Instant::now() < deadline {
        if !is_running(pid) {
            return Ok(());
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    debug!("pid {} survived SIGTERM grace period, escalating to SIGKILL", pid);
    match signal_tree(pid, libc::SIGKILL) {
        Ok(()) => {}
        Err(err) if err.raw_os_error() == Some(libc::ESRCH) => return Ok(()),
        Err(err) => return Err(map_signal_error(pid, err)),
    }

    tokio::time::sleep(POLL_INTERVAL).await;
    if is_running(pid) {
        Err(TerminateError::Unkillable { pid })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Spawn a sleeping child with a reaper thread so the pid does not
    /// linger as a zombie once killed.
    fn spawn_sleeper() -> (u32, Arc<AtomicBool>) {
        let mut child = Command::new("sleep")
            .arg("30")
            .spawn()
            .expect("failed to spawn sleep");
        let pid = child.id();
        let exited = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&exited);
        std::thread::spawn(move || {
            let _ = child.wait();
            flag.store(true, Ordering::SeqCst);
        });
        (pid, exited)
    }

    #[test]
    fn test_is_running_live_process() {
        let (pid, _exited) = spawn_sleeper();
        assert!(is_running(pid));
        let _ = send_signal(pid as i32, libc::SIGKILL);
    }

    #[test]
    fn test_is_running_after_exit() {
        let (pid, exited) = spawn_sleeper();
        send_signal(pid as i32, libc::SIGKILL).unwrap();
        while !exited.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!is_running(pid));
    }

    #[tokio::test]
    async fn test_terminate_tree_stops_process() {
        let (pid, exited) = spawn_sleeper();
        terminate_tree(pid, Duration::from_millis(2000)).await.unwrap();
        // The reaper thread observes the exit almost immediately.
        std::thread::sleep(Duration::from_millis(100));
        assert!(exited.load(Ordering::SeqCst));
        assert!(!is_running(pid));
    }

    #[tokio::test]
    async fn test_terminate_tree_already_gone() {
        let (pid, exited) = spawn_sleeper();
        send_signal(pid as i32, libc::SIGKILL).unwrap();
        while !exited.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(10));
        }
        // ESRCH on SIGTERM maps to success.
        terminate_tree(pid, Duration::from_millis(500)).await.unwrap();
    }
}
