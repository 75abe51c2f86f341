#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
}

/// Samples this process' CPU and resident memory between pipeline phases.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<Mutex<(System, u64)>>,
    pid: Option<Pid>,
    started: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = sysinfo::get_current_pid().ok();
        let state = match (enabled, pid) {
            (true, Some(pid)) => {
                let mut system = System::new();
                system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                Some(Mutex::new((system, 0)))
            }
            (true, None) => {
                tracing::warn!("Process id unavailable, monitoring disabled");
                None
            }
            _ => None,
        };

        Self {
            state,
            pid,
            started: Instant::now(),
        }
    }

    pub fn sample(&self) -> Option<PhaseStats> {
        let pid = self.pid?;
        let mut guard = self.state.as_ref()?.lock().ok()?;
        let (system, peak) = &mut *guard;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let process = system.process(pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        *peak = (*peak).max(memory_mb);

        Some(PhaseStats {
            cpu_usage: process.cpu_usage(),
            memory_mb,
            peak_memory_mb: *peak,
            elapsed: self.started.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_mb,
                stats.peak_memory_mb,
                stats.elapsed
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

// 非 CLI 環境的空實現
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
