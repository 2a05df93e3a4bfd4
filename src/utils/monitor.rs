use serde::Serialize;
use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub rss_mb: u64,
    pub usage_percent: f32,
    pub peak_mb: u64,
}

/// Tracks process uptime and, with the `cli` feature, resident memory for
/// the health endpoint.
pub struct ProcessMonitor {
    start_time: Instant,
    #[cfg(feature = "cli")]
    inner: Option<Mutex<SysState>>,
}

#[cfg(feature = "cli")]
struct SysState {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

impl ProcessMonitor {
    #[cfg(feature = "cli")]
    pub fn new(enabled: bool) -> Self {
        let inner = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(Mutex::new(SysState {
                    system: System::new(),
                    pid,
                    peak_memory_mb: 0,
                })),
                Err(e) => {
                    tracing::warn!("Process memory stats disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            start_time: Instant::now(),
            inner,
        }
    }

    #[cfg(not(feature = "cli"))]
    pub fn new(_enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[cfg(feature = "cli")]
    pub fn memory_stats(&self) -> Option<MemoryStats> {
        let mut state = self.inner.as_ref()?.lock().ok()?;
        let pid = state.pid;
        state.system.refresh_memory();
        state
            .system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let rss_mb = state.system.process(pid)?.memory() / 1024 / 1024;
        let total_mb = state.system.total_memory() / 1024 / 1024;
        let usage_percent = if total_mb > 0 {
            (rss_mb as f32 / total_mb as f32) * 100.0
        } else {
            0.0
        };

        if rss_mb > state.peak_memory_mb {
            state.peak_memory_mb = rss_mb;
        }

        Some(MemoryStats {
            rss_mb,
            usage_percent,
            peak_mb: state.peak_memory_mb,
        })
    }

    #[cfg(not(feature = "cli"))]
    pub fn memory_stats(&self) -> Option<MemoryStats> {
        None
    }

    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "cli")]
        {
            self.inner.is_some()
        }
        #[cfg(not(feature = "cli"))]
        {
            false
        }
    }
}

impl Default for ProcessMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
