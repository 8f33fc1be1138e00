//! Environment-info collaborator.

use crate::models::EnvironmentInfo;
use std::sync::OnceLock;

/// Supplies the machine/runtime descriptor embedded in session events.
///
/// Implementations must be cheap and side-effect free; they are called
/// synchronously from plugin runs on arbitrary threads.
pub trait EnvironmentInfoCollector: Send + Sync {
    /// Collect a snapshot of the environment.
    fn collect(&self) -> EnvironmentInfo;
}

/// Collects from the running process and the standard library's view of the OS.
///
/// The first snapshot is cached; the environment does not change over the
/// lifetime of a process in ways this descriptor cares about.
#[derive(Debug, Default)]
pub struct SystemEnvironmentCollector {
    cached: OnceLock<EnvironmentInfo>,
}

impl SystemEnvironmentCollector {
    /// Create a new collector.
    pub fn new() -> Self {
        Self::default()
    }

    fn gather() -> EnvironmentInfo {
        let args: Vec<String> = std::env::args().collect();
        let process_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_default();
        let machine_name = std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .unwrap_or_default();

        EnvironmentInfo {
            processor_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            os_name: std::env::consts::OS.to_string(),
            os_version: None,
            architecture: std::env::consts::ARCH.to_string(),
            machine_name,
            process_name,
            process_id: std::process::id(),
            runtime_version: env!("CARGO_PKG_VERSION").to_string(),
            command_line: if args.is_empty() {
                None
            } else {
                Some(args.join(" "))
            },
            ..Default::default()
        }
    }
}

impl EnvironmentInfoCollector for SystemEnvironmentCollector {
    fn collect(&self) -> EnvironmentInfo {
        self.cached.get_or_init(Self::gather).clone()
    }
}

/// Always returns the same descriptor.
#[derive(Clone, Debug, Default)]
pub struct StaticEnvironmentCollector {
    info: EnvironmentInfo,
}

impl StaticEnvironmentCollector {
    /// Create a collector returning `info`.
    pub fn new(info: EnvironmentInfo) -> Self {
        Self { info }
    }
}

impl EnvironmentInfoCollector for StaticEnvironmentCollector {
    fn collect(&self) -> EnvironmentInfo {
        self.info.clone()
    }
}
