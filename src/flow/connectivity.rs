use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Consumer-provided network-status query.
pub trait Connectivity: Send + Sync + 'static {
    fn is_connected(&self) -> impl Future<Output = bool> + Send;
}

/// Connectivity driven by a shared flag the host flips from its own
/// network listener. Clones share the flag.
#[derive(Debug, Clone)]
pub struct ConnectivityFlag {
    online: Arc<AtomicBool>,
}

impl ConnectivityFlag {
    #[must_use]
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn set(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }

    #[must_use]
    pub fn get(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for ConnectivityFlag {
    async fn is_connected(&self) -> bool {
        self.get()
    }
}
