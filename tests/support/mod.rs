// ABOUTME: Shared helpers for runtime-backed integration tests.
// ABOUTME: Connects to the local daemon and removes launched containers at exit.

use bivouac::runtime::{BollardRuntime, ContainerOps, detect_local, launch};
use bivouac::spec::ContainerSpec;
use bivouac::types::ContainerId;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

/// Containers launched by this test process, removed at exit.
static LAUNCHED: OnceLock<Mutex<Vec<String>>> = OnceLock::new();

/// Cleanup on process exit.
#[ctor::dtor]
fn cleanup_on_exit() {
    let Some(launched) = LAUNCHED.get() else {
        return;
    };
    let ids: Vec<String> = match launched.lock() {
        Ok(guard) => guard.clone(),
        Err(_) => return,
    };
    if ids.is_empty() {
        return;
    }

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return;
    };
    rt.block_on(async {
        let Ok(info) = detect_local() else {
            return;
        };
        let Ok(runtime) = BollardRuntime::connect(&info) else {
            return;
        };
        for id in ids {
            let id = ContainerId::new(id);
            let _ = runtime.stop_container(&id, Duration::from_secs(5)).await;
            let _ = runtime.remove_container(&id, true).await;
        }
    });
}

static TRACING: OnceLock<()> = OnceLock::new();

/// Connect to the locally detected runtime.
pub fn local_runtime() -> BollardRuntime {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });

    let info = detect_local().expect("no container runtime available");
    BollardRuntime::connect(&info).expect("failed to connect to runtime")
}

/// Register a container for removal when the test process exits.
pub fn track(id: &ContainerId) {
    let launched = LAUNCHED.get_or_init(|| Mutex::new(Vec::new()));
    if let Ok(mut guard) = launched.lock() {
        guard.push(id.to_string());
    }
}

/// Launch a spec and register the container for exit cleanup, including
/// the container a post-create failure leaves behind.
pub async fn launch_tracked(runtime: &BollardRuntime, spec: &ContainerSpec) -> ContainerId {
    match launch(runtime, spec).await {
        Ok(id) => {
            track(&id);
            id
        }
        Err(e) => {
            if let Some(id) = e.container_id() {
                track(id);
            }
            panic!("launch failed: {}", e);
        }
    }
}
