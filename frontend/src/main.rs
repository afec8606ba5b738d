use leptos::prelude::*;
use omnichat_frontend::App;
use omnichat_frontend::config::AppConfig;
use omnichat_frontend::logging;

// 使用 lol_alloc 作为全局分配器以减小 WASM 体积
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    // 1. panic 信息输出到控制台
    console_error_panic_hook::set_once();

    // 2. 读取配置并初始化日志
    let config = AppConfig::from_env();
    let _ = logging::init(config.log_level);
    log::info!("OmniChat console starting, backend at {}", config.api_base_url);

    // 3. 挂载应用
    mount_to_body(move || view! { <App config=config.clone() /> });
}
