//! 可观测性模块
//!
//! 提供结构化日志初始化。库代码只产生 `tracing` 事件，由二进制入口决定
//! 输出格式与位置。

use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// 构建日志过滤器；`RUST_LOG` 优先于配置中的级别
pub fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

/// 初始化结构化日志
///
/// 配置了 `log_dir` 时按天滚动写入 `<service_name>.log`，返回的 guard
/// 需要在进程结束前一直持有，否则缓冲中的日志会丢失。
pub fn init_tracing(
    service_name: &str,
    logging: &LoggingConfig,
) -> Result<Option<WorkerGuard>, TryInitError> {
    let (writer, guard) = match &logging.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", service_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let registry = tracing_subscriber::registry().with(env_filter(logging));
    if logging.structured {
        registry.with(fmt_layer.json()).try_init()?;
    } else {
        registry.with(fmt_layer).try_init()?;
    }

    Ok(guard)
}
