// 日志模块 - 同时输出到控制台与按天轮转的日志文件

use std::path::PathBuf;

use tracing::subscriber::SetGlobalDefaultError;

/// 初始化日志系统
pub fn init() -> Result<(), SetGlobalDefaultError> {
    use tracing_subscriber::fmt::time::LocalTime;
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    // 日志目录放在工作目录下
    let log_dir = PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir).ok();

    // 配置日志输出到文件（每天轮转）
    let file_appender = tracing_appender::rolling::daily(log_dir.clone(), "pdp-survey.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // 保持 guard 在整个程序生命周期
    std::mem::forget(_guard);

    // 同时输出到控制台和文件
    let writer = std::io::stdout.and(non_blocking);

    // 使用本地时区
    let timer = LocalTime::new(
        time::format_description::parse(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]",
        )
        .unwrap(),
    );

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(writer)
        .with_timer(timer)
        .with_ansi(cfg!(debug_assertions)) // release 版本不使用颜色代码
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    eprintln!("日志文件位置: {:?}", log_dir);
    Ok(())
}
