use attendance_tools::config::toml_config::TomlConfig;
use attendance_tools::utils::{logger, validation::Validate};
use attendance_tools::{
    AttendanceArgs, AttendanceOptions, AttendancePipeline, SystemClock, ToolEngine, ToolError,
};
use clap::Parser;
use std::io::Write;

fn main() {
    let args = AttendanceArgs::parse();

    // 初始化日誌
    logger::init(args.verbose, args.log_json);

    if let Err(e) = run(args) {
        exit_with(e);
    }
}

fn run(args: AttendanceArgs) -> attendance_tools::Result<()> {
    let settings = match &args.config {
        Some(path) => {
            tracing::debug!("Loading settings from {}", path.display());
            let settings = TomlConfig::from_file(path)?;
            settings.validate()?;
            Some(settings)
        }
        None => None,
    };

    let options: AttendanceOptions = args.into_options(settings.as_ref())?;
    tracing::debug!("Attendance options: {:?}", options);

    let pipeline = AttendancePipeline::new(&options, SystemClock)?;
    let engine = ToolEngine::new(pipeline);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    engine.run(&mut out)
}

fn exit_with(e: ToolError) -> ! {
    if let ToolError::Usage { usage } = &e {
        println!("{}", usage);
        let _ = std::io::stdout().flush();
        std::process::exit(e.exit_code());
    }

    tracing::error!(
        "Attendance count failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
