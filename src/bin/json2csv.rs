use attendance_tools::config::toml_config::TomlConfig;
use attendance_tools::utils::{logger, validation::Validate};
use attendance_tools::{Json2CsvArgs, Json2CsvPipeline, ToolEngine, ToolError};
use std::io::{BufWriter, Write};

fn main() {
    let args = Json2CsvArgs::parse_from_env();

    // 初始化日誌
    logger::init(args.verbose, args.log_json);

    if let Err(e) = run(args) {
        exit_with(e);
    }
}

fn run(args: Json2CsvArgs) -> attendance_tools::Result<()> {
    let settings = match &args.config {
        Some(path) => {
            let settings = TomlConfig::from_file(path)?;
            settings.validate()?;
            Some(settings)
        }
        None => None,
    };

    let options = args.into_options(settings.as_ref())?;
    tracing::debug!("Conversion options: {:?}", options);

    let engine = ToolEngine::new(Json2CsvPipeline::new(&options));

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    engine.run(&mut out)
}

fn exit_with(e: ToolError) -> ! {
    if let ToolError::Usage { usage } = &e {
        println!("{}", usage);
        let _ = std::io::stdout().flush();
        std::process::exit(e.exit_code());
    }

    tracing::error!(
        "Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
