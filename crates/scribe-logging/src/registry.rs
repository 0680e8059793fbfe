//! Log registry: outputs, level rules, and one-time configuration
//!
//! A [`LogRegistry`] is configured lazily on first use (creating a logger,
//! diagnosing, or an explicit [`LogRegistry::configure`]). Configuration:
//! * opens file-backed outputs under `<log_dir>/<program_name>/` when a log
//!   directory is configured, leaving them disabled otherwise;
//! * parses the level rule string, applying `out:*` entries to the outputs and
//!   keeping the others as logger name rules;
//! * reports every problem found on the way as a warning through the
//!   registry's own `logging` logger once the outputs are up.
//!
//! After configuration the outputs' levels and the name rules never change, so
//! the logging path reads them without locking.

use crate::binary::BinarySink;
use crate::diagnostics::{Diagnosable, DiagnosticsSink, JsonLinesDiagnostics};
use crate::event::Event;
use crate::logger::Logger;
use crate::output::{EventSink, Output, TextSink, report_failure};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use scribe_core::{LevelRules, LogConfig, OutputKind, ScribeError, ScribeResult, Severity};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::SystemTime;
use time::OffsetDateTime;
use time::macros::format_description;

/// Name of the registry's own logger, used to report configuration problems
pub const REGISTRY_LOGGER_NAME: &str = "logging";

static GLOBAL_REGISTRY: OnceCell<LogRegistry> = OnceCell::new();

/// Everything a [`Logger`] needs from the registry
pub struct LoggerConfiguration {
    pub(crate) session: Arc<Session>,
    pub fully_qualified_name: String,
    pub level: Severity,
}

/// Process-wide logging state
pub struct LogRegistry {
    config: LogConfig,
    overrides: Mutex<Overrides>,
    session: OnceCell<Arc<Session>>,
}

#[derive(Default)]
struct Overrides {
    console: Option<Box<dyn Write + Send>>,
    diagnostics: Option<Box<dyn DiagnosticsSink>>,
    file_stamp: Option<String>,
}

/// Builder for a [`LogRegistry`] with injected sinks
pub struct LogRegistryBuilder {
    config: LogConfig,
    overrides: Overrides,
}

impl LogRegistryBuilder {
    /// Write console output somewhere other than standard error
    pub fn console_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.overrides.console = Some(Box::new(writer));
        self
    }

    /// Use a custom diagnostics sink instead of the JSON lines file
    pub fn diagnostics_sink(mut self, sink: impl DiagnosticsSink + 'static) -> Self {
        self.overrides.diagnostics = Some(Box::new(sink));
        self
    }

    /// Base name of the files created in the output directory
    pub fn file_stamp(mut self, stamp: impl Into<String>) -> Self {
        self.overrides.file_stamp = Some(stamp.into());
        self
    }

    pub fn build(self) -> LogRegistry {
        LogRegistry {
            config: self.config,
            overrides: Mutex::new(self.overrides),
            session: OnceCell::new(),
        }
    }
}

impl LogRegistry {
    /// Create an unconfigured registry
    pub fn new(config: LogConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: LogConfig) -> LogRegistryBuilder {
        LogRegistryBuilder {
            config,
            overrides: Overrides::default(),
        }
    }

    /// Get the global registry instance
    ///
    /// Unless [`LogRegistry::install`] ran first, this is built from the
    /// environment with the executable's file stem as program name.
    pub fn global() -> &'static LogRegistry {
        GLOBAL_REGISTRY
            .get_or_init(|| LogRegistry::new(LogConfig::from_env(default_program_name())))
    }

    /// Install the global registry
    ///
    /// Fails if the global registry already exists, including when it was
    /// created implicitly by an earlier logging call.
    pub fn install(config: LogConfig) -> ScribeResult<&'static LogRegistry> {
        let mut installed = false;
        let registry = GLOBAL_REGISTRY.get_or_init(|| {
            installed = true;
            LogRegistry::new(config)
        });
        if installed {
            Ok(registry)
        } else {
            Err(ScribeError::ConfigError(
                "global log registry already initialized".to_string(),
            ))
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Configure outputs and rules; later calls do nothing
    pub fn configure(&self) {
        self.session();
    }

    pub fn is_configured(&self) -> bool {
        self.session.get().is_some()
    }

    /// Resolve the threshold of the logger named `name`
    ///
    /// The first name rule matching `<program_name>/<name>` wins. Without a
    /// match the threshold is the lowest level of all enabled outputs, or
    /// [`Severity::NoLogs`] when every output is disabled.
    pub fn logger_configuration(&self, name: &str) -> LoggerConfiguration {
        let session = self.session();
        let fully_qualified_name = self.config.qualify(name);
        let level = session
            .rules
            .resolve(&fully_qualified_name)
            .unwrap_or_else(|| session.min_enabled_level());
        LoggerConfiguration {
            session: Arc::clone(session),
            fully_qualified_name,
            level,
        }
    }

    /// Create a logger bound to this registry
    pub fn logger(&self, name: &str) -> Logger {
        Logger::from_configuration(self.logger_configuration(name))
    }

    /// Push buffered events of every enabled output to its sink
    ///
    /// Does nothing before the registry is configured.
    pub fn flush(&self) {
        if let Some(session) = self.session.get() {
            session.flush();
        }
    }

    /// Forward a diagnostic to the diagnostics sink, if one is enabled
    pub fn diagnose(&self, source: &dyn Diagnosable, time: SystemTime, message: &str) {
        self.session().diagnose(source, time, message);
    }

    /// Level of one of the outputs, after configuration
    pub fn output_level(&self, kind: OutputKind) -> Severity {
        self.session().output_level(kind)
    }

    /// Problems found while configuring, rendered as messages
    pub fn configuration_problems(&self) -> Vec<String> {
        self.session().problems.clone()
    }

    fn session(&self) -> &Arc<Session> {
        let mut first = false;
        let session = self.session.get_or_init(|| {
            first = true;
            let overrides = std::mem::take(&mut *self.overrides.lock());
            Arc::new(Session::open(&self.config, overrides))
        });
        // Problems are logged once, by whichever call configured the registry
        if first && !session.problems.is_empty() {
            let logger = self.logger(REGISTRY_LOGGER_NAME);
            for problem in &session.problems {
                crate::log_warning!("{}", problem);
            }
            logger.writer().flush();
        }
        session
    }
}

impl Drop for LogRegistry {
    fn drop(&mut self) {
        self.flush();
    }
}

impl std::fmt::Debug for LogRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRegistry")
            .field("config", &self.config)
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Flushes a `'static` registry when dropped
///
/// The global registry lives in a static and is never dropped, so events
/// still buffered at exit are only written if `main` holds this guard until
/// it returns.
#[must_use = "dropping the guard flushes right away; hold it until the end of main"]
pub struct FlushGuard {
    registry: &'static LogRegistry,
}

impl FlushGuard {
    pub fn new(registry: &'static LogRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'static LogRegistry {
        self.registry
    }
}

impl Drop for FlushGuard {
    fn drop(&mut self) {
        self.registry.flush();
    }
}

impl std::fmt::Debug for FlushGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlushGuard")
            .field("registry", self.registry)
            .finish()
    }
}

/// Initialize the global registry for `program_name` from the environment
///
/// Keep the returned guard alive in `main`; dropping it performs the final
/// flush.
pub fn init(program_name: impl Into<String>) -> ScribeResult<FlushGuard> {
    LogRegistry::install(LogConfig::from_env(program_name)).map(FlushGuard::new)
}

/// Configured outputs and rules, shared with every logger's writer
pub(crate) struct Session {
    binary: Output,
    text: Output,
    console: Output,
    diagnostics_level: Severity,
    diagnostics: Option<Box<dyn DiagnosticsSink>>,
    diagnostics_failed: AtomicBool,
    rules: LevelRules,
    problems: Vec<String>,
}

impl Session {
    fn open(config: &LogConfig, overrides: Overrides) -> Self {
        let rules = LevelRules::parse(&config.level_rules);
        let mut problems: Vec<String> = rules.problems.iter().map(ToString::to_string).collect();
        let level_of = |kind: OutputKind| rules.output_level(kind).unwrap_or(kind.default_level());

        // File outputs need the per-program directory
        let dir = config.output_dir().and_then(|dir| match fs::create_dir_all(&dir) {
            Ok(()) => Some(dir),
            Err(err) => {
                problems.push(format!("cannot create log directory {}: {err}", dir.display()));
                None
            }
        });
        if dir.is_none() {
            for kind in [OutputKind::Binary, OutputKind::Text] {
                if rules.output_level(kind).is_some_and(Severity::emits) {
                    problems.push(format!("{kind} requested but no log directory is available"));
                }
            }
        }
        let stamp = overrides.file_stamp.unwrap_or_else(file_stamp);
        let files = OutputFiles {
            dir: dir.as_deref(),
            stamp: &stamp,
        };

        // Files are only created for outputs that can emit.
        let binary_level = level_of(OutputKind::Binary);
        let binary = files.open(OutputKind::Binary, binary_level, "blog", &mut problems, |file| {
            Box::new(BinarySink::new(BufWriter::new(file)))
        });
        let text_level = level_of(OutputKind::Text);
        let text = files.open(OutputKind::Text, text_level, "log", &mut problems, |file| {
            Box::new(TextSink::new(BufWriter::new(file)))
        });
        let console_writer = overrides
            .console
            .unwrap_or_else(|| Box::new(io::stderr()));
        let console = Output::new(
            OutputKind::Console,
            level_of(OutputKind::Console),
            Box::new(TextSink::new(console_writer)),
        );

        // An injected sink wins over the JSON lines file
        let mut diagnostics_level = level_of(OutputKind::Diagnostics);
        let diagnostics = match overrides.diagnostics {
            Some(sink) => Some(sink),
            None if diagnostics_level.emits() => files
                .create("diagnostics.jsonl", &mut problems)
                .map(|file| {
                    let sink = JsonLinesDiagnostics::new(BufWriter::new(file));
                    Box::new(sink) as Box<dyn DiagnosticsSink>
                }),
            None => None,
        };
        if diagnostics.is_none() {
            diagnostics_level = Severity::NoLogs;
        }

        Self {
            binary,
            text,
            console,
            diagnostics_level,
            diagnostics,
            diagnostics_failed: AtomicBool::new(false),
            rules,
            problems,
        }
    }

    fn outputs(&self) -> [&Output; 3] {
        [&self.binary, &self.text, &self.console]
    }

    pub(crate) fn output_level(&self, kind: OutputKind) -> Severity {
        match kind {
            OutputKind::Binary => self.binary.level(),
            OutputKind::Text => self.text.level(),
            OutputKind::Console => self.console.level(),
            OutputKind::Diagnostics => self.diagnostics_level,
        }
    }

    fn min_enabled_level(&self) -> Severity {
        self.outputs()
            .into_iter()
            .filter(|output| output.is_enabled())
            .map(Output::level)
            // NoLogs when disabled, so it never lowers the minimum
            .chain(Some(self.diagnostics_level))
            .min()
            .unwrap_or(Severity::NoLogs)
    }

    pub(crate) fn write(&self, event: &Event) {
        for output in self.outputs() {
            output.write(event);
        }
    }

    /// Route a diagnostic emitted at `severity` through the diagnostics level
    pub(crate) fn diagnose_at(
        &self,
        severity: Severity,
        source: &dyn Diagnosable,
        time: SystemTime,
        message: &str,
    ) {
        if self.diagnostics_level.emits() && severity >= self.diagnostics_level {
            self.diagnose(source, time, message);
        }
    }

    pub(crate) fn diagnose(&self, source: &dyn Diagnosable, time: SystemTime, message: &str) {
        if let Some(sink) = self.diagnostics.as_ref() {
            let result = sink.write(source, time, message);
            self.report_diagnostics(result);
        }
    }

    pub(crate) fn flush(&self) {
        for output in self.outputs() {
            output.flush();
        }
        if let Some(sink) = self.diagnostics.as_ref() {
            let result = sink.flush();
            self.report_diagnostics(result);
        }
    }

    fn report_diagnostics(&self, result: io::Result<()>) -> bool {
        report_failure(&self.diagnostics_failed, OutputKind::Diagnostics, result)
    }
}

struct OutputFiles<'a> {
    dir: Option<&'a Path>,
    stamp: &'a str,
}

impl OutputFiles<'_> {
    fn path(&self, extension: &str) -> Option<PathBuf> {
        self.dir
            .map(|dir| dir.join(format!("{}.{extension}", self.stamp)))
    }

    fn create(&self, extension: &str, problems: &mut Vec<String>) -> Option<File> {
        let path = self.path(extension)?;
        match File::create(&path) {
            Ok(file) => Some(file),
            Err(err) => {
                problems.push(format!("cannot create {}: {err}", path.display()));
                None
            }
        }
    }

    fn open(
        &self,
        kind: OutputKind,
        level: Severity,
        extension: &str,
        problems: &mut Vec<String>,
        make_sink: impl FnOnce(File) -> Box<dyn EventSink>,
    ) -> Output {
        if !level.emits() {
            return Output::disabled(kind);
        }
        match self.create(extension, problems) {
            Some(file) => Output::new(kind, level, make_sink(file)),
            None => Output::disabled(kind),
        }
    }
}

fn file_stamp() -> String {
    let format = format_description!("[year][month][day]T[hour][minute][second]Z");
    let now = OffsetDateTime::now_utc()
        .format(format)
        .unwrap_or_else(|_| "log".to_string());
    format!("{now}-{}", std::process::id())
}

fn default_program_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "scribe".to_string())
}
