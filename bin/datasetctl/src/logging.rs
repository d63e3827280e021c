//! Configure the process logger.
use slog::o;
use slog::Drain;
use slog::FnValue;
use slog::Level;
use slog::Logger;
use slog::OwnedKVList;
use slog::Record;
use slog_term::FullFormat;
use slog_term::TermDecorator;

/// Alternative implementation of slog's [`LevelFilter`] with `Ok == ()`.
///
/// The default [`LevelFilter`] implementation wraps `D::Ok` into an [`Option`].
///
/// [`LevelFilter`]: slog::LevelFilter
#[derive(Debug, Clone)]
struct LevelFilter<D: Drain>(pub D, pub Level);
impl<D: Drain> Drain for LevelFilter<D> {
    type Ok = ();
    type Err = D::Err;
    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        if record.level().is_at_least(self.1) {
            self.0.log(record, logger_values)?;
        }
        Ok(())
    }
}

/// Configure a logger writing to standard error, so command output is not mixed with logs.
pub fn configure<L>(level: L) -> Logger
where
    L: Into<Level>,
{
    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build();
    let drain = LevelFilter(drain, level.into()).fuse();
    Logger::root(
        drain,
        o!(
            "module" => FnValue(|rinfo : &Record| rinfo.module()),
        ),
    )
}

#[cfg(test)]
mod tests {
    use replicore_conf::LogLevel;

    #[test]
    fn configure_from_conf_level() {
        let logger = super::configure(LogLevel::Debug);
        slog::debug!(logger, "Logger configured for tests");
    }
}
