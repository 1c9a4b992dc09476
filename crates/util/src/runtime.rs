use std::sync::OnceLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;
use std::time::SystemTime;

/// Raised once the operator types `q` on stdin.
static QUIT: AtomicBool = AtomicBool::new(false);
/// Wall-clock cutoff taken from `TABLETOP_DURATION`.
static CUTOFF: OnceLock<Instant> = OnceLock::new();

/// INFO to the terminal, DEBUG to `logs/arena-<unix seconds>.log`.
///
/// Without a writable `logs/` directory only the terminal logger is
/// installed. Calling this twice keeps the first logger.
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];
    let stamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|since| since.as_secs())
        .unwrap_or_default();
    let file = std::fs::create_dir_all("logs")
        .and_then(|_| std::fs::File::create(format!("logs/arena-{}.log", stamp)));
    let missing = match file {
        Ok(file) => {
            loggers.push(simplelog::WriteLogger::new(log::LevelFilter::Debug, config, file));
            None
        }
        Err(e) => Some(e),
    };
    if simplelog::CombinedLogger::init(loggers).is_err() {
        return;
    }
    if let Some(e) = missing {
        log::warn!("logging to terminal only: {}", e);
    }
}

/// Whether the arena should wind down: `q` was entered or the cutoff passed.
pub fn interrupted() -> bool {
    QUIT.load(Ordering::Relaxed) || CUTOFF.get().is_some_and(|at| Instant::now() >= *at)
}

/// Arm both stop conditions. Searches in flight finish their current
/// iteration; the arena finishes its current match.
pub fn brb() {
    match std::env::var("TABLETOP_DURATION").ok().as_deref().map(duration) {
        Some(Some(limit)) => {
            let _ = CUTOFF.set(Instant::now() + limit);
            log::info!("stopping after {:?}", limit);
        }
        Some(None) => log::warn!("ignoring unreadable TABLETOP_DURATION"),
        None => {}
    }
    std::thread::spawn(|| {
        for line in std::io::stdin().lines().map_while(Result::ok) {
            if line.trim().eq_ignore_ascii_case("q") {
                log::warn!("stop requested, finishing the current match");
                QUIT.store(true, Ordering::Relaxed);
                return;
            }
        }
    });
}

/// `<count><unit>` with unit one of `s m h d`.
fn duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    let seconds = match text.chars().last()? {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };
    let count = text[..text.len() - 1].parse::<u64>().ok()?;
    count.checked_mul(seconds).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(duration(" 2h "), Some(Duration::from_secs(7200)));
        assert_eq!(duration("1d"), Some(Duration::from_secs(86400)));
    }

    #[test]
    fn unreadable_durations() {
        assert_eq!(duration("7x"), None);
        assert_eq!(duration(""), None);
        assert_eq!(duration("m"), None);
        assert_eq!(duration("-5s"), None);
        assert_eq!(duration(&format!("{}d", u64::MAX)), None);
    }

    #[test]
    fn idle_until_armed() {
        assert!(!interrupted());
    }
}
