//! DateTime display utilities.
//!
//! Tick reports and plan views carry UTC [`Timestamp`]s; the terminal shows
//! them in the system timezone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A `Timestamp` shown in the system timezone.
///
/// Used for the `# Tick at ...` heading of a tick report and for the
/// `- Updated: ...` line of a plan view.
///
/// # Format
///
/// `YYYY-MM-DD HH:MM:SS TZ`, on a 24-hour clock with zero-padded fields and
/// the zone abbreviation last (`UTC`, `CET`, `JST`).
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use mason_core::LocalDateTime;
///
/// let saved: Timestamp = "2024-03-01T12:30:45Z".parse()?;
/// let shown = format!("- Updated: {}", LocalDateTime(&saved));
/// assert!(shown.starts_with("- Updated: 2024-03-0"));
/// # Ok::<(), jiff::Error>(())
/// ```
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", local.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}
