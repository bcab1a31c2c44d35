//! "How much faster?" calculator
//!
//! Each leg is two speeds and a distance in matching units (say km/h and km).
//! Time saved is `distance / speed1 - distance / speed2`, in hours.

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg {
    pub speed1: f64,
    pub speed2: f64,
    pub distance: f64,
}

impl Leg {
    pub fn new(speed1: f64, speed2: f64, distance: f64) -> Self {
        Self {
            speed1,
            speed2,
            distance,
        }
    }

    /// A leg with a zero (or negative) field has no answer yet
    pub fn is_empty(&self) -> bool {
        !(self.speed1 > 0.0 && self.speed2 > 0.0 && self.distance > 0.0)
    }

    /// Hours saved going at `speed2` instead of `speed1`; negative when slower
    pub fn time_saved(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.distance * (1.0 / self.speed1 - 1.0 / self.speed2)
    }
}

/// `"speed1,speed2,distance"`, each a plain number with at most two decimals
impl FromStr for Leg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let [a, b, c] = fields.as_slice() else {
            return Err(format!("expected speed1,speed2,distance, got '{}'", s));
        };
        Ok(Self::new(parse_amount(a)?, parse_amount(b)?, parse_amount(c)?))
    }
}

/// Digits with an optional point and up to two decimals; empty means zero
fn parse_amount(s: &str) -> Result<f64, String> {
    if s.is_empty() {
        return Ok(0.0);
    }
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if !digits(whole) || !digits(frac) || frac.len() > 2 || s == "." {
        return Err(format!("'{}' is not an amount like 12.5", s));
    }
    s.parse::<f64>().map_err(|e| format!("'{}': {}", s, e))
}

/// Signed hours rendered as `[-]HH:MM:SS`, rounded to the second
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hms(pub f64);

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return write!(f, "00:00:00");
        }
        let total = (self.0.abs() * 3600.0).round() as u64;
        let sign = if self.0 < 0.0 && total > 0 { "-" } else { "" };
        write!(f, "{}{:02}:{:02}:{:02}", sign, total / 3600, (total % 3600) / 60, total % 60)
    }
}

/// Sum of distances and of time saved over every leg
pub fn totals(legs: &[Leg]) -> (f64, f64) {
    legs.iter()
        .fold((0.0, 0.0), |(d, t), leg| (d + leg.distance, t + leg.time_saved()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faster_leg_saves_time() {
        let leg = Leg::new(60.0, 80.0, 120.0);
        assert!((leg.time_saved() - 0.5).abs() < 1e-9);
        assert_eq!(Hms(leg.time_saved()).to_string(), "00:30:00");
        assert_eq!(Hms(Leg::new(80.0, 60.0, 120.0).time_saved()).to_string(), "-00:30:00");
    }

    #[test]
    fn missing_fields_save_nothing() {
        let leg = Leg::new(0.0, 80.0, 120.0);
        assert!(leg.is_empty());
        assert_eq!(leg.time_saved(), 0.0);
    }

    #[test]
    fn parses_legs() {
        assert_eq!("60, 80,120.25".parse::<Leg>(), Ok(Leg::new(60.0, 80.0, 120.25)));
        assert_eq!(",80,1".parse::<Leg>(), Ok(Leg::new(0.0, 80.0, 1.0)));
        assert!("60,80".parse::<Leg>().is_err());
        assert!("60,80,1.234".parse::<Leg>().is_err());
        assert!("60,-80,1".parse::<Leg>().is_err());
        assert!("nan,80,1".parse::<Leg>().is_err());
    }

    #[test]
    fn hms_rounds_to_the_second() {
        assert_eq!(Hms(1.0 + 1.0 / 3600.0 * 61.4).to_string(), "01:01:01");
        assert_eq!(Hms(f64::INFINITY).to_string(), "00:00:00");
    }

    #[test]
    fn totals_add_up() {
        let legs = [Leg::new(60.0, 80.0, 120.0), Leg::new(0.0, 0.0, 10.0)];
        let (distance, saved) = totals(&legs);
        assert_eq!(distance, 130.0);
        assert!((saved - 0.5).abs() < 1e-9);
    }
}
