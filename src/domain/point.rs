use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use super::error::GameError;
use super::geo::Position;
use super::window::TimeWindow;

/// Allowed geofence radius of a point of interest, in meters
pub const RADIUS_RANGE: RangeInclusive<i32> = 1..=50;
pub const TITLE_MAX_LEN: usize = 20;
pub const DESCRIPTION_MAX_LEN: usize = 300;

/// The three kinds of map-anchored points. They share one visibility model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiKind {
    Supply,
    Safezone,
    Mission,
}

impl fmt::Display for PoiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PoiKind {
    /// Convert from database string representation
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "supply" => Some(Self::Supply),
            "safezone" => Some(Self::Safezone),
            "mission" => Some(Self::Mission),
            _ => None,
        }
    }

    /// Parse the plural collection name used in URLs (`/supplies`, ...)
    #[must_use]
    pub fn from_collection(segment: &str) -> Option<Self> {
        match segment {
            "supplies" => Some(Self::Supply),
            "safezones" => Some(Self::Safezone),
            "missions" => Some(Self::Mission),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Supply => "supply",
            Self::Safezone => "safezone",
            Self::Mission => "mission",
        }
    }
}

/// What a supply drop contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropKind {
    Grenade,
    NerfGun,
    Ammo,
}

impl DropKind {
    /// Convert from database string representation
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grenade" => Some(Self::Grenade),
            "nerf_gun" => Some(Self::NerfGun),
            "ammo" => Some(Self::Ammo),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grenade => "grenade",
            Self::NerfGun => "nerf_gun",
            Self::Ammo => "ammo",
        }
    }
}

/// The attributes of a point that are checked before it is stored.
#[derive(Debug, Clone, Copy)]
pub struct PointFields<'a> {
    pub kind: PoiKind,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub position: Position,
    pub radius: i32,
    pub window: TimeWindow,
    pub drop_kind: Option<DropKind>,
    pub amount: Option<i32>,
}

impl PointFields<'_> {
    /// Check every invariant of a point of interest.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPosition`] for out-of-range coordinates and
    /// [`GameError::InvalidPointOfInterest`] for any other violated rule.
    pub fn validate(&self) -> Result<(), GameError> {
        let title = self.title.trim();
        if title.is_empty() || title.chars().count() > TITLE_MAX_LEN {
            return Err(invalid(format!(
                "title must be 1-{TITLE_MAX_LEN} characters"
            )));
        }

        if self
            .description
            .is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LEN)
        {
            return Err(invalid(format!(
                "description must be at most {DESCRIPTION_MAX_LEN} characters"
            )));
        }

        if !self.position.is_valid() {
            return Err(GameError::InvalidPosition {
                latitude: self.position.latitude,
                longitude: self.position.longitude,
            });
        }

        if !RADIUS_RANGE.contains(&self.radius) {
            return Err(invalid(format!(
                "radius must be between {} and {}",
                RADIUS_RANGE.start(),
                RADIUS_RANGE.end()
            )));
        }

        if !self.window.is_well_formed() {
            return Err(invalid("beginTime must be before endTime".to_string()));
        }

        if self.kind == PoiKind::Safezone && self.window.begin.is_none() {
            return Err(invalid("safezones require a beginTime".to_string()));
        }

        match (self.kind, self.drop_kind, self.amount) {
            (PoiKind::Supply, Some(_), Some(amount)) if amount >= 0 => Ok(()),
            (PoiKind::Supply, Some(_), Some(_)) => {
                Err(invalid("amount cannot be negative".to_string()))
            }
            (PoiKind::Supply, _, _) => {
                Err(invalid("supplies require a dropKind and an amount".to_string()))
            }
            (_, None, None) => Ok(()),
            (kind, _, _) => Err(invalid(format!("a {kind} cannot carry a drop"))),
        }
    }
}

fn invalid(message: String) -> GameError {
    GameError::InvalidPointOfInterest(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn fields(kind: PoiKind) -> PointFields<'static> {
        let begin = Utc
            .with_ymd_and_hms(2026, 10, 18, 9, 0, 0)
            .single()
            .unwrap_or_default();
        PointFields {
            kind,
            title: "Library",
            description: None,
            position: Position::new(59.91, 10.75),
            radius: 10,
            window: TimeWindow::between(begin, begin + Duration::hours(3)),
            drop_kind: None,
            amount: None,
        }
    }

    #[test]
    fn test_valid_mission() {
        assert!(fields(PoiKind::Mission).validate().is_ok());
    }

    #[test]
    fn test_radius_bounds() {
        for radius in [0, -5, 51] {
            let mut f = fields(PoiKind::Mission);
            f.radius = radius;
            assert!(matches!(
                f.validate(),
                Err(GameError::InvalidPointOfInterest(_))
            ));
        }
        let mut f = fields(PoiKind::Mission);
        f.radius = 50;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_safezone_requires_begin() {
        let mut f = fields(PoiKind::Safezone);
        f.window.begin = None;
        assert!(f.validate().is_err());

        let mut f = fields(PoiKind::Mission);
        f.window.begin = None;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut f = fields(PoiKind::Mission);
        f.window = TimeWindow::between(f.window.end, f.window.end);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_supply_drop_rules() {
        let mut f = fields(PoiKind::Supply);
        assert!(f.validate().is_err());

        f.drop_kind = Some(DropKind::Ammo);
        f.amount = Some(12);
        assert!(f.validate().is_ok());

        f.amount = Some(-1);
        assert!(f.validate().is_err());

        let mut m = fields(PoiKind::Mission);
        m.drop_kind = Some(DropKind::Grenade);
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_invalid_position() {
        let mut f = fields(PoiKind::Mission);
        f.position = Position::new(95.0, 0.0);
        assert!(matches!(
            f.validate(),
            Err(GameError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_title_length() {
        let mut f = fields(PoiKind::Mission);
        f.title = "   ";
        assert!(f.validate().is_err());
        f.title = "A title that is far too long";
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(PoiKind::from_collection("safezones"), Some(PoiKind::Safezone));
        assert_eq!(PoiKind::from_collection("kills"), None);
        assert_eq!(PoiKind::from_str("Supply"), Some(PoiKind::Supply));
        assert_eq!(DropKind::from_str("nerf_gun"), Some(DropKind::NerfGun));
    }
}
