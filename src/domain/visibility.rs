//! Point-of-interest visibility rules.
//!
//! A point is visible to an actor when three independent predicates hold, in
//! this order: the faction gate, the time window, and the geofence. The
//! conjunction short-circuits so the haversine computation only runs for
//! points that already passed the two cheap checks.

use chrono::{DateTime, Utc};

use super::faction::Faction;
use super::geo::{Geofence, Position};
use super::window::TimeWindow;

/// Per-faction visibility flags of a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactionVisibility {
    pub human: bool,
    pub zombie: bool,
}

impl FactionVisibility {
    #[must_use]
    pub const fn new(human: bool, zombie: bool) -> Self {
        Self { human, zombie }
    }

    /// A point with both flags off is hidden from everyone.
    #[must_use]
    pub const fn is_candidate_for(&self, faction: Faction) -> bool {
        match faction {
            Faction::Human => self.human,
            Faction::Zombie => self.zombie,
        }
    }
}

/// Anything that can be revealed on a map: supplies, safezones and missions.
pub trait PointOfInterest {
    fn visibility(&self) -> FactionVisibility;
    fn window(&self) -> TimeWindow;
    fn geofence(&self) -> Geofence;
}

/// The player a visibility decision is made for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub faction: Faction,
    pub position: Position,
}

impl Actor {
    #[must_use]
    pub const fn new(faction: Faction, position: Position) -> Self {
        Self { faction, position }
    }
}

/// Faction gate: is `poi` shown to this faction at all, ignoring time and distance?
pub fn is_candidate_for<P: PointOfInterest + ?Sized>(poi: &P, faction: Faction) -> bool {
    poi.visibility().is_candidate_for(faction)
}

/// Full visibility decision for one point at instant `now`.
pub fn is_visible_to<P: PointOfInterest + ?Sized>(
    actor: &Actor,
    poi: &P,
    now: DateTime<Utc>,
) -> bool {
    is_candidate_for(poi, actor.faction)
        && poi.window().is_active(now)
        && poi.geofence().contains(actor.position)
}

/// Lazily filter `pois` down to the ones visible to `actor`.
///
/// Every item is judged against the same `now`, input order is kept, and the
/// returned iterator can be cloned to walk the result again.
pub fn list_visible<'a, P, I>(
    actor: Actor,
    pois: I,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a P> + Clone
where
    P: PointOfInterest + 'a,
    I: IntoIterator<Item = &'a P>,
    I::IntoIter: Clone,
{
    pois.into_iter()
        .filter(move |poi| is_visible_to(&actor, *poi, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use std::cell::Cell;

    use crate::domain::geo::EARTH_RADIUS_METERS;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 18, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn north_of(from: Position, meters: f64) -> Position {
        Position::new(
            from.latitude + (meters / EARTH_RADIUS_METERS).to_degrees(),
            from.longitude,
        )
    }

    #[derive(Debug)]
    struct Spot {
        id: u32,
        flags: FactionVisibility,
        window: TimeWindow,
        fence: Geofence,
        window_reads: Cell<u32>,
        fence_reads: Cell<u32>,
    }

    impl Spot {
        fn new(id: u32, human: bool, zombie: bool) -> Self {
            Self {
                id,
                flags: FactionVisibility::new(human, zombie),
                window: TimeWindow::between(t0(), t0() + Duration::hours(1)),
                fence: Geofence::new(Position::new(0.0, 0.0), 10.0),
                window_reads: Cell::new(0),
                fence_reads: Cell::new(0),
            }
        }
    }

    impl PointOfInterest for Spot {
        fn visibility(&self) -> FactionVisibility {
            self.flags
        }

        fn window(&self) -> TimeWindow {
            self.window_reads.set(self.window_reads.get() + 1);
            self.window
        }

        fn geofence(&self) -> Geofence {
            self.fence_reads.set(self.fence_reads.get() + 1);
            self.fence
        }
    }

    fn human_at(position: Position) -> Actor {
        Actor::new(Faction::Human, position)
    }

    #[test]
    fn test_faction_gate() {
        assert!(FactionVisibility::new(true, false).is_candidate_for(Faction::Human));
        assert!(!FactionVisibility::new(true, false).is_candidate_for(Faction::Zombie));
        assert!(FactionVisibility::new(false, true).is_candidate_for(Faction::Zombie));
        assert!(!FactionVisibility::new(false, false).is_candidate_for(Faction::Human));
        assert!(!FactionVisibility::new(false, false).is_candidate_for(Faction::Zombie));
    }

    #[test]
    fn test_human_only_safezone_scenario() {
        let safezone = Spot::new(1, true, false);
        let now = t0() + Duration::minutes(5);
        let origin = Position::new(0.0, 0.0);

        assert!(is_visible_to(&human_at(origin), &safezone, now));
        assert!(!is_visible_to(
            &Actor::new(Faction::Zombie, origin),
            &safezone,
            now
        ));
        assert!(!is_visible_to(
            &human_at(north_of(origin, 20.0)),
            &safezone,
            now
        ));
    }

    #[test]
    fn test_outside_window_is_not_visible() {
        let spot = Spot::new(1, true, true);
        let origin = Position::new(0.0, 0.0);
        assert!(!is_visible_to(&human_at(origin), &spot, t0() - Duration::seconds(1)));
        assert!(!is_visible_to(&human_at(origin), &spot, t0() + Duration::hours(1)));
    }

    #[test]
    fn test_faction_rejection_skips_time_and_distance() {
        let spot = Spot::new(1, true, false);
        let zombie = Actor::new(Faction::Zombie, Position::new(0.0, 0.0));

        assert!(!is_visible_to(&zombie, &spot, t0()));
        assert_eq!(spot.window_reads.get(), 0);
        assert_eq!(spot.fence_reads.get(), 0);
    }

    #[test]
    fn test_inactive_window_skips_distance() {
        let spot = Spot::new(1, true, true);
        let human = human_at(Position::new(0.0, 0.0));

        assert!(!is_visible_to(&human, &spot, t0() - Duration::hours(1)));
        assert_eq!(spot.window_reads.get(), 1);
        assert_eq!(spot.fence_reads.get(), 0);
    }

    #[test]
    fn test_list_visible_keeps_order_and_restarts() {
        let spots = vec![
            Spot::new(1, true, false),
            Spot::new(2, false, true),
            Spot::new(3, true, true),
            Spot::new(4, false, false),
        ];
        let human = human_at(Position::new(0.0, 0.0));

        let visible = list_visible(human, &spots, t0());
        let first: Vec<u32> = visible.clone().map(|s| s.id).collect();
        let second: Vec<u32> = visible.map(|s| s.id).collect();

        assert_eq!(first, vec![1, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_visible_is_lazy() {
        let spots = vec![Spot::new(1, true, true), Spot::new(2, true, true)];
        let human = human_at(Position::new(0.0, 0.0));

        let mut visible = list_visible(human, &spots, t0());
        assert_eq!(spots[1].fence_reads.get(), 0);
        assert_eq!(visible.next().map(|s| s.id), Some(1));
        assert_eq!(spots[1].fence_reads.get(), 0);
    }

    proptest! {
        #[test]
        fn prop_list_visible_is_ordered_subset(
            flags in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..20),
            zombie in any::<bool>(),
            distance in 0.0f64..30.0,
            offset_secs in -600i64..4_200,
        ) {
            let spots: Vec<Spot> = flags
                .iter()
                .enumerate()
                .map(|(i, &(h, z))| Spot::new(u32::try_from(i).unwrap_or(u32::MAX), h, z))
                .collect();
            let faction = if zombie { Faction::Zombie } else { Faction::Human };
            let position = north_of(Position::new(0.0, 0.0), distance);
            let actor = Actor::new(faction, position);
            let now = t0() + Duration::seconds(offset_secs);

            let ids: Vec<u32> = list_visible(actor, &spots, now).map(|s| s.id).collect();

            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            for id in &ids {
                let spot = &spots[*id as usize];
                prop_assert!(is_visible_to(&actor, spot, now));
            }
            let expected = spots.iter().filter(|s| is_visible_to(&actor, *s, now)).count();
            prop_assert_eq!(ids.len(), expected);
        }
    }
}
